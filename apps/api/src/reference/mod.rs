//! Reference data: curated, read-only tables loaded once per process.
//!
//! Tables ship as JSON documents under `data/` and are embedded at compile
//! time. `ReferenceData::load_dir` reads the same file names from disk so a
//! deployment can override them. Either way the tables are validated eagerly:
//! a table that lacks its `default` sink is a contract violation and fails
//! construction, never a request.

pub mod duration;
pub mod industry;
pub mod tables;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::reference::industry::Industry;
use crate::reference::tables::{
    AliasTables, Certification, IndustryCertifications, IndustryResources, IndustryRoleAliases,
    IndustryRoles, IndustrySalaries, IndustrySkills, IndustryTransition, LearningCategory,
    LearningResource, RoleRecord, SalaryPath, SkillRequirement,
};

/// Key of the catch-all record in every per-industry table.
pub const DEFAULT_KEY: &str = "default";
/// Generic learning category used to top up sparse recommendations.
pub const LEADERSHIP_CATEGORY: &str = "leadership";

const CAREER_PATHS_FILE: &str = "career_paths.json";
const SKILLS_FILE: &str = "skill_requirements.json";
const CERTIFICATIONS_FILE: &str = "certifications.json";
const TRANSITIONS_FILE: &str = "industry_transitions.json";
const SALARIES_FILE: &str = "salary_progression.json";
const RESOURCES_FILE: &str = "learning_resources.json";
const ALIASES_FILE: &str = "aliases.json";

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid duration '{0}'")]
    InvalidDuration(String),

    #[error("{table} table has no '{industry}' industry")]
    MissingIndustry {
        table: &'static str,
        industry: Industry,
    },

    #[error("{table} table for '{industry}' has no default record")]
    MissingDefault {
        table: &'static str,
        industry: Industry,
    },

    #[error("{table} table for '{industry}' lists '{key}' more than once")]
    Duplicate {
        table: &'static str,
        industry: Industry,
        key: String,
    },

    #[error("{table} table: {message}")]
    Invalid {
        table: &'static str,
        message: String,
    },
}

/// Raw JSON documents, one per table.
pub struct ReferenceSources {
    pub career_paths: String,
    pub skills: String,
    pub certifications: String,
    pub transitions: String,
    pub salaries: String,
    pub resources: String,
    pub aliases: String,
}

impl ReferenceSources {
    pub fn builtin() -> Self {
        Self {
            career_paths: include_str!("../../data/career_paths.json").to_string(),
            skills: include_str!("../../data/skill_requirements.json").to_string(),
            certifications: include_str!("../../data/certifications.json").to_string(),
            transitions: include_str!("../../data/industry_transitions.json").to_string(),
            salaries: include_str!("../../data/salary_progression.json").to_string(),
            resources: include_str!("../../data/learning_resources.json").to_string(),
            aliases: include_str!("../../data/aliases.json").to_string(),
        }
    }

    pub fn from_dir(dir: &Path) -> Result<Self, ReferenceDataError> {
        let read = |file: &str| {
            let path = dir.join(file);
            std::fs::read_to_string(&path).map_err(|source| ReferenceDataError::Io { path, source })
        };

        Ok(Self {
            career_paths: read(CAREER_PATHS_FILE)?,
            skills: read(SKILLS_FILE)?,
            certifications: read(CERTIFICATIONS_FILE)?,
            transitions: read(TRANSITIONS_FILE)?,
            salaries: read(SALARIES_FILE)?,
            resources: read(RESOURCES_FILE)?,
            aliases: read(ALIASES_FILE)?,
        })
    }
}

/// The immutable, validated reference tables.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    career_paths: Vec<IndustryRoles>,
    skills: Vec<IndustrySkills>,
    certifications: Vec<IndustryCertifications>,
    transitions: Vec<IndustryTransition>,
    salaries: Vec<IndustrySalaries>,
    resources: Vec<IndustryResources>,
    aliases: AliasTables,
}

fn parse<T: DeserializeOwned>(file: &'static str, raw: &str) -> Result<T, ReferenceDataError> {
    serde_json::from_str(raw).map_err(|source| ReferenceDataError::Parse { file, source })
}

impl ReferenceData {
    /// Tables compiled into the binary.
    pub fn builtin() -> Result<Self, ReferenceDataError> {
        Self::from_sources(&ReferenceSources::builtin())
    }

    /// Tables read from `dir`, using the same file names as the built-in set.
    pub fn load_dir(dir: &Path) -> Result<Self, ReferenceDataError> {
        info!("Loading reference data from {}", dir.display());
        Self::from_sources(&ReferenceSources::from_dir(dir)?)
    }

    pub fn from_sources(sources: &ReferenceSources) -> Result<Self, ReferenceDataError> {
        let data = Self {
            career_paths: parse(CAREER_PATHS_FILE, &sources.career_paths)?,
            skills: parse(SKILLS_FILE, &sources.skills)?,
            certifications: parse(CERTIFICATIONS_FILE, &sources.certifications)?,
            transitions: parse(TRANSITIONS_FILE, &sources.transitions)?,
            salaries: parse(SALARIES_FILE, &sources.salaries)?,
            resources: parse(RESOURCES_FILE, &sources.resources)?,
            aliases: parse(ALIASES_FILE, &sources.aliases)?,
        };
        data.validate()?;

        info!(
            "Reference data loaded: {} industries, {} roles, {} transitions",
            data.career_paths.len(),
            data.career_paths.iter().map(|i| i.roles.len()).sum::<usize>(),
            data.transitions.len()
        );
        Ok(data)
    }

    /// Same tables with every salary ladder removed. Skips `validate`.
    #[cfg(test)]
    pub(crate) fn without_salaries(mut self) -> Self {
        self.salaries.clear();
        self
    }

    // ────────────────────────────────────────────────────────────────────────
    // Validation
    // ────────────────────────────────────────────────────────────────────────

    /// Checks every structural invariant lookups rely on.
    pub fn validate(&self) -> Result<(), ReferenceDataError> {
        validate_keyed(
            CAREER_PATHS_FILE,
            self.career_paths
                .iter()
                .map(|i| (i.industry, i.roles.iter().map(|r| r.key.as_str()).collect())),
        )?;
        validate_keyed(
            SKILLS_FILE,
            self.skills
                .iter()
                .map(|i| (i.industry, i.roles.iter().map(|r| r.key.as_str()).collect())),
        )?;
        validate_keyed(
            CERTIFICATIONS_FILE,
            self.certifications
                .iter()
                .map(|i| (i.industry, i.roles.iter().map(|r| r.key.as_str()).collect())),
        )?;

        // Every edge must land somewhere: on a record, or on its industry's default sink.
        // The default sink itself must have somewhere to go.
        for table in &self.career_paths {
            for role in &table.roles {
                if role.key == DEFAULT_KEY && role.next_roles.is_empty() {
                    return Err(ReferenceDataError::Invalid {
                        table: CAREER_PATHS_FILE,
                        message: format!("default record of '{}' has no next roles", table.industry),
                    });
                }
            }
        }

        if !self.salaries.iter().any(|s| s.industry == Industry::Default) {
            return Err(ReferenceDataError::MissingIndustry {
                table: SALARIES_FILE,
                industry: Industry::Default,
            });
        }
        for table in &self.salaries {
            if table.paths.is_empty() || table.paths.iter().any(|p| p.bands.is_empty()) {
                return Err(ReferenceDataError::Invalid {
                    table: SALARIES_FILE,
                    message: format!("'{}' has an empty salary path", table.industry),
                });
            }
            for band in table.paths.iter().flat_map(|p| &p.bands) {
                if band.range.0 > band.range.1 {
                    return Err(ReferenceDataError::Invalid {
                        table: SALARIES_FILE,
                        message: format!("'{}' has an inverted salary range", band.role),
                    });
                }
            }
        }

        if self.leadership_resources().is_empty() {
            return Err(ReferenceDataError::Invalid {
                table: RESOURCES_FILE,
                message: "default industry needs a non-empty 'leadership' category".to_string(),
            });
        }

        for table in &self.aliases.roles {
            let targets = table
                .aliases
                .iter()
                .map(|a| a.role.as_str())
                .chain([
                    table.tiers.junior.as_str(),
                    table.tiers.senior.as_str(),
                    table.tiers.lead.as_str(),
                ]);
            for target in targets {
                if !self.has_role(table.industry, target) {
                    return Err(ReferenceDataError::Invalid {
                        table: ALIASES_FILE,
                        message: format!("alias target '{target}' is not a '{}' role", table.industry),
                    });
                }
            }
        }

        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Role graph
    // ────────────────────────────────────────────────────────────────────────

    /// An industry's role table, or the `default` industry's when absent.
    pub fn roles_table(&self, industry: Industry) -> Result<&IndustryRoles, ReferenceDataError> {
        self.career_paths
            .iter()
            .find(|t| t.industry == industry)
            .or_else(|| self.career_paths.iter().find(|t| t.industry == Industry::Default))
            .ok_or(ReferenceDataError::MissingIndustry {
                table: CAREER_PATHS_FILE,
                industry: Industry::Default,
            })
    }

    /// A role record, falling back to the table's `default` sink.
    pub fn role(&self, industry: Industry, key: &str) -> Result<&RoleRecord, ReferenceDataError> {
        let table = self.roles_table(industry)?;
        table
            .roles
            .iter()
            .find(|r| r.key == key)
            .or_else(|| table.roles.iter().find(|r| r.key == DEFAULT_KEY))
            .ok_or(ReferenceDataError::MissingDefault {
                table: CAREER_PATHS_FILE,
                industry: table.industry,
            })
    }

    /// True only for a literal record, never the fallback.
    pub fn has_role(&self, industry: Industry, key: &str) -> bool {
        self.career_paths
            .iter()
            .any(|t| t.industry == industry && t.roles.iter().any(|r| r.key == key))
    }

    // ────────────────────────────────────────────────────────────────────────
    // Skills and certifications
    // ────────────────────────────────────────────────────────────────────────

    /// Required skills for a role, falling back to the industry's (or the
    /// global) default list.
    pub fn skills_for(&self, industry: Industry, key: &str) -> &[SkillRequirement] {
        let table = self
            .skills
            .iter()
            .find(|t| t.industry == industry)
            .or_else(|| self.skills.iter().find(|t| t.industry == Industry::Default));
        let Some(table) = table else {
            return &[];
        };
        table
            .roles
            .iter()
            .find(|r| r.key == key)
            .or_else(|| table.roles.iter().find(|r| r.key == DEFAULT_KEY))
            .map(|r| r.skills.as_slice())
            .unwrap_or(&[])
    }

    /// Required skills for an exact role record, without fallback.
    pub fn skills_exact(&self, industry: Industry, key: &str) -> Option<&[SkillRequirement]> {
        self.skills
            .iter()
            .find(|t| t.industry == industry)?
            .roles
            .iter()
            .find(|r| r.key == key)
            .map(|r| r.skills.as_slice())
    }

    /// Certifications for a role: exact key, then a key containing (or
    /// contained in) it, then the industry default, then the global default.
    pub fn certifications_for(
        &self,
        industry: Industry,
        key: &str,
    ) -> Result<&[Certification], ReferenceDataError> {
        let table = self
            .certifications
            .iter()
            .find(|t| t.industry == industry)
            .or_else(|| self.certifications.iter().find(|t| t.industry == Industry::Default));

        if let Some(table) = table {
            let found = table
                .roles
                .iter()
                .find(|r| r.key == key)
                .filter(|r| !r.certifications.is_empty())
                .or_else(|| {
                    table.roles.iter().find(|r| {
                        r.key != DEFAULT_KEY
                            && !r.certifications.is_empty()
                            && (r.key.contains(key) || key.contains(r.key.as_str()))
                    })
                })
                .or_else(|| table.roles.iter().find(|r| r.key == DEFAULT_KEY));
            if let Some(role) = found {
                return Ok(&role.certifications);
            }
        }

        self.certifications
            .iter()
            .find(|t| t.industry == Industry::Default)
            .and_then(|t| t.roles.iter().find(|r| r.key == DEFAULT_KEY))
            .map(|r| r.certifications.as_slice())
            .ok_or(ReferenceDataError::MissingDefault {
                table: CERTIFICATIONS_FILE,
                industry: Industry::Default,
            })
    }

    // ────────────────────────────────────────────────────────────────────────
    // Transitions, salaries, resources, aliases
    // ────────────────────────────────────────────────────────────────────────

    /// Transition data for a pair, falling back to `default → to`.
    pub fn transition(&self, from: Industry, to: Industry) -> Option<&IndustryTransition> {
        self.transitions
            .iter()
            .find(|t| t.from == from && t.to == to)
            .or_else(|| {
                self.transitions
                    .iter()
                    .find(|t| t.from == Industry::Default && t.to == to)
            })
    }

    /// An industry's salary ladders, or the default industry's.
    pub fn salary_paths(&self, industry: Industry) -> Result<&[SalaryPath], ReferenceDataError> {
        self.salaries
            .iter()
            .find(|t| t.industry == industry)
            .or_else(|| self.salaries.iter().find(|t| t.industry == Industry::Default))
            .map(|t| t.paths.as_slice())
            .ok_or(ReferenceDataError::MissingIndustry {
                table: SALARIES_FILE,
                industry: Industry::Default,
            })
    }

    /// An industry's learning categories, or the default industry's.
    pub fn resource_categories(&self, industry: Industry) -> &[LearningCategory] {
        self.resources
            .iter()
            .find(|t| t.industry == industry)
            .or_else(|| self.resources.iter().find(|t| t.industry == Industry::Default))
            .map(|t| t.categories.as_slice())
            .unwrap_or(&[])
    }

    /// A single category by exact name within one industry.
    pub fn resource_category(&self, industry: Industry, name: &str) -> Option<&LearningCategory> {
        self.resources
            .iter()
            .find(|t| t.industry == industry)?
            .categories
            .iter()
            .find(|c| c.name == name)
    }

    /// Every `(industry, category)` in declaration order.
    pub fn all_resource_categories(&self) -> impl Iterator<Item = (Industry, &LearningCategory)> {
        self.resources
            .iter()
            .flat_map(|t| t.categories.iter().map(move |c| (t.industry, c)))
    }

    pub fn leadership_resources(&self) -> &[LearningResource] {
        self.resource_category(Industry::Default, LEADERSHIP_CATEGORY)
            .map(|c| c.resources.as_slice())
            .unwrap_or(&[])
    }

    pub fn industry_aliases(&self) -> &[tables::IndustryAlias] {
        &self.aliases.industries
    }

    pub fn role_aliases(&self, industry: Industry) -> Option<&IndustryRoleAliases> {
        self.aliases.roles.iter().find(|t| t.industry == industry)
    }
}

/// Every industry present once, the default industry present, and each
/// industry carrying a unique-keyed role list with a `default` record.
fn validate_keyed<'a>(
    table: &'static str,
    industries: impl Iterator<Item = (Industry, Vec<&'a str>)>,
) -> Result<(), ReferenceDataError> {
    let mut seen_industries = HashSet::new();

    for (industry, keys) in industries {
        if !seen_industries.insert(industry) {
            return Err(ReferenceDataError::Duplicate {
                table,
                industry,
                key: industry.key().to_string(),
            });
        }

        let mut seen_keys = HashSet::new();
        for key in &keys {
            if !seen_keys.insert(*key) {
                return Err(ReferenceDataError::Duplicate {
                    table,
                    industry,
                    key: key.to_string(),
                });
            }
        }

        if !seen_keys.contains(DEFAULT_KEY) {
            return Err(ReferenceDataError::MissingDefault { table, industry });
        }
    }

    if !seen_industries.contains(&Industry::Default) {
        return Err(ReferenceDataError::MissingIndustry {
            table,
            industry: Industry::Default,
        });
    }

    Ok(())
}
