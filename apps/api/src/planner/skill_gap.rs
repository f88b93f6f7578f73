//! Skill gap analysis: declared skills vs. the role's required-skill table.
//!
//! A requirement is acquired on an exact match, or for names longer than
//! five characters on substring containment in either direction.

use std::collections::{BTreeMap, HashSet};

use crate::models::plan::{AcquiredSkill, NeededSkill, SkillAnalysis, SkillGap, SkillStatus};
use crate::planner::PlanError;
use crate::reference::industry::{title_case, Industry};
use crate::reference::tables::{Importance, SkillRequirement};
use crate::reference::ReferenceData;

/// Requirement names at or below this length only match exactly.
const FUZZY_MIN_LEN: usize = 5;
/// Compound-skill parts at or below this length are ignored.
const PART_MIN_LEN: usize = 3;
const NEXT_ROLES_CHECKED: usize = 2;

/// Lower-cased declared skills plus the longer words of compound skills.
#[derive(Debug, Default)]
pub struct DeclaredSkills {
    skills: HashSet<String>,
}

impl DeclaredSkills {
    pub fn new(raw: &[String]) -> Self {
        let mut skills = HashSet::new();
        for skill in raw {
            let lowered = skill.trim().to_lowercase();
            if lowered.is_empty() {
                continue;
            }
            let parts: Vec<&str> = lowered.split_whitespace().collect();
            if parts.len() > 1 {
                skills.extend(
                    parts
                        .iter()
                        .filter(|p| p.len() > PART_MIN_LEN)
                        .map(|p| p.to_string()),
                );
            }
            skills.insert(lowered);
        }
        Self { skills }
    }

    pub fn covers(&self, requirement: &str) -> bool {
        let name = requirement.to_lowercase();
        self.skills.iter().any(|declared| {
            *declared == name
                || (name.len() > FUZZY_MIN_LEN
                    && (name.contains(declared.as_str()) || declared.contains(name.as_str())))
        })
    }
}

fn percentage(hit: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    let raw = hit as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

pub struct SkillGapAnalyzer<'a> {
    data: &'a ReferenceData,
}

impl<'a> SkillGapAnalyzer<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data }
    }

    pub fn analyze_skills(
        &self,
        role_key: &str,
        industry: Industry,
        declared: &[String],
    ) -> Result<SkillAnalysis, PlanError> {
        let declared = DeclaredSkills::new(declared);
        let requirements = self.data.skills_for(industry, role_key);

        let mut required_skills = Vec::new();
        let mut skill_gaps = Vec::new();
        for requirement in requirements {
            if declared.covers(&requirement.name) {
                required_skills.push(AcquiredSkill {
                    name: requirement.name.clone(),
                    importance: requirement.importance,
                    status: SkillStatus::Acquired,
                });
            } else {
                skill_gaps.push(SkillGap {
                    name: requirement.name.clone(),
                    importance: requirement.importance,
                    difficulty: requirement.difficulty,
                    status: SkillStatus::Gap,
                });
            }
        }
        skill_gaps.sort_by_key(|g| g.importance.rank());

        let essential_total = requirements
            .iter()
            .filter(|r| r.importance == Importance::Essential)
            .count();
        let essential_hit = required_skills
            .iter()
            .filter(|s| s.importance == Importance::Essential)
            .count();

        Ok(SkillAnalysis {
            role: title_case(role_key),
            industry: industry.label().to_string(),
            match_percentage: percentage(required_skills.len(), requirements.len()),
            essential_match_percentage: percentage(essential_hit, essential_total),
            skills_for_next_roles: self.skills_for_next_roles(role_key, industry, &declared)?,
            required_skills,
            skill_gaps,
        })
    }

    /// Essential and important skills still missing for the first next roles.
    /// Next roles without their own requirement table are skipped.
    fn skills_for_next_roles(
        &self,
        role_key: &str,
        industry: Industry,
        declared: &DeclaredSkills,
    ) -> Result<BTreeMap<String, Vec<NeededSkill>>, PlanError> {
        let record = self.data.role(industry, role_key)?;
        let mut needed = BTreeMap::new();

        for next in record.next_roles.iter().take(NEXT_ROLES_CHECKED) {
            let Some(requirements) = self.data.skills_exact(industry, next) else {
                continue;
            };
            let missing = requirements
                .iter()
                .filter(|r| r.importance != Importance::Helpful && !declared.covers(&r.name))
                .map(needed_skill)
                .collect();
            needed.insert(title_case(next), missing);
        }

        Ok(needed)
    }
}

fn needed_skill(requirement: &SkillRequirement) -> NeededSkill {
    NeededSkill {
        name: requirement.name.clone(),
        importance: requirement.importance,
        difficulty: requirement.difficulty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_declared_skills_exact_and_fuzzy() {
        let declared = DeclaredSkills::new(&skills(&["Python", "Git"]));
        assert!(declared.covers("Git"));
        assert!(declared.covers("Programming fundamentals (Python, JavaScript or Java)"));
        // Short names never match fuzzily.
        assert!(!declared.covers("Gi"));
        assert!(!declared.covers("SQL"));
    }

    #[test]
    fn test_declared_skills_split_compound() {
        let declared = DeclaredSkills::new(&skills(&["Agile project management", "  "]));
        assert!(declared.covers("Project management"));
        assert!(declared.covers("Stakeholder management"));
        assert!(!declared.covers(""));
    }

    #[test]
    fn test_percentage_rounding_and_empty() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(0, 0), 100.0);
    }

    #[test]
    fn test_junior_developer_analysis() {
        let data = ReferenceData::builtin().unwrap();
        let analyzer = SkillGapAnalyzer::new(&data);
        let analysis = analyzer
            .analyze_skills("junior_developer", Industry::Technology, &skills(&["Python", "Git"]))
            .unwrap();

        let acquired: Vec<&str> = analysis.required_skills.iter().map(|s| s.name.as_str()).collect();
        assert!(acquired.contains(&"Git"));
        assert!(acquired.iter().any(|name| name.contains("Python")));
        assert_eq!(analysis.role, "Junior Developer");
        assert_eq!(analysis.industry, "Technology");
        assert!(analysis.match_percentage > 0.0 && analysis.match_percentage < 100.0);

        let ranks: Vec<u8> = analysis.skill_gaps.iter().map(|g| g.importance.rank()).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));

        // First two next roles; only mid_level_developer has its own table.
        assert!(analysis.skills_for_next_roles.contains_key("Mid Level Developer"));
        assert!(!analysis.skills_for_next_roles.contains_key("Quality Assurance Engineer"));
        for needed in analysis.skills_for_next_roles.values().flatten() {
            assert_ne!(needed.importance, Importance::Helpful);
        }
    }

    #[test]
    fn test_match_percentage_bounds_for_any_input() {
        let data = ReferenceData::builtin().unwrap();
        let analyzer = SkillGapAnalyzer::new(&data);
        for declared in [skills(&[]), skills(&["a"]), skills(&["communication", "leadership", "excel"])] {
            for industry in Industry::ALL {
                let analysis = analyzer.analyze_skills("default", industry, &declared).unwrap();
                assert!((0.0..=100.0).contains(&analysis.match_percentage));
                assert!((0.0..=100.0).contains(&analysis.essential_match_percentage));
            }
        }
    }
}
