use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::reference::industry::{title_case, Industry};
use crate::reference::tables::{
    Certification, Difficulty, Importance, IndustryTransition, LearningResource,
};

// ────────────────────────────────────────────────────────────────────────────
// Current position
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareerStage {
    #[serde(rename = "early")]
    Early,
    #[serde(rename = "mid")]
    Mid,
    #[serde(rename = "advanced")]
    Advanced,
    #[serde(rename = "leadership")]
    Leadership,
    #[serde(rename = "expert")]
    Expert,
    #[serde(rename = "expert/leadership")]
    ExpertLeadership,
}

impl CareerStage {
    pub fn label(self) -> &'static str {
        match self {
            CareerStage::Early => "early",
            CareerStage::Mid => "mid",
            CareerStage::Advanced => "advanced",
            CareerStage::Leadership => "leadership",
            CareerStage::Expert => "expert",
            CareerStage::ExpertLeadership => "expert/leadership",
        }
    }

    /// Stage implied by experience alone.
    pub fn from_years(years: u32) -> Self {
        match years {
            0..=1 => CareerStage::Early,
            2..=4 => CareerStage::Mid,
            5..=9 => CareerStage::Advanced,
            _ => CareerStage::ExpertLeadership,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentPosition {
    /// Role exactly as the caller supplied it.
    pub role: String,
    pub normalized_role: String,
    pub industry: String,
    pub normalized_industry: Industry,
    pub years_experience: u32,
    pub career_stage: CareerStage,
}

// ────────────────────────────────────────────────────────────────────────────
// Career paths
// ────────────────────────────────────────────────────────────────────────────

pub const CURRENT_TIMELINE: &str = "Current";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    /// Display name, e.g. "Mid Level Developer".
    pub role: String,
    pub role_key: String,
    pub timeline: String,
    pub description: String,
    pub is_current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Capitalized industry label, e.g. "Technology".
    pub industry: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_transition: bool,
}

impl PathStep {
    /// The mandatory first step of every path.
    pub fn current(role_key: &str, description: impl Into<String>, industry: Industry) -> Self {
        Self {
            role: title_case(role_key),
            role_key: role_key.to_string(),
            timeline: CURRENT_TIMELINE.to_string(),
            description: description.into(),
            is_current: true,
            duration: None,
            industry: industry.label().to_string(),
            is_transition: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPath {
    pub name: String,
    pub description: String,
    pub steps: Vec<PathStep>,
}

impl CareerPath {
    /// Steps after the current one.
    pub fn upcoming(&self) -> impl Iterator<Item = &PathStep> {
        self.steps.iter().filter(|s| !s.is_current)
    }
}

/// The three growth directions of untargeted planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPaths {
    pub technical_path: CareerPath,
    pub management_path: CareerPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialized_path: Option<CareerPath>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetedPaths {
    pub primary_path: CareerPath,
    pub alternate_paths: Vec<CareerPath>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CareerPaths {
    Targeted(TargetedPaths),
    Growth(GrowthPaths),
}

impl CareerPaths {
    /// Every path with its stable key, in presentation order.
    pub fn named(&self) -> Vec<(String, &CareerPath)> {
        match self {
            CareerPaths::Growth(g) => {
                let mut paths = vec![
                    ("technical_path".to_string(), &g.technical_path),
                    ("management_path".to_string(), &g.management_path),
                ];
                if let Some(specialized) = &g.specialized_path {
                    paths.push(("specialized_path".to_string(), specialized));
                }
                paths
            }
            CareerPaths::Targeted(t) => {
                let mut paths = vec![("primary_path".to_string(), &t.primary_path)];
                paths.extend(
                    t.alternate_paths
                        .iter()
                        .enumerate()
                        .map(|(i, p)| (format!("alternate_path_{}", i + 1), p)),
                );
                paths
            }
        }
    }

    pub fn is_targeted(&self) -> bool {
        matches!(self, CareerPaths::Targeted(_))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill analysis
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillStatus {
    Acquired,
    Gap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquiredSkill {
    pub name: String,
    pub importance: Importance,
    pub status: SkillStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub name: String,
    pub importance: Importance,
    pub difficulty: Difficulty,
    pub status: SkillStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeededSkill {
    pub name: String,
    pub importance: Importance,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAnalysis {
    pub role: String,
    pub industry: String,
    pub required_skills: Vec<AcquiredSkill>,
    /// Essential first, then important, then helpful.
    pub skill_gaps: Vec<SkillGap>,
    pub match_percentage: f64,
    pub essential_match_percentage: f64,
    /// Keyed by next role display name.
    pub skills_for_next_roles: BTreeMap<String, Vec<NeededSkill>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificationRecommendations {
    pub high_value: Vec<Certification>,
    pub medium_value: Vec<Certification>,
    pub optional: Vec<Certification>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningResources {
    pub courses: Vec<LearningResource>,
    pub books: Vec<LearningResource>,
    pub certifications: Vec<LearningResource>,
    pub platforms: Vec<LearningResource>,
    pub other: Vec<LearningResource>,
}

impl LearningResources {
    /// Buckets resources by their `type` field, preserving order.
    pub fn grouped(resources: impl IntoIterator<Item = LearningResource>) -> Self {
        let mut grouped = Self::default();
        for resource in resources {
            let bucket = match resource.kind.as_str() {
                "course" => &mut grouped.courses,
                "book" => &mut grouped.books,
                "certification" => &mut grouped.certifications,
                "platform" => &mut grouped.platforms,
                _ => &mut grouped.other,
            };
            bucket.push(resource);
        }
        grouped
    }

    pub fn total(&self) -> usize {
        self.courses.len()
            + self.books.len()
            + self.certifications.len()
            + self.platforms.len()
            + self.other.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Salary
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentSalary {
    pub role: String,
    pub salary_range: (u32, u32),
    pub median_salary: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryProgressionEntry {
    /// Key of the path the step belongs to, e.g. "technical_path".
    pub path: String,
    pub role: String,
    pub timeline: String,
    pub salary_range: (u32, u32),
    pub median_salary: u32,
    pub industry: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryProgression {
    pub current: CurrentSalary,
    pub progression: Vec<SalaryProgressionEntry>,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate
// ────────────────────────────────────────────────────────────────────────────

/// The full report returned by `CareerEngine::plan_career_path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPlan {
    pub current_position: CurrentPosition,
    pub career_paths: CareerPaths,
    pub skill_analysis: SkillAnalysis,
    pub certification_recommendations: CertificationRecommendations,
    pub learning_resources: LearningResources,
    pub salary_progression: SalaryProgression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_transition: Option<IndustryTransition>,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(role_key: &str, current: bool) -> PathStep {
        PathStep {
            is_current: current,
            ..PathStep::current(role_key, "", Industry::Technology)
        }
    }

    #[test]
    fn test_career_stage_from_years() {
        assert_eq!(CareerStage::from_years(0), CareerStage::Early);
        assert_eq!(CareerStage::from_years(4), CareerStage::Mid);
        assert_eq!(CareerStage::from_years(9), CareerStage::Advanced);
        assert_eq!(CareerStage::from_years(10), CareerStage::ExpertLeadership);
        assert_eq!(
            serde_json::to_value(CareerStage::ExpertLeadership).unwrap(),
            "expert/leadership"
        );
    }

    #[test]
    fn test_named_paths_growth_order() {
        let path = CareerPath {
            name: "p".to_string(),
            description: String::new(),
            steps: vec![step("a", true), step("b", false)],
        };
        let paths = CareerPaths::Growth(GrowthPaths {
            technical_path: path.clone(),
            management_path: path.clone(),
            specialized_path: Some(path),
        });
        let keys: Vec<String> = paths.named().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["technical_path", "management_path", "specialized_path"]);
        assert!(!paths.is_targeted());
    }

    #[test]
    fn test_named_paths_targeted_alternates() {
        let path = CareerPath {
            name: "p".to_string(),
            description: String::new(),
            steps: vec![step("a", true)],
        };
        let paths = CareerPaths::Targeted(TargetedPaths {
            primary_path: path.clone(),
            alternate_paths: vec![path.clone(), path],
        });
        let keys: Vec<String> = paths.named().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["primary_path", "alternate_path_1", "alternate_path_2"]);
    }

    #[test]
    fn test_path_step_serialization_skips_empty_flags() {
        let value = serde_json::to_value(step("junior_developer", true)).unwrap();
        assert_eq!(value["role"], "Junior Developer");
        assert_eq!(value["timeline"], "Current");
        assert!(value.get("duration").is_none());
        assert!(value.get("is_transition").is_none());
    }

    #[test]
    fn test_learning_resources_grouped_by_type() {
        let resource = |kind: &str, name: &str| LearningResource {
            kind: kind.to_string(),
            name: name.to_string(),
            provider: None,
            author: None,
            cost: "low".to_string(),
            time_investment: "10 hours".to_string(),
        };
        let grouped = LearningResources::grouped(vec![
            resource("course", "A"),
            resource("book", "B"),
            resource("podcast", "C"),
            resource("course", "D"),
        ]);
        assert_eq!(grouped.courses.len(), 2);
        assert_eq!(grouped.books.len(), 1);
        assert_eq!(grouped.other[0].name, "C");
        assert_eq!(grouped.total(), 4);
    }
}
