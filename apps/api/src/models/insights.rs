use serde::{Deserialize, Serialize};

use crate::models::plan::{AcquiredSkill, CurrentSalary, SalaryProgressionEntry};
use crate::reference::tables::{Certification, LearningResource};

/// Read-only slice of a plan describing one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerInsights {
    pub role_info: RoleInfo,
    pub career_paths: Vec<PathOutline>,
    pub skill_requirements: Vec<AcquiredSkill>,
    pub certification_recommendations: Vec<Certification>,
    pub learning_resources: InsightResources,
    pub salary_data: SalaryOutlook,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleInfo {
    pub title: String,
    pub industry: String,
    pub normalized_role: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathOutline {
    pub key: String,
    pub name: String,
    pub description: String,
    pub steps: Vec<StepOutline>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutline {
    pub role: String,
    pub timeline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightResources {
    pub courses: Vec<LearningResource>,
    pub books: Vec<LearningResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryOutlook {
    pub current: CurrentSalary,
    pub potential_growth: Vec<SalaryProgressionEntry>,
}
