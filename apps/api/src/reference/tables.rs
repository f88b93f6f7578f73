//! Typed rows of the reference data tables. Every table is an ordered list of
//! records rather than a map, since several lookups depend on declaration order.

use serde::{Deserialize, Serialize};

use crate::reference::duration::DurationRange;
use crate::reference::industry::Industry;

// ────────────────────────────────────────────────────────────────────────────
// Role transitions
// ────────────────────────────────────────────────────────────────────────────

/// One node of an industry's role graph plus its outgoing edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRecord {
    pub key: String,
    pub next_roles: Vec<String>,
    /// Typical time spent in this role before moving on.
    pub typical_duration: DurationRange,
    pub required_experience: u32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryRoles {
    pub industry: Industry,
    pub roles: Vec<RoleRecord>,
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Essential,
    Important,
    Helpful,
}

impl Importance {
    /// Sort rank: essential first.
    pub fn rank(self) -> u8 {
        match self {
            Importance::Essential => 0,
            Importance::Important => 1,
            Importance::Helpful => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub name: String,
    pub importance: Importance,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSkills {
    pub key: String,
    pub skills: Vec<SkillRequirement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustrySkills {
    pub industry: Industry,
    pub roles: Vec<RoleSkills>,
}

// ────────────────────────────────────────────────────────────────────────────
// Certifications
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertificationValue {
    #[serde(rename = "essential")]
    Essential,
    #[serde(rename = "very high")]
    VeryHigh,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "required")]
    Required,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTier {
    High,
    Medium,
    Optional,
}

impl CertificationValue {
    pub fn tier(self) -> ValueTier {
        match self {
            CertificationValue::Essential
            | CertificationValue::VeryHigh
            | CertificationValue::High => ValueTier::High,
            CertificationValue::Medium => ValueTier::Medium,
            CertificationValue::Low | CertificationValue::Required => ValueTier::Optional,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub value: CertificationValue,
    pub difficulty: String,
    pub time_investment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCertifications {
    pub key: String,
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryCertifications {
    pub industry: Industry,
    pub roles: Vec<RoleCertifications>,
}

// ────────────────────────────────────────────────────────────────────────────
// Industry transitions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryTransition {
    pub from: Industry,
    pub to: Industry,
    pub difficulty: String,
    pub transferable_skills: Vec<String>,
    pub additional_skills_needed: Vec<String>,
    /// Bridging roles, best first.
    pub transition_roles: Vec<String>,
    pub time_investment: DurationRange,
}

// ────────────────────────────────────────────────────────────────────────────
// Salaries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub role: String,
    pub range: (u32, u32),
    pub median: u32,
    /// Annual growth, percent.
    pub growth_rate: u32,
}

/// A named progression ladder such as `developer_path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryPath {
    pub name: String,
    /// Role-key fragments that select this ladder for a role.
    #[serde(default)]
    pub keywords: Vec<String>,
    pub bands: Vec<SalaryBand>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustrySalaries {
    pub industry: Industry,
    pub paths: Vec<SalaryPath>,
}

// ────────────────────────────────────────────────────────────────────────────
// Learning resources
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub cost: String,
    pub time_investment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningCategory {
    pub name: String,
    pub resources: Vec<LearningResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryResources {
    pub industry: Industry,
    pub categories: Vec<LearningCategory>,
}

// ────────────────────────────────────────────────────────────────────────────
// Normalizer aliases
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryAlias {
    pub alias: String,
    pub industry: Industry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAlias {
    pub alias: String,
    pub role: String,
}

/// Role keys picked when only a seniority token is recognizable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeniorityTiers {
    pub junior: String,
    pub senior: String,
    pub lead: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryRoleAliases {
    pub industry: Industry,
    pub aliases: Vec<RoleAlias>,
    pub tiers: SeniorityTiers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasTables {
    pub industries: Vec<IndustryAlias>,
    pub roles: Vec<IndustryRoleAliases>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importance_rank_orders_essential_first() {
        let mut v = vec![Importance::Helpful, Importance::Essential, Importance::Important];
        v.sort_by_key(|i| i.rank());
        assert_eq!(v, vec![Importance::Essential, Importance::Important, Importance::Helpful]);
    }

    #[test]
    fn test_certification_value_tiers() {
        let very_high: CertificationValue = serde_json::from_str(r#""very high""#).unwrap();
        assert_eq!(very_high.tier(), ValueTier::High);
        assert_eq!(CertificationValue::Essential.tier(), ValueTier::High);
        assert_eq!(CertificationValue::Medium.tier(), ValueTier::Medium);
        assert_eq!(CertificationValue::Required.tier(), ValueTier::Optional);
    }

    #[test]
    fn test_learning_resource_type_field() {
        let json = r#"{"type": "book", "name": "Clean Code", "author": "Robert C. Martin",
                       "cost": "low", "time_investment": "1-2 months"}"#;
        let r: LearningResource = serde_json::from_str(json).unwrap();
        assert_eq!(r.kind, "book");
        assert!(r.provider.is_none());
        let back = serde_json::to_value(&r).unwrap();
        assert_eq!(back["type"], "book");
        assert!(back.get("provider").is_none());
    }

    #[test]
    fn test_salary_band_range_is_array() {
        let json = r#"{"role": "cto", "range": [250000, 400000], "median": 320000, "growth_rate": 3}"#;
        let band: SalaryBand = serde_json::from_str(json).unwrap();
        assert_eq!(band.range, (250000, 400000));
    }
}
