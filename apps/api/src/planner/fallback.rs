//! Minimal, structurally complete plan used when composition fails.
//!
//! Built without touching the reference tables so it cannot fail itself.

use std::collections::BTreeMap;

use crate::models::plan::{
    CareerPath, CareerPaths, CareerPlan, CareerStage, CertificationRecommendations,
    CurrentPosition, CurrentSalary, GrowthPaths, LearningResources, NeededSkill, PathStep,
    SalaryProgression, SalaryProgressionEntry, SkillAnalysis, SkillGap, SkillStatus,
};
use crate::planner::composer::render_summary;
use crate::planner::path_generator::timeline_label;
use crate::reference::duration::DurationRange;
use crate::reference::industry::{snake_case, title_case, Industry};
use crate::reference::tables::{
    Certification, CertificationValue, Difficulty, Importance, LearningResource,
};

struct GenericStep {
    role: String,
    duration: DurationRange,
    description: &'static str,
}

fn generic_path(
    name: &str,
    description: &str,
    role_key: &str,
    industry: Industry,
    upcoming: Vec<GenericStep>,
) -> CareerPath {
    let mut steps = vec![PathStep::current(role_key, "Your current position", industry)];
    let mut elapsed = 0.0;
    for step in upcoming {
        elapsed += step.duration.midpoint_years();
        steps.push(PathStep {
            role_key: snake_case(&step.role),
            role: step.role,
            timeline: timeline_label(elapsed),
            description: step.description.to_string(),
            is_current: false,
            duration: Some(step.duration.to_string()),
            industry: industry.label().to_string(),
            is_transition: false,
        });
    }
    CareerPath {
        name: name.to_string(),
        description: description.to_string(),
        steps,
    }
}

fn needed(name: &str, importance: Importance, difficulty: Difficulty) -> NeededSkill {
    NeededSkill {
        name: name.to_string(),
        importance,
        difficulty,
    }
}

fn gap(name: String, importance: Importance) -> SkillGap {
    SkillGap {
        name,
        importance,
        difficulty: Difficulty::Medium,
        status: SkillStatus::Gap,
    }
}

fn certification(
    name: String,
    value: CertificationValue,
    difficulty: &str,
    time: &str,
) -> Certification {
    Certification {
        name,
        value,
        difficulty: difficulty.to_string(),
        time_investment: time.to_string(),
    }
}

fn resource(kind: &str, name: String, cost: &str, time: &str) -> LearningResource {
    LearningResource {
        kind: kind.to_string(),
        name,
        provider: None,
        author: None,
        cost: cost.to_string(),
        time_investment: time.to_string(),
    }
}

pub fn fallback_plan(
    current_role: &str,
    current_industry: &str,
    years_experience: u32,
) -> CareerPlan {
    let role_key = snake_case(current_role);
    let industry = Industry::from_key(&snake_case(current_industry)).unwrap_or(Industry::Default);
    let role = title_case(&role_key);
    let label = industry.label();

    let technical = generic_path(
        "Technical Growth Path",
        "Advancing as an individual contributor with increasing technical depth",
        &role_key,
        industry,
        vec![
            GenericStep {
                role: format!("Senior {role}"),
                duration: DurationRange::years(2.0, 3.0),
                description: "Advanced position with deeper expertise",
            },
            GenericStep {
                role: format!("Lead {role}"),
                duration: DurationRange::years(2.0, 3.0),
                description: "Leadership position guiding technical direction",
            },
        ],
    );
    let management = generic_path(
        "Leadership Path",
        "Transitioning into management roles with team leadership",
        &role_key,
        industry,
        vec![
            GenericStep {
                role: "Team Lead".to_string(),
                duration: DurationRange::years(2.0, 3.0),
                description: "Leadership position managing a small team",
            },
            GenericStep {
                role: "Department Manager".to_string(),
                duration: DurationRange::years(3.0, 4.0),
                description: "Management position overseeing department operations",
            },
        ],
    );

    let ladder = [
        ("technical_path", &technical, [(90000, 120000, 105000), (110000, 150000, 130000)]),
        ("management_path", &management, [(95000, 125000, 110000), (120000, 160000, 140000)]),
    ];
    let progression = ladder
        .iter()
        .flat_map(|(key, path, bands)| {
            path.upcoming().zip(bands.iter()).map(move |(step, &(min, max, median))| {
                SalaryProgressionEntry {
                    path: key.to_string(),
                    role: step.role.clone(),
                    timeline: step.timeline.clone(),
                    salary_range: (min, max),
                    median_salary: median,
                    industry: label.to_string(),
                }
            })
        })
        .collect();

    let mut skill_gaps = vec![
        gap(format!("{role} Advanced Techniques"), Importance::Important),
        gap("Communication Skills".to_string(), Importance::Essential),
        gap("Project Management".to_string(), Importance::Important),
    ];
    skill_gaps.sort_by_key(|g| g.importance.rank());

    let mut skills_for_next_roles = BTreeMap::new();
    skills_for_next_roles.insert(
        format!("Senior {role}"),
        vec![
            needed("Advanced Technical Skills", Importance::Essential, Difficulty::High),
            needed("Mentoring", Importance::Important, Difficulty::Medium),
            needed("Project Leadership", Importance::Important, Difficulty::Medium),
        ],
    );
    skills_for_next_roles.insert(
        "Team Lead".to_string(),
        vec![
            needed("Team Management", Importance::Essential, Difficulty::High),
            needed("Strategic Planning", Importance::Important, Difficulty::High),
            needed("Performance Management", Importance::Important, Difficulty::Medium),
        ],
    );

    let professional_cert = format!("{label} Professional Certification");

    let mut plan = CareerPlan {
        current_position: CurrentPosition {
            role: current_role.to_string(),
            normalized_role: role_key.clone(),
            industry: current_industry.to_string(),
            normalized_industry: industry,
            years_experience,
            career_stage: CareerStage::from_years(years_experience),
        },
        career_paths: CareerPaths::Growth(GrowthPaths {
            technical_path: technical.clone(),
            management_path: management.clone(),
            specialized_path: None,
        }),
        skill_analysis: SkillAnalysis {
            role: role.clone(),
            industry: label.to_string(),
            required_skills: Vec::new(),
            skill_gaps,
            match_percentage: 70.0,
            essential_match_percentage: 75.0,
            skills_for_next_roles,
        },
        certification_recommendations: CertificationRecommendations {
            high_value: vec![certification(
                professional_cert.clone(),
                CertificationValue::High,
                "medium",
                "3-6 months",
            )],
            medium_value: vec![
                certification(
                    "Project Management Certification".to_string(),
                    CertificationValue::Medium,
                    "medium",
                    "2-4 months",
                ),
                certification(
                    "Leadership Training".to_string(),
                    CertificationValue::Medium,
                    "medium",
                    "1-3 months",
                ),
            ],
            optional: vec![certification(
                "Communication Skills Workshop".to_string(),
                CertificationValue::Low,
                "low",
                "2-4 weeks",
            )],
        },
        learning_resources: LearningResources::grouped([
            LearningResource {
                provider: Some("Online platforms".to_string()),
                ..resource("course", format!("Advanced {role} Techniques"), "medium", "2-3 months")
            },
            LearningResource {
                author: Some("Industry Expert".to_string()),
                ..resource("book", format!("Mastering {role}"), "low", "1-2 months")
            },
            LearningResource {
                provider: Some("Industry Association".to_string()),
                ..resource("certification", professional_cert, "high", "3-6 months")
            },
            resource("platform", "LinkedIn Learning".to_string(), "medium", "ongoing"),
        ]),
        salary_progression: SalaryProgression {
            current: CurrentSalary {
                role: role.clone(),
                salary_range: (70000, 90000),
                median_salary: 80000,
            },
            progression,
        },
        industry_transition: None,
        summary: String::new(),
    };
    plan.summary = render_summary(&plan);
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_plan_is_complete() {
        let plan = fallback_plan("Chief Wizard", "Magic", 3);
        assert_eq!(plan.current_position.normalized_role, "chief_wizard");
        assert_eq!(plan.current_position.normalized_industry, Industry::Default);
        assert_eq!(plan.current_position.career_stage, CareerStage::Mid);

        let named = plan.career_paths.named();
        assert_eq!(named.len(), 2);
        for (_, path) in named {
            assert_eq!(path.steps.len(), 3);
            assert!(path.steps[0].is_current);
        }

        assert_eq!(plan.skill_analysis.skill_gaps[0].name, "Communication Skills");
        assert_eq!(plan.salary_progression.progression.len(), 4);
        assert_eq!(plan.learning_resources.total(), 4);
    }

    #[test]
    fn test_fallback_summary_structure() {
        let plan = fallback_plan("Analyst", "finance", 0);
        assert!(plan.summary.starts_with("Career path plan for a Analyst in the Finance industry"));
        assert!(plan.summary.contains("Two potential career paths:"));
        assert!(plan.summary.contains("Your skills are 70.0% aligned"));
        assert!(plan.summary.contains("from 80,000 to 140,000 (75.0% increase)"));
        assert!(plan.summary.contains("Department Manager position"));
    }
}
