//! Career insights: a read-only projection of an untargeted plan.

use crate::models::insights::{
    CareerInsights, InsightResources, PathOutline, RoleInfo, SalaryOutlook, StepOutline,
};
use crate::models::plan::CareerPlan;

const GROWTH_PREVIEW: usize = 2;
const NO_DESCRIPTION: &str = "Role information not available";

pub fn project_insights(job_title: &str, industry: &str, plan: &CareerPlan) -> CareerInsights {
    let named = plan.career_paths.named();

    let description = named
        .iter()
        .find_map(|(_, path)| path.steps.first())
        .map(|step| step.description.clone())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let career_paths = named
        .iter()
        .map(|(key, path)| PathOutline {
            key: key.clone(),
            name: path.name.clone(),
            description: path.description.clone(),
            steps: path
                .upcoming()
                .map(|step| StepOutline {
                    role: step.role.clone(),
                    timeline: step.timeline.clone(),
                })
                .collect(),
        })
        .collect();

    let salary = &plan.salary_progression;

    CareerInsights {
        role_info: RoleInfo {
            title: job_title.to_string(),
            industry: industry.to_string(),
            normalized_role: plan.current_position.normalized_role.clone(),
            description,
        },
        career_paths,
        skill_requirements: plan.skill_analysis.required_skills.clone(),
        certification_recommendations: plan.certification_recommendations.high_value.clone(),
        learning_resources: InsightResources {
            courses: plan.learning_resources.courses.clone(),
            books: plan.learning_resources.books.clone(),
        },
        salary_data: SalaryOutlook {
            current: salary.current.clone(),
            potential_growth: salary.progression.iter().take(GROWTH_PREVIEW).cloned().collect(),
        },
    }
}
