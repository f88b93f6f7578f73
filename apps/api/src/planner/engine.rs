//! `CareerEngine`, the in-process entry point.
//!
//! Owns the shared reference data and settings and wires the planner
//! components together. Cheap to clone and safe to share across tasks.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::models::development::SkillDevelopmentPlan;
use crate::models::insights::CareerInsights;
use crate::models::plan::{CareerPaths, CareerPlan, CurrentPosition};
use crate::planner::composer::{career_stage, render_summary};
use crate::planner::development::DevelopmentPlanner;
use crate::planner::fallback::fallback_plan;
use crate::planner::insights::project_insights;
use crate::planner::normalizer::Normalizer;
use crate::planner::path_generator::PathGenerator;
use crate::planner::recommender::Recommender;
use crate::planner::salary::SalaryEstimator;
use crate::planner::skill_gap::SkillGapAnalyzer;
use crate::planner::{PlanError, PlannerSettings};
use crate::reference::industry::Industry;
use crate::reference::{ReferenceData, ReferenceDataError};

pub const DEFAULT_INDUSTRY: &str = "technology";
pub const DEFAULT_SKILL_PLAN_MONTHS: u32 = 6;

fn default_industry() -> String {
    DEFAULT_INDUSTRY.to_string()
}

/// Inputs of `plan_career_path`. A non-empty `target_role` switches to
/// targeted planning; `target_industry` defaults to the current industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub current_role: String,
    #[serde(default = "default_industry")]
    pub current_industry: String,
    #[serde(default)]
    pub years_experience: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub target_industry: Option<String>,
    /// Falls back to `PlannerSettings::default_timeframe_years`.
    #[serde(default)]
    pub timeframe_years: Option<u32>,
}

impl PlanRequest {
    pub fn new(current_role: impl Into<String>, current_industry: impl Into<String>) -> Self {
        Self {
            current_role: current_role.into(),
            current_industry: current_industry.into(),
            years_experience: 0,
            skills: Vec::new(),
            target_role: None,
            target_industry: None,
            timeframe_years: None,
        }
    }

    fn target(&self) -> Option<&str> {
        self.target_role
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Clone)]
pub struct CareerEngine {
    data: Arc<ReferenceData>,
    settings: PlannerSettings,
}

impl CareerEngine {
    pub fn new(data: Arc<ReferenceData>, settings: PlannerSettings) -> Self {
        info!(
            "Career engine ready (duration blend {}, default seed {})",
            settings.duration_blend, settings.default_seed
        );
        Self { data, settings }
    }

    /// Engine over the embedded reference tables with default settings.
    pub fn builtin() -> Result<Self, ReferenceDataError> {
        Ok(Self::new(Arc::new(ReferenceData::builtin()?), PlannerSettings::default()))
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    pub fn normalize_industry(&self, raw: &str) -> Industry {
        Normalizer::new(&self.data).industry(raw)
    }

    pub fn normalize_role(&self, raw: &str, industry: Industry) -> String {
        Normalizer::new(&self.data).role(raw, industry)
    }

    /// Full plan for the request. Never fails: internal errors degrade to a
    /// generic fallback plan.
    pub fn plan_career_path(&self, request: &PlanRequest) -> CareerPlan {
        info!(
            "Planning career path for '{}' in '{}' ({} years, target {:?})",
            request.current_role,
            request.current_industry,
            request.years_experience,
            request.target()
        );

        match self.try_plan(request) {
            Ok(plan) => plan,
            Err(e) => {
                error!("Career plan composition failed, using fallback: {e}");
                fallback_plan(
                    &request.current_role,
                    &request.current_industry,
                    request.years_experience,
                )
            }
        }
    }

    fn try_plan(&self, request: &PlanRequest) -> Result<CareerPlan, PlanError> {
        let normalizer = Normalizer::new(&self.data);
        let industry = normalizer.industry(&request.current_industry);
        let role_key = normalizer.role(&request.current_role, industry);
        let years = request.years_experience;
        let timeframe = f64::from(
            request
                .timeframe_years
                .unwrap_or(self.settings.default_timeframe_years),
        );
        debug!("Normalized to '{role_key}' in {industry}");

        let generator = PathGenerator::new(&self.data, &self.settings);
        let mut industry_transition = None;
        let career_paths = match request.target() {
            Some(target) => {
                let target_industry = request
                    .target_industry
                    .as_deref()
                    .map(|raw| normalizer.industry(raw))
                    .unwrap_or(industry);
                let target_key = normalizer.role(target, target_industry);
                if target_industry != industry {
                    industry_transition = self.data.transition(industry, target_industry).cloned();
                }
                CareerPaths::Targeted(generator.generate_targeted_path(
                    &role_key,
                    industry,
                    &target_key,
                    target_industry,
                    f64::from(years),
                    timeframe,
                )?)
            }
            None => {
                CareerPaths::Growth(generator.generate_multiple_paths(&role_key, industry, timeframe)?)
            }
        };

        let skill_analysis =
            SkillGapAnalyzer::new(&self.data).analyze_skills(&role_key, industry, &request.skills)?;
        let recommender = Recommender::new(&self.data);
        let certification_recommendations =
            recommender.recommend_certifications(&role_key, industry)?;
        let learning_resources =
            recommender.recommend_learning_resources(industry, &skill_analysis.skill_gaps);
        let salary_progression = SalaryEstimator::new(&self.data, &self.settings)
            .get_salary_progression(&role_key, industry, years, &career_paths)?;

        let mut plan = CareerPlan {
            current_position: CurrentPosition {
                role: request.current_role.clone(),
                career_stage: career_stage(&role_key, years),
                normalized_role: role_key,
                industry: request.current_industry.clone(),
                normalized_industry: industry,
                years_experience: years,
            },
            career_paths,
            skill_analysis,
            certification_recommendations,
            learning_resources,
            salary_progression,
            industry_transition,
            summary: String::new(),
        };
        plan.summary = render_summary(&plan);
        Ok(plan)
    }

    /// Development plan seeded with the configured default seed.
    pub fn generate_skill_development_plan(
        &self,
        skills_to_develop: &[String],
        timeframe_months: u32,
    ) -> SkillDevelopmentPlan {
        self.generate_skill_development_plan_with_seed(
            skills_to_develop,
            timeframe_months,
            self.settings.default_seed,
        )
    }

    pub fn generate_skill_development_plan_with_seed(
        &self,
        skills_to_develop: &[String],
        timeframe_months: u32,
        seed: u64,
    ) -> SkillDevelopmentPlan {
        info!(
            "Generating development plan for {} skills over {timeframe_months} months",
            skills_to_develop.len()
        );
        DevelopmentPlanner::new(&self.data, &self.settings).generate_skill_development_plan(
            skills_to_develop,
            timeframe_months,
            seed,
        )
    }

    /// Entry-level untargeted plan projected down to one role's insights.
    pub fn get_career_insights(&self, job_title: &str, industry: &str) -> CareerInsights {
        let request = PlanRequest::new(job_title, industry);
        let plan = self.plan_career_path(&request);
        project_insights(job_title, industry, &plan)
    }
}
