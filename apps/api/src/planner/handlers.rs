//! Axum route handlers for the Career API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::development::SkillDevelopmentPlan;
use crate::models::insights::CareerInsights;
use crate::models::plan::CareerPlan;
use crate::planner::engine::{PlanRequest, DEFAULT_INDUSTRY, DEFAULT_SKILL_PLAN_MONTHS};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

fn default_skill_plan_months() -> u32 {
    DEFAULT_SKILL_PLAN_MONTHS
}

fn default_industry() -> String {
    DEFAULT_INDUSTRY.to_string()
}

#[derive(Debug, Deserialize)]
pub struct SkillPlanRequest {
    pub skills: Vec<String>,
    #[serde(default = "default_skill_plan_months")]
    pub timeframe_months: u32,
    /// Overrides the configured schedule seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct InsightsQuery {
    pub job_title: String,
    #[serde(default = "default_industry")]
    pub industry: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// Runs CPU-bound planning off the async executor. A panicking task surfaces
/// as `AppError::Internal`.
async fn run_blocking<T, F>(task: &'static str, work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in {task}: {e}")))
}

/// POST /api/v1/career/plan
///
/// Untargeted growth paths, or a targeted route when `target_role` is set.
pub async fn handle_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<CareerPlan>, AppError> {
    if request.current_role.trim().is_empty() {
        return Err(AppError::Validation("current_role cannot be empty".to_string()));
    }
    if request.timeframe_years == Some(0) {
        return Err(AppError::Validation("timeframe_years must be at least 1".to_string()));
    }

    let engine = state.engine.clone();
    let plan = run_blocking("career plan", move || engine.plan_career_path(&request)).await?;
    Ok(Json(plan))
}

/// POST /api/v1/career/skill-plan
pub async fn handle_skill_plan(
    State(state): State<AppState>,
    Json(request): Json<SkillPlanRequest>,
) -> Result<Json<SkillDevelopmentPlan>, AppError> {
    if request.skills.iter().all(|s| s.trim().is_empty()) {
        return Err(AppError::Validation("skills cannot be empty".to_string()));
    }
    if request.timeframe_months == 0 {
        return Err(AppError::Validation("timeframe_months must be at least 1".to_string()));
    }

    let engine = state.engine.clone();
    let seed = request.seed.unwrap_or(engine.settings().default_seed);
    let plan = run_blocking("skill plan", move || {
        engine.generate_skill_development_plan_with_seed(
            &request.skills,
            request.timeframe_months,
            seed,
        )
    })
    .await?;
    Ok(Json(plan))
}

/// GET /api/v1/career/insights?job_title=...&industry=...
pub async fn handle_insights(
    State(state): State<AppState>,
    Query(query): Query<InsightsQuery>,
) -> Result<Json<CareerInsights>, AppError> {
    if query.job_title.trim().is_empty() {
        return Err(AppError::Validation("job_title cannot be empty".to_string()));
    }

    let engine = state.engine.clone();
    let insights = run_blocking("career insights", move || {
        engine.get_career_insights(&query.job_title, &query.industry)
    })
    .await?;
    Ok(Json(insights))
}
