//! Career Path Planning Engine.
//!
//! Normalizes free-text input, generates role-transition paths over the
//! reference graph, and composes skill, certification, learning and salary
//! analyses into one `CareerPlan`. All operations are pure functions of their
//! inputs plus the immutable `ReferenceData`.

pub mod composer;
pub mod development;
pub mod engine;
pub mod fallback;
pub mod handlers;
pub mod insights;
pub mod normalizer;
pub mod path_generator;
pub mod recommender;
pub mod salary;
pub mod skill_gap;

use thiserror::Error;

use crate::reference::industry::Industry;
use crate::reference::ReferenceDataError;

pub use engine::{CareerEngine, PlanRequest};

/// Seed used for schedule activities and tip sampling when none is supplied.
pub const DEFAULT_SCHEDULE_SEED: u64 = 42;

/// Engine tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerSettings {
    /// Position inside a duration range used to time a hop: 0.0 = min, 1.0 = max.
    pub duration_blend: f64,
    /// Flat per-step increase applied when no salary data exists for a step.
    pub salary_step_bump: f64,
    /// Weekly study hours above which a development plan is unrealistic.
    pub max_weekly_hours: f64,
    pub weeks_per_month: f64,
    /// Planning horizon used when a request names none.
    pub default_timeframe_years: u32,
    pub default_seed: u64,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            duration_blend: 0.5,
            salary_step_bump: 0.15,
            max_weekly_hours: 20.0,
            weeks_per_month: 4.3,
            default_timeframe_years: 5,
            default_seed: DEFAULT_SCHEDULE_SEED,
        }
    }
}

/// Internal failures. Never escapes `plan_career_path`, which degrades to the
/// fallback plan instead.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("reference data lookup failed: {0}")]
    Reference(#[from] ReferenceDataError),

    #[error("no salary band available for '{0}'")]
    NoSalaryBand(Industry),
}
