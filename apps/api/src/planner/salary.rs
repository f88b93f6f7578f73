//! Salary Progression Estimator.
//!
//! Resolves the caller's current band inside the industry's most relevant
//! salary ladder, then attaches an estimate to every upcoming path step:
//! a looked-up band when one matches the step's role, otherwise a flat
//! per-step extrapolation from the current band.

use tracing::debug;

use crate::models::plan::{CareerPaths, CurrentSalary, SalaryProgression, SalaryProgressionEntry};
use crate::planner::{PlanError, PlannerSettings};
use crate::reference::industry::{title_case, Industry};
use crate::reference::tables::{SalaryBand, SalaryPath};
use crate::reference::ReferenceData;

pub struct SalaryEstimator<'a> {
    data: &'a ReferenceData,
    settings: &'a PlannerSettings,
}

fn band_matches(band: &SalaryBand, role_key: &str) -> bool {
    band.role == role_key || band.role.contains(role_key) || role_key.contains(band.role.as_str())
}

fn find_band<'p>(
    paths: impl IntoIterator<Item = &'p SalaryPath>,
    role_key: &str,
) -> Option<&'p SalaryBand> {
    paths
        .into_iter()
        .flat_map(|p| &p.bands)
        .find(|b| band_matches(b, role_key))
}

/// Index into a ladder sorted by minimum salary implied by experience.
fn experience_bucket(years_experience: u32) -> usize {
    match years_experience {
        0..=1 => 0,
        2..=4 => 1,
        5..=9 => 2,
        _ => 3,
    }
}

impl<'a> SalaryEstimator<'a> {
    pub fn new(data: &'a ReferenceData, settings: &'a PlannerSettings) -> Self {
        Self { data, settings }
    }

    /// Ladder whose keywords occur in the role key, else the industry's first.
    pub fn relevant_path(
        &self,
        role_key: &str,
        industry: Industry,
    ) -> Result<&'a SalaryPath, PlanError> {
        let paths = self.data.salary_paths(industry)?;
        paths
            .iter()
            .find(|p| p.keywords.iter().any(|k| role_key.contains(k.as_str())))
            .or_else(|| paths.first())
            .ok_or(PlanError::NoSalaryBand(industry))
    }

    /// Exact band for the role, else the band implied by experience.
    pub fn current_band(
        &self,
        path: &'a SalaryPath,
        role_key: &str,
        years_experience: u32,
    ) -> Option<&'a SalaryBand> {
        if let Some(band) = path.bands.iter().find(|b| b.role == role_key) {
            return Some(band);
        }
        let mut by_min: Vec<&SalaryBand> = path.bands.iter().collect();
        by_min.sort_by_key(|b| b.range.0);
        let index = experience_bucket(years_experience).min(by_min.len().saturating_sub(1));
        by_min.get(index).copied()
    }

    pub fn get_salary_progression(
        &self,
        role_key: &str,
        industry: Industry,
        years_experience: u32,
        career_paths: &CareerPaths,
    ) -> Result<SalaryProgression, PlanError> {
        let ladder = self.relevant_path(role_key, industry)?;
        let current = self
            .current_band(ladder, role_key, years_experience)
            .ok_or(PlanError::NoSalaryBand(industry))?;
        let all_paths = self.data.salary_paths(industry)?;

        let mut progression = Vec::new();
        for (path_key, path) in career_paths.named() {
            for (index, step) in path.upcoming().enumerate() {
                let step_industry = Industry::from_label(&step.industry).unwrap_or(industry);

                let found = if step_industry != industry {
                    find_band(self.data.salary_paths(step_industry)?, &step.role_key)
                } else {
                    find_band([ladder], &step.role_key).or_else(|| {
                        find_band(
                            all_paths.iter().filter(|p| p.name != ladder.name),
                            &step.role_key,
                        )
                    })
                };

                let (salary_range, median_salary) = match found {
                    Some(band) => (band.range, band.median),
                    None => {
                        let bump = 1.0 + self.settings.salary_step_bump * (index + 1) as f64;
                        debug!("No salary band for '{}', extrapolating x{bump:.2}", step.role_key);
                        (
                            (scale(current.range.0, bump), scale(current.range.1, bump)),
                            scale(current.median, bump),
                        )
                    }
                };

                progression.push(SalaryProgressionEntry {
                    path: path_key.clone(),
                    role: step.role.clone(),
                    timeline: step.timeline.clone(),
                    salary_range,
                    median_salary,
                    industry: step.industry.clone(),
                });
            }
        }

        Ok(SalaryProgression {
            current: CurrentSalary {
                role: title_case(&current.role),
                salary_range: current.range,
                median_salary: current.median,
            },
            progression,
        })
    }
}

fn scale(amount: u32, factor: f64) -> u32 {
    (f64::from(amount) * factor).round() as u32
}
