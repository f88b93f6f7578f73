//! Path generation: builds ordered role-transition sequences over one
//! industry's reference graph.
//!
//! Untargeted planning walks three growth directions in parallel. Targeted
//! planning bridges industries when needed, then runs a breadth-first search
//! to the requested role and adds one or two alternate branches.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::models::plan::{CareerPath, GrowthPaths, PathStep, TargetedPaths};
use crate::planner::{PlanError, PlannerSettings};
use crate::reference::duration::{format_years, DurationRange};
use crate::reference::industry::{snake_case, title_case, Industry};
use crate::reference::tables::RoleRecord;
use crate::reference::{ReferenceData, DEFAULT_KEY};

/// Upper bound on hops in one direction, for tables with very short durations.
const MAX_HOPS: usize = 32;
/// Remaining timeframe (years) above which a short targeted path gets one more step.
const EXTENSION_THRESHOLD_YEARS: f64 = 5.0;
const STAY_PATH_STEPS: usize = 2;

pub fn timeline_label(years: f64) -> String {
    format!("In {}", format_years(years))
}

fn is_management(key: &str) -> bool {
    key.contains("manager") || key.contains("director")
}

fn is_leadership(key: &str) -> bool {
    is_management(key) || key.contains("lead")
}

fn is_specialist(key: &str) -> bool {
    key.contains("architect") || key.contains("specialist") || key.contains("expert")
}

// ────────────────────────────────────────────────────────────────────────────
// Growth directions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Technical,
    Management,
    Specialized,
}

impl Direction {
    /// Next role to take from `next_roles`, or `None` at a dead end.
    ///
    /// Management takes the first role when no leadership role is on offer and
    /// keeps looking on the following hop.
    pub fn pick(self, next_roles: &[String]) -> Option<&str> {
        let first = next_roles.first()?;
        let preferred = match self {
            Direction::Technical => next_roles.iter().find(|r| !is_management(r)),
            Direction::Management => next_roles.iter().find(|r| is_leadership(r)),
            Direction::Specialized => next_roles
                .iter()
                .find(|r| is_specialist(r))
                .or_else(|| next_roles.iter().find(|r| !is_management(r))),
        };
        Some(preferred.unwrap_or(first).as_str())
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Technical => "Technical Growth Path",
            Direction::Management => "Leadership Path",
            Direction::Specialized => "Specialized Expertise Path",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Direction::Technical => {
                "Advancing as an individual contributor with increasing technical depth and expertise"
            }
            Direction::Management => {
                "Transitioning into management roles with team and organizational leadership"
            }
            Direction::Specialized => {
                "Developing deep specialization in a specific domain or technology area"
            }
        }
    }

    /// Generic follow-on used when no edge fits in the timeframe.
    fn synthesized(self, role_key: &str) -> (String, DurationRange, &'static str) {
        let role = title_case(role_key);
        match self {
            Direction::Technical => (
                format!("Senior {role}"),
                DurationRange::years(2.0, 4.0),
                "Advanced technical position with deeper expertise and more responsibility",
            ),
            Direction::Management => (
                "Team Lead".to_string(),
                DurationRange::years(2.0, 4.0),
                "Leadership position overseeing a small team and projects",
            ),
            Direction::Specialized => (
                format!("{role} Specialist"),
                DurationRange::years(2.0, 3.0),
                "Domain expert position with specialized knowledge and skills",
            ),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generator
// ────────────────────────────────────────────────────────────────────────────

pub struct PathGenerator<'a> {
    data: &'a ReferenceData,
    settings: &'a PlannerSettings,
}

impl<'a> PathGenerator<'a> {
    pub fn new(data: &'a ReferenceData, settings: &'a PlannerSettings) -> Self {
        Self { data, settings }
    }

    fn hop_years(&self, duration: &DurationRange) -> f64 {
        duration.blended_years(self.settings.duration_blend)
    }

    fn step(
        &self,
        role_key: &str,
        record: &RoleRecord,
        elapsed: f64,
        hop: &DurationRange,
        industry: Industry,
    ) -> PathStep {
        PathStep {
            role: title_case(role_key),
            role_key: role_key.to_string(),
            timeline: timeline_label(elapsed),
            description: record.description.clone(),
            is_current: false,
            duration: Some(hop.to_string()),
            industry: industry.label().to_string(),
            is_transition: false,
        }
    }

    /// Technical, management and specialized paths from the current role.
    pub fn generate_multiple_paths(
        &self,
        role_key: &str,
        industry: Industry,
        timeframe_years: f64,
    ) -> Result<GrowthPaths, PlanError> {
        Ok(GrowthPaths {
            technical_path: self.grow(Direction::Technical, role_key, industry, timeframe_years)?,
            management_path: self.grow(Direction::Management, role_key, industry, timeframe_years)?,
            specialized_path: Some(self.grow(
                Direction::Specialized,
                role_key,
                industry,
                timeframe_years,
            )?),
        })
    }

    fn grow(
        &self,
        direction: Direction,
        role_key: &str,
        industry: Industry,
        timeframe_years: f64,
    ) -> Result<CareerPath, PlanError> {
        let mut record = self.data.role(industry, role_key)?;
        let mut steps = vec![PathStep::current(role_key, record.description.clone(), industry)];
        let mut elapsed = 0.0;

        while elapsed < timeframe_years && steps.len() <= MAX_HOPS {
            let Some(next_key) = direction.pick(&record.next_roles) else {
                break;
            };
            let hop = record.typical_duration;
            elapsed += self.hop_years(&hop);
            if elapsed > timeframe_years {
                break;
            }

            let next = self.data.role(industry, next_key)?;
            steps.push(self.step(next_key, next, elapsed, &hop, industry));
            record = next;
        }

        if steps.len() < 2 {
            let (role, duration, description) = direction.synthesized(role_key);
            debug!("{:?} path from '{role_key}' is empty, adding '{role}'", direction);
            steps.push(PathStep {
                role_key: snake_case(&role),
                role,
                timeline: timeline_label(self.hop_years(&duration)),
                description: description.to_string(),
                is_current: false,
                duration: Some(duration.to_string()),
                industry: industry.label().to_string(),
                is_transition: false,
            });
        }

        Ok(CareerPath {
            name: direction.name().to_string(),
            description: direction.description().to_string(),
            steps,
        })
    }

    // ────────────────────────────────────────────────────────────────────────
    // Targeted planning
    // ────────────────────────────────────────────────────────────────────────

    /// Shortest role sequence from `start` to `target` (excluding `start`).
    /// Empty when they are equal or the target is unreachable.
    pub fn find_path_to_role(
        &self,
        industry: Industry,
        start: &str,
        target: &str,
    ) -> Result<Vec<String>, PlanError> {
        if start == target {
            return Ok(Vec::new());
        }

        let mut queue = VecDeque::from([start.to_string()]);
        let mut visited: HashSet<String> = HashSet::from([start.to_string()]);
        let mut parents: HashMap<String, String> = HashMap::new();

        while let Some(node) = queue.pop_front() {
            let record = self.data.role(industry, &node)?;
            for next in &record.next_roles {
                if next == target {
                    let mut route = vec![target.to_string()];
                    let mut cursor = node.as_str();
                    while cursor != start {
                        route.push(cursor.to_string());
                        cursor = parents.get(cursor).map(String::as_str).unwrap_or(start);
                    }
                    route.reverse();
                    return Ok(route);
                }
                if visited.insert(next.clone()) {
                    parents.insert(next.clone(), node.clone());
                    queue.push_back(next.clone());
                }
            }
        }

        Ok(Vec::new())
    }

    /// Maps a free-form role name onto a record of `industry`: exact key,
    /// then a key containing it or contained in it, else `default`.
    pub fn closest_role(&self, industry: Industry, role: &str) -> Result<String, PlanError> {
        let key = snake_case(role);
        let table = self.data.roles_table(industry)?;

        if table.roles.iter().any(|r| r.key == key) {
            return Ok(key);
        }
        let similar = table.roles.iter().find(|r| {
            r.key != DEFAULT_KEY && (r.key.contains(key.as_str()) || key.contains(r.key.as_str()))
        });
        Ok(similar.map_or_else(|| DEFAULT_KEY.to_string(), |r| r.key.clone()))
    }

    pub fn generate_targeted_path(
        &self,
        current_role: &str,
        current_industry: Industry,
        target_role: &str,
        target_industry: Industry,
        years_experience: f64,
        timeframe_years: f64,
    ) -> Result<TargetedPaths, PlanError> {
        let same_industry = current_industry == target_industry;
        let origin = self.data.role(current_industry, current_role)?;
        let target = self.data.role(target_industry, target_role)?;
        let target_label = target_industry.label().to_string();

        let mut primary = vec![PathStep::current(
            current_role,
            origin.description.clone(),
            current_industry,
        )];
        let mut from_role = current_role.to_string();
        let mut elapsed = 0.0;
        let mut years = years_experience;
        let mut remaining = timeframe_years;

        if !same_industry {
            let bridge = self
                .data
                .transition(current_industry, target_industry)
                .and_then(|t| t.transition_roles.first().map(|role| (t, role)));

            match bridge {
                Some((transition, bridge_role)) => {
                    let cost = self.hop_years(&transition.time_investment);
                    let bridge_key = snake_case(bridge_role);
                    primary.push(PathStep {
                        role: title_case(&bridge_key),
                        role_key: bridge_key.clone(),
                        timeline: timeline_label(cost),
                        description: format!(
                            "Transition role to bridge {} and {}",
                            current_industry.label(),
                            target_industry.label()
                        ),
                        is_current: false,
                        duration: Some(transition.time_investment.to_string()),
                        industry: target_label.clone(),
                        is_transition: true,
                    });

                    elapsed = cost;
                    years = (years - cost).max(0.0);
                    remaining -= cost;
                    from_role = self.closest_role(target_industry, &bridge_key)?;
                    debug!("Bridge '{bridge_key}' continues as '{from_role}' in {target_industry}");
                }
                None => {
                    from_role = self.closest_role(target_industry, current_role)?;
                }
            }
        }

        let in_place = from_role == target_role;
        let mut first_hop = None;

        if in_place {
            let advanced = DurationRange::years(1.0, 2.0);
            elapsed += self.hop_years(&advanced);
            primary.push(PathStep {
                role: format!("{} (Advanced)", title_case(target_role)),
                role_key: target_role.to_string(),
                timeline: timeline_label(elapsed),
                description: "Developing advanced skills and expertise in your current role"
                    .to_string(),
                is_current: false,
                duration: Some(advanced.to_string()),
                industry: target_label.clone(),
                is_transition: false,
            });
        } else {
            let route = self.find_path_to_role(target_industry, &from_role, target_role)?;
            if route.is_empty() {
                let needed = (f64::from(target.required_experience) - years).max(0.0);
                elapsed += needed + 1.0;
                debug!("'{target_role}' unreachable from '{from_role}', appending directly");
                primary.push(PathStep {
                    role: title_case(target_role),
                    role_key: target_role.to_string(),
                    timeline: timeline_label(elapsed),
                    description: target.description.clone(),
                    is_current: false,
                    duration: Some(DurationRange::years(needed, needed + 2.0).to_string()),
                    industry: target_label.clone(),
                    is_transition: false,
                });
            } else {
                let mut record = self.data.role(target_industry, &from_role)?;
                for key in &route {
                    let hop = record.typical_duration;
                    elapsed += self.hop_years(&hop);
                    let next = self.data.role(target_industry, key)?;
                    primary.push(self.step(key, next, elapsed, &hop, target_industry));
                    record = next;
                }
                first_hop = route.into_iter().next();
            }
        }

        if primary.len() <= 2 && remaining > EXTENSION_THRESHOLD_YEARS && !in_place {
            if let Some(next_key) = target.next_roles.first() {
                let hop = target.typical_duration;
                elapsed += self.hop_years(&hop);
                let next = self.data.role(target_industry, next_key)?;
                primary.push(self.step(next_key, next, elapsed, &hop, target_industry));
            }
        }

        let mut alternate_paths = Vec::new();
        if same_industry && !in_place {
            if let Some(path) =
                self.sibling_path(current_role, current_industry, target_role, first_hop.as_deref())?
            {
                alternate_paths.push(path);
            }
        }
        if !same_industry {
            let stay = self.stay_path(current_role, current_industry)?;
            if stay.steps.len() >= 2 {
                alternate_paths.push(stay);
            }
        }

        let target_name = title_case(target_role);
        let mut description = format!("Direct career progression to reach {target_name} position");
        if !same_industry {
            description.push_str(&format!(" in {target_label} industry"));
        }

        Ok(TargetedPaths {
            primary_path: CareerPath {
                name: format!("Path to {target_name}"),
                description,
                steps: primary,
            },
            alternate_paths,
        })
    }

    /// Same-industry branch through the current role's next-best option.
    fn sibling_path(
        &self,
        current_role: &str,
        industry: Industry,
        target_role: &str,
        primary_first_hop: Option<&str>,
    ) -> Result<Option<CareerPath>, PlanError> {
        let origin = self.data.role(industry, current_role)?;
        let Some(alternate) = origin
            .next_roles
            .iter()
            .find(|r| Some(r.as_str()) != primary_first_hop)
        else {
            return Ok(None);
        };

        let mut steps = vec![PathStep::current(current_role, origin.description.clone(), industry)];
        let first = origin.typical_duration;
        let mut elapsed = self.hop_years(&first);
        let alternate_record = self.data.role(industry, alternate)?;
        steps.push(self.step(alternate, alternate_record, elapsed, &first, industry));

        if let Some(next_key) = alternate_record.next_roles.first() {
            let second = alternate_record.typical_duration;
            elapsed += self.hop_years(&second);
            let next = self.data.role(industry, next_key)?;
            steps.push(self.step(next_key, next, elapsed, &second, industry));
        }

        Ok(Some(CareerPath {
            name: "Alternative Career Path".to_string(),
            description: format!(
                "Another direction focusing on {} instead of {}",
                title_case(alternate),
                title_case(target_role)
            ),
            steps,
        }))
    }

    /// Up to two further steps without leaving the current industry.
    fn stay_path(&self, current_role: &str, industry: Industry) -> Result<CareerPath, PlanError> {
        let mut record = self.data.role(industry, current_role)?;
        let mut steps = vec![PathStep::current(current_role, record.description.clone(), industry)];
        let mut elapsed = 0.0;

        for _ in 0..STAY_PATH_STEPS {
            let Some(next_key) = record.next_roles.first() else {
                break;
            };
            let hop = record.typical_duration;
            elapsed += self.hop_years(&hop);
            let next = self.data.role(industry, next_key)?;
            steps.push(self.step(next_key, next, elapsed, &hop, industry));
            record = next;
        }

        Ok(CareerPath {
            name: format!("Stay in {} Path", industry.label()),
            description: format!("Continuing career progression within {} industry", industry.label()),
            steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (ReferenceData, PlannerSettings) {
        (ReferenceData::builtin().unwrap(), PlannerSettings::default())
    }

    fn roles(path: &CareerPath) -> Vec<&str> {
        path.steps.iter().map(|s| s.role_key.as_str()).collect()
    }

    fn assert_valid(path: &CareerPath) {
        assert!(path.steps.len() >= 2, "{} is too short", path.name);
        assert!(path.steps[0].is_current);
        assert_eq!(path.steps[0].timeline, "Current");
        assert_eq!(path.steps.iter().filter(|s| s.is_current).count(), 1);
    }

    #[test]
    fn test_direction_pick() {
        let next: Vec<String> = ["engineering_manager", "software_architect", "qa_lead"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(Direction::Technical.pick(&next), Some("software_architect"));
        assert_eq!(Direction::Management.pick(&next), Some("engineering_manager"));
        assert_eq!(Direction::Specialized.pick(&next), Some("software_architect"));
        assert_eq!(Direction::Technical.pick(&[]), None);

        let only_managers = vec!["engineering_manager".to_string()];
        assert_eq!(Direction::Technical.pick(&only_managers), Some("engineering_manager"));
    }

    #[test]
    fn test_growth_paths_from_junior_developer() {
        let (data, settings) = fixture();
        let generator = PathGenerator::new(&data, &settings);
        let paths = generator
            .generate_multiple_paths("junior_developer", Industry::Technology, 5.0)
            .unwrap();

        assert_eq!(
            roles(&paths.technical_path),
            ["junior_developer", "mid_level_developer", "senior_developer"]
        );
        assert_eq!(paths.technical_path.steps[1].role, "Mid Level Developer");
        assert_eq!(paths.technical_path.steps[1].timeline, "In 1 years, 6 months");
        assert_eq!(paths.technical_path.steps[2].timeline, "In 4 years");

        assert_eq!(
            roles(&paths.management_path),
            ["junior_developer", "mid_level_developer", "technical_lead"]
        );

        assert_valid(&paths.technical_path);
        assert_valid(&paths.management_path);
        assert_valid(paths.specialized_path.as_ref().unwrap());
    }

    #[test]
    fn test_short_timeframe_synthesizes_follow_on() {
        let (data, settings) = fixture();
        let generator = PathGenerator::new(&data, &settings);
        // Physician spends 5-7 years before any move, so nothing fits in one year.
        let paths = generator
            .generate_multiple_paths("physician", Industry::Healthcare, 1.0)
            .unwrap();

        assert_eq!(paths.technical_path.steps[1].role, "Senior Physician");
        assert_eq!(paths.technical_path.steps[1].timeline, "In 3 years");
        assert_eq!(paths.management_path.steps[1].role, "Team Lead");
        let specialized = paths.specialized_path.unwrap();
        assert_eq!(specialized.steps[1].role, "Physician Specialist");
        assert_eq!(specialized.steps[1].timeline, "In 2 years, 6 months");
    }

    #[test]
    fn test_growth_paths_respect_timeframe() {
        let (data, settings) = fixture();
        let generator = PathGenerator::new(&data, &settings);
        for timeframe in [1.0, 3.0, 5.0, 10.0, 20.0] {
            let paths = generator
                .generate_multiple_paths("default", Industry::Default, timeframe)
                .unwrap();
            for path in [&paths.technical_path, &paths.management_path] {
                assert_valid(path);
                assert!(path.steps.len() <= MAX_HOPS + 1);
            }
        }
    }

    #[test]
    fn test_bfs_returns_shortest_route() {
        let (data, settings) = fixture();
        let generator = PathGenerator::new(&data, &settings);
        // junior -> devops is a direct edge even though junior -> mid -> devops also exists.
        let route = generator
            .find_path_to_role(Industry::Technology, "junior_developer", "devops_engineer")
            .unwrap();
        assert_eq!(route, ["devops_engineer"]);

        let route = generator
            .find_path_to_role(Industry::Technology, "junior_developer", "software_architect")
            .unwrap();
        assert_eq!(route, ["mid_level_developer", "senior_developer", "software_architect"]);
    }

    #[test]
    fn test_bfs_terminates_on_cycles() {
        let (data, settings) = fixture();
        let generator = PathGenerator::new(&data, &settings);
        // The default sink points at keys that resolve back to itself.
        let route = generator
            .find_path_to_role(Industry::Technology, DEFAULT_KEY, "software_architect")
            .unwrap();
        assert!(route.is_empty());
    }

    #[test]
    fn test_targeted_same_role_is_two_steps() {
        let (data, settings) = fixture();
        let generator = PathGenerator::new(&data, &settings);
        let paths = generator
            .generate_targeted_path(
                "senior_developer",
                Industry::Technology,
                "senior_developer",
                Industry::Technology,
                6.0,
                10.0,
            )
            .unwrap();
        assert_eq!(paths.primary_path.steps.len(), 2);
        assert_eq!(paths.primary_path.steps[1].role, "Senior Developer (Advanced)");
        assert!(paths.alternate_paths.is_empty());
    }

    #[test]
    fn test_targeted_same_industry_step_count_matches_bfs() {
        let (data, settings) = fixture();
        let generator = PathGenerator::new(&data, &settings);
        let paths = generator
            .generate_targeted_path(
                "junior_developer",
                Industry::Technology,
                "software_architect",
                Industry::Technology,
                1.0,
                5.0,
            )
            .unwrap();

        assert_eq!(paths.primary_path.upcoming().count(), 3);
        assert_eq!(paths.primary_path.name, "Path to Software Architect");
        assert_valid(&paths.primary_path);

        // Sibling branch avoids the primary path's first hop.
        assert_eq!(paths.alternate_paths.len(), 1);
        let alternate = &paths.alternate_paths[0];
        assert_eq!(alternate.steps[1].role_key, "quality_assurance_engineer");
        assert_eq!(alternate.steps.len(), 3);
    }

    #[test]
    fn test_short_targeted_path_extends_when_time_remains() {
        let (data, settings) = fixture();
        let generator = PathGenerator::new(&data, &settings);
        let paths = generator
            .generate_targeted_path(
                "junior_developer",
                Industry::Technology,
                "mid_level_developer",
                Industry::Technology,
                0.0,
                10.0,
            )
            .unwrap();
        assert_eq!(
            roles(&paths.primary_path),
            ["junior_developer", "mid_level_developer", "senior_developer"]
        );
    }

    #[test]
    fn test_cross_industry_unreachable_target() {
        let (data, settings) = fixture();
        let generator = PathGenerator::new(&data, &settings);
        let paths = generator
            .generate_targeted_path(
                "registered_nurse",
                Industry::Healthcare,
                "software_architect",
                Industry::Technology,
                0.0,
                5.0,
            )
            .unwrap();

        let steps = &paths.primary_path.steps;
        assert_eq!(steps[0].industry, "Healthcare");
        assert!(steps[1].is_transition);
        assert_eq!(steps[1].role, "Health Informatics");
        assert_eq!(steps[1].timeline, "In 1 years, 6 months");

        let last = steps.last().unwrap();
        assert_eq!(last.role, "Software Architect");
        assert_eq!(last.industry, "Technology");
        assert_eq!(last.duration.as_deref(), Some("10-12 years"));
        assert_eq!(last.timeline, "In 12 years, 6 months");

        assert_eq!(paths.alternate_paths.len(), 1);
        let stay = &paths.alternate_paths[0];
        assert_eq!(stay.name, "Stay in Healthcare Path");
        assert_eq!(
            roles(stay),
            ["registered_nurse", "nurse_practitioner", "clinical_director"]
        );
    }

    #[test]
    fn test_closest_role() {
        let (data, settings) = fixture();
        let generator = PathGenerator::new(&data, &settings);
        assert_eq!(
            generator.closest_role(Industry::Technology, "data analyst").unwrap(),
            DEFAULT_KEY
        );
        assert_eq!(
            generator.closest_role(Industry::Finance, "healthcare financial analyst").unwrap(),
            "financial_analyst"
        );
        assert_eq!(
            generator.closest_role(Industry::Technology, "product marketing manager").unwrap(),
            DEFAULT_KEY
        );
    }
}
