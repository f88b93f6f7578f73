//! Skill Development Planner.
//!
//! Turns a list of skills and a timeframe into per-skill effort estimates,
//! resource picks, milestones, a realism check and a sample four-week study
//! schedule. Activity text and tip sampling draw from a seeded `StdRng`, so a
//! given seed always reproduces the same plan.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::SeedableRng;
use regex::Regex;
use tracing::debug;

use crate::models::development::{
    Milestone, SkillDevelopmentPlan, SkillPlan, StudySession, WeekSchedule,
};
use crate::planner::PlannerSettings;
use crate::reference::industry::Industry;
use crate::reference::tables::{Difficulty, LearningResource};
use crate::reference::{ReferenceData, LEADERSHIP_CATEGORY};

const MAX_RESOURCES_PER_SKILL: usize = 5;
const FALLBACK_RESOURCES: usize = 3;
const HOURS_PER_STUDY_MONTH: f64 = 40.0;
const SCHEDULE_WEEKS: u32 = 4;
const REDUCED_WEEKLY_HOURS: u32 = 10;
const WEEKEND_DAY_HOURS: u32 = 4;
const WEEKDAY_HOURS: u32 = 2;
const MAX_TIPS: usize = 10;

const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

// ────────────────────────────────────────────────────────────────────────────
// Keyword matching
// ────────────────────────────────────────────────────────────────────────────

/// Lower-cased skill name with keyword lookups. Keywords of two characters
/// or fewer ("ai", "ux", "ui") only match whole words.
struct SkillText {
    lower: String,
    words: Vec<String>,
}

impl SkillText {
    fn new(skill: &str) -> Self {
        let lower = skill.to_lowercase();
        let words = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        Self { lower, words }
    }

    fn mentions(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| {
            if k.len() <= 2 {
                self.words.iter().any(|w| w == k)
            } else {
                self.lower.contains(k)
            }
        })
    }
}

const PROGRAMMING: &[&str] = &["programming", "coding", "development"];
const DESIGN: &[&str] = &["design", "ux", "ui"];
const DATA: &[&str] = &["data", "analysis"];
const LEADERSHIP: &[&str] = &["leadership", "management"];

/// Keyword → `(industry, category)` used when no category name matches the skill.
const RESOURCE_FALLBACKS: &[(&[&str], Industry, &str)] = &[
    (PROGRAMMING, Industry::Technology, "programming"),
    (DESIGN, Industry::Technology, "design"),
    (DATA, Industry::Technology, "data_science"),
    (&["marketing", "content"], Industry::Marketing, "digital_marketing"),
    (&["finance", "accounting"], Industry::Finance, "financial_analysis"),
    (LEADERSHIP, Industry::Default, LEADERSHIP_CATEGORY),
    (&["communication"], Industry::Default, "communication"),
];

// ────────────────────────────────────────────────────────────────────────────
// Difficulty & effort
// ────────────────────────────────────────────────────────────────────────────

fn estimate_difficulty(skill: &SkillText) -> (Difficulty, u32) {
    if skill.mentions(&["advanced", "expert", "architect", "machine learning", "ai", "leadership"]) {
        (Difficulty::High, 100)
    } else if skill.mentions(&["intermediate", "professional", "development", "management"]) {
        (Difficulty::Medium, 60)
    } else {
        (Difficulty::Low, 30)
    }
}

fn leading_number() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)").ok()).as_ref()
}

/// Hours implied by a time label: `"20-40 hours"` → 20, `"3-6 months"` → 120.
/// Labels without a unit the estimate understands yield `None`.
fn label_hours(label: &str) -> Option<f64> {
    let lower = label.to_lowercase();
    let factor = if lower.contains("hour") {
        1.0
    } else if lower.contains("month") {
        HOURS_PER_STUDY_MONTH
    } else {
        return None;
    };
    let caps = leading_number()?.captures(&lower)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    Some(value * factor)
}

fn time_investment(resources: &[LearningResource], default_hours: u32) -> u32 {
    let hours: Vec<f64> = resources
        .iter()
        .filter_map(|r| label_hours(&r.time_investment))
        .collect();
    if hours.is_empty() {
        default_hours
    } else {
        (hours.iter().sum::<f64>() / hours.len() as f64) as u32
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Milestones
// ────────────────────────────────────────────────────────────────────────────

struct MilestoneTemplate {
    name: &'static str,
    description: String,
    percentage: u32,
}

fn template(name: &'static str, description: impl Into<String>, percentage: u32) -> MilestoneTemplate {
    MilestoneTemplate {
        name,
        description: description.into(),
        percentage,
    }
}

fn milestone_templates(skill: &str, text: &SkillText) -> Vec<MilestoneTemplate> {
    if text.mentions(PROGRAMMING) {
        vec![
            template("Fundamentals", "Learn basic concepts and syntax", 20),
            template("Building simple applications", "Apply fundamentals to create basic programs", 40),
            template("Intermediate concepts", "Learn more advanced techniques", 60),
            template("Building complex applications", "Create more sophisticated programs", 80),
            template("Advanced topics and optimization", "Master advanced concepts and best practices", 100),
        ]
    } else if text.mentions(DESIGN) {
        vec![
            template("Design fundamentals", "Learn basic principles and tools", 20),
            template("Creating simple designs", "Apply principles to create basic designs", 40),
            template("User research and testing", "Learn to validate designs with users", 60),
            template("Advanced design techniques", "Create more sophisticated designs", 80),
            template("Building a professional portfolio", "Showcase your skills with polished projects", 100),
        ]
    } else if text.mentions(LEADERSHIP) {
        vec![
            template("Leadership fundamentals", "Learn basic principles of effective leadership", 20),
            template("Team dynamics", "Understand how to work with different personality types", 40),
            template("Conflict resolution", "Learn to address and resolve team conflicts", 60),
            template("Strategic planning", "Develop skills for setting goals and planning", 80),
            template("Advanced leadership", "Master situational leadership and mentoring", 100),
        ]
    } else {
        vec![
            template("Fundamentals", format!("Learn basic concepts of {skill}"), 25),
            template("Practical application", format!("Apply {skill} to simple scenarios"), 50),
            template("Advanced techniques", format!("Master more complex aspects of {skill}"), 75),
            template("Expert level", format!("Achieve professional proficiency in {skill}"), 100),
        ]
    }
}

fn milestone_cap(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::High => 5,
        Difficulty::Medium => 4,
        Difficulty::Low => 3,
    }
}

/// Picks `count` templates closest to evenly spaced percentages, each at most
/// once, and spreads them over the timeframe.
fn build_milestones(skill: &str, text: &SkillText, difficulty: Difficulty, months: u32) -> Vec<Milestone> {
    let count = milestone_cap(difficulty).min(months) as usize;
    let mut templates = milestone_templates(skill, text);

    let selected = if count >= templates.len() {
        templates
    } else {
        let mut picked = Vec::with_capacity(count);
        for i in 0..count {
            let target = 100.0 * (i + 1) as f64 / count as f64;
            let closest = templates
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    let da = (f64::from(a.percentage) - target).abs();
                    let db = (f64::from(b.percentage) - target).abs();
                    da.total_cmp(&db)
                })
                .map(|(index, _)| index);
            if let Some(index) = closest {
                picked.push(templates.remove(index));
            }
        }
        picked
    };

    // Widened so month counts near `u32::MAX` cannot overflow.
    let total = selected.len() as u64;
    selected
        .into_iter()
        .enumerate()
        .map(|(i, t)| Milestone {
            name: t.name.to_string(),
            description: t.description,
            percentage: t.percentage,
            timeline: format!("Month {}", (i as u64 + 1) * u64::from(months) / total),
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Schedule & tips
// ────────────────────────────────────────────────────────────────────────────

fn activity_pool(skill: &str, week: u32) -> Vec<String> {
    let mut pool = match week {
        0 => vec![
            format!("Learn the fundamentals of {skill}"),
            format!("Watch introductory videos on {skill}"),
            format!("Read the first chapters of {skill} textbook"),
            format!("Set up the necessary tools for learning {skill}"),
        ],
        1 => vec![
            format!("Practice basic {skill} exercises"),
            format!("Complete interactive tutorials on {skill}"),
            format!("Solve simple problems using {skill}"),
            format!("Build a small project applying {skill} basics"),
        ],
        2 => vec![
            format!("Study intermediate {skill} concepts"),
            "Work through more complex examples".to_string(),
            format!("Join online discussion groups about {skill}"),
            format!("Analyze case studies related to {skill}"),
        ],
        _ => vec![
            format!("Work on a challenging {skill} project"),
            format!("Review and consolidate {skill} knowledge"),
            format!("Teach someone else a {skill} concept"),
            format!("Research advanced {skill} techniques"),
        ],
    };

    let text = SkillText::new(skill);
    let extra: &[&str] = if text.mentions(&["programming", "coding"]) {
        &[
            "Complete coding challenges",
            "Debug existing code",
            "Refactor a small application",
            "Contribute to an open-source project",
        ]
    } else if text.mentions(&["design"]) {
        &[
            "Analyze existing designs",
            "Create wireframes",
            "Conduct user testing",
            "Build a design portfolio",
        ]
    } else if text.mentions(LEADERSHIP) {
        &[
            "Role-play management scenarios",
            "Analyze leadership case studies",
            "Practice giving feedback",
            "Create a team development plan",
        ]
    } else {
        &[]
    };
    pool.extend(extra.iter().map(|s| s.to_string()));
    pool
}

fn weekly_schedule(skills: &[SkillPlan], realistic: bool, rng: &mut StdRng) -> Vec<WeekSchedule> {
    let weekly_hours = if realistic { 20 } else { REDUCED_WEEKLY_HOURS };

    (0..SCHEDULE_WEEKS)
        .map(|week| {
            let mut remaining = weekly_hours;
            let mut rotation = skills.iter().cycle();
            let mut days = Vec::new();

            for day in DAYS {
                if !realistic && matches!(day, "Tuesday" | "Thursday") {
                    continue;
                }
                let cap = if matches!(day, "Saturday" | "Sunday") {
                    WEEKEND_DAY_HOURS
                } else {
                    WEEKDAY_HOURS
                };
                let hours = cap.min(remaining);
                if hours == 0 {
                    continue;
                }
                let Some(plan) = rotation.next() else { break };
                let activity = activity_pool(&plan.skill, week)
                    .choose(rng)
                    .cloned()
                    .unwrap_or_else(|| format!("Study {}", plan.skill));
                days.push(StudySession {
                    day: day.to_string(),
                    hours,
                    focus: plan.skill.clone(),
                    activity,
                });
                remaining -= hours;
            }

            WeekSchedule { week: week + 1, days }
        })
        .collect()
}

const GENERAL_TIPS: [&str; 8] = [
    "Focus on one skill at a time to avoid overwhelming yourself",
    "Use the 'Pomodoro Technique' - study for 25 minutes, then take a 5-minute break",
    "Apply what you learn immediately to real-world problems",
    "Teach concepts to others to reinforce your understanding",
    "Join communities related to the skills you're developing",
    "Create projects that combine multiple skills you're learning",
    "Schedule regular review sessions to reinforce your learning",
    "Track your progress to stay motivated",
];

fn family_tips(skill: &str) -> &'static [&'static str] {
    let text = SkillText::new(skill);
    if text.mentions(PROGRAMMING) {
        &[
            "Code every day, even if just for 30 minutes",
            "Build projects instead of just following tutorials",
            "Learn to read documentation effectively",
            "Practice debugging and fixing errors",
            "Contribute to open-source projects to gain experience",
        ]
    } else if text.mentions(DESIGN) {
        &[
            "Build a portfolio of your design work",
            "Seek feedback from experienced designers",
            "Study successful designs and analyze what makes them effective",
            "Learn the principles behind good design, not just tools",
            "Practice redesigning existing interfaces",
        ]
    } else if text.mentions(DATA) {
        &[
            "Work with real datasets rather than just examples",
            "Focus on understanding the problem before analyzing data",
            "Learn to effectively communicate your findings",
            "Master one visualization tool thoroughly",
            "Practice cleaning and preparing messy data",
        ]
    } else if text.mentions(LEADERSHIP) {
        &[
            "Find opportunities to lead small projects or initiatives",
            "Ask for feedback on your leadership style",
            "Study different leadership approaches and their contexts",
            "Practice active listening and effective communication",
            "Learn from both good and bad managers you've had",
        ]
    } else {
        &[]
    }
}

fn learning_tips(skills: &[SkillPlan], rng: &mut StdRng) -> Vec<String> {
    let mut tips: Vec<&str> = Vec::new();
    let candidates = GENERAL_TIPS
        .iter()
        .copied()
        .chain(skills.iter().flat_map(|s| family_tips(&s.skill).iter().copied()));
    for tip in candidates {
        if !tips.contains(&tip) {
            tips.push(tip);
        }
    }

    if tips.len() <= MAX_TIPS {
        return tips.into_iter().map(str::to_string).collect();
    }
    let mut picked = index::sample(rng, tips.len(), MAX_TIPS).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| tips[i].to_string()).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Planner
// ────────────────────────────────────────────────────────────────────────────

pub struct DevelopmentPlanner<'a> {
    data: &'a ReferenceData,
    settings: &'a PlannerSettings,
}

impl<'a> DevelopmentPlanner<'a> {
    pub fn new(data: &'a ReferenceData, settings: &'a PlannerSettings) -> Self {
        Self { data, settings }
    }

    /// Resources from categories named like the skill, else a keyword
    /// fallback category, else three generic suggestions.
    pub fn resources_for_skill(&self, skill: &str) -> Vec<LearningResource> {
        let text = SkillText::new(skill);
        let mut found: Vec<LearningResource> = Vec::new();

        for (_, category) in self.data.all_resource_categories() {
            if found.len() >= MAX_RESOURCES_PER_SKILL {
                break;
            }
            let name = category.name.to_lowercase();
            let spaced = name.replace('_', " ");
            let matches = [name.as_str(), spaced.as_str()]
                .iter()
                .any(|n| text.lower.contains(n) || n.contains(text.lower.as_str()));
            if matches {
                let room = MAX_RESOURCES_PER_SKILL - found.len();
                found.extend(category.resources.iter().take(room).cloned());
            }
        }
        if !found.is_empty() {
            return found;
        }

        let fallback = RESOURCE_FALLBACKS
            .iter()
            .find(|(keywords, _, _)| text.mentions(keywords))
            .and_then(|(_, industry, category)| self.data.resource_category(*industry, category));
        if let Some(category) = fallback {
            debug!("Using '{}' resources for skill '{skill}'", category.name);
            return category.resources.iter().take(FALLBACK_RESOURCES).cloned().collect();
        }

        generic_resources(skill)
    }

    /// Per-skill plans, realism check, sample schedule and learning tips.
    pub fn generate_skill_development_plan(
        &self,
        skills_to_develop: &[String],
        timeframe_months: u32,
        seed: u64,
    ) -> SkillDevelopmentPlan {
        let months = timeframe_months.max(1);
        let skills: Vec<SkillPlan> = skills_to_develop
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|skill| {
                let text = SkillText::new(skill);
                let learning_resources = self.resources_for_skill(skill);
                let (difficulty, default_hours) = estimate_difficulty(&text);
                SkillPlan {
                    skill: skill.to_string(),
                    difficulty,
                    time_investment: time_investment(&learning_resources, default_hours),
                    milestones: build_milestones(skill, &text, difficulty, months),
                    learning_resources,
                }
            })
            .collect();

        if skills.is_empty() {
            return SkillDevelopmentPlan::empty();
        }

        let total_effort_hours: u32 = skills.iter().map(|s| s.time_investment).sum();
        let weekly = f64::from(total_effort_hours) / (f64::from(months) * self.settings.weeks_per_month);
        let is_realistic = weekly <= self.settings.max_weekly_hours;
        let monthly_capacity = (self.settings.max_weekly_hours * 4.0).max(1.0) as u32;
        let revised_timeframe = (!is_realistic).then(|| total_effort_hours / monthly_capacity + 1);

        let mut rng = StdRng::seed_from_u64(seed);
        let weekly_schedule = weekly_schedule(&skills, is_realistic, &mut rng);
        let learning_tips = learning_tips(&skills, &mut rng);

        SkillDevelopmentPlan {
            skills,
            total_effort_hours,
            weekly_hours_required: (weekly * 10.0).round() / 10.0,
            is_realistic,
            revised_timeframe,
            weekly_schedule,
            learning_tips,
        }
    }
}

fn generic_resources(skill: &str) -> Vec<LearningResource> {
    vec![
        LearningResource {
            kind: "course".to_string(),
            name: format!("Introduction to {skill}"),
            provider: Some("Online platforms".to_string()),
            author: None,
            cost: "low to medium".to_string(),
            time_investment: "20-40 hours".to_string(),
        },
        LearningResource {
            kind: "book".to_string(),
            name: format!("{skill} fundamentals"),
            provider: Some("Various publishers".to_string()),
            author: None,
            cost: "low".to_string(),
            time_investment: "20-30 hours".to_string(),
        },
        LearningResource {
            kind: "platform".to_string(),
            name: "LinkedIn Learning or Udemy".to_string(),
            provider: None,
            author: None,
            cost: "low to medium".to_string(),
            time_investment: "self-paced".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn fixture() -> (ReferenceData, PlannerSettings) {
        (ReferenceData::builtin().unwrap(), PlannerSettings::default())
    }

    #[test]
    fn test_label_hours() {
        assert_eq!(label_hours("20-40 hours"), Some(20.0));
        assert_eq!(label_hours("3-6 months"), Some(120.0));
        assert_eq!(label_hours("1 month"), Some(40.0));
        assert_eq!(label_hours("self-paced"), None);
        assert_eq!(label_hours("1-5 days"), None);
    }

    #[test]
    fn test_difficulty_keywords() {
        assert_eq!(estimate_difficulty(&SkillText::new("Machine Learning")).0, Difficulty::High);
        assert_eq!(estimate_difficulty(&SkillText::new("Generative AI")).0, Difficulty::High);
        assert_eq!(estimate_difficulty(&SkillText::new("Email")).0, Difficulty::Low);
        assert_eq!(estimate_difficulty(&SkillText::new("Web Development")).0, Difficulty::Medium);
    }

    #[test]
    fn test_resources_for_skill() {
        let (data, settings) = fixture();
        let planner = DevelopmentPlanner::new(&data, &settings);

        let leadership = planner.resources_for_skill("Leadership");
        assert_eq!(leadership.len(), 4);

        let visual = planner.resources_for_skill("UX research");
        assert_eq!(visual.len(), 3);

        let python = planner.resources_for_skill("Python");
        assert_eq!(python[0].name, "Introduction to Python");
        assert_eq!(python.len(), 3);
    }

    #[test]
    fn test_unrealistic_plan_is_revised() {
        let (data, settings) = fixture();
        let planner = DevelopmentPlanner::new(&data, &settings);
        let plan = planner.generate_skill_development_plan(
            &skills(&["Python", "React", "Leadership"]),
            1,
            7,
        );

        assert_eq!(plan.skills.len(), 3);
        assert_eq!(plan.skills[0].time_investment, 20);
        assert_eq!(plan.skills[2].difficulty, Difficulty::High);
        assert_eq!(plan.skills[2].time_investment, 80);
        assert_eq!(plan.total_effort_hours, 120);
        assert_eq!(plan.weekly_hours_required, 27.9);
        assert!(!plan.is_realistic);
        assert_eq!(plan.revised_timeframe, Some(2));

        let leadership = &plan.skills[2].milestones;
        assert_eq!(leadership.len(), 1);
        assert_eq!(leadership[0].name, "Advanced leadership");
        assert_eq!(leadership[0].timeline, "Month 1");

        assert_eq!(plan.weekly_schedule.len(), 4);
        for week in &plan.weekly_schedule {
            assert_eq!(week.total_hours(), 10);
            assert!(week.days.iter().all(|d| d.day != "Tuesday" && d.day != "Thursday"));
            assert_eq!(week.days[0].focus, "Python");
            assert_eq!(week.days[1].focus, "React");
        }
        assert_eq!(plan.learning_tips.len(), 10);
    }

    #[test]
    fn test_realistic_plan_milestones_and_schedule() {
        let (data, settings) = fixture();
        let planner = DevelopmentPlanner::new(&data, &settings);
        let plan = planner.generate_skill_development_plan(&skills(&["Python programming"]), 6, 1);

        assert!(plan.is_realistic);
        assert_eq!(plan.revised_timeframe, None);
        assert_eq!(plan.total_effort_hours, 80);

        let milestones: Vec<(&str, &str)> = plan.skills[0]
            .milestones
            .iter()
            .map(|m| (m.name.as_str(), m.timeline.as_str()))
            .collect();
        assert_eq!(
            milestones,
            vec![
                ("Building simple applications", "Month 2"),
                ("Intermediate concepts", "Month 4"),
                ("Advanced topics and optimization", "Month 6"),
            ]
        );

        let week = &plan.weekly_schedule[0];
        assert_eq!(week.days.len(), 7);
        assert_eq!(week.total_hours(), 18);
        assert!(week.days.iter().all(|d| d.focus == "Python programming"));
    }

    #[test]
    fn test_huge_timeframe_milestones() {
        let (data, settings) = fixture();
        let planner = DevelopmentPlanner::new(&data, &settings);
        let plan = planner.generate_skill_development_plan(&skills(&["Leadership"]), u32::MAX, 1);

        let milestones = &plan.skills[0].milestones;
        assert!(milestones.len() > 1);
        assert_eq!(milestones.last().unwrap().timeline, "Month 4294967295");
        assert!(plan.is_realistic);
    }

    #[test]
    fn test_same_seed_same_plan() {
        let (data, settings) = fixture();
        let planner = DevelopmentPlanner::new(&data, &settings);
        let input = skills(&["Data analysis", "UI design", "Team management"]);
        let a = planner.generate_skill_development_plan(&input, 3, 99);
        let b = planner.generate_skill_development_plan(&input, 3, 99);
        assert_eq!(a, b);
    }

    #[test]
    fn test_tips_are_unique() {
        let (data, settings) = fixture();
        let planner = DevelopmentPlanner::new(&data, &settings);
        let plan = planner.generate_skill_development_plan(&skills(&["Leadership", "Management"]), 6, 3);
        let mut tips = plan.learning_tips.clone();
        tips.sort();
        tips.dedup();
        assert_eq!(tips.len(), plan.learning_tips.len());
    }

    #[test]
    fn test_empty_skill_list() {
        let (data, settings) = fixture();
        let planner = DevelopmentPlanner::new(&data, &settings);
        let plan = planner.generate_skill_development_plan(&skills(&["", "  "]), 6, 0);
        assert_eq!(plan, SkillDevelopmentPlan::empty());
        assert!(plan.is_realistic);
    }
}
