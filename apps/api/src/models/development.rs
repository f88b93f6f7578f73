use serde::{Deserialize, Serialize};

use crate::reference::tables::{Difficulty, LearningResource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub description: String,
    /// Share of the skill covered once this milestone is reached.
    pub percentage: u32,
    pub timeline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillPlan {
    pub skill: String,
    pub difficulty: Difficulty,
    /// Estimated effort in hours.
    pub time_investment: u32,
    pub learning_resources: Vec<LearningResource>,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub day: String,
    pub hours: u32,
    pub focus: String,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub week: u32,
    pub days: Vec<StudySession>,
}

impl WeekSchedule {
    pub fn total_hours(&self) -> u32 {
        self.days.iter().map(|d| d.hours).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDevelopmentPlan {
    pub skills: Vec<SkillPlan>,
    pub total_effort_hours: u32,
    pub weekly_hours_required: f64,
    pub is_realistic: bool,
    /// Suggested timeframe in months when the requested one is unrealistic.
    pub revised_timeframe: Option<u32>,
    pub weekly_schedule: Vec<WeekSchedule>,
    pub learning_tips: Vec<String>,
}

impl SkillDevelopmentPlan {
    pub fn empty() -> Self {
        Self {
            skills: Vec::new(),
            total_effort_hours: 0,
            weekly_hours_required: 0.0,
            is_realistic: true,
            revised_timeframe: None,
            weekly_schedule: Vec::new(),
            learning_tips: Vec::new(),
        }
    }
}
