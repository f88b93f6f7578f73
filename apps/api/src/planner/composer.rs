//! Career stage and the natural-language plan summary.

use std::fmt::Write as _;

use crate::models::plan::{CareerPaths, CareerPlan, CareerStage};

/// Stage from role tokens, else from years of experience.
pub fn career_stage(role_key: &str, years_experience: u32) -> CareerStage {
    let role = role_key.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| role.contains(w));

    if has(&["junior", "entry"]) {
        CareerStage::Early
    } else if has(&["senior", "lead"]) {
        CareerStage::Advanced
    } else if has(&["manager", "director", "head"]) {
        CareerStage::Leadership
    } else if has(&["architect", "principal"]) {
        CareerStage::Expert
    } else {
        CareerStage::from_years(years_experience)
    }
}

/// `1234567` → `"1,234,567"`.
pub fn thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn count_word(n: usize) -> String {
    match n {
        2 => "Two".to_string(),
        3 => "Three".to_string(),
        _ => n.to_string(),
    }
}

/// Fixed-structure, multi-paragraph summary of a composed plan.
pub fn render_summary(plan: &CareerPlan) -> String {
    let position = &plan.current_position;
    let mut summary = String::new();

    let _ = write!(
        summary,
        "Career path plan for a {} in the {} industry with {} years of experience ({} career stage).\n\n",
        position.role,
        position.normalized_industry.label(),
        position.years_experience,
        position.career_stage.label()
    );

    let skills = &plan.skill_analysis;
    let _ = write!(
        summary,
        "Your skills are {:.1}% aligned with your current role. ",
        skills.match_percentage
    );
    if skills.skill_gaps.is_empty() {
        summary.push_str("You have all the critical skills for your current role.\n\n");
    } else {
        let _ = write!(
            summary,
            "There are {} skill gaps to address for optimal performance.\n\n",
            skills.skill_gaps.len()
        );
    }

    match &plan.career_paths {
        CareerPaths::Targeted(targeted) => {
            let _ = writeln!(
                summary,
                "Primary career path: {} with {} steps to reach your goal.",
                targeted.primary_path.name,
                targeted.primary_path.upcoming().count()
            );
            if !targeted.alternate_paths.is_empty() {
                let _ = writeln!(
                    summary,
                    "Plus {} alternative path(s) to consider.",
                    targeted.alternate_paths.len()
                );
            }
            summary.push('\n');
        }
        paths @ CareerPaths::Growth(_) => {
            let named = paths.named();
            let _ = writeln!(summary, "{} potential career paths:", count_word(named.len()));
            for (_, path) in named {
                let _ = writeln!(
                    summary,
                    "- {}: {} steps over the next several years",
                    path.name,
                    path.upcoming().count()
                );
            }
            summary.push('\n');
        }
    }

    let _ = write!(
        summary,
        "Plan includes {} high-value certification recommendations, {} recommended courses, and {} books to advance your skills.\n\n",
        plan.certification_recommendations.high_value.len(),
        plan.learning_resources.courses.len(),
        plan.learning_resources.books.len()
    );

    let salary = &plan.salary_progression;
    let destination = if plan.career_paths.is_targeted() {
        salary.progression.iter().rev().find(|e| e.path == "primary_path")
    } else {
        salary.progression.last()
    };
    if let Some(destination) = destination {
        let current = salary.current.median_salary;
        if current > 0 {
            let growth = (f64::from(destination.median_salary) / f64::from(current) - 1.0) * 100.0;
            let _ = writeln!(
                summary,
                "Potential salary growth from {} to {} ({:.1}% increase) by reaching {} position.",
                thousands(current),
                thousands(destination.median_salary),
                growth,
                destination.role
            );
        }
    }

    if let Some(transition) = &plan.industry_transition {
        let _ = writeln!(
            summary,
            "\nPlan includes transition from {} to {} industry ({} difficulty).",
            transition.from.label(),
            transition.to.label(),
            transition.difficulty
        );
    }

    summary
}
