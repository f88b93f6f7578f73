//! Certification & Learning Recommender.

use tracing::warn;

use crate::models::plan::{CertificationRecommendations, LearningResources, SkillGap};
use crate::planner::PlanError;
use crate::reference::industry::Industry;
use crate::reference::tables::{LearningResource, ValueTier};
use crate::reference::ReferenceData;

const PER_CATEGORY: usize = 2;
const LEADERSHIP_TOP_UP: usize = 2;
/// Below this many collected resources, categories are taken regardless of relevance.
const MIN_RESOURCES: usize = 3;

pub struct Recommender<'a> {
    data: &'a ReferenceData,
}

impl<'a> Recommender<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data }
    }

    /// Certifications for the role, bucketed by value tier.
    pub fn recommend_certifications(
        &self,
        role_key: &str,
        industry: Industry,
    ) -> Result<CertificationRecommendations, PlanError> {
        let mut recommendations = CertificationRecommendations::default();
        for cert in self.data.certifications_for(industry, role_key)? {
            let bucket = match cert.value.tier() {
                ValueTier::High => &mut recommendations.high_value,
                ValueTier::Medium => &mut recommendations.medium_value,
                ValueTier::Optional => &mut recommendations.optional,
            };
            bucket.push(cert.clone());
        }
        Ok(recommendations)
    }

    /// Resources from categories relevant to the skill gaps, grouped by type.
    pub fn recommend_learning_resources(
        &self,
        industry: Industry,
        skill_gaps: &[SkillGap],
    ) -> LearningResources {
        let gaps: Vec<String> = skill_gaps.iter().map(|g| g.name.to_lowercase()).collect();
        let mut collected: Vec<LearningResource> = Vec::new();

        for category in self.data.resource_categories(industry) {
            let name = category.name.replace('_', " ");
            let relevant = gaps
                .iter()
                .any(|gap| gap.contains(name.as_str()) || name.contains(gap.as_str()));
            if !relevant && collected.len() >= MIN_RESOURCES {
                continue;
            }
            for resource in category.resources.iter().take(PER_CATEGORY) {
                push_unique(&mut collected, resource);
            }
        }

        if collected.len() < MIN_RESOURCES {
            for resource in self.data.leadership_resources().iter().take(LEADERSHIP_TOP_UP) {
                push_unique(&mut collected, resource);
            }
        }

        if collected.is_empty() {
            warn!("No learning resources resolved for {industry}");
        }
        LearningResources::grouped(collected)
    }
}

fn push_unique(collected: &mut Vec<LearningResource>, resource: &LearningResource) {
    if !collected.iter().any(|r| r.name == resource.name) {
        collected.push(resource.clone());
    }
}
