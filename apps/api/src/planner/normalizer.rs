//! Maps free-text role and industry names onto canonical reference keys.
//!
//! Both operations are total: anything unrecognized lands on the `default`
//! industry or the industry's `default` role.

use tracing::debug;

use crate::reference::industry::{snake_case, Industry};
use crate::reference::{ReferenceData, DEFAULT_KEY};

const JUNIOR_TOKENS: &[&str] = &["junior", "jr", "entry", "associate"];
const SENIOR_TOKENS: &[&str] = &["senior", "sr"];
const LEAD_TOKENS: &[&str] = &["lead", "leader", "head", "manager"];

/// Aliases this short only match whole `_`-separated tokens, so "it" does not
/// match "digital" and "pr" does not match "product".
const SHORT_ALIAS_LEN: usize = 3;

pub struct Normalizer<'a> {
    data: &'a ReferenceData,
}

impl<'a> Normalizer<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data }
    }

    /// Exact main category, then exact alias, then contained alias, else `default`.
    pub fn industry(&self, raw: &str) -> Industry {
        let key = snake_case(raw);

        if let Some(industry) = Industry::from_key(&key) {
            return industry;
        }

        let aliases = self.data.industry_aliases();
        if let Some(alias) = aliases.iter().find(|a| a.alias == key) {
            return alias.industry;
        }
        if let Some(alias) = aliases.iter().find(|a| alias_matches(&a.alias, &key)) {
            debug!("Industry '{raw}' matched alias '{}'", alias.alias);
            return alias.industry;
        }

        debug!("Industry '{raw}' not recognized, using default");
        Industry::Default
    }

    /// Canonical role key within `industry`. The result always names a
    /// record that exists in the industry's transition table.
    pub fn role(&self, raw: &str, industry: Industry) -> String {
        let key = snake_case(raw);

        if !key.is_empty() && self.data.has_role(industry, &key) {
            return key;
        }

        let Some(table) = self.data.role_aliases(industry) else {
            debug!("No aliases for '{industry}', '{raw}' maps to default");
            return DEFAULT_KEY.to_string();
        };

        if let Some(alias) = table.aliases.iter().find(|a| a.alias == key) {
            return alias.role.clone();
        }
        if let Some(alias) = table.aliases.iter().find(|a| alias_matches(&a.alias, &key)) {
            debug!("Role '{raw}' matched alias '{}' in {industry}", alias.alias);
            return alias.role.clone();
        }

        let has_token = |tokens: &[&str]| key.split('_').any(|t| tokens.contains(&t));
        let tier = if has_token(JUNIOR_TOKENS) {
            Some(&table.tiers.junior)
        } else if has_token(SENIOR_TOKENS) {
            Some(&table.tiers.senior)
        } else if has_token(LEAD_TOKENS) {
            Some(&table.tiers.lead)
        } else {
            None
        };

        match tier {
            Some(role) => {
                debug!("Role '{raw}' mapped by seniority to '{role}'");
                role.clone()
            }
            None => {
                debug!("Role '{raw}' not recognized in {industry}, using default");
                DEFAULT_KEY.to_string()
            }
        }
    }
}

fn alias_matches(alias: &str, key: &str) -> bool {
    if alias.len() <= SHORT_ALIAS_LEN {
        key.split('_').any(|token| token == alias)
    } else {
        key.contains(alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> ReferenceData {
        ReferenceData::builtin().unwrap()
    }

    #[test]
    fn test_industry_direct_and_aliases() {
        let data = data();
        let n = Normalizer::new(&data);
        assert_eq!(n.industry("Technology"), Industry::Technology);
        assert_eq!(n.industry("tech"), Industry::Technology);
        assert_eq!(n.industry("Investment Banking"), Industry::Finance);
        assert_eq!(n.industry("Health Services"), Industry::Healthcare);
        assert_eq!(n.industry("PR"), Industry::Marketing);
        assert_eq!(n.industry("agriculture"), Industry::Default);
        assert_eq!(n.industry(""), Industry::Default);
    }

    #[test]
    fn test_short_alias_needs_whole_token() {
        let data = data();
        let n = Normalizer::new(&data);
        // "it" must not fire on "digital", but "digital_marketing" still maps to marketing.
        assert_eq!(n.industry("Digital Marketing"), Industry::Marketing);
        assert_eq!(n.industry("IT services"), Industry::Technology);
        assert_eq!(n.industry("spirit"), Industry::Default);
    }

    #[test]
    fn test_role_direct_key() {
        let data = data();
        let n = Normalizer::new(&data);
        assert_eq!(n.role("Junior Developer", Industry::Technology), "junior_developer");
        assert_eq!(n.role("registered nurse", Industry::Healthcare), "registered_nurse");
    }

    #[test]
    fn test_role_alias_exact_then_contained() {
        let data = data();
        let n = Normalizer::new(&data);
        assert_eq!(n.role("Software Engineer", Industry::Technology), "mid_level_developer");
        assert_eq!(n.role("Staff Software Engineer", Industry::Technology), "mid_level_developer");
        assert_eq!(n.role("Nurse", Industry::Healthcare), "registered_nurse");
        assert_eq!(n.role("Accountant", Industry::Finance), "financial_analyst");
    }

    #[test]
    fn test_role_seniority_tokens() {
        let data = data();
        let n = Normalizer::new(&data);
        assert_eq!(n.role("Junior Wizard", Industry::Technology), "junior_developer");
        assert_eq!(n.role("Sr Wizard", Industry::Technology), "senior_developer");
        assert_eq!(n.role("Head of Wizards", Industry::Technology), "technical_lead");
        assert_eq!(n.role("Senior Clerk", Industry::Default), "senior_level");
        assert_eq!(n.role("Associate", Industry::Marketing), "marketing_coordinator");
    }

    #[test]
    fn test_role_unknown_falls_back_to_default() {
        let data = data();
        let n = Normalizer::new(&data);
        assert_eq!(n.role("Astronaut", Industry::Technology), DEFAULT_KEY);
        assert_eq!(n.role("", Industry::Finance), DEFAULT_KEY);
    }

    #[test]
    fn test_normalization_is_total() {
        let data = data();
        let n = Normalizer::new(&data);
        let inputs = [
            "", " ", "???", "Chief Happiness Officer", "sr", "LEAD", "it", "Über Entwickler",
            "data analyst", "pa", "product owner", "the head chef", "x_y_z",
        ];
        for raw_industry in ["technology", "bank", "", "nursing", "media", "farming"] {
            let industry = n.industry(raw_industry);
            assert!(data.roles_table(industry).is_ok());
            for raw_role in inputs {
                let role = n.role(raw_role, industry);
                assert!(
                    data.has_role(industry, &role),
                    "{raw_role:?} in {industry} gave unresolvable '{role}'"
                );
            }
        }
    }
}
