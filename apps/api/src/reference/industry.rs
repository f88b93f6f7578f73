use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical industry keys. `Default` is the catch-all table every lookup
/// falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Technology,
    Finance,
    Healthcare,
    Marketing,
    Default,
}

impl Industry {
    pub const ALL: [Industry; 5] = [
        Industry::Technology,
        Industry::Finance,
        Industry::Healthcare,
        Industry::Marketing,
        Industry::Default,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Industry::Technology => "technology",
            Industry::Finance => "finance",
            Industry::Healthcare => "healthcare",
            Industry::Marketing => "marketing",
            Industry::Default => "default",
        }
    }

    /// Capitalized form used in path steps and summaries.
    pub fn label(self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Finance => "Finance",
            Industry::Healthcare => "Healthcare",
            Industry::Marketing => "Marketing",
            Industry::Default => "Default",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Industry::ALL.into_iter().find(|i| i.key() == key)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Industry::ALL.into_iter().find(|i| i.label() == label)
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Lower-cases and underscore-joins free text: `"Senior  Dev"` → `"senior_dev"`.
pub fn snake_case(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// `"mid_level_developer"` → `"Mid Level Developer"`.
pub fn title_case(key: &str) -> String {
    key.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_key_round_trip() {
        for industry in Industry::ALL {
            assert_eq!(Industry::from_key(industry.key()), Some(industry));
        }
        assert_eq!(Industry::from_key("agriculture"), None);
    }

    #[test]
    fn test_industry_serde_is_snake_case() {
        let json = serde_json::to_string(&Industry::Healthcare).unwrap();
        assert_eq!(json, r#""healthcare""#);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("mid_level_developer"), "Mid Level Developer");
        assert_eq!(title_case("vp_of_engineering"), "Vp Of Engineering");
        assert_eq!(title_case("UX specialist"), "Ux Specialist");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("  Senior   Software Engineer "), "senior_software_engineer");
        assert_eq!(snake_case(""), "");
    }
}
