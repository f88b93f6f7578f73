//! Typed duration ranges parsed from reference-data labels such as `"1-2 years"`.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::reference::ReferenceDataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl DurationUnit {
    fn to_years(self, value: f64) -> f64 {
        match self {
            DurationUnit::Days => value / 365.0,
            DurationUnit::Weeks => value / 52.0,
            DurationUnit::Months => value / 12.0,
            DurationUnit::Years => value,
        }
    }

    fn label(self, singular: bool) -> &'static str {
        match (self, singular) {
            (DurationUnit::Days, true) => "day",
            (DurationUnit::Days, false) => "days",
            (DurationUnit::Weeks, true) => "week",
            (DurationUnit::Weeks, false) => "weeks",
            (DurationUnit::Months, true) => "month",
            (DurationUnit::Months, false) => "months",
            (DurationUnit::Years, true) => "year",
            (DurationUnit::Years, false) => "years",
        }
    }
}

/// A `min-max unit` range. Serialized back to its label form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DurationRange {
    pub min: f64,
    pub max: f64,
    pub unit: DurationUnit,
}

impl DurationRange {
    pub fn years(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            unit: DurationUnit::Years,
        }
    }

    pub fn min_years(&self) -> f64 {
        self.unit.to_years(self.min)
    }

    pub fn max_years(&self) -> f64 {
        self.unit.to_years(self.max)
    }

    /// Point inside the range, in years. `blend = 0.5` is the midpoint.
    pub fn blended_years(&self, blend: f64) -> f64 {
        let blend = blend.clamp(0.0, 1.0);
        self.min_years() + (self.max_years() - self.min_years()) * blend
    }

    pub fn midpoint_years(&self) -> f64 {
        self.blended_years(0.5)
    }
}

fn duration_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"^\s*(\d+(?:\.\d+)?)\s*(?:-\s*(\d+(?:\.\d+)?))?\s*(day|days|week|weeks|month|months|year|years)\s*$",
            )
            .ok()
        })
        .as_ref()
}

impl FromStr for DurationRange {
    type Err = ReferenceDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReferenceDataError::InvalidDuration(s.to_string());
        let lowered = s.to_lowercase();
        let caps = duration_pattern()
            .and_then(|re| re.captures(&lowered))
            .ok_or_else(invalid)?;

        let min: f64 = caps[1].parse().map_err(|_| invalid())?;
        let max: f64 = match caps.get(2) {
            Some(m) => m.as_str().parse().map_err(|_| invalid())?,
            None => min,
        };
        if max < min {
            return Err(invalid());
        }

        let unit = match &caps[3] {
            "day" | "days" => DurationUnit::Days,
            "week" | "weeks" => DurationUnit::Weeks,
            "month" | "months" => DurationUnit::Months,
            _ => DurationUnit::Years,
        };

        Ok(Self { min, max, unit })
    }
}

impl TryFrom<String> for DurationRange {
    type Error = ReferenceDataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DurationRange> for String {
    fn from(value: DurationRange) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DurationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(
                f,
                "{} {}",
                format_number(self.min),
                self.unit.label(self.min == 1.0)
            )
        } else {
            write!(
                f,
                "{}-{} {}",
                format_number(self.min),
                format_number(self.max),
                self.unit.label(false)
            )
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Renders a year count the way timeline labels read: months under a year,
/// whole years when exact, otherwise `"N years, M months"`.
pub fn format_years(years: f64) -> String {
    // Whole months, tolerant of float noise from summed ranges.
    let total_months = (years.max(0.0) * 12.0 + 1e-6).floor() as i64;
    if total_months < 12 {
        return format!("{total_months} months");
    }

    let whole = total_months / 12;
    let months = total_months % 12;
    if months == 0 {
        format!("{whole} years")
    } else {
        format!("{whole} years, {months} months")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_range() {
        let d: DurationRange = "1-2 years".parse().unwrap();
        assert_eq!(d, DurationRange::years(1.0, 2.0));
        assert!((d.midpoint_years() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_month_range_converts_to_years() {
        let d: DurationRange = "6-12 months".parse().unwrap();
        assert_eq!(d.unit, DurationUnit::Months);
        assert!((d.midpoint_years() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_parse_single_value() {
        let d: DurationRange = "1 day".parse().unwrap();
        assert_eq!(d.min, 1.0);
        assert_eq!(d.max, 1.0);
        assert_eq!(d.to_string(), "1 day");
    }

    #[test]
    fn test_parse_rejects_free_text() {
        assert!("ongoing".parse::<DurationRange>().is_err());
        assert!("self-paced".parse::<DurationRange>().is_err());
        assert!("5-2 years".parse::<DurationRange>().is_err());
    }

    #[test]
    fn test_display_keeps_label_form() {
        let d: DurationRange = "3-5 years".parse().unwrap();
        assert_eq!(d.to_string(), "3-5 years");
    }

    #[test]
    fn test_blend_extremes() {
        let d = DurationRange::years(2.0, 4.0);
        assert_eq!(d.blended_years(0.0), 2.0);
        assert_eq!(d.blended_years(1.0), 4.0);
        assert_eq!(d.blended_years(7.0), 4.0);
    }

    #[test]
    fn test_serde_round_trip_through_label() {
        let d: DurationRange = serde_json::from_str(r#""2-3 years""#).unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), r#""2-3 years""#);
    }

    #[test]
    fn test_format_years() {
        assert_eq!(format_years(0.5), "6 months");
        assert_eq!(format_years(3.0), "3 years");
        assert_eq!(format_years(2.5), "2 years, 6 months");
        assert_eq!(format_years(1.75), "1 years, 9 months");
    }
}
