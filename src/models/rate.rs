//! Mortgage rate models.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A single lender's mortgage offer as served by the rates endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub lender: Lender,
    pub rate: Decimal,
    pub apr: Decimal,
    /// Lock-in duration label, e.g. `"5 Years"`.
    pub term: String,
    #[serde(rename = "type")]
    pub rate_type: RateType,
    /// Signed delta from the previous observation.
    #[serde(default)]
    pub change: Decimal,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default)]
    pub provinces: Vec<String>,
    #[serde(default)]
    pub purpose: Option<String>,
}

/// The institution offering a rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lender {
    pub name: String,
    #[serde(default)]
    pub logo: String,
    /// Lender category, e.g. `"Major Bank"` or `"Credit Union"`.
    pub category: String,
    #[serde(default)]
    pub color: String,
}

/// Fixed or variable interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateType {
    #[serde(alias = "fixed")]
    Fixed,
    #[serde(alias = "variable")]
    Variable,
}

impl RateType {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            RateType::Fixed => "Fixed",
            RateType::Variable => "Variable",
        }
    }
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of the latest rate movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

impl Trend {
    /// Returns the arrow glyph used in tables.
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Stable => "─",
        }
    }

    /// Returns the trend implied by a signed change.
    pub fn from_change(change: Decimal) -> Self {
        if change > Decimal::ZERO {
            Trend::Up
        } else if change < Decimal::ZERO {
            Trend::Down
        } else {
            Trend::Stable
        }
    }
}

/// A violated data invariant on a [`Rate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateIssue {
    NegativeRate,
    NegativeApr,
    NoProvinces,
}

impl Rate {
    /// Returns whether the rate applies in `province`.
    pub fn available_in(&self, province: &str) -> bool {
        self.provinces.iter().any(|p| p == province)
    }

    /// Returns whether `trend` agrees in sign with `change`.
    pub fn trend_consistent(&self) -> bool {
        Trend::from_change(self.change) == self.trend
    }

    /// Lists the data invariants this rate violates.
    ///
    /// Violations are reported, not rejected: the payload is rendered as
    /// served.
    pub fn validate(&self) -> Vec<RateIssue> {
        let mut issues = Vec::new();
        if self.rate < Decimal::ZERO {
            issues.push(RateIssue::NegativeRate);
        }
        if self.apr < Decimal::ZERO {
            issues.push(RateIssue::NegativeApr);
        }
        if self.provinces.is_empty() {
            issues.push(RateIssue::NoProvinces);
        }
        issues
    }

    /// One-sentence summary suitable for reading aloud.
    pub fn spoken_summary(&self) -> String {
        let movement = match self.trend {
            Trend::Up => format!("up {} points", self.change.abs()),
            Trend::Down => format!("down {} points", self.change.abs()),
            Trend::Stable => "unchanged".to_string(),
        };
        format!(
            "{} offers a {} {} rate of {} percent, APR {} percent, {}.",
            self.lender.name, self.term, self.rate_type, self.rate, self.apr, movement
        )
    }
}

/// Accepts both `"42"` and `42` for identifiers.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
