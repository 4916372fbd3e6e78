//! In-memory rate filtering.
//!
//! [`FilterCriteria`] holds five independent predicates (province,
//! purpose, type, term, lender type). A predicate set to `None` is
//! inactive; active predicates are combined with AND. Matching is always
//! exact: no partial or case-folding comparison is performed.

use crate::models::{Rate, RateType};

pub const ALL_PROVINCES: &str = "All Provinces";
pub const ALL_PURPOSES: &str = "All Purposes";
pub const ALL_TYPES: &str = "All Types";
pub const ALL_TERMS: &str = "All Terms";
pub const ALL_LENDERS: &str = "All Lenders";

/// Province options shown in the province dropdown, sentinel first.
pub const PROVINCE_OPTIONS: &[&str] = &[
    ALL_PROVINCES,
    "Alberta",
    "British Columbia",
    "Manitoba",
    "New Brunswick",
    "Newfoundland and Labrador",
    "Nova Scotia",
    "Ontario",
    "Prince Edward Island",
    "Quebec",
    "Saskatchewan",
];

pub const PURPOSE_OPTIONS: &[&str] = &[ALL_PURPOSES, "Purchase", "Refinance", "Renewal"];

pub const TYPE_OPTIONS: &[&str] = &[ALL_TYPES, "Fixed", "Variable"];

pub const TERM_OPTIONS: &[&str] = &[
    ALL_TERMS, "1 Year", "2 Years", "3 Years", "4 Years", "5 Years", "7 Years", "10 Years",
];

/// Lender-type options as labelled in the UI.
pub const LENDER_TYPE_OPTIONS: &[&str] = &[
    ALL_LENDERS,
    "Major Banks",
    "Credit Unions",
    "Monoline Lenders",
    "Alternative Lenders",
];

/// UI lender-type label to `lender.category` value.
const LENDER_CATEGORY_MAP: &[(&str, &str)] = &[
    ("Major Banks", "Major Bank"),
    ("Credit Unions", "Credit Union"),
    ("Monoline Lenders", "Monoline"),
    ("Alternative Lenders", "Alternative"),
];

/// Maps a UI lender-type label to the category stored on lenders.
///
/// Labels missing from the table are returned unchanged.
pub fn lender_category(label: &str) -> &str {
    LENDER_CATEGORY_MAP
        .iter()
        .find(|(ui, _)| *ui == label)
        .map(|(_, category)| *category)
        .unwrap_or(label)
}

/// The active filter predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub province: Option<String>,
    pub purpose: Option<String>,
    pub rate_type: Option<RateType>,
    pub term: Option<String>,
    /// UI label, normalized through [`lender_category`] when matching.
    pub lender_type: Option<String>,
}

impl FilterCriteria {
    /// Builds criteria from UI selections, treating `"All ..."` labels as
    /// inactive.
    pub fn from_labels(
        province: &str,
        purpose: &str,
        rate_type: &str,
        term: &str,
        lender_type: &str,
    ) -> Self {
        Self {
            province: active(province),
            purpose: active(purpose),
            rate_type: match rate_type {
                "Fixed" => Some(RateType::Fixed),
                "Variable" => Some(RateType::Variable),
                _ => None,
            },
            term: active(term),
            lender_type: active(lender_type),
        }
    }

    /// Returns whether no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.province.is_none()
            && self.purpose.is_none()
            && self.rate_type.is_none()
            && self.term.is_none()
            && self.lender_type.is_none()
    }

    /// Returns whether `rate` satisfies every active predicate.
    pub fn matches(&self, rate: &Rate) -> bool {
        if let Some(province) = &self.province
            && !rate.available_in(province)
        {
            return false;
        }
        if let Some(purpose) = &self.purpose
            && rate.purpose.as_deref() != Some(purpose.as_str())
        {
            return false;
        }
        if let Some(rate_type) = self.rate_type
            && rate.rate_type != rate_type
        {
            return false;
        }
        if let Some(term) = &self.term
            && rate.term != *term
        {
            return false;
        }
        if let Some(label) = &self.lender_type
            && rate.lender.category != lender_category(label)
        {
            return false;
        }
        true
    }

    /// Query parameters for the server-side filtered endpoint.
    ///
    /// Only active predicates are included. Purpose has no server-side
    /// counterpart and is applied locally only.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(province) = &self.province {
            params.push(("province", province.clone()));
        }
        if let Some(rate_type) = self.rate_type {
            params.push(("type", rate_type.label().to_string()));
        }
        if let Some(term) = &self.term {
            params.push(("term", term.clone()));
        }
        if let Some(lender_type) = &self.lender_type {
            params.push(("lenderType", lender_type.clone()));
        }
        params
    }
}

/// Returns the rates matching `criteria`, in input order.
pub fn filter_rates(rates: &[Rate], criteria: &FilterCriteria) -> Vec<Rate> {
    rates
        .iter()
        .filter(|rate| criteria.matches(rate))
        .cloned()
        .collect()
}

fn active(label: &str) -> Option<String> {
    if label.is_empty() || label.starts_with("All ") {
        None
    } else {
        Some(label.to_string())
    }
}
