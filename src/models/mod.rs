//! Wire models for the rates service.
//!
//! Contains the rate record itself and the `{ success, data, ... }`
//! envelope every rates endpoint responds with.

pub mod rate;

use serde::{Deserialize, Serialize};

pub use rate::{Lender, Rate, RateIssue, RateType, Trend};

/// Response envelope shared by `/api/rates` and `/api/rates/filtered`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Rate>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A successfully loaded list of rates plus its metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatesPage {
    pub rates: Vec<Rate>,
    pub total: Option<u64>,
    pub last_updated: Option<String>,
}

impl RatesPage {
    /// Wraps a bare list with no server metadata.
    pub fn from_rates(rates: Vec<Rate>) -> Self {
        Self {
            total: Some(rates.len() as u64),
            rates,
            last_updated: None,
        }
    }
}
