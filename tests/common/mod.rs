//! Shared test utilities and fixtures.

#![allow(dead_code)]

use rust_decimal::Decimal;

use ratescope::models::{Lender, Rate, RateType, RatesPage, RatesResponse, Trend};

/// Five rates, each excluded by a different one of the five filters.
pub const RATES_JSON: &str = include_str!("../fixtures/rates.json");

/// A `success: false` envelope.
pub const RATES_ERROR_JSON: &str = include_str!("../fixtures/rates_error.json");

/// Decodes the shared rates fixture.
pub fn fixture_page() -> RatesPage {
    let response: RatesResponse =
        serde_json::from_str(RATES_JSON).expect("Failed to deserialize rates fixture");
    ratescope::api::into_page(response).expect("fixture reports success")
}

/// Builds a minimal fixed-rate offer.
pub fn rate(id: &str, value: Decimal, lender: &str) -> Rate {
    Rate {
        id: id.to_string(),
        lender: Lender {
            name: lender.to_string(),
            logo: String::new(),
            category: "Major Bank".to_string(),
            color: String::new(),
        },
        rate: value,
        apr: value + Decimal::new(5, 2),
        term: "5 Years".to_string(),
        rate_type: RateType::Fixed,
        change: Decimal::ZERO,
        features: Vec::new(),
        trend: Trend::Stable,
        provinces: vec!["Ontario".to_string()],
        purpose: Some("Purchase".to_string()),
    }
}

/// Ids of `rates`, in order.
pub fn ids(rates: &[Rate]) -> Vec<String> {
    rates.iter().map(|r| r.id.clone()).collect()
}
