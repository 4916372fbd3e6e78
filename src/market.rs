//! Market trends summary computed from the loaded rate list.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{Rate, RateType, Trend};

/// Aggregate view over one rate type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSummary {
    pub rate_type: RateType,
    pub count: usize,
    pub lowest: Decimal,
    pub lowest_lender: String,
    pub average: Decimal,
}

/// Average rate for a single term.
#[derive(Debug, Clone, PartialEq)]
pub struct TermAverage {
    pub term: String,
    pub count: usize,
    pub average: Decimal,
}

/// A rate that moved, with its lender for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Mover {
    pub lender: String,
    pub term: String,
    pub change: Decimal,
}

/// Snapshot of the market derived from the current rate list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketSummary {
    pub by_type: Vec<TypeSummary>,
    /// Ordered by term length, shortest first.
    pub by_term: Vec<TermAverage>,
    pub rising: usize,
    pub falling: usize,
    pub stable: usize,
    pub biggest_increase: Option<Mover>,
    pub biggest_decrease: Option<Mover>,
}

impl MarketSummary {
    /// Summarizes `rates`. An empty list yields an empty summary.
    pub fn from_rates(rates: &[Rate]) -> Self {
        let mut summary = MarketSummary::default();

        for rate_type in [RateType::Fixed, RateType::Variable] {
            let of_type: Vec<&Rate> =
                rates.iter().filter(|r| r.rate_type == rate_type).collect();
            let Some(lowest) = of_type
                .iter()
                .copied()
                .reduce(|a, b| if b.rate < a.rate { b } else { a })
            else {
                continue;
            };
            summary.by_type.push(TypeSummary {
                rate_type,
                count: of_type.len(),
                lowest: lowest.rate,
                lowest_lender: lowest.lender.name.clone(),
                average: average(of_type.iter().map(|r| r.rate)),
            });
        }

        let mut terms: BTreeMap<(u32, String), Vec<Decimal>> = BTreeMap::new();
        for rate in rates {
            terms
                .entry((term_months(&rate.term), rate.term.clone()))
                .or_default()
                .push(rate.rate);
        }
        summary.by_term = terms
            .into_iter()
            .map(|((_, term), values)| TermAverage {
                term,
                count: values.len(),
                average: average(values.into_iter()),
            })
            .collect();

        for rate in rates {
            match rate.trend {
                Trend::Up => summary.rising += 1,
                Trend::Down => summary.falling += 1,
                Trend::Stable => summary.stable += 1,
            }
        }

        summary.biggest_increase = rates
            .iter()
            .filter(|r| r.change > Decimal::ZERO)
            .reduce(|a, b| if b.change > a.change { b } else { a })
            .map(mover);
        summary.biggest_decrease = rates
            .iter()
            .filter(|r| r.change < Decimal::ZERO)
            .reduce(|a, b| if b.change < a.change { b } else { a })
            .map(mover);

        summary
    }

    /// Spoken description of the summary.
    pub fn spoken_summary(&self) -> String {
        if self.by_type.is_empty() {
            return "No market data is available.".to_string();
        }
        let mut parts: Vec<String> = self
            .by_type
            .iter()
            .map(|t| {
                format!(
                    "The lowest {} rate is {} percent from {}, averaging {} percent.",
                    t.rate_type.label().to_lowercase(),
                    t.lowest,
                    t.lowest_lender,
                    t.average
                )
            })
            .collect();
        parts.push(format!(
            "{} rates are rising, {} falling and {} stable.",
            self.rising, self.falling, self.stable
        ));
        parts.join(" ")
    }
}

fn mover(rate: &Rate) -> Mover {
    Mover {
        lender: rate.lender.name.clone(),
        term: rate.term.clone(),
        change: rate.change,
    }
}

/// Mean rounded to two decimal places; zero for an empty input.
fn average(values: impl Iterator<Item = Decimal>) -> Decimal {
    let (sum, count) = values.fold((Decimal::ZERO, 0u32), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        Decimal::ZERO
    } else {
        (sum / Decimal::from(count)).round_dp(2)
    }
}

/// Term length in months, for ordering labels like `"6 Months"` or
/// `"5 Years"`. Unparseable labels sort last.
fn term_months(term: &str) -> u32 {
    let mut parts = term.split_whitespace();
    let Some(Ok(n)) = parts.next().map(str::parse::<u32>) else {
        return u32::MAX;
    };
    match parts.next().map(str::to_lowercase).as_deref() {
        Some("month") | Some("months") => n,
        Some("year") | Some("years") => n.checked_mul(12).unwrap_or(u32::MAX),
        _ => u32::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Lender;
    use rust_decimal_macros::dec;

    fn term_rate(term: &str) -> Rate {
        Rate {
            id: term.to_string(),
            lender: Lender {
                name: "Maple Bank".to_string(),
                logo: String::new(),
                category: "Major Bank".to_string(),
                color: String::new(),
            },
            rate: dec!(4.89),
            apr: dec!(4.95),
            term: term.to_string(),
            rate_type: RateType::Fixed,
            change: Decimal::ZERO,
            features: Vec::new(),
            trend: Trend::Stable,
            provinces: vec!["Ontario".to_string()],
            purpose: None,
        }
    }

    #[test]
    fn term_months_orders_labels() {
        assert_eq!(term_months("6 Months"), 6);
        assert_eq!(term_months("1 Year"), 12);
        assert_eq!(term_months("10 Years"), 120);
        assert_eq!(term_months("Open"), u32::MAX);
    }

    #[test]
    fn huge_term_sorts_last_without_overflow() {
        assert_eq!(term_months("400000000 Years"), u32::MAX);

        let rates = [term_rate("400000000 Years"), term_rate("5 Years")];
        let summary = MarketSummary::from_rates(&rates);
        let terms: Vec<&str> = summary.by_term.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(terms, ["5 Years", "400000000 Years"]);
    }

    #[test]
    fn empty_list_yields_empty_summary() {
        let summary = MarketSummary::from_rates(&[]);
        assert_eq!(summary, MarketSummary::default());
        assert_eq!(summary.spoken_summary(), "No market data is available.");
    }
}
