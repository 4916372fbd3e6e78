//! Monthly payment estimates.
//!
//! Canadian fixed-rate mortgages quote a nominal annual rate compounded
//! semi-annually, so the monthly rate is `(1 + r/2)^(1/6) - 1`.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// Amortization assumed for estimates, in years.
pub const DEFAULT_AMORTIZATION_YEARS: u32 = 25;

/// Monthly payment for `principal` at `annual_rate_pct` percent over
/// `years`, rounded to cents.
///
/// Returns `None` when the inputs cannot produce a payment (non-positive
/// principal, negative rate, zero years).
pub fn monthly_payment(
    principal: Decimal,
    annual_rate_pct: Decimal,
    years: u32,
) -> Option<Decimal> {
    if principal <= Decimal::ZERO || annual_rate_pct < Decimal::ZERO || years == 0 {
        return None;
    }

    let n = f64::from(years * 12);
    let p = principal.to_f64()?;
    let r = annual_rate_pct.to_f64()? / 100.0;

    let payment = if r == 0.0 {
        p / n
    } else {
        let monthly = (1.0 + r / 2.0).powf(1.0 / 6.0) - 1.0;
        p * monthly / (1.0 - (1.0 + monthly).powf(-n))
    };

    Decimal::from_f64(payment).map(|d| d.round_dp(2))
}

/// Parses a principal typed by the user, accepting `$` and `,`.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',' && *c != '_')
        .collect();
    cleaned.parse::<Decimal>().ok().filter(|d| *d > Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn standard_payment() {
        // 500k at 5% over 25 years with semi-annual compounding.
        let payment = monthly_payment(dec!(500000), dec!(5), 25).unwrap();
        assert!(payment > dec!(2900) && payment < dec!(2910), "{payment}");
    }

    #[test]
    fn zero_rate_is_straight_line() {
        assert_eq!(monthly_payment(dec!(300000), dec!(0), 25), Some(dec!(1000)));
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(monthly_payment(dec!(0), dec!(5), 25).is_none());
        assert!(monthly_payment(dec!(1000), dec!(-1), 25).is_none());
        assert!(monthly_payment(dec!(1000), dec!(5), 0).is_none());
    }

    #[test]
    fn parses_formatted_amounts() {
        assert_eq!(parse_amount("$450,000"), Some(dec!(450000)));
        assert_eq!(parse_amount(" 325000.50 "), Some(dec!(325000.50)));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("-5"), None);
    }
}
