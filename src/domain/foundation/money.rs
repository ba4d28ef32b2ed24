//! Display helpers for USD amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero to `dp` decimal places.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount rounded to whole units with comma grouping
/// (`39600000` becomes `39,600,000`).
pub fn group_thousands(value: Decimal) -> String {
    let rounded = round_half_up(value, 0);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_by_thousands() {
        assert_eq!(group_thousands(Decimal::ZERO), "0");
        assert_eq!(group_thousands(dec!(999)), "999");
        assert_eq!(group_thousands(dec!(1000)), "1,000");
        assert_eq!(group_thousands(dec!(39600000)), "39,600,000");
    }

    #[test]
    fn rounds_before_grouping() {
        assert_eq!(group_thousands(dec!(1234567.6)), "1,234,568");
        assert_eq!(group_thousands(dec!(0.4)), "0");
    }

    #[test]
    fn keeps_sign() {
        assert_eq!(group_thousands(dec!(-4500)), "-4,500");
        assert_eq!(group_thousands(dec!(-0.2)), "0");
    }

    #[test]
    fn half_rounds_away_from_zero() {
        assert_eq!(round_half_up(dec!(110.5), 0), dec!(111));
        assert_eq!(round_half_up(dec!(2.25), 1), dec!(2.3));
    }
}
