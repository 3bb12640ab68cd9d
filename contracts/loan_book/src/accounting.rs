use crate::storage::RATE_DENOMINATOR;

/// Calculate the amount owed on a loan
///
/// Formula: amount_due = principal × (100,000 + rate) / 100,000
///
/// With the early-payback discount the effective rate is 90% of the
/// configured rate, computed as `rate / 10 * 9`. The division truncates
/// before the multiplication; callers depend on that exact ordering.
///
/// Example:
/// - principal: 1,000,000
/// - rate: 5,000 (5%, scaled x1000)
/// - amount_due: 1,000,000 × 105,000 / 100,000 = 1,050,000
/// - discounted: rate 5,000 / 10 × 9 = 4,500 → 1,045,000
pub fn amount_due(principal: i128, rate_x1000: u32, early_discount: bool) -> Option<i128> {
    let rate = if early_discount {
        rate_x1000 / 10 * 9
    } else {
        rate_x1000
    };

    let multiplier = RATE_DENOMINATOR.checked_add(rate as i128)?;

    principal.checked_mul(multiplier)?.checked_div(RATE_DENOMINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_due_standard() {
        let principal = 1_000_000;
        let rate = 5_000; // 5%

        assert_eq!(amount_due(principal, rate, false).unwrap(), 1_050_000);
    }

    #[test]
    fn test_amount_due_discounted() {
        let principal = 1_000_000;
        let rate = 5_000; // 5% → effective 4.5%

        assert_eq!(amount_due(principal, rate, true).unwrap(), 1_045_000);
    }

    #[test]
    fn test_small_principal_truncates() {
        // 1,000 × 100,050 / 100,000 = 1,000 (interest lost to truncation)
        assert_eq!(amount_due(1_000, 50, false).unwrap(), 1_000);
        // discounted: 50 / 10 × 9 = 45 → 1,000 × 100,045 / 100,000 = 1,000
        assert_eq!(amount_due(1_000, 50, true).unwrap(), 1_000);
    }

    #[test]
    fn test_discount_truncation_order() {
        // rate 15: the discount divides first, 15 / 10 = 1, then × 9 = 9.
        // Multiplying first would give 15 × 9 / 10 = 13.
        assert_eq!(amount_due(1_000_000, 15, false).unwrap(), 1_000_150);
        assert_eq!(amount_due(1_000_000, 15, true).unwrap(), 1_000_090);
    }

    #[test]
    fn test_zero_rate() {
        assert_eq!(amount_due(1_000_000, 0, false).unwrap(), 1_000_000);
        assert_eq!(amount_due(1_000_000, 0, true).unwrap(), 1_000_000);
    }

    #[test]
    fn test_zero_principal() {
        assert_eq!(amount_due(0, 5_000, false).unwrap(), 0);
    }

    #[test]
    fn test_overflow_returns_none() {
        assert_eq!(amount_due(i128::MAX, 5_000, false), None);
    }
}
