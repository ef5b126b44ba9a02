//! Fare pricing

use ridepolicy_config::SchedulingPolicy;

/// Round to whole cents, halves away from zero
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Apply peak/off-peak pricing to a base fare.
///
/// With dynamic pricing off the base fare is returned untouched, without
/// rounding. Student discounts are a separate step, see
/// [`apply_student_discount`].
pub fn calculate_price(policy: &SchedulingPolicy, base_price: f64, is_peak_hour: bool) -> f64 {
    if !policy.dynamic_pricing {
        return base_price;
    }

    let factor = if is_peak_hour {
        policy.peak_hour_multiplier
    } else {
        policy.off_peak_discount
    };

    round_to_cents(base_price * factor)
}

/// Apply the configured student discount to a price
pub fn apply_student_discount(policy: &SchedulingPolicy, price: f64) -> f64 {
    round_to_cents(price * (1.0 - policy.student_discount_percent / 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dynamic_policy() -> SchedulingPolicy {
        SchedulingPolicy {
            dynamic_pricing: true,
            peak_hour_multiplier: 1.5,
            off_peak_discount: 0.8,
            student_discount_percent: 10.0,
            ..Default::default()
        }
    }

    #[test]
    fn peak_multiplier() {
        assert_eq!(calculate_price(&dynamic_policy(), 100.0, true), 150.0);
    }

    #[test]
    fn off_peak_discount() {
        assert_eq!(calculate_price(&dynamic_policy(), 100.0, false), 80.0);
        assert_eq!(calculate_price(&dynamic_policy(), 12.34, false), 9.87);
    }

    #[test]
    fn static_pricing_returns_base_unchanged() {
        let policy = SchedulingPolicy {
            dynamic_pricing: false,
            ..dynamic_policy()
        };

        assert_eq!(calculate_price(&policy, 100.0, true), 100.0);
        assert_eq!(calculate_price(&policy, 100.0, false), 100.0);
        // Not rounded either
        assert_eq!(calculate_price(&policy, 10.005, true), 10.005);
    }

    #[test]
    fn student_discount() {
        assert_eq!(apply_student_discount(&dynamic_policy(), 150.0), 135.0);

        let none = SchedulingPolicy {
            student_discount_percent: 0.0,
            ..dynamic_policy()
        };
        assert_eq!(apply_student_discount(&none, 19.99), 19.99);

        let free = SchedulingPolicy {
            student_discount_percent: 100.0,
            ..dynamic_policy()
        };
        assert_eq!(apply_student_discount(&free, 42.0), 0.0);
    }

    #[test]
    fn discount_composes_after_pricing() {
        let policy = dynamic_policy();
        let peak = calculate_price(&policy, 100.0, true);
        assert_eq!(apply_student_discount(&policy, peak), 135.0);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to_cents(2.5 / 100.0), 0.03);
        assert_eq!(round_to_cents(-2.5 / 100.0), -0.03);
        assert_eq!(round_to_cents(1.234), 1.23);
        assert_eq!(round_to_cents(1.236), 1.24);
    }
}
