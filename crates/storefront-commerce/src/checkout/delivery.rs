//! Delivery estimates.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source of the random day count used for delivery estimates.
pub trait RandomSource {
    /// Pick a value in `low..=high`.
    fn pick(&mut self, low: u32, high: u32) -> u32;
}

/// Thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Always picks the same value, clamped into the requested range.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn pick(&mut self, low: u32, high: u32) -> u32 {
        self.0.clamp(low, high.max(low))
    }
}

/// Range of days a delivery estimate is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPolicy {
    pub min_days: u32,
    pub max_days: u32,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            min_days: 4,
            max_days: 6,
        }
    }
}

impl DeliveryPolicy {
    /// Longest delivery estimate a configuration should ask for.
    pub const MAX_DAYS: u32 = 365;

    /// Create a policy. Bounds given in the wrong order are swapped.
    pub fn new(min_days: u32, max_days: u32) -> Self {
        Self {
            min_days: min_days.min(max_days),
            max_days: min_days.max(max_days),
        }
    }

    /// Draw an estimate.
    pub fn estimate(&self, random: &mut dyn RandomSource) -> DeliveryEstimate {
        let days = random.pick(self.min_days, self.max_days);
        DeliveryEstimate {
            days: days.clamp(self.min_days, self.max_days),
        }
    }
}

/// An estimated delivery of `days` to `days + 1` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    pub days: u32,
}

impl DeliveryEstimate {
    /// Human label such as `4-5 days`.
    pub fn label(&self) -> String {
        format!("{}-{} days", self.days, self.days.saturating_add(1))
    }

    /// Date the order is expected by, counted from `placed_at`.
    ///
    /// `None` if the date falls outside the calendar range.
    pub fn delivery_date(&self, placed_at: DateTime<Utc>) -> Option<NaiveDate> {
        placed_at
            .checked_add_signed(Duration::days(i64::from(self.days)))
            .map(|at| at.date_naive())
    }
}

impl fmt::Display for DeliveryEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_estimate_stays_in_range() {
        let policy = DeliveryPolicy::default();
        let mut random = ThreadRandom;
        for _ in 0..50 {
            let estimate = policy.estimate(&mut random);
            assert!((4..=6).contains(&estimate.days));
        }
    }

    #[test]
    fn test_fixed_random_is_clamped() {
        let policy = DeliveryPolicy::default();
        assert_eq!(policy.estimate(&mut FixedRandom(9)).days, 6);
        assert_eq!(policy.estimate(&mut FixedRandom(0)).days, 4);
        assert_eq!(policy.estimate(&mut FixedRandom(5)).days, 5);
    }

    #[test]
    fn test_label_and_date() {
        let estimate = DeliveryEstimate { days: 4 };
        assert_eq!(estimate.label(), "4-5 days");

        let placed = Utc.with_ymd_and_hms(2024, 1, 30, 10, 0, 0).unwrap();
        assert_eq!(
            estimate.delivery_date(placed),
            NaiveDate::from_ymd_opt(2024, 2, 3)
        );
    }

    #[test]
    fn test_delivery_date_out_of_range() {
        let placed = Utc.with_ymd_and_hms(2024, 1, 30, 10, 0, 0).unwrap();
        let estimate = DeliveryEstimate { days: 400_000_000 };
        assert_eq!(estimate.delivery_date(placed), None);
    }

    #[test]
    fn test_policy_swaps_bounds() {
        assert_eq!(DeliveryPolicy::new(6, 2), DeliveryPolicy::new(2, 6));
    }
}
