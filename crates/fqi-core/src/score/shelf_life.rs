use crate::category::FoodCategory;
use crate::profiles::schema::ThresholdProfile;
use crate::score::fqi::SPOILED_MAX_FQI;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

const BASE_DECAY_RATE: u32 = 2;
const WARM_DECAY_RATE: u32 = 8;
const HOT_DECAY_RATE: u32 = 20;

/// Decay speeds up once the temperature is strictly within this many
/// degrees of `temp_critical`.
const WARM_MARGIN: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Extra FQI points lost per hour, by category. First match wins.
pub const DECAY_BONUSES: [(FoodCategory, u32); 7] = [
    (FoodCategory::Tahu, 10),
    (FoodCategory::Susu, 8),
    (FoodCategory::Daging, 4),
    (FoodCategory::Sayur, 5),
    (FoodCategory::Nasi, 4),
    (FoodCategory::Roti, 1),
    (FoodCategory::Tempe, 3),
];

/// Estimated time until a sample crosses the spoilage threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum RemainingLife {
    Spoiled,
    Minutes(u64),
    /// Rounded to one decimal place.
    Hours(Decimal),
    Days(u64),
}

impl fmt::Display for RemainingLife {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemainingLife::Spoiled => write!(f, "0 hours (spoiled)"),
            RemainingLife::Minutes(m) => write!(f, "± {m} minutes"),
            RemainingLife::Hours(h) => write!(f, "± {h:.1} hours"),
            RemainingLife::Days(d) => write!(f, "> {d} days"),
        }
    }
}

/// Category bonus for a profile name, matched case-insensitively.
pub fn category_bonus(profile_name: &str) -> Option<(FoodCategory, u32)> {
    DECAY_BONUSES
        .iter()
        .copied()
        .find(|(category, _)| category.in_name_loose(profile_name))
}

/// FQI points lost per hour at this temperature.
pub fn decay_rate(temperature: Decimal, profile: &ThresholdProfile) -> u32 {
    let base = if temperature >= profile.temp_critical {
        HOT_DECAY_RATE
    } else if temperature > profile.temp_critical.saturating_sub(WARM_MARGIN) {
        WARM_DECAY_RATE
    } else {
        BASE_DECAY_RATE
    };

    base + category_bonus(&profile.name).map_or(0, |(_, bonus)| bonus)
}

/// Project how long until `fqi` decays to the spoilage threshold.
///
/// Minutes and days are floored from the exact quotient
/// `points_left / decay_rate`, so whole-number boundaries are not lost to
/// rounding.
pub fn estimate(fqi: u8, temperature: Decimal, profile: &ThresholdProfile) -> RemainingLife {
    if fqi <= SPOILED_MAX_FQI {
        return RemainingLife::Spoiled;
    }

    let points_left = u64::from(fqi - SPOILED_MAX_FQI);
    let rate = u64::from(decay_rate(temperature, profile));

    if points_left < rate {
        RemainingLife::Minutes((points_left * 60 / rate).max(1))
    } else if points_left > rate * 48 {
        RemainingLife::Days(points_left / (rate * 24))
    } else {
        RemainingLife::Hours(round_hours(points_left, rate))
    }
}

/// `points / rate` to one decimal place, rounding the nearest `f64` to the
/// quotient: 21/20 reads as 1.1 (1.05 is stored slightly above), 23/20 as
/// 1.1 (1.15 is stored slightly below). Exact ties go to even.
fn round_hours(points: u64, rate: u64) -> Decimal {
    let exact = Decimal::from(points) / Decimal::from(rate);
    let quotient = points as f64 / rate as f64;
    Decimal::from_f64_retain(quotient)
        .unwrap_or(exact)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven)
}

/// Formatted remaining shelf life, e.g. "± 10.0 hours".
pub fn estimate_remaining_life(fqi: u8, temperature: Decimal, profile: &ThresholdProfile) -> String {
    estimate(fqi, temperature, profile).to_string()
}
