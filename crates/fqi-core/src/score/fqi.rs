use crate::error::FqiError;
use crate::model::{FreshnessStatus, Sample};
use crate::profiles::schema::{ThresholdProfile, GAS_BASELINE};
use crate::profiles::validate_profile;
use crate::score::mold::matching_mold_rule;
use crate::score::outcome::{FqiScore, ScoreGate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

/// Highest FQI that still counts as spoiled.
pub const SPOILED_MAX_FQI: u8 = 50;

/// Gas ratio from which the food is reported as starting to spoil.
pub const GAS_WARNING_RATIO: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

const GAS_WARNING_FQI: u8 = 55;
const HEAT_DAMAGE_FQI: u8 = 52;
const HUMIDITY_LIMIT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);
const HUMIDITY_PENALTY: Decimal = Decimal::from_parts(15, 0, 0, false, 0);
const FRESH_MIN_SCORE: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

/// Score a sample against a food profile.
///
/// Gates are evaluated in order and the first one that applies decides the
/// result: visible mold, critical gas, gas warning, heat, and finally the
/// composite gas/humidity score. Profiles with `gas_critical <= 50` are
/// rejected before any gate runs.
pub fn calculate_fqi(sample: &Sample, profile: &ThresholdProfile) -> Result<FqiScore, FqiError> {
    validate_profile(profile)?;

    let color = sample.color();
    if let Some(rule) = matching_mold_rule(&color, &profile.name) {
        debug!(profile = %profile.name, %color, category = %rule.category, "visual gate");
        return Ok(FqiScore {
            fqi: 0,
            status: FreshnessStatus::SpoiledVisual,
            gate: ScoreGate::Visual,
            reason: format!(
                "{}: {} matches {} mold rule ({}) -> {}",
                profile.name,
                color,
                rule.category,
                rule.describes,
                FreshnessStatus::SpoiledVisual
            ),
        });
    }

    let gas_ratio = sample.gas / profile.gas_critical;
    if gas_ratio >= Decimal::ONE {
        debug!(profile = %profile.name, %gas_ratio, "gas critical gate");
        return Ok(FqiScore {
            fqi: 0,
            status: FreshnessStatus::SpoiledGas,
            gate: ScoreGate::GasCritical,
            reason: format!(
                "gas {} >= critical {} -> {}",
                sample.gas,
                profile.gas_critical,
                FreshnessStatus::SpoiledGas
            ),
        });
    }
    if gas_ratio >= GAS_WARNING_RATIO {
        debug!(profile = %profile.name, %gas_ratio, "gas warning gate");
        return Ok(FqiScore {
            fqi: GAS_WARNING_FQI,
            status: FreshnessStatus::StartingToSpoil,
            gate: ScoreGate::GasWarning,
            reason: format!(
                "gas {} is {} of critical {} (>= {}) -> {}",
                sample.gas,
                gas_ratio.round_dp(2),
                profile.gas_critical,
                GAS_WARNING_RATIO,
                FreshnessStatus::StartingToSpoil
            ),
        });
    }

    if sample.temperature >= profile.temp_critical {
        debug!(profile = %profile.name, temperature = %sample.temperature, "heat gate");
        return Ok(FqiScore {
            fqi: HEAT_DAMAGE_FQI,
            status: FreshnessStatus::DamagedHeat,
            gate: ScoreGate::Heat,
            reason: format!(
                "temperature {} >= critical {} -> {}",
                sample.temperature,
                profile.temp_critical,
                FreshnessStatus::DamagedHeat
            ),
        });
    }

    Ok(composite_score(sample, profile))
}

/// Weighted score used when no gate fired.
///
/// `gas_critical` has already been checked to sit above the baseline.
fn composite_score(sample: &Sample, profile: &ThresholdProfile) -> FqiScore {
    // gas < gas_critical here, so only readings far below the baseline can
    // overflow; those carry no risk
    let risk = sample
        .gas
        .checked_sub(GAS_BASELINE)
        .and_then(|excess| excess.checked_div(profile.gas_critical - GAS_BASELINE))
        .unwrap_or(Decimal::ZERO)
        .clamp(Decimal::ZERO, Decimal::ONE);
    let penalty = if sample.humidity > HUMIDITY_LIMIT {
        HUMIDITY_PENALTY
    } else {
        Decimal::ZERO
    };

    let raw = (Decimal::ONE_HUNDRED - risk * Decimal::ONE_HUNDRED - penalty).max(Decimal::ZERO);
    let mut fqi = raw.trunc().to_u8().unwrap_or(0);

    let status = if raw <= Decimal::from(SPOILED_MAX_FQI) {
        FreshnessStatus::Spoiled
    } else if raw < FRESH_MIN_SCORE {
        // the integer part of a score just above 50 must not read as spoiled
        fqi = fqi.max(SPOILED_MAX_FQI + 1);
        FreshnessStatus::StartingToSpoil
    } else {
        FreshnessStatus::Fresh
    };

    debug!(profile = %profile.name, %risk, %penalty, fqi, "composite score");

    let penalty_note = if penalty.is_zero() {
        String::new()
    } else {
        format!(", humidity {} > {} (-{})", sample.humidity, HUMIDITY_LIMIT, penalty)
    };

    FqiScore {
        fqi,
        status,
        gate: ScoreGate::Composite,
        reason: format!(
            "gas risk {}%{} -> score {} -> {}",
            (risk * Decimal::ONE_HUNDRED).round_dp(1).normalize(),
            penalty_note,
            fqi,
            status
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn roti() -> ThresholdProfile {
        ThresholdProfile::new("Roti", dec!(300), dec!(30))
    }

    fn sample(gas: Decimal, temp: Decimal, hum: Decimal) -> Sample {
        Sample::new(gas, temp, hum)
    }

    #[test]
    fn test_fresh_bread() {
        let s = sample(dec!(100), dec!(25), dec!(50)).with_color(200, 100, 80);
        let score = calculate_fqi(&s, &roti()).unwrap();
        assert_eq!(score.fqi, 80);
        assert_eq!(score.status, FreshnessStatus::Fresh);
        assert_eq!(score.gate, ScoreGate::Composite);
    }

    #[test]
    fn test_visual_gate_overrides_everything() {
        let s = sample(dec!(1000), dec!(90), dec!(99)).with_color(100, 130, 80);
        let score = calculate_fqi(&s, &roti()).unwrap();
        assert_eq!(score.fqi, 0);
        assert_eq!(score.status, FreshnessStatus::SpoiledVisual);
        assert!(score.reason.contains("Roti"));
    }

    #[test]
    fn test_gas_ratio_exactly_one_is_spoiled() {
        let score = calculate_fqi(&sample(dec!(300), dec!(20), dec!(50)), &roti()).unwrap();
        assert_eq!((score.fqi, score.status), (0, FreshnessStatus::SpoiledGas));
    }

    #[test]
    fn test_gas_warning_band() {
        // 240 / 300 = 0.8
        let score = calculate_fqi(&sample(dec!(240), dec!(40), dec!(95)), &roti()).unwrap();
        assert_eq!((score.fqi, score.status), (55, FreshnessStatus::StartingToSpoil));
        assert_eq!(score.gate, ScoreGate::GasWarning);
    }

    #[test]
    fn test_heat_gate() {
        let score = calculate_fqi(&sample(dec!(60), dec!(30), dec!(50)), &roti()).unwrap();
        assert_eq!((score.fqi, score.status), (52, FreshnessStatus::DamagedHeat));
    }

    #[test]
    fn test_gas_below_baseline_is_full_score() {
        let score = calculate_fqi(&sample(dec!(20), dec!(20), dec!(50)), &roti()).unwrap();
        assert_eq!((score.fqi, score.status), (100, FreshnessStatus::Fresh));
    }

    #[test]
    fn test_extreme_negative_gas_is_full_score() {
        let score = calculate_fqi(&sample(Decimal::MIN, dec!(20), dec!(50)), &roti()).unwrap();
        assert_eq!((score.fqi, score.status), (100, FreshnessStatus::Fresh));

        // tiny span: the quotient itself would overflow
        let narrow = ThresholdProfile::new("Roti", dec!(50.0001), dec!(30));
        let gas = dec!(-10000000000000000000000000);
        let score = calculate_fqi(&sample(gas, dec!(20), dec!(50)), &narrow).unwrap();
        assert_eq!(score.fqi, 100);
    }

    #[test]
    fn test_humidity_penalty_applies_above_90_only() {
        let at_limit = calculate_fqi(&sample(dec!(50), dec!(20), dec!(90)), &roti()).unwrap();
        assert_eq!(at_limit.fqi, 100);
        let above = calculate_fqi(&sample(dec!(50), dec!(20), dec!(90.1)), &roti()).unwrap();
        assert_eq!(above.fqi, 85);
        assert!(above.reason.contains("humidity"));
    }

    #[test]
    fn test_starting_to_spoil_band() {
        // risk (150-50)/250 = 0.4 -> 60
        let score = calculate_fqi(&sample(dec!(150), dec!(20), dec!(50)), &roti()).unwrap();
        assert_eq!((score.fqi, score.status), (60, FreshnessStatus::StartingToSpoil));
    }

    #[test]
    fn test_score_at_50_is_spoiled() {
        // risk (175-50)/250 = 0.5 -> 50
        let score = calculate_fqi(&sample(dec!(175), dec!(20), dec!(50)), &roti()).unwrap();
        assert_eq!((score.fqi, score.status), (50, FreshnessStatus::Spoiled));
    }

    #[test]
    fn test_score_just_above_50_reports_51() {
        // risk (173.75-50)/250 = 0.495 -> 50.5
        let score = calculate_fqi(&sample(dec!(173.75), dec!(20), dec!(50)), &roti()).unwrap();
        assert_eq!((score.fqi, score.status), (51, FreshnessStatus::StartingToSpoil));
    }

    #[test]
    fn test_fractional_score_truncates() {
        // risk (101-50)/250 = 0.204 -> 79.6
        let score = calculate_fqi(&sample(dec!(101), dec!(20), dec!(50)), &roti()).unwrap();
        assert_eq!((score.fqi, score.status), (79, FreshnessStatus::Fresh));
    }

    #[test]
    fn test_humid_high_risk_is_spoiled() {
        let p = ThresholdProfile::new("Roti", dec!(1000), dec!(30));
        let score = calculate_fqi(&sample(dec!(790), dec!(20), dec!(95)), &p).unwrap();
        // risk (790-50)/950 = 0.7789.. -> 100 - 77.89 - 15 = 7.1
        assert_eq!((score.fqi, score.status), (7, FreshnessStatus::Spoiled));
    }

    #[test]
    fn test_invalid_profile_fails_fast() {
        let p = ThresholdProfile::new("Roti", dec!(50), dec!(30));
        let s = sample(dec!(10), dec!(20), dec!(50));
        assert!(matches!(calculate_fqi(&s, &p), Err(FqiError::InvalidProfile(_))));
    }
}
