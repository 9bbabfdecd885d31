//! Integration tests for the score_sample() pipeline and the device
//! registry, driven through the public API with the built-in profiles.

use chrono::{Duration, TimeZone, Utc};
use fqi_core::error::FqiError;
use fqi_core::export;
use fqi_core::model::{FreshnessStatus, Sample};
use fqi_core::profiles::builtin::{default_profile, load_preset};
use fqi_core::profiles::schema::ThresholdProfile;
use fqi_core::registry::{DeviceCommand, DevicePayload, DeviceRegistry, IngestOutcome};
use fqi_core::score::ScoreGate;
use fqi_core::score_sample;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Scenario 1: fresh bread, composite score
// ---------------------------------------------------------------------------
#[test]
fn fresh_bread_scores_80_with_ten_hours_left() {
    let roti = load_preset("Roti").unwrap();
    let sample = Sample::new(dec!(100), dec!(25), dec!(50)).with_color(200, 100, 80);

    let result = score_sample(&sample, &roti).unwrap();

    // risk (100-50)/(300-50) = 0.2 -> 80; decay 2 + 1 (bread) -> 30/3 h
    assert_eq!(result.fqi, 80);
    assert_eq!(result.status, FreshnessStatus::Fresh);
    assert_eq!(result.estimated_life, "± 10.0 hours");
    assert_eq!(result.gate, ScoreGate::Composite);
}

// ---------------------------------------------------------------------------
// Scenario 2: green tint on bread triggers the visual gate
// ---------------------------------------------------------------------------
#[test]
fn green_bread_is_visually_spoiled() {
    let roti = load_preset("Roti").unwrap();
    let sample = Sample::new(dec!(100), dec!(25), dec!(50)).with_color(100, 130, 80);

    let result = score_sample(&sample, &roti).unwrap();

    assert_eq!(result.fqi, 0);
    assert_eq!(result.status, FreshnessStatus::SpoiledVisual);
    assert_eq!(result.estimated_life, "0 hours (spoiled)");
}

// ---------------------------------------------------------------------------
// Scenario 3: dark frame, gas over the meat limit
// ---------------------------------------------------------------------------
#[test]
fn meat_over_gas_limit_is_spoiled_by_gas() {
    let daging = load_preset("Daging Sapi/Ayam").unwrap();
    let sample = Sample::new(dec!(850), dec!(28), dec!(60));

    let result = score_sample(&sample, &daging).unwrap();

    assert_eq!(result.fqi, 0);
    assert_eq!(result.status, FreshnessStatus::SpoiledGas);
    assert_eq!(result.estimated_life, "0 hours (spoiled)");
}

// ---------------------------------------------------------------------------
// Scenario 4: tofu in the gas warning band, warm and humid
// ---------------------------------------------------------------------------
#[test]
fn warm_tofu_in_warning_band_has_minutes_left() {
    let tahu = load_preset("Tahu").unwrap();
    let sample = Sample::new(dec!(310), dec!(29), dec!(95));

    let result = score_sample(&sample, &tahu).unwrap();

    // 310/350 = 0.886; decay 8 + 10 (tofu) -> 5/18 h = 16.67 min
    assert_eq!(result.fqi, 55);
    assert_eq!(result.status, FreshnessStatus::StartingToSpoil);
    assert_eq!(result.estimated_life, "± 16 minutes");
}

// ---------------------------------------------------------------------------
// Heat damage keeps a short remaining life
// ---------------------------------------------------------------------------
#[test]
fn hot_milk_is_heat_damaged() {
    let susu = load_preset("Susu/Dairy").unwrap();
    let sample = Sample::new(dec!(100), dec!(21), dec!(50));

    let result = score_sample(&sample, &susu).unwrap();

    // 2 points / (20 + 8) h = 4.28 min
    assert_eq!(result.fqi, 52);
    assert_eq!(result.status, FreshnessStatus::DamagedHeat);
    assert_eq!(result.estimated_life, "± 4 minutes");
}

// ---------------------------------------------------------------------------
// Invalid profile fails before scoring
// ---------------------------------------------------------------------------
#[test]
fn profile_at_gas_baseline_is_rejected() {
    let bad = ThresholdProfile::new("Roti", dec!(50), dec!(30));
    let sample = Sample::new(dec!(100), dec!(25), dec!(50));

    assert!(matches!(
        score_sample(&sample, &bad),
        Err(FqiError::InvalidProfile(_))
    ));
}

// ---------------------------------------------------------------------------
// Unknown category: no mold rule, no decay bonus
// ---------------------------------------------------------------------------
#[test]
fn unknown_food_uses_neutral_rules() {
    let keju = ThresholdProfile::new("Keju", dec!(300), dec!(30));
    let sample = Sample::new(dec!(50), dec!(10), dec!(50)).with_color(10, 250, 250);

    let result = score_sample(&sample, &keju).unwrap();

    // no mold, full score, 50 points / 2
    assert_eq!(result.fqi, 100);
    assert_eq!(result.status, FreshnessStatus::Fresh);
    assert_eq!(result.estimated_life, "± 25.0 hours");
}

// ---------------------------------------------------------------------------
// Registry: a simulated device drifting towards spoilage, then exported
// ---------------------------------------------------------------------------
#[test]
fn simulated_device_history_and_export() {
    let mut registry = DeviceRegistry::new(default_profile().unwrap()).unwrap();
    let start = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

    // rice profile: gas_critical 250, temp_critical 35
    let gas_levels = [90, 120, 190, 205, 260];
    for (i, gas) in gas_levels.iter().enumerate() {
        let payload = DevicePayload {
            device_id: "ESP32_SIMULATOR".into(),
            mq135: Decimal::from(*gas),
            temp: dec!(28.0),
            humidity: dec!(60),
            r: 0,
            g: 0,
            b: 0,
        };
        let outcome = registry
            .ingest(&payload, start + Duration::seconds(3 * i as i64))
            .unwrap();
        assert_eq!(outcome.command(), DeviceCommand::On);
    }

    let statuses: Vec<FreshnessStatus> = registry
        .readings("ESP32_SIMULATOR")
        .iter()
        .map(|r| r.result.status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            FreshnessStatus::Fresh,           // risk 0.2 -> 80
            FreshnessStatus::StartingToSpoil, // risk 0.35 -> 65
            FreshnessStatus::Spoiled,         // risk 0.7 -> 30
            FreshnessStatus::StartingToSpoil, // ratio 0.82, warning gate
            FreshnessStatus::SpoiledGas,      // ratio 1.04
        ]
    );

    let latest = registry.latest("ESP32_SIMULATOR").unwrap();
    assert_eq!(latest.result.fqi, 0);
    assert_eq!(latest.food_name, "Nasi Putih");

    let csv = export::to_csv_string(registry.readings("ESP32_SIMULATOR")).unwrap();
    assert_eq!(csv.lines().count(), 1 + gas_levels.len());
    assert!(csv.lines().nth(1).unwrap().starts_with("2025-03-01 12:00:00,ESP32_SIMULATOR,Nasi Putih,90,"));
}

// ---------------------------------------------------------------------------
// Registry: switching a device off stops scoring
// ---------------------------------------------------------------------------
#[test]
fn switched_off_device_gets_off_command() {
    let mut registry = DeviceRegistry::new(default_profile().unwrap()).unwrap();
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let payload: DevicePayload = serde_json::from_str(
        r#"{"device_id": "ESP32_REAL_01", "mq135": 130, "temp": 27.4, "humidity": 71.2,
            "r": 210, "g": 205, "b": 198}"#,
    )
    .unwrap();

    registry.ingest(&payload, now).unwrap();
    registry.toggle("ESP32_REAL_01").unwrap();
    let outcome = registry.ingest(&payload, now + Duration::seconds(5)).unwrap();

    assert_eq!(outcome, IngestOutcome::Offline);
    let body = serde_json::to_value(outcome.response()).unwrap();
    assert_eq!(body["command"], "OFF");
    assert_eq!(body["status"], "OFFLINE");
    assert_eq!(registry.readings("ESP32_REAL_01").len(), 1);
}

// ---------------------------------------------------------------------------
// Out-of-range gas readings are scored, not rejected
// ---------------------------------------------------------------------------
#[test]
fn extreme_negative_gas_reading_is_scored() {
    let roti = load_preset("Roti").unwrap();
    let result = score_sample(&Sample::new(Decimal::MIN, dec!(20), dec!(50)), &roti).unwrap();
    assert_eq!(result.fqi, 100);
    assert_eq!(result.status, FreshnessStatus::Fresh);

    let mut registry = DeviceRegistry::new(default_profile().unwrap()).unwrap();
    let payload: DevicePayload = serde_json::from_str(
        r#"{"device_id": "ESP32_REAL_01", "mq135": "-79228162514264337593543950335",
            "temp": 20, "humidity": 50}"#,
    )
    .unwrap();
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    match registry.ingest(&payload, now).unwrap() {
        IngestOutcome::Saved(result) => assert_eq!(result.fqi, 100),
        other => panic!("expected Saved, got {other:?}"),
    }
}
