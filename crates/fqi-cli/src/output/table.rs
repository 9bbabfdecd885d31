use fqi_core::model::Sample;
use fqi_core::profiles::schema::ThresholdProfile;
use fqi_core::registry::{Device, StoredReading};
use fqi_core::score::ScoringResult;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn print_result(profile: &ThresholdProfile, sample: &Sample, result: &ScoringResult) {
    println!("=== {} ===\n", profile.name);

    println!(
        "  Reading:   gas {}  temp {} °C  humidity {} %  {}",
        sample.gas,
        sample.temperature,
        sample.humidity,
        sample.color()
    );
    println!(
        "  Limits:    gas {}  temp {} °C\n",
        profile.gas_critical, profile.temp_critical
    );

    println!("  FQI:       {}", result.fqi);
    println!("  Status:    {}", result.status);
    println!("  Remaining: {}", result.estimated_life);
    println!("\n  {}", result.reason);
}

/// Readings are printed in the order given (newest first from the registry).
pub fn print_history(device: &Device, readings: &[&StoredReading]) {
    let state = if device.is_active { "on" } else { "off" };
    println!(
        "=== {} ({}, {}), profile {} ===\n",
        device.device_id, device.name, state, device.profile.name
    );

    if readings.is_empty() {
        println!("  No readings.");
        return;
    }

    let max_status = readings
        .iter()
        .map(|r| r.result.status.label().len())
        .max()
        .unwrap_or(6);

    println!(
        "  {:<19}  {:>8}  {:>6}  {:>3}  {:<width$}  Remaining",
        "Timestamp",
        "Gas",
        "Temp",
        "FQI",
        "Status",
        width = max_status
    );
    println!("  {}", "-".repeat(19 + 2 + 8 + 2 + 6 + 2 + 3 + 2 + max_status + 2 + 18));

    for r in readings {
        println!(
            "  {:<19}  {:>8}  {:>6}  {:>3}  {:<width$}  {}",
            r.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            r.sample.gas,
            r.sample.temperature,
            r.result.fqi,
            r.result.status.label(),
            r.result.estimated_life,
            width = max_status
        );
    }
}
