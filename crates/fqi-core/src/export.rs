use crate::error::FqiError;
use crate::registry::StoredReading;
use std::io::Write;

pub const CSV_HEADER: [&str; 8] = [
    "Timestamp",
    "Device ID",
    "Food",
    "Gas",
    "Temp",
    "FQI",
    "Status",
    "Estimate",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Suggested download name for a device's report.
pub fn csv_file_name(device_id: &str) -> String {
    format!("report_{device_id}.csv")
}

/// Write readings as CSV, one row per reading in the order given.
pub fn write_csv<W: Write>(readings: &[StoredReading], writer: W) -> Result<(), FqiError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for r in readings {
        csv_writer.write_record([
            r.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            r.device_id.clone(),
            r.food_name.clone(),
            r.sample.gas.to_string(),
            r.sample.temperature.to_string(),
            r.result.fqi.to_string(),
            r.result.status.to_string(),
            r.result.estimated_life.clone(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Render readings as a CSV string.
pub fn to_csv_string(readings: &[StoredReading]) -> Result<String, FqiError> {
    let mut buf = Vec::new();
    write_csv(readings, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
