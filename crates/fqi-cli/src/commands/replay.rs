use chrono::Utc;
use fqi_core::error::FqiError;
use fqi_core::export;
use fqi_core::profiles::builtin;
use fqi_core::registry::{
    Device, DevicePayload, DeviceRegistry, IngestOutcome, StoredReading, HISTORY_LIMIT,
};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::output;

#[derive(Serialize)]
struct DeviceReport<'a> {
    device: &'a Device,
    readings: &'a [StoredReading],
}

/// Where to write the CSV export: an explicit file, or the device's report
/// name when `report` is set.
pub fn csv_target(csv: Option<PathBuf>, report: bool, device: Option<&str>) -> Option<PathBuf> {
    match (csv, device) {
        (Some(path), _) => Some(path),
        (None, Some(id)) if report => Some(PathBuf::from(export::csv_file_name(id))),
        _ => None,
    }
}

pub fn run(
    input_file: &Path,
    profile_name: Option<&str>,
    profiles_file: Option<&Path>,
    device_filter: Option<&str>,
    csv_file: Option<&Path>,
    output_format: &str,
) -> Result<(), FqiError> {
    let catalog = super::catalog(profiles_file)?;
    let default_profile = match profile_name {
        Some(name) => builtin::lookup(&catalog, name)?,
        None => catalog
            .profiles
            .first()
            .cloned()
            .ok_or_else(|| FqiError::InvalidProfile("catalog has no profiles".into()))?,
    };

    let json_bytes = std::fs::read(input_file)?;
    let payloads: Vec<DevicePayload> = serde_json::from_slice(&json_bytes)?;

    let mut registry = DeviceRegistry::new(default_profile)?;
    let mut offline = 0usize;
    for payload in &payloads {
        if let IngestOutcome::Offline = registry.ingest(payload, Utc::now())? {
            offline += 1;
        }
    }
    info!(payloads = payloads.len(), offline, "replay finished");

    let device_ids: Vec<String> = match device_filter {
        Some(id) => {
            if registry.device(id).is_none() {
                return Err(FqiError::UnknownDevice(id.to_string()));
            }
            vec![id.to_string()]
        }
        None => registry.devices().map(|d| d.device_id.clone()).collect(),
    };

    let mut reports = Vec::new();
    for id in &device_ids {
        if let Some(device) = registry.device(id) {
            reports.push(DeviceReport {
                device,
                readings: registry.readings(id),
            });
        }
    }

    match output_format {
        "json" => output::json::print(&reports)?,
        _ => {
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                let recent = registry.history(&report.device.device_id, HISTORY_LIMIT);
                output::table::print_history(report.device, &recent);
            }
        }
    }

    if let Some(path) = csv_file {
        let readings: Vec<StoredReading> = reports
            .iter()
            .flat_map(|r| r.readings.iter().cloned())
            .collect();
        let file = File::create(path)?;
        export::write_csv(&readings, BufWriter::new(file))?;
        eprintln!("Wrote {} reading(s) to {}", readings.len(), path.display());
    }

    Ok(())
}
