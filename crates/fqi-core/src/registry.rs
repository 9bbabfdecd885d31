//! In-memory device registry: the ingestion path between device payloads and
//! the scoring engine.
//!
//! Devices register themselves on first contact and get the registry's
//! default profile. Every accepted payload is scored against the device's
//! current profile and kept as a [`StoredReading`].

use crate::error::FqiError;
use crate::model::Sample;
use crate::profiles::schema::ThresholdProfile;
use crate::profiles::validate_profile;
use crate::score::outcome::ScoringResult;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Name given to devices registered on first contact.
pub const NEW_DEVICE_NAME: &str = "New Device";

/// Default number of readings returned by [`DeviceRegistry::history`].
pub const HISTORY_LIMIT: usize = 50;

/// JSON body posted by a monitoring device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicePayload {
    pub device_id: String,
    /// Gas sensor reading.
    pub mq135: Decimal,
    pub temp: Decimal,
    pub humidity: Decimal,
    #[serde(default)]
    pub r: i32,
    #[serde(default)]
    pub g: i32,
    #[serde(default)]
    pub b: i32,
}

impl DevicePayload {
    pub fn sample(&self) -> Sample {
        Sample::new(self.mq135, self.temp, self.humidity).with_color(self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub device_id: String,
    pub name: String,
    pub is_active: bool,
    pub profile: ThresholdProfile,
}

/// A scored sample as kept by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredReading {
    pub device_id: String,
    pub timestamp: DateTime<Utc>,
    /// Profile name at the time of scoring.
    pub food_name: String,
    pub sample: Sample,
    pub result: ScoringResult,
}

/// Power command returned to the device with every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceCommand {
    On,
    Off,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// The payload was scored and stored.
    Saved(ScoringResult),
    /// The device is switched off; nothing was scored.
    Offline,
}

/// Wire response sent back to the device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub message: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fqi: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub est_time: Option<String>,
    pub command: DeviceCommand,
}

impl IngestOutcome {
    pub fn command(&self) -> DeviceCommand {
        match self {
            IngestOutcome::Saved(_) => DeviceCommand::On,
            IngestOutcome::Offline => DeviceCommand::Off,
        }
    }

    pub fn response(&self) -> IngestResponse {
        match self {
            IngestOutcome::Saved(result) => IngestResponse {
                message: "Saved".into(),
                status: result.status.to_string(),
                fqi: Some(result.fqi),
                est_time: Some(result.estimated_life.clone()),
                command: self.command(),
            },
            IngestOutcome::Offline => IngestResponse {
                message: "Device OFF".into(),
                status: "OFFLINE".into(),
                fqi: None,
                est_time: None,
                command: self.command(),
            },
        }
    }
}

/// Devices and their reading history.
///
/// Mutating operations take `&mut self`; share the registry behind a lock
/// if several writers exist.
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    default_profile: ThresholdProfile,
    devices: BTreeMap<String, Device>,
    readings: BTreeMap<String, Vec<StoredReading>>,
}

impl DeviceRegistry {
    /// Create a registry that assigns `default_profile` to new devices.
    pub fn new(default_profile: ThresholdProfile) -> Result<Self, FqiError> {
        validate_profile(&default_profile)?;
        Ok(Self {
            default_profile,
            devices: BTreeMap::new(),
            readings: BTreeMap::new(),
        })
    }

    pub fn default_profile(&self) -> &ThresholdProfile {
        &self.default_profile
    }

    /// Return the device, registering it with the default profile if unseen.
    pub fn register(&mut self, device_id: &str) -> Result<&Device, FqiError> {
        if device_id.trim().is_empty() {
            return Err(FqiError::InvalidPayload("device_id must not be empty".into()));
        }

        let default_profile = &self.default_profile;
        let device = self.devices.entry(device_id.to_string()).or_insert_with(|| {
            info!(device_id, profile = %default_profile.name, "registered new device");
            Device {
                device_id: device_id.to_string(),
                name: NEW_DEVICE_NAME.to_string(),
                is_active: true,
                profile: default_profile.clone(),
            }
        });
        Ok(device)
    }

    /// Score and store one payload received at `received_at`.
    pub fn ingest(
        &mut self,
        payload: &DevicePayload,
        received_at: DateTime<Utc>,
    ) -> Result<IngestOutcome, FqiError> {
        let device = self.register(&payload.device_id)?;
        if !device.is_active {
            warn!(device_id = %payload.device_id, "reading from deactivated device ignored");
            return Ok(IngestOutcome::Offline);
        }

        let sample = payload.sample();
        let result = crate::score_sample(&sample, &device.profile)?;
        let reading = StoredReading {
            device_id: payload.device_id.clone(),
            timestamp: received_at,
            food_name: device.profile.name.clone(),
            sample,
            result: result.clone(),
        };

        let history = self.readings.entry(payload.device_id.clone()).or_default();
        let at = history.partition_point(|r| r.timestamp <= received_at);
        history.insert(at, reading);

        Ok(IngestOutcome::Saved(result))
    }

    pub fn device(&self, device_id: &str) -> Option<&Device> {
        self.devices.get(device_id)
    }

    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    /// Assign a new profile; later readings are scored against it.
    pub fn set_profile(
        &mut self,
        device_id: &str,
        profile: ThresholdProfile,
    ) -> Result<(), FqiError> {
        validate_profile(&profile)?;
        let device = self
            .devices
            .get_mut(device_id)
            .ok_or_else(|| FqiError::UnknownDevice(device_id.to_string()))?;
        info!(device_id, from = %device.profile.name, to = %profile.name, "device profile changed");
        device.profile = profile;
        Ok(())
    }

    /// Flip the device's active flag and return the new state.
    pub fn toggle(&mut self, device_id: &str) -> Result<bool, FqiError> {
        let device = self
            .devices
            .get_mut(device_id)
            .ok_or_else(|| FqiError::UnknownDevice(device_id.to_string()))?;
        device.is_active = !device.is_active;
        info!(device_id, is_active = device.is_active, "device toggled");
        Ok(device.is_active)
    }

    /// Most recent reading for a device.
    pub fn latest(&self, device_id: &str) -> Option<&StoredReading> {
        self.readings.get(device_id).and_then(|r| r.last())
    }

    /// Up to `limit` readings, newest first.
    pub fn history(&self, device_id: &str, limit: usize) -> Vec<&StoredReading> {
        self.readings(device_id).iter().rev().take(limit).collect()
    }

    /// All readings for a device, oldest first.
    pub fn readings(&self, device_id: &str) -> &[StoredReading] {
        self.readings
            .get(device_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
