use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One telemetry reading from a food-storage monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Gas sensor reading (MQ-135, ppm-like).
    pub gas: Decimal,
    /// Temperature in °C.
    pub temperature: Decimal,
    /// Relative humidity in %.
    pub humidity: Decimal,
    #[serde(default)]
    pub r: i32,
    #[serde(default)]
    pub g: i32,
    #[serde(default)]
    pub b: i32,
}

impl Sample {
    /// A sample with a dark color window (all channels 0).
    pub fn new(gas: Decimal, temperature: Decimal, humidity: Decimal) -> Self {
        Self {
            gas,
            temperature,
            humidity,
            r: 0,
            g: 0,
            b: 0,
        }
    }

    pub fn with_color(mut self, r: i32, g: i32, b: i32) -> Self {
        self.r = r;
        self.g = g;
        self.b = b;
        self
    }

    pub fn color(&self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Raw color sensor channels. Values are not range-checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Rgb {
    pub fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// Mean of the three channels.
    pub fn brightness(&self) -> Decimal {
        let sum = i64::from(self.r) + i64::from(self.g) + i64::from(self.b);
        Decimal::from(sum) / Decimal::from(3)
    }

    /// How far the green channel sits above red.
    pub fn green_shift(&self) -> i64 {
        i64::from(self.g) - i64::from(self.r)
    }

    /// How far the blue channel sits above red.
    pub fn blue_shift(&self) -> i64 {
        i64::from(self.b) - i64::from(self.r)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Freshness label attached to every score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreshnessStatus {
    #[serde(rename = "Fresh")]
    Fresh,
    #[serde(rename = "Starting to Spoil")]
    StartingToSpoil,
    #[serde(rename = "Spoiled")]
    Spoiled,
    #[serde(rename = "Spoiled (Visual)")]
    SpoiledVisual,
    #[serde(rename = "Spoiled (Gas)")]
    SpoiledGas,
    #[serde(rename = "Damaged (Heat)")]
    DamagedHeat,
}

impl FreshnessStatus {
    pub const ALL: [FreshnessStatus; 6] = [
        FreshnessStatus::Fresh,
        FreshnessStatus::StartingToSpoil,
        FreshnessStatus::Spoiled,
        FreshnessStatus::SpoiledVisual,
        FreshnessStatus::SpoiledGas,
        FreshnessStatus::DamagedHeat,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FreshnessStatus::Fresh => "Fresh",
            FreshnessStatus::StartingToSpoil => "Starting to Spoil",
            FreshnessStatus::Spoiled => "Spoiled",
            FreshnessStatus::SpoiledVisual => "Spoiled (Visual)",
            FreshnessStatus::SpoiledGas => "Spoiled (Gas)",
            FreshnessStatus::DamagedHeat => "Damaged (Heat)",
        }
    }

    /// True for the labels that report the food as no longer edible.
    pub fn is_spoiled(&self) -> bool {
        matches!(
            self,
            FreshnessStatus::Spoiled | FreshnessStatus::SpoiledVisual | FreshnessStatus::SpoiledGas
        )
    }
}

impl fmt::Display for FreshnessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
