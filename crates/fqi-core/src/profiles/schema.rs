use crate::category::FoodCategory;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Gas reading treated as odor-free air.
pub const GAS_BASELINE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

fn default_gas_critical() -> Decimal {
    Decimal::from(300)
}

fn default_temp_critical() -> Decimal {
    Decimal::from(35)
}

/// Reference thresholds for one food category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdProfile {
    pub name: String,
    /// Gas reading at or above which the food counts as spoiled.
    #[serde(default = "default_gas_critical", alias = "mq135_crit")]
    pub gas_critical: Decimal,
    /// Temperature at or above which the food counts as heat-damaged.
    #[serde(default = "default_temp_critical", alias = "temp_crit")]
    pub temp_critical: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ThresholdProfile {
    pub fn new(name: impl Into<String>, gas_critical: Decimal, temp_critical: Decimal) -> Self {
        Self {
            name: name.into(),
            gas_critical,
            temp_critical,
            note: None,
        }
    }

    /// Categories recognized in the profile name, ignoring case.
    pub fn categories(&self) -> Vec<FoodCategory> {
        FoodCategory::all_in_name(&self.name)
    }
}

/// A named collection of threshold profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCatalog {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub profiles: Vec<ThresholdProfile>,
}

impl ProfileCatalog {
    /// Look up a profile by exact name, falling back to a case-insensitive match.
    pub fn find(&self, name: &str) -> Option<&ThresholdProfile> {
        let wanted = name.trim();
        self.profiles
            .iter()
            .find(|p| p.name == wanted)
            .or_else(|| {
                self.profiles
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(wanted))
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }
}
