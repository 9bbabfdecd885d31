use crate::error::FqiError;
use crate::profiles::schema::{ProfileCatalog, ThresholdProfile};

const FOOD_PROFILES_JSON: &str = include_str!("../../../../profiles/food-profiles.json");

/// Names of the built-in profiles, in seed order.
pub const PRESETS: &[&str] = &[
    "Nasi Putih",
    "Daging Sapi/Ayam",
    "Tahu",
    "Tempe",
    "Roti",
    "Sayuran Hijau",
    "Susu/Dairy",
];

/// The embedded default catalog.
pub fn builtin_catalog() -> Result<ProfileCatalog, FqiError> {
    super::parse_catalog_str(FOOD_PROFILES_JSON)
}

/// Load a built-in profile by name (case-insensitive).
pub fn load_preset(name: &str) -> Result<ThresholdProfile, FqiError> {
    let catalog = builtin_catalog()?;
    lookup(&catalog, name)
}

/// Profile assigned to devices seen for the first time.
pub fn default_profile() -> Result<ThresholdProfile, FqiError> {
    builtin_catalog()?
        .profiles
        .into_iter()
        .next()
        .ok_or_else(|| FqiError::InvalidProfile("built-in catalog is empty".into()))
}

/// Find a profile in a catalog or report which names are available.
pub fn lookup(catalog: &ProfileCatalog, name: &str) -> Result<ThresholdProfile, FqiError> {
    catalog
        .find(name)
        .cloned()
        .ok_or_else(|| FqiError::UnknownProfile {
            name: name.to_string(),
            available: catalog.names().join(", "),
        })
}
