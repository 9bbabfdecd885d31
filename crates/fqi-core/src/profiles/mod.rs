pub mod builtin;
pub mod schema;

use crate::error::FqiError;
use schema::{ProfileCatalog, ThresholdProfile, GAS_BASELINE};
use std::collections::HashSet;
use std::path::Path;

/// Load a profile catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<ProfileCatalog, FqiError> {
    let content = std::fs::read_to_string(path).map_err(|e| FqiError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_catalog(&content, path)
}

/// Parse a profile catalog from a JSON string.
pub fn parse_catalog(json: &str, source: &Path) -> Result<ProfileCatalog, FqiError> {
    let catalog: ProfileCatalog =
        serde_json::from_str(json).map_err(|e| FqiError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Parse a profile catalog from a JSON string (no file path context).
pub fn parse_catalog_str(json: &str) -> Result<ProfileCatalog, FqiError> {
    let catalog: ProfileCatalog = serde_json::from_str(json).map_err(FqiError::Json)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Check that a single profile can be scored against.
///
/// The composite score divides by `gas_critical - 50`, so anything at or
/// below the odor-free baseline is rejected.
pub fn validate_profile(profile: &ThresholdProfile) -> Result<(), FqiError> {
    if profile.name.trim().is_empty() {
        return Err(FqiError::InvalidProfile(
            "profile name must not be empty".into(),
        ));
    }

    if profile.gas_critical <= GAS_BASELINE {
        return Err(FqiError::InvalidProfile(format!(
            "profile '{}' has gas_critical {} (must be greater than {})",
            profile.name, profile.gas_critical, GAS_BASELINE
        )));
    }

    Ok(())
}

/// Validate that a catalog is well-formed.
pub fn validate_catalog(catalog: &ProfileCatalog) -> Result<(), FqiError> {
    if catalog.profiles.is_empty() {
        return Err(FqiError::InvalidProfile(
            "profiles must not be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    for profile in &catalog.profiles {
        validate_profile(profile)?;
        if !seen.insert(profile.name.to_lowercase()) {
            return Err(FqiError::InvalidProfile(format!(
                "duplicate profile name '{}'",
                profile.name
            )));
        }
    }

    Ok(())
}
