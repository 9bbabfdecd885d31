pub mod profiles;
pub mod replay;
pub mod score;

use fqi_core::error::FqiError;
use fqi_core::profiles::builtin;
use fqi_core::profiles::schema::ProfileCatalog;
use std::path::Path;

/// Custom catalog when a path is given, built-in profiles otherwise.
fn catalog(path: Option<&Path>) -> Result<ProfileCatalog, FqiError> {
    match path {
        Some(p) => fqi_core::profiles::load_catalog(p),
        None => builtin::builtin_catalog(),
    }
}
