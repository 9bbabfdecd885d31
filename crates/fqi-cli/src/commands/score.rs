use fqi_core::error::FqiError;
use fqi_core::model::Sample;
use fqi_core::profiles::builtin;
use std::path::Path;

use crate::output;

pub fn run(
    profile_name: &str,
    profiles_file: Option<&Path>,
    sample: &Sample,
    output_format: &str,
) -> Result<(), FqiError> {
    let catalog = super::catalog(profiles_file)?;
    let profile = builtin::lookup(&catalog, profile_name)?;

    let result = fqi_core::score_sample(sample, &profile)?;

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print_result(&profile, sample, &result),
    }

    Ok(())
}
