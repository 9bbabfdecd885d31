pub mod category;
pub mod error;
pub mod export;
pub mod model;
pub mod profiles;
pub mod registry;
pub mod score;

use error::FqiError;
use model::Sample;
use profiles::schema::ThresholdProfile;
use score::outcome::ScoringResult;

/// Main API entry point: score one sample against a food profile.
///
/// Runs the FQI calculator (mold, gas, heat and composite gates) and feeds
/// its score and the sample temperature into the remaining-life estimator.
/// Fails only when the profile itself is invalid.
pub fn score_sample(
    sample: &Sample,
    profile: &ThresholdProfile,
) -> Result<ScoringResult, FqiError> {
    let score = score::calculate_fqi(sample, profile)?;
    let estimated_life =
        score::estimate_remaining_life(score.fqi, sample.temperature, profile);

    Ok(ScoringResult {
        fqi: score.fqi,
        status: score.status,
        estimated_life,
        gate: score.gate,
        reason: score.reason,
    })
}
