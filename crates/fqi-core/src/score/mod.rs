pub mod fqi;
pub mod mold;
pub mod outcome;
pub mod shelf_life;

pub use fqi::calculate_fqi;
pub use mold::detect_mold;
pub use outcome::{FqiScore, ScoreGate, ScoringResult};
pub use shelf_life::{estimate_remaining_life, RemainingLife};
