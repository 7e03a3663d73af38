use crate::coordinate::Coordinate;
use std::time::Duration;
use thiserror::Error;

/// Why a selection produced no image.
///
/// Degraded detectors are not errors; they only widen score uncertainty.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("Could not resolve coordinates for {0:?}")]
    LookupFailure(String),

    #[error("Image search near {0} returned no candidates")]
    FetchFailure(Coordinate),

    #[error("None of the {0} fetched candidates survived filtering and scoring")]
    SelectionEmpty(usize),

    #[error("Selection exceeded its {0:?} budget")]
    TimedOut(Duration),
}
