use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TrackerError {
    #[error("a hand has {expected} landmarks, detector returned {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("hand detector unavailable: {0}")]
    DetectorUnavailable(String),
}
