use std::time::Duration;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DurationSecondsWithFrac;

/// A transcript is stored exactly as fetched: an ordered list of timed
/// segments, serialized as a bare JSON array.
pub type Transcript = Vec<Segment>;

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub start: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub duration: Duration,
}
