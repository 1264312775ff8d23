//! Aggregated track summary model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Summary of one tracked object across the whole video.
///
/// Built once by the track aggregator from every frame the track appears in;
/// never mutated afterward. The class label is the one recorded at the
/// track's first observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Track {
    /// Object class label
    pub class: String,

    /// Timestamp of the first frame the track appears in (seconds)
    pub first_appearance: f64,

    /// Timestamp of the last frame the track appears in (seconds)
    pub last_appearance: f64,

    /// last_appearance - first_appearance, in seconds
    pub duration: f64,

    /// Number of qualifying detections across all frames
    pub total_frames: u64,

    /// Arithmetic mean of the per-frame confidences
    pub avg_confidence: f64,
}

impl Track {
    /// Create a track summary, deriving the duration.
    pub fn new(
        class: impl Into<String>,
        first_appearance: f64,
        last_appearance: f64,
        total_frames: u64,
        avg_confidence: f64,
    ) -> Self {
        Self {
            class: class.into(),
            first_appearance,
            last_appearance,
            duration: last_appearance - first_appearance,
            total_frames,
            avg_confidence,
        }
    }
}
