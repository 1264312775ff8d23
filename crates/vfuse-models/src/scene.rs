//! Scene models.
//!
//! A [`SceneObservation`] is what the external frame describer hands us for
//! each scene interval: the frame span, a best-scoring natural-language
//! label, and the full ranked label distribution. A [`Scene`] is the
//! time-normalized form stored in the canonical record.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timebase::to_timestamp;

/// One label/score pair from the describer's ranked output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DescriptionScore {
    /// Natural-language label
    pub label: String,

    /// Describer score (0.0-1.0)
    pub score: f64,
}

/// A scene interval as supplied by the external describer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SceneObservation {
    /// Scene number (1-based, sequential)
    pub scene_number: u32,

    /// First frame index of the scene
    pub start_frame: u64,

    /// Last frame index of the scene (inclusive)
    pub end_frame: u64,

    /// Best-scoring natural-language label
    pub description: String,

    /// Score of the best label (0.0-1.0)
    pub confidence: f64,

    /// Index of the key frame the description was computed from
    pub key_frame_index: u64,

    /// Reference to the key frame image
    pub key_frame_path: String,

    /// Full ranked label distribution, descending by score (inspection only)
    #[serde(default)]
    pub all_descriptions: Vec<DescriptionScore>,
}

/// A scene interval normalized onto the shared time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    /// Scene number (1-based, sequential)
    pub scene_number: u32,

    /// First frame index of the scene
    pub start_frame: u64,

    /// Last frame index of the scene (inclusive)
    pub end_frame: u64,

    /// Start timestamp in seconds
    pub start_time: f64,

    /// End timestamp in seconds
    pub end_time: f64,

    /// Best-scoring natural-language label
    pub description: String,

    /// Score of the best label (0.0-1.0)
    pub confidence: f64,

    /// Index of the key frame the description was computed from
    pub key_frame_index: u64,

    /// Reference to the key frame image
    pub key_frame_path: String,

    /// Full ranked label distribution, descending by score (inspection only)
    #[serde(default)]
    pub all_descriptions: Vec<DescriptionScore>,
}

impl Scene {
    /// Normalize a describer observation onto the time axis.
    pub fn from_observation(obs: &SceneObservation, fps: f64) -> Self {
        Self {
            scene_number: obs.scene_number,
            start_frame: obs.start_frame,
            end_frame: obs.end_frame,
            start_time: to_timestamp(obs.start_frame, fps),
            end_time: to_timestamp(obs.end_frame, fps),
            description: obs.description.clone(),
            confidence: obs.confidence,
            key_frame_index: obs.key_frame_index,
            key_frame_path: obs.key_frame_path.clone(),
            all_descriptions: obs.all_descriptions.clone(),
        }
    }

    /// Midpoint of the scene on the time axis (used for centered labels).
    pub fn midpoint(&self) -> f64 {
        (self.start_time + self.end_time) / 2.0
    }
}
