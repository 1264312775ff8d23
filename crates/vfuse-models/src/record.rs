//! The canonical analysis record.
//!
//! # Schema
//! ```json
//! {
//!   "video_metadata": {"fps": 30.0, "width": 1920, "height": 1080, ...},
//!   "audio": {"language": "en", "full_transcript": "...", "segments": [...]},
//!   "scenes": [{"scene_number": 1, "start_frame": 0, ...}],
//!   "frames": [{"frame_index": 0, "timestamp": 0.0, "detections": [...]}],
//!   "tracks": {"7": {"class": "person", "first_appearance": 0.2, ...}},
//!   "summary": {"brief": "...", "unique_objects": {"person": 2}, ...}
//! }
//! ```
//!
//! The six top-level keys are always present; a video with no transcript
//! carries the placeholder `audio` object rather than omitting the key.
//! `tracks` is keyed by the track ID rendered as a string, in an ordered map
//! so repeated serialization is byte-identical.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::detection::Frame;
use crate::metadata::VideoMetadata;
use crate::scene::Scene;
use crate::track::Track;
use crate::transcript::Transcript;

/// Kind of a key moment on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum KeyMomentKind {
    /// Derived from a transcript segment
    Speech,
}

impl KeyMomentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Speech => "speech",
        }
    }
}

/// A notable point on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeyMoment {
    /// Position on the time axis, in seconds
    pub timestamp: f64,

    /// Moment kind
    #[serde(rename = "type")]
    pub kind: KeyMomentKind,

    /// Short description (at most 100 characters)
    pub description: String,
}

/// Derived summary of the whole record.
///
/// A pure projection of the other record fields; always recomputed, never
/// hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    /// One-sentence synthesis of the video content
    pub brief: String,

    /// Video duration in seconds
    pub duration: f64,

    /// Number of scenes
    pub scene_count: u32,

    /// Distinct track count per object class
    pub unique_objects: BTreeMap<String, u32>,

    /// Whether the transcription pipeline ran for this video
    pub has_audio: bool,

    /// Up to five notable moments, in timeline order
    pub key_moments: Vec<KeyMoment>,
}

/// The fused, time-aligned record of one analyzed video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CanonicalRecord {
    /// Probed source video properties
    pub video_metadata: VideoMetadata,

    /// Transcript, or the placeholder when transcription did not run
    pub audio: Transcript,

    /// Scenes in frame order
    pub scenes: Vec<Scene>,

    /// Sampled frames with their detections, in extraction order
    pub frames: Vec<Frame>,

    /// Track summaries keyed by track ID (stringified)
    pub tracks: BTreeMap<String, Track>,

    /// Derived summary
    pub summary: Summary,
}

impl CanonicalRecord {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to compact JSON (no whitespace).
    pub fn to_json_compact(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Write the record to a file as pretty-printed JSON.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        let mut file = std::fs::File::create(path.as_ref())?;
        file.write_all(json.as_bytes())?;

        info!("Wrote analysis record to {}", path.as_ref().display());
        Ok(())
    }
}
