//! Detector/tracker output models.
//!
//! These types mirror the external tracker's per-frame output contract:
//! each sampled frame carries zero or more detections, each with a class
//! label, a confidence, a pixel-space bounding box, and a persistent track
//! ID (or the untracked sentinel).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timebase::to_timestamp;

/// Sentinel track ID meaning "the tracker did not assign an identity".
///
/// Detections carrying this ID are excluded from track aggregation.
pub const UNTRACKED: i64 = -1;

/// A pixel-space bounding box in corner form.
///
/// Serialized as the `[x1, y1, x2, y2]` array the tracker emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    /// Left edge
    pub x1: f64,
    /// Top edge
    pub y1: f64,
    /// Right edge
    pub x2: f64,
    /// Bottom edge
    pub y2: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Check that the corners are finite and properly ordered.
    pub fn is_valid(&self) -> bool {
        self.x1.is_finite()
            && self.y1.is_finite()
            && self.x2.is_finite()
            && self.y2.is_finite()
            && self.x1 <= self.x2
            && self.y1 <= self.y2
    }

    /// Box width in pixels.
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Box height in pixels.
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

impl JsonSchema for BoundingBox {
    fn schema_name() -> String {
        "BoundingBox".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <[f64; 4]>::json_schema(gen)
    }
}

/// A single detection within one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Detection {
    /// Object class label
    pub class: String,

    /// Detection confidence (0.0-1.0)
    pub confidence: f64,

    /// Bounding box as [x1, y1, x2, y2]
    pub bbox: BoundingBox,

    /// Persistent track ID, or [`UNTRACKED`]
    pub track_id: i64,
}

impl Detection {
    /// Create a new detection.
    pub fn new(class: impl Into<String>, confidence: f64, bbox: BoundingBox, track_id: i64) -> Self {
        Self {
            class: class.into(),
            confidence,
            bbox,
            track_id,
        }
    }

    /// Whether the tracker assigned this detection a persistent identity.
    pub fn is_tracked(&self) -> bool {
        self.track_id != UNTRACKED
    }

    /// Validate the detection against the tracker output contract.
    pub fn validate(&self) -> Result<(), String> {
        if !self.bbox.is_valid() {
            return Err(format!(
                "malformed bounding box [{}, {}, {}, {}]",
                self.bbox.x1, self.bbox.y1, self.bbox.x2, self.bbox.y2
            ));
        }

        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence {} outside [0, 1]", self.confidence));
        }

        Ok(())
    }
}

/// One sampled frame with its detections.
///
/// Immutable after creation; the timestamp is derived from the frame index at
/// construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Frame {
    /// Frame index (0-based, strictly increasing in extraction order)
    pub frame_index: u64,

    /// Timestamp in seconds (frame_index / fps)
    pub timestamp: f64,

    /// Detections in this frame, in detector output order
    pub detections: Vec<Detection>,
}

impl Frame {
    /// Create a frame, deriving its timestamp from the index.
    pub fn new(frame_index: u64, fps: f64, detections: Vec<Detection>) -> Self {
        Self {
            frame_index,
            timestamp: to_timestamp(frame_index, fps),
            detections,
        }
    }

    /// Detections that carry a persistent track identity.
    pub fn tracked_detections(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter().filter(|d| d.is_tracked())
    }
}
