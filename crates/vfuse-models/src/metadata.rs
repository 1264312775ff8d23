//! Video metadata models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Probed properties of the source video.
///
/// Created exactly once per job from the prober's output and never mutated
/// afterward. `duration` and `resolution` are derived at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoMetadata {
    /// Frame rate (frames per second)
    pub fps: f64,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Total number of frames
    pub frame_count: u64,

    /// Duration in seconds (frame_count / fps, 0 when fps is not positive)
    pub duration: f64,

    /// Display resolution string, e.g. "1920x1080"
    pub resolution: String,
}

impl VideoMetadata {
    /// Create metadata from probed properties.
    pub fn new(fps: f64, width: u32, height: u32, frame_count: u64) -> Self {
        let duration = if fps > 0.0 {
            frame_count as f64 / fps
        } else {
            0.0
        };

        Self {
            fps,
            width,
            height,
            frame_count,
            duration,
            resolution: format!("{}x{}", width, height),
        }
    }

    /// Check that the probed properties describe a usable video.
    pub fn is_valid(&self) -> bool {
        self.fps > 0.0 && self.width > 0 && self.height > 0
    }
}
