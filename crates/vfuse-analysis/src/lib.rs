//! Scene segmentation, track aggregation, and timeline synthesis.
//!
//! This crate fuses three independently sampled analytical streams about a
//! single video into one time-aligned record:
//! - Scene boundary detection over grayscale frame samples
//! - Per-track aggregation of the tracker's frame detections
//! - Record assembly with a derived summary
//! - A four-lane timeline view projection for presentation layers
//!
//! Every component is a pure, synchronous, single-pass transformation over
//! in-memory collections; the enclosing job pipeline owns all I/O.

pub mod builder;
pub mod error;
pub mod scene_detect;
pub mod timeline;
pub mod tracks;

pub use builder::{synthesize_summary, RecordBuilder};
pub use error::{FusionError, FusionResult};
pub use scene_detect::{
    detect_boundaries, key_frame_index, mean_abs_diff, scene_intervals, SceneDetectConfig,
};
pub use timeline::{class_color, MomentMarker, SceneBand, SpeechSpan, TimelineView, TrackSpan};
pub use tracks::aggregate_tracks;
