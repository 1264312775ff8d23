//! Shared data models for the VideoFuse analysis core.
//!
//! This crate provides Serde-serializable types for:
//! - Probed video metadata
//! - Per-frame detections and tracks
//! - Scenes and transcript segments
//! - The fused canonical record and its derived summary
//! - Frame index / timestamp conversion

pub mod detection;
pub mod metadata;
pub mod record;
pub mod scene;
pub mod timebase;
pub mod track;
pub mod transcript;

// Re-export common types
pub use detection::{BoundingBox, Detection, Frame, UNTRACKED};
pub use metadata::VideoMetadata;
pub use record::{CanonicalRecord, KeyMoment, KeyMomentKind, Summary};
pub use scene::{DescriptionScore, Scene, SceneObservation};
pub use timebase::{to_frame_index, to_timestamp, DEFAULT_FPS};
pub use track::Track;
pub use transcript::{Transcript, TranscriptSegment};
