//! Record assembly and summary synthesis.
//!
//! [`RecordBuilder`] reconciles the three collaborator streams onto one time
//! axis and assembles the [`CanonicalRecord`]. Each stage consumes the
//! builder and returns a new one, so there is no long-lived mutable
//! integrator and no hidden order-dependence between stages; everything is
//! reconciled in [`RecordBuilder::finalize`].

use std::collections::BTreeMap;
use tracing::{info, warn};

use vfuse_models::{
    CanonicalRecord, Detection, Frame, KeyMoment, KeyMomentKind, Scene, SceneObservation,
    Summary, Track, Transcript, VideoMetadata,
};

use crate::error::{FusionError, FusionResult};
use crate::tracks::aggregate_tracks;

/// Maximum characters of transcript text quoted in the brief.
const BRIEF_PREVIEW_CHARS: usize = 200;

/// Maximum characters per key-moment description.
const KEY_MOMENT_CHARS: usize = 100;

/// Maximum number of key moments in a summary.
const KEY_MOMENT_LIMIT: usize = 5;

/// Staged builder for the canonical record.
///
/// Metadata, frames, and scenes are required before [`finalize`] succeeds;
/// the transcript is optional and its absence is recorded in the summary's
/// `has_audio` flag.
///
/// [`finalize`]: RecordBuilder::finalize
#[derive(Debug, Default)]
pub struct RecordBuilder {
    metadata: Option<VideoMetadata>,
    detections_by_frame: Option<Vec<Vec<Detection>>>,
    scenes: Option<Vec<SceneObservation>>,
    transcript: Option<Transcript>,
    fallback_fps: Option<f64>,
}

impl RecordBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the probed video metadata.
    pub fn metadata(mut self, metadata: VideoMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Supply the tracker's output: one detection list per sampled frame,
    /// in extraction order.
    pub fn frames(mut self, detections_by_frame: Vec<Vec<Detection>>) -> Self {
        self.detections_by_frame = Some(detections_by_frame);
        self
    }

    /// Supply the transcript. Calling this marks the video as having run
    /// the transcription pipeline, even when the transcript is empty.
    pub fn transcript(mut self, transcript: Transcript) -> Self {
        self.transcript = Some(transcript);
        self
    }

    /// Supply the describer's scene observations, in frame order.
    pub fn scenes(mut self, scenes: Vec<SceneObservation>) -> Self {
        self.scenes = Some(scenes);
        self
    }

    /// Opt into a fallback frame rate for metadata with a non-positive fps.
    ///
    /// The fallback silently skews every derived timestamp; prefer supplying
    /// real metadata.
    pub fn fallback_frame_rate(mut self, fps: f64) -> Self {
        self.fallback_fps = Some(fps);
        self
    }

    /// Reconcile all supplied streams into the canonical record.
    pub fn finalize(self) -> FusionResult<CanonicalRecord> {
        let metadata = self
            .metadata
            .ok_or(FusionError::MissingDependency("video_metadata"))?;
        let detections_by_frame = self
            .detections_by_frame
            .ok_or(FusionError::MissingDependency("frames"))?;
        let observations = self.scenes.ok_or(FusionError::MissingDependency("scenes"))?;

        let fps = if metadata.fps > 0.0 {
            metadata.fps
        } else if let Some(fallback) = self.fallback_fps {
            warn!(
                fallback,
                "Metadata frame rate is not positive; derived timestamps will be skewed"
            );
            fallback
        } else {
            return Err(FusionError::invalid_input(
                "frame rate must be positive (no fallback frame rate chosen)",
            ));
        };

        for (frame_index, detections) in detections_by_frame.iter().enumerate() {
            for det in detections {
                det.validate().map_err(|msg| {
                    FusionError::invalid_input(format!("frame {}: {}", frame_index, msg))
                })?;
            }
        }

        let frames: Vec<Frame> = detections_by_frame
            .into_iter()
            .enumerate()
            .map(|(i, detections)| Frame::new(i as u64, fps, detections))
            .collect();

        let tracks = aggregate_tracks(&frames, fps);

        let scenes: Vec<Scene> = observations
            .iter()
            .map(|obs| Scene::from_observation(obs, fps))
            .collect();

        let summary = synthesize_summary(&metadata, &scenes, &tracks, self.transcript.as_ref());

        let audio = self.transcript.unwrap_or_else(Transcript::placeholder);

        info!(
            frames = frames.len(),
            tracks = tracks.len(),
            scenes = scenes.len(),
            has_audio = summary.has_audio,
            "Analysis record assembled"
        );

        Ok(CanonicalRecord {
            video_metadata: metadata,
            audio,
            scenes,
            frames,
            tracks,
            summary,
        })
    }
}

/// Derive the summary projection from the record's other fields.
///
/// `transcript` is `Some` iff the transcription pipeline ran; that presence,
/// not the transcript's content, drives `has_audio`.
pub fn synthesize_summary(
    metadata: &VideoMetadata,
    scenes: &[Scene],
    tracks: &BTreeMap<String, Track>,
    transcript: Option<&Transcript>,
) -> Summary {
    let scene_desc = scenes
        .first()
        .map(|s| s.description.as_str())
        .unwrap_or("Unknown scene");

    let mut brief = format!("Video shows {}.", scene_desc);
    if let Some(t) = transcript {
        if !t.text.is_empty() {
            let preview = truncate_chars(&t.text, BRIEF_PREVIEW_CHARS);
            brief.push_str(&format!(" Audio content: {}...", preview));
        }
    }

    let key_moments: Vec<KeyMoment> = transcript
        .map(|t| {
            t.segments
                .iter()
                .take(KEY_MOMENT_LIMIT)
                .map(|segment| KeyMoment {
                    timestamp: segment.start,
                    kind: KeyMomentKind::Speech,
                    description: truncate_chars(&segment.text, KEY_MOMENT_CHARS),
                })
                .collect()
        })
        .unwrap_or_default();

    let mut unique_objects: BTreeMap<String, u32> = BTreeMap::new();
    for track in tracks.values() {
        *unique_objects.entry(track.class.clone()).or_insert(0) += 1;
    }

    Summary {
        brief,
        duration: metadata.duration,
        scene_count: scenes.len() as u32,
        unique_objects,
        has_audio: transcript.is_some(),
        key_moments,
    }
}

/// Truncate a string to at most `max_chars` characters, respecting
/// character boundaries.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
