//! Track aggregation.
//!
//! Collapses per-frame, per-track detections into one summary record per
//! tracked object. One pass over the frame sequence; the output map's key
//! set is exactly the set of distinct track IDs observed with at least one
//! non-sentinel detection.

use std::collections::BTreeMap;
use tracing::debug;

use vfuse_models::timebase::to_timestamp;
use vfuse_models::{Frame, Track};

/// Running per-track record while the frame sequence is consumed.
#[derive(Debug)]
struct TrackAccumulator {
    /// Class label from the first observation. Later observations with a
    /// different class are ignored; track identity assumes a stable class.
    class: String,
    first_frame: u64,
    last_frame: u64,
    confidence_sum: f64,
    detection_count: u64,
}

impl TrackAccumulator {
    fn finalize(self, fps: f64) -> Track {
        Track::new(
            self.class,
            to_timestamp(self.first_frame, fps),
            to_timestamp(self.last_frame, fps),
            self.detection_count,
            self.confidence_sum / self.detection_count as f64,
        )
    }
}

/// Aggregate per-frame detections into track summaries.
///
/// Keyed by the track ID rendered as a string, in an ordered map so the
/// result is deterministic across runs. Detections carrying the untracked
/// sentinel are skipped.
pub fn aggregate_tracks(frames: &[Frame], fps: f64) -> BTreeMap<String, Track> {
    let mut accumulators: BTreeMap<i64, TrackAccumulator> = BTreeMap::new();

    for frame in frames {
        for det in frame.tracked_detections() {
            accumulators
                .entry(det.track_id)
                .and_modify(|acc| {
                    acc.first_frame = acc.first_frame.min(frame.frame_index);
                    acc.last_frame = acc.last_frame.max(frame.frame_index);
                    acc.confidence_sum += det.confidence;
                    acc.detection_count += 1;
                })
                .or_insert_with(|| TrackAccumulator {
                    class: det.class.clone(),
                    first_frame: frame.frame_index,
                    last_frame: frame.frame_index,
                    confidence_sum: det.confidence,
                    detection_count: 1,
                });
        }
    }

    let tracks: BTreeMap<String, Track> = accumulators
        .into_iter()
        .map(|(track_id, acc)| (track_id.to_string(), acc.finalize(fps)))
        .collect();

    debug!(tracks = tracks.len(), "Track aggregation complete");
    tracks
}
