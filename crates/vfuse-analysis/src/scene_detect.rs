//! Scene boundary detection.
//!
//! Detects shot boundaries over an ordered sequence of grayscale frame
//! samples by comparing each frame against its predecessor: when the mean
//! absolute pixel difference exceeds the threshold, the current frame starts
//! a new scene. Frame 0 is always an implicit boundary, so every non-empty
//! input yields at least one scene.

use image::GrayImage;
use tracing::debug;

use crate::error::{FusionError, FusionResult};

/// Configuration for scene boundary detection.
#[derive(Debug, Clone)]
pub struct SceneDetectConfig {
    /// Mean-absolute-difference threshold (0-255 under 8-bit intensity).
    /// Above this = scene boundary.
    pub threshold: f64,
}

impl Default for SceneDetectConfig {
    fn default() -> Self {
        Self { threshold: 30.0 }
    }
}

/// Mean absolute pixel-wise difference between two equally-sized frames.
///
/// Returns a value on the 0-255 intensity scale. Both images must have the
/// same dimensions; [`detect_boundaries`] checks this before calling.
pub fn mean_abs_diff(a: &GrayImage, b: &GrayImage) -> f64 {
    let total_pixels = (a.width() * a.height()) as u64;
    if total_pixels == 0 {
        return 0.0;
    }

    let mut diff_sum = 0u64;
    for (pa, pb) in a.pixels().zip(b.pixels()) {
        diff_sum += (pa[0] as i32 - pb[0] as i32).unsigned_abs() as u64;
    }

    diff_sum as f64 / total_pixels as f64
}

/// Detect scene boundary frame indices over an ordered frame sequence.
///
/// The result is strictly increasing and always starts with 0. An empty
/// input is a caller contract violation; mismatched frame dimensions are
/// treated as malformed input rather than silently skewing the difference.
pub fn detect_boundaries(frames: &[GrayImage], config: &SceneDetectConfig) -> FusionResult<Vec<u64>> {
    if frames.is_empty() {
        return Err(FusionError::invalid_input(
            "empty frame sequence for scene detection",
        ));
    }

    let mut boundaries = vec![0u64];
    let mut prev = &frames[0];

    for (i, frame) in frames.iter().enumerate().skip(1) {
        if frame.dimensions() != prev.dimensions() {
            return Err(FusionError::invalid_input(format!(
                "frame {} dimensions {:?} differ from previous {:?}",
                i,
                frame.dimensions(),
                prev.dimensions()
            )));
        }

        let diff = mean_abs_diff(prev, frame);
        if diff > config.threshold {
            debug!(frame = i, diff = format!("{:.2}", diff), "Scene change detected");
            boundaries.push(i as u64);
        }

        prev = frame;
    }

    Ok(boundaries)
}

/// Derive contiguous scene intervals from boundary indices.
///
/// Scene `i` spans `[boundary[i], boundary[i + 1] - 1]`; the last scene runs
/// to `last_frame_index`. Together the intervals cover
/// `[0, last_frame_index]` with no gaps or overlaps.
pub fn scene_intervals(boundaries: &[u64], last_frame_index: u64) -> Vec<(u64, u64)> {
    boundaries
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = match boundaries.get(i + 1) {
                Some(&next) => next - 1,
                None => last_frame_index,
            };
            (start, end)
        })
        .collect()
}

/// Key frame index for a scene interval (midpoint of the span).
pub fn key_frame_index(start_frame: u64, end_frame: u64) -> u64 {
    (start_frame + end_frame) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn flat_frame(intensity: u8) -> GrayImage {
        GrayImage::from_pixel(16, 16, Luma([intensity]))
    }

    #[test]
    fn test_mean_abs_diff() {
        let a = flat_frame(100);
        let b = flat_frame(145);
        assert!((mean_abs_diff(&a, &b) - 45.0).abs() < 1e-9);
        assert_eq!(mean_abs_diff(&a, &a), 0.0);
    }

    #[test]
    fn test_static_frames_yield_single_scene() {
        // Three frames with no scene-changing difference
        let frames = vec![flat_frame(100), flat_frame(105), flat_frame(102)];
        let boundaries = detect_boundaries(&frames, &SceneDetectConfig::default()).unwrap();
        assert_eq!(boundaries, vec![0]);
        assert_eq!(scene_intervals(&boundaries, 2), vec![(0, 2)]);
    }

    #[test]
    fn test_cut_fires_boundary() {
        // Frame 5 differs from frame 4 by mean 45, above the 30.0 threshold
        let mut frames = vec![flat_frame(100); 5];
        frames.extend(vec![flat_frame(145); 3]);

        let boundaries = detect_boundaries(&frames, &SceneDetectConfig::default()).unwrap();
        assert_eq!(boundaries, vec![0, 5]);
        assert_eq!(scene_intervals(&boundaries, 7), vec![(0, 4), (5, 7)]);
    }

    #[test]
    fn test_single_frame_degenerate_scene() {
        let frames = vec![flat_frame(100)];
        let boundaries = detect_boundaries(&frames, &SceneDetectConfig::default()).unwrap();
        assert_eq!(boundaries, vec![0]);
        assert_eq!(scene_intervals(&boundaries, 0), vec![(0, 0)]);
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let result = detect_boundaries(&[], &SceneDetectConfig::default());
        assert!(matches!(result, Err(FusionError::InvalidInput(_))));
    }

    #[test]
    fn test_dimension_mismatch_is_invalid() {
        let frames = vec![flat_frame(100), GrayImage::from_pixel(8, 8, Luma([100]))];
        let result = detect_boundaries(&frames, &SceneDetectConfig::default());
        assert!(matches!(result, Err(FusionError::InvalidInput(_))));
    }

    #[test]
    fn test_intervals_cover_without_gaps() {
        let boundaries = vec![0, 5, 12, 30];
        let intervals = scene_intervals(&boundaries, 40);

        assert_eq!(intervals.first().unwrap().0, 0);
        assert_eq!(intervals.last().unwrap().1, 40);
        for pair in intervals.windows(2) {
            assert_eq!(pair[0].1 + 1, pair[1].0);
        }
    }

    #[test]
    fn test_boundary_updates_previous_frame() {
        // 100 -> 145 fires at frame 1; 145 -> 100 fires again at frame 2
        // because "previous" always advances, boundary or not
        let frames = vec![flat_frame(100), flat_frame(145), flat_frame(100)];
        let boundaries = detect_boundaries(&frames, &SceneDetectConfig::default()).unwrap();
        assert_eq!(boundaries, vec![0, 1, 2]);
    }
}
