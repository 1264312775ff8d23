//! Frame index / timestamp conversion.
//!
//! All three input streams (detections, scenes, transcript) are sampled on
//! different clocks; this module is the single place where frame indices and
//! second-based timestamps are converted between each other.

/// Fallback frame rate applied when a caller explicitly opts into one.
///
/// Using a fallback skews every derived timestamp, so callers should prefer
/// supplying real probed metadata and reserve this for degraded inputs.
pub const DEFAULT_FPS: f64 = 30.0;

/// Convert a frame index to a timestamp in seconds.
pub fn to_timestamp(frame_index: u64, fps: f64) -> f64 {
    frame_index as f64 / fps
}

/// Convert a timestamp in seconds to the frame index it falls in.
///
/// Truncates toward zero, so a timestamp on a non-integer frame boundary maps
/// to the frame that is on screen at that instant.
pub fn to_frame_index(timestamp: f64, fps: f64) -> u64 {
    let exact = timestamp * fps;
    let nearest = exact.round();
    // i / fps * fps can land a hair under the integer it represents
    if (exact - nearest).abs() < 1e-6 {
        nearest as u64
    } else {
        exact.floor() as u64
    }
}

/// Format seconds into an HH:MM:SS or HH:MM:SS.mmm string for display.
pub fn format_seconds(total_secs: f64) -> String {
    let hours = (total_secs / 3600.0).floor() as u32;
    let mins = ((total_secs % 3600.0) / 60.0).floor() as u32;
    let secs = total_secs % 60.0;

    if (secs - secs.floor()).abs() > 0.0001 {
        format!("{:02}:{:02}:{:06.3}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}:{:02}", hours, mins, secs.floor() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_timestamp() {
        assert_eq!(to_timestamp(0, 30.0), 0.0);
        assert_eq!(to_timestamp(30, 30.0), 1.0);
        assert!((to_timestamp(3, 10.0) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_to_frame_index() {
        assert_eq!(to_frame_index(0.0, 30.0), 0);
        assert_eq!(to_frame_index(1.0, 30.0), 30);
        assert_eq!(to_frame_index(0.999, 30.0), 29);
    }

    #[test]
    fn test_round_trip() {
        // to_frame_index(to_timestamp(i)) == i for every valid frame index,
        // including rates where i / fps * fps rounds below i (e.g. 49.0)
        for fps in [10.0, 24.0, 29.97, 30.0, 49.0, 60.0] {
            for i in 0..240u64 {
                let ts = to_timestamp(i, fps);
                assert_eq!(to_frame_index(ts, fps), i, "fps={} i={}", fps, i);
            }
        }
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.0), "00:00:00");
        assert_eq!(format_seconds(90.0), "00:01:30");
        assert_eq!(format_seconds(3661.0), "01:01:01");
        assert_eq!(format_seconds(30.5), "00:00:30.500");
    }
}
