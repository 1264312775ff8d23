//! Multi-lane timeline view.
//!
//! Projects a [`CanonicalRecord`] into a renderable four-lane chart
//! description: object tracks, scenes, transcript segments, and key moments,
//! all sharing one time axis bounded by `[0, duration]`. The projection is
//! pure and side-effect free; it can be re-derived from the record at any
//! time without re-running the pipeline.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use vfuse_models::timebase::format_seconds;
use vfuse_models::CanonicalRecord;

/// One horizontal interval on the tracks lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSpan {
    /// Track ID (stringified, as in the record)
    pub track_id: String,
    /// Object class label
    pub class: String,
    /// Lane row; tracks of the same class share a row
    pub row: u32,
    /// Interval start on the time axis (seconds)
    pub start: f64,
    /// Interval end on the time axis (seconds)
    pub end: f64,
    /// Class color as "#rrggbb"
    pub color: String,
    /// Hover text
    pub hover: String,
}

/// One shaded background interval on the scenes lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneBand {
    /// Scene number (1-based)
    pub scene_number: u32,
    /// Interval start (seconds)
    pub start: f64,
    /// Interval end (seconds)
    pub end: f64,
    /// Whether this band uses the alternate background tint (scene parity)
    pub alternate: bool,
    /// Centered label text
    pub label: String,
    /// Label position (interval midpoint, seconds)
    pub label_position: f64,
    /// Hover text
    pub hover: String,
}

/// One interval on the transcript lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechSpan {
    /// Interval start (seconds)
    pub start: f64,
    /// Interval end (seconds)
    pub end: f64,
    /// Full segment text (hover content)
    pub text: String,
}

/// One point marker on the key-moments lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentMarker {
    /// Marker position (seconds)
    pub timestamp: f64,
    /// Moment description (hover content)
    pub description: String,
}

/// Renderable four-lane chart description of one analysis record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineView {
    /// Shared time axis upper bound (seconds); the axis starts at 0
    pub duration: f64,
    /// Lane 1: object tracks
    pub tracks: Vec<TrackSpan>,
    /// Lane 2: scenes
    pub scenes: Vec<SceneBand>,
    /// Lane 3: transcript segments
    pub transcript: Vec<SpeechSpan>,
    /// Lane 4: key moments
    pub key_moments: Vec<MomentMarker>,
}

impl TimelineView {
    /// Project a canonical record into the four-lane view.
    pub fn from_record(record: &CanonicalRecord) -> Self {
        let mut entries: Vec<(&String, &vfuse_models::Track)> = record.tracks.iter().collect();
        // First-appearance order makes row assignment stable across runs
        entries.sort_by(|a, b| {
            a.1.first_appearance
                .partial_cmp(&b.1.first_appearance)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });

        let mut class_rows: HashMap<&str, u32> = HashMap::new();
        let mut next_row = 0u32;
        let mut tracks = Vec::with_capacity(entries.len());

        for (track_id, track) in entries {
            let row = *class_rows.entry(track.class.as_str()).or_insert_with(|| {
                let row = next_row;
                next_row += 1;
                row
            });

            tracks.push(TrackSpan {
                track_id: track_id.clone(),
                class: track.class.clone(),
                row,
                start: track.first_appearance,
                end: track.last_appearance,
                color: class_color(&track.class),
                hover: format!(
                    "Track {}: {}\nDuration: {:.2}s\nConfidence: {:.1}%",
                    track_id,
                    track.class,
                    track.duration,
                    track.avg_confidence * 100.0
                ),
            });
        }

        let scenes = record
            .scenes
            .iter()
            .enumerate()
            .map(|(i, scene)| SceneBand {
                scene_number: scene.scene_number,
                start: scene.start_time,
                end: scene.end_time,
                alternate: i % 2 == 1,
                label: format!("Scene {}", scene.scene_number),
                label_position: scene.midpoint(),
                hover: format!(
                    "{}\n{} - {}\nConfidence: {:.1}%",
                    scene.description,
                    format_seconds(scene.start_time),
                    format_seconds(scene.end_time),
                    scene.confidence * 100.0
                ),
            })
            .collect();

        let transcript = record
            .audio
            .segments
            .iter()
            .map(|segment| SpeechSpan {
                start: segment.start,
                end: segment.end,
                text: segment.text.clone(),
            })
            .collect();

        let key_moments = record
            .summary
            .key_moments
            .iter()
            .map(|moment| MomentMarker {
                timestamp: moment.timestamp,
                description: moment.description.clone(),
            })
            .collect();

        Self {
            duration: record.video_metadata.duration,
            tracks,
            scenes,
            transcript,
            key_moments,
        }
    }

    /// Serialize the view to pretty-printed JSON for a presentation layer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Render the view as a self-contained static HTML page.
    ///
    /// A convenience for quick inspection; real presentation layers consume
    /// the view structure directly.
    pub fn to_html(&self) -> String {
        let mut html = format!(
            concat!(
                "<!DOCTYPE html>\n<html>\n<head>\n<title>Video Timeline</title>\n",
                "<style>\n",
                "body {{ font-family: Arial, sans-serif; margin: 20px; }}\n",
                ".timeline {{ border: 1px solid #ddd; padding: 10px; }}\n",
                ".track {{ height: 30px; position: relative; border-bottom: 1px solid #eee; }}\n",
                ".track-label {{ display: inline-block; width: 150px; font-weight: bold; font-size: 12px; }}\n",
                ".track-bar {{ position: absolute; height: 20px; border-radius: 3px; }}\n",
                "</style>\n</head>\n<body>\n",
                "<h1>Video Content Analysis Timeline</h1>\n",
                "<p><strong>Duration:</strong> {:.2} seconds</p>\n",
                "<p><strong>Objects Tracked:</strong> {}</p>\n",
                "<p><strong>Scenes:</strong> {}</p>\n",
                "<div class=\"timeline\">\n<h3>Object Tracks</h3>\n"
            ),
            self.duration,
            self.tracks.len(),
            self.scenes.len(),
        );

        for span in &self.tracks {
            let (left_pct, width_pct) = if self.duration > 0.0 {
                (
                    span.start / self.duration * 100.0,
                    (span.end - span.start) / self.duration * 100.0,
                )
            } else {
                (0.0, 0.0)
            };

            html.push_str(&format!(
                concat!(
                    "<div class=\"track\">",
                    "<span class=\"track-label\">{} #{}</span>",
                    "<div class=\"track-bar\" style=\"left: calc(150px + {:.2}%); ",
                    "width: {:.2}%; background-color: {};\" title=\"{}: {:.2}s\"></div>",
                    "</div>\n"
                ),
                span.class,
                span.track_id,
                left_pct,
                width_pct,
                span.color,
                span.class,
                span.end - span.start,
            ));
        }

        html.push_str("</div>\n</body>\n</html>\n");
        html
    }
}

/// Deterministic class color as a "#rrggbb" hex string.
///
/// Keyed on the class name, not the track ID or iteration order, so repeated
/// runs assign the same color to the same class.
pub fn class_color(class: &str) -> String {
    let mut hasher = DefaultHasher::new();
    class.hash(&mut hasher);
    let hue = (hasher.finish() % 360) as f64 / 360.0;
    let (r, g, b) = hsv_to_rgb(hue, 0.7, 0.9);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Convert HSV (all components in [0, 1]) to 8-bit RGB.
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let h = (h * 6.0) % 6.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match i as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}
