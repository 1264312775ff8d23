//! Speech transcript models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One time-stamped transcript segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptSegment {
    /// Start timestamp in seconds
    pub start: f64,

    /// End timestamp in seconds
    pub end: f64,

    /// Transcribed text, trimmed of surrounding whitespace
    pub text: String,
}

impl TranscriptSegment {
    /// Create a segment, trimming the text.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into().trim().to_string(),
        }
    }
}

/// Full transcript of the video's audio stream.
///
/// Segments keep the order the speech-to-text collaborator produced them in;
/// they are never re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transcript {
    /// Detected language code
    pub language: String,

    /// Full transcript text
    #[serde(rename = "full_transcript")]
    pub text: String,

    /// Time-stamped segments in collaborator order
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Create a transcript from collaborator output.
    pub fn new(
        language: impl Into<String>,
        text: impl Into<String>,
        segments: Vec<TranscriptSegment>,
    ) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
            segments,
        }
    }

    /// Placeholder for a video whose transcription stage did not run.
    ///
    /// The canonical record always carries an `audio` object; this stands in
    /// when no transcript was supplied.
    pub fn placeholder() -> Self {
        Self {
            language: "unknown".to_string(),
            text: String::new(),
            segments: Vec::new(),
        }
    }

    /// Whether the transcript contains any text or segments.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.segments.is_empty()
    }

    /// Human-readable listing of the transcript with timestamped segments.
    pub fn format(&self) -> String {
        let mut lines = Vec::with_capacity(self.segments.len() + 4);
        lines.push(format!("Language: {}", self.language));
        lines.push(String::new());
        lines.push("Full Text:".to_string());
        lines.push(self.text.clone());
        lines.push(String::new());
        lines.push("Timestamped Segments:".to_string());
        for segment in &self.segments {
            lines.push(format!(
                "[{:.2}s - {:.2}s]: {}",
                segment.start, segment.end, segment.text
            ));
        }
        lines.join("\n")
    }
}
