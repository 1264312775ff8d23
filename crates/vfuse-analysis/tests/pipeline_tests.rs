//! End-to-end fusion pipeline tests.
//!
//! Drives the full flow the job orchestrator runs per video: scene
//! segmentation over grayscale samples, a describer stub per interval,
//! track aggregation from detector output, record assembly, and the
//! timeline view projection.

use image::{GrayImage, Luma};

use vfuse_analysis::{
    detect_boundaries, key_frame_index, scene_intervals, RecordBuilder, SceneDetectConfig,
    TimelineView,
};
use vfuse_models::{
    BoundingBox, DescriptionScore, Detection, SceneObservation, Transcript, TranscriptSegment,
    VideoMetadata, UNTRACKED,
};

fn flat_frame(intensity: u8) -> GrayImage {
    GrayImage::from_pixel(32, 32, Luma([intensity]))
}

/// Stand-in for the external frame describer: one observation per interval.
fn describe_intervals(intervals: &[(u64, u64)]) -> Vec<SceneObservation> {
    intervals
        .iter()
        .enumerate()
        .map(|(i, &(start_frame, end_frame))| {
            let key = key_frame_index(start_frame, end_frame);
            SceneObservation {
                scene_number: i as u32 + 1,
                start_frame,
                end_frame,
                description: format!("scene label {}", i + 1),
                confidence: 0.75,
                key_frame_index: key,
                key_frame_path: format!("frames/frame_{:04}.jpg", key),
                all_descriptions: vec![DescriptionScore {
                    label: format!("scene label {}", i + 1),
                    score: 0.75,
                }],
            }
        })
        .collect()
}

#[test]
fn full_pipeline_produces_consistent_record() {
    let fps = 10.0;
    let metadata = VideoMetadata::new(fps, 640, 480, 10);

    // Scene stream: a hard cut between frames 5 and 6
    let mut gray_frames = vec![flat_frame(40); 6];
    gray_frames.extend(vec![flat_frame(200); 4]);

    let boundaries = detect_boundaries(&gray_frames, &SceneDetectConfig::default()).unwrap();
    assert_eq!(boundaries, vec![0, 6]);

    let intervals = scene_intervals(&boundaries, 9);
    assert_eq!(intervals, vec![(0, 5), (6, 9)]);

    // Detection stream: a person across the cut, a car in scene 2 only,
    // and an untracked detection that must not become a track
    let bbox = BoundingBox::new(10.0, 10.0, 50.0, 90.0);
    let mut detections = vec![vec![]; 10];
    for frame in 2..8 {
        detections[frame].push(Detection::new("person", 0.9, bbox, 1));
    }
    detections[6].push(Detection::new("car", 0.6, bbox, 2));
    detections[7].push(Detection::new("car", 0.7, bbox, 2));
    detections[3].push(Detection::new("bird", 0.5, bbox, UNTRACKED));

    // Speech stream
    let transcript = Transcript::new(
        "en",
        "welcome to the demo and thanks for watching",
        vec![
            TranscriptSegment::new(0.1, 0.4, "welcome to the demo"),
            TranscriptSegment::new(0.5, 0.9, "thanks for watching"),
        ],
    );

    let record = RecordBuilder::new()
        .metadata(metadata)
        .frames(detections)
        .scenes(describe_intervals(&intervals))
        .transcript(transcript)
        .finalize()
        .unwrap();

    // Scenes cover the full frame range contiguously
    assert_eq!(record.scenes.len(), 2);
    assert_eq!(record.scenes[0].start_frame, 0);
    assert_eq!(record.scenes[0].end_frame, 5);
    assert_eq!(record.scenes[1].end_frame, 9);
    assert!((record.scenes[1].start_time - 0.6).abs() < 1e-9);

    // Tracks: the sentinel never aggregates
    assert_eq!(record.tracks.len(), 2);
    let person = &record.tracks["1"];
    assert!((person.first_appearance - 0.2).abs() < 1e-9);
    assert!((person.last_appearance - 0.7).abs() < 1e-9);
    assert_eq!(person.total_frames, 6);
    assert!((person.avg_confidence - 0.9).abs() < 1e-9);

    // Summary projection
    let summary = &record.summary;
    assert_eq!(summary.scene_count, 2);
    assert!((summary.duration - 1.0).abs() < 1e-9);
    assert_eq!(summary.unique_objects["person"], 1);
    assert_eq!(summary.unique_objects["car"], 1);
    assert!(!summary.unique_objects.contains_key("bird"));
    assert!(summary.has_audio);
    assert_eq!(summary.key_moments.len(), 2);
    assert!((summary.key_moments[0].timestamp - 0.1).abs() < 1e-9);
    assert!(summary.brief.starts_with("Video shows scene label 1."));
    assert!(summary.brief.contains("welcome to the demo"));
}

#[test]
fn record_serializes_with_stable_contract() {
    let record = RecordBuilder::new()
        .metadata(VideoMetadata::new(25.0, 320, 240, 5))
        .frames(vec![
            vec![Detection::new(
                "person",
                0.8,
                BoundingBox::new(0.0, 0.0, 10.0, 10.0),
                4,
            )],
            vec![],
            vec![],
            vec![],
            vec![],
        ])
        .scenes(describe_intervals(&[(0, 4)]))
        .finalize()
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();

    // Tracks keyed by the stringified track ID
    assert!(value["tracks"]["4"].is_object());
    assert_eq!(value["tracks"]["4"]["class"], "person");

    // Detections carry the bbox as a 4-array
    let bbox = value["frames"][0]["detections"][0]["bbox"].as_array().unwrap();
    assert_eq!(bbox.len(), 4);

    // Absent audio is an explicit placeholder, never a missing key
    assert_eq!(value["audio"]["full_transcript"], "");
    assert_eq!(value["summary"]["has_audio"], false);

    // Identical input yields byte-identical output
    let again = RecordBuilder::new()
        .metadata(VideoMetadata::new(25.0, 320, 240, 5))
        .frames(vec![
            vec![Detection::new(
                "person",
                0.8,
                BoundingBox::new(0.0, 0.0, 10.0, 10.0),
                4,
            )],
            vec![],
            vec![],
            vec![],
            vec![],
        ])
        .scenes(describe_intervals(&[(0, 4)]))
        .finalize()
        .unwrap();
    assert_eq!(
        record.to_json_compact().unwrap(),
        again.to_json_compact().unwrap()
    );
}

#[test]
fn view_is_rederivable_from_record() {
    let record = RecordBuilder::new()
        .metadata(VideoMetadata::new(10.0, 320, 240, 10))
        .frames(vec![
            vec![Detection::new(
                "person",
                0.9,
                BoundingBox::new(0.0, 0.0, 10.0, 10.0),
                1,
            )],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
        ])
        .scenes(describe_intervals(&[(0, 9)]))
        .transcript(Transcript::new(
            "en",
            "hello",
            vec![TranscriptSegment::new(0.0, 0.5, "hello")],
        ))
        .finalize()
        .unwrap();

    let view = TimelineView::from_record(&record);

    // The view aggregates nothing of its own; re-deriving is identical
    assert_eq!(view, TimelineView::from_record(&record));
    assert_eq!(view.duration, record.video_metadata.duration);
    assert_eq!(view.tracks.len(), record.tracks.len());
    assert_eq!(view.scenes.len(), record.scenes.len());
    assert_eq!(view.transcript.len(), record.audio.segments.len());
    assert_eq!(view.key_moments.len(), record.summary.key_moments.len());
}
