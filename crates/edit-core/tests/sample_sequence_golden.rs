use std::path::PathBuf;

use cutline_edit_core::{
    collect_intervals, compute_gaps, crop_clip, find_track_gaps, merge_intervals,
    reframe_to_anchor9, remove_gap_after_clip, ripple_remove_all_gaps, CropParams, GapClosure,
    Outcome, ReframeOptions,
};
use cutline_timeline_model::{
    Anchor9, ClipId, CoordinateSpace, MemoryHost, Point2D, SequenceSnapshot, TimelineHost,
    TrackKind,
};

fn load_fixture_host() -> MemoryHost {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-sequence")
        .join("sequence.json");

    let snapshot = SequenceSnapshot::load(path).expect("fixture sequence should load");
    MemoryHost::new(snapshot)
}

fn start_of(host: &MemoryHost, id: u64) -> f64 {
    host.sequence()
        .and_then(|s| s.clip(ClipId(id)))
        .map(|c| c.start)
        .expect("clip should exist")
}

#[test]
fn consolidation_closes_every_shared_gap() {
    let mut host = load_fixture_host();
    let old_end = host.sequence().unwrap().last_clip_end().unwrap();

    let report = ripple_remove_all_gaps(&mut host).unwrap();

    assert_eq!(report.gaps_removed, 3);
    assert!((report.total_time_removed - 4.0).abs() < 1e-9);

    let new_end = host.sequence().unwrap().last_clip_end().unwrap();
    assert!((old_end - new_end - report.total_time_removed).abs() < 1e-9);

    let merged = merge_intervals(&collect_intervals(&host).unwrap());
    assert!(compute_gaps(&merged).is_empty());

    // Linked pairs stay in sync; the title on V2 never moves.
    assert!((start_of(&host, 2) - 4.0).abs() < 1e-9);
    assert!((start_of(&host, 6) - 4.0).abs() < 1e-9);
    assert!((start_of(&host, 3) - 11.0).abs() < 1e-9);
    assert!((start_of(&host, 7) - 10.0).abs() < 1e-9);
    assert_eq!(start_of(&host, 4), 1.0);
}

#[test]
fn track_gap_listing_matches_fixture() {
    let host = load_fixture_host();

    let video = find_track_gaps(&host, TrackKind::Video, 0.1).unwrap();
    let names: Vec<_> = video
        .gaps
        .iter()
        .map(|g| (g.clip_before_name.as_str(), g.clip_after_name.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("intro.mov", "interview_1920x1080.mp4"),
            ("interview_1920x1080.mp4", "broll_phone.mp4"),
        ]
    );

    let audio = find_track_gaps(&host, TrackKind::Audio, 1.5).unwrap();
    assert_eq!(audio.gaps.len(), 1);
}

#[test]
fn closing_one_gap_keeps_a_frame_and_moves_linked_audio() {
    let mut host = load_fixture_host();

    let report = remove_gap_after_clip(&mut host, 0, 0, TrackKind::Video).unwrap();

    match report.closure {
        GapClosure::Closed {
            moved_secs,
            linked_moved,
            ..
        } => {
            assert!((moved_secs - 1.96).abs() < 1e-9);
            assert_eq!(linked_moved, 1);
        }
        other => panic!("unexpected closure: {other:?}"),
    }
    assert!((start_of(&host, 2) - 4.04).abs() < 1e-9);
    assert!((start_of(&host, 6) - 4.04).abs() < 1e-9);
    assert!((start_of(&host, 3) - 15.0).abs() < 1e-9);
}

#[test]
fn reframe_uses_detected_source_sizes() {
    let mut host = load_fixture_host();

    let opts = ReframeOptions {
        anchor: Anchor9::TopRight,
        ..Default::default()
    };
    let intro = reframe_to_anchor9(&mut host, 0, 0, &opts).unwrap();
    assert!(intro.source.detected);
    assert_eq!(intro.position_space, CoordinateSpace::Pixels);
    assert_eq!(intro.position_after, Point2D::new(1920.0, 0.0));

    let broll = reframe_to_anchor9(&mut host, 0, 2, &ReframeOptions::default()).unwrap();
    assert_eq!((broll.source.width, broll.source.height), (1080, 1920));
    assert!(broll.scale_raised);
    assert_eq!(broll.position_space, CoordinateSpace::Normalized);
    assert_eq!(broll.position_after, Point2D::new(0.5, 0.5));
}

#[test]
fn outcome_envelope_reports_failures_without_mutation() {
    let mut host = load_fixture_host();

    let outcome = Outcome::from_result(crop_clip(
        &mut host,
        0,
        1,
        &CropParams::new(60.0, 60.0, 0.0, 0.0),
    ));
    assert!(!outcome.success);
    assert_eq!(outcome.error_kind, Some("invalid_crop_parameters"));

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["success"], false);
    assert!(json.get("data").is_none());

    // Lower third has no Motion component.
    let outcome = Outcome::from_result(reframe_to_anchor9(
        &mut host,
        1,
        0,
        &ReframeOptions::default(),
    ));
    assert_eq!(outcome.error_kind, Some("missing_transform_component"));
    assert!(host.has_active_sequence());
}
