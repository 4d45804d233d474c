//! Behavioral tests for blink, wink and eyebrow-hold detection


use facial_gestures::{
    config::{BrowConfig, EyeConfig},
    eye_detector::{EyeDetector, EyeReport},
};
use rand::Rng;
use test_helpers::{neutral_face, truncated_face, FaceBuilder};

fn default_detector() -> EyeDetector {
    EyeDetector::new(&EyeConfig::default(), &BrowConfig::default()).unwrap()
}

#[test]
fn test_closed_requires_full_window() {
    let mut detector = default_detector();
    let closed = FaceBuilder::default().eyes(0.1, 0.1).build();

    for i in 0..3 {
        let report = detector.process(Some(&closed));
        assert!(!report.left_closed && !report.right_closed, "frame {i} closed before window filled");
    }
    let report = detector.process(Some(&closed));
    assert!(report.left_closed && report.right_closed);
    assert!(report.both_blink);
}

#[test]
fn test_single_noisy_frame_does_not_close_eye() {
    let mut detector = default_detector();
    let open = neutral_face();
    let wink = FaceBuilder::default().eyes(0.1, 0.32).build();

    for _ in 0..4 {
        detector.process(Some(&open));
    }
    let report = detector.process(Some(&wink));
    assert!(!report.left_closed);
    assert!(!report.left_wink);
}

#[test]
fn test_right_wink() {
    let mut detector = default_detector();
    let wink = FaceBuilder::default().eyes(0.32, 0.1).build();
    let reports: Vec<EyeReport> = (0..6).map(|_| detector.process(Some(&wink))).collect();

    assert!(reports[..3].iter().all(|r| !r.right_wink));
    assert!(reports[3..].iter().all(|r| r.right_wink && !r.left_wink && !r.both_blink));
}

#[test]
fn test_blink_never_reports_wink_even_with_asymmetric_thresholds() {
    // Right threshold above 1.3x the left one: a both-eyes-closed frame can
    // satisfy the left wink margin check on its own.
    let eye = EyeConfig {
        left_threshold: 0.2,
        right_threshold: 0.3,
        ..EyeConfig::default()
    };
    let mut detector = EyeDetector::new(&eye, &BrowConfig::default()).unwrap();
    let frame = FaceBuilder::default().eyes(0.1, 0.28).build();

    let mut last = EyeReport::neutral();
    for _ in 0..5 {
        last = detector.process(Some(&frame));
    }
    assert!(last.both_blink);
    assert!(!last.left_wink && !last.right_wink);
}

#[test]
fn test_random_sequences_respect_invariants() {
    let mut rng = rand::thread_rng();
    let mut detector = default_detector();

    for i in 0..500 {
        let frame = FaceBuilder::default()
            .eyes(rng.gen_range(0.0..0.4), rng.gen_range(0.0..0.4))
            .build();
        let report = detector.process(Some(&frame));

        if i < 3 {
            assert!(!report.left_closed && !report.right_closed);
        }
        if report.both_blink {
            assert!(!report.left_wink && !report.right_wink);
        }
        assert!(!(report.left_wink && report.right_wink));
    }
}

#[test]
fn test_eyebrow_hold_fires_once_per_episode() {
    let mut detector = default_detector();
    let raised = FaceBuilder::default().brow(0.09).build();
    let resting = neutral_face();

    let mut sequence = Vec::new();
    sequence.extend(std::iter::repeat(&raised).take(35));
    sequence.extend(std::iter::repeat(&resting).take(5));
    sequence.extend(std::iter::repeat(&raised).take(35));

    let reports: Vec<EyeReport> = sequence.iter().map(|f| detector.process(Some(f.as_slice()))).collect();
    let triggered: Vec<usize> = reports
        .iter()
        .enumerate()
        .filter(|(_, r)| r.eyebrow_triggered)
        .map(|(i, _)| i)
        .collect();

    assert_eq!(triggered, vec![30, 70]);

    assert!(!reports[29].eyebrow_raised_held);
    assert!(reports[30..35].iter().all(|r| r.eyebrow_raised_held));
    assert!(reports[35..40].iter().all(|r| !r.eyebrow_raised_held));
}

#[test]
fn test_eyebrow_dip_rearms_the_hold() {
    let mut detector = default_detector();
    let raised = FaceBuilder::default().brow(0.09).build();
    let resting = neutral_face();

    for _ in 0..20 {
        detector.process(Some(&raised));
    }
    assert_eq!(detector.brow_raise_count(), 20);
    detector.process(Some(&resting));
    assert_eq!(detector.brow_raise_count(), 0);

    let triggers = (0..31)
        .map(|_| detector.process(Some(&raised)))
        .filter(|r| r.eyebrow_triggered)
        .count();
    assert_eq!(triggers, 1);
}

#[test]
fn test_same_frame_twice_is_idempotent_once_window_full() {
    let mut detector = default_detector();
    let frame = FaceBuilder::default().eyes(0.1, 0.32).build();
    for _ in 0..4 {
        detector.process(Some(&frame));
    }

    let first = detector.process(Some(&frame));
    let second = detector.process(Some(&frame));
    assert_eq!(first, second);
}

#[test]
fn test_degenerate_frames_leave_history_alone() {
    let mut detector = default_detector();
    let closed = FaceBuilder::default().eyes(0.1, 0.32).build();
    for _ in 0..2 {
        detector.process(Some(&closed));
    }

    assert_eq!(detector.process(None), EyeReport::neutral());
    assert_eq!(detector.process(Some(&truncated_face())), EyeReport::neutral());
    assert_eq!(detector.history_len(), (2, 2));

    // Two more real frames complete the window; the gap did not count.
    detector.process(Some(&closed));
    assert!(detector.process(Some(&closed)).left_wink);
}

#[test]
fn test_neutral_report_values() {
    let report = EyeReport::neutral();
    assert_eq!(report.left_ear, 0.3);
    assert_eq!(report.right_ear, 0.3);
    assert!(!report.left_wink && !report.right_wink && !report.both_blink);
    assert!(!report.eyebrow_raised_held && !report.eyebrow_triggered);
}

#[test]
fn test_invalid_config_is_fatal() {
    let eye = EyeConfig {
        consec_frames: 0,
        ..EyeConfig::default()
    };
    assert!(EyeDetector::new(&eye, &BrowConfig::default()).is_err());

    let brow = BrowConfig {
        hold_frames: 0,
        ..BrowConfig::default()
    };
    assert!(EyeDetector::new(&EyeConfig::default(), &brow).is_err());
}
