//! Falsification Tests - Scan Sweep Claims
//!
//! Each test is a falsifiable claim about curve generation, classification
//! or the animation driver.
//!
//! Run: cargo test --test scan_falsification_test

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use scan_viz::prelude::*;

// ============================================================================
// CURVE CLAIMS
// ============================================================================

/// Claim 1: a 512-point pattern-1 buffer stays inside the unit box.
#[test]
fn claim_01_default_buffer_bounded() {
    let buffer = generate(512, 1).unwrap();
    for p in &buffer {
        assert!(p.x.abs() <= 1.0, "Claim 1 FALSIFIED: x = {}", p.x);
        assert!(p.y.abs() <= 0.9 + 1e-12, "Claim 1 FALSIFIED: y = {}", p.y);
    }
}

/// Claim 2: n=8, k=1 hits the x extremes at quarter turns.
#[test]
fn claim_02_eight_point_x_values() {
    let buffer = generate(8, 1).unwrap();
    let expected = [0.0, 1.0, 0.0, -1.0];
    for (i, want) in expected.iter().enumerate() {
        assert_abs_diff_eq!(buffer[i].x, *want, epsilon = 1e-9);
    }
}

/// Claim 3: n=4, k=1 puts every x on a zero crossing.
#[test]
fn claim_03_four_point_x_values() {
    let buffer = generate(4, 1).unwrap();
    for p in &buffer {
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-9);
    }
    assert_abs_diff_eq!(buffer[0].y, 0.0, epsilon = 1e-12);
}

/// Claim 4: generation is deterministic.
#[test]
fn claim_04_generation_deterministic() {
    assert_eq!(generate(300, 5).unwrap(), generate(300, 5).unwrap());
}

/// Claim 5: an empty buffer is refused.
#[test]
fn claim_05_zero_points_refused() {
    assert!(matches!(
        generate(0, 1),
        Err(Error::InvalidConfiguration { .. })
    ));
}

// ============================================================================
// CLASSIFICATION CLAIMS
// ============================================================================

/// Claim 10: first frame of a 512-sample sweep.
///
/// Sample 0 is current and the other 511 are pending, so 511 remain.
#[test]
fn claim_10_first_frame() {
    let snap = classify(512, 0).unwrap();
    assert_eq!(snap.current_index(), 0);
    assert_eq!(snap.classification(0), Some(Classification::Current));
    assert!((1..512).all(|i| snap.classification(i) == Some(Classification::Pending)));
    assert_eq!(snap.samples_remaining(), 511);
}

/// Claim 11: last sample of a 512-sample sweep.
#[test]
fn claim_11_last_sample() {
    let snap = classify(512, 511).unwrap();
    assert_eq!(snap.count(Classification::Consumed), 511);
    assert_eq!(snap.classification(511), Some(Classification::Current));
    assert_eq!(snap.samples_remaining(), 0);
    assert!(snap.is_frozen());
}

/// Claim 12: running past the end is not an error and changes nothing.
#[test]
fn claim_12_overrun_frozen() {
    let last = classify(512, 511).unwrap();
    let over = classify(512, 512).unwrap();
    assert_eq!(over.classifications(), last.classifications());
    assert_eq!(over.current_index(), 511);
    assert_eq!(over.samples_remaining(), 0);
}

/// Claim 13: a one-sample buffer is frozen from the start.
#[test]
fn claim_13_single_sample() {
    let snap = classify(1, 0).unwrap();
    assert_eq!(snap.current_index(), 0);
    assert_eq!(snap.samples_remaining(), 0);
    assert!(snap.is_frozen());
}

/// Claim 14: reusing state in place matches recomputation, in any order.
#[test]
fn claim_14_in_place_matches_pure() {
    let mut state = ScanState::new(40).unwrap();
    for frame in [5, 6, 39, 2, 100, 0, 17] {
        assert_eq!(state.advance_to(frame), &classify(40, frame).unwrap());
    }
}

// ============================================================================
// ANIMATOR CLAIMS
// ============================================================================

/// Claim 20: 400 ticks over 512 samples never finish the sweep.
#[test]
fn claim_20_default_run_stops_short() {
    let mut animator = Animator::start(AnimationConfig::default()).unwrap();
    let mut recorder = RecordingRenderer::new();
    let summary = animator.run(&mut recorder).unwrap();

    assert_eq!(summary.frames_drawn, 400);
    assert_eq!(summary.sweep_completed_at, None);
    let last = recorder.snapshots().last().unwrap();
    assert_eq!(last.current_index(), 399);
    assert_eq!(last.samples_remaining(), 112);
}

/// Claim 21: padding frames after the sweep repeat the final state.
#[test]
fn claim_21_padding_frames_frozen() {
    let config = AnimationConfig::new().point_count(10).frame_count(15);
    let mut animator = Animator::start(config).unwrap();
    let mut recorder = RecordingRenderer::new();
    let summary = animator.run(&mut recorder).unwrap();

    assert_eq!(summary.sweep_completed_at, Some(9));
    assert_eq!(summary.frozen_frames, 5);
    let frozen = &recorder.snapshots()[9];
    for snap in &recorder.snapshots()[10..] {
        assert_eq!(snap.classifications(), frozen.classifications());
    }
}

/// Claim 22: stopping at the sweep end drops the padding.
#[test]
fn claim_22_stop_at_sweep_end() {
    let config = AnimationConfig::new()
        .point_count(10)
        .frame_count(15)
        .stop_at_sweep_end(true);
    let mut animator = Animator::start(config).unwrap();
    let summary = animator.run(&mut RecordingRenderer::new()).unwrap();

    assert_eq!(summary.frames_drawn, 10);
    assert_eq!(summary.frozen_frames, 0);
}

/// Claim 23: the lazy frame sequence matches what the renderer is handed.
#[test]
fn claim_23_frames_match_ticks() {
    let config = AnimationConfig::new().point_count(16).frame_count(24);
    let mut animator = Animator::start(config).unwrap();
    let lazy: Vec<RenderSnapshot> = animator.frames().collect();

    let mut recorder = RecordingRenderer::new();
    animator.run(&mut recorder).unwrap();
    assert_eq!(lazy, recorder.into_snapshots());
}

/// Claim 24: negative counts are refused before anything is drawn.
#[test]
fn claim_24_negative_counts_refused() {
    for config in [
        AnimationConfig::new().point_count(-1),
        AnimationConfig::new().point_count(0),
        AnimationConfig::new().frame_count(-1),
    ] {
        assert!(matches!(
            Animator::start(config),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}

// ============================================================================
// PROPERTY CLAIMS
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every sample lies within the curve amplitude.
    #[test]
    fn prop_samples_bounded(n in 1usize..2_000, k in -20i32..20) {
        let buffer = generate(n, k).unwrap();
        prop_assert_eq!(buffer.len(), n);
        for p in &buffer {
            prop_assert!((-1.0..=1.0).contains(&p.x));
            prop_assert!(p.y.abs() <= 0.9 + 1e-12);
        }
    }

    /// Before the end, classes partition the buffer around the current index.
    #[test]
    fn prop_partition(n in 1usize..1_000, seed in any::<u64>()) {
        let frame = seed % n as u64;
        let snap = classify(n, frame).unwrap();
        let current = frame as usize;

        prop_assert_eq!(snap.current_index(), current);
        prop_assert_eq!(snap.count(Classification::Current), 1);
        prop_assert_eq!(snap.count(Classification::Consumed), current);
        prop_assert_eq!(snap.count(Classification::Pending), n - 1 - current);
        prop_assert!(snap.indices(Classification::Consumed).all(|i| i < current));
        prop_assert!(snap.indices(Classification::Pending).all(|i| i > current));
    }

    /// Any frame at or past the last sample equals the last-sample frame.
    #[test]
    fn prop_freeze(n in 1usize..500, a in 0u64..2_000, b in 0u64..2_000) {
        let last = classify(n, n as u64 - 1).unwrap();
        for extra in [a, a + b] {
            let snap = classify(n, n as u64 - 1 + extra).unwrap();
            prop_assert_eq!(snap.classifications(), last.classifications());
            prop_assert_eq!(snap.current_index(), n - 1);
        }
    }

    /// A sample that has been reached is never pending again.
    #[test]
    fn prop_monotonic(n in 1usize..300, frame in 0u64..600) {
        let now = classify(n, frame).unwrap();
        let later = classify(n, frame + 1).unwrap();
        for i in 0..n {
            if now.classification(i) != Some(Classification::Pending) {
                prop_assert_ne!(later.classification(i), Some(Classification::Pending));
            }
        }
    }

    /// Remaining count follows max(0, n - 1 - frame).
    #[test]
    fn prop_remaining(n in 1usize..5_000, frame in 0u64..10_000) {
        let snap = classify(n, frame).unwrap();
        let expected = (n as i64 - 1 - frame as i64).max(0) as usize;
        prop_assert_eq!(snap.samples_remaining(), expected);
    }

    /// The laser ramp stays within 156..=255.
    #[test]
    fn prop_modulation_range(n in 1usize..3_000) {
        let buffer = generate(n, 1).unwrap();
        prop_assert!(buffer.modulation().iter().all(|&m| m >= 156));
    }
}
