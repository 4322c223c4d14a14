#![forbid(unsafe_code)]

//! End-to-end properties of the phase cycle.

use std::time::Duration;

use driftfx_core::geometry::Size;
use driftfx_extras::dialogue::DIALOGUE;
use driftfx_extras::faces::FACES;
use driftfx_extras::{AnimatorConfig, Phase, PhaseAnimator};
use driftfx_render::{PixelSurface, RecordingSurface};
use proptest::prelude::*;

const FRAME: Duration = Duration::from_millis(16);

fn collect_cycle(a: &mut PhaseAnimator) -> Vec<Phase> {
    let mut surface = RecordingSurface::new(a.size().width, a.size().height);
    let mut phases = vec![a.phase()];
    for _ in 0..20_000 {
        surface.clear_ops();
        if let Some(t) = a.frame(FRAME, &mut surface) {
            if t.restarts_cycle() {
                return phases;
            }
            phases.push(t.to);
        }
    }
    panic!("cycle did not complete");
}

#[test]
fn one_cycle_visits_each_phase_in_order() {
    let mut a = PhaseAnimator::new(AnimatorConfig::default(), Size::new(160, 120));
    let phases = collect_cycle(&mut a);
    let mut expected = vec![Phase::Converge];
    expected.extend((0..FACES.len()).map(|face| Phase::FaceReveal { face }));
    expected.extend([
        Phase::MeltToAttractor,
        Phase::TextReveal,
        Phase::TextGlitch,
        Phase::FinalGlitchText,
        Phase::Dialogue,
        Phase::SymbolStorm,
    ]);
    assert_eq!(phases, expected);
    assert_eq!(a.phase(), Phase::Converge);
}

#[test]
fn second_cycle_repeats_the_first() {
    let mut a = PhaseAnimator::new(AnimatorConfig::default(), Size::new(40, 30));
    let first = collect_cycle(&mut a);
    let second = collect_cycle(&mut a);
    assert_eq!(first, second);
}

#[test]
fn canonical_cycle_length_in_ticks() {
    // 2 + 2 * faces + 5 + 3 + 2 + 3 + 1.5 + 5 simulated seconds at 0.05 per tick.
    let mut a = PhaseAnimator::new(AnimatorConfig::default(), Size::new(40, 30));
    collect_cycle(&mut a);
    let seconds = 2.0 + 2.0 * FACES.len() as f64 + 5.0 + 3.0 + 2.0 + 3.0 + 0.3 * DIALOGUE.len() as f64 + 5.0;
    let ideal = (seconds / 0.05).round() as u64;
    let ticks = a.frame_index();
    // Each phase may overshoot its threshold by at most one tick.
    assert!(ticks >= ideal && ticks <= ideal + 9, "ticks {ticks} ideal {ideal}");
}

#[test]
fn max_speed_cycle_is_eight_times_shorter() {
    let mut a = PhaseAnimator::new(AnimatorConfig::default(), Size::new(40, 30));
    let mut surface = RecordingSurface::new(40, 30);
    // Keep clicking so the multiplier never decays.
    let mut now = Duration::ZERO;
    for _ in 0..3 {
        a.register_speed_input(now);
        now += Duration::from_millis(100);
    }
    assert_eq!(a.speed(), 8.0);
    let mut ticks = 0u64;
    loop {
        ticks += 1;
        surface.clear_ops();
        if a.frame(FRAME, &mut surface).is_some_and(|t| t.restarts_cycle()) {
            break;
        }
        assert!(ticks < 200);
    }
    assert!(ticks < 80, "ticks {ticks}");
}

#[test]
fn identical_seeds_give_identical_frames() {
    let cfg = AnimatorConfig::default().with_seed(1234);
    let mut a = PhaseAnimator::new(cfg.clone(), Size::new(64, 48));
    let mut b = PhaseAnimator::new(cfg, Size::new(64, 48));
    let mut sa = PixelSurface::new(64, 48);
    let mut sb = PixelSurface::new(64, 48);
    for i in 0..400 {
        if i == 50 {
            a.register_speed_input(a.host_time());
            b.register_speed_input(b.host_time());
        }
        a.frame(FRAME, &mut sa);
        b.frame(FRAME, &mut sb);
        assert_eq!(sa, sb, "frame {i} diverged");
    }
}

#[test]
fn different_seeds_diverge() {
    let mut a = PhaseAnimator::new(AnimatorConfig::default().with_seed(1), Size::new(32, 24));
    let mut b = PhaseAnimator::new(AnimatorConfig::default().with_seed(2), Size::new(32, 24));
    let mut sa = PixelSurface::new(32, 24);
    let mut sb = PixelSurface::new(32, 24);
    a.frame(FRAME, &mut sa);
    b.frame(FRAME, &mut sb);
    assert_ne!(sa, sb);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn speed_stays_bounded_under_any_click_pattern(
        gaps in proptest::collection::vec(0u64..1_500, 1..40),
        frames_between in 0usize..4,
    ) {
        let mut a = PhaseAnimator::new(AnimatorConfig::default(), Size::new(16, 12));
        for gap in gaps {
            for _ in 0..frames_between {
                a.tick(Duration::from_millis(gap / (frames_between as u64 + 1)));
                a.advance_if_due();
            }
            let at = a.host_time() + Duration::from_millis(gap);
            let change = a.register_speed_input(at);
            prop_assert!((1.0..=8.0).contains(&change.after));
            prop_assert!((1.0..=8.0).contains(&a.speed()));
        }
    }

    #[test]
    fn transitions_only_when_due(seed in any::<u64>(), clicks in proptest::collection::vec(0usize..300, 0..5)) {
        let mut a = PhaseAnimator::new(AnimatorConfig::default().with_seed(seed), Size::new(16, 12));
        for frame in 0..300usize {
            if clicks.contains(&frame) {
                a.register_speed_input(a.host_time());
            }
            a.tick(FRAME);
            let threshold = a.config().timing.threshold(a.phase(), DIALOGUE.len());
            let due = a.elapsed() >= threshold / a.speed();
            let from = a.phase();
            let moved = a.advance_if_due();
            prop_assert_eq!(moved.is_some(), due);
            if let Some(t) = moved {
                prop_assert_eq!(t.from, from);
                prop_assert_eq!(t.to, from.next(FACES.len()));
                prop_assert_eq!(a.elapsed(), 0.0);
            }
            prop_assert!(a.trace().len() <= a.trace().capacity());
        }
    }
}
