// Host-side tests for scroll tracking, scroll-driven styling and effect visuals.

use glam::Vec2;
use hero_core::*;
use instant::Instant;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn tracks_direction_progress_and_velocity() {
    let t0 = Instant::now();
    let mut s = ScrollTracker::new();
    s.update(0.0, 1000.0, t0);
    let sample = s.update(100.0, 1000.0, t0 + ms(100));
    assert_eq!(sample.direction, ScrollDirection::Down);
    assert!((sample.progress - 0.1).abs() < 1e-6);
    assert!(sample.velocity > 0.0);

    let sample = s.update(50.0, 1000.0, t0 + ms(150));
    assert_eq!(sample.direction, ScrollDirection::Up);
    assert!(s.is_scrolling_up(t0 + ms(150)));
    assert!(!s.is_scrolling_up(t0 + ms(500)));
}

#[test]
fn progress_is_clamped_and_safe_for_zero_height() {
    let t0 = Instant::now();
    let mut s = ScrollTracker::new();
    assert_eq!(s.update(5_000.0, 800.0, t0).progress, 1.0);
    assert_eq!(s.update(-20.0, 800.0, t0).progress, 0.0);
    assert_eq!(s.update(300.0, 0.0, t0).progress, 0.0);
}

#[test]
fn intent_needs_enough_downward_travel() {
    let t0 = Instant::now();
    let mut s = ScrollTracker::new();
    s.update(0.0, 800.0, t0);
    s.update(100.0, 800.0, t0 + ms(50));
    s.update(20.0, 800.0, t0 + ms(100)); // upward travel does not count
    assert!(!s.intent());
    s.update(80.0, 800.0, t0 + ms(150));
    assert!(s.intent(), "160px of downward travel");
}

#[test]
fn settle_goes_idle_after_quiet_period() {
    let t0 = Instant::now();
    let mut s = ScrollTracker::new();
    s.update(0.0, 800.0, t0);
    s.update(40.0, 800.0, t0 + ms(16));
    s.settle(t0 + ms(100));
    assert_eq!(s.sample().direction, ScrollDirection::Down);
    s.settle(t0 + ms(1_000));
    assert_eq!(s.sample().direction, ScrollDirection::Idle);
    assert_eq!(s.sample().velocity, 0.0);
}

#[test]
fn style_values_are_pure_functions_of_scroll() {
    assert_eq!(shimmer_position(0.0), -20.0);
    assert_eq!(shimmer_position(1.0), 120.0);
    assert_eq!(shimmer_position(3.0), 120.0);

    assert!((glow_intensity(0.0, 1.0) - 0.3).abs() < 1e-6);
    assert!((glow_intensity(-4_000.0, 1.0) - 1.0).abs() < 1e-6);
    assert_eq!(glow_intensity(4_000.0, 0.0), 0.0);

    assert_eq!(rotation_deg(0.5, 0.0), 4.0);
    assert_eq!(rotation_deg(0.0, 10_000.0), 4.0);
    assert_eq!(rotation_deg(0.0, -10_000.0), -4.0);
}

#[test]
fn css_vars_are_formatted_for_the_page() {
    let style = HeroStyle {
        shimmer_position: 50.0,
        glow_intensity: 0.5,
        rotation_deg: -1.25,
    };
    let vars = style.css_vars();
    assert_eq!(vars[0], (CSS_SHIMMER, "50.0%".to_string()));
    assert_eq!(vars[1], (CSS_GLOW, "0.500".to_string()));
    assert_eq!(vars[2], (CSS_ROTATION, "-1.25deg".to_string()));
}

#[test]
fn ripple_expands_and_fades() {
    let origin = Vec2::new(0.25, 0.75);
    let start = update(VisualKind::Ripple, 0.0, origin, 1.0);
    let mid = update(VisualKind::Ripple, 0.5, origin, 1.0);
    let end = update(VisualKind::Ripple, 1.0, origin, 1.0);
    assert_eq!(start.origin, [0.25, 0.75]);
    assert!(start.radius < mid.radius && mid.radius < end.radius);
    assert!(start.strength > mid.strength && end.strength.abs() < 1e-6);
    assert_eq!(end.kind, VisualKind::Ripple.code());
}

#[test]
fn sweep_and_vignette_peak_mid_effect() {
    let o = Vec2::splat(0.5);
    let sweep_start = update(VisualKind::LightSweep, 0.0, o, 1.0);
    let sweep_end = update(VisualKind::LightSweep, 1.0, o, 1.0);
    assert!(sweep_start.sweep_x < 0.0 && sweep_end.sweep_x > 1.0);

    let v_mid = update(VisualKind::Vignette, 0.5, o, 0.8);
    let v_end = update(VisualKind::Vignette, 1.0, o, 0.8);
    assert!((v_mid.vignette - 0.8).abs() < 1e-5);
    assert!(v_end.vignette.abs() < 1e-5);
}

#[test]
fn uniforms_are_a_flat_32_byte_block() {
    let u = update(VisualKind::Ripple, 0.3, Vec2::ZERO, 1.0);
    let bytes: &[u8] = bytemuck::bytes_of(&u);
    assert_eq!(bytes.len(), 32);
    let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&u));
    assert_eq!(floats.len(), 8);
}
