use foldgrid::{
    FrameInput, PhysicalPosition,
    cgmath::Vector2,
    input::{InputSampler, pointer_ndc, scroll_range},
    winit::event::MouseScrollDelta,
};

use crate::common::test_utils::{EPSILON, assert_close};

mod common;

#[test]
fn pointer_maps_corners_to_ndc() {
    let top_left = pointer_ndc(PhysicalPosition::new(0.0, 0.0), 800, 600);
    assert_eq!(top_left, Vector2::new(-1.0, 1.0));
    let bottom_right = pointer_ndc(PhysicalPosition::new(800.0, 600.0), 800, 600);
    assert_eq!(bottom_right, Vector2::new(1.0, -1.0));
    let center = pointer_ndc(PhysicalPosition::new(400.0, 300.0), 800, 600);
    assert_eq!(center, Vector2::new(0.0, 0.0));
    assert_eq!(pointer_ndc(PhysicalPosition::new(10.0, 10.0), 0, 600), Vector2::new(0.0, 0.0));
}

#[test]
fn scroll_range_is_clamped() {
    assert_eq!(scroll_range(0.0, 0.0, 1.0 / 3.0), 0.0);
    assert_close(scroll_range(1.0 / 6.0, 0.0, 1.0 / 3.0), 0.5, EPSILON);
    assert_eq!(scroll_range(0.9, 0.0, 1.0 / 3.0), 1.0);
    assert_eq!(scroll_range(0.1, 0.5, 0.25), 0.0);
    // empty range acts as a step
    assert_eq!(scroll_range(0.5, 0.5, 0.0), 1.0);
    assert_eq!(scroll_range(0.4, 0.5, 0.0), 0.0);
}

#[test]
fn wheel_scrolls_by_screen_pages() {
    let mut sampler = InputSampler::new(800, 600);
    assert_eq!(sampler.scroll_offset(), 0.0);

    sampler.scroll(&MouseScrollDelta::LineDelta(0.0, -10.0));
    assert_close(sampler.scroll_offset(), 1.0 / 3.0, EPSILON);

    sampler.scroll(&MouseScrollDelta::LineDelta(0.0, -1000.0));
    assert_eq!(sampler.scroll_offset(), 1.0);

    sampler.scroll(&MouseScrollDelta::LineDelta(0.0, 1000.0));
    assert_eq!(sampler.scroll_offset(), 0.0);
}

#[test]
fn sample_snapshots_pointer_and_viewport() {
    let mut sampler = InputSampler::new(800, 600);
    sampler.resize(800, 600, Vector2::new(4.0, 3.0));
    sampler.coords = PhysicalPosition::new(600.0, 150.0);
    let frame = sampler.sample();
    assert_eq!(frame.pointer, Vector2::new(0.5, 0.5));
    assert_eq!(frame.viewport, Vector2::new(4.0, 3.0));
    assert!(frame.elapsed >= 0.0);
}

#[test]
fn mouse_is_normalized_by_viewport() {
    let frame = FrameInput {
        pointer: Vector2::new(0.5, -0.5),
        viewport: Vector2::new(2.0, 4.0),
        ..Default::default()
    };
    assert_eq!(frame.mouse_normalized(), Vector2::new(0.25, -0.125));

    let degenerate = FrameInput {
        pointer: Vector2::new(0.5, 0.5),
        viewport: Vector2::new(0.0, 0.0),
        ..Default::default()
    };
    assert_eq!(degenerate.mouse_normalized(), Vector2::new(0.0, 0.0));
}
