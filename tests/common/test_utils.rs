#![allow(dead_code)]

use foldgrid::{
    cgmath::{InnerSpace, Vector3},
    data_structures::uniforms::PlaneUniforms,
    rng::LayoutRng,
};

pub const EPSILON: f32 = 1.0e-5;

pub fn assert_close(actual: f32, expected: f32, epsilon: f32) {
    assert!(
        (actual - expected).abs() <= epsilon,
        "expected {} to be within {} of {}",
        actual,
        epsilon,
        expected
    );
}

pub fn assert_vec_close(actual: Vector3<f32>, expected: Vector3<f32>, epsilon: f32) {
    assert!(
        (actual - expected).magnitude() <= epsilon,
        "expected {:?} to be within {} of {:?}",
        actual,
        epsilon,
        expected
    );
}

pub fn assert_finite(v: Vector3<f32>) {
    assert!(
        v.x.is_finite() && v.y.is_finite() && v.z.is_finite(),
        "non-finite vertex {:?}",
        v
    );
}

/// Uniform snapshot of entity `id` at `progress` and `time`.
pub fn uniforms(id: u32, direction: f32, progress: f32, time: f32) -> PlaneUniforms {
    let mut uniforms = PlaneUniforms::new(id, direction);
    uniforms.progress = progress;
    uniforms.time = time;
    uniforms
}

/// Mostly ordinary values with the occasional NaN or infinity mixed in.
pub fn hostile_f32(rng: &mut LayoutRng, lo: f32, hi: f32) -> f32 {
    match rng.next_u32() % 16 {
        0 => f32::NAN,
        1 => f32::INFINITY,
        2 => f32::NEG_INFINITY,
        _ => rng.range(lo, hi),
    }
}
