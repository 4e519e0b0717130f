use std::f32::consts::PI;

use foldgrid::{
    FoldParams, FoldVariant,
    cgmath::{Vector2, Vector3},
    data_structures::{instance::InstanceRecord, mesh::PlaneGeometry},
    deform::{deform, deform_instanced, fold_angle, row_progress, sanitize_progress},
    pipelines::fold_shader_source,
    rng::LayoutRng,
};

use crate::common::test_utils::{EPSILON, assert_close, assert_finite, assert_vec_close, hostile_f32, uniforms};

mod common;

fn record(offset: Vector3<f32>, progress_delay: f32) -> InstanceRecord {
    InstanceRecord {
        offset,
        rotation_y: 0.0,
        scale: 0.5,
        progress_delay,
    }
}

#[test]
fn deformation_never_produces_nan_or_inf() {
    let mut rng = LayoutRng::new(0xF01D);
    let variants = [FoldParams::single(), FoldParams::instanced(), FoldParams::strip()];
    for _ in 0..2000 {
        let position = Vector3::new(rng.range(-1.0, 1.0), rng.range(-1.0, 1.0), rng.range(-0.1, 0.1));
        let uv = Vector2::new(rng.next_f32(), rng.next_f32());
        let u = uniforms(
            rng.next_u32() % 64,
            rng.sign(),
            hostile_f32(&mut rng, -2.0, 3.0),
            hostile_f32(&mut rng, 0.0, 1.0e4),
        );
        let rec = record(
            Vector3::new(rng.range(-5.0, 5.0), rng.range(-5.0, 5.0), rng.range(-5.0, 5.0)),
            rng.range(0.0, 0.5),
        );
        for params in &variants {
            assert_finite(deform(params, position, uv, &u));
            assert_finite(deform_instanced(params, position, uv, &u, &rec, rng.next_u32() % 100));
        }
    }
}

#[test]
fn zero_progress_leaves_only_idle_motion() {
    let params = FoldParams::single();
    let geometry = PlaneGeometry::card();
    for time in [0.0, 0.37, 12.5, 999.0] {
        let u = uniforms(3, -1.0, 0.0, time);
        for vertex in geometry.vertices().iter().step_by(97) {
            let flat = vertex.position();
            let deformed = deform(&params, flat, vertex.uv(), &u);
            let delta = deformed - flat;
            let a = params.idle_amplitude;
            assert!(delta.x.abs() <= a.x + EPSILON, "{:?}", delta);
            assert!(delta.y.abs() <= a.y + EPSILON, "{:?}", delta);
            assert!(delta.z.abs() <= a.z + EPSILON, "{:?}", delta);
        }
    }
}

#[test]
fn zero_progress_at_time_zero_matches_idle_phase() {
    let params = FoldParams::single();
    let id = 4;
    let u = uniforms(id, 1.0, 0.0, 0.0);
    let p = Vector3::new(0.25, -0.5, 0.0);
    let deformed = deform(&params, p, Vector2::new(0.75, 0.1), &u);
    let phase = id as f32;
    let expected = Vector3::new(
        0.25 + phase.sin() * 0.2,
        -0.5 + phase.sin() * 0.1,
        phase.sin() * 0.15 * params.jump_depth_scale,
    );
    assert_vec_close(deformed, expected, EPSILON);
}

#[test]
fn full_progress_folds_top_row_by_sweep() {
    let params = FoldParams::single();
    let angle = fold_angle(&params, 1.0, 1.0, 1.0);
    assert_close(angle.abs(), PI * 0.4, EPSILON);
    assert!(angle < 0.0);
    // the other handedness folds the other way
    assert_close(fold_angle(&params, 1.0, 1.0, -1.0), -angle, EPSILON);
}

#[test]
fn bottom_row_lags_behind_top_row() {
    let params = FoldParams::single();
    // k1 = 0.2: the bottom row has not started yet at progress 0.2
    assert_eq!(row_progress(&params, 0.0, 0.2), 0.0);
    assert!(row_progress(&params, 1.0, 0.2) > 0.0);
    // and is done at progress 1
    assert_eq!(row_progress(&params, 0.0, 1.0), 1.0);
    assert_close(fold_angle(&params, 0.0, 1.0, 1.0).abs(), PI * 0.4, EPSILON);
}

#[test]
fn row_progress_is_monotonic_in_progress() {
    for params in [FoldParams::single(), FoldParams::instanced(), FoldParams::strip()] {
        for uv_y in [0.0, 0.3, 0.5, 1.0] {
            let mut last = 0.0;
            for i in 0..=100 {
                let value = row_progress(&params, uv_y, i as f32 / 100.0);
                assert!(value >= last);
                assert!((0.0..=1.0).contains(&value));
                last = value;
            }
        }
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    assert_eq!(sanitize_progress(-0.5), 0.0);
    assert_eq!(sanitize_progress(1.5), 1.0);
    assert_eq!(sanitize_progress(f32::NAN), 0.0);
    assert_eq!(sanitize_progress(f32::INFINITY), 0.0);

    let params = FoldParams::single();
    let p = Vector3::new(0.1, 0.2, 0.0);
    let uv = Vector2::new(0.6, 0.7);
    assert_eq!(
        deform(&params, p, uv, &uniforms(1, 1.0, 1.7, 2.0)),
        deform(&params, p, uv, &uniforms(1, 1.0, 1.0, 2.0))
    );
    assert_eq!(
        deform(&params, p, uv, &uniforms(1, 1.0, f32::NAN, 2.0)),
        deform(&params, p, uv, &uniforms(1, 1.0, 0.0, 2.0))
    );
}

#[test]
fn strip_folds_rigidly_about_the_origin() {
    let params = FoldParams::strip();
    let u = uniforms(0, 1.0, 1.0, 5.0);
    let p = Vector3::new(0.2, 0.5, 0.0);
    let deformed = deform(&params, p, Vector2::new(0.7, 1.0), &u);
    let angle = -PI * 0.4;
    let expected = Vector3::new(0.2, 0.5 * angle.cos(), 0.5 * angle.sin());
    assert_vec_close(deformed, expected, EPSILON);
}

#[test]
fn instanced_variant_ignores_direction() {
    let params = FoldParams::instanced();
    assert_eq!(fold_angle(&params, 0.8, 0.6, -1.0), fold_angle(&params, 0.8, 0.6, 1.0));
}

#[test]
fn instance_delay_holds_back_progress() {
    let params = FoldParams::instanced();
    let rec = record(Vector3::new(1.5, 0.0, -0.5), 0.475);
    let p = Vector3::new(-0.3, 0.4, 0.0);
    let uv = Vector2::new(0.2, 0.9);
    let waiting = deform_instanced(&params, p, uv, &uniforms(7, 1.0, 0.4, 3.0), &rec, 19);
    let resting = deform_instanced(&params, p, uv, &uniforms(7, 1.0, 0.0, 3.0), &rec, 19);
    assert_eq!(waiting, resting);

    let moving = deform_instanced(&params, p, uv, &uniforms(7, 1.0, 0.9, 3.0), &rec, 19);
    assert_ne!(moving, resting);
}

#[test]
fn instance_transform_applies_scale_and_offset() {
    let params = FoldParams::strip();
    let rec = record(Vector3::new(3.0, -1.5, 0.5), 0.0);
    let p = Vector3::new(0.5, -0.5, 0.0);
    let deformed = deform_instanced(&params, p, Vector2::new(1.0, 0.0), &uniforms(0, 1.0, 0.0, 8.0), &rec, 2);
    assert_vec_close(deformed, Vector3::new(3.25, -1.75, 0.5), EPSILON);
}

#[test]
fn instance_rotation_turns_about_y() {
    let params = FoldParams::strip();
    let rec = InstanceRecord {
        offset: Vector3::new(0.0, 0.0, 0.0),
        rotation_y: PI / 2.0,
        scale: 1.0,
        progress_delay: 0.0,
    };
    let deformed = deform_instanced(
        &params,
        Vector3::new(0.5, 0.0, 0.0),
        Vector2::new(1.0, 0.5),
        &uniforms(0, 1.0, 0.0, 0.0),
        &rec,
        0,
    );
    assert_vec_close(deformed, Vector3::new(0.0, 0.0, -0.5), EPSILON);
}

#[test]
fn prelude_carries_variant_constants() {
    let single = FoldParams::single().wgsl_prelude();
    assert!(single.contains("const ROW_LAG: f32 = 0.2;"));
    assert!(single.contains("const ROW_WINDOW: f32 = 0.4;"));
    assert!(single.contains("const DEPTH_SCALE: f32 = -1.5;"));
    assert!(single.contains("const HINGE_ENABLED: bool = false;"));
    assert!(single.contains("const DIRECTIONAL: bool = true;"));

    let instanced = FoldParams::instanced().wgsl_prelude();
    assert!(instanced.contains("const ROW_LAG: f32 = 0.5;"));
    assert!(instanced.contains("const HINGE_ENABLED: bool = true;"));
    assert!(instanced.contains("const HINGE_TILT: f32 = -0.5;"));
    assert!(instanced.contains("const CENTER: vec3<f32> = vec3<f32>(0.0, 0.3, 0.0);"));

    let strip = FoldParams::strip().wgsl_prelude();
    assert!(strip.contains("const ROW_WINDOW: f32 = 0.6;"));
    assert!(strip.contains("const IDLE_AMPLITUDE: vec3<f32> = vec3<f32>(0.0, 0.0, 0.0);"));
}

#[test]
fn shader_source_has_every_entry_point() {
    for variant in FoldVariant::ALL {
        let source = fold_shader_source(&variant.default_params());
        assert!(source.starts_with("const DEPTH_SCALE"));
        assert!(source.contains("fn vs_plane("));
        assert!(source.contains("fn vs_instanced("));
        assert!(source.contains("fn fs_main("));
    }
}

fn validate_wgsl(source: &str) -> Result<(), String> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| e.emit_to_string(source))?;
    naga::valid::Validator::new(naga::valid::ValidationFlags::all(), naga::valid::Capabilities::default())
        .validate(&module)
        .map(|_| ())
        .map_err(|e| format!("{:?}", e))
}

#[test]
fn shader_validates_for_every_variant() {
    for variant in FoldVariant::ALL {
        let source = fold_shader_source(&variant.default_params());
        if let Err(e) = validate_wgsl(&source) {
            panic!("{} kernel does not validate:\n{}", variant.label(), e);
        }
    }
}

#[test]
fn shader_validates_with_tuned_constants() {
    let mut params = FoldParams::instanced();
    params.hinge = None;
    params.row_window = 1.0e-7;
    params.blend_offset = Vector3::new(0.0, -0.25, 3.0);
    params.idle_amplitude = Vector3::new(1.0e10, 0.0, -2.0);
    params.directional = true;
    let source = fold_shader_source(&params);
    assert!(validate_wgsl(&source).is_ok(), "tuned kernel does not validate");
}
