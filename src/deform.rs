//! The fold deformation.
//!
//! Every vertex of every card goes through the same pure function of
//! (local position, uv, uniform snapshot, instance record). The GPU evaluates
//! it in `pipelines/fold.wgsl`; this module is the CPU mirror of that kernel
//! and owns its constants. Keeping both in lockstep matters because picking
//! and the tests run the CPU version against geometry the GPU draws.
//!
//! The constants of a variant live in [`FoldParams`]. They are turned into
//! WGSL `const` declarations by [`FoldParams::wgsl_prelude`] and prepended to
//! the shader source when a pipeline is built, so each pipeline compiles its
//! variant's numbers in.

use std::f32::consts::PI;

use cgmath::{Matrix3, Rad, Vector2, Vector3, VectorSpace};

use crate::{
    data_structures::{instance::InstanceRecord, uniforms::PlaneUniforms},
    easing::ease_in_out_quad,
};

/// Extra hinge pass applied after the fold rotation: re-center, scale, then
/// tilt about Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hinge {
    pub scale: f32,
    /// Radians.
    pub tilt_z: f32,
}

/// The three shipped kernels. Each gets its own pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FoldVariant {
    /// One card per draw, direction taken from the entity.
    Single,
    /// Grid of cards in one draw, folded with per-instance delays.
    Instanced,
    /// Instanced strip without idle motion, usually scroll driven.
    Strip,
}

impl FoldVariant {
    pub const ALL: [FoldVariant; 3] = [FoldVariant::Single, FoldVariant::Instanced, FoldVariant::Strip];

    pub fn default_params(&self) -> FoldParams {
        match self {
            FoldVariant::Single => FoldParams::single(),
            FoldVariant::Instanced => FoldParams::instanced(),
            FoldVariant::Strip => FoldParams::strip(),
        }
    }

    /// Whether the kernel reads the instance attribute buffer.
    pub fn is_instanced(&self) -> bool {
        !matches!(self, FoldVariant::Single)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FoldVariant::Single => "single",
            FoldVariant::Instanced => "instanced",
            FoldVariant::Strip => "strip",
        }
    }
}

/// Constants of one fold variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoldParams {
    /// Multiplies the local z before folding.
    pub depth_scale: f32,
    /// `k1`: how far (in progress units) the bottom row lags the top row.
    pub row_lag: f32,
    /// `k2`: width of the progress window each row folds through.
    pub row_window: f32,
    /// Fraction of PI swept by a fully folded row.
    pub sweep: f32,
    /// Pivot of the fold rotation.
    pub center: Vector3<f32>,
    pub hinge: Option<Hinge>,
    /// Offset blended in by row progress after the fold. Zero keeps the blend
    /// inert, which is how every preset ships.
    pub blend_offset: Vector3<f32>,
    pub idle_frequency: Vector3<f32>,
    pub idle_amplitude: Vector3<f32>,
    pub jump_frequency: f32,
    pub jump_amount: f32,
    /// Multiplies z after the jump is subtracted.
    pub jump_depth_scale: f32,
    /// Whether the per-entity direction uniform flips the fold.
    pub directional: bool,
}

impl FoldParams {
    /// One card per draw call.
    pub fn single() -> Self {
        Self {
            depth_scale: -1.5,
            row_lag: 0.2,
            row_window: 0.4,
            sweep: 0.4,
            center: Vector3::new(0.0, 0.0, -0.1),
            hinge: None,
            blend_offset: Vector3::new(0.0, 0.0, 0.0),
            idle_frequency: Vector3::new(0.7, 0.5, 0.5),
            idle_amplitude: Vector3::new(0.2, 0.1, 0.15),
            jump_frequency: 10.0,
            jump_amount: 1.0,
            jump_depth_scale: 0.4,
            directional: true,
        }
    }

    /// Many cards in one instanced draw call.
    pub fn instanced() -> Self {
        Self {
            depth_scale: -1.5,
            row_lag: 0.5,
            row_window: 0.4,
            sweep: 0.4,
            center: Vector3::new(0.0, 0.3, 0.0),
            hinge: Some(Hinge {
                scale: 1.5,
                tilt_z: -0.5,
            }),
            blend_offset: Vector3::new(0.0, 0.0, 0.0),
            idle_frequency: Vector3::new(0.5, 0.3, 0.4),
            idle_amplitude: Vector3::new(0.2, 0.1, 0.15),
            jump_frequency: 10.0,
            jump_amount: 1.0,
            jump_depth_scale: 1.0,
            directional: false,
        }
    }

    /// Scroll-driven strip: plain fold about the origin, no idle motion.
    pub fn strip() -> Self {
        Self {
            depth_scale: 1.0,
            row_lag: 0.4,
            row_window: 0.6,
            sweep: 0.4,
            center: Vector3::new(0.0, 0.0, 0.0),
            hinge: None,
            blend_offset: Vector3::new(0.0, 0.0, 0.0),
            idle_frequency: Vector3::new(0.0, 0.0, 0.0),
            idle_amplitude: Vector3::new(0.0, 0.0, 0.0),
            jump_frequency: 10.0,
            jump_amount: 0.0,
            jump_depth_scale: 1.0,
            directional: false,
        }
    }

    /// WGSL `const` block consumed by `fold.wgsl`.
    pub fn wgsl_prelude(&self) -> String {
        let hinge = self.hinge.unwrap_or(Hinge {
            scale: 1.0,
            tilt_z: 0.0,
        });
        let mut out = String::new();
        let mut scalar = |name: &str, v: f32| {
            out.push_str(&format!("const {}: f32 = {};\n", name, wgsl_f32(v)));
        };
        scalar("DEPTH_SCALE", self.depth_scale);
        scalar("ROW_LAG", self.row_lag);
        scalar("ROW_WINDOW", self.row_window);
        scalar("SWEEP", self.sweep);
        scalar("HINGE_SCALE", hinge.scale);
        scalar("HINGE_TILT", hinge.tilt_z);
        scalar("JUMP_FREQUENCY", self.jump_frequency);
        scalar("JUMP_AMOUNT", self.jump_amount);
        scalar("JUMP_DEPTH_SCALE", self.jump_depth_scale);
        out.push_str(&format!("const CENTER: vec3<f32> = {};\n", wgsl_vec3(self.center)));
        out.push_str(&format!(
            "const BLEND_OFFSET: vec3<f32> = {};\n",
            wgsl_vec3(self.blend_offset)
        ));
        out.push_str(&format!(
            "const IDLE_FREQUENCY: vec3<f32> = {};\n",
            wgsl_vec3(self.idle_frequency)
        ));
        out.push_str(&format!(
            "const IDLE_AMPLITUDE: vec3<f32> = {};\n",
            wgsl_vec3(self.idle_amplitude)
        ));
        out.push_str(&format!("const HINGE_ENABLED: bool = {};\n", self.hinge.is_some()));
        out.push_str(&format!("const DIRECTIONAL: bool = {};\n", self.directional));
        out
    }
}

impl Default for FoldParams {
    fn default() -> Self {
        Self::single()
    }
}

fn wgsl_f32(v: f32) -> String {
    // Debug always prints a decimal point or exponent, which WGSL needs for f32 literals
    format!("{:?}", v)
}

fn wgsl_vec3(v: Vector3<f32>) -> String {
    format!(
        "vec3<f32>({}, {}, {})",
        wgsl_f32(v.x),
        wgsl_f32(v.y),
        wgsl_f32(v.z)
    )
}

/// Map any progress value into `[0, 1]`. Non-finite values collapse to 0.
pub fn sanitize_progress(progress: f32) -> f32 {
    if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Map elapsed time onto `[0, inf)`. Non-finite values collapse to 0.
pub fn sanitize_time(time: f32) -> f32 {
    if time.is_finite() { time.max(0.0) } else { 0.0 }
}

/// Progress of the row at `uv_y` within its fold window, in `[0, 1]`.
///
/// The top row (`uv_y == 1`) starts folding immediately, lower rows lag by up
/// to `row_lag`.
pub fn row_progress(params: &FoldParams, uv_y: f32, progress: f32) -> f32 {
    let offset_y = (1.0 - uv_y) * params.row_lag;
    ((progress - offset_y) / params.row_window).clamp(0.0, 1.0)
}

/// Fold rotation about X, in radians, for the row at `uv_y`.
pub fn fold_angle(params: &FoldParams, uv_y: f32, progress: f32, direction: f32) -> f32 {
    let smooth = row_progress(params, uv_y, sanitize_progress(progress));
    let direction = if params.directional { direction } else { 1.0 };
    -ease_in_out_quad(smooth) * PI * params.sweep * direction
}

fn fold(
    params: &FoldParams,
    position: Vector3<f32>,
    uv: Vector2<f32>,
    progress: f32,
    time: f32,
    phase: f32,
    direction: f32,
) -> Vector3<f32> {
    let mut pos = position;
    pos.z *= params.depth_scale;

    let smooth = row_progress(params, uv.y, progress);
    let angle = fold_angle(params, uv.y, progress, direction);
    let center = params.center;

    pos = Matrix3::from_angle_x(Rad(angle)) * (pos - center);
    pos = match params.hinge {
        Some(hinge) => Matrix3::from_angle_z(Rad(hinge.tilt_z)) * ((pos + center) * hinge.scale) + center,
        None => pos + center,
    };
    pos = pos.lerp(pos + params.blend_offset, smooth);

    let f = params.idle_frequency;
    let a = params.idle_amplitude;
    pos += Vector3::new(
        (time * f.x + phase).sin() * a.x,
        (time * f.y + phase).sin() * a.y,
        (time * f.z + phase).sin() * a.z,
    );

    let jump = (progress * params.jump_frequency).sin() * params.jump_amount;
    pos.z = (pos.z - jump) * params.jump_depth_scale;
    pos
}

/// Deform one vertex of a single card.
pub fn deform(
    params: &FoldParams,
    position: Vector3<f32>,
    uv: Vector2<f32>,
    uniforms: &PlaneUniforms,
) -> Vector3<f32> {
    fold(
        params,
        position,
        uv,
        sanitize_progress(uniforms.progress),
        sanitize_time(uniforms.time),
        uniforms.entity_id as f32,
        uniforms.direction,
    )
}

/// Deform one vertex of instance `instance_index`.
///
/// The instance's delay is subtracted from the shared progress, then the fold
/// runs as for a single card with the instance index as idle phase. Scale,
/// Y rotation and offset of the record are applied last.
pub fn deform_instanced(
    params: &FoldParams,
    position: Vector3<f32>,
    uv: Vector2<f32>,
    uniforms: &PlaneUniforms,
    record: &InstanceRecord,
    instance_index: u32,
) -> Vector3<f32> {
    let progress = sanitize_progress(sanitize_progress(uniforms.progress) - record.progress_delay);
    let pos = fold(
        params,
        position,
        uv,
        progress,
        sanitize_time(uniforms.time),
        instance_index as f32,
        1.0,
    );
    Matrix3::from_angle_y(Rad(record.rotation_y)) * (pos * record.scale) + record.offset
}
