//! Easing curves.
//!
//! [`ease_in_out_quad`] is the curve the fold kernel evaluates once per vertex
//! per frame, so it is a closed-form quadratic with no table lookups. The same
//! expression is written out in `pipelines/fold.wgsl`.
//!
//! [`Easing`] names the curves the tween scheduler can use to drive progress.

use std::str::FromStr;

/// Quadratic ease-in/ease-out on `[0, 1]`.
///
/// `ease(0) == 0` and `ease(1) == 1` exactly. Inputs outside `[0, 1]` are
/// clamped first: the curve is only monotonic on the unit interval.
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u / 2.0
    }
}

/// Named easing curve for tweens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    Power2In,
    Power2Out,
    #[default]
    Power2InOut,
}

impl Easing {
    /// Apply the curve to a normalized time value (clamped to `[0, 1]`).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power2In => t * t,
            Easing::Power2Out => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Power2InOut => ease_in_out_quad(t),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Power2In => "power2.in",
            Easing::Power2Out => "power2.out",
            Easing::Power2InOut => "power2.inOut",
        }
    }
}

impl FromStr for Easing {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" | "none" => Ok(Easing::Linear),
            "power2.in" | "quad.in" => Ok(Easing::Power2In),
            "power2.out" | "quad.out" => Ok(Easing::Power2Out),
            "power2.inOut" | "quad.inOut" | "easeInOutQuad" => Ok(Easing::Power2InOut),
            other => Err(anyhow::anyhow!("unknown easing curve '{}'", other)),
        }
    }
}
