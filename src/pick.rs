//! Object picking and hover detection.
//!
//! Cards are picked on the CPU: a ray from the pointer through the inverse
//! view-projection is tested against each card's surface as the GPU currently
//! draws it. The surface is rebuilt on a coarse grid by running the CPU mirror
//! of the fold kernel, so a half-folded card is hit where it is on screen and
//! not where its flat quad would be.
//!
//! The picking pipeline works as follows:
//! 1. Build the pointer ray once per event ([`Context::pointer_ray`](crate::context::Context::pointer_ray))
//! 2. Every flow reports its nearest hit along that ray ([`GraphicsFlow::pick`](crate::flow::GraphicsFlow::pick))
//! 3. The nearest hit across all flows wins and only its flow is notified

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, Transform, Vector2, Vector3};

use crate::{
    camera::Ray,
    data_structures::{instance::InstanceRecord, mesh::PlaneGeometry, uniforms::PlaneUniforms},
    deform::{FoldParams, deform, deform_instanced},
    scene::PlaneEntity,
};

/// Segments per axis of the surface picking tests against.
pub const PICK_SEGMENTS: u32 = 16;

/// Something the pointer ray hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub id: u32,
    /// Index within an instanced grid.
    pub instance: Option<u32>,
    /// Distance from the ray origin.
    pub distance: f32,
}

/// Möller–Trumbore ray/triangle test, hitting both faces. Returns the distance
/// along the ray.
pub fn ray_triangle(ray: &Ray, a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Option<f32> {
    const EPSILON: f32 = 1.0e-7;
    let edge1 = b - a;
    let edge2 = c - a;
    let h = ray.direction.cross(edge2);
    let det = edge1.dot(h);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = inv_det * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = inv_det * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = inv_det * edge2.dot(q);
    (t > EPSILON && t.is_finite()).then_some(t)
}

/// Nearest intersection of `ray` with `geometry` after every vertex went
/// through `surface` (local position and uv in, world position out).
pub fn intersect_surface(
    ray: &Ray,
    geometry: &PlaneGeometry,
    segments: u32,
    surface: impl Fn(Vector3<f32>, Vector2<f32>) -> Vector3<f32>,
) -> Option<f32> {
    let coarse = PlaneGeometry::new(geometry.width, geometry.height, segments, segments);
    let points: Vec<Point3<f32>> = coarse
        .vertices()
        .iter()
        .map(|vertex| Point3::from_vec(surface(vertex.position(), vertex.uv())))
        .collect();
    coarse
        .indices()
        .chunks_exact(3)
        .filter_map(|tri| {
            ray_triangle(
                ray,
                points[tri[0] as usize],
                points[tri[1] as usize],
                points[tri[2] as usize],
            )
        })
        .min_by(|a, b| a.total_cmp(b))
}

/// Distance at which `ray` hits the deformed card, if it does.
pub fn pick_card(ray: &Ray, params: &FoldParams, entity: &PlaneEntity) -> Option<f32> {
    let model = entity.model_matrix();
    intersect_surface(ray, &entity.geometry, PICK_SEGMENTS, |position, uv| {
        let local = deform(params, position, uv, &entity.uniforms);
        model.transform_point(Point3::from_vec(local)).to_vec()
    })
}

/// Distance at which `ray` hits instance `index` of a grid, if it does.
pub fn pick_instance(
    ray: &Ray,
    params: &FoldParams,
    geometry: &PlaneGeometry,
    uniforms: &PlaneUniforms,
    model: Matrix4<f32>,
    record: &InstanceRecord,
    index: u32,
) -> Option<f32> {
    intersect_surface(ray, geometry, PICK_SEGMENTS, |position, uv| {
        let local = deform_instanced(params, position, uv, uniforms, record, index);
        model.transform_point(Point3::from_vec(local)).to_vec()
    })
}

/// Nearest of all `hits`.
pub fn nearest(hits: impl IntoIterator<Item = Hit>) -> Option<Hit> {
    hits.into_iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
