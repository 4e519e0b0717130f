use foldgrid::{
    FoldParams, ImagePair, PlaneEntity,
    camera::{Camera, Projection, Ray},
    cgmath::{Deg, Point3, Vector2, Vector3},
    pick::{Hit, nearest, pick_card, ray_triangle},
};

use crate::common::test_utils::{EPSILON, assert_close, assert_vec_close};

mod common;

fn ray_down_z(x: f32, y: f32) -> Ray {
    Ray {
        origin: Point3::new(x, y, 5.0),
        direction: Vector3::new(0.0, 0.0, -1.0),
    }
}

fn card() -> PlaneEntity {
    PlaneEntity::new(3, Vector3::new(0.0, 0.0, 0.0), 1.0, ImagePair::new("a.png", "b.png"))
}

#[test]
fn ray_hits_triangle_from_either_side() {
    let a = Point3::new(-1.0, -1.0, 0.0);
    let b = Point3::new(1.0, -1.0, 0.0);
    let c = Point3::new(0.0, 1.0, 0.0);
    assert_eq!(ray_triangle(&ray_down_z(0.0, 0.0), a, b, c), Some(5.0));

    let from_behind = Ray {
        origin: Point3::new(0.0, 0.0, -2.0),
        direction: Vector3::new(0.0, 0.0, 1.0),
    };
    assert_eq!(ray_triangle(&from_behind, a, b, c), Some(2.0));

    assert_eq!(ray_triangle(&ray_down_z(2.0, 2.0), a, b, c), None);

    let parallel = Ray {
        origin: Point3::new(-5.0, 0.0, 0.0),
        direction: Vector3::new(1.0, 0.0, 0.0),
    };
    assert_eq!(ray_triangle(&parallel, a, b, c), None);
}

#[test]
fn flat_card_is_hit_where_it_is_drawn() {
    let params = FoldParams::strip();
    let card = card();
    // the card is 1 x 1.5 drawn at half scale
    let distance = pick_card(&ray_down_z(0.2, 0.3), &params, &card).unwrap();
    assert_close(distance, 5.0, 1.0e-4);
    assert_eq!(pick_card(&ray_down_z(0.3, 0.0), &params, &card), None);
}

#[test]
fn folded_card_is_hit_where_it_folded_to() {
    let params = FoldParams::strip();
    let mut card = card();
    card.uniforms.progress = 1.0;

    assert_eq!(pick_card(&ray_down_z(0.2, 0.3), &params, &card), None);
    let distance = pick_card(&ray_down_z(0.2, 0.05), &params, &card).unwrap();
    assert!(distance > 5.1, "folded card should lean away, hit at {}", distance);
}

#[test]
fn nearest_hit_wins() {
    let hits = [
        Hit { id: 1, instance: None, distance: 4.0 },
        Hit { id: 2, instance: Some(7), distance: 2.5 },
        Hit { id: 3, instance: None, distance: 9.0 },
    ];
    assert_eq!(nearest(hits).map(|hit| hit.id), Some(2));
    assert_eq!(nearest(Vec::new()), None);
}

#[test]
fn center_ray_looks_down_the_axis() {
    let camera = Camera::default();
    let projection = Projection::new(800, 600, Deg(45.0), 0.1, 100.0);
    let view_proj = projection.calc_matrix() * camera.calc_matrix();
    let ray = Ray::from_ndc(Vector2::new(0.0, 0.0), view_proj).unwrap();
    assert_vec_close(ray.direction, Vector3::new(0.0, 0.0, -1.0), 1.0e-4);
    assert_close(ray.origin.x, 0.0, 1.0e-4);
    assert_close(ray.origin.y, 0.0, 1.0e-4);
    assert_close(ray.origin.z, 2.9, 1.0e-3);
}

#[test]
fn viewport_matches_field_of_view() {
    let projection = Projection::new(800, 600, Deg(45.0), 0.1, 100.0);
    let viewport = projection.viewport_at(3.0);
    assert_close(viewport.y, 2.4853, 1.0e-3);
    assert_close(viewport.x, 3.3137, 1.0e-3);
}

#[test]
fn camera_eases_toward_pointer() {
    let mut camera = Camera::default();
    camera.follow_pointer(Vector2::new(1.0, 0.0));
    assert_close(camera.position.x, 0.01, EPSILON);
    for _ in 0..200 {
        camera.follow_pointer(Vector2::new(1.0, 0.0));
    }
    assert_close(camera.position.x, 0.1, 1.0e-4);
    assert_eq!(camera.position.z, 3.0);
}
