use foldgrid::{
    GridLayout, ImagePair, compose,
    cgmath::{Point3, Transform, Vector3},
    scene::{ENTITY_SCALE, grid_cell, grid_size},
};

use crate::common::test_utils::{EPSILON, assert_close, assert_vec_close};

mod common;

fn pairs(n: usize) -> Vec<ImagePair> {
    (0..n)
        .map(|i| ImagePair::new(format!("{}-front.png", i), format!("{}-back.png", i)))
        .collect()
}

#[test]
fn grid_is_square_and_big_enough() {
    assert_eq!(grid_size(0), 0);
    assert_eq!(grid_size(1), 1);
    assert_eq!(grid_size(20), 5);
    assert_eq!(grid_size(25), 5);
    assert_eq!(grid_size(26), 6);
    assert_eq!(grid_size(100), 10);
}

#[test]
fn cells_are_centered() {
    assert_eq!(grid_cell(0, 5), (-2.0, -2.0));
    assert_eq!(grid_cell(12, 5), (0.0, 0.0));
    assert_eq!(grid_cell(24, 5), (2.0, 2.0));
    assert_eq!(grid_cell(1, 2), (0.5, -0.5));
    assert_eq!(grid_cell(0, 0), (0.0, 0.0));
}

#[test]
fn compose_cycles_through_images() {
    let images = pairs(7);
    let scene = compose(&images, 20, &GridLayout::cards());
    assert_eq!(scene.len(), 20);
    for (i, entity) in scene.iter().enumerate() {
        assert_eq!(entity.id(), i as u32);
        assert_eq!(entity.images, images[i % 7]);
        assert_eq!(entity.uniforms.entity_id, entity.id());
        assert!(entity.rotation_direction() == 1.0 || entity.rotation_direction() == -1.0);
        assert_eq!(entity.uniforms.direction, entity.rotation_direction());
        assert_eq!(entity.uniforms.progress, 0.0);
    }
}

#[test]
fn compose_is_deterministic() {
    let layout = GridLayout::cards();
    let a = compose(&pairs(3), 20, &layout);
    let b = compose(&pairs(3), 20, &layout);
    for (ea, eb) in a.iter().zip(&b) {
        assert_eq!(ea.world_position(), eb.world_position());
        assert_eq!(ea.rotation_direction(), eb.rotation_direction());
    }
}

#[test]
fn empty_inputs_give_an_empty_scene() {
    assert!(compose(&[], 20, &GridLayout::cards()).is_empty());
    assert!(compose(&pairs(2), 0, &GridLayout::cards()).is_empty());
}

#[test]
fn first_card_sits_in_the_back_left_corner() {
    let scene = compose(&pairs(1), 20, &GridLayout::cards());
    assert_vec_close(scene[0].world_position(), Vector3::new(-3.0, -1.6, -2.0), EPSILON);
    assert_vec_close(scene[12].world_position(), Vector3::new(0.0, 0.0, 0.0), EPSILON);
}

#[test]
fn model_matrix_scales_then_translates() {
    let scene = compose(&pairs(1), 1, &GridLayout::cards());
    let model = scene[0].model_matrix();
    let corner = model.transform_point(Point3::new(0.5, 0.75, 0.0));
    assert_close(corner.x, 0.5 * ENTITY_SCALE, EPSILON);
    assert_close(corner.y, 0.75 * ENTITY_SCALE, EPSILON);
    assert_close(corner.z, 0.0, EPSILON);
}
