use foldgrid::{
    context::{DEFAULT_CLEAR_HEX, clear_colour_from_hex},
    data_structures::mesh::PlaneGeometry,
};

use crate::common::test_utils::{EPSILON, assert_close};

mod common;

#[test]
fn card_geometry_counts() {
    let geometry = PlaneGeometry::card();
    assert_eq!(geometry.vertices().len(), 101 * 101);
    assert_eq!(geometry.indices().len(), 100 * 100 * 6);
}

#[test]
fn vertices_start_top_left() {
    let geometry = PlaneGeometry::new(1.0, 1.5, 2, 2);
    let vertices = geometry.vertices();
    assert_eq!(vertices[0].position, [-0.5, 0.75, 0.0]);
    assert_eq!(vertices[0].tex_coords, [0.0, 1.0]);
    assert_eq!(vertices[8].position, [0.5, -0.75, 0.0]);
    assert_eq!(vertices[8].tex_coords, [1.0, 0.0]);
}

#[test]
fn triangles_face_the_camera() {
    let geometry = PlaneGeometry::new(1.0, 1.0, 3, 3);
    let vertices = geometry.vertices();
    for tri in geometry.indices().chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| vertices[i as usize].position);
        let cross_z = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
        assert!(cross_z > 0.0, "clockwise triangle {:?}", tri);
    }
}

#[test]
fn zero_segments_are_raised_to_one() {
    let geometry = PlaneGeometry::new(1.0, 1.0, 0, 0);
    assert_eq!(geometry.vertices().len(), 4);
    assert_eq!(geometry.indices().len(), 6);
}

#[test]
fn clear_colour_is_linearized() {
    let black = clear_colour_from_hex(0x000000);
    assert_eq!((black.r, black.g, black.b, black.a), (0.0, 0.0, 0.0, 1.0));
    let white = clear_colour_from_hex(0xffffff);
    assert_close(white.r as f32, 1.0, EPSILON);

    let paper = clear_colour_from_hex(DEFAULT_CLEAR_HEX);
    assert!(paper.r > paper.g && paper.g > paper.b);
    assert!(paper.r < 0xea as f64 / 255.0);
}
