//! Grid layout and scene composition.
//!
//! Both the instance attribute table and the list of single cards are laid
//! out on the same square grid: `ceil(sqrt(n))` columns, filled row by row
//! and centered on the origin.

use cgmath::{Matrix4, Vector3};

use crate::{
    data_structures::{mesh::PlaneGeometry, uniforms::PlaneUniforms},
    rng::LayoutRng,
};

/// Uniform scale a single card is drawn at.
pub const ENTITY_SCALE: f32 = 0.5;

/// Number of columns (and rows) of the square grid holding `count` cells.
pub fn grid_size(count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (count as f64).sqrt().ceil() as usize
}

/// Column and row of cell `index`, both centered on the grid.
pub fn grid_cell(index: usize, grid_size: usize) -> (f32, f32) {
    let grid_size = grid_size.max(1);
    let half = (grid_size as f32 - 1.0) / 2.0;
    let column = (index % grid_size) as f32 - half;
    let row = (index / grid_size) as f32 - half;
    (column, row)
}

/// How grid cells turn into world offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// Distance between columns.
    pub spacing: f32,
    /// Height gained per row.
    pub row_rise: f32,
    /// Depth gained per row.
    pub row_depth: f32,
    /// Scale each row's rise by a random factor in `[0, 1)`.
    pub jitter_rows: bool,
    pub seed: u32,
}

impl GridLayout {
    /// Layout of the instanced grid.
    pub fn instances() -> Self {
        Self {
            spacing: 1.5,
            row_rise: 1.5,
            row_depth: 0.5,
            jitter_rows: true,
            seed: 0x5EED_0001,
        }
    }

    /// Layout of single cards.
    pub fn cards() -> Self {
        Self {
            spacing: 1.5,
            row_rise: 0.8,
            row_depth: 1.0,
            jitter_rows: false,
            seed: 0x5EED_0002,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// World offsets of `count` cells. Same layout and count, same offsets.
    pub fn positions(&self, count: usize) -> Vec<Vector3<f32>> {
        let size = grid_size(count);
        let mut rng = LayoutRng::new(self.seed);
        (0..count)
            .map(|i| {
                let (column, row) = grid_cell(i, size);
                let jitter = if self.jitter_rows { rng.next_f32() } else { 1.0 };
                Vector3::new(
                    column * self.spacing,
                    row * jitter * self.row_rise,
                    row * self.row_depth,
                )
            })
            .collect()
    }
}

/// Front and back image of one card, by identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePair {
    pub front: String,
    pub back: String,
}

impl ImagePair {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// One double-sided card.
///
/// Placement, handedness and id are fixed at creation. Progress is not stored
/// here: the animation driver owns it and the frame loop copies it into
/// `uniforms` every frame.
#[derive(Clone, Debug)]
pub struct PlaneEntity {
    id: u32,
    world_position: Vector3<f32>,
    rotation_direction: f32,
    pub geometry: PlaneGeometry,
    pub images: ImagePair,
    pub uniforms: PlaneUniforms,
}

impl PlaneEntity {
    pub fn new(id: u32, world_position: Vector3<f32>, rotation_direction: f32, images: ImagePair) -> Self {
        let rotation_direction = if rotation_direction < 0.0 { -1.0 } else { 1.0 };
        Self {
            id,
            world_position,
            rotation_direction,
            geometry: PlaneGeometry::card(),
            images,
            uniforms: PlaneUniforms::new(id, rotation_direction),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn world_position(&self) -> Vector3<f32> {
        self.world_position
    }

    pub fn rotation_direction(&self) -> f32 {
        self.rotation_direction
    }

    /// Local-to-world transform of the card group.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.world_position) * Matrix4::from_scale(ENTITY_SCALE)
    }
}

/// Build `count` cards on `layout`, cycling through `pairs` and drawing each
/// card's fold handedness from the layout's seed.
///
/// No pairs or a zero count both produce an empty scene.
pub fn compose(pairs: &[ImagePair], count: usize, layout: &GridLayout) -> Vec<PlaneEntity> {
    if pairs.is_empty() {
        log::warn!("No image pairs given, the scene stays empty");
        return Vec::new();
    }
    let mut rng = LayoutRng::new(layout.seed);
    layout
        .positions(count)
        .into_iter()
        .enumerate()
        .map(|(i, position)| {
            let images = pairs[i % pairs.len()].clone();
            PlaneEntity::new(i as u32, position, rng.sign(), images)
        })
        .collect()
}
