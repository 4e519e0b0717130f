//! GPU resources of cards.
//!
//! A [`CardDeck`] draws single cards, each with its own uniform block. A
//! [`CardGrid`] draws many cards from one instance buffer and shares a single
//! uniform block between them.

use cgmath::{Matrix4, SquareMatrix};

use crate::{
    camera::Ray,
    context::InitContext,
    data_structures::{
        instance::InstanceTable,
        mesh::{PlaneGeometry, PlaneMesh},
        uniforms::{PlaneUniforms, UniformResources},
    },
    deform::{FoldParams, FoldVariant},
    input::FrameInput,
    pick::{self, Hit},
    render::{FaceBatch, InstancedDraw, PlaneDraw, Render},
    resources::{FaceTextures, TextureCache},
    scene::{GridLayout, ImagePair, PlaneEntity},
};

/// Image bind groups of a card's two faces.
#[derive(Debug)]
pub struct FaceBindGroups {
    pub front: wgpu::BindGroup,
    pub back: wgpu::BindGroup,
}

impl FaceBindGroups {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, faces: &FaceTextures, label: &str) -> Self {
        Self {
            front: faces.front.bind_group(device, layout, &format!("{} front", label)),
            back: faces.back.bind_group(device, layout, &format!("{} back", label)),
        }
    }
}

/// One double-sided card and its uniform buffer.
#[derive(Debug)]
pub struct Card {
    pub entity: PlaneEntity,
    faces: FaceBindGroups,
    uniforms: UniformResources,
}

impl Card {
    pub fn new(ctx: &InitContext, entity: PlaneEntity, faces: &FaceTextures) -> Self {
        let label = format!("card {}", entity.id());
        let faces = FaceBindGroups::new(&ctx.device, &ctx.layouts.image, faces, &label);
        let uniforms = UniformResources::new(&ctx.device, &ctx.layouts.uniform, &label);
        Self {
            entity,
            faces,
            uniforms,
        }
    }

    pub fn id(&self) -> u32 {
        self.entity.id()
    }

    pub fn write_to_buffer(&self, queue: &wgpu::Queue) {
        let raw = self.entity.uniforms.to_raw(self.entity.model_matrix());
        self.uniforms.write(queue, raw);
    }
}

/// Single cards sharing one plane mesh.
#[derive(Debug)]
pub struct CardDeck {
    mesh: PlaneMesh,
    cards: Vec<Card>,
}

impl CardDeck {
    /// Build a deck, loading every image once. Images that fail to load show
    /// the fallback texture.
    pub async fn load(ctx: &InitContext, entities: Vec<PlaneEntity>) -> Self {
        let mut cache = TextureCache::new();
        let mut with_faces = Vec::with_capacity(entities.len());
        for entity in entities {
            let faces = cache.faces(&entity.images, &ctx.device, &ctx.queue).await;
            with_faces.push((entity, faces));
        }
        log::info!(
            "Loaded {} distinct images for {} cards",
            cache.len(),
            with_faces.len()
        );
        Self::from_faces(ctx, with_faces)
    }

    pub fn from_faces(ctx: &InitContext, entities: Vec<(PlaneEntity, FaceTextures)>) -> Self {
        let geometry = entities
            .first()
            .map_or_else(PlaneGeometry::card, |(entity, _)| entity.geometry);
        let mesh = PlaneMesh::new(&ctx.device, geometry, "card");
        let cards = entities
            .into_iter()
            .map(|(entity, faces)| Card::new(ctx, entity, &faces))
            .collect();
        Self { mesh, cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, id: u32) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Assign this frame's uniforms, taking each card's progress from `progress`.
    pub fn update(&mut self, frame: &FrameInput, progress: impl Fn(u32) -> f32) {
        for card in &mut self.cards {
            let id = card.id();
            card.entity.uniforms.update(frame, progress(id));
        }
    }

    pub fn write_to_buffers(&self, queue: &wgpu::Queue) {
        self.cards.iter().for_each(|card| card.write_to_buffer(queue));
    }

    /// Nearest card under `ray`, as deformed with `params`.
    pub fn pick(&self, ray: &Ray, params: &FoldParams) -> Option<Hit> {
        pick::nearest(self.cards.iter().filter_map(|card| {
            pick::pick_card(ray, params, &card.entity).map(|distance| Hit {
                id: card.id(),
                instance: None,
                distance,
            })
        }))
    }

    pub fn render<'pass>(&self) -> Render<'_, 'pass> {
        Render::Planes(
            self.cards
                .iter()
                .map(|card| PlaneDraw {
                    mesh: &self.mesh,
                    faces: &card.faces,
                    uniforms: &card.uniforms.bind_group,
                    id: card.id(),
                })
                .collect(),
        )
    }
}

/// Many cards in one instanced draw per face image.
///
/// All instances share one uniform block and one progress value; the instance
/// table staggers them through their per-instance delay.
#[derive(Debug)]
pub struct CardGrid {
    pub variant: FoldVariant,
    pub uniforms: PlaneUniforms,
    /// Transform of the whole grid.
    pub model: Matrix4<f32>,
    mesh: PlaneMesh,
    table: InstanceTable,
    instance_buffer: Option<wgpu::Buffer>,
    faces: Vec<FaceBindGroups>,
    uniform_resources: UniformResources,
}

impl CardGrid {
    /// Load images and build a grid of `count` cards on `layout`. Instance `i`
    /// shows `pairs[i % pairs.len()]`.
    pub async fn load(
        ctx: &InitContext,
        id: u32,
        variant: FoldVariant,
        count: usize,
        layout: &GridLayout,
        pairs: &[ImagePair],
    ) -> Self {
        let mut cache = TextureCache::new();
        let mut faces = Vec::with_capacity(pairs.len());
        for pair in pairs {
            faces.push(cache.faces(pair, &ctx.device, &ctx.queue).await);
        }
        Self::new(ctx, id, variant, count, layout, &faces)
    }

    pub fn new(
        ctx: &InitContext,
        id: u32,
        variant: FoldVariant,
        count: usize,
        layout: &GridLayout,
        faces: &[FaceTextures],
    ) -> Self {
        if !variant.is_instanced() {
            log::warn!("Building a card grid with the {} kernel", variant.label());
        }
        let label = format!("grid {}", id);
        let table = InstanceTable::build(count, layout);
        let instance_buffer = (!table.is_empty()).then(|| table.upload(&ctx.device));
        let faces = faces
            .iter()
            .enumerate()
            .map(|(i, f)| FaceBindGroups::new(&ctx.device, &ctx.layouts.image, f, &format!("{} pair {}", label, i)))
            .collect();
        Self {
            variant,
            uniforms: PlaneUniforms::new(id, 1.0),
            model: Matrix4::identity(),
            mesh: PlaneMesh::new(&ctx.device, PlaneGeometry::instance_card(), &label),
            table,
            instance_buffer,
            faces,
            uniform_resources: UniformResources::new(&ctx.device, &ctx.layouts.uniform, &label),
        }
    }

    pub fn id(&self) -> u32 {
        self.uniforms.entity_id
    }

    pub fn table(&self) -> &InstanceTable {
        &self.table
    }

    pub fn amount(&self) -> u32 {
        self.table.len() as u32
    }

    pub fn update(&mut self, frame: &FrameInput, progress: f32) {
        self.uniforms.update(frame, progress);
    }

    pub fn write_to_buffer(&self, queue: &wgpu::Queue) {
        self.uniform_resources
            .write(queue, self.uniforms.to_raw(self.model));
    }

    /// Nearest instance under `ray`, as deformed with `params`.
    pub fn pick(&self, ray: &Ray, params: &FoldParams) -> Option<Hit> {
        let geometry = self.mesh.geometry;
        pick::nearest(self.table.records().iter().enumerate().filter_map(|(i, record)| {
            let index = i as u32;
            pick::pick_instance(ray, params, &geometry, &self.uniforms, self.model, record, index).map(
                |distance| Hit {
                    id: self.id(),
                    instance: Some(index),
                    distance,
                },
            )
        }))
    }

    /// Instance ranges per face pair: one range covering everything for a
    /// single pair, otherwise instance `i` uses pair `i % pairs`.
    pub fn batches(&self) -> Vec<(usize, std::ops::Range<u32>)> {
        face_batches(self.amount(), self.faces.len())
    }

    pub fn render<'pass>(&self) -> Render<'_, 'pass> {
        let batches = self
            .batches()
            .into_iter()
            .map(|(pair, instances)| FaceBatch {
                faces: &self.faces[pair],
                instances,
            })
            .collect();
        Render::Instanced(InstancedDraw {
            variant: self.variant,
            mesh: &self.mesh,
            instances: self.instance_buffer.as_ref(),
            batches,
            uniforms: &self.uniform_resources.bind_group,
            amount: self.amount(),
            id: self.id(),
        })
    }
}

/// Split `amount` instances over `pairs` face pairs by `index % pairs`.
pub fn face_batches(amount: u32, pairs: usize) -> Vec<(usize, std::ops::Range<u32>)> {
    match pairs {
        0 => Vec::new(),
        1 => vec![(0, 0..amount)],
        _ => (0..amount).map(|i| (i as usize % pairs, i..i + 1)).collect(),
    }
}
