//! Render composition and pipeline batching.
//!
//! Flows describe what to draw each frame with a [`Render`]. The host flattens
//! all flows' renders into batches per pipeline, so every front face is drawn
//! with one pipeline bound, then every back face, then each instanced grid.
//!
//! # Key types
//!
//! - [`Render<'a, 'pass>`] is the primary enum describing render operations
//! - [`PlaneDraw<'a>`] is one single card: mesh, both faces and its uniforms
//! - [`InstancedDraw<'a>`] is a grid of cards drawn from an instance buffer
//! - [`DrawPlane`] extends `wgpu::RenderPass` with the draw calls both use

use std::ops::Range;

use wgpu::RenderPass;

use crate::{
    context::Context,
    data_structures::{mesh::PlaneMesh, plane::FaceBindGroups},
    deform::FoldVariant,
};

/// One card drawn with the single-plane kernel.
pub struct PlaneDraw<'a> {
    pub mesh: &'a PlaneMesh,
    pub faces: &'a FaceBindGroups,
    pub uniforms: &'a wgpu::BindGroup,
    pub id: u32,
}

/// Run of instances drawn with the same pair of face images.
pub struct FaceBatch<'a> {
    pub faces: &'a FaceBindGroups,
    pub instances: Range<u32>,
}

/// A grid of cards drawn from one instance buffer.
pub struct InstancedDraw<'a> {
    pub variant: FoldVariant,
    pub mesh: &'a PlaneMesh,
    /// `None` for an empty grid.
    pub instances: Option<&'a wgpu::Buffer>,
    pub batches: Vec<FaceBatch<'a>>,
    pub uniforms: &'a wgpu::BindGroup,
    pub amount: u32,
    pub id: u32,
}

/// Specifies how a flow's objects should be rendered.
///
/// - `None` renders nothing
/// - `Plane(PlaneDraw)` renders one card
/// - `Planes(Vec<PlaneDraw>)` renders a batch of cards
/// - `Instanced(InstancedDraw)` renders a card grid in one instanced draw per face batch
/// - `Composed(Vec<Render>)` recursively renders a composition of renders
/// - `Custom(...)` invokes a user-defined closure on the render pass
pub enum Render<'a, 'pass>
where
    'pass: 'a,
{
    None,
    Plane(PlaneDraw<'a>),
    Planes(Vec<PlaneDraw<'a>>),
    Instanced(InstancedDraw<'a>),
    Composed(Vec<Render<'a, 'pass>>),
    Custom(Box<dyn 'a + FnOnce(&Context, &mut wgpu::RenderPass<'pass>)>),
}

impl<'a, 'pass> Render<'a, 'pass> {
    /// Sort the render tree into batches. Custom closures run right away.
    pub(crate) fn set_pipelines(
        self,
        ctx: &Context,
        render_pass: &mut RenderPass<'pass>,
        planes: &mut Vec<PlaneDraw<'a>>,
        instanced: &mut Vec<InstancedDraw<'a>>,
    ) {
        match self {
            Render::Plane(plane) => planes.push(plane),
            Render::Planes(mut vec) => planes.append(&mut vec),
            Render::Instanced(draw) => instanced.push(draw),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(ctx, render_pass, planes, instanced)),
            Render::Custom(f) => f(ctx, render_pass),
            Render::None => (),
        }
    }

    /// Ids of everything in the tree, in draw order.
    pub fn ids(&self, out: &mut Vec<u32>) {
        match self {
            Render::Plane(plane) => out.push(plane.id),
            Render::Planes(vec) => out.extend(vec.iter().map(|plane| plane.id)),
            Render::Instanced(draw) => out.push(draw.id),
            Render::Composed(renders) => renders.iter().for_each(|render| render.ids(out)),
            Render::Custom(_) | Render::None => (),
        }
    }
}

/// Which image of a card a draw binds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
}

impl FaceBindGroups {
    pub fn get(&self, face: Face) -> &wgpu::BindGroup {
        match face {
            Face::Front => &self.front,
            Face::Back => &self.back,
        }
    }
}

pub trait DrawPlane {
    fn draw_plane(
        &mut self,
        mesh: &PlaneMesh,
        image: &wgpu::BindGroup,
        camera_bind_group: &wgpu::BindGroup,
        uniforms: &wgpu::BindGroup,
    );

    fn draw_plane_instanced(
        &mut self,
        mesh: &PlaneMesh,
        instance_buffer: &wgpu::Buffer,
        instances: Range<u32>,
        image: &wgpu::BindGroup,
        camera_bind_group: &wgpu::BindGroup,
        uniforms: &wgpu::BindGroup,
    );
}

impl DrawPlane for wgpu::RenderPass<'_> {
    fn draw_plane(
        &mut self,
        mesh: &PlaneMesh,
        image: &wgpu::BindGroup,
        camera_bind_group: &wgpu::BindGroup,
        uniforms: &wgpu::BindGroup,
    ) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.set_bind_group(0, image, &[]);
        self.set_bind_group(1, camera_bind_group, &[]);
        self.set_bind_group(2, uniforms, &[]);
        self.draw_indexed(0..mesh.num_elements, 0, 0..1);
    }

    fn draw_plane_instanced(
        &mut self,
        mesh: &PlaneMesh,
        instance_buffer: &wgpu::Buffer,
        instances: Range<u32>,
        image: &wgpu::BindGroup,
        camera_bind_group: &wgpu::BindGroup,
        uniforms: &wgpu::BindGroup,
    ) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_vertex_buffer(1, instance_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.set_bind_group(0, image, &[]);
        self.set_bind_group(1, camera_bind_group, &[]);
        self.set_bind_group(2, uniforms, &[]);
        self.draw_indexed(0..mesh.num_elements, 0, instances);
    }
}

/// Draw the collected batches: all single cards front then back, then every
/// grid front then back with its variant's pipelines.
pub(crate) fn draw_batches(
    ctx: &Context,
    render_pass: &mut RenderPass<'_>,
    planes: &[PlaneDraw<'_>],
    instanced: &[InstancedDraw<'_>],
) {
    if !planes.is_empty() {
        let pipeline = ctx.pipelines.get(FoldVariant::Single);
        for (face, render_pipeline) in [(Face::Front, &pipeline.front), (Face::Back, &pipeline.back)] {
            render_pass.set_pipeline(render_pipeline);
            for plane in planes {
                render_pass.draw_plane(
                    plane.mesh,
                    plane.faces.get(face),
                    &ctx.camera.bind_group,
                    plane.uniforms,
                );
            }
        }
    }

    for draw in instanced {
        let Some(instance_buffer) = draw.instances.filter(|_| draw.amount > 0) else {
            log::debug!("Skipping grid {} with zero instances", draw.id);
            continue;
        };
        let pipeline = ctx.pipelines.get(draw.variant);
        for (face, render_pipeline) in [(Face::Front, &pipeline.front), (Face::Back, &pipeline.back)] {
            render_pass.set_pipeline(render_pipeline);
            for batch in &draw.batches {
                render_pass.draw_plane_instanced(
                    draw.mesh,
                    instance_buffer,
                    batch.instances.clone(),
                    batch.faces.get(face),
                    &ctx.camera.bind_group,
                    draw.uniforms,
                );
            }
        }
    }
}
