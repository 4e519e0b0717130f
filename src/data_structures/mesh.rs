//! Flat subdivided quads and their GPU buffers.

use cgmath::{Vector2, Vector3};
use wgpu::util::DeviceExt;

/// Anything with a vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    /// `v == 1` is the top edge. The fragment shader flips v when sampling.
    pub tex_coords: [f32; 2],
}

impl PlaneVertex {
    pub fn position(&self) -> Vector3<f32> {
        self.position.into()
    }

    pub fn uv(&self) -> Vector2<f32> {
        self.tex_coords.into()
    }
}

impl Vertex for PlaneVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<PlaneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Dimensions of a flat quad in the XY plane, centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
    pub segments_x: u32,
    pub segments_y: u32,
}

impl PlaneGeometry {
    pub fn new(width: f32, height: f32, segments_x: u32, segments_y: u32) -> Self {
        Self {
            width,
            height,
            segments_x: segments_x.max(1),
            segments_y: segments_y.max(1),
        }
    }

    /// Card geometry of single planes.
    pub fn card() -> Self {
        Self::new(1.0, 1.5, 100, 100)
    }

    /// Square geometry shared by all instances of a grid.
    pub fn instance_card() -> Self {
        Self::new(1.0, 1.0, 100, 100)
    }

    /// Row-major vertices from the top-left corner.
    pub fn vertices(&self) -> Vec<PlaneVertex> {
        let columns = self.segments_x + 1;
        let rows = self.segments_y + 1;
        let segment_width = self.width / self.segments_x as f32;
        let segment_height = self.height / self.segments_y as f32;
        let mut vertices = Vec::with_capacity((columns * rows) as usize);
        for iy in 0..rows {
            let y = iy as f32 * segment_height - self.height / 2.0;
            for ix in 0..columns {
                let x = ix as f32 * segment_width - self.width / 2.0;
                vertices.push(PlaneVertex {
                    position: [x, -y, 0.0],
                    tex_coords: [
                        ix as f32 / self.segments_x as f32,
                        1.0 - iy as f32 / self.segments_y as f32,
                    ],
                });
            }
        }
        vertices
    }

    /// Two counter-clockwise triangles per cell, facing +z.
    pub fn indices(&self) -> Vec<u32> {
        let columns = self.segments_x + 1;
        let mut indices = Vec::with_capacity((self.segments_x * self.segments_y * 6) as usize);
        for iy in 0..self.segments_y {
            for ix in 0..self.segments_x {
                let a = ix + columns * iy;
                let b = ix + columns * (iy + 1);
                let c = (ix + 1) + columns * (iy + 1);
                let d = (ix + 1) + columns * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        indices
    }
}

/// Uploaded plane geometry, shared by the front and back face of a card.
#[derive(Debug)]
pub struct PlaneMesh {
    pub geometry: PlaneGeometry,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl PlaneMesh {
    pub fn new(device: &wgpu::Device, geometry: PlaneGeometry, label: &str) -> Self {
        let vertices = geometry.vertices();
        let indices = geometry.indices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            geometry,
            vertex_buffer,
            index_buffer,
            num_elements: indices.len() as u32,
        }
    }
}
