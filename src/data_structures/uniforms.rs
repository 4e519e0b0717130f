//! Per-entity uniform block.
//!
//! [`PlaneUniforms`] is the only channel through which per-frame state reaches
//! the fold kernel. The frame loop assigns it once per frame, the kernel reads
//! it for every vertex.

use cgmath::{Matrix4, SquareMatrix, Vector2};
use wgpu::util::DeviceExt;

use crate::{
    deform::{sanitize_progress, sanitize_time},
    input::FrameInput,
};

/// CPU view of one entity's uniforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneUniforms {
    pub time: f32,
    pub mouse: Vector2<f32>,
    pub progress: f32,
    /// `+1.0` or `-1.0`.
    pub direction: f32,
    pub entity_id: u32,
}

impl PlaneUniforms {
    pub fn new(entity_id: u32, direction: f32) -> Self {
        Self {
            time: 0.0,
            mouse: Vector2::new(0.0, 0.0),
            progress: 0.0,
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            entity_id,
        }
    }

    /// Assign this frame's snapshot. `progress` comes from the animation
    /// driver (or a scroll range) and is clamped here before it can reach the
    /// kernel.
    pub fn update(&mut self, frame: &FrameInput, progress: f32) {
        if !progress.is_finite() {
            log::warn!(
                "Entity {} received non-finite progress {}; using 0",
                self.entity_id,
                progress
            );
        }
        self.progress = sanitize_progress(progress);
        self.time = sanitize_time(frame.elapsed);
        self.mouse = frame.mouse_normalized();
    }

    pub fn to_raw(&self, model: Matrix4<f32>) -> PlaneUniformRaw {
        PlaneUniformRaw {
            model: model.into(),
            time: self.time,
            progress: self.progress,
            direction: self.direction,
            entity_id: self.entity_id as f32,
            mouse: self.mouse.into(),
            _padding: [0.0; 2],
        }
    }
}

impl Default for PlaneUniforms {
    fn default() -> Self {
        Self::new(0, 1.0)
    }
}

/// GPU layout, matches `Uniforms` in `fold.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneUniformRaw {
    model: [[f32; 4]; 4],
    time: f32,
    progress: f32,
    direction: f32,
    entity_id: f32,
    mouse: [f32; 2],
    // Uniforms require 16 byte (4 float) spacing
    _padding: [f32; 2],
}

impl Default for PlaneUniformRaw {
    fn default() -> Self {
        PlaneUniforms::default().to_raw(Matrix4::identity())
    }
}

pub fn uniform_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("fold_uniform_bind_group_layout"),
    })
}

/// Uniform buffer and bind group of one entity (or one instanced grid).
#[derive(Debug)]
pub struct UniformResources {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl UniformResources {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[PlaneUniformRaw::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(label),
        });
        Self { buffer, bind_group }
    }

    pub fn write(&self, queue: &wgpu::Queue, raw: PlaneUniformRaw) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[raw]));
    }
}
