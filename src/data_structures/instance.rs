//! Instance attribute table.
//!
//! Per-instance data (offset, Y rotation, scale, progress delay) is computed
//! once from a deterministic grid layout and uploaded as a vertex buffer with
//! instance step mode. The table is never written again: a different layout
//! means building a new table.

use cgmath::Vector3;
use wgpu::util::DeviceExt;

use crate::{data_structures::mesh::Vertex, scene::GridLayout};

/// Scale every instance is drawn at.
pub const INSTANCE_SCALE: f32 = 0.5;
/// Delay of the last instance approaches this value.
pub const MAX_PROGRESS_DELAY: f32 = 0.5;

/// One row of the instance table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceRecord {
    pub offset: Vector3<f32>,
    /// Radians. Constant zero in the shipped layout, kept for variation.
    pub rotation_y: f32,
    pub scale: f32,
    /// Subtracted from the shared progress, in `[0, 1)`.
    pub progress_delay: f32,
}

impl InstanceRecord {
    pub fn to_raw(&self) -> InstanceRaw {
        InstanceRaw {
            offset: self.offset.into(),
            rotation_y: self.rotation_y,
            scale: self.scale,
            progress_delay: self.progress_delay,
        }
    }
}

/// Immutable table of instance records, one per drawn instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstanceTable {
    records: Vec<InstanceRecord>,
}

impl InstanceTable {
    /// Lay out `count` instances on `layout`'s grid.
    ///
    /// Zero instances yields an empty table, which draws nothing.
    pub fn build(count: usize, layout: &GridLayout) -> Self {
        let records = layout
            .positions(count)
            .into_iter()
            .enumerate()
            .map(|(i, offset)| InstanceRecord {
                offset,
                rotation_y: 0.0,
                scale: INSTANCE_SCALE,
                progress_delay: i as f32 / count as f32 * MAX_PROGRESS_DELAY,
            })
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[InstanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_raw(&self) -> Vec<InstanceRaw> {
        self.records.iter().map(InstanceRecord::to_raw).collect()
    }

    /// Upload the table into an instance vertex buffer. No `COPY_DST`: the
    /// rows are not written after this point.
    pub fn upload(&self, device: &wgpu::Device) -> wgpu::Buffer {
        let data = self.to_raw();
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Instance Attribute Buffer"),
            contents: bytemuck::cast_slice(&data),
            usage: wgpu::BufferUsages::VERTEX,
        })
    }
}

/**
 * The raw instance is the actual data stored on the GPU
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    offset: [f32; 3],
    rotation_y: f32,
    scale: f32,
    progress_delay: f32,
}

/**
 * Instance attributes follow the vertex attributes (locations 0 and 1) and
 * start at location 5 so the vertex layout can grow without renumbering.
 */
impl Vertex for InstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            // Only advance to the next row when the shader starts a new instance
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}
