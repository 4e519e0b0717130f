//! Fixed perspective camera with a pointer-driven sway.
//!
//! The camera looks down -z from `(0, 0, 3)`. Each frame its x position eases
//! a little toward the pointer, which is all the camera motion a card wall
//! needs. There is no orbit control.

use cgmath::{InnerSpace, Matrix4, Point3, Rad, SquareMatrix, Vector2, Vector3, Vector4, perspective};
use wgpu::util::DeviceExt;

/// cgmath produces OpenGL clip space (z in [-1, 1]); wgpu expects z in [0, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    /// Point the camera looks at, relative to its position.
    pub direction: Vector3<f32>,
    /// How far the camera follows the pointer in x.
    pub sway: f32,
    /// Fraction of the remaining distance covered each frame.
    pub follow: f32,
}

impl Camera {
    pub fn new<P: Into<Point3<f32>>>(position: P) -> Self {
        Self {
            position: position.into(),
            direction: -Vector3::unit_z(),
            sway: 0.1,
            follow: 0.1,
        }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.direction.normalize(), Vector3::unit_y())
    }

    /// Ease the x position toward `pointer.x * sway`.
    pub fn follow_pointer(&mut self, pointer: Vector2<f32>) {
        let target = pointer.x.clamp(-1.0, 1.0) * self.sway;
        self.position.x += (target - self.position.x) * self.follow;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new((0.0, 0.0, 3.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    /// World-space width and height visible at `distance` from the eye.
    pub fn viewport_at(&self, distance: f32) -> Vector2<f32> {
        let height = 2.0 * (self.fovy.0 / 2.0).tan() * distance.abs();
        Vector2::new(height * self.aspect, height)
    }
}

/// A ray in world space, used for picking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    /// Unit length.
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Ray through `ndc` (x and y in `[-1, 1]`) from the near to the far plane
    /// of `view_proj`. `None` if the matrix cannot be inverted.
    pub fn from_ndc(ndc: Vector2<f32>, view_proj: Matrix4<f32>) -> Option<Self> {
        let inverse = view_proj.invert()?;
        let unproject = |z: f32| {
            let p: Vector4<f32> = inverse * Vector4::new(ndc.x, ndc.y, z, 1.0);
            Point3::new(p.x / p.w, p.y / p.w, p.z / p.w)
        };
        let near = unproject(0.0);
        let far = unproject(1.0);
        let direction = far - near;
        if direction.magnitude2() <= f32::EPSILON {
            return None;
        }
        Some(Self {
            origin: near,
            direction: direction.normalize(),
        })
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }

    pub fn view_proj(&self) -> Matrix4<f32> {
        self.view_proj.into()
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device, camera: Camera, projection: &Projection) -> Self {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, projection);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
            label: Some("camera_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            camera,
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Recompute the view-projection and upload it.
    pub fn write_to_buffer(&mut self, queue: &wgpu::Queue, projection: &Projection) {
        self.uniform.update_view_proj(&self.camera, projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }

    /// Distance from the eye to the z = 0 plane the cards sit around.
    pub fn focal_distance(&self) -> f32 {
        self.camera.position.z.abs().max(f32::EPSILON)
    }
}
