use std::sync::Arc;

use anyhow::Context as _;
use cgmath::Vector2;
use winit::window::Window;

use crate::{
    camera::{Camera, CameraResources, Projection, Ray},
    data_structures::{texture, uniforms::uniform_layout},
    deform::{FoldParams, FoldVariant},
    input::{FrameInput, InputSampler},
    pipelines::Pipelines,
    resources::image_layout,
};

/// Fold constants each variant's pipeline is compiled with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoldConfig {
    pub single: FoldParams,
    pub instanced: FoldParams,
    pub strip: FoldParams,
}

impl FoldConfig {
    pub fn get(&self, variant: FoldVariant) -> &FoldParams {
        match variant {
            FoldVariant::Single => &self.single,
            FoldVariant::Instanced => &self.instanced,
            FoldVariant::Strip => &self.strip,
        }
    }

    pub fn set(&mut self, variant: FoldVariant, params: FoldParams) {
        match variant {
            FoldVariant::Single => self.single = params,
            FoldVariant::Instanced => self.instanced = params,
            FoldVariant::Strip => self.strip = params,
        }
    }
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            single: FoldParams::single(),
            instanced: FoldParams::instanced(),
            strip: FoldParams::strip(),
        }
    }
}

/// Bind group layouts shared by every card resource.
#[derive(Clone, Debug)]
pub struct Layouts {
    /// Group 0: card face image and sampler.
    pub image: wgpu::BindGroupLayout,
    /// Group 1: camera.
    pub camera: wgpu::BindGroupLayout,
    /// Group 2: per-entity uniforms.
    pub uniform: wgpu::BindGroupLayout,
}

/// Convert an `0xRRGGBB` sRGB colour into the linear clear colour of an sRGB surface.
pub fn clear_colour_from_hex(hex: u32) -> wgpu::Color {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f64 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    wgpu::Color {
        r: channel(16),
        g: channel(8),
        b: channel(0),
        a: 1.0,
    }
}

/// Background behind the cards, a warm paper tone.
pub const DEFAULT_CLEAR_HEX: u32 = 0xeadfd0;

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub(crate) pipelines: Pipelines,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub projection: Projection,
    pub layouts: Layouts,
    pub fold: FoldConfig,
    pub clear_colour: wgpu::Color,
    pub input: InputSampler,
}

impl Context {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable graphics adapter")?;
        log::info!("Requesting device and queue from {:?}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                ..Default::default()
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Images are sampled through sRGB views, so the surface has to be sRGB too
        // or every colour comes out darker
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no texture formats")?;
        let present_mode = surface_caps
            .present_modes
            .first()
            .copied()
            .unwrap_or(wgpu::PresentMode::Fifo);
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let projection = Projection::new(config.width, config.height, cgmath::Deg(45.0), 0.1, 100.0);
        let camera = CameraResources::new(&device, Camera::default(), &projection);

        let layouts = Layouts {
            image: image_layout(&device),
            camera: camera.bind_group_layout.clone(),
            uniform: uniform_layout(&device),
        };

        let fold = FoldConfig::default();
        let pipelines = Pipelines::new(&device, config.format, &layouts, &fold);

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        let mut input = InputSampler::new(config.width, config.height);
        input.set_viewport(projection.viewport_at(camera.focal_distance()));

        Ok(Self {
            window,
            depth_texture,
            pipelines,
            surface,
            device,
            queue,
            config,
            camera,
            projection,
            layouts,
            fold,
            clear_colour: clear_colour_from_hex(DEFAULT_CLEAR_HEX),
            input,
        })
    }

    /// Replace the constants of `variant` and rebuild its pipelines.
    ///
    /// Meant for `on_init` or `Out::Configure`; cards already built keep
    /// working since the fold constants are not part of their resources.
    pub fn set_fold_params(&mut self, variant: FoldVariant, params: FoldParams) {
        self.fold.set(variant, params);
        self.pipelines
            .rebuild(&self.device, self.config.format, &self.layouts, variant, &params);
    }

    /// World-space size of the visible area at the card plane.
    pub fn viewport(&self) -> Vector2<f32> {
        self.projection.viewport_at(self.camera.focal_distance())
    }

    /// This frame's input snapshot.
    pub fn frame_input(&self) -> FrameInput {
        self.input.sample()
    }

    /// World-space ray under the pointer.
    pub fn pointer_ray(&self) -> Option<Ray> {
        Ray::from_ndc(self.input.pointer(), self.camera.uniform.view_proj())
    }
}

/// What flow constructors get to build their GPU resources with.
#[derive(Clone, Debug)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub layouts: Layouts,
    pub fold: FoldConfig,
}

impl From<&Context> for InitContext {
    fn from(ctx: &Context) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            layouts: ctx.layouts.clone(),
            fold: ctx.fold,
        }
    }
}
