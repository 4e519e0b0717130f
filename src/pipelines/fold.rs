use crate::{
    context::Layouts,
    data_structures::{
        instance::InstanceRaw,
        mesh::{PlaneVertex, Vertex},
        texture::Texture,
    },
    deform::{FoldParams, FoldVariant},
};

/// Front and back face pipelines of one fold variant.
///
/// Both run the same vertex kernel; they differ in which faces they cull and
/// in the image bound at group 0 when drawing.
#[derive(Debug)]
pub struct FoldPipeline {
    pub front: wgpu::RenderPipeline,
    pub back: wgpu::RenderPipeline,
}

/// Source of the fold shader with `params` compiled in.
pub fn fold_shader_source(params: &FoldParams) -> String {
    format!("{}\n{}", params.wgsl_prelude(), include_str!("fold.wgsl"))
}

pub fn mk_fold_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    layouts: &Layouts,
    variant: FoldVariant,
    params: &FoldParams,
) -> FoldPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("Fold Pipeline Layout ({})", variant.label())),
        bind_group_layouts: &[&layouts.image, &layouts.camera, &layouts.uniform],
        push_constant_ranges: &[],
    });

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("Fold Shader ({})", variant.label())),
        source: wgpu::ShaderSource::Wgsl(fold_shader_source(params).into()),
    });

    let (entry_point, vertex_layouts) = if variant.is_instanced() {
        ("vs_instanced", vec![PlaneVertex::desc(), InstanceRaw::desc()])
    } else {
        ("vs_plane", vec![PlaneVertex::desc()])
    };

    let mk = |cull_mode: wgpu::Face, face: &str| {
        mk_render_pipeline(
            device,
            &render_pipeline_layout,
            color_format,
            Some(wgpu::BlendState {
                alpha: wgpu::BlendComponent::REPLACE,
                color: wgpu::BlendComponent::REPLACE,
            }),
            Some(Texture::DEPTH_FORMAT),
            &vertex_layouts,
            &shader,
            entry_point,
            Some(cull_mode),
            &format!("Fold Pipeline ({}, {})", variant.label(), face),
        )
    };

    FoldPipeline {
        // the front face shows where the back face is culled, and vice versa
        front: mk(wgpu::Face::Back, "front"),
        back: mk(wgpu::Face::Front, "back"),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    depth_format: Option<wgpu::TextureFormat>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    shader: &wgpu::ShaderModule,
    vertex_entry_point: &str,
    cull_mode: Option<wgpu::Face>,
    label: &str,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vertex_entry_point),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
