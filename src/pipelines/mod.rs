//! Render pipelines of the fold kernel.
//!
//! Every [`FoldVariant`] gets its own front/back pipeline pair, compiled with
//! the variant's constants from [`FoldConfig`].

pub mod fold;

use crate::{
    context::{FoldConfig, Layouts},
    deform::{FoldParams, FoldVariant},
};

pub use fold::{FoldPipeline, fold_shader_source, mk_fold_pipeline, mk_render_pipeline};

#[derive(Debug)]
pub struct Pipelines {
    pub single: FoldPipeline,
    pub instanced: FoldPipeline,
    pub strip: FoldPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        layouts: &Layouts,
        fold: &FoldConfig,
    ) -> Self {
        let mk = |variant| mk_fold_pipeline(device, color_format, layouts, variant, fold.get(variant));
        Self {
            single: mk(FoldVariant::Single),
            instanced: mk(FoldVariant::Instanced),
            strip: mk(FoldVariant::Strip),
        }
    }

    pub fn get(&self, variant: FoldVariant) -> &FoldPipeline {
        match variant {
            FoldVariant::Single => &self.single,
            FoldVariant::Instanced => &self.instanced,
            FoldVariant::Strip => &self.strip,
        }
    }

    pub fn rebuild(
        &mut self,
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        layouts: &Layouts,
        variant: FoldVariant,
        params: &FoldParams,
    ) {
        let pipeline = mk_fold_pipeline(device, color_format, layouts, variant, params);
        match variant {
            FoldVariant::Single => self.single = pipeline,
            FoldVariant::Instanced => self.instanced = pipeline,
            FoldVariant::Strip => self.strip = pipeline,
        }
    }
}
