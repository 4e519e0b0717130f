//! foldgrid
//!
//! Grids of double-sided, textured cards that fold and unfold through a
//! per-vertex deformation evaluated on the GPU. Runs natively and on the web
//! (WebGL through wgpu).
//!
//! Every card is a finely subdivided quad. A vertex kernel bends it row by row
//! around a horizontal axis as the card's progress goes from 0 to 1, with a
//! small idle sway and a "jump" in depth on top. Progress comes from an
//! interaction-driven animation driver (hover to peek, click to open) or from
//! the scroll position. Many cards can share a single instanced draw call,
//! each staggered by a per-instance delay.
//!
//! High-level modules
//! - `deform`: fold constants and the CPU mirror of the vertex kernel
//! - `easing`: easing curves used by the kernel and the tweens
//! - `animation`: tweens and the per-entity animation driver
//! - `scene`: grid layout, plane entities and scene composition
//! - `input`: per-frame input sampling (clock, pointer, scroll)
//! - `camera`: fixed perspective camera with pointer sway, picking rays
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: plane meshes, textures, uniforms, instances and cards
//! - `pipelines`: front/back fold pipelines for each kernel variant
//! - `render`: render composition for pipeline batching
//! - `pick`: CPU picking against deformed cards
//! - `resources`: helpers to load card images
//! - `flow`: high level flow control and the event loop
//! - `rng`: seeded random source for layouts

pub mod animation;
pub mod camera;
pub mod context;
pub mod data_structures;
pub mod deform;
pub mod easing;
pub mod flow;
pub mod input;
pub mod pick;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod rng;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use wgpu;
pub use winit;
pub use winit::dpi::PhysicalPosition;
pub use winit::event::WindowEvent;

pub use animation::{AnimationDriver, DriverConfig, Trigger};
pub use deform::{FoldParams, FoldVariant};
pub use easing::Easing;
pub use flow::{FlowConstructor, GraphicsFlow, Out, run};
pub use input::FrameInput;
pub use scene::{GridLayout, ImagePair, PlaneEntity, compose};
