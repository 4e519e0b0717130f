//! Per-frame input sampling.
//!
//! The [`InputSampler`] accumulates window events between frames; once per
//! frame the host takes a [`FrameInput`] snapshot of it and hands that to the
//! flows. Flows never read raw window state directly.

use cgmath::Vector2;
use instant::Instant;
use winit::{dpi::PhysicalPosition, event::MouseScrollDelta};

/// Pixels one wheel line scrolls.
const LINE_HEIGHT_PX: f32 = 40.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MouseButtonState {
    Left,
    Right,
    None,
}

/// Everything the frame loop samples from input for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameInput {
    /// Seconds since the sampler was created.
    pub elapsed: f32,
    /// Pointer in normalized device coordinates, `[-1, 1]` with y up.
    pub pointer: Vector2<f32>,
    /// World-space size of the visible area at the focal plane.
    pub viewport: Vector2<f32>,
    /// Scroll offset over all pages, in `[0, 1]`.
    pub scroll: f32,
}

impl FrameInput {
    /// Pointer divided by the viewport dimensions.
    pub fn mouse_normalized(&self) -> Vector2<f32> {
        let div = |p: f32, v: f32| if v.abs() > f32::EPSILON { p / v } else { 0.0 };
        Vector2::new(
            div(self.pointer.x, self.viewport.x),
            div(self.pointer.y, self.viewport.y),
        )
    }

    /// `scroll` remapped so that `[from, from + distance]` covers `[0, 1]`.
    pub fn scroll_range(&self, from: f32, distance: f32) -> f32 {
        scroll_range(self.scroll, from, distance)
    }
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            pointer: Vector2::new(0.0, 0.0),
            viewport: Vector2::new(1.0, 1.0),
            scroll: 0.0,
        }
    }
}

/// Clamped linear remap of a scroll offset onto a sub-range.
pub fn scroll_range(offset: f32, from: f32, distance: f32) -> f32 {
    if distance <= 0.0 {
        return if offset >= from { 1.0 } else { 0.0 };
    }
    ((offset - from) / distance).clamp(0.0, 1.0)
}

/// Accumulates pointer, scroll and clock state between frames.
#[derive(Debug)]
pub struct InputSampler {
    start: Instant,
    /// Last cursor position in physical pixels.
    pub coords: PhysicalPosition<f64>,
    pub pressed: MouseButtonState,
    surface_size: (u32, u32),
    viewport: Vector2<f32>,
    scroll_px: f32,
    /// Number of screen heights the scroll offset spans.
    pub pages: f32,
}

impl InputSampler {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            start: Instant::now(),
            // far off-screen until the first cursor event
            coords: PhysicalPosition::new(-1.0e4, -1.0e4),
            pressed: MouseButtonState::None,
            surface_size: (width, height),
            viewport: Vector2::new(1.0, 1.0),
            scroll_px: 0.0,
            pages: 3.0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32, viewport: Vector2<f32>) {
        self.surface_size = (width, height);
        self.viewport = viewport;
    }

    pub fn set_viewport(&mut self, viewport: Vector2<f32>) {
        self.viewport = viewport;
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    /// Cursor position in normalized device coordinates.
    pub fn pointer(&self) -> Vector2<f32> {
        let (width, height) = self.surface_size;
        pointer_ndc(self.coords, width, height)
    }

    pub fn scroll(&mut self, delta: &MouseScrollDelta) {
        let px = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT_PX,
            MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
        };
        let max = self.max_scroll_px();
        self.scroll_px = (self.scroll_px + px).clamp(0.0, max);
    }

    fn max_scroll_px(&self) -> f32 {
        (self.pages - 1.0).max(0.0) * self.surface_size.1 as f32
    }

    /// Scroll offset in `[0, 1]`.
    pub fn scroll_offset(&self) -> f32 {
        let max = self.max_scroll_px();
        if max > 0.0 { self.scroll_px / max } else { 0.0 }
    }

    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    pub fn sample(&self) -> FrameInput {
        FrameInput {
            elapsed: self.elapsed(),
            pointer: self.pointer(),
            viewport: self.viewport,
            scroll: self.scroll_offset(),
        }
    }
}

/// Convert a physical cursor position into `[-1, 1]` with y pointing up.
pub fn pointer_ndc(coords: PhysicalPosition<f64>, width: u32, height: u32) -> Vector2<f32> {
    if width == 0 || height == 0 {
        return Vector2::new(0.0, 0.0);
    }
    let x = (coords.x / width as f64) * 2.0 - 1.0;
    let y = -((coords.y / height as f64) * 2.0 - 1.0);
    Vector2::new(x as f32, y as f32)
}
