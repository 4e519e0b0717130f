//! Seeded pseudo-random source for layouts.
//!
//! Grid jitter and fold handedness are drawn from a [`LayoutRng`] seeded by
//! the layout, so the same layout always builds the same scene.

/// xorshift32 generator. Small, fast and fully determined by its seed.
#[derive(Clone, Debug)]
pub struct LayoutRng {
    state: u32,
}

impl LayoutRng {
    pub fn new(seed: u32) -> Self {
        // xorshift gets stuck on zero
        let state = if seed == 0 { 0x9E37_79B9 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        // top 24 bits fit the f32 mantissa exactly
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform float in `[lo, hi)`.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// `+1.0` or `-1.0` with equal probability.
    pub fn sign(&mut self) -> f32 {
        if self.next_f32() > 0.5 { 1.0 } else { -1.0 }
    }
}

impl Default for LayoutRng {
    fn default() -> Self {
        Self::new(0xDEAD_BEEF)
    }
}
