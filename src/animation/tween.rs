//! Tweens and the scheduler that advances them.

use slotmap::{SlotMap, new_key_type};

use crate::easing::Easing;

new_key_type! {
    /// Handle of a tween owned by a [`TweenScheduler`].
    pub struct TweenHandle;
}

/// Eased transition of one scalar from `from` to `to` over `duration` seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: if duration.is_finite() { duration.max(0.0) } else { 0.0 },
            elapsed: 0.0,
            easing,
        }
    }

    pub fn step(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    /// Normalized time in `[0, 1]`. A zero-length tween is always done.
    pub fn time(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.easing.apply(self.time())
    }

    pub fn is_finished(&self) -> bool {
        self.time() >= 1.0
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }
}

/// What polling a tween returns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSample {
    pub value: f32,
    pub finished: bool,
}

/// Owns every in-flight tween. Finished tweens stay pollable until they are
/// canceled, so the last value of a transition is never lost between a tick
/// and the next poll.
#[derive(Debug, Default)]
pub struct TweenScheduler {
    tweens: SlotMap<TweenHandle, Tween>,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
        }
    }

    pub fn start(&mut self, from: f32, to: f32, duration: f32, easing: Easing) -> TweenHandle {
        self.tweens.insert(Tween::new(from, to, duration, easing))
    }

    /// Like [`start`](Self::start) with the curve given by name, e.g. `"power2.inOut"`.
    pub fn start_named(
        &mut self,
        from: f32,
        to: f32,
        duration: f32,
        easing: &str,
    ) -> anyhow::Result<TweenHandle> {
        let easing: Easing = easing.parse()?;
        Ok(self.start(from, to, duration, easing))
    }

    pub fn get(&self, handle: TweenHandle) -> Option<&Tween> {
        self.tweens.get(handle)
    }

    pub fn sample(&self, handle: TweenHandle) -> Option<TweenSample> {
        self.tweens.get(handle).map(|tween| TweenSample {
            value: tween.value(),
            finished: tween.is_finished(),
        })
    }

    /// Drop a tween. Unknown or already removed handles are ignored.
    pub fn cancel(&mut self, handle: TweenHandle) -> bool {
        self.tweens.remove(handle).is_some()
    }

    /// Advance every tween by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        for (_, tween) in self.tweens.iter_mut() {
            tween.step(dt);
        }
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
