//! Interaction-driven progress.
//!
//! The [`AnimationDriver`] turns pointer triggers into tweens of each entity's
//! progress. Each entity has at most one tween in flight; a new request
//! replaces the running one outright and starts from the value reached so
//! far. The driver only exposes values, the frame loop pulls them into the
//! uniform block.

use std::collections::HashMap;

use crate::{
    animation::tween::{TweenHandle, TweenScheduler},
    deform::sanitize_progress,
    easing::Easing,
};

/// Interaction that moves an entity's progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Open the card fully and hold it open.
    Click,
    /// Peek: fold partially.
    HoverEnter,
    /// Close again unless the card is held open.
    HoverLeave,
    /// Drop the hold and close.
    Release,
}

/// Target, duration and curve of one kind of transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub target: f32,
    /// Seconds.
    pub duration: f32,
    pub easing: Easing,
}

impl TweenSpec {
    pub const fn new(target: f32, duration: f32) -> Self {
        Self {
            target,
            duration,
            easing: Easing::Power2InOut,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriverConfig {
    pub click: TweenSpec,
    pub hover_enter: TweenSpec,
    pub hover_leave: TweenSpec,
    pub release: TweenSpec,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            click: TweenSpec::new(1.0, 2.0),
            hover_enter: TweenSpec::new(0.3, 1.5),
            hover_leave: TweenSpec::new(0.0, 0.5),
            release: TweenSpec::new(0.0, 0.5),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Slot {
    value: f32,
    tween: Option<TweenHandle>,
    hovered: bool,
    held: bool,
}

#[derive(Debug, Default)]
pub struct AnimationDriver {
    scheduler: TweenScheduler,
    slots: HashMap<u32, Slot>,
    pub config: DriverConfig,
}

impl AnimationDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            scheduler: TweenScheduler::new(),
            slots: HashMap::new(),
            config,
        }
    }

    /// Start tracking entity `id` at progress 0. Registering twice keeps the
    /// existing state.
    pub fn register(&mut self, id: u32) {
        self.slots.entry(id).or_default();
    }

    /// Stop tracking entity `id` and drop its tween. Later triggers for it
    /// are ignored.
    pub fn dispose(&mut self, id: u32) {
        if let Some(slot) = self.slots.remove(&id) {
            if let Some(handle) = slot.tween {
                self.scheduler.cancel(handle);
            }
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.slots.contains_key(&id)
    }

    /// React to an interaction. Returns `false` if nothing was started, for
    /// instance because the entity is unknown or held open.
    pub fn trigger(&mut self, id: u32, trigger: Trigger) -> bool {
        let Some(slot) = self.slots.get_mut(&id) else {
            log::debug!("Ignoring {:?} for unknown entity {}", trigger, id);
            return false;
        };
        let spec = match trigger {
            Trigger::Click => {
                slot.held = true;
                self.config.click
            }
            Trigger::HoverEnter => {
                slot.hovered = true;
                if slot.held {
                    return false;
                }
                self.config.hover_enter
            }
            Trigger::HoverLeave => {
                slot.hovered = false;
                if slot.held {
                    return false;
                }
                self.config.hover_leave
            }
            Trigger::Release => {
                slot.held = false;
                self.config.release
            }
        };
        self.animate_to(id, spec.target, spec.duration, spec.easing)
    }

    /// Tween entity `id` from its current value to `target`, replacing any
    /// tween in flight.
    pub fn animate_to(&mut self, id: u32, target: f32, duration: f32, easing: Easing) -> bool {
        let Some(slot) = self.slots.get_mut(&id) else {
            log::debug!("Ignoring tween request for unknown entity {}", id);
            return false;
        };
        if let Some(previous) = slot.tween.take() {
            self.scheduler.cancel(previous);
        }
        slot.tween = Some(self.scheduler.start(slot.value, target, duration, easing));
        true
    }

    /// Advance all tweens by `dt` seconds and latch their values.
    pub fn tick(&mut self, dt: f32) {
        self.scheduler.tick(dt);
        for slot in self.slots.values_mut() {
            let Some(handle) = slot.tween else {
                continue;
            };
            match self.scheduler.sample(handle) {
                Some(sample) => {
                    slot.value = sample.value;
                    if sample.finished {
                        self.scheduler.cancel(handle);
                        slot.tween = None;
                    }
                }
                None => slot.tween = None,
            }
        }
    }

    /// Current progress of entity `id` in `[0, 1]`, or 0 if it is unknown.
    pub fn progress(&self, id: u32) -> f32 {
        self.slots
            .get(&id)
            .map_or(0.0, |slot| sanitize_progress(slot.value))
    }

    /// Target of the tween in flight for `id`, if any.
    pub fn target(&self, id: u32) -> Option<f32> {
        let handle = self.slots.get(&id)?.tween?;
        self.scheduler.get(handle).map(|tween| tween.target())
    }

    pub fn is_animating(&self, id: u32) -> bool {
        self.slots.get(&id).is_some_and(|slot| slot.tween.is_some())
    }

    pub fn is_held(&self, id: u32) -> bool {
        self.slots.get(&id).is_some_and(|slot| slot.held)
    }

    pub fn is_hovered(&self, id: u32) -> bool {
        self.slots.get(&id).is_some_and(|slot| slot.hovered)
    }

    /// Number of tweens in flight across all entities.
    pub fn active_tweens(&self) -> usize {
        self.scheduler.len()
    }

    /// Ids of every tracked entity, unordered.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.keys().copied()
    }
}
