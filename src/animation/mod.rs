//! Progress animation: tweens and the interaction-driven driver on top.
//!
//! - `tween` holds eased scalar transitions and the scheduler that ticks them
//! - `driver` maps pointer triggers to last-writer-wins tweens per entity

pub mod driver;
pub mod tween;

pub use driver::{AnimationDriver, DriverConfig, Trigger, TweenSpec};
pub use tween::{Tween, TweenHandle, TweenSample, TweenScheduler};
