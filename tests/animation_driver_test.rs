use foldgrid::{
    AnimationDriver, DriverConfig, Easing, Trigger,
    animation::{Tween, TweenScheduler},
};

use crate::common::test_utils::{EPSILON, assert_close};

mod common;

fn driver_with(ids: &[u32]) -> AnimationDriver {
    let mut driver = AnimationDriver::new(DriverConfig::default());
    ids.iter().for_each(|id| driver.register(*id));
    driver
}

#[test]
fn new_request_replaces_the_running_tween() {
    let mut driver = driver_with(&[7]);
    assert!(driver.animate_to(7, 1.0, 1.0, Easing::Linear));
    driver.tick(0.25);
    assert_close(driver.progress(7), 0.25, EPSILON);

    assert!(driver.animate_to(7, 0.3, 1.0, Easing::Linear));
    assert_eq!(driver.active_tweens(), 1);
    assert_eq!(driver.target(7), Some(0.3));

    driver.tick(0.5);
    assert_close(driver.progress(7), 0.275, EPSILON);
    driver.tick(0.5);
    assert_close(driver.progress(7), 0.3, EPSILON);
    assert!(!driver.is_animating(7));
    assert_eq!(driver.active_tweens(), 0);
}

#[test]
fn one_tween_per_entity() {
    let mut driver = driver_with(&[1, 2]);
    for _ in 0..5 {
        driver.trigger(1, Trigger::HoverEnter);
        driver.trigger(1, Trigger::HoverLeave);
    }
    driver.trigger(2, Trigger::Click);
    assert_eq!(driver.active_tweens(), 2);
}

#[test]
fn unknown_and_disposed_entities_are_ignored() {
    let mut driver = driver_with(&[3]);
    assert!(!driver.trigger(99, Trigger::Click));
    assert_eq!(driver.progress(99), 0.0);

    driver.trigger(3, Trigger::Click);
    driver.dispose(3);
    assert!(!driver.contains(3));
    assert_eq!(driver.active_tweens(), 0);
    assert!(!driver.trigger(3, Trigger::HoverEnter));
    driver.tick(1.0);
    assert_eq!(driver.progress(3), 0.0);
}

#[test]
fn hover_peeks_and_closes() {
    let mut driver = driver_with(&[0]);
    driver.trigger(0, Trigger::HoverEnter);
    assert!(driver.is_hovered(0));
    driver.tick(1.5);
    assert_close(driver.progress(0), 0.3, EPSILON);

    driver.trigger(0, Trigger::HoverLeave);
    driver.tick(0.5);
    assert_close(driver.progress(0), 0.0, EPSILON);
    assert!(!driver.is_hovered(0));
}

#[test]
fn click_holds_the_card_open() {
    let mut driver = driver_with(&[4]);
    driver.trigger(4, Trigger::HoverEnter);
    driver.trigger(4, Trigger::Click);
    assert!(driver.is_held(4));
    driver.tick(1.0);
    assert_close(driver.progress(4), 0.5, EPSILON);

    assert!(!driver.trigger(4, Trigger::HoverLeave));
    assert_eq!(driver.target(4), Some(1.0));
    driver.tick(1.0);
    assert_close(driver.progress(4), 1.0, EPSILON);

    assert!(driver.trigger(4, Trigger::Release));
    assert!(!driver.is_held(4));
    driver.tick(0.5);
    assert_close(driver.progress(4), 0.0, EPSILON);
}

#[test]
fn zero_duration_completes_on_next_tick() {
    let mut driver = driver_with(&[5]);
    driver.animate_to(5, 0.8, 0.0, Easing::Power2InOut);
    driver.tick(0.0);
    assert_close(driver.progress(5), 0.8, EPSILON);
    assert!(!driver.is_animating(5));
}

#[test]
fn non_finite_tick_changes_nothing() {
    let mut driver = driver_with(&[6]);
    driver.animate_to(6, 1.0, 1.0, Easing::Linear);
    driver.tick(0.5);
    let before = driver.progress(6);
    driver.tick(f32::NAN);
    driver.tick(f32::INFINITY);
    driver.tick(-1.0);
    assert_eq!(driver.progress(6), before);
}

#[test]
fn progress_stays_in_unit_range() {
    let mut driver = driver_with(&[8]);
    driver.animate_to(8, 4.0, 1.0, Easing::Linear);
    driver.tick(1.0);
    assert_eq!(driver.progress(8), 1.0);
}

#[test]
fn tween_eases_between_endpoints() {
    let mut tween = Tween::new(0.0, 1.0, 2.0, Easing::Power2InOut);
    assert_eq!(tween.value(), 0.0);
    tween.step(0.5);
    assert_close(tween.value(), 0.125, EPSILON);
    tween.step(10.0);
    assert!(tween.is_finished());
    assert_eq!(tween.value(), 1.0);
}

#[test]
fn scheduler_rejects_unknown_curves() {
    let mut scheduler = TweenScheduler::new();
    assert!(scheduler.start_named(0.0, 1.0, 1.0, "bounce.sideways").is_err());
    let handle = scheduler.start_named(0.0, 1.0, 1.0, "power2.inOut").unwrap();
    assert_eq!(scheduler.len(), 1);
    assert!(scheduler.cancel(handle));
    assert!(!scheduler.cancel(handle));
    assert!(scheduler.is_empty());
    assert!(scheduler.sample(handle).is_none());
}
