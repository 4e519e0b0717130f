use foldgrid::{
    Easing,
    easing::ease_in_out_quad,
};

use crate::common::test_utils::{EPSILON, assert_close};

mod common;

#[test]
fn endpoints_are_exact() {
    assert_eq!(ease_in_out_quad(0.0), 0.0);
    assert_eq!(ease_in_out_quad(1.0), 1.0);
    assert_eq!(ease_in_out_quad(0.5), 0.5);
}

#[test]
fn quarter_points() {
    assert_close(ease_in_out_quad(0.25), 0.125, EPSILON);
    assert_close(ease_in_out_quad(0.75), 0.875, EPSILON);
}

#[test]
fn monotonic_on_unit_interval() {
    let samples: Vec<f32> = (0..=1000).map(|i| ease_in_out_quad(i as f32 / 1000.0)).collect();
    for pair in samples.windows(2) {
        assert!(pair[1] >= pair[0], "{} followed by {}", pair[0], pair[1]);
    }
    let coarse: Vec<f32> = [0.0, 0.25, 0.5, 0.75, 1.0]
        .iter()
        .map(|t| ease_in_out_quad(*t))
        .collect();
    assert!(coarse.windows(2).all(|pair| pair[1] > pair[0]));
}

#[test]
fn inputs_outside_unit_interval_are_clamped() {
    assert_eq!(ease_in_out_quad(-3.0), 0.0);
    assert_eq!(ease_in_out_quad(7.0), 1.0);
}

#[test]
fn named_curves() {
    assert_close(Easing::Linear.apply(0.3), 0.3, EPSILON);
    assert_close(Easing::Power2In.apply(0.5), 0.25, EPSILON);
    assert_close(Easing::Power2Out.apply(0.5), 0.75, EPSILON);
    assert_close(Easing::Power2InOut.apply(0.25), 0.125, EPSILON);
    for easing in [Easing::Linear, Easing::Power2In, Easing::Power2Out, Easing::Power2InOut] {
        assert_eq!(easing.apply(0.0), 0.0, "{}", easing.name());
        assert_eq!(easing.apply(1.0), 1.0, "{}", easing.name());
    }
}

#[test]
fn parse_curve_names() {
    assert_eq!("power2.inOut".parse::<Easing>().unwrap(), Easing::Power2InOut);
    assert_eq!("power2.in".parse::<Easing>().unwrap(), Easing::Power2In);
    assert_eq!("power2.out".parse::<Easing>().unwrap(), Easing::Power2Out);
    assert_eq!("linear".parse::<Easing>().unwrap(), Easing::Linear);
    assert_eq!(Easing::default(), Easing::Power2InOut);
    for easing in [Easing::Linear, Easing::Power2In, Easing::Power2Out, Easing::Power2InOut] {
        assert_eq!(easing.name().parse::<Easing>().unwrap(), easing);
    }
}

#[test]
fn unknown_curve_is_an_error() {
    let err = "elastic.out".parse::<Easing>().unwrap_err();
    assert!(err.to_string().contains("elastic.out"));
}
