#![allow(missing_docs)]
//! Host-level tests for relative, directional, and centering moves.

mod common;

use std::cell::RefCell;

use common::{MockPwm, PwmLog};
use servo_envoy::servo::{ServoConfig, ServoHandler, ServoHooks, Steering};
use servo_envoy::{Direction, Error};

fn handler(log: &RefCell<PwmLog>, config: ServoConfig) -> ServoHandler<'static, MockPwm<'_>> {
    ServoHandler::new(MockPwm::new(log), 0, config, ServoHooks::NONE).unwrap()
}

#[test]
fn left_then_right_moves_relative_to_center() {
    let log = RefCell::new(PwmLog::default());
    let mut servo = handler(&log, ServoConfig::DEFAULT);
    assert_eq!((servo.left_limit(), servo.right_limit()), (0, 180));

    servo.set_angle_to_left(30).unwrap();
    assert_eq!(servo.angle(), 60);

    servo.set_angle_to_right(30).unwrap();
    assert_eq!(servo.angle(), 120);

    servo.set_angle_to_center().unwrap();
    assert!(servo.is_angle_centered());
}

#[test]
fn relative_angles_are_checked_against_the_limits() {
    let log = RefCell::new(PwmLog::default());
    let config = ServoConfig {
        max_left_angle: 20,
        max_right_angle: 40,
        ..ServoConfig::DEFAULT
    };
    let mut servo = handler(&log, config);

    servo.set_angle_relative_to_center(-20).unwrap();
    assert_eq!(servo.angle(), 70);
    servo.set_angle_relative_to_center(40).unwrap();
    assert_eq!(servo.angle(), 130);

    assert_eq!(servo.set_angle_relative_to_center(-21), Err(Error::AngleOutOfRange));
    assert_eq!(servo.set_angle_relative_to_center(41), Err(Error::AngleOutOfRange));
    assert_eq!(servo.set_angle_relative_to_center(i16::MIN), Err(Error::AngleOutOfRange));
    assert_eq!(servo.set_angle_relative_to_center(i16::MAX), Err(Error::AngleOutOfRange));
    assert_eq!(servo.angle(), 130);

    servo.set_angle_relative_to_center(0).unwrap();
    assert!(servo.is_angle_centered());
}

#[test]
fn left_and_right_clamp_at_the_limits() {
    let log = RefCell::new(PwmLog::default());
    let config = ServoConfig {
        center_angle: 100,
        max_left_angle: 25,
        max_right_angle: 50,
        ..ServoConfig::DEFAULT
    };
    let mut servo = handler(&log, config);

    servo.set_angle_to_left(500).unwrap();
    assert_eq!(servo.angle(), 75);
    servo.set_angle_to_right(u16::MAX).unwrap();
    assert_eq!(servo.angle(), 150);
    servo.set_angle_to_left(0).unwrap();
    assert!(servo.is_angle_centered());
}

#[test]
fn clamping_respects_the_actuation_range() {
    let log = RefCell::new(PwmLog::default());
    let config = ServoConfig {
        center_angle: 170,
        max_right_angle: 90,
        ..ServoConfig::DEFAULT
    };
    let mut servo = handler(&log, config);
    assert_eq!(servo.right_limit(), 180);

    servo.set_angle_to_right(90).unwrap();
    assert_eq!(servo.angle(), 180);
}

#[test]
fn inverted_servo_turns_the_other_way() {
    let log = RefCell::new(PwmLog::default());
    let config = ServoConfig {
        direction_inverted: true,
        ..ServoConfig::DEFAULT
    };
    let mut servo = handler(&log, config);

    servo.set_angle_to_left(30).unwrap();
    assert_eq!(servo.angle(), 120);
    servo.set_angle_to_right(30).unwrap();
    assert_eq!(servo.angle(), 60);
}

#[test]
fn direction_aliases_match_angle_moves() {
    let log = RefCell::new(PwmLog::default());
    let mut servo = handler(&log, ServoConfig::DEFAULT);

    servo.set_direction_to_left(10).unwrap();
    assert_eq!(servo.angle(), 80);
    servo.set_direction_to_right(10).unwrap();
    assert_eq!(servo.angle(), 100);
    servo.set_direction_to_center().unwrap();
    assert!(servo.is_angle_centered());
}

#[test]
fn set_direction_dispatches_on_direction() {
    let log = RefCell::new(PwmLog::default());
    let mut servo = handler(&log, ServoConfig::DEFAULT);

    servo.set_direction(Direction::Left, 45).unwrap();
    assert_eq!(servo.angle(), 45);
    servo.set_direction(Direction::Left.inverted(), 45).unwrap();
    assert_eq!(servo.angle(), 135);
    servo.set_direction(Direction::Straight, 45).unwrap();
    assert!(servo.is_angle_centered());

    assert_eq!(servo.set_direction(Direction::Nil, 45), Err(Error::UnknownDirection));
    assert!(servo.is_angle_centered());
}

fn sweep(steering: &mut impl Steering) -> servo_envoy::Result<[u16; 3]> {
    steering.set_direction_to_left(20)?;
    let left = steering.angle();
    steering.set_direction_to_right(20)?;
    let right = steering.angle();
    steering.set_direction_to_center()?;
    Ok([left, right, steering.angle()])
}

#[test]
fn handler_steers_through_the_trait() {
    let log = RefCell::new(PwmLog::default());
    let mut servo = handler(&log, ServoConfig::DEFAULT);

    assert_eq!(sweep(&mut servo), Ok([70, 110, 90]));
    assert!(Steering::is_angle_centered(&servo));
    assert_eq!(log.borrow().pulses().len(), 4);
}
