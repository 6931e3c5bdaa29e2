//! Edge case and boundary condition tests for the shield driver

use shift_shield::hal::{MockEvent, MockHal};
use shift_shield::{
    Bank, Brake, Channel, DcMotor, Direction, PinConfig, Shield, ShieldError, ShieldState, Stepper,
};

// ============================================================================
// Out-of-range channel indices
// ============================================================================

#[test]
fn index_six_is_a_noop_for_every_state_operation() {
    let mut state = ShieldState::new();
    let pristine = state.clone();

    state.set_direction(6, Direction::Cw);
    state.set_direction(6, Direction::Ccw);
    state.set_brake(6, Brake::Off);
    state.set_brake(6, Brake::Soft);
    state.set_brake(6, Brake::Hard);

    assert_eq!(state, pristine);
    assert_eq!(state.bank_bits(Bank::A), 0xFF);
    assert_eq!(state.bank_bits(Bank::B), 0xFF);
}

#[test]
fn out_of_range_reads_are_explicit_sentinels() {
    let state = ShieldState::new();
    for index in [6, 7, 42, u8::MAX] {
        assert_eq!(state.direction(index), None);
        assert_eq!(state.brake_engaged(index), None);
    }
}

// ============================================================================
// RC input selector boundaries
// ============================================================================

#[test]
fn invalid_rc_selector_fails_without_touching_hardware() {
    let mut shield = Shield::new(MockHal::new(), PinConfig::standard());
    shield.hal_mut().clear_events();

    for input in [0, 3, 4, u8::MAX] {
        assert_eq!(
            shield.rc_input(input, 0),
            Err(ShieldError::InvalidChannel(input))
        );
    }

    // The failure is decided before any pulse measurement starts.
    let pulse_reads = shield
        .hal()
        .events
        .iter()
        .filter(|event| matches!(event, MockEvent::PulseRead { .. }))
        .count();
    assert_eq!(pulse_reads, 0);
}

// ============================================================================
// Saved direction across brake sequences
// ============================================================================

#[test]
fn direction_commands_while_braked_change_nothing() {
    let shield = Shield::shared(MockHal::new(), PinConfig::standard());
    let mut motor = DcMotor::new(shield.clone(), Channel::M3);

    motor.set_brake(Brake::Off);
    motor.set_direction(Direction::Ccw);
    motor.set_brake(Brake::Soft);

    let before = shield.borrow().snapshot();
    motor.set_direction(Direction::Cw);
    motor.set_direction(Direction::Ccw);
    let after = shield.borrow().snapshot();
    assert_eq!(before, after);

    // And the parked direction is still the pre-brake one.
    motor.set_brake(Brake::Off);
    assert_eq!(motor.direction(), Direction::Ccw);
}

#[test]
fn saved_direction_survives_long_soft_hard_shuffles() {
    let shield = Shield::shared(MockHal::new(), PinConfig::standard());
    let mut motor = DcMotor::new(shield, Channel::M4);

    motor.set_brake(Brake::Off);
    motor.set_direction(Direction::Ccw);

    motor.set_brake(Brake::Soft);
    for _ in 0..5 {
        motor.set_brake(Brake::Hard);
        motor.set_brake(Brake::Soft);
    }
    motor.set_brake(Brake::Off);

    assert_eq!(motor.direction(), Direction::Ccw);
}

#[test]
fn re_engaging_after_release_captures_the_new_direction() {
    let shield = Shield::shared(MockHal::new(), PinConfig::standard());
    let mut motor = DcMotor::new(shield, Channel::M2);

    motor.set_brake(Brake::Off);
    motor.set_direction(Direction::Ccw);
    motor.set_brake(Brake::Hard);
    motor.set_brake(Brake::Off);

    motor.set_direction(Direction::Cw);
    motor.set_brake(Brake::Soft);
    motor.set_brake(Brake::Off);

    assert_eq!(motor.direction(), Direction::Cw);
}

// ============================================================================
// Cross-bank isolation
// ============================================================================

#[test]
fn bank_a_commands_never_touch_bank_b() {
    let shield = Shield::shared(MockHal::new(), PinConfig::standard());

    for channel in [Channel::M1, Channel::M2, Channel::M3, Channel::M4] {
        let mut motor = DcMotor::new(shield.clone(), channel);
        motor.set_brake(Brake::Off);
        motor.set_direction(Direction::Ccw);
        motor.set_brake(Brake::Soft);
    }

    assert_eq!(shield.borrow().snapshot().bank_b, 0xFF);
}

#[test]
fn bank_b_commands_never_touch_bank_a() {
    let shield = Shield::shared(MockHal::new(), PinConfig::standard());

    for channel in [Channel::M5, Channel::M6] {
        let mut motor = DcMotor::new(shield.clone(), channel);
        motor.set_brake(Brake::Off);
        motor.set_direction(Direction::Ccw);
    }

    assert_eq!(shield.borrow().snapshot().bank_a, 0xFF);
}

// ============================================================================
// Duty cycle and stepper boundaries
// ============================================================================

#[test]
fn duty_cycle_extremes_pass_through() {
    let shield = Shield::shared(MockHal::new(), PinConfig::standard());
    let mut motor = DcMotor::new(shield.clone(), Channel::M5);

    motor.set_speed(0);
    assert_eq!(shield.borrow().hal().duty(6), Some(0));
    motor.set_speed(255);
    assert_eq!(shield.borrow().hal().duty(6), Some(255));
}

#[test]
fn stepper_with_zero_steps_per_revolution_is_harmless() {
    let shield = Shield::shared(MockHal::new(), PinConfig::standard());
    let mut stepper = Stepper::new(shield, 0, Channel::M1, Channel::M2);

    stepper.set_speed(u32::MAX); // zero inter-step delay
    stepper.step(3);
    // A one-step revolution pins the position at zero.
    assert_eq!(stepper.position(), 0);
}

#[test]
fn stepper_handles_extreme_step_counts() {
    let shield = Shield::shared(MockHal::new(), PinConfig::standard());
    let mut stepper = Stepper::new(shield, 200, Channel::M1, Channel::M2);
    stepper.set_speed(u32::MAX); // zero inter-step delay

    stepper.step(i16::MAX);
    assert_eq!(stepper.position(), (i16::MAX as u16) % 200);

    let mut stepper_back = {
        let shield = Shield::shared(MockHal::new(), PinConfig::standard());
        Stepper::new(shield, 200, Channel::M5, Channel::M6)
    };
    stepper_back.set_speed(u32::MAX);
    stepper_back.step(i16::MIN);
    // 32768 steps backward from 0 on a 200-step revolution.
    assert_eq!(stepper_back.position(), (200 - (32768 % 200)) % 200);
}
