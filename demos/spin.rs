//! Desktop demo driving the shield against the mock HAL.
//!
//! Runs a short DC motor command sequence and a stepper move, printing the
//! register images after each stage so the bit-level effect of every command
//! is visible.
//!
//! ```sh
//! cargo run --example spin
//! ```

use shift_shield::hal::MockHal;
use shift_shield::{Brake, Channel, DcMotor, Direction, PinConfig, Shield, Stepper};

fn print_banks(label: &str, shield: &shift_shield::SharedShield<MockHal>) {
    let snapshot = shield.borrow().snapshot();
    println!(
        "{label:<28} bank A = {:#010b}  bank B = {:#010b}",
        snapshot.bank_a, snapshot.bank_b
    );
}

fn main() -> anyhow::Result<()> {
    // Auto-tick lets the stepper's busy-wait make progress without a real
    // clock behind it.
    let shield = Shield::shared(MockHal::new().with_auto_tick(1), PinConfig::standard());
    print_banks("power-on (all hard-braked)", &shield);

    let mut motor = DcMotor::new(shield.clone(), Channel::M1);
    motor.set_brake(Brake::Off);
    print_banks("M1 brake released", &shield);

    motor.set_direction(Direction::Ccw);
    motor.set_speed(180);
    print_banks("M1 counter-clockwise", &shield);

    motor.set_brake(Brake::Soft);
    print_banks("M1 soft brake", &shield);
    motor.set_brake(Brake::Off);
    print_banks("M1 released again", &shield);
    println!("M1 direction restored: {}", motor.direction().as_str());

    let mut stepper = Stepper::new(shield.clone(), 200, Channel::M5, Channel::M6);
    stepper.set_speed(120);
    stepper.step(4);
    print_banks("stepper after 4 steps", &shield);

    let pulse = shield.borrow_mut().rc_input(1, 0);
    println!("RC input 1: {pulse:?}");

    Ok(())
}
