//! DC motor facade over one shield channel.
//!
//! # Example
//!
//! ```rust
//! use shift_shield::hal::MockHal;
//! use shift_shield::{Brake, Channel, DcMotor, Direction, PinConfig, Shield};
//!
//! let shield = Shield::shared(MockHal::new(), PinConfig::standard());
//! let mut motor = DcMotor::new(shield.clone(), Channel::M2);
//!
//! motor.set_brake(Brake::Off);
//! motor.set_direction(Direction::Cw);
//! motor.set_speed(200);
//!
//! assert_eq!(motor.direction(), Direction::Cw);
//! assert!(!motor.brake_engaged());
//! ```

use crate::channel::{Brake, Direction};
use crate::registers::Channel;
use crate::shield::SharedShield;
use crate::traits::Hal;

/// One DC motor on the shield.
///
/// Holds a shared reference to the shield rather than inheriting from it;
/// several motors over the same shield are the normal case and they all
/// mutate the same two register images.
pub struct DcMotor<H: Hal> {
    shield: SharedShield<H>,
    channel: Channel,
}

impl<H: Hal> DcMotor<H> {
    /// Binds a motor facade to a channel.
    pub fn new(shield: SharedShield<H>, channel: Channel) -> Self {
        Self { shield, channel }
    }

    /// The channel this motor drives.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Sets the PWM duty cycle, 0 (off) to 255 (full).
    pub fn set_speed(&mut self, duty: u8) {
        self.shield.borrow_mut().set_speed(self.channel, duty);
    }

    /// Commands a rotation direction and pushes it to the board.
    ///
    /// Dropped while the brake is engaged; call
    /// [`set_brake(Brake::Off)`](Self::set_brake) first.
    pub fn set_direction(&mut self, direction: Direction) {
        self.shield.borrow_mut().set_direction(self.channel, direction);
    }

    /// Commands a brake mode and pushes it to the board.
    pub fn set_brake(&mut self, brake: Brake) {
        self.shield.borrow_mut().set_brake(self.channel, brake);
    }

    /// Direction bit as last commanded.
    ///
    /// While braked this reads the brake sub-mode flag, not a rotation
    /// sense.
    pub fn direction(&self) -> Direction {
        self.shield.borrow().state().state_of(self.channel).direction
    }

    /// Whether braking (soft or hard) is engaged.
    pub fn brake_engaged(&self) -> bool {
        self.shield.borrow().state().state_of(self.channel).braked
    }

    /// Samples this motor's current-sense input, raw ADC counts.
    pub fn sense_current(&mut self) -> u16 {
        self.shield.borrow_mut().sense_current(self.channel)
    }
}
