//! The shared shield object: register state, pin config and the HAL.
//!
//! One [`Shield`] models one physical board. It owns the in-memory
//! [`ShieldState`], the [`PinConfig`] and the platform [`Hal`], and it is
//! the only place bytes leave for the hardware: every mutation path funnels
//! through [`flush`](Shield::flush).
//!
//! All channels share one serial chain on the real board, so all facades
//! share one `Shield` behind [`SharedShield`]. The board never reports
//! state back; reads decode the in-memory images.
//!
//! # Example
//!
//! ```rust
//! use shift_shield::hal::MockHal;
//! use shift_shield::{Brake, Channel, Direction, PinConfig, Shield};
//!
//! let mut shield = Shield::new(MockHal::new(), PinConfig::standard());
//!
//! // Channels wake up hard-braked; release one and drive it.
//! shield.set_brake(Channel::M1, Brake::Off);
//! shield.set_direction(Channel::M1, Direction::Ccw);
//! shield.set_speed(Channel::M1, 180);
//!
//! let snapshot = shield.snapshot();
//! assert_eq!(snapshot.channels[0].direction, Direction::Ccw);
//! assert!(!snapshot.channels[0].braked);
//! ```

use core::cell::RefCell;
use core::fmt;

use alloc::rc::Rc;

use crate::channel::{Brake, ChannelState, Direction, ShieldState};
use crate::pins::{PinConfig, CURRENT_SENSE_PINS, SERIAL_CLOCK_PIN, SERIAL_LATCH_PIN};
use crate::registers::{Bank, Channel};
use crate::traits::{Hal, Level, PinMode};

/// Timeout used for an RC pulse read when the caller passes 0.
pub const DEFAULT_RC_TIMEOUT_US: u32 = 1_000_000;

/// Errors from the RC input read path.
///
/// Everything else on the shield follows the silent no-op policy; the RC
/// reader is the one operation with an answer the caller actually waits
/// for, so it reports failure explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShieldError {
    /// The RC input selector was not 1 or 2.
    InvalidChannel(u8),
    /// No complete pulse arrived before the timeout.
    NoSignal,
}

impl fmt::Display for ShieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShieldError::InvalidChannel(input) => {
                write!(f, "invalid RC input selector: {input}")
            }
            ShieldError::NoSignal => write!(f, "no pulse before timeout"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShieldError {}

/// A shield shared between facades.
///
/// Cheap to clone; every clone talks to the same register images and the
/// same serial chain, like every object on the physical bus does.
pub type SharedShield<H> = Rc<RefCell<Shield<H>>>;

/// Decoded view of the whole board at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShieldSnapshot {
    /// Raw byte of register image A (channels M1 to M4).
    pub bank_a: u8,
    /// Raw byte of register image B (channels M5 and M6).
    pub bank_b: u8,
    /// Decoded per-channel state, M1 through M6.
    pub channels: [ChannelState; Channel::COUNT],
}

/// Driver for one six-channel motor shield.
pub struct Shield<H: Hal> {
    hal: H,
    pins: PinConfig,
    state: ShieldState,
}

impl<H: Hal> Shield<H> {
    /// Brings the board up: configures the serial and RC pins, puts every
    /// channel in its power-on hard-brake state and flushes it out once.
    pub fn new(hal: H, pins: PinConfig) -> Self {
        let mut shield = Self {
            hal,
            pins,
            state: ShieldState::new(),
        };

        shield.hal.set_pin_mode(SERIAL_CLOCK_PIN, PinMode::Output);
        shield.hal.set_pin_mode(SERIAL_LATCH_PIN, PinMode::Output);
        shield.hal.set_pin_mode(pins.serial_data, PinMode::Output);
        shield.hal.set_pin_mode(pins.rc_input[0], PinMode::Input);
        shield.hal.set_pin_mode(pins.rc_input[1], PinMode::Input);

        shield.flush();
        shield
    }

    /// Like [`new`](Self::new), wrapped for sharing between facades.
    pub fn shared(hal: H, pins: PinConfig) -> SharedShield<H> {
        Rc::new(RefCell::new(Self::new(hal, pins)))
    }

    /// Serializes both register images to the board.
    ///
    /// Latch low, image B, image A (LSB first each), latch high. The order
    /// is fixed by the daisy-chain: B's register sits behind A's, so its
    /// byte goes in first.
    pub fn flush(&mut self) {
        self.hal.digital_write(SERIAL_LATCH_PIN, Level::Low);
        self.hal.shift_out(
            self.pins.serial_data,
            SERIAL_CLOCK_PIN,
            self.state.bank_bits(Bank::B),
        );
        self.hal.shift_out(
            self.pins.serial_data,
            SERIAL_CLOCK_PIN,
            self.state.bank_bits(Bank::A),
        );
        self.hal.digital_write(SERIAL_LATCH_PIN, Level::High);
    }

    /// Commands a rotation direction and pushes it to the board.
    ///
    /// Dropped if the channel is currently braked.
    pub fn set_direction(&mut self, channel: Channel, direction: Direction) {
        self.state.set_direction(channel.index(), direction);
        self.flush();
    }

    /// Commands a brake mode and pushes it to the board.
    pub fn set_brake(&mut self, channel: Channel, brake: Brake) {
        self.state.set_brake(channel.index(), brake);
        self.flush();
    }

    /// Writes a PWM duty cycle (0 to 255) to a channel's speed pin.
    ///
    /// Speed lives outside the shift registers, so no flush is involved.
    pub fn set_speed(&mut self, channel: Channel, duty: u8) {
        self.hal.analog_write(self.pins.pwm_pin(channel), duty);
    }

    /// Samples a channel's current-sense input, raw ADC counts.
    pub fn sense_current(&mut self, channel: Channel) -> u16 {
        self.hal
            .analog_read(CURRENT_SENSE_PINS[channel.index() as usize])
    }

    /// Measures the width of the next high pulse on RC input 1 or 2, in
    /// microseconds.
    ///
    /// A `timeout_us` of 0 selects [`DEFAULT_RC_TIMEOUT_US`]. An invalid
    /// selector fails before anything blocks; a timed-out measurement is
    /// [`ShieldError::NoSignal`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use shift_shield::hal::MockHal;
    /// use shift_shield::{PinConfig, Shield, ShieldError};
    ///
    /// let mut shield = Shield::new(MockHal::new(), PinConfig::standard());
    /// shield.hal_mut().set_pulse(4, 1500);
    ///
    /// assert_eq!(shield.rc_input(1, 0), Ok(1500));
    /// assert_eq!(shield.rc_input(3, 0), Err(ShieldError::InvalidChannel(3)));
    /// ```
    pub fn rc_input(&mut self, input: u8, timeout_us: u32) -> Result<u32, ShieldError> {
        let pin = self
            .pins
            .rc_input_pin(input)
            .ok_or(ShieldError::InvalidChannel(input))?;
        let timeout = if timeout_us == 0 {
            DEFAULT_RC_TIMEOUT_US
        } else {
            timeout_us
        };
        match self.hal.pulse_duration(pin, Level::High, timeout) {
            0 => Err(ShieldError::NoSignal),
            duration => Ok(duration),
        }
    }

    /// The in-memory register state.
    pub fn state(&self) -> &ShieldState {
        &self.state
    }

    /// Mutable register state, for callers that batch several bit changes
    /// before one [`flush`](Self::flush).
    pub fn state_mut(&mut self) -> &mut ShieldState {
        &mut self.state
    }

    /// The pin assignment in effect.
    pub fn pins(&self) -> &PinConfig {
        &self.pins
    }

    /// The platform HAL.
    pub fn hal(&self) -> &H {
        &self.hal
    }

    /// Mutable access to the platform HAL.
    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    /// Monotonic milliseconds from the platform clock.
    pub fn now_ms(&mut self) -> u64 {
        self.hal.now_ms()
    }

    /// Decoded view of the whole board.
    pub fn snapshot(&self) -> ShieldSnapshot {
        let mut channels = [ChannelState::default(); Channel::COUNT];
        for channel in Channel::ALL {
            channels[channel.index() as usize] = self.state.state_of(channel);
        }
        ShieldSnapshot {
            bank_a: self.state.bank_bits(Bank::A),
            bank_b: self.state.bank_bits(Bank::B),
            channels,
        }
    }

    /// Driver interface version, hard-coded to 1.
    pub const fn version() -> u8 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockEvent, MockHal};

    #[test]
    fn version_is_one() {
        assert_eq!(Shield::<MockHal>::version(), 1);
    }

    #[test]
    fn new_configures_pins_and_flushes_brake_state() {
        let shield = Shield::new(MockHal::new(), PinConfig::standard());
        let hal = shield.hal();

        assert_eq!(hal.pin_mode_of(SERIAL_CLOCK_PIN), Some(PinMode::Output));
        assert_eq!(hal.pin_mode_of(SERIAL_LATCH_PIN), Some(PinMode::Output));
        assert_eq!(hal.pin_mode_of(12), Some(PinMode::Output));
        assert_eq!(hal.pin_mode_of(4), Some(PinMode::Input));
        assert_eq!(hal.pin_mode_of(8), Some(PinMode::Input));

        // Power-on image, B first then A.
        assert_eq!(hal.shifted_bytes().as_slice(), &[0xFF, 0xFF]);
    }

    #[test]
    fn flush_protocol_order() {
        let mut shield = Shield::new(MockHal::new(), PinConfig::standard());
        shield.hal_mut().clear_events();

        shield.flush();

        assert_eq!(
            shield.hal().events.as_slice(),
            &[
                MockEvent::DigitalWrite {
                    pin: SERIAL_LATCH_PIN,
                    level: Level::Low
                },
                MockEvent::ShiftOut {
                    data_pin: 12,
                    clock_pin: SERIAL_CLOCK_PIN,
                    value: 0xFF
                },
                MockEvent::ShiftOut {
                    data_pin: 12,
                    clock_pin: SERIAL_CLOCK_PIN,
                    value: 0xFF
                },
                MockEvent::DigitalWrite {
                    pin: SERIAL_LATCH_PIN,
                    level: Level::High
                },
            ]
        );
    }

    #[test]
    fn mutations_reach_the_wire() {
        let mut shield = Shield::new(MockHal::new(), PinConfig::standard());
        shield.set_brake(Channel::M1, Brake::Off);

        // Brake bit 0x10 cleared, direction restored to clockwise.
        let bytes = shield.hal().shifted_bytes();
        assert_eq!(&bytes.as_slice()[bytes.len() - 2..], &[0xFF, 0xEF]);
    }

    #[test]
    fn rc_input_uses_selected_pin_and_default_timeout() {
        let mut shield = Shield::new(MockHal::new(), PinConfig::standard());
        shield.hal_mut().set_pulse(8, 900);

        assert_eq!(shield.rc_input(2, 0), Ok(900));
        assert!(shield.hal().events.contains(&MockEvent::PulseRead {
            pin: 8,
            level: Level::High,
            timeout_us: DEFAULT_RC_TIMEOUT_US,
        }));
    }

    #[test]
    fn snapshot_decodes_power_on_state() {
        let shield = Shield::new(MockHal::new(), PinConfig::standard());
        let snapshot = shield.snapshot();

        assert_eq!(snapshot.bank_a, 0xFF);
        assert_eq!(snapshot.bank_b, 0xFF);
        for state in snapshot.channels {
            assert!(state.braked);
            assert_eq!(state.direction, Direction::Cw);
        }
    }
}
