//! Pin assignment tables for the shield.
//!
//! The serial clock and latch lines and the six current-sense inputs are
//! fixed by the board layout. The serial data line, the two RC inputs and
//! the M1/M6 PWM lines move when the alternate jumper set is used; the other
//! four PWM lines stay put.

use crate::registers::Channel;

/// Clock line for loading the shift registers.
pub const SERIAL_CLOCK_PIN: u8 = 2;

/// Latch line for loading the shift registers.
pub const SERIAL_LATCH_PIN: u8 = 7;

/// Current-sense analog inputs per channel, M1 through M6.
///
/// Board inputs A0, A2, A1, A3, A4, A5 in channel order (the M2/M3 swap is
/// how the board is routed).
pub const CURRENT_SENSE_PINS: [u8; Channel::COUNT] = [14, 16, 15, 17, 18, 19];

/// The movable pin assignments.
///
/// [`standard`](Self::standard) and [`alternate`](Self::alternate) are the
/// two jumper-selectable tables; the struct is plain data, so a custom
/// wiring can be described too.
///
/// | role | standard | alternate |
/// |------|----------|-----------|
/// | serial data | 12 | 0 |
/// | RC input 1 | 4 | 3 |
/// | RC input 2 | 8 | 11 |
/// | M1 PWM | 11 | 8 |
/// | M2..M5 PWM | 9, 5, 10, 6 | 9, 5, 10, 6 |
/// | M6 PWM | 3 | 4 |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinConfig {
    /// Data line for loading the shift registers.
    pub serial_data: u8,
    /// RC pulse inputs 1 and 2.
    pub rc_input: [u8; 2],
    /// PWM speed pins per channel, M1 through M6.
    pub pwm: [u8; Channel::COUNT],
}

impl PinConfig {
    /// The standard jumper set.
    pub const fn standard() -> Self {
        Self {
            serial_data: 12,
            rc_input: [4, 8],
            pwm: [11, 9, 5, 10, 6, 3],
        }
    }

    /// The alternate jumper set.
    pub const fn alternate() -> Self {
        Self {
            serial_data: 0,
            rc_input: [3, 11],
            pwm: [8, 9, 5, 10, 6, 4],
        }
    }

    /// PWM speed pin of a channel.
    #[inline]
    pub const fn pwm_pin(&self, channel: Channel) -> u8 {
        self.pwm[channel.index() as usize]
    }

    /// Pin of RC input 1 or 2; `None` for any other selector.
    pub const fn rc_input_pin(&self, input: u8) -> Option<u8> {
        match input {
            1 => Some(self.rc_input[0]),
            2 => Some(self.rc_input[1]),
            _ => None,
        }
    }
}

impl Default for PinConfig {
    fn default() -> Self {
        Self::standard()
    }
}
