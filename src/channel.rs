//! The channel-level state machine over the two register images.
//!
//! [`ShieldState`] is the in-memory model of the whole board: both register
//! images plus the saved-direction table. It is pure state — nothing here
//! touches hardware. The [`Shield`](crate::Shield) owns one of these and
//! serializes it to the board on every flush.
//!
//! # Brake encoding
//!
//! A channel's brake bit says whether braking is engaged at all. While it is
//! engaged, the direction bit is repurposed as the brake sub-mode flag: set
//! means hard brake, clear means soft brake. The rotation direction that was
//! in effect when the brake engaged is parked in the saved-direction table
//! and written back the moment the brake releases.
//!
//! Two consequences worth spelling out:
//!
//! - Direction commands are ignored while a channel is braked. The request
//!   is dropped, not deferred.
//! - Switching between soft and hard brake directly never touches the saved
//!   direction; it keeps the value captured when the brake first engaged.
//!
//! # Example
//!
//! ```rust
//! use shift_shield::{Brake, Direction, ShieldState};
//!
//! let mut state = ShieldState::new(); // every channel wakes up hard-braked
//! state.set_brake(0, Brake::Off);
//! state.set_direction(0, Direction::Ccw);
//! assert_eq!(state.direction(0), Some(Direction::Ccw));
//!
//! // Braking hides the direction bit but remembers the rotation sense.
//! state.set_brake(0, Brake::Soft);
//! state.set_brake(0, Brake::Hard);
//! state.set_brake(0, Brake::Off);
//! assert_eq!(state.direction(0), Some(Direction::Ccw));
//! ```

use crate::registers::{Bank, Channel, MaskOp, RegisterImage};

/// Rotation sense of a motor channel.
///
/// Encoded in the channel's direction bit: set for clockwise, clear for
/// counter-clockwise. Defaults to [`Cw`](Self::Cw), which is the direction
/// every channel comes out of its power-on brake with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Clockwise rotation.
    #[default]
    Cw,
    /// Counter-clockwise rotation.
    Ccw,
}

impl Direction {
    /// Returns the direction as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::Cw => "cw",
            Direction::Ccw => "ccw",
        }
    }

    /// The opposite rotation sense.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Cw => Direction::Ccw,
            Direction::Ccw => Direction::Cw,
        }
    }
}

/// Brake mode for a motor channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Brake {
    /// Brake released; the direction bit carries the rotation sense.
    Off,
    /// Soft brake: motor leads isolated, free-wheeling stop.
    Soft,
    /// Hard brake: motor leads shorted, dynamic braking.
    ///
    /// This is the power-on state of every channel.
    #[default]
    Hard,
}

impl Brake {
    /// Returns the brake mode as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Brake::Off => "off",
            Brake::Soft => "soft",
            Brake::Hard => "hard",
        }
    }
}

/// Decoded state of one channel, as read back from the register images.
///
/// `direction` is the rotation sense while unbraked; while `braked` is true
/// it reflects the brake sub-mode bit instead (set = hard, clear = soft).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelState {
    /// Decoded direction bit.
    pub direction: Direction,
    /// Whether the brake bit is set (soft or hard, indistinguishable here).
    pub braked: bool,
}

/// In-memory state of the whole shield: both register images and the
/// saved-direction table.
///
/// All six channels share these two images, exactly as they share the two
/// physical shift registers. Mutators take a raw `u8` channel index and
/// ignore anything out of range; reads return `None` for a bad index. The
/// typed [`state_of`](Self::state_of) read exists for callers that hold a
/// [`Channel`] and therefore cannot be out of range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShieldState {
    bank_a: RegisterImage,
    bank_b: RegisterImage,
    saved_dir: [Direction; Channel::COUNT],
}

impl ShieldState {
    /// State matching the hardware at power-on: every channel hard-braked,
    /// every saved direction clockwise.
    pub const fn new() -> Self {
        Self {
            bank_a: RegisterImage::power_on(),
            bank_b: RegisterImage::power_on(),
            saved_dir: [Direction::Cw; Channel::COUNT],
        }
    }

    /// Raw byte of one register image, as it goes onto the wire.
    pub const fn bank_bits(&self, bank: Bank) -> u8 {
        match bank {
            Bank::A => self.bank_a.bits(),
            Bank::B => self.bank_b.bits(),
        }
    }

    fn image(&self, bank: Bank) -> RegisterImage {
        match bank {
            Bank::A => self.bank_a,
            Bank::B => self.bank_b,
        }
    }

    fn image_mut(&mut self, bank: Bank) -> &mut RegisterImage {
        match bank {
            Bank::A => &mut self.bank_a,
            Bank::B => &mut self.bank_b,
        }
    }

    /// Commands a rotation direction for a channel.
    ///
    /// Ignored for an out-of-range index. Ignored while the channel's brake
    /// is engaged; release the brake first.
    pub fn set_direction(&mut self, channel: u8, direction: Direction) {
        let channel = match Channel::from_index(channel) {
            Some(channel) => channel,
            None => return,
        };
        let spec = channel.spec();
        if self.image(spec.bank).contains(spec.brake_mask) {
            return;
        }

        let op = match direction {
            Direction::Cw => MaskOp::Set,
            Direction::Ccw => MaskOp::Clear,
        };
        self.image_mut(spec.bank).apply(spec.dir_mask, op);
    }

    /// Commands a brake mode for a channel.
    ///
    /// Ignored for an out-of-range index. Releasing an engaged brake
    /// restores the direction that was in effect when it engaged; engaging
    /// from released captures it. Soft/hard changes while already engaged
    /// only rewrite the sub-mode flag.
    pub fn set_brake(&mut self, channel: u8, brake: Brake) {
        let channel = match Channel::from_index(channel) {
            Some(channel) => channel,
            None => return,
        };
        let spec = channel.spec();
        let index = channel.index() as usize;
        let was_engaged = self.image(spec.bank).contains(spec.brake_mask);

        let (brake_op, mut dir_op) = match brake {
            Brake::Off => (MaskOp::Clear, MaskOp::Leave),
            Brake::Soft => (MaskOp::Set, MaskOp::Clear),
            Brake::Hard => (MaskOp::Set, MaskOp::Set),
        };

        if brake == Brake::Off {
            if was_engaged {
                dir_op = match self.saved_dir[index] {
                    Direction::Cw => MaskOp::Set,
                    Direction::Ccw => MaskOp::Clear,
                };
            }
        } else if !was_engaged {
            self.saved_dir[index] = if self.image(spec.bank).contains(spec.dir_mask) {
                Direction::Cw
            } else {
                Direction::Ccw
            };
        }

        let image = self.image_mut(spec.bank);
        image.apply(spec.brake_mask, brake_op);
        image.apply(spec.dir_mask, dir_op);
    }

    /// Decodes the direction bit of a channel, `None` for a bad index.
    ///
    /// While the channel is braked this reads the sub-mode flag, not a real
    /// rotation sense.
    pub fn direction(&self, channel: u8) -> Option<Direction> {
        let spec = Channel::from_index(channel)?.spec();
        Some(if self.image(spec.bank).contains(spec.dir_mask) {
            Direction::Cw
        } else {
            Direction::Ccw
        })
    }

    /// Decodes the brake bit of a channel, `None` for a bad index.
    pub fn brake_engaged(&self, channel: u8) -> Option<bool> {
        let spec = Channel::from_index(channel)?.spec();
        Some(self.image(spec.bank).contains(spec.brake_mask))
    }

    /// Decoded state of a channel known to be valid.
    pub fn state_of(&self, channel: Channel) -> ChannelState {
        let spec = channel.spec();
        let image = self.image(spec.bank);
        ChannelState {
            direction: if image.contains(spec.dir_mask) {
                Direction::Cw
            } else {
                Direction::Ccw
            },
            braked: image.contains(spec.brake_mask),
        }
    }
}

impl Default for ShieldState {
    fn default() -> Self {
        Self::new()
    }
}
