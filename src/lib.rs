//! # shift-shield
//!
//! Driver for a six-channel DC/stepper motor shield controlled through two
//! daisy-chained serial-load shift registers.
//!
//! ## Features
//!
//! - **Hardware abstraction**: one [`Hal`] trait covering the platform's
//!   pin, PWM, ADC, pulse-timing and clock primitives
//! - **Register-image model**: direction and brake bits for all six
//!   channels shadowed in memory and pushed out over clock/latch/data
//! - **Brake semantics**: soft and hard braking with the rotation direction
//!   parked while braked and restored on release
//! - **Motor facades**: per-channel DC motors and two-coil 4-phase steppers
//!   composed over one shared shield
//! - **RC inputs**: pulse-width measurement on the two radio-control pins
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - the platform abstraction ([`Hal`], [`PinMode`], [`Level`])
//! - `registers` - register images, bit codec and the channel mask table
//! - `channel` - the direction/brake state machine over the images
//! - `pins` - the standard and alternate pin assignment tables
//! - `shield` - the shared shield object and the single hardware write path
//! - `motor`, `stepper` - the user-facing facades
//! - `hal` - concrete `Hal` implementations (mock for testing)
//!
//! Nothing reads back from the board; every "get" decodes the in-memory
//! images, which are authoritative for what was last clocked out.
//!
//! ## Example
//!
//! ```rust
//! use shift_shield::hal::MockHal;
//! use shift_shield::{Brake, Channel, DcMotor, Direction, PinConfig, Shield};
//!
//! // One shield, shared by every facade that drives it.
//! let shield = Shield::shared(MockHal::new(), PinConfig::standard());
//!
//! let mut motor = DcMotor::new(shield.clone(), Channel::M1);
//! motor.set_brake(Brake::Off); // channels power up hard-braked
//! motor.set_direction(Direction::Ccw);
//! motor.set_speed(180);
//!
//! assert_eq!(motor.direction(), Direction::Ccw);
//!
//! // The commanded bits went out on the wire, bank B before bank A.
//! let bytes = shield.borrow().hal().shifted_bytes();
//! assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xCF]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Direction/brake state machine over the register images.
pub mod channel;
/// Hardware abstraction layer implementations (mock for testing).
pub mod hal;
/// DC motor facade.
pub mod motor;
/// Pin assignment tables.
pub mod pins;
/// Register images, bit-mask codec and channel mask table.
pub mod registers;
/// The shared shield object and hardware sync.
pub mod shield;
/// Stepper motor facade.
pub mod stepper;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use channel::{Brake, ChannelState, Direction, ShieldState};
pub use motor::DcMotor;
pub use pins::{PinConfig, CURRENT_SENSE_PINS, SERIAL_CLOCK_PIN, SERIAL_LATCH_PIN};
pub use registers::{Bank, Channel, ChannelSpec, MaskOp, RegisterImage};
pub use shield::{Shield, SharedShield, ShieldError, ShieldSnapshot, DEFAULT_RC_TIMEOUT_US};
pub use stepper::Stepper;
pub use traits::{Hal, Level, PinMode};
