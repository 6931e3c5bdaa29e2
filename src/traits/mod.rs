//! Trait definitions for hardware abstraction.
//!
//! The driver reaches the outside world through exactly one seam: the
//! [`Hal`] trait, which bundles the platform's pin, PWM, ADC, pulse-timing
//! and clock primitives. Concrete implementations live in
//! [`crate::hal`] — a mock for desktop testing, and whatever the target
//! board provides.

pub mod hardware;

pub use hardware::*;
