//! Hardware Abstraction Layer implementations.
//!
//! Concrete implementations of the [`Hal`](crate::traits::Hal) trait.
//! The mock ships unconditionally and is what the test suite runs against;
//! a real board binds the trait to its own GPIO layer (see the trait docs
//! for the mapping).

pub mod mock;

pub use mock::*;
