//! Stepper motor facade over two shield channels.
//!
//! A stepper occupies two channels, one per coil, and walks them through
//! the classic 4-phase full-step sequence. Stepping is paced by a busy-wait
//! against the platform's millisecond clock, not by sleeping: [`step`]
//! re-checks elapsed time in a loop and fires a phase change once the
//! inter-step delay has passed. Callers that need to interleave other work
//! invoke it repeatedly with small counts.
//!
//! [`step`]: Stepper::step
//!
//! # Example
//!
//! ```rust
//! use shift_shield::hal::MockHal;
//! use shift_shield::{Channel, PinConfig, Shield, Stepper};
//!
//! let shield = Shield::shared(MockHal::new().with_auto_tick(1), PinConfig::standard());
//! let mut stepper = Stepper::new(shield.clone(), 200, Channel::M1, Channel::M2);
//!
//! stepper.set_speed(60); // 5 ms between steps at 200 steps/rev
//! stepper.step(4);       // four full steps forward
//! stepper.step(-2);      // two back
//! ```

use crate::channel::{Brake, Direction};
use crate::registers::Channel;
use crate::shield::SharedShield;
use crate::traits::Hal;

/// Coil direction pattern for each of the four full-step phases.
const PHASE_PATTERN: [(Direction, Direction); 4] = [
    (Direction::Cw, Direction::Ccw),
    (Direction::Ccw, Direction::Ccw),
    (Direction::Ccw, Direction::Cw),
    (Direction::Cw, Direction::Cw),
];

/// One 4-phase full-step stepper motor on the shield.
pub struct Stepper<H: Hal> {
    shield: SharedShield<H>,
    coil_a: Channel,
    coil_b: Channel,
    steps_per_rev: u16,
    step_number: u16,
    step_delay_ms: u32,
    last_step_ms: u64,
    forward: bool,
}

impl<H: Hal> Stepper<H> {
    /// Binds a stepper to two coil channels.
    ///
    /// Drives both coils to full duty, clockwise, brake released, and
    /// pushes that to the board in one flush. A `steps_per_rev` of 0 is
    /// treated as 1.
    pub fn new(
        shield: SharedShield<H>,
        steps_per_rev: u16,
        coil_a: Channel,
        coil_b: Channel,
    ) -> Self {
        {
            let mut shield = shield.borrow_mut();
            shield.set_speed(coil_a, u8::MAX);
            shield.set_speed(coil_b, u8::MAX);

            let state = shield.state_mut();
            state.set_direction(coil_a.index(), Direction::Cw);
            state.set_direction(coil_b.index(), Direction::Cw);
            state.set_brake(coil_a.index(), Brake::Off);
            state.set_brake(coil_b.index(), Brake::Off);
            shield.flush();
        }

        Self {
            shield,
            coil_a,
            coil_b,
            steps_per_rev: steps_per_rev.max(1),
            step_number: 0,
            step_delay_ms: 0,
            last_step_ms: 0,
            forward: true,
        }
    }

    /// Sets the stepping rate in revolutions per minute.
    ///
    /// The inter-step delay is `60_000 / steps_per_rev / rpm` milliseconds,
    /// in integer math; an `rpm` of 0 is treated as 1. High rates can
    /// truncate to a zero delay, which steps as fast as [`step`](Self::step)
    /// is polled.
    pub fn set_speed(&mut self, rpm: u32) {
        self.step_delay_ms = 60_000 / u32::from(self.steps_per_rev) / rpm.max(1);
    }

    /// Moves `count` full steps, positive forward, negative backward.
    ///
    /// Blocks until all steps have fired, busy-polling the platform clock
    /// between them. A count of 0 only latches the direction for a later
    /// call.
    pub fn step(&mut self, count: i16) {
        if count > 0 {
            self.forward = true;
        }
        if count < 0 {
            self.forward = false;
        }

        let mut steps_left = count.unsigned_abs();
        while steps_left > 0 {
            let now = self.shield.borrow_mut().now_ms();
            if now.wrapping_sub(self.last_step_ms) < u64::from(self.step_delay_ms) {
                continue;
            }
            self.last_step_ms = now;

            if self.forward {
                self.step_number += 1;
                if self.step_number == self.steps_per_rev {
                    self.step_number = 0;
                }
            } else {
                if self.step_number == 0 {
                    self.step_number = self.steps_per_rev;
                }
                self.step_number -= 1;
            }
            steps_left -= 1;

            self.apply_phase();
        }
    }

    /// Current position within a revolution, 0 to `steps_per_rev - 1`.
    pub fn position(&self) -> u16 {
        self.step_number
    }

    /// Writes the coil pattern for the current phase and flushes once.
    fn apply_phase(&mut self) {
        let (dir_a, dir_b) = PHASE_PATTERN[usize::from(self.step_number % 4)];

        let mut shield = self.shield.borrow_mut();
        let state = shield.state_mut();
        state.set_direction(self.coil_a.index(), dir_a);
        state.set_direction(self.coil_b.index(), dir_b);
        shield.flush();
    }
}
