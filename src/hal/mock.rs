//! Mock HAL for testing without hardware.
//!
//! [`MockHal`] implements [`Hal`] entirely in memory: it records every call
//! in an ordered event log and tracks per-pin state, so tests can assert
//! both what the driver did and in what order it did it. The clock is
//! controllable, with an optional auto-tick so busy-wait loops make progress
//! under test.
//!
//! # Example
//!
//! ```rust
//! use shift_shield::hal::MockHal;
//! use shift_shield::{Hal, Level, PinMode};
//!
//! let mut hal = MockHal::new();
//! hal.set_pin_mode(7, PinMode::Output);
//! hal.digital_write(7, Level::High);
//! assert_eq!(hal.level(7), Level::High);
//!
//! hal.set_analog(14, 512);
//! assert_eq!(hal.analog_read(14), 512);
//! ```
//!
//! # Controlling time
//!
//! ```rust
//! use shift_shield::hal::MockHal;
//! use shift_shield::Hal;
//!
//! let mut hal = MockHal::new();
//! assert_eq!(hal.now_ms(), 0);
//! hal.advance(100);
//! assert_eq!(hal.now_ms(), 100);
//!
//! // With an auto-tick the clock moves on every read, which is what a
//! // busy-wait stepping loop needs to terminate in a test.
//! let mut hal = MockHal::new().with_auto_tick(5);
//! assert_eq!(hal.now_ms(), 0);
//! assert_eq!(hal.now_ms(), 5);
//! ```

use crate::traits::{Hal, Level, PinMode};

/// Highest pin number the mock tracks, exclusive.
const PIN_COUNT: usize = 32;

/// Capacity of the recorded event log.
const EVENT_CAPACITY: usize = 256;

/// One recorded HAL call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockEvent {
    /// A `set_pin_mode` call.
    SetPinMode {
        /// Pin that was configured.
        pin: u8,
        /// Mode it was configured to.
        mode: PinMode,
    },
    /// A `digital_write` call.
    DigitalWrite {
        /// Pin that was written.
        pin: u8,
        /// Level it was driven to.
        level: Level,
    },
    /// An `analog_write` call.
    AnalogWrite {
        /// Pin that was written.
        pin: u8,
        /// Duty cycle that was set.
        duty: u8,
    },
    /// A `shift_out` call.
    ShiftOut {
        /// Data pin of the transfer.
        data_pin: u8,
        /// Clock pin of the transfer.
        clock_pin: u8,
        /// Byte that was clocked out.
        value: u8,
    },
    /// A `pulse_duration` call.
    PulseRead {
        /// Pin that was measured.
        pin: u8,
        /// Level that was waited for.
        level: Level,
        /// Timeout the caller passed.
        timeout_us: u32,
    },
}

/// In-memory [`Hal`] implementation for tests and desktop development.
///
/// Events land in the public [`events`](Self::events) log in call order;
/// per-pin state is queried through the accessor methods. Pins at or above
/// an internal bound (32) are tolerated and simply not tracked.
#[derive(Debug)]
pub struct MockHal {
    /// Ordered log of every call made against this mock.
    pub events: heapless::Vec<MockEvent, EVENT_CAPACITY>,
    pin_modes: [Option<PinMode>; PIN_COUNT],
    levels: [Level; PIN_COUNT],
    duties: [Option<u8>; PIN_COUNT],
    analog: [u16; PIN_COUNT],
    pulses: [u32; PIN_COUNT],
    now: u64,
    auto_tick_ms: u64,
}

impl MockHal {
    /// Creates a mock with all pins unconfigured, all inputs at zero and the
    /// clock at 0 ms.
    pub fn new() -> Self {
        Self {
            events: heapless::Vec::new(),
            pin_modes: [None; PIN_COUNT],
            levels: [Level::Low; PIN_COUNT],
            duties: [None; PIN_COUNT],
            analog: [0; PIN_COUNT],
            pulses: [0; PIN_COUNT],
            now: 0,
            auto_tick_ms: 0,
        }
    }

    /// Makes every `now_ms` read advance the clock by `ms` afterwards.
    pub fn with_auto_tick(mut self, ms: u64) -> Self {
        self.auto_tick_ms = ms;
        self
    }

    /// Sets the clock to an absolute value in milliseconds.
    pub fn set_time(&mut self, ms: u64) {
        self.now = ms;
    }

    /// Advances the clock by `ms` milliseconds.
    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }

    /// Presets the value `analog_read` returns for a pin.
    pub fn set_analog(&mut self, pin: u8, value: u16) {
        if let Some(slot) = Self::slot(pin) {
            self.analog[slot] = value;
        }
    }

    /// Presets the pulse width `pulse_duration` reports for a pin.
    /// Zero (the default) simulates a timeout.
    pub fn set_pulse(&mut self, pin: u8, duration_us: u32) {
        if let Some(slot) = Self::slot(pin) {
            self.pulses[slot] = duration_us;
        }
    }

    /// Last configured mode of a pin, if any.
    pub fn pin_mode_of(&self, pin: u8) -> Option<PinMode> {
        Self::slot(pin).and_then(|slot| self.pin_modes[slot])
    }

    /// Current digital level of a pin.
    pub fn level(&self, pin: u8) -> Level {
        Self::slot(pin)
            .map(|slot| self.levels[slot])
            .unwrap_or(Level::Low)
    }

    /// Last PWM duty written to a pin, if any.
    pub fn duty(&self, pin: u8) -> Option<u8> {
        Self::slot(pin).and_then(|slot| self.duties[slot])
    }

    /// Every byte shifted out so far, in transfer order.
    pub fn shifted_bytes(&self) -> heapless::Vec<u8, EVENT_CAPACITY> {
        self.events
            .iter()
            .filter_map(|event| match event {
                MockEvent::ShiftOut { value, .. } => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// Forgets all recorded events; pin state is kept.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn slot(pin: u8) -> Option<usize> {
        let slot = pin as usize;
        (slot < PIN_COUNT).then_some(slot)
    }

    fn record(&mut self, event: MockEvent) {
        self.events.push(event).ok();
    }
}

impl Default for MockHal {
    fn default() -> Self {
        Self::new()
    }
}

impl Hal for MockHal {
    fn set_pin_mode(&mut self, pin: u8, mode: PinMode) {
        if let Some(slot) = Self::slot(pin) {
            self.pin_modes[slot] = Some(mode);
        }
        self.record(MockEvent::SetPinMode { pin, mode });
    }

    fn digital_write(&mut self, pin: u8, level: Level) {
        if let Some(slot) = Self::slot(pin) {
            self.levels[slot] = level;
        }
        self.record(MockEvent::DigitalWrite { pin, level });
    }

    fn analog_write(&mut self, pin: u8, duty: u8) {
        if let Some(slot) = Self::slot(pin) {
            self.duties[slot] = Some(duty);
        }
        self.record(MockEvent::AnalogWrite { pin, duty });
    }

    fn analog_read(&mut self, pin: u8) -> u16 {
        Self::slot(pin).map(|slot| self.analog[slot]).unwrap_or(0)
    }

    fn pulse_duration(&mut self, pin: u8, level: Level, timeout_us: u32) -> u32 {
        self.record(MockEvent::PulseRead {
            pin,
            level,
            timeout_us,
        });
        Self::slot(pin).map(|slot| self.pulses[slot]).unwrap_or(0)
    }

    fn shift_out(&mut self, data_pin: u8, clock_pin: u8, value: u8) {
        self.record(MockEvent::ShiftOut {
            data_pin,
            clock_pin,
            value,
        });
    }

    fn now_ms(&mut self) -> u64 {
        let now = self.now;
        self.now += self.auto_tick_ms;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_events_in_order() {
        let mut hal = MockHal::new();
        hal.set_pin_mode(2, PinMode::Output);
        hal.digital_write(2, Level::High);
        hal.analog_write(9, 128);

        assert_eq!(
            hal.events.as_slice(),
            &[
                MockEvent::SetPinMode {
                    pin: 2,
                    mode: PinMode::Output
                },
                MockEvent::DigitalWrite {
                    pin: 2,
                    level: Level::High
                },
                MockEvent::AnalogWrite { pin: 9, duty: 128 },
            ]
        );
    }

    #[test]
    fn tracks_pin_state() {
        let mut hal = MockHal::new();
        assert_eq!(hal.pin_mode_of(12), None);

        hal.set_pin_mode(12, PinMode::Output);
        hal.digital_write(12, Level::High);
        hal.analog_write(11, 200);

        assert_eq!(hal.pin_mode_of(12), Some(PinMode::Output));
        assert_eq!(hal.level(12), Level::High);
        assert_eq!(hal.duty(11), Some(200));
        assert_eq!(hal.duty(12), None);
    }

    #[test]
    fn shift_out_is_logged_not_bit_banged() {
        let mut hal = MockHal::new();
        hal.shift_out(12, 2, 0xAB);

        assert_eq!(
            hal.events.as_slice(),
            &[MockEvent::ShiftOut {
                data_pin: 12,
                clock_pin: 2,
                value: 0xAB
            }]
        );
        assert_eq!(hal.shifted_bytes().as_slice(), &[0xAB]);
    }

    #[test]
    fn pulse_duration_returns_preset_value() {
        let mut hal = MockHal::new();
        assert_eq!(hal.pulse_duration(4, Level::High, 1000), 0);

        hal.set_pulse(4, 1500);
        assert_eq!(hal.pulse_duration(4, Level::High, 1000), 1500);

        let reads = hal
            .events
            .iter()
            .filter(|event| matches!(event, MockEvent::PulseRead { .. }))
            .count();
        assert_eq!(reads, 2);
    }

    #[test]
    fn clock_is_controllable() {
        let mut hal = MockHal::new();
        assert_eq!(hal.now_ms(), 0);
        hal.set_time(1000);
        assert_eq!(hal.now_ms(), 1000);
        hal.advance(500);
        assert_eq!(hal.now_ms(), 1500);
    }

    #[test]
    fn auto_tick_advances_on_read() {
        let mut hal = MockHal::new().with_auto_tick(2);
        assert_eq!(hal.now_ms(), 0);
        assert_eq!(hal.now_ms(), 2);
        assert_eq!(hal.now_ms(), 4);
    }

    #[test]
    fn untracked_pins_are_tolerated() {
        let mut hal = MockHal::new();
        hal.set_pin_mode(200, PinMode::Output);
        hal.digital_write(200, Level::High);
        hal.set_analog(200, 77);

        assert_eq!(hal.pin_mode_of(200), None);
        assert_eq!(hal.level(200), Level::Low);
        assert_eq!(hal.analog_read(200), 0);
        // Calls are still logged even when state is not tracked.
        assert_eq!(hal.events.len(), 2);
    }
}
