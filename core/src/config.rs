use std::time::Duration;

use crate::constants::{INSTRUCTION_HZ, TIMER_HZ};

/// Tunables for a `Chip8`.
///
/// - `instruction_hz` how many instructions are executed per second
/// - `timer_hz` how often the delay and sound timers are decremented
/// - `strict` surface faults (unknown opcodes, stack over/underflow) as errors instead of
///   logging them and spinning on the faulting instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub instruction_hz: u32,
    pub timer_hz: u32,
    pub strict: bool,
}

impl Config {
    pub fn with_instruction_hz(self, instruction_hz: u32) -> Self {
        Config {
            instruction_hz,
            ..self
        }
    }

    pub fn with_timer_hz(self, timer_hz: u32) -> Self {
        Config { timer_hz, ..self }
    }

    pub fn with_strict(self, strict: bool) -> Self {
        Config { strict, ..self }
    }

    /// Time between instruction steps.
    pub fn instruction_period(&self) -> Duration {
        period(self.instruction_hz)
    }

    /// Time between timer steps.
    pub fn timer_period(&self) -> Duration {
        period(self.timer_hz)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            instruction_hz: INSTRUCTION_HZ,
            timer_hz: TIMER_HZ,
            strict: false,
        }
    }
}

// A rate of 0 is treated as 1Hz, and rates above 1GHz as 1GHz; a period is never zero
fn period(hz: u32) -> Duration {
    Duration::from_nanos((1_000_000_000 / u64::from(hz.max(1))).max(1))
}
