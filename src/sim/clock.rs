//! Scheduler abstraction
//!
//! Periodic work is expressed as interval timers stepped by a fixed-step
//! accumulator, so cadence is driven by the caller's clock (or a test) rather
//! than by real timers.

use serde::{Deserialize, Serialize};

/// A repeating timer that fires once per elapsed period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalTimer {
    pub period_ms: u32,
    elapsed_ms: u32,
}

impl IntervalTimer {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
        }
    }

    /// Advance by `dt_ms`, returning how many times the timer fired
    pub fn advance(&mut self, dt_ms: u32) -> u32 {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        let fires = self.elapsed_ms / self.period_ms;
        self.elapsed_ms %= self.period_ms;
        fires
    }

    /// Time until the next firing
    pub fn remaining_ms(&self) -> u32 {
        self.period_ms - self.elapsed_ms
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }
}

/// Fixed timestep accumulator
///
/// Turns variable frame times into a whole number of fixed steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStep {
    pub step_ms: u32,
    pub max_substeps: u32,
    accumulator_ms: u32,
}

impl FixedStep {
    pub fn new(step_ms: u32, max_substeps: u32) -> Self {
        Self {
            step_ms: step_ms.max(1),
            max_substeps: max_substeps.max(1),
            accumulator_ms: 0,
        }
    }

    /// Feed elapsed time, returning the number of steps to run now
    ///
    /// Frame time is clamped to `max_substeps` steps; time beyond that
    /// (a stalled tab, a debugger pause) is dropped.
    pub fn accumulate(&mut self, elapsed_ms: u32) -> u32 {
        let cap = self.step_ms.saturating_mul(self.max_substeps);
        self.accumulator_ms = self
            .accumulator_ms
            .saturating_add(elapsed_ms.min(cap))
            .min(cap);
        let steps = self.accumulator_ms / self.step_ms;
        self.accumulator_ms -= steps * self.step_ms;
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator_ms = 0;
    }
}
