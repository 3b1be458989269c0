//! Platform abstraction layer
//!
//! Converts variable host frame times into a whole number of fixed
//! simulation ticks. The simulation never sees wall-clock time.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame delta honored; anything longer is treated as a stall
const MAX_FRAME_SECS: f32 = 0.25;

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStepper {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
    /// Ticks dropped because a frame needed more than `max_substeps`
    pub dropped_ticks: u64,
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStepper {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
            dropped_ticks: 0,
        }
    }

    /// Feed one frame's elapsed time and return how many ticks to run now
    pub fn advance(&mut self, elapsed_secs: f32) -> u32 {
        let elapsed = if elapsed_secs.is_finite() {
            elapsed_secs.clamp(0.0, MAX_FRAME_SECS)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }

        // Spiral of death: drop the backlog instead of carrying it forward
        if self.accumulator >= self.step {
            let backlog = (self.accumulator / self.step) as u64;
            self.dropped_ticks += backlog;
            log::debug!("Frame overran by {} ticks, dropping backlog", backlog);
            self.accumulator %= self.step;
        }

        ticks
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}
