//! Frame-by-frame animation clock
//!
//! For hosts that draw the tunnel as a live background: advance the clock
//! by the elapsed time each tick, then render the current frame.

use crate::config::Configuration;
use crate::render::{render_frame, Frame};

pub struct TunnelAnimation {
    config: Configuration,
    time: f64,
}

impl TunnelAnimation {
    pub fn new(config: Configuration) -> Self {
        Self { config, time: 0.0 }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Move the clock forward by `delta` time units. Non-finite deltas are ignored.
    pub fn advance(&mut self, delta: f64) {
        if delta.is_finite() {
            self.time += delta;
        }
    }

    /// Advance by the configured time step
    pub fn step(&mut self) {
        self.advance(self.config.time_step());
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }

    /// Render the tunnel at the current time
    pub fn frame(&self) -> Frame {
        render_frame(&self.config, self.time)
    }

    pub fn into_config(self) -> Configuration {
        self.config
    }
}
