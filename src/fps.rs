//! Instantaneous frame rate measurement.

use std::time::Instant;

/// Frame rate computed from the interval between the last two updates
#[derive(Debug, Clone)]
pub struct FpsCounter {
    previous: Instant,
    fps: f64,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self { previous: start, fps: 0.0 }
    }

    /// Register a frame at the current time
    pub fn update(&mut self) -> f64 {
        self.update_at(Instant::now())
    }

    /// Register a frame at `now`. A zero interval keeps the previous value.
    pub fn update_at(&mut self, now: Instant) -> f64 {
        let dt = now.saturating_duration_since(self.previous).as_secs_f64();
        if dt > 0.0 {
            self.fps = 1.0 / dt;
        }
        self.previous = now;
        self.fps
    }

    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    #[must_use]
    pub fn text(&self, decimals: usize) -> String {
        format!("FPS : {:.*}", decimals, self.fps)
    }
}
