//! Head pose heuristics and single-turn edge detection.
//!
//! Yaw, pitch and roll here are 2D-projection proxies computed from a handful
//! of face-mesh points, not metric angles. Yaw and pitch are scaled by fixed
//! gains ([`YAW_GAIN`], [`PITCH_GAIN`]) and configured thresholds are tuned
//! against that scale.
//!
//! Turn detection is a three-state machine `Center -> {Left, Right} -> Center`.
//! Leaving center fires one event (subject to a cooldown); returning requires
//! the yaw to fall below a lower return threshold and fires nothing.

use crate::{
    config::HeadConfig,
    constants::{mesh, PITCH_GAIN, YAW_GAIN},
    landmarks::{full_frame, Landmark},
    Result,
};
use log::debug;
use std::fmt;
use std::time::{Duration, Instant};

/// Horizontal head direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Center,
    Left,
    Right,
}

impl Direction {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-frame pose proxies
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoseReport {
    pub yaw: f64,
    pub pitch: f64,
    /// Angle of the eye line in degrees
    pub roll: f64,
    /// Instantaneous direction from `yaw` alone (no hysteresis)
    pub direction: Direction,
}

/// Head pose estimator with a one-shot turn detector
#[derive(Debug, Clone)]
pub struct HeadDetector {
    yaw_threshold: f64,
    return_threshold: f64,
    cooldown: Duration,
    turn_state: Direction,
    last_fire: Option<Instant>,
}

impl HeadDetector {
    /// Create a detector from the head configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn new(config: &HeadConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "HeadDetector: yaw threshold {:.3}, return {:.3}, cooldown {:?}",
            config.yaw_threshold,
            config.return_threshold(),
            config.cooldown()
        );
        Ok(Self {
            yaw_threshold: config.yaw_threshold,
            return_threshold: config.return_threshold(),
            cooldown: config.cooldown(),
            turn_state: Direction::Center,
            last_fire: None,
        })
    }

    /// Compute the pose proxies for one frame
    ///
    /// Missing or incomplete frames give a neutral pose. This never touches the
    /// turn state machine.
    #[must_use]
    pub fn update(&self, landmarks: Option<&[Landmark]>) -> PoseReport {
        let Some(landmarks) = full_frame(landmarks) else {
            return PoseReport::default();
        };

        let nose = landmarks[mesh::NOSE];
        let ear_center_x = (landmarks[mesh::LEFT_EAR].x + landmarks[mesh::RIGHT_EAR].x) / 2.0;
        let yaw = (nose.x - ear_center_x) * YAW_GAIN;

        let vertical_center = (landmarks[mesh::FOREHEAD].y + landmarks[mesh::CHIN].y) / 2.0;
        let pitch = (nose.y - vertical_center) * PITCH_GAIN;

        let left_eye = landmarks[mesh::LEFT_EYE_OUTER];
        let right_eye = landmarks[mesh::RIGHT_EYE_OUTER];
        let roll = (right_eye.y - left_eye.y).atan2(right_eye.x - left_eye.x).to_degrees();

        PoseReport {
            yaw,
            pitch,
            roll,
            direction: self.classify(yaw),
        }
    }

    /// Direction for a yaw value without hysteresis
    #[must_use]
    pub fn classify(&self, yaw: f64) -> Direction {
        if yaw > self.yaw_threshold {
            Direction::Right
        } else if yaw < -self.yaw_threshold {
            Direction::Left
        } else {
            Direction::Center
        }
    }

    /// Feed the current yaw into the turn machine using the wall clock
    pub fn detect_single_turn(&mut self, yaw: f64) -> Option<Direction> {
        self.detect_single_turn_at(yaw, Instant::now())
    }

    /// Feed the current yaw into the turn machine at time `now`
    ///
    /// Returns the direction on the frame a turn out of center fires.
    pub fn detect_single_turn_at(&mut self, yaw: f64, now: Instant) -> Option<Direction> {
        if self.turn_state != Direction::Center {
            if yaw.abs() < self.return_threshold {
                debug!("Head returned to center from {}", self.turn_state);
                self.turn_state = Direction::Center;
            }
            return None;
        }

        let direction = self.classify(yaw);
        if direction == Direction::Center || !self.cooldown_elapsed(now) {
            return None;
        }

        self.turn_state = direction;
        self.last_fire = Some(now);
        debug!("Head turn {} (yaw {:.3})", direction, yaw);
        Some(direction)
    }

    fn cooldown_elapsed(&self, now: Instant) -> bool {
        self.last_fire
            .map_or(true, |last| now.saturating_duration_since(last) > self.cooldown)
    }

    /// Current state of the turn machine
    #[must_use]
    pub fn turn_state(&self) -> Direction {
        self.turn_state
    }

    /// Return the turn machine to center and forget the last fire time
    pub fn reset(&mut self) {
        self.turn_state = Direction::Center;
        self.last_fire = None;
    }
}
