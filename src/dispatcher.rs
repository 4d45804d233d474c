//! Per-frame orchestration of the eye, head and mouth detectors.

use crate::{
    config::Config,
    eye_detector::{EyeDetector, EyeReport},
    head_detector::{Direction, HeadDetector, PoseReport},
    landmarks::{full_frame, Landmark},
    mouth_detector::{MouthDetector, MouthReport},
    Result,
};
use std::fmt;
use std::time::Instant;

/// Actionable one-shot gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureEvent {
    LeftWink,
    RightWink,
    EyebrowHold,
    Smile,
    HeadTurn(Direction),
}

impl GestureEvent {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeftWink => "left_wink",
            Self::RightWink => "right_wink",
            Self::EyebrowHold => "eyebrow_hold",
            Self::Smile => "smile",
            Self::HeadTurn(Direction::Left) => "turn_left",
            Self::HeadTurn(Direction::Right) => "turn_right",
            Self::HeadTurn(Direction::Center) => "turn_center",
        }
    }
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merged output of all detectors for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// A complete face was present in this frame
    pub face_present: bool,
    pub eye: EyeReport,
    pub pose: PoseReport,
    /// Turn fired on this frame, if any
    pub turn: Option<Direction>,
    pub mouth: MouthReport,
}

impl FrameReport {
    /// One-shot events to forward to the action layer. Natural blinks are never included.
    #[must_use]
    pub fn events(&self) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        if !self.eye.both_blink {
            if self.eye.left_wink {
                events.push(GestureEvent::LeftWink);
            }
            if self.eye.right_wink {
                events.push(GestureEvent::RightWink);
            }
        }
        if self.eye.eyebrow_triggered {
            events.push(GestureEvent::EyebrowHold);
        }
        if self.mouth.smile_triggered {
            events.push(GestureEvent::Smile);
        }
        if let Some(direction) = self.turn {
            events.push(GestureEvent::HeadTurn(direction));
        }
        events
    }
}

/// Feeds each frame to every detector and merges the results
#[derive(Debug, Clone)]
pub struct GestureDispatcher {
    eye: EyeDetector,
    head: HeadDetector,
    mouth: MouthDetector,
}

impl GestureDispatcher {
    /// Build all detectors from the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any detector section is invalid.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            eye: EyeDetector::new(&config.eye, &config.brow)?,
            head: HeadDetector::new(&config.head)?,
            mouth: MouthDetector::new(&config.mouth)?,
        })
    }

    /// Process one frame using the wall clock for the turn cooldown
    pub fn process(&mut self, landmarks: Option<&[Landmark]>) -> FrameReport {
        self.process_at(landmarks, Instant::now())
    }

    /// Process one frame at time `now`
    pub fn process_at(&mut self, landmarks: Option<&[Landmark]>, now: Instant) -> FrameReport {
        let face = full_frame(landmarks);
        let eye = self.eye.process(face);
        let pose = self.head.update(face);
        let turn = if face.is_some() {
            self.head.detect_single_turn_at(pose.yaw, now)
        } else {
            None
        };
        let mouth = self.mouth.process(face);

        FrameReport {
            face_present: face.is_some(),
            eye,
            pose,
            turn,
            mouth,
        }
    }

    #[must_use]
    pub fn eye(&self) -> &EyeDetector {
        &self.eye
    }

    #[must_use]
    pub fn head(&self) -> &HeadDetector {
        &self.head
    }

    #[must_use]
    pub fn mouth(&self) -> &MouthDetector {
        &self.mouth
    }

    pub fn reset(&mut self) {
        self.eye.reset();
        self.head.reset();
        self.mouth.reset();
    }
}
