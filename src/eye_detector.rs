//! Eye gesture detection: blinks, winks and held eyebrow raises.
//!
//! Eye closure is measured with the Eye Aspect Ratio (EAR) of the six
//! contour points of each eye. An eye only counts as closed once a full
//! window of consecutive samples is below its threshold, which keeps single
//! noisy frames from registering. Both eyes closed together is a natural
//! blink and is never reported as a wink.

use crate::{
    config::{BrowConfig, EyeConfig},
    constants::{mesh, NOMINAL_OPEN_EAR},
    landmarks::{full_frame, mean_y, Landmark},
    window::SlidingWindow,
    Result,
};
use log::{debug, trace};

/// Per-frame output of the [`EyeDetector`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeReport {
    /// Left eye confirmed closed while the right eye is clearly open
    pub left_wink: bool,
    /// Right eye confirmed closed while the left eye is clearly open
    pub right_wink: bool,
    /// Both eyes confirmed closed; a natural blink, not actionable
    pub both_blink: bool,
    pub left_closed: bool,
    pub right_closed: bool,
    /// Brows have been raised for at least the hold duration
    pub eyebrow_raised_held: bool,
    /// One-shot: true on the single frame the hold is first reached
    pub eyebrow_triggered: bool,
    pub left_ear: f64,
    pub right_ear: f64,
    pub brow_distance: f64,
}

impl EyeReport {
    /// Report used when no complete face is available
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            left_wink: false,
            right_wink: false,
            both_blink: false,
            left_closed: false,
            right_closed: false,
            eyebrow_raised_held: false,
            eyebrow_triggered: false,
            left_ear: NOMINAL_OPEN_EAR,
            right_ear: NOMINAL_OPEN_EAR,
            brow_distance: 0.0,
        }
    }
}

impl Default for EyeReport {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Stateful eye and eyebrow gesture classifier
#[derive(Debug, Clone)]
pub struct EyeDetector {
    left_threshold: f64,
    right_threshold: f64,
    wink_margin: f64,
    left_history: SlidingWindow<f64>,
    right_history: SlidingWindow<f64>,

    brow_raise_threshold: f64,
    brow_hold_frames: usize,
    raised_count: usize,
    already_triggered: bool,
}

impl EyeDetector {
    /// Create a detector from the eye and eyebrow configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either section is invalid.
    pub fn new(eye: &EyeConfig, brow: &BrowConfig) -> Result<Self> {
        eye.validate()?;
        brow.validate()?;
        debug!(
            "EyeDetector: thresholds L={:.3} R={:.3}, {} frames, brow {:.3} held {} frames",
            eye.left_threshold, eye.right_threshold, eye.consec_frames, brow.raise_threshold, brow.hold_frames
        );

        Ok(Self {
            left_threshold: eye.left_threshold,
            right_threshold: eye.right_threshold,
            wink_margin: eye.wink_margin,
            left_history: SlidingWindow::new(eye.consec_frames),
            right_history: SlidingWindow::new(eye.consec_frames),
            brow_raise_threshold: brow.raise_threshold,
            brow_hold_frames: brow.hold_frames,
            raised_count: 0,
            already_triggered: false,
        })
    }

    /// Eye Aspect Ratio of one eye: `(|p2-p6| + |p3-p5|) / (2 |p1-p4|)`
    ///
    /// Returns 0.0 when the eye corners coincide.
    #[must_use]
    pub fn eye_aspect_ratio(landmarks: &[Landmark], contour: &[usize; 6]) -> f64 {
        let [p1, p2, p3, p4, p5, p6] = contour.map(|i| landmarks[i]);
        let vertical1 = p2.distance_2d(&p6);
        let vertical2 = p3.distance_2d(&p5);
        let horizontal = p1.distance_2d(&p4);

        if horizontal == 0.0 {
            return 0.0;
        }
        (vertical1 + vertical2) / (2.0 * horizontal)
    }

    /// Vertical eye-to-brow distance averaged over both sides; larger means more raised
    #[must_use]
    pub fn eyebrow_distance(landmarks: &[Landmark]) -> f64 {
        let left = mean_y(landmarks, &mesh::LEFT_EYE_TOP) - mean_y(landmarks, &mesh::LEFT_BROW);
        let right = mean_y(landmarks, &mesh::RIGHT_EYE_TOP) - mean_y(landmarks, &mesh::RIGHT_BROW);
        (left + right) / 2.0
    }

    /// Process one frame of landmarks
    pub fn process(&mut self, landmarks: Option<&[Landmark]>) -> EyeReport {
        let Some(landmarks) = full_frame(landmarks) else {
            return EyeReport::neutral();
        };

        let left_ear = Self::eye_aspect_ratio(landmarks, &mesh::LEFT_EYE);
        let right_ear = Self::eye_aspect_ratio(landmarks, &mesh::RIGHT_EYE);

        self.left_history.push(left_ear);
        self.right_history.push(right_ear);

        let left_closed = self.left_history.all_full(|&ear| ear < self.left_threshold);
        let right_closed = self.right_history.all_full(|&ear| ear < self.right_threshold);

        let both_blink = left_closed && right_closed;
        let left_wink = left_closed && !both_blink && right_ear > self.left_threshold * self.wink_margin;
        let right_wink = right_closed && !both_blink && left_ear > self.right_threshold * self.wink_margin;

        let brow_distance = Self::eyebrow_distance(landmarks);
        let (eyebrow_raised_held, eyebrow_triggered) = self.update_brow(brow_distance);

        EyeReport {
            left_wink,
            right_wink,
            both_blink,
            left_closed,
            right_closed,
            eyebrow_raised_held,
            eyebrow_triggered,
            left_ear,
            right_ear,
            brow_distance,
        }
    }

    /// Advance the eyebrow hold machine, returning `(held, triggered)`
    fn update_brow(&mut self, brow_distance: f64) -> (bool, bool) {
        if brow_distance <= self.brow_raise_threshold {
            self.raised_count = 0;
            self.already_triggered = false;
            return (false, false);
        }

        // The count is the number of raised frames seen before this one.
        let held = self.raised_count >= self.brow_hold_frames;
        self.raised_count += 1;
        trace!(
            "Brows raised: dist={:.4} count={}/{}",
            brow_distance, self.raised_count, self.brow_hold_frames
        );

        if held && !self.already_triggered {
            self.already_triggered = true;
            debug!("Eyebrow hold triggered after {} frames", self.raised_count);
            return (true, true);
        }
        (held, false)
    }

    /// Number of consecutive frames the brows have been raised
    #[must_use]
    pub fn brow_raise_count(&self) -> usize {
        self.raised_count
    }

    /// Number of EAR samples currently held per eye
    #[must_use]
    pub fn history_len(&self) -> (usize, usize) {
        (self.left_history.len(), self.right_history.len())
    }

    /// Clear all history, counters and the trigger latch
    pub fn reset(&mut self) {
        self.left_history.clear();
        self.right_history.clear();
        self.raised_count = 0;
        self.already_triggered = false;
    }
}
