//! Smile detection with a one-shot trigger and a re-arming lock.

use crate::{
    config::MouthConfig,
    constants::mesh,
    landmarks::{full_frame, Landmark},
    window::SlidingWindow,
    Result,
};
use log::debug;

/// Per-frame output of the [`MouthDetector`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouthReport {
    /// Smile confirmed over the full hold window
    pub is_smiling: bool,
    /// One-shot: true only on the frame a confirmed smile first fires
    pub smile_triggered: bool,
    /// Mouth width over lip opening height, 0 when the lips touch
    pub mouth_ratio: f64,
    /// Lip center height minus corner height; positive when corners are raised
    pub corners_raised: f64,
    /// Lock state after this frame
    pub lock: bool,
}

/// Raw mouth geometry for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouthMetrics {
    pub ratio: f64,
    pub corners_raised: f64,
}

/// Stateful smile classifier
#[derive(Debug, Clone)]
pub struct MouthDetector {
    smile_threshold: f64,
    reset_threshold: f64,
    corner_raise_threshold: f64,
    smile_history: SlidingWindow<bool>,
    smile_lock: bool,
}

impl MouthDetector {
    /// Create a detector from the mouth configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn new(config: &MouthConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "MouthDetector: ratio {:.2} (reset {:.2}), corners {:.4}, {} frames",
            config.smile_threshold, config.reset_threshold, config.corner_raise_threshold, config.hold_frames
        );
        Ok(Self {
            smile_threshold: config.smile_threshold,
            reset_threshold: config.reset_threshold,
            corner_raise_threshold: config.corner_raise_threshold,
            smile_history: SlidingWindow::new(config.hold_frames),
            smile_lock: false,
        })
    }

    /// Width/height ratio and corner elevation of the mouth
    #[must_use]
    pub fn metrics(landmarks: &[Landmark]) -> MouthMetrics {
        let left = landmarks[mesh::MOUTH_LEFT_CORNER];
        let right = landmarks[mesh::MOUTH_RIGHT_CORNER];
        let upper = landmarks[mesh::UPPER_LIP_CENTER];
        let lower = landmarks[mesh::LOWER_LIP_CENTER];

        let width = left.distance_2d(&right);
        let height = upper.distance_2d(&lower);
        let ratio = if height == 0.0 { 0.0 } else { width / height };

        let center_y = (upper.y + lower.y) / 2.0;
        let corners_y = (left.y + right.y) / 2.0;

        MouthMetrics {
            ratio,
            corners_raised: center_y - corners_y,
        }
    }

    /// Process one frame of landmarks
    pub fn process(&mut self, landmarks: Option<&[Landmark]>) -> MouthReport {
        let Some(landmarks) = full_frame(landmarks) else {
            return MouthReport {
                lock: self.smile_lock,
                ..MouthReport::default()
            };
        };

        let MouthMetrics { ratio, corners_raised } = Self::metrics(landmarks);

        let smiling_now = ratio > self.smile_threshold && corners_raised > self.corner_raise_threshold;
        self.smile_history.push(smiling_now);
        let confirmed = self.smile_history.all_full(|&smiling| smiling);

        let mut smile_triggered = false;
        if confirmed && !self.smile_lock {
            smile_triggered = true;
            self.smile_lock = true;
            debug!("Smile triggered (ratio {:.2}, corners {:.4})", ratio, corners_raised);
        }

        // Looser than confirmation so the lock re-arms as soon as the smile visibly ends.
        if ratio < self.reset_threshold || !smiling_now {
            self.smile_lock = false;
        }

        MouthReport {
            is_smiling: confirmed,
            smile_triggered,
            mouth_ratio: ratio,
            corners_raised,
            lock: self.smile_lock,
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.smile_lock
    }

    /// Number of per-frame smile samples currently held
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.smile_history.len()
    }

    pub fn reset(&mut self) {
        self.smile_history.clear();
        self.smile_lock = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FACE_MESH_LANDMARKS;

    fn mouth(width: f64, height: f64, raise: f64) -> Vec<Landmark> {
        let mut points = vec![Landmark::new(0.5, 0.5, 0.0); FACE_MESH_LANDMARKS];
        points[mesh::UPPER_LIP_CENTER] = Landmark::new(0.5, 0.7 - height / 2.0, 0.0);
        points[mesh::LOWER_LIP_CENTER] = Landmark::new(0.5, 0.7 + height / 2.0, 0.0);
        points[mesh::MOUTH_LEFT_CORNER] = Landmark::new(0.5 - width / 2.0, 0.7 - raise, 0.0);
        points[mesh::MOUTH_RIGHT_CORNER] = Landmark::new(0.5 + width / 2.0, 0.7 - raise, 0.0);
        points
    }

    #[test]
    fn test_metrics() {
        let metrics = MouthDetector::metrics(&mouth(0.2, 0.05, 0.01));
        assert!((metrics.ratio - 4.0).abs() < 1e-9);
        assert!((metrics.corners_raised - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_closed_lips_give_zero_ratio() {
        let metrics = MouthDetector::metrics(&mouth(0.2, 0.0, 0.01));
        assert_eq!(metrics.ratio, 0.0);
    }

    #[test]
    fn test_wide_mouth_without_raised_corners_is_not_a_smile() {
        let mut detector = MouthDetector::new(&MouthConfig::default()).unwrap();
        let talking = mouth(0.2, 0.05, -0.002);
        for _ in 0..10 {
            let report = detector.process(Some(&talking));
            assert!(!report.is_smiling);
            assert!(!report.smile_triggered);
        }
    }

    #[test]
    fn test_trigger_keeps_lock_while_smiling() {
        let mut detector = MouthDetector::new(&MouthConfig::default()).unwrap();
        let smile = mouth(0.2, 0.05, 0.01);
        let reports: Vec<_> = (0..6).map(|_| detector.process(Some(&smile))).collect();
        assert!(reports[3].smile_triggered);
        assert!(reports[3].lock);
        assert!(reports.iter().filter(|r| r.smile_triggered).count() == 1);
        assert!(reports[5].is_smiling && reports[5].lock);
    }

    #[test]
    fn test_missing_face_keeps_state() {
        let mut detector = MouthDetector::new(&MouthConfig::default()).unwrap();
        let smile = mouth(0.2, 0.05, 0.01);
        for _ in 0..4 {
            detector.process(Some(&smile));
        }
        let report = detector.process(None);
        assert!(!report.is_smiling && !report.smile_triggered);
        assert!(report.lock);
        assert_eq!(detector.history_len(), 4);
    }
}
