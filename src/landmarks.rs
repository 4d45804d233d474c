//! Face-mesh landmark points and the geometry shared by the detectors.
//!
//! A frame is a slice of [`FACE_MESH_LANDMARKS`] points in camera-normalized
//! coordinates (`x`, `y` in `[0, 1]`, `y` growing downwards). Anything shorter,
//! or no slice at all, is treated as "no face".

use serde::{Deserialize, Serialize};

pub use crate::constants::FACE_MESH_LANDMARKS;

/// One normalized face-mesh point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in the image plane
    #[must_use]
    pub fn distance_2d(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64, f64)> for Landmark {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

/// Return the landmarks only if a complete face is present
#[must_use]
pub fn full_frame(landmarks: Option<&[Landmark]>) -> Option<&[Landmark]> {
    landmarks.filter(|points| points.len() >= FACE_MESH_LANDMARKS)
}

/// Mean `y` of the given landmark indices
///
/// Callers pass indices from a complete frame, so every index is in range.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_y(landmarks: &[Landmark], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| landmarks[i].y).sum::<f64>() / indices.len() as f64
}
