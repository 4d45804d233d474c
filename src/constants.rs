//! Constants used throughout the application

/// Number of points produced by the face-mesh landmark model
pub const FACE_MESH_LANDMARKS: usize = 468;

/// EAR reported for both eyes when no face is available
pub const NOMINAL_OPEN_EAR: f64 = 0.3;

/// Default factor applied to the closed eye's threshold when checking that the other eye is open
pub const DEFAULT_WINK_MARGIN: f64 = 1.3;

/// Yaw proxy gain. Downstream yaw thresholds are tuned against this scale.
pub const YAW_GAIN: f64 = 5.0;

/// Pitch proxy gain
pub const PITCH_GAIN: f64 = 5.0;

/// Default head-turn return threshold as a fraction of the trigger threshold
pub const DEFAULT_RETURN_RATIO: f64 = 0.7;

/// Default cooldown between head-turn events in milliseconds
pub const DEFAULT_TURN_COOLDOWN_MS: u64 = 500;

/// Default cooldown enforced by the action executor in milliseconds
pub const DEFAULT_ACTION_COOLDOWN_MS: u64 = 600;

/// Upper bound on any configured frame count (two minutes at 30 fps)
pub const MAX_WINDOW_FRAMES: usize = 3600;

/// Face-mesh landmark indices
pub mod mesh {
    /// Left eye contour: outer corner, two upper lid points, inner corner, two lower lid points
    pub const LEFT_EYE: [usize; 6] = [33, 160, 158, 133, 153, 144];
    /// Right eye contour in the same order as [`LEFT_EYE`]
    pub const RIGHT_EYE: [usize; 6] = [362, 385, 387, 263, 373, 380];

    pub const LEFT_BROW: [usize; 3] = [70, 63, 105];
    pub const RIGHT_BROW: [usize; 3] = [300, 293, 334];
    pub const LEFT_EYE_TOP: [usize; 2] = [159, 145];
    pub const RIGHT_EYE_TOP: [usize; 2] = [386, 374];

    pub const NOSE: usize = 11;
    pub const LEFT_EAR: usize = 234;
    pub const RIGHT_EAR: usize = 454;
    pub const CHIN: usize = 152;
    pub const FOREHEAD: usize = 10;
    pub const LEFT_EYE_OUTER: usize = 33;
    pub const RIGHT_EYE_OUTER: usize = 263;

    pub const MOUTH_LEFT_CORNER: usize = 61;
    pub const MOUTH_RIGHT_CORNER: usize = 291;
    pub const UPPER_LIP_CENTER: usize = 13;
    pub const LOWER_LIP_CENTER: usize = 14;
}
