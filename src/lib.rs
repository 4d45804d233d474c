//! Facial gesture detection from face-mesh landmarks.
//!
//! This library turns a stream of 468-point face-mesh landmark frames into
//! debounced, one-shot gesture events:
//! - Left/right winks, with natural two-eye blinks suppressed
//! - Held eyebrow raises that fire once per hold
//! - Smiles that fire once and re-arm when the smile ends
//! - Left/right head turns with a hysteresis return to center
//!
//! The pipeline per frame:
//! 1. A [`landmark_source::LandmarkSource`] yields a face (or "no face")
//! 2. The [`dispatcher::GestureDispatcher`] runs every detector once
//! 3. One-shot events from the merged [`dispatcher::FrameReport`] go to an
//!    [`actions::ActionExecutor`], which applies its own cooldown
//!
//! Frames that are missing or hold fewer than 468 points produce neutral
//! reports and never alter detector history.
//!
//! # Examples
//!
//! ## Single detector
//!
//! ```no_run
//! use facial_gestures::{
//!     config::{BrowConfig, EyeConfig},
//!     eye_detector::EyeDetector,
//!     landmarks::Landmark,
//! };
//!
//! # fn main() -> facial_gestures::Result<()> {
//! let mut detector = EyeDetector::new(&EyeConfig::default(), &BrowConfig::default())?;
//!
//! // Landmarks come from an external face-mesh model
//! let frame: Vec<Landmark> = vec![Landmark::default(); 468];
//! let report = detector.process(Some(&frame));
//!
//! if report.left_wink {
//!     println!("Left wink (EAR {:.2})", report.left_ear);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Complete pipeline
//!
//! ```no_run
//! use facial_gestures::{
//!     actions::{ActionExecutor, LoggingExecutor},
//!     config::Config,
//!     dispatcher::GestureDispatcher,
//!     landmark_source::{LandmarkSource, TextLandmarkSource},
//! };
//! use std::io::Cursor;
//!
//! # fn main() -> facial_gestures::Result<()> {
//! let config = Config::default();
//! let mut dispatcher = GestureDispatcher::new(&config)?;
//! let mut executor = LoggingExecutor::new(&config.actions);
//! let mut source = TextLandmarkSource::new(Cursor::new("none\n"));
//!
//! while let Some(frame) = source.next_frame()? {
//!     let report = dispatcher.process(frame.as_deref());
//!     for event in report.events() {
//!         executor.execute(&event)?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Face-mesh landmark points and shared geometry
pub mod landmarks;

/// Fixed-capacity sliding window for debouncing
pub mod window;

/// Blink, wink and eyebrow-hold detection
pub mod eye_detector;

/// Head pose proxies and single-turn detection
pub mod head_detector;

/// Smile detection with a one-shot lock
pub mod mouth_detector;

/// Per-frame orchestration of all detectors
pub mod dispatcher;

/// Gesture to action mapping with an independent cooldown
pub mod actions;

/// Landmark frame sources
pub mod landmark_source;

/// Frame rate measurement
pub mod fps;

/// Main application module
pub mod app;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
