//! Main application module: source -> dispatcher -> action executor.

use crate::{
    actions::ActionExecutor,
    config::Config,
    dispatcher::{FrameReport, GestureDispatcher},
    error::Result,
    fps::FpsCounter,
    landmark_source::LandmarkSource,
};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Counters collected over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames read from the source
    pub frames: usize,
    /// Frames that contained a complete face
    pub face_frames: usize,
    /// Gesture events produced by the detectors
    pub events: usize,
    /// Events the executor turned into actions
    pub actions: usize,
}

/// Main application struct
pub struct GestureApp {
    source: Box<dyn LandmarkSource>,
    dispatcher: GestureDispatcher,
    executor: Box<dyn ActionExecutor>,
}

impl GestureApp {
    /// Create the application; fails on invalid configuration
    pub fn new(config: &Config, source: Box<dyn LandmarkSource>, executor: Box<dyn ActionExecutor>) -> Result<Self> {
        info!("Initializing gesture detection with {} executor", executor.name());
        config.validate()?;
        let dispatcher = GestureDispatcher::new(config)?;

        Ok(Self {
            source,
            dispatcher,
            executor,
        })
    }

    /// Run until the source is exhausted
    pub fn run(&mut self) -> Result<RunSummary> {
        info!("Starting main application loop");

        let mut summary = RunSummary::default();
        let mut fps = FpsCounter::new();
        let mut last_fps_log = Instant::now();

        while let Some(frame) = self.source.next_frame()? {
            let report = self.dispatcher.process(frame.as_deref());
            summary.frames += 1;
            if report.face_present {
                summary.face_frames += 1;
            }
            self.handle_report(&report, &mut summary);

            fps.update();
            if last_fps_log.elapsed() >= Duration::from_secs(1) {
                debug!("{}", fps.text(1));
                last_fps_log = Instant::now();
            }
        }

        info!(
            "Input exhausted: {} frames ({} with face), {} events, {} actions",
            summary.frames, summary.face_frames, summary.events, summary.actions
        );
        Ok(summary)
    }

    fn handle_report(&mut self, report: &FrameReport, summary: &mut RunSummary) {
        if report.eye.both_blink {
            debug!("Natural blink ignored");
        }

        for event in report.events() {
            summary.events += 1;
            debug!("Gesture: {}", event);
            match self.executor.execute(&event) {
                Ok(true) => summary.actions += 1,
                Ok(false) => {}
                Err(e) => warn!("Failed to execute action for {}: {}", event, e),
            }
        }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &GestureDispatcher {
        &self.dispatcher
    }
}
