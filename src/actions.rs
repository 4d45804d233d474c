//! Action layer: maps gesture events to named actions behind a cooldown.
//!
//! Detectors already debounce their own events; the executor keeps an
//! independent global cooldown so a burst of different gestures cannot fire
//! actions back to back.

use crate::{
    config::{ActionBindings, ActionConfig},
    dispatcher::GestureEvent,
    head_detector::Direction,
    Error, Result,
};
use log::{debug, info};
use std::time::{Duration, Instant};

/// Receives one-shot gesture events
pub trait ActionExecutor {
    /// Handle an event, returning whether an action was carried out
    fn execute(&mut self, event: &GestureEvent) -> Result<bool>;

    /// Executor name
    fn name(&self) -> &str;
}

/// Executor that ignores every event
pub struct NoAction;

impl ActionExecutor for NoAction {
    fn execute(&mut self, _event: &GestureEvent) -> Result<bool> {
        Ok(false)
    }

    fn name(&self) -> &str {
        "NoAction"
    }
}

impl ActionBindings {
    /// Action bound to an event, if any
    #[must_use]
    pub fn action_for(&self, event: &GestureEvent) -> Option<&str> {
        let binding = match event {
            GestureEvent::LeftWink => &self.left_wink,
            GestureEvent::RightWink => &self.right_wink,
            GestureEvent::EyebrowHold => &self.eyebrow_hold,
            GestureEvent::Smile => &self.smile,
            GestureEvent::HeadTurn(Direction::Left) => &self.turn_left,
            GestureEvent::HeadTurn(Direction::Right) => &self.turn_right,
            GestureEvent::HeadTurn(Direction::Center) => return None,
        };
        binding.as_deref()
    }
}

/// Cooldown gate shared by executors
#[derive(Debug, Clone)]
pub struct Cooldown {
    period: Duration,
    last: Option<Instant>,
}

impl Cooldown {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// Claim the gate at `now`; succeeds when at least `period` has passed since the last claim
    pub fn try_claim(&mut self, now: Instant) -> bool {
        let ready = self
            .last
            .map_or(true, |last| now.saturating_duration_since(last) >= self.period);
        if ready {
            self.last = Some(now);
        }
        ready
    }

    /// Push the next allowed claim further out
    pub fn extend(&mut self, now: Instant, extra: Duration) {
        self.last = Some(now + extra);
    }
}

/// Executor that logs bound actions instead of injecting input
pub struct LoggingExecutor {
    bindings: ActionBindings,
    cooldown: Cooldown,
    executed: Vec<String>,
}

/// Extra quiet period after a lock action
const LOCK_EXTRA_DELAY: Duration = Duration::from_secs(2);

impl LoggingExecutor {
    #[must_use]
    pub fn new(config: &ActionConfig) -> Self {
        Self {
            bindings: config.bindings.clone(),
            cooldown: Cooldown::new(Duration::from_millis(config.cooldown_ms)),
            executed: Vec::new(),
        }
    }

    /// Handle an event at time `now`
    pub fn execute_at(&mut self, event: &GestureEvent, now: Instant) -> Result<bool> {
        let Some(action) = self.bindings.action_for(event) else {
            debug!("No action bound to {}", event);
            return Ok(false);
        };
        if action.trim().is_empty() {
            return Err(Error::ActionError(format!("Empty action bound to {event}")));
        }
        if !self.cooldown.try_claim(now) {
            debug!("Action '{}' for {} suppressed by cooldown", action, event);
            return Ok(false);
        }

        info!("ACTION: {} -> {}", event, action);
        if action == "lock" {
            self.cooldown.extend(now, LOCK_EXTRA_DELAY);
        }
        self.executed.push(action.to_string());
        Ok(true)
    }

    /// Actions carried out so far, in order
    #[must_use]
    pub fn executed(&self) -> &[String] {
        &self.executed
    }
}

impl ActionExecutor for LoggingExecutor {
    fn execute(&mut self, event: &GestureEvent) -> Result<bool> {
        self.execute_at(event, Instant::now())
    }

    fn name(&self) -> &str {
        "LoggingExecutor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executor() -> LoggingExecutor {
        let mut config = ActionConfig::default();
        config.bindings.turn_left = Some("alt+tab".to_string());
        LoggingExecutor::new(&config)
    }

    #[test]
    fn test_bindings_lookup() {
        let bindings = ActionBindings::default();
        assert_eq!(bindings.action_for(&GestureEvent::Smile), Some("copy"));
        assert_eq!(bindings.action_for(&GestureEvent::LeftWink), None);
        assert_eq!(bindings.action_for(&GestureEvent::HeadTurn(Direction::Center)), None);
    }

    #[test]
    fn test_cooldown_is_independent_of_event_kind() {
        let mut executor = executor();
        let t0 = Instant::now();
        assert!(executor.execute_at(&GestureEvent::Smile, t0).unwrap());
        assert!(!executor
            .execute_at(&GestureEvent::HeadTurn(Direction::Left), t0 + Duration::from_millis(300))
            .unwrap());
        assert!(executor
            .execute_at(&GestureEvent::HeadTurn(Direction::Left), t0 + Duration::from_millis(600))
            .unwrap());
        assert_eq!(executor.executed(), ["copy", "alt+tab"]);
    }

    #[test]
    fn test_unbound_event_does_not_consume_cooldown() {
        let mut executor = executor();
        let t0 = Instant::now();
        assert!(!executor.execute_at(&GestureEvent::RightWink, t0).unwrap());
        assert!(executor.execute_at(&GestureEvent::Smile, t0).unwrap());
    }

    #[test]
    fn test_lock_adds_quiet_period() {
        let mut executor = executor();
        let t0 = Instant::now();
        assert!(executor.execute_at(&GestureEvent::EyebrowHold, t0).unwrap());
        assert!(!executor.execute_at(&GestureEvent::Smile, t0 + Duration::from_secs(2)).unwrap());
        assert!(executor.execute_at(&GestureEvent::Smile, t0 + Duration::from_secs(3)).unwrap());
    }

    #[test]
    fn test_empty_binding_is_an_error() {
        let mut config = ActionConfig::default();
        config.bindings.left_wink = Some("  ".to_string());
        let mut executor = LoggingExecutor::new(&config);
        assert!(matches!(
            executor.execute(&GestureEvent::LeftWink),
            Err(Error::ActionError(_))
        ));
    }

    #[test]
    fn test_no_action() {
        let mut executor = NoAction;
        assert!(!executor.execute(&GestureEvent::Smile).unwrap());
        assert_eq!(executor.name(), "NoAction");
    }
}
