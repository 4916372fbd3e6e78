//! Auto-hide policy for the read-aloud control.

use std::time::{Duration, Instant};

use super::SpeechState;

/// Hides the control after a period without user activity, unless speech
/// is in progress.
#[derive(Debug, Clone, Copy)]
pub struct ControlVisibility {
    timeout: Duration,
    last_activity: Instant,
}

impl ControlVisibility {
    #[must_use]
    pub fn new(timeout: Duration, now: Instant) -> Self {
        Self {
            timeout,
            last_activity: now,
        }
    }

    /// Records user activity.
    pub fn touch(&mut self, now: Instant) {
        self.last_activity = now;
    }

    pub fn is_visible(&self, now: Instant, state: SpeechState) -> bool {
        state != SpeechState::Idle
            || now.saturating_duration_since(self.last_activity) < self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hides_after_timeout_when_idle() {
        let start = Instant::now();
        let vis = ControlVisibility::new(Duration::from_secs(5), start);
        assert!(vis.is_visible(start + Duration::from_secs(4), SpeechState::Idle));
        assert!(!vis.is_visible(start + Duration::from_secs(6), SpeechState::Idle));
    }

    #[test]
    fn activity_brings_it_back() {
        let start = Instant::now();
        let mut vis = ControlVisibility::new(Duration::from_secs(5), start);
        let later = start + Duration::from_secs(10);
        vis.touch(later);
        assert!(vis.is_visible(later + Duration::from_secs(1), SpeechState::Idle));
    }

    #[test]
    fn stays_visible_while_reading() {
        let start = Instant::now();
        let vis = ControlVisibility::new(Duration::from_secs(5), start);
        let later = start + Duration::from_secs(60);
        assert!(vis.is_visible(later, SpeechState::Reading));
        assert!(vis.is_visible(later, SpeechState::Paused));
    }
}
