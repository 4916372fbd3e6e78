//! Read-aloud accessibility helper.
//!
//! [`ReadAloud`] is an owned service wrapping a [`SpeechBackend`]. It is
//! created by the UI loop, passed where it is needed, and shut down on
//! teardown; tests drive it with a fake backend.
//!
//! ```text
//! Idle ──start──▶ Reading ──pause──▶ Paused
//!  ▲                │  ▲               │
//!  └──stop/finish───┘  └────resume─────┘
//! ```
//!
//! At most one utterance is active: starting while reading or paused
//! cancels the previous utterance first.

pub mod backend;
pub mod visibility;
pub mod voice;

use tracing::{debug, error, info, warn};

pub use backend::{CommandBackend, SpeechBackend, Utterance, Voice};
pub use visibility::ControlVisibility;
pub use voice::select_voice;

/// Notice shown when the platform refuses speech.
pub const PERMISSION_NOTICE: &str =
    "Speech output was blocked. Allow audio output for this application to use read aloud.";

/// Speech controller state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpeechState {
    #[default]
    Idle,
    Reading,
    Paused,
}

impl SpeechState {
    /// Returns a display string for the state.
    pub fn label(&self) -> &'static str {
        match self {
            SpeechState::Idle => "Read aloud",
            SpeechState::Reading => "Reading...",
            SpeechState::Paused => "Paused",
        }
    }
}

/// Failures reported by a speech backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    /// The user stopped the utterance.
    #[error("speech cancelled")]
    Cancelled,

    /// A newer utterance replaced this one.
    #[error("speech interrupted")]
    Interrupted,

    #[error("speech output not permitted")]
    PermissionDenied,

    #[error("{0} is not supported by this speech backend")]
    Unsupported(&'static str),

    #[error("speech backend error: {0}")]
    Backend(String),
}

/// How a speech error reaches the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Silent,
    /// Shown as a blocking notice the user must dismiss.
    Blocking,
    /// Written to the log only.
    LogOnly,
}

impl SpeechError {
    pub fn severity(&self) -> Severity {
        match self {
            SpeechError::Cancelled | SpeechError::Interrupted => Severity::Silent,
            SpeechError::PermissionDenied => Severity::Blocking,
            SpeechError::Unsupported(_) | SpeechError::Backend(_) => Severity::LogOnly,
        }
    }
}

/// Logs `err` according to its severity and returns the notice to show,
/// if any.
pub fn report(err: &SpeechError) -> Option<&'static str> {
    match err.severity() {
        Severity::Silent => {
            debug!("{err}");
            None
        }
        Severity::Blocking => {
            warn!("{err}");
            Some(PERMISSION_NOTICE)
        }
        Severity::LogOnly => {
            error!("{err}");
            None
        }
    }
}

/// Single-utterance speech controller.
pub struct ReadAloud<B: SpeechBackend> {
    backend: B,
    locale: String,
    state: SpeechState,
    /// Resolved on first use.
    voice: Option<Option<Voice>>,
    next_id: u64,
}

impl<B: SpeechBackend> ReadAloud<B> {
    #[must_use]
    pub fn new(backend: B, locale: impl Into<String>) -> Self {
        Self {
            backend,
            locale: locale.into(),
            state: SpeechState::Idle,
            voice: None,
            next_id: 0,
        }
    }

    pub fn state(&self) -> SpeechState {
        self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The voice in use, resolving it on first call.
    pub fn voice(&mut self) -> Option<&Voice> {
        if self.voice.is_none() {
            let voices = self.backend.voices();
            let chosen = select_voice(&voices, &self.locale);
            info!(voice = ?chosen.as_ref().map(|v| &v.name), "Selected speech voice");
            self.voice = Some(chosen);
        }
        self.voice.as_ref().and_then(Option::as_ref)
    }

    /// Speaks `text`, cancelling any utterance in progress.
    ///
    /// Blank text is ignored.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`SpeechError`]; the controller is then `Idle`.
    pub fn start(&mut self, text: &str) -> Result<(), SpeechError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        if self.state != SpeechState::Idle {
            self.backend.cancel();
            self.state = SpeechState::Idle;
        }

        let voice = self.voice().cloned();
        self.next_id += 1;
        let utterance = Utterance {
            id: self.next_id,
            text: text.to_string(),
            voice,
        };

        self.backend.speak(&utterance)?;
        self.state = SpeechState::Reading;
        debug!(id = utterance.id, "Reading aloud");
        Ok(())
    }

    /// Stops speech. A no-op when idle.
    pub fn stop(&mut self) {
        if self.state == SpeechState::Idle {
            return;
        }
        self.backend.cancel();
        self.state = SpeechState::Idle;
    }

    /// Pauses while reading; otherwise a no-op.
    ///
    /// # Errors
    ///
    /// Returns the backend's error; the state is then unchanged.
    pub fn pause(&mut self) -> Result<(), SpeechError> {
        if self.state != SpeechState::Reading {
            return Ok(());
        }
        self.backend.pause()?;
        self.state = SpeechState::Paused;
        Ok(())
    }

    /// Resumes while paused; otherwise a no-op.
    ///
    /// # Errors
    ///
    /// Returns the backend's error; the state is then unchanged.
    pub fn resume(&mut self) -> Result<(), SpeechError> {
        if self.state != SpeechState::Paused {
            return Ok(());
        }
        self.backend.resume()?;
        self.state = SpeechState::Reading;
        Ok(())
    }

    /// Pauses when reading, resumes when paused.
    ///
    /// # Errors
    ///
    /// See [`pause`](Self::pause) and [`resume`](Self::resume).
    pub fn toggle_pause(&mut self) -> Result<(), SpeechError> {
        match self.state {
            SpeechState::Reading => self.pause(),
            SpeechState::Paused => self.resume(),
            SpeechState::Idle => Ok(()),
        }
    }

    /// Detects completion; returns the state after polling.
    pub fn poll(&mut self) -> SpeechState {
        if self.state == SpeechState::Reading && !self.backend.is_speaking() {
            debug!(id = self.next_id, "Utterance finished");
            self.state = SpeechState::Idle;
        }
        self.state
    }

    /// Releases the speech resource.
    pub fn shutdown(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records calls; `active` holds ids of utterances currently speaking.
    #[derive(Default)]
    struct FakeBackend {
        voices: Vec<Voice>,
        active: Vec<u64>,
        spoken: Vec<Utterance>,
        fail_with: Option<SpeechError>,
        voice_queries: usize,
    }

    impl SpeechBackend for FakeBackend {
        fn voices(&mut self) -> Vec<Voice> {
            self.voice_queries += 1;
            self.voices.clone()
        }

        fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
            if let Some(err) = self.fail_with.clone() {
                return Err(err);
            }
            self.active.push(utterance.id);
            self.spoken.push(utterance.clone());
            Ok(())
        }

        fn cancel(&mut self) {
            self.active.clear();
        }

        fn pause(&mut self) -> Result<(), SpeechError> {
            Ok(())
        }

        fn resume(&mut self) -> Result<(), SpeechError> {
            Ok(())
        }

        fn is_speaking(&mut self) -> bool {
            !self.active.is_empty()
        }
    }

    fn reader() -> ReadAloud<FakeBackend> {
        ReadAloud::new(FakeBackend::default(), "en-CA")
    }

    #[test]
    fn second_start_cancels_first() {
        let mut speech = reader();
        speech.start("first").unwrap();
        speech.start("second").unwrap();

        assert_eq!(speech.state(), SpeechState::Reading);
        assert_eq!(speech.backend().active.len(), 1);
        assert_eq!(speech.backend().spoken.last().unwrap().text, "second");
    }

    #[test]
    fn stop_from_idle_is_noop() {
        let mut speech = reader();
        speech.stop();
        assert_eq!(speech.state(), SpeechState::Idle);
        assert!(speech.backend().spoken.is_empty());
    }

    #[test]
    fn pause_and_resume_only_when_active() {
        let mut speech = reader();
        speech.pause().unwrap();
        speech.resume().unwrap();
        assert_eq!(speech.state(), SpeechState::Idle);

        speech.start("text").unwrap();
        speech.pause().unwrap();
        assert_eq!(speech.state(), SpeechState::Paused);
        speech.pause().unwrap();
        assert_eq!(speech.state(), SpeechState::Paused);
        speech.resume().unwrap();
        assert_eq!(speech.state(), SpeechState::Reading);
    }

    #[test]
    fn start_while_paused_replaces_utterance() {
        let mut speech = reader();
        speech.start("one").unwrap();
        speech.pause().unwrap();
        speech.start("two").unwrap();
        assert_eq!(speech.state(), SpeechState::Reading);
        assert_eq!(speech.backend().active.len(), 1);
    }

    #[test]
    fn completion_returns_to_idle() {
        let mut speech = reader();
        speech.start("text").unwrap();
        assert_eq!(speech.poll(), SpeechState::Reading);
        speech.backend.active.clear();
        assert_eq!(speech.poll(), SpeechState::Idle);
    }

    #[test]
    fn blank_text_is_ignored() {
        let mut speech = reader();
        speech.start("   ").unwrap();
        assert_eq!(speech.state(), SpeechState::Idle);
    }

    #[test]
    fn failed_start_stays_idle() {
        let mut speech = ReadAloud::new(
            FakeBackend {
                fail_with: Some(SpeechError::PermissionDenied),
                ..FakeBackend::default()
            },
            "en-CA",
        );
        let err = speech.start("text").unwrap_err();
        assert_eq!(speech.state(), SpeechState::Idle);
        assert_eq!(report(&err), Some(PERMISSION_NOTICE));
    }

    #[test]
    fn error_severities() {
        assert_eq!(report(&SpeechError::Cancelled), None);
        assert_eq!(report(&SpeechError::Interrupted), None);
        assert_eq!(SpeechError::Backend("x".into()).severity(), Severity::LogOnly);
        assert_eq!(SpeechError::Unsupported("pause").severity(), Severity::LogOnly);
        assert_eq!(SpeechError::PermissionDenied.severity(), Severity::Blocking);
    }

    #[test]
    fn voice_is_resolved_once() {
        let mut speech = ReadAloud::new(
            FakeBackend {
                voices: vec![Voice {
                    id: "en-ca".into(),
                    name: "Canadian".into(),
                    lang: "en-CA".into(),
                }],
                ..FakeBackend::default()
            },
            "en-CA",
        );
        speech.start("a").unwrap();
        speech.start("b").unwrap();
        assert_eq!(speech.backend().voice_queries, 1);
        let used = speech.backend().spoken[1].voice.as_ref().unwrap();
        assert_eq!(used.name, "Canadian");
    }
}
