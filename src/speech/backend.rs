//! Text-to-speech backends.

use std::io;
use std::process::Stdio;

use tokio::process::{Child, Command};

use tracing::{debug, warn};

use super::SpeechError;

/// A voice offered by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Identifier passed back to the backend when speaking.
    pub id: String,
    pub name: String,
    /// Language tag, e.g. `en-gb`.
    pub lang: String,
}

/// A single request to speak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub id: u64,
    pub text: String,
    /// `None` leaves the choice to the platform default.
    pub voice: Option<Voice>,
}

/// Platform speech capability driven by [`ReadAloud`](super::ReadAloud).
///
/// Implementations speak one utterance at a time; the controller always
/// cancels before starting a new one.
pub trait SpeechBackend: Send {
    /// Voices available on this platform.
    fn voices(&mut self) -> Vec<Voice>;

    /// Starts speaking `utterance` without waiting for it to finish.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;

    /// Stops the current utterance, if any.
    fn cancel(&mut self);

    fn pause(&mut self) -> Result<(), SpeechError>;

    fn resume(&mut self) -> Result<(), SpeechError>;

    /// Whether the last utterance is still being spoken.
    fn is_speaking(&mut self) -> bool;
}

/// Speaks through an external program such as `espeak-ng`.
///
/// The program is invoked as `<program> [-v <voice>] <text>` and its
/// voice list is read once from `<program> --voices` by
/// [`discover`](Self::discover). Pausing is not supported. The running
/// process is killed when the backend is dropped.
pub struct CommandBackend {
    program: String,
    voices: Vec<Voice>,
    child: Option<Child>,
}

impl CommandBackend {
    /// A backend with no known voices; the platform default is used.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            voices: Vec::new(),
            child: None,
        }
    }

    /// Creates a backend and loads the program's voice list.
    ///
    /// A program that cannot be run yields a backend without voices.
    pub async fn discover(program: impl Into<String>) -> Self {
        let mut backend = Self::new(program);
        match Command::new(&backend.program)
            .arg("--voices")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
        {
            Ok(output) => {
                backend.voices = parse_voice_list(&String::from_utf8_lossy(&output.stdout));
                debug!(
                    program = %backend.program,
                    count = backend.voices.len(),
                    "Loaded voices"
                );
            }
            Err(e) => warn!(program = %backend.program, "Could not list voices: {e}"),
        }
        backend
    }
}

impl SpeechBackend for CommandBackend {
    fn voices(&mut self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        let mut command = Command::new(&self.program);
        if let Some(voice) = &utterance.voice {
            command.arg("-v").arg(&voice.id);
        }
        let child = command
            .arg(&utterance.text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_error(&self.program, e))?;

        debug!(id = utterance.id, pid = ?child.id(), "Speech process started");
        self.child = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take()
            && let Err(e) = child.start_kill()
        {
            debug!("Speech process already gone: {e}");
        }
    }

    fn pause(&mut self) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported("pause"))
    }

    fn resume(&mut self) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported("resume"))
    }

    fn is_speaking(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(_)) | Err(_) => {
                self.child = None;
                false
            }
        }
    }
}

fn spawn_error(program: &str, err: io::Error) -> SpeechError {
    match err.kind() {
        io::ErrorKind::PermissionDenied => SpeechError::PermissionDenied,
        io::ErrorKind::NotFound => SpeechError::Backend(format!("{program} not found")),
        _ => SpeechError::Backend(format!("failed to start {program}: {err}")),
    }
}

/// Parses `espeak-ng --voices` output.
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  en-gb           M  english              gmw/en               (en 2)
/// ```
fn parse_voice_list(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut cols = line.split_whitespace();
            let _priority = cols.next()?;
            let lang = cols.next()?;
            let _gender = cols.next()?;
            let name = cols.next()?;
            Some(Voice {
                id: lang.to_string(),
                name: name.to_string(),
                lang: lang.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_espeak_voice_table() {
        let output = "Pty Language       Age/Gender VoiceName          File       Other Langs\n \
                      5  en-gb           M  english              gmw/en               (en 2)\n \
                      5  fr-ca           M  French_(Quebec)      roa/fr-CA\n";
        let voices = parse_voice_list(output);
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[0].lang, "en-gb");
        assert_eq!(voices[0].name, "english");
        assert_eq!(voices[1].id, "fr-ca");
    }

    fn utterance(text: &str) -> Utterance {
        Utterance {
            id: 1,
            text: text.into(),
            voice: None,
        }
    }

    #[tokio::test]
    async fn missing_program_is_a_backend_error() {
        let mut backend = CommandBackend::discover("ratescope-no-such-tts-program").await;
        assert!(backend.voices().is_empty());
        assert!(matches!(
            backend.speak(&utterance("hello")),
            Err(SpeechError::Backend(_))
        ));
        assert!(!backend.is_speaking());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn cancel_stops_running_process() {
        // `sleep 30` stands in for a long utterance
        let mut backend = CommandBackend::new("sleep");
        backend.speak(&utterance("30")).unwrap();
        assert!(backend.is_speaking());

        backend.cancel();
        assert!(!backend.is_speaking());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn finished_process_is_not_speaking() {
        let mut backend = CommandBackend::new("true");
        backend.speak(&utterance("done")).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        assert!(!backend.is_speaking());
    }
}
