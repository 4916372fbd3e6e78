//! Application configuration loaded from environment variables.
//!
//! Every variable is optional; an empty value is treated as unset.
//! - `RATESCOPE_API_URL`: base URL of the rates service
//! - `RATESCOPE_TIMEOUT_SECS`: HTTP request timeout in seconds
//! - `RATESCOPE_SERVER_FILTERING`: `1`/`true` to use the filtered endpoint
//! - `RATESCOPE_RATES_FILE`: load rates from a local JSON file instead
//! - `RATESCOPE_LOCALE`: locale used for voice selection
//! - `RATESCOPE_TTS_COMMAND`: text-to-speech program
//! - `RATESCOPE_SPEECH_IDLE_SECS`: idle time before the read-aloud badge hides
//! - `RATESCOPE_LOG_FILE`: where tracing output is written

use std::path::PathBuf;
use std::time::Duration;

/// Default rates service.
const DEFAULT_API_URL: &str = "http://localhost:3000";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOCALE: &str = "en-CA";
const DEFAULT_TTS_COMMAND: &str = "espeak-ng";
const DEFAULT_SPEECH_IDLE_SECS: u64 = 5;
const DEFAULT_LOG_FILE: &str = "ratescope.log";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub speech: SpeechConfig,
    pub log_file: PathBuf,
}

/// Where rates come from and how they are fetched.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Ask the server to pre-filter; results are still filtered locally.
    pub server_filtering: bool,
    /// When set, rates are read from this file and never fetched.
    pub rates_file: Option<PathBuf>,
}

/// Read-aloud settings.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub locale: String,
    pub command: String,
    pub idle_timeout: Duration,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`RatescopeError::Config`](crate::RatescopeError::Config) if a
/// numeric or boolean variable cannot be parsed, or if the API URL is not
/// an `http(s)` URL.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url = non_empty_var("RATESCOPE_API_URL")
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(crate::RatescopeError::Config(format!(
            "RATESCOPE_API_URL must start with http:// or https://, got {base_url}"
        )));
    }

    let timeout = Duration::from_secs(positive_secs(
        "RATESCOPE_TIMEOUT_SECS",
        DEFAULT_TIMEOUT_SECS,
    )?);
    let idle_timeout = Duration::from_secs(positive_secs(
        "RATESCOPE_SPEECH_IDLE_SECS",
        DEFAULT_SPEECH_IDLE_SECS,
    )?);

    let server_filtering = match non_empty_var("RATESCOPE_SERVER_FILTERING").as_deref() {
        None => false,
        Some("1") | Some("true") | Some("yes") => true,
        Some("0") | Some("false") | Some("no") => false,
        Some(other) => {
            return Err(crate::RatescopeError::Config(format!(
                "RATESCOPE_SERVER_FILTERING must be a boolean, got {other}"
            )));
        }
    };

    Ok(AppConfig {
        api: ApiConfig {
            base_url,
            timeout,
            server_filtering,
            rates_file: non_empty_var("RATESCOPE_RATES_FILE").map(PathBuf::from),
        },
        speech: SpeechConfig {
            locale: non_empty_var("RATESCOPE_LOCALE").unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            command: non_empty_var("RATESCOPE_TTS_COMMAND")
                .unwrap_or_else(|| DEFAULT_TTS_COMMAND.to_string()),
            idle_timeout,
        },
        log_file: non_empty_var("RATESCOPE_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Parses a positive number of seconds, falling back to `default` when unset.
fn positive_secs(name: &str, default: u64) -> crate::Result<u64> {
    match non_empty_var(name) {
        None => Ok(default),
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(crate::RatescopeError::Config(format!(
                "{name} must be a positive integer, got {raw}"
            ))),
        },
    }
}
