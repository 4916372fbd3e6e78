use std::fs::File;
use std::sync::{Arc, Mutex};

use ratescope::RatescopeError;
use ratescope::api::{LocalProvider, RateProvider, RatesClient, RemoteProvider};
use ratescope::config::{AppConfig, fetch_config};
use ratescope::feed::RateFeed;
use ratescope::speech::{self, CommandBackend, ReadAloud, SpeechError};
use ratescope::tui::event::{spawn_event_reader, spawn_tick_timer, update};
use ratescope::tui::{Action, App, Message, restore_terminal, setup_terminal};
use tokio::sync::mpsc;
use tracing::{error, info};

/// Interval between UI ticks.
const TICK_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<(), RatescopeError> {
    let app_config = fetch_config()?;

    // Log to a file so tracing output doesn't corrupt the alternate screen.
    let log_file = File::create(&app_config.log_file)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let provider = build_provider(&app_config)?;
    info!(source = %provider.describe(), "Starting ratescope");

    let feed = RateFeed::for_provider(provider.as_ref());
    let mut app = App::new(
        feed,
        provider.describe(),
        app_config.speech.idle_timeout,
    );
    app.refetch_on_filter = app_config.api.server_filtering;

    let mut speech = ReadAloud::new(
        CommandBackend::discover(app_config.speech.command.clone()).await,
        app_config.speech.locale.clone(),
    );

    let mut terminal = setup_terminal()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), TICK_MS);

    // Initial load; a no-op for preloaded data
    if let Some(ticket) = app.feed.begin(app.criteria()) {
        handle_action(Action::Fetch(ticket), &provider, &mut speech, &tx);
    }

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ratescope::tui::render(frame, &app)) {
            break Err(RatescopeError::from(e));
        }

        let Some(message) = rx.recv().await else {
            break Ok(());
        };

        let is_tick = matches!(message, Message::Input(ratescope::tui::Event::Tick));
        if let Some(action) = update(&mut app, message) {
            handle_action(action, &provider, &mut speech, &tx);
        }

        if is_tick {
            let state = speech.poll();
            if state != app.speech_state {
                update(&mut app, Message::Speech(state));
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    speech.shutdown();
    restore_terminal(&mut terminal)?;
    info!("Exiting ratescope");

    result
}

/// Picks the local file provider when configured, else the rates service.
fn build_provider(config: &AppConfig) -> ratescope::Result<Arc<dyn RateProvider>> {
    match config.api.rates_file {
        Some(ref path) => Ok(Arc::new(LocalProvider::from_file(path)?)),
        None => {
            let client = RatesClient::new(&config.api.base_url, config.api.timeout)?;
            Ok(Arc::new(RemoteProvider::new(
                client,
                config.api.server_filtering,
            )))
        }
    }
}

/// Performs an action returned by `update`.
fn handle_action(
    action: Action,
    provider: &Arc<dyn RateProvider>,
    speech: &mut ReadAloud<CommandBackend>,
    tx: &mpsc::UnboundedSender<Message>,
) {
    let outcome = match action {
        Action::Fetch(ticket) => {
            let provider = Arc::clone(provider);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = provider.fetch(&ticket.criteria).await;
                let _ = tx.send(Message::RatesFetched {
                    seq: ticket.seq,
                    result,
                });
            });
            return;
        }
        Action::ReadAloud(text) => speech.start(&text),
        Action::ToggleSpeechPause => speech.toggle_pause(),
        Action::StopSpeech => {
            speech.stop();
            Ok(())
        }
    };

    let _ = tx.send(Message::Speech(speech.state()));
    if let Err(err) = outcome {
        report_speech_error(&err, tx);
    }
}

fn report_speech_error(err: &SpeechError, tx: &mpsc::UnboundedSender<Message>) {
    if let Some(notice) = speech::report(err)
        && tx.send(Message::SpeechNotice(notice.to_string())).is_err()
    {
        error!("UI channel closed before speech notice was shown");
    }
}
