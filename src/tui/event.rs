//! Event handling for the TUI.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::api::FetchError;
use crate::feed::RequestTicket;
use crate::models::RatesPage;
use crate::sort::SortField;
use crate::speech::SpeechState;

use super::app::{App, Focus, Mode, Tab};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// A rates request finished.
    RatesFetched {
        seq: u64,
        result: Result<RatesPage, FetchError>,
    },

    /// The speech controller changed state.
    Speech(SpeechState),
    /// The speech controller needs the user's attention.
    SpeechNotice(String),

    /// Request to quit the application.
    Quit,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {
                    if tx.is_closed() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Actions that require external handling (network, speech).
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Fetch rates for this request.
    Fetch(RequestTicket),
    /// Read this text aloud, replacing anything being read.
    ReadAloud(String),
    /// Pause or resume reading.
    ToggleSpeechPause,
    /// Stop reading.
    StopSpeech,
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::RatesFetched { seq, result } => {
            if app.feed.complete(seq, result) {
                app.clamp_cursor();
            }
            None
        }
        Message::Speech(state) => {
            app.speech_state = state;
            None
        }
        Message::SpeechNotice(notice) => {
            app.show_notice(notice);
            None
        }
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => {
            app.speech_visibility.touch(Instant::now());
            handle_key(app, key)
        }
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_errors();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Global keys (work in any mode)
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Char('q') if key.modifiers.is_empty() && app.mode == Mode::Normal => {
            app.should_quit = true;
            return None;
        }
        _ => {}
    }

    // Mode-specific handling
    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
        Mode::Select => handle_select_mode(app, key),
        Mode::Notice => handle_notice_mode(app, key),
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        // Tab navigation
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.previous_tab();
            } else {
                app.next_tab();
            }
            None
        }
        KeyCode::BackTab => {
            app.previous_tab();
            None
        }

        KeyCode::Esc => {
            app.tooltip.hide();
            None
        }

        // Tooltip for the focused control
        KeyCode::Char('?') => {
            let key = app.focus_key();
            app.tooltip.toggle(key);
            None
        }

        // Refresh, or retry after a failure
        KeyCode::Char('r') => app.feed.retry().map(Action::Fetch),

        // Read aloud controls
        KeyCode::Char('a') => read_aloud_text(app).map(Action::ReadAloud),
        KeyCode::Char('p') => Some(Action::ToggleSpeechPause),
        KeyCode::Char('s') => Some(Action::StopSpeech),

        _ => {
            // Delegate to tab-specific handling
            match app.current_tab() {
                Tab::Rates => handle_rates_tab_keys(app, key),
                Tab::Compare => handle_compare_tab_keys(app, key),
                Tab::Market => None,
                Tab::Glossary => handle_glossary_tab_keys(app, key),
            }
        }
    }
}

/// Text read aloud for the current tab.
fn read_aloud_text(app: &App) -> Option<String> {
    match app.current_tab() {
        Tab::Rates => app.selected_rate().map(|r| r.spoken_summary()),
        Tab::Compare => Some(app.comparison.spoken_summary()),
        Tab::Market => Some(app.market_summary().spoken_summary()),
        Tab::Glossary => crate::glossary::GLOSSARY
            .get(app.glossary_index)
            .map(|e| format!("{}. {}", e.label, e.description)),
    }
}

/// Handles keys for the Rates tab.
fn handle_rates_tab_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        // Focus navigation across filters and table
        KeyCode::Char('h') | KeyCode::Left => {
            app.set_focus(app.focus.previous());
            None
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.set_focus(app.focus.next());
            None
        }

        // Table cursor
        KeyCode::Char('j') | KeyCode::Down => {
            if app.focus == Focus::Table {
                let len = app.visible_rates().len();
                if app.table_index + 1 < len {
                    app.table_index += 1;
                }
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.focus == Focus::Table {
                app.table_index = app.table_index.saturating_sub(1);
            }
            None
        }

        // Sort column controls
        KeyCode::Char('1') => sort_by(app, SortField::Rate),
        KeyCode::Char('2') => sort_by(app, SortField::Apr),
        KeyCode::Char('3') => sort_by(app, SortField::Lender),

        // Activate the focused filter
        KeyCode::Enter => {
            if app.focus == Focus::RateType {
                app.rate_type.next();
                return app.filters_changed().map(Action::Fetch);
            }
            if let Some(dropdown) = app.dropdown_mut(app.focus) {
                dropdown.open();
                app.mode = Mode::Select;
            }
            None
        }

        // Comparison
        KeyCode::Char(' ') => {
            if let Some(rate) = app.selected_rate() {
                if !app.comparison.contains(&rate.id) && app.comparison.is_full() {
                    app.show_error("Comparison is full (3 rates)");
                }
                app.comparison.toggle(&rate);
            }
            None
        }
        KeyCode::Char('c') => {
            if let Some(rate) = app.selected_rate() {
                app.comparison.compare_one(&rate);
                app.show_tab(Tab::Compare);
            }
            None
        }

        // Clear filters
        KeyCode::Char('x') => {
            app.clear_filters();
            app.filters_changed().map(Action::Fetch)
        }

        _ => None,
    }
}

fn sort_by(app: &mut App, field: SortField) -> Option<Action> {
    app.sort.select(field);
    app.tooltip.follow(app.focus_key());
    None
}

/// Handles keys for the Compare tab.
fn handle_compare_tab_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => {
            app.set_focus(Focus::Amount);
            app.mode = Mode::Insert;
            None
        }
        KeyCode::Char('x') => {
            app.comparison.clear();
            None
        }
        _ => None,
    }
}

/// Handles keys for the Glossary tab.
fn handle_glossary_tab_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.glossary_index + 1 < crate::glossary::GLOSSARY.len() {
                app.glossary_index += 1;
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.glossary_index = app.glossary_index.saturating_sub(1);
            None
        }
        _ => None,
    }
}

/// Handles keys while a dropdown list is open.
fn handle_select_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    let focus = app.focus;
    let Some(dropdown) = app.dropdown_mut(focus) else {
        app.mode = Mode::Normal;
        return None;
    };

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => dropdown.next(),
        KeyCode::Char('k') | KeyCode::Up => dropdown.previous(),
        KeyCode::Enter => {
            let changed = dropdown.confirm();
            app.mode = Mode::Normal;
            if changed {
                return app.filters_changed().map(Action::Fetch);
            }
        }
        KeyCode::Esc => {
            dropdown.cancel();
            app.mode = Mode::Normal;
        }
        _ => {}
    }
    None
}

/// Handles keys in insert mode (amount field).
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.mode = Mode::Normal;
            if !app.amount.is_empty() && crate::payment::parse_amount(app.amount.as_str()).is_none()
            {
                app.show_error("Enter a positive amount, e.g. 450,000");
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '.' | ',' | '$') => {
            app.amount.insert(c);
        }
        KeyCode::Backspace => app.amount.backspace(),
        KeyCode::Delete => app.amount.delete(),
        KeyCode::Left => app.amount.move_left(),
        KeyCode::Right => app.amount.move_right(),
        KeyCode::Home => app.amount.move_home(),
        KeyCode::End => app.amount.move_end(),
        _ => {}
    }
    None
}

/// Handles keys while a blocking notice is shown.
fn handle_notice_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.notice = None;
        app.mode = Mode::Normal;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::RateFeed;
    use crate::models::{Lender, Rate, RateType, Trend};
    use rust_decimal::Decimal;

    fn rate(id: &str, value: i64, lender: &str) -> Rate {
        Rate {
            id: id.to_string(),
            lender: Lender {
                name: lender.to_string(),
                logo: String::new(),
                category: "Major Bank".to_string(),
                color: String::new(),
            },
            rate: Decimal::new(value, 2),
            apr: Decimal::new(value + 5, 2),
            term: "5 Years".to_string(),
            rate_type: RateType::Fixed,
            change: Decimal::ZERO,
            features: vec![],
            trend: Trend::Stable,
            provinces: vec!["Ontario".to_string()],
            purpose: Some("Purchase".to_string()),
        }
    }

    fn key(code: KeyCode) -> Message {
        Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn loaded_app() -> App {
        let page = RatesPage::from_rates(vec![
            rate("a", 489, "Zeta"),
            rate("b", 459, "alpha"),
            rate("c", 505, "Beta"),
        ]);
        App::new(RateFeed::with_data(page), "test", Duration::from_secs(5))
    }

    #[test]
    fn remote_app_refresh_issues_fetch() {
        let mut app = App::new(RateFeed::new(), "test", Duration::from_secs(5));
        let action = update(&mut app, key(KeyCode::Char('r')));
        let Some(Action::Fetch(ticket)) = action else {
            panic!("expected fetch, got {action:?}");
        };
        assert!(app.feed.is_loading());

        update(
            &mut app,
            Message::RatesFetched {
                seq: ticket.seq,
                result: Err(FetchError::Server(503)),
            },
        );
        assert_eq!(app.feed_label(), "Error");
    }

    #[test]
    fn external_app_refresh_is_noop() {
        let mut app = loaded_app();
        assert_eq!(update(&mut app, key(KeyCode::Char('r'))), None);
        assert_eq!(app.feed_label(), "3 rates");
    }

    #[test]
    fn table_is_sorted_by_rate_then_lender() {
        let mut app = loaded_app();
        let ids: Vec<String> = app.visible_rates().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["b", "a", "c"]);

        update(&mut app, key(KeyCode::Char('3')));
        let ids: Vec<String> = app.visible_rates().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn space_toggles_comparison_and_c_compares_one() {
        let mut app = loaded_app();
        update(&mut app, key(KeyCode::Char(' ')));
        update(&mut app, key(KeyCode::Down));
        update(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(app.comparison.len(), 2);

        update(&mut app, key(KeyCode::Char('c')));
        assert_eq!(app.comparison.len(), 1);
        assert_eq!(app.current_tab(), Tab::Compare);
        assert_eq!(app.focus, Focus::Amount);
    }

    #[test]
    fn dropdown_filters_table() {
        let mut app = loaded_app();
        update(&mut app, key(KeyCode::Left)); // LenderType
        update(&mut app, key(KeyCode::Left)); // Term
        assert_eq!(app.focus, Focus::Term);

        update(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Select);
        // "1 Year"
        update(&mut app, key(KeyCode::Down));
        update(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.term.value(), "1 Year");
        assert!(app.visible_rates().is_empty());

        update(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.visible_rates().len(), 3);
    }

    #[test]
    fn server_filtering_refetches_on_filter_change() {
        let mut app = App::new(RateFeed::new(), "test", Duration::from_secs(5));
        app.refetch_on_filter = true;
        app.set_focus(Focus::RateType);

        let action = update(&mut app, key(KeyCode::Enter));
        let Some(Action::Fetch(ticket)) = action else {
            panic!("expected fetch, got {action:?}");
        };
        assert_eq!(ticket.criteria.rate_type, Some(RateType::Fixed));

        // Clearing issues a newer request; the older response is ignored
        let Some(Action::Fetch(newer)) = update(&mut app, key(KeyCode::Char('x'))) else {
            panic!("expected fetch");
        };
        assert!(newer.seq > ticket.seq);
        update(
            &mut app,
            Message::RatesFetched {
                seq: ticket.seq,
                result: Ok(RatesPage::from_rates(vec![rate("a", 489, "Zeta")])),
            },
        );
        assert!(app.feed.is_loading());
    }

    #[test]
    fn read_aloud_uses_selected_rate() {
        let mut app = loaded_app();
        let action = update(&mut app, key(KeyCode::Char('a')));
        let Some(Action::ReadAloud(text)) = action else {
            panic!("expected read aloud, got {action:?}");
        };
        assert!(text.starts_with("alpha offers"));
    }

    #[test]
    fn notice_blocks_until_dismissed() {
        let mut app = loaded_app();
        update(&mut app, Message::SpeechNotice("blocked".into()));
        assert_eq!(app.mode, Mode::Notice);
        assert_eq!(update(&mut app, key(KeyCode::Char('r'))), None);
        assert!(!app.should_quit);
        update(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        update(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.notice.is_none());
    }

    #[test]
    fn amount_accepts_digits_only() {
        let mut app = loaded_app();
        app.show_tab(Tab::Compare);
        update(&mut app, key(KeyCode::Char('i')));
        assert_eq!(app.mode, Mode::Insert);
        update(&mut app, key(KeyCode::Char('z')));
        update(&mut app, key(KeyCode::Backspace));
        update(&mut app, key(KeyCode::Char('1')));
        update(&mut app, key(KeyCode::Enter));
        assert_eq!(app.amount.as_str(), "500001");
        assert_eq!(app.mode, Mode::Normal);
    }
}
