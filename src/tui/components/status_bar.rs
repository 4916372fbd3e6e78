//! Status bar component.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::compare::MAX_COMPARED;
use crate::feed::FeedState;
use crate::speech::SpeechState;
use crate::tui::app::App;

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let feed_color = match app.feed.state() {
        FeedState::Loaded(_) => Color::Green,
        FeedState::Loading => Color::Yellow,
        FeedState::Failed(_) => Color::Red,
    };

    let updated_span = match app.feed.last_updated() {
        Some(ts) => Span::styled(
            format!(" Updated {} ", ts),
            Style::default().fg(Color::White),
        ),
        None => Span::raw(""),
    };

    let compare_span = Span::styled(
        format!(" Compare {}/{} ", app.comparison.len(), MAX_COMPARED),
        Style::default().fg(Color::Cyan),
    );

    // Read-aloud badge hides itself when idle for a while
    let speech_span = if app.speech_visible(Instant::now()) {
        let color = match app.speech_state {
            SpeechState::Reading => Color::Green,
            SpeechState::Paused => Color::Yellow,
            SpeechState::Idle => Color::White,
        };
        Span::styled(
            format!(" 🔊 {} ", app.speech_state.label()),
            Style::default().fg(color),
        )
    } else {
        Span::raw("")
    };

    let error_span = if let Some(ref error) = app.error_message {
        Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::raw("")
    };

    let tab_info = format!(" {}/{} ", app.active_tab + 1, app.tabs.len());

    let spans = vec![
        Span::styled(
            format!(" {} ", app.feed_label()),
            Style::default().fg(feed_color),
        ),
        Span::raw("│"),
        Span::styled(
            format!(" {} ", app.source),
            Style::default().fg(Color::Gray),
        ),
        updated_span,
        Span::raw("│"),
        compare_span,
        Span::raw("│"),
        speech_span,
        error_span,
        Span::raw(format!(
            "{:>width$}",
            tab_info,
            width = area.width.saturating_sub(70) as usize
        )),
    ];

    let line = Line::from(spans);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
