//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::{App, Mode, Tab};
use super::components::tooltip;
use super::tabs::{compare, glossary, market, rates};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_tab() {
        Tab::Rates => rates::render(frame, app),
        Tab::Compare => compare::render(frame, app),
        Tab::Market => market::render(frame, app),
        Tab::Glossary => glossary::render(frame, app),
    }

    let area = frame.area();
    tooltip::render(frame, area, &app.tooltip);

    if app.mode == Mode::Notice
        && let Some(ref notice) = app.notice
    {
        render_notice(frame, notice);
    }
}

/// Renders a blocking notice centered on screen.
fn render_notice(frame: &mut Frame, notice: &str) {
    let area = frame.area();
    let width = 56.min(area.width);
    let height = 7.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .title(Span::styled(
            " Read Aloud ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let para = Paragraph::new(vec![
        Line::from(notice.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(block)
    .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup);
    frame.render_widget(para, popup);
}
