//! Market tab layout and rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::market::{MarketSummary, Mover};
use crate::tui::app::App;
use crate::tui::components::{status_bar, tab_bar};

use super::rates::format_change;

/// Renders the Market tab.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
            Constraint::Length(6), // Lowest by type
            Constraint::Min(6),    // Averages and movers
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    tab_bar::render(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);

    let summary = app.market_summary();
    render_by_type(frame, main_layout[2], &summary);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_layout[3]);
    render_by_term(frame, columns[0], &summary);
    render_movers(frame, columns[1], &summary);

    let help = Paragraph::new("[Tab]switch tab [a]read summary [p]pause [s]stop [r]refresh [q]quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, main_layout[4]);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn render_by_type(frame: &mut Frame, area: Rect, summary: &MarketSummary) {
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{:<10} {:>6} {:>9} {:>9}  {}",
            "Type", "Count", "Lowest", "Average", "Lowest from"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    if summary.by_type.is_empty() {
        lines.push(Line::from(Span::styled(
            "No rates loaded",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for t in &summary.by_type {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<10} {:>6} ", t.rate_type.label(), t.count)),
            Span::styled(
                format!("{:>8.2}%", t.lowest),
                Style::default().fg(Color::Green),
            ),
            Span::raw(format!(" {:>8.2}%  ", t.average)),
            Span::styled(t.lowest_lender.clone(), Style::default().fg(Color::Cyan)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(panel("Lowest Rates")), area);
}

fn render_by_term(frame: &mut Frame, area: Rect, summary: &MarketSummary) {
    let mut lines = vec![Line::from(Span::styled(
        format!("{:<10} {:>6} {:>9}", "Term", "Count", "Average"),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    for t in &summary.by_term {
        lines.push(Line::from(format!(
            "{:<10} {:>6} {:>8.2}%",
            t.term, t.count, t.average
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(panel("Average by Term")), area);
}

fn mover_line<'a>(label: &'a str, mover: Option<&Mover>, color: Color) -> Line<'a> {
    match mover {
        Some(m) => Line::from(vec![
            Span::styled(label, Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:>6}", format_change(m.change)),
                Style::default().fg(color),
            ),
            Span::raw(format!("  {} ({})", m.lender, m.term)),
        ]),
        None => Line::from(vec![
            Span::styled(label, Style::default().fg(Color::DarkGray)),
            Span::raw("-"),
        ]),
    }
}

fn render_movers(frame: &mut Frame, area: Rect, summary: &MarketSummary) {
    let lines = vec![
        Line::from(vec![
            Span::styled("▲ ", Style::default().fg(Color::Red)),
            Span::raw(format!("{} rising   ", summary.rising)),
            Span::styled("▼ ", Style::default().fg(Color::Green)),
            Span::raw(format!("{} falling   ", summary.falling)),
            Span::styled("─ ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{} stable", summary.stable)),
        ]),
        Line::from(""),
        mover_line(
            "Biggest increase  ",
            summary.biggest_increase.as_ref(),
            Color::Red,
        ),
        mover_line(
            "Biggest decrease  ",
            summary.biggest_decrease.as_ref(),
            Color::Green,
        ),
    ];

    frame.render_widget(Paragraph::new(lines).block(panel("Trends")), area);
}
