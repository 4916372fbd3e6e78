//! Glossary tab layout and rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::glossary::GLOSSARY;
use crate::tui::app::App;
use crate::tui::components::{status_bar, tab_bar};

/// Renders the Glossary tab.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
            Constraint::Min(6),    // Terms and description
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    tab_bar::render(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(20)])
        .split(main_layout[2]);

    let items: Vec<ListItem> = GLOSSARY
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == app.glossary_index {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled(format!(" {} ", entry.label), style))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Terms ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(list, columns[0]);

    if let Some(entry) = GLOSSARY.get(app.glossary_index) {
        let para = Paragraph::new(vec![
            Line::from(Span::styled(
                entry.label,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(entry.description),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });
        frame.render_widget(para, columns[1]);
    }

    let help = Paragraph::new("[Tab]switch tab [j/k]move [a]read aloud [p]pause [s]stop [q]quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, main_layout[3]);
}
