//! Rates tab layout and rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use rust_decimal::Decimal;

use crate::feed::FeedState;
use crate::models::{Rate, Trend};
use crate::sort::SortField;
use crate::tui::app::{App, Focus, Mode};
use crate::tui::components::{status_bar, tab_bar};
use crate::tui::input::{Dropdown, MultipleChoice};

/// Renders the Rates tab.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main vertical layout
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
            Constraint::Length(3), // Filters
            Constraint::Min(8),    // Rates table
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    tab_bar::render(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);
    let cells = render_filters(frame, main_layout[2], app);
    render_table(frame, main_layout[3], app);
    render_keybindings(frame, main_layout[4], app);

    // Open dropdown list drawn last so it overlays the table
    if app.mode == Mode::Select
        && let Some(dropdown) = app.dropdown(app.focus)
        && let Some(pos) = Focus::RATES_ORDER.iter().position(|f| *f == app.focus)
        && let Some(cell) = cells.get(pos)
    {
        render_dropdown_list(frame, *cell, area, dropdown);
    }
}

/// Renders the filter row and returns each control's cell.
fn render_filters(frame: &mut Frame, area: Rect, app: &App) -> Vec<Rect> {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(22),
            Constraint::Percentage(16),
            Constraint::Percentage(28),
            Constraint::Percentage(14),
            Constraint::Percentage(20),
        ])
        .split(area);

    render_dropdown_cell(frame, cells[0], &app.province, app.focus == Focus::Province);
    render_dropdown_cell(frame, cells[1], &app.purpose, app.focus == Focus::Purpose);
    render_choice_cell(frame, cells[2], &app.rate_type, app.focus == Focus::RateType);
    render_dropdown_cell(frame, cells[3], &app.term, app.focus == Focus::Term);
    render_dropdown_cell(frame, cells[4], &app.lender_type, app.focus == Focus::LenderType);

    cells.to_vec()
}

fn focus_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_dropdown_cell(frame: &mut Frame, area: Rect, dropdown: &Dropdown, is_focused: bool) {
    let block = Block::default()
        .title(format!(" {} ", dropdown.label()))
        .borders(Borders::ALL)
        .border_style(focus_style(is_focused));

    let arrow = if dropdown.is_open() { "▴" } else { "▾" };
    let para = Paragraph::new(Line::from(vec![
        Span::raw(dropdown.value().to_string()),
        Span::styled(format!(" {arrow}"), Style::default().fg(Color::DarkGray)),
    ]))
    .block(block);
    frame.render_widget(para, area);
}

fn render_choice_cell(frame: &mut Frame, area: Rect, choice: &MultipleChoice, is_focused: bool) {
    let block = Block::default()
        .title(format!(" {} ", choice.label()))
        .borders(Borders::ALL)
        .border_style(focus_style(is_focused));

    let spans: Vec<Span> = choice
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let (marker, style) = if i == choice.selected() {
                ("●", Style::default().fg(Color::Green))
            } else {
                ("○", Style::default().fg(Color::White))
            };
            Span::styled(format!("{marker} {option}  "), style)
        })
        .collect();

    let para = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(para, area);
}

/// Renders an open dropdown's options under its cell.
fn render_dropdown_list(frame: &mut Frame, cell: Rect, screen: Rect, dropdown: &Dropdown) {
    let height =
        (dropdown.options().len() as u16 + 2).min(screen.height.saturating_sub(cell.y + 3));
    let width = dropdown
        .options()
        .iter()
        .map(|o| o.len() as u16 + 4)
        .max()
        .unwrap_or(10)
        .max(cell.width);
    let popup = Rect {
        x: cell.x,
        y: cell.y + cell.height,
        width: width.min(screen.width.saturating_sub(cell.x)),
        height,
    };

    let items: Vec<ListItem> = dropdown
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = if i == dropdown.highlighted() {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled(format!(" {option} "), style))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(list, popup);
}

/// Column header with the sort arrow on the active column.
fn header_label(app: &App, field: SortField, key: char) -> String {
    if app.sort.field == field {
        format!("{}{} [{}]", field.label(), app.sort.order.arrow(), key)
    } else {
        format!("{} [{}]", field.label(), key)
    }
}

/// Renders the rates table, or the loading, error and empty states.
fn render_table(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Table;

    let block = Block::default()
        .title(" Mortgage Rates ")
        .borders(Borders::ALL)
        .border_style(focus_style(is_focused));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let placeholder = match app.feed.state() {
        FeedState::Loading => Some(Line::from(Span::styled(
            "Loading rates...",
            Style::default().fg(Color::Yellow),
        ))),
        FeedState::Failed(err) => Some(Line::from(vec![
            Span::styled(err.user_message(), Style::default().fg(Color::Red)),
            Span::styled("  [r] retry", Style::default().fg(Color::DarkGray)),
        ])),
        FeedState::Loaded(_) => None,
    };
    if let Some(line) = placeholder {
        frame.render_widget(Paragraph::new(line), inner);
        return;
    }

    let rates = app.visible_rates();
    if rates.is_empty() {
        let message = if app.feed.rates().is_empty() {
            "No rates available."
        } else {
            "No rates match the selected filters. [x] clears filters."
        };
        let para = Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(para, inner);
        return;
    }

    // Header
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "    {:<22} {:<13} {:>12} {:>11} {:<9} {:<9} {:>8}  {}",
            header_label(app, SortField::Lender, '3'),
            "Category",
            header_label(app, SortField::Rate, '1'),
            header_label(app, SortField::Apr, '2'),
            "Term",
            "Type",
            "Change",
            "Features"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    // Keep the cursor row on screen
    let rows = inner.height.saturating_sub(1) as usize;
    let offset = (app.table_index + 1).saturating_sub(rows);

    for (i, rate) in rates.iter().enumerate().skip(offset).take(rows) {
        let is_cursor = is_focused && i == app.table_index;
        lines.push(render_row(app, rate, is_cursor));
    }

    let para = Paragraph::new(lines);
    frame.render_widget(para, inner);
}

fn render_row<'a>(app: &App, rate: &'a Rate, is_cursor: bool) -> Line<'a> {
    let checkbox = if app.comparison.contains(&rate.id) {
        "[x]"
    } else {
        "[ ]"
    };

    let change_color = match rate.trend {
        Trend::Up => Color::Red,
        Trend::Down => Color::Green,
        Trend::Stable => Color::DarkGray,
    };

    let base = if is_cursor {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };

    let features = rate
        .features
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    Line::from(vec![
        Span::styled(format!("{checkbox} "), base),
        Span::styled(format!("{:<22} ", truncate(&rate.lender.name, 22)), base),
        Span::styled(format!("{:<13} ", truncate(&rate.lender.category, 13)), base),
        Span::styled(
            format!("{:>11.2}% ", rate.rate),
            base.add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:>10.2}% ", rate.apr), base),
        Span::styled(format!("{:<9} ", rate.term), base),
        Span::styled(format!("{:<9} ", rate.rate_type), base),
        Span::styled(
            format!("{} {:>6} ", rate.trend.arrow(), format_change(rate.change)),
            if is_cursor { base } else { Style::default().fg(change_color) },
        ),
        Span::styled(features, Style::default().fg(Color::DarkGray)),
    ])
}

/// Signed change with two decimals, `0.00` when unchanged.
pub(crate) fn format_change(change: Decimal) -> String {
    if change > Decimal::ZERO {
        format!("+{:.2}", change)
    } else {
        format!("{:.2}", change)
    }
}

/// Cuts `s` to at most `max` characters, marking the cut with `…`.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let help = match app.mode {
        Mode::Select => "[j/k]move [Enter]select [Esc]cancel",
        Mode::Insert => "[Esc]normal",
        Mode::Notice => "[Enter]dismiss",
        Mode::Normal => concat!(
            "[Tab]switch tab [h/l]focus [Enter]edit filter [1-3]sort ",
            "[Space]compare [c]compare one [x]clear [r]refresh ",
            "[a]read [p]pause [s]stop [?]help [q]quit",
        ),
    };

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn change_is_signed() {
        assert_eq!(format_change(dec!(0.1)), "+0.10");
        assert_eq!(format_change(dec!(-0.05)), "-0.05");
        assert_eq!(format_change(dec!(0)), "0.00");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Maple", 10), "Maple");
        assert_eq!(truncate("Maple Leaf Bank", 6), "Maple…");
    }
}
