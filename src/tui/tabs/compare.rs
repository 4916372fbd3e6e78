//! Compare tab layout and rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::compare::MAX_COMPARED;
use crate::models::{Rate, Trend};
use crate::payment::{self, DEFAULT_AMORTIZATION_YEARS};
use crate::tui::app::{App, Focus, Mode};
use crate::tui::components::{status_bar, tab_bar};

use super::rates::{format_change, truncate};

/// Renders the Compare tab.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
            Constraint::Length(3), // Amount input
            Constraint::Min(12),   // Comparison columns
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    tab_bar::render(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);
    render_amount_input(frame, main_layout[2], app);
    render_columns(frame, main_layout[3], app);
    render_keybindings(frame, main_layout[4], app);
}

/// Renders the principal input with cursor.
fn render_amount_input(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Amount;
    let is_editing = is_focused && app.mode == Mode::Insert;

    let border_style = if is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(format!(
            " Mortgage Amount ({}-year amortization) ",
            DEFAULT_AMORTIZATION_YEARS
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    let para = Paragraph::new(format!("$ {}", app.amount.as_str())).block(block);
    frame.render_widget(para, area);

    // Show cursor in insert mode
    if is_editing {
        frame.set_cursor_position((inner.x + 2 + app.amount.cursor_width(), inner.y));
    }
}

/// Renders one column per compared rate.
fn render_columns(frame: &mut Frame, area: Rect, app: &App) {
    let selection = app.comparison.rates();

    if selection.is_empty() {
        let block = Block::default()
            .title(" Comparison ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let para = Paragraph::new(format!(
            "No rates selected. Press [Space] on up to {MAX_COMPARED} rates in the Rates tab."
        ))
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
        frame.render_widget(para, area);
        return;
    }

    let constraints: Vec<Constraint> = (0..MAX_COMPARED)
        .map(|_| Constraint::Ratio(1, MAX_COMPARED as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let best = app.comparison.best_id();
    let principal = payment::parse_amount(app.amount.as_str());

    for (rate, column) in selection.iter().zip(columns.iter()) {
        let is_best = best == Some(rate.id.as_str());
        render_card(frame, *column, rate, is_best, principal);
    }
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    rate: &Rate,
    is_best: bool,
    principal: Option<rust_decimal::Decimal>,
) {
    let border_style = if is_best {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let width = area.width.saturating_sub(4) as usize;
    let block = Block::default()
        .title(format!(" {} ", truncate(&rate.lender.name, width)))
        .borders(Borders::ALL)
        .border_style(border_style);

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let change_color = match rate.trend {
        Trend::Up => Color::Red,
        Trend::Down => Color::Green,
        Trend::Stable => Color::DarkGray,
    };

    let mut lines = Vec::new();
    if is_best {
        lines.push(Line::from(Span::styled(
            "★ Best Rate",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Rate    ", label),
        Span::styled(
            format!("{:.2}%", rate.rate),
            value.add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("APR     ", label),
        Span::styled(format!("{:.2}%", rate.apr), value),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Term    ", label),
        Span::styled(rate.term.clone(), value),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Type    ", label),
        Span::styled(rate.rate_type.label(), value),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Change  ", label),
        Span::styled(
            format!("{} {}", rate.trend.arrow(), format_change(rate.change)),
            Style::default().fg(change_color),
        ),
    ]));

    let payment_text = principal
        .and_then(|p| payment::monthly_payment(p, rate.rate, DEFAULT_AMORTIZATION_YEARS))
        .map(|m| format!("${:.2}/mo", m))
        .unwrap_or_else(|| "-".to_string());
    lines.push(Line::from(vec![
        Span::styled("Payment ", label),
        Span::styled(payment_text, Style::default().fg(Color::Yellow)),
    ]));

    lines.push(Line::from(""));
    for feature in rate.features.iter().take(3) {
        lines.push(Line::from(Span::styled(format!("• {feature}"), value)));
    }

    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(para, area);
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let help = match app.mode {
        Mode::Insert => "[Enter/Esc]done [←/→]move cursor [Backspace]delete",
        Mode::Notice => "[Enter]dismiss",
        _ => concat!(
            "[Tab]switch tab [i]edit amount [x]clear comparison ",
            "[a]read aloud [p]pause [s]stop [?]help [q]quit",
        ),
    };

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
