//! Glossary tooltip for the focused control.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::glossary::{self, GlossaryEntry};

/// Visibility of the tooltip and the glossary key it describes.
///
/// Shown on demand for the focused control; while shown it follows focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tooltip {
    key: Option<&'static str>,
}

impl Tooltip {
    pub fn is_visible(&self) -> bool {
        self.key.is_some()
    }

    /// Shows the tooltip for `key`, or hides it if already shown.
    pub fn toggle(&mut self, key: &'static str) {
        self.key = match self.key {
            Some(_) => None,
            None => Some(key),
        };
    }

    /// Retargets a visible tooltip after a focus change.
    pub fn follow(&mut self, key: &'static str) {
        if self.key.is_some() {
            self.key = Some(key);
        }
    }

    pub fn hide(&mut self) {
        self.key = None;
    }

    pub fn entry(&self) -> Option<&'static GlossaryEntry> {
        self.key.and_then(glossary::lookup)
    }
}

/// Renders the tooltip in the bottom-right corner of `area`.
pub fn render(frame: &mut Frame, area: Rect, tooltip: &Tooltip) {
    let Some(entry) = tooltip.entry() else {
        return;
    };

    let width = 44.min(area.width);
    let height = 6.min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + area.height.saturating_sub(height + 2),
        width,
        height,
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", entry.label),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let para = Paragraph::new(Line::from(entry.description))
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup);
    frame.render_widget(para, popup);
}
