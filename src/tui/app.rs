//! Application state for the TUI.

use std::time::{Duration, Instant};

use crate::compare::ComparisonSelection;
use crate::feed::{FeedState, RateFeed, RequestTicket};
use crate::filter::{
    self, FilterCriteria, LENDER_TYPE_OPTIONS, PROVINCE_OPTIONS, PURPOSE_OPTIONS, TERM_OPTIONS,
    TYPE_OPTIONS,
};
use crate::market::MarketSummary;
use crate::models::Rate;
use crate::sort::{self, SortField, SortState};
use crate::speech::{ControlVisibility, SpeechState};

use super::components::tooltip::Tooltip;
use super::input::{Dropdown, MultipleChoice, TextInput};

/// How long transient error messages stay in the status bar.
const ERROR_DISPLAY_DURATION: Duration = Duration::from_secs(5);

/// Central application state container.
pub struct App {
    // -- Tab State --
    /// List of available tabs.
    pub tabs: Vec<Tab>,
    /// Index of the currently active tab.
    pub active_tab: usize,

    // -- Data --
    /// Loaded rates and their fetch lifecycle.
    pub feed: RateFeed,
    /// Where rates come from, for the status bar.
    pub source: String,
    /// Refetch with the new criteria whenever a filter changes.
    pub refetch_on_filter: bool,

    // -- Filters --
    pub province: Dropdown,
    pub purpose: Dropdown,
    pub rate_type: MultipleChoice,
    pub term: Dropdown,
    pub lender_type: Dropdown,

    // -- Table --
    pub sort: SortState,
    /// Cursor row in the visible (filtered, sorted) list.
    pub table_index: usize,

    // -- Comparison --
    pub comparison: ComparisonSelection,
    /// Principal used for payment estimates.
    pub amount: TextInput,

    // -- Glossary --
    pub glossary_index: usize,

    // -- UI State --
    /// Current focus within the active tab.
    pub focus: Focus,
    /// Current input mode.
    pub mode: Mode,
    pub tooltip: Tooltip,
    /// Error message to display (clears after timeout).
    pub error_message: Option<ErrorDisplay>,
    /// Blocking notice; dismissed explicitly.
    pub notice: Option<String>,

    // -- Read aloud --
    pub speech_state: SpeechState,
    pub speech_visibility: ControlVisibility,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App around `feed`.
    pub fn new(feed: RateFeed, source: impl Into<String>, speech_idle: Duration) -> Self {
        Self {
            tabs: vec![Tab::Rates, Tab::Compare, Tab::Market, Tab::Glossary],
            active_tab: 0,

            feed,
            source: source.into(),
            refetch_on_filter: false,

            province: Dropdown::new("Province", PROVINCE_OPTIONS),
            purpose: Dropdown::new("Purpose", PURPOSE_OPTIONS),
            rate_type: MultipleChoice::new("Type", TYPE_OPTIONS),
            term: Dropdown::new("Term", TERM_OPTIONS),
            lender_type: Dropdown::new("Lender", LENDER_TYPE_OPTIONS),

            sort: SortState::default(),
            table_index: 0,

            comparison: ComparisonSelection::new(),
            amount: TextInput::with_value("500000"),

            glossary_index: 0,

            focus: Focus::Table,
            mode: Mode::Normal,
            tooltip: Tooltip::default(),
            error_message: None,
            notice: None,

            speech_state: SpeechState::Idle,
            speech_visibility: ControlVisibility::new(speech_idle, Instant::now()),

            should_quit: false,
        }
    }

    /// Returns the currently active tab.
    pub fn current_tab(&self) -> Tab {
        self.tabs[self.active_tab]
    }

    /// Switches to the next tab.
    pub fn next_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active_tab = (self.active_tab + 1) % self.tabs.len();
            self.update_focus_for_tab();
        }
    }

    /// Switches to the previous tab.
    pub fn previous_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active_tab = self
                .active_tab
                .checked_sub(1)
                .unwrap_or(self.tabs.len() - 1);
            self.update_focus_for_tab();
        }
    }

    /// Activates `tab` if present.
    pub fn show_tab(&mut self, tab: Tab) {
        if let Some(pos) = self.tabs.iter().position(|t| *t == tab) {
            self.active_tab = pos;
            self.update_focus_for_tab();
        }
    }

    /// Updates focus when switching tabs.
    fn update_focus_for_tab(&mut self) {
        self.focus = match self.current_tab() {
            Tab::Rates => Focus::Table,
            Tab::Compare => Focus::Amount,
            Tab::Market | Tab::Glossary => Focus::Table,
        };
        self.tooltip.follow(self.focus_key());
    }

    /// Moves focus to `focus` and retargets the tooltip.
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.tooltip.follow(self.focus_key());
    }

    /// Glossary key describing the focused control.
    pub fn focus_key(&self) -> &'static str {
        match self.focus {
            Focus::Province => "province",
            Focus::Purpose => "purpose",
            Focus::RateType => "type",
            Focus::Term => "term",
            Focus::LenderType => "lender_type",
            Focus::Amount => "amortization",
            Focus::Table => match self.sort.field {
                SortField::Rate => "rate",
                SortField::Apr => "apr",
                SortField::Lender => "lender_type",
            },
        }
    }

    /// The dropdown owning `focus`, if it is one.
    pub fn dropdown_mut(&mut self, focus: Focus) -> Option<&mut Dropdown> {
        match focus {
            Focus::Province => Some(&mut self.province),
            Focus::Purpose => Some(&mut self.purpose),
            Focus::Term => Some(&mut self.term),
            Focus::LenderType => Some(&mut self.lender_type),
            _ => None,
        }
    }

    pub fn dropdown(&self, focus: Focus) -> Option<&Dropdown> {
        match focus {
            Focus::Province => Some(&self.province),
            Focus::Purpose => Some(&self.purpose),
            Focus::Term => Some(&self.term),
            Focus::LenderType => Some(&self.lender_type),
            _ => None,
        }
    }

    /// Filter criteria from the current widget values.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_labels(
            self.province.value(),
            self.purpose.value(),
            self.rate_type.value(),
            self.term.value(),
            self.lender_type.value(),
        )
    }

    /// Resets every filter to its "All ..." option.
    pub fn clear_filters(&mut self) {
        self.province.reset();
        self.purpose.reset();
        self.rate_type.reset();
        self.term.reset();
        self.lender_type.reset();
        self.table_index = 0;
    }

    /// Request for the current criteria, when filter changes go to the server.
    pub fn filters_changed(&mut self) -> Option<RequestTicket> {
        self.table_index = 0;
        if self.refetch_on_filter {
            self.feed.begin(self.criteria())
        } else {
            None
        }
    }

    /// Rates after filtering and sorting, as displayed in the table.
    pub fn visible_rates(&self) -> Vec<Rate> {
        let filtered = filter::filter_rates(self.feed.rates(), &self.criteria());
        sort::sort_rates(&filtered, self.sort)
    }

    /// The rate under the table cursor.
    pub fn selected_rate(&self) -> Option<Rate> {
        self.visible_rates().into_iter().nth(self.table_index)
    }

    /// Keeps the table cursor inside the visible list.
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_rates().len();
        self.table_index = self.table_index.min(len.saturating_sub(1));
    }

    pub fn market_summary(&self) -> MarketSummary {
        MarketSummary::from_rates(self.feed.rates())
    }

    /// Short status line for the data feed.
    pub fn feed_label(&self) -> String {
        match self.feed.state() {
            FeedState::Loading => "Loading...".to_string(),
            FeedState::Loaded(page) => format!("{} rates", page.rates.len()),
            FeedState::Failed(_) => "Error".to_string(),
        }
    }

    /// Whether the read-aloud badge is shown.
    pub fn speech_visible(&self, now: Instant) -> bool {
        self.speech_visibility.is_visible(now, self.speech_state)
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Shows a blocking notice.
    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
        self.mode = Mode::Notice;
    }

    /// Clears error messages older than five seconds.
    pub fn clear_stale_errors(&mut self) {
        if let Some(ref error) = self.error_message
            && error.timestamp.elapsed() > ERROR_DISPLAY_DURATION
        {
            self.error_message = None;
        }
    }
}

/// Tab types in the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    /// Filterable, sortable rates table.
    Rates,
    /// Side-by-side comparison of up to three rates.
    Compare,
    /// Market trends summary.
    Market,
    Glossary,
}

impl Tab {
    /// Returns the display title for the tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Rates => "Rates",
            Tab::Compare => "Compare",
            Tab::Market => "Market",
            Tab::Glossary => "Glossary",
        }
    }
}

/// UI focus targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    // Rates tab, left to right
    Province,
    Purpose,
    RateType,
    Term,
    LenderType,
    #[default]
    Table,

    // Compare tab
    Amount,
}

impl Focus {
    /// Rates-tab focus order.
    pub const RATES_ORDER: [Focus; 6] = [
        Focus::Province,
        Focus::Purpose,
        Focus::RateType,
        Focus::Term,
        Focus::LenderType,
        Focus::Table,
    ];

    /// Next control to the right on the rates tab, wrapping around.
    pub fn next(self) -> Self {
        let pos = Self::RATES_ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::RATES_ORDER[(pos + 1) % Self::RATES_ORDER.len()]
    }

    /// Next control to the left on the rates tab, wrapping around.
    pub fn previous(self) -> Self {
        let pos = Self::RATES_ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::RATES_ORDER[(pos + Self::RATES_ORDER.len() - 1) % Self::RATES_ORDER.len()]
    }
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing into the amount field.
    Insert,
    /// A dropdown list is open.
    Select,
    /// A blocking notice awaits dismissal.
    Notice,
}

/// Error message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct ErrorDisplay {
    /// The error message.
    pub message: String,
    /// When the error was shown.
    pub timestamp: Instant,
}
