//! Terminal user interface for browsing mortgage rates.
//!
//! Provides a Ratatui-based TUI with a filterable rates table, a
//! side-by-side comparison, a market summary and a glossary.

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod tabs;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
