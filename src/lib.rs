//! Mortgage rates browser.
//!
//! Fetches current mortgage rates from a rates service (or a local JSON
//! file), and provides filtering, sorting, side-by-side comparison, a
//! market summary and read-aloud summaries in a terminal UI.

pub mod api;
pub mod compare;
pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod glossary;
pub mod market;
pub mod models;
pub mod payment;
pub mod sort;
pub mod speech;
pub mod tui;

pub use error::{RatescopeError, Result};
