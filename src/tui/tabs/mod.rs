//! Per-tab layouts.

pub mod compare;
pub mod glossary;
pub mod market;
pub mod rates;
