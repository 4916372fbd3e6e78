//! Rate ordering.
//!
//! Sorting is stable and uses a three-way comparator that reports equal
//! keys as [`Ordering::Equal`], so rates with the same key keep their
//! input order in both directions.

use std::cmp::Ordering;

use crate::models::Rate;

/// Column a rate list can be ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Rate,
    Apr,
    /// Lender name, case-insensitive.
    Lender,
}

impl SortField {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Rate => "Rate",
            SortField::Apr => "APR",
            SortField::Lender => "Lender",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Toggles between orders.
    pub fn toggle(&mut self) {
        *self = match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        };
    }

    /// Returns the arrow shown next to the active column.
    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

/// Current sort column and direction. Starts at (rate, ascending).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortState {
    /// Applies a click on `field`'s column control.
    ///
    /// The active column flips its order; any other column becomes active
    /// in ascending order.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.order.toggle();
        } else {
            self.field = field;
            self.order = SortOrder::Asc;
        }
    }
}

/// Three-way comparison of two rates on `field`, ascending.
pub fn compare_by(field: SortField, a: &Rate, b: &Rate) -> Ordering {
    match field {
        SortField::Rate => a.rate.cmp(&b.rate),
        SortField::Apr => a.apr.cmp(&b.apr),
        SortField::Lender => a
            .lender
            .name
            .to_lowercase()
            .cmp(&b.lender.name.to_lowercase()),
    }
}

/// Returns a sorted copy of `rates`; the input is left untouched.
pub fn sort_rates(rates: &[Rate], state: SortState) -> Vec<Rate> {
    let mut sorted = rates.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_by(state.field, a, b);
        match state.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}
