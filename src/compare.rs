//! Side-by-side comparison selection.

use crate::models::Rate;

/// Maximum number of rates compared at once.
pub const MAX_COMPARED: usize = 3;

/// Ordered, id-deduplicated set of up to [`MAX_COMPARED`] rates.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSelection {
    rates: Vec<Rate>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `rate` if its id is selected, otherwise appends it.
    ///
    /// Appending beyond [`MAX_COMPARED`] keeps the first entries by
    /// insertion order, so the new rate is silently dropped.
    pub fn toggle(&mut self, rate: &Rate) {
        if let Some(pos) = self.rates.iter().position(|r| r.id == rate.id) {
            self.rates.remove(pos);
        } else {
            self.rates.push(rate.clone());
            self.rates.truncate(MAX_COMPARED);
        }
    }

    /// Replaces the whole selection with `rate`.
    pub fn compare_one(&mut self, rate: &Rate) {
        self.rates.clear();
        self.rates.push(rate.clone());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rates.iter().any(|r| r.id == id)
    }

    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.rates.len() >= MAX_COMPARED
    }

    pub fn clear(&mut self) {
        self.rates.clear();
    }

    /// Id of the entry with the lowest interest rate; the earliest entry
    /// wins ties.
    pub fn best_id(&self) -> Option<&str> {
        self.rates
            .iter()
            .reduce(|best, r| if r.rate < best.rate { r } else { best })
            .map(|r| r.id.as_str())
    }

    /// Spoken summary of the whole selection.
    pub fn spoken_summary(&self) -> String {
        if self.rates.is_empty() {
            return "No rates selected for comparison.".to_string();
        }
        let mut parts = vec![format!("Comparing {} rates.", self.rates.len())];
        parts.extend(self.rates.iter().map(Rate::spoken_summary));
        if let Some(best) = self.best_id().and_then(|id| self.rates.iter().find(|r| r.id == id)) {
            parts.push(format!("The best rate is from {}.", best.lender.name));
        }
        parts.join(" ")
    }
}
