//! Multiple-choice (radio) selector.

/// Exactly one of a small set of options is selected at any time.
#[derive(Clone, Debug)]
pub struct MultipleChoice {
    label: &'static str,
    options: Vec<String>,
    selected: usize,
}

impl MultipleChoice {
    pub fn new(label: &'static str, options: &[&str]) -> Self {
        Self {
            label,
            options: options.iter().map(|o| o.to_string()).collect(),
            selected: 0,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn value(&self) -> &str {
        self.options.get(self.selected).map_or("", String::as_str)
    }

    /// Selects the next option, wrapping around.
    pub fn next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    /// Selects the previous option, wrapping around.
    pub fn previous(&mut self) {
        if !self.options.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.options.len() - 1);
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_both_ways() {
        let mut choice = MultipleChoice::new("Type", &["All Types", "Fixed", "Variable"]);
        choice.previous();
        assert_eq!(choice.value(), "Variable");
        choice.next();
        assert_eq!(choice.value(), "All Types");
        choice.next();
        assert_eq!(choice.value(), "Fixed");
        choice.reset();
        assert_eq!(choice.selected(), 0);
    }
}
