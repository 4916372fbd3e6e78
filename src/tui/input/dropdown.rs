//! Dropdown selector.
//!
//! Closed, it shows the selected option. Opened, the highlight moves
//! freely and only [`Dropdown::confirm`] changes the selected value.

/// State for a single-select dropdown.
#[derive(Clone, Debug)]
pub struct Dropdown {
    label: &'static str,
    options: Vec<String>,
    selected: usize,
    highlighted: usize,
    open: bool,
}

impl Dropdown {
    /// Creates a dropdown with the first option selected.
    pub fn new(label: &'static str, options: &[&str]) -> Self {
        Self {
            label,
            options: options.iter().map(|o| o.to_string()).collect(),
            selected: 0,
            highlighted: 0,
            open: false,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The selected option, or `""` when there are no options.
    pub fn value(&self) -> &str {
        self.options.get(self.selected).map_or("", String::as_str)
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens the list with the current value highlighted.
    pub fn open(&mut self) {
        self.highlighted = self.selected;
        self.open = true;
    }

    /// Closes the list without changing the value.
    pub fn cancel(&mut self) {
        self.open = false;
    }

    pub fn next(&mut self) {
        if self.open && self.highlighted + 1 < self.options.len() {
            self.highlighted += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.open {
            self.highlighted = self.highlighted.saturating_sub(1);
        }
    }

    /// Selects the highlighted option and closes the list.
    ///
    /// Returns whether the value changed.
    pub fn confirm(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        let changed = self.highlighted != self.selected;
        self.selected = self.highlighted;
        changed
    }

    /// Returns to the first option.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.highlighted = 0;
        self.open = false;
    }
}
