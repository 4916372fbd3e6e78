//! Mortgage terminology shown in tooltips and the glossary tab.

/// A glossary term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlossaryEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const GLOSSARY: &[GlossaryEntry] = &[
    GlossaryEntry {
        key: "rate",
        label: "Interest Rate",
        description: "The annual rate charged on the outstanding mortgage balance.",
    },
    GlossaryEntry {
        key: "apr",
        label: "APR",
        description: "Annual percentage rate: the all-in yearly borrowing cost, \
                      including the base rate and lender fees.",
    },
    GlossaryEntry {
        key: "term",
        label: "Term",
        description: "How long the rate and conditions are locked in before renewal, e.g. 5 years.",
    },
    GlossaryEntry {
        key: "type",
        label: "Rate Type",
        description: "Whether the rate is fixed for the term or varies with the prime rate.",
    },
    GlossaryEntry {
        key: "fixed",
        label: "Fixed Rate",
        description: "The rate stays the same for the whole term.",
    },
    GlossaryEntry {
        key: "variable",
        label: "Variable Rate",
        description: "The rate moves with the lender's prime rate during the term.",
    },
    GlossaryEntry {
        key: "lender_type",
        label: "Lender Category",
        description: "The kind of institution offering the rate: major bank, \
                      credit union, monoline or alternative lender.",
    },
    GlossaryEntry {
        key: "province",
        label: "Province",
        description: "Rates are only offered in the provinces where the lender \
                      operates.",
    },
    GlossaryEntry {
        key: "purpose",
        label: "Purpose",
        description: "What the mortgage is for: buying a home, refinancing, or \
                      renewing an existing mortgage.",
    },
    GlossaryEntry {
        key: "change",
        label: "Change",
        description: "Difference from the lender's previously published rate, in \
                      percentage points.",
    },
    GlossaryEntry {
        key: "trend",
        label: "Trend",
        description: "Direction of the latest movement: up, down or stable.",
    },
    GlossaryEntry {
        key: "amortization",
        label: "Amortization",
        description: "Total time to pay off the mortgage. Payment estimates assume 25 years.",
    },
];

/// Looks up an entry by key.
pub fn lookup(key: &str) -> Option<&'static GlossaryEntry> {
    GLOSSARY.iter().find(|e| e.key == key)
}
