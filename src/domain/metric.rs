// Metric card domain model
use serde::{Deserialize, Serialize};

/// Ledger total a metric card claims to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    TotalContractValue,
    TotalContractQuantity,
    AverageContractPricePerKg,
    TotalPaymentsReceived,
    TotalQuantityLifted,
    BalancePaymentExpected,
    TotalMarginValue,
}

/// A labelled, pre-formatted value. The value is shown exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<MetricKey>,
}

impl MetricCard {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            key: None,
        }
    }

    pub fn keyed(label: impl Into<String>, value: impl Into<String>, key: MetricKey) -> Self {
        Self {
            key: Some(key),
            ..Self::new(label, value)
        }
    }
}

/// A note line with a bold label, e.g. "**Key Payment Dates:** 8/24/2024".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricNote {
    pub label: String,
    pub text: String,
}

impl MetricNote {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    pub fn to_markdown(&self) -> String {
        format!("**{}:** {}", self.label, self.text)
    }
}

/// Cards and notes shown under one subheader. Notes follow the card at `notes_after`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricGroup {
    pub title: String,
    pub cards: Vec<MetricCard>,
    pub notes: Vec<MetricNote>,
    pub notes_after: usize,
}

impl MetricGroup {
    pub fn new(title: impl Into<String>, cards: Vec<MetricCard>) -> Self {
        let notes_after = cards.len();
        Self {
            title: title.into(),
            cards,
            notes: Vec::new(),
            notes_after,
        }
    }

    pub fn with_notes(mut self, notes_after: usize, notes: Vec<MetricNote>) -> Self {
        self.notes_after = notes_after.min(self.cards.len());
        self.notes = notes;
        self
    }

    pub fn cards_mut(&mut self) -> impl Iterator<Item = &mut MetricCard> {
        self.cards.iter_mut()
    }
}

/// How keyed metric cards get their text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricsMode {
    /// Show the authored literal.
    #[default]
    Literal,
    /// Replace keyed cards with totals computed from the ledger.
    Derived,
}
