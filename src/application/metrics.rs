// Ledger totals, derived metric cards and the literal-vs-ledger audit
use crate::domain::input::ReportInput;
use crate::domain::metric::{MetricKey, MetricsMode};
use crate::domain::sales::SalesRecord;
use crate::infrastructure::format::{rupees, tonnes};
use serde::Serialize;

/// Totals computed from the sales ledger rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerTotals {
    pub contract_value: u64,
    pub contract_quantity: f64,
    pub payments_received: u64,
    pub quantity_lifted: f64,
    pub margin_value: f64,
}

impl LedgerTotals {
    pub fn from_records(records: &[SalesRecord]) -> Self {
        records.iter().fold(
            Self {
                contract_value: 0,
                contract_quantity: 0.0,
                payments_received: 0,
                quantity_lifted: 0.0,
                margin_value: 0.0,
            },
            |mut acc, r| {
                acc.contract_value = acc.contract_value.saturating_add(r.sales_value);
                acc.contract_quantity += r.contract_quantity;
                acc.payments_received = acc.payments_received.saturating_add(r.payment_received);
                acc.quantity_lifted += r.quantity_lifted;
                acc.margin_value += r.sales_value as f64 * r.margin_percentage.value() / 100.0;
                acc
            },
        )
    }

    /// Outstanding amount; negative when more was received than contracted.
    pub fn balance_expected(&self) -> i128 {
        i128::from(self.contract_value) - i128::from(self.payments_received)
    }

    /// Rupees per kg; quantities are in tonnes.
    pub fn average_price_per_kg(&self) -> Option<f64> {
        if self.contract_quantity > 0.0 {
            Some(self.contract_value as f64 / (self.contract_quantity * 1000.0))
        } else {
            None
        }
    }

    /// Card text for a ledger total, formatted like the authored literals.
    pub fn display(&self, key: MetricKey) -> Option<String> {
        let text = match key {
            MetricKey::TotalContractValue => rupees(self.contract_value as f64, 0),
            MetricKey::TotalContractQuantity => tonnes(self.contract_quantity),
            MetricKey::AverageContractPricePerKg => rupees(self.average_price_per_kg()?, 1),
            MetricKey::TotalPaymentsReceived => rupees(self.payments_received as f64, 0),
            MetricKey::TotalQuantityLifted => tonnes(self.quantity_lifted),
            MetricKey::BalancePaymentExpected => rupees(self.balance_expected() as f64, 0),
            MetricKey::TotalMarginValue => rupees(self.margin_value.round(), 0),
        };
        Some(text)
    }
}

/// A keyed card whose authored text disagrees with the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDiscrepancy {
    pub label: String,
    pub key: MetricKey,
    pub displayed: String,
    pub derived: String,
}

pub fn audit_metrics(input: &ReportInput) -> Vec<MetricDiscrepancy> {
    let totals = LedgerTotals::from_records(&input.records);

    input
        .cards()
        .filter_map(|card| {
            let key = card.key?;
            let derived = totals.display(key)?;
            (derived != card.value).then(|| MetricDiscrepancy {
                label: card.label.clone(),
                key,
                displayed: card.value.clone(),
                derived,
            })
        })
        .collect()
}

/// Rewrite keyed cards from the ledger when running in derived mode.
pub fn apply_metrics_mode(input: &mut ReportInput, mode: MetricsMode) {
    if mode == MetricsMode::Literal {
        return;
    }

    let totals = LedgerTotals::from_records(&input.records);
    for card in input.cards_mut() {
        if let Some(value) = card.key.and_then(|key| totals.display(key)) {
            card.value = value;
        }
    }
}
