// Sales ledger domain model
use super::error::ReportError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column titles of the ledger table, in display order.
pub const SALES_COLUMNS: [&str; 7] = [
    "Date",
    "Client",
    "Sales Value",
    "Payment Received",
    "Contract Quantity",
    "Actual Quantity Lifted",
    "Margin Percentage",
];

/// A percentage that keeps the text it was authored with ("4.5%" stays "4.5%").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Percentage {
    value: f64,
    text: String,
}

impl Percentage {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for Percentage {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let value = text
            .strip_suffix('%')
            .and_then(|number| number.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .ok_or_else(|| ReportError::InvalidPercentage(s.to_string()))?;

        Ok(Self {
            value,
            text: text.to_string(),
        })
    }
}

impl TryFrom<String> for Percentage {
    type Error = ReportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Percentage> for String {
    fn from(value: Percentage) -> Self {
        value.text
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One row of the sales ledger. Amounts are whole rupees, quantities metric tonnes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub client: String,
    pub sales_value: u64,
    pub payment_received: u64,
    pub contract_quantity: f64,
    pub quantity_lifted: f64,
    pub margin_percentage: Percentage,
}

impl SalesRecord {
    pub fn new(
        date: NaiveDate,
        client: String,
        sales_value: u64,
        payment_received: u64,
        contract_quantity: f64,
        quantity_lifted: f64,
        margin_percentage: Percentage,
    ) -> Self {
        Self {
            date,
            client,
            sales_value,
            payment_received,
            contract_quantity,
            quantity_lifted,
            margin_percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_keeps_authored_text() {
        let pct: Percentage = "4.5%".parse().unwrap();
        assert_eq!(pct.as_str(), "4.5%");
        assert_eq!(pct.value(), 4.5);

        let pct: Percentage = " 10.26% ".parse().unwrap();
        assert_eq!(pct.to_string(), "10.26%");
        assert_eq!(pct.value(), 10.26);
    }

    #[test]
    fn test_percentage_rejects_malformed_text() {
        for bad in ["", "3.68", "%", "abc%", "NaN%"] {
            assert_eq!(
                bad.parse::<Percentage>(),
                Err(ReportError::InvalidPercentage(bad.to_string())),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_percentage_serializes_as_text() {
        let pct: Percentage = "5.0%".parse().unwrap();
        assert_eq!(serde_json::to_string(&pct).unwrap(), "\"5.0%\"");

        let back: Percentage = serde_json::from_str("\"3.60%\"").unwrap();
        assert_eq!(back.value(), 3.6);
        assert!(serde_json::from_str::<Percentage>("\"oops\"").is_err());
    }
}
