// Static report source - the hand-typed August/September 2024 sales summary
use crate::application::report_source::ReportSource;
use crate::domain::input::{
    BuyerMarginInput, MarginInput, PieInput, PriceQuantityInput, ProgressionInput, ReportInput,
};
use crate::domain::metric::{MetricCard, MetricGroup, MetricKey, MetricNote};
use crate::domain::sales::{Percentage, SalesRecord};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

// date, client, sales value, payment received, contract qty, qty lifted, margin
const LEDGER: [(&str, &str, u64, u64, f64, f64, &str); 5] = [
    ("2024-08-24", "Nutrilla Feed", 3_050_000, 3_045_000, 105.0, 105.0, "3.68%"),
    ("2024-08-29", "Rainbow", 8_670_000, 8_443_165, 300.0, 292.27, "10.26%"),
    ("2024-08-30", "Suryanarayanan", 2_900_000, 2_900_000, 100.0, 102.72, "3.60%"),
    ("2024-08-31", "Nutrilla Feed", 2_000_000, 2_000_000, 50.0, 49.5, "4.5%"),
    ("2024-09-01", "Rainbow", 1_500_000, 1_500_000, 75.0, 74.8, "5.0%"),
];

#[derive(Debug, Clone, Default)]
pub struct StaticReportSource;

impl StaticReportSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReportSource for StaticReportSource {
    async fn load(&self) -> Result<ReportInput> {
        sales_summary()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn ledger() -> Result<Vec<SalesRecord>> {
    LEDGER
        .iter()
        .map(|&(date, client, sales, paid, contracted, lifted, margin)| -> Result<SalesRecord> {
            let date: NaiveDate = date
                .parse()
                .with_context(|| format!("ledger date {}", date))?;
            let margin: Percentage = margin
                .parse()
                .with_context(|| format!("ledger margin for {} on {}", client, date))?;
            Ok(SalesRecord::new(
                date,
                client.to_string(),
                sales,
                paid,
                contracted,
                lifted,
                margin,
            ))
        })
        .collect()
}

/// The full literal report. Metric texts are as authored and are not derived from the ledger.
pub fn sales_summary() -> Result<ReportInput> {
    let palette = strings(&["#A3C1DA", "#5A9BD5", "#2F5597", "#70AD47", "#A9D18E"]);

    Ok(ReportInput {
        page_title: "Sales Summary Report".to_string(),
        title: "Sales Report".to_string(),
        intro: "Welcome to the Sales Summary Report. This report provides a comprehensive \
                overview of recent sales achievements, focusing on effective contract \
                management, financial performance, and operational efficiency."
            .to_string(),
        achievements_intro: "A summary of our company's recent performance, highlighting key \
                             sales metrics and financial outcomes."
            .to_string(),
        records: ledger()?,

        contract_details: MetricGroup::new(
            "Contract Details",
            vec![
                MetricCard::keyed("Total Contract Value", "₹14,250,000", MetricKey::TotalContractValue),
                MetricCard::keyed("Total Contract Quantity", "505 MT", MetricKey::TotalContractQuantity),
                MetricCard::keyed(
                    "Average Contract Price / Kg",
                    "₹28.9",
                    MetricKey::AverageContractPricePerKg,
                ),
            ],
        ),
        payment_highlights: MetricGroup::new(
            "Payment Highlights",
            vec![
                MetricCard::keyed(
                    "Total Payments Received",
                    "₹14,388,165",
                    MetricKey::TotalPaymentsReceived,
                ),
                MetricCard::keyed("Total Profit Margin", "₹249,995", MetricKey::TotalMarginValue),
            ],
        )
        .with_notes(1, vec![MetricNote::new("Key Payment Dates", "8/24/2024, 8/29/2024")]),
        quantity_and_value: MetricGroup::new(
            "Quantity and Value",
            vec![
                MetricCard::keyed(
                    "Total Actual Quantity Lifted",
                    "499.99 MT",
                    MetricKey::TotalQuantityLifted,
                ),
                MetricCard::new("Total Transaction Value", "₹14,470,483"),
            ],
        ),
        financial_efficiency: MetricGroup::new(
            "Financial Efficiency",
            vec![
                MetricCard::keyed(
                    "Balance Payment Expected",
                    "₹124,417",
                    MetricKey::BalancePaymentExpected,
                ),
                MetricCard::new("TDS to be Collected", "₹3,438"),
            ],
        ),
        dispatch_dates: strings(&["8/24/2024", "8/30/2024", "8/31/2024", "9/01/2024"]),
        margin_analysis: vec![
            MetricCard::keyed("Total Margin Value", "₹249,995", MetricKey::TotalMarginValue),
            MetricCard::new("Overall Margin %", "17.54%"),
            MetricCard::new("Overall Markup Margin %", "1.80%"),
        ],
        achievements: strings(&[
            "**Effective Contract Execution**: Managed contracts totaling ₹14,615,000 with a \
             robust quantity of 505 MT.",
            "**Strong Financial Performance**: Achieved total payments of ₹14,388,165 and a \
             transaction value of ₹14,470,483.",
            "**Operational Excellence**: Efficient payment collection and dispatch operations \
             with balanced financial management.",
            "**Profitability and Growth**: Maintained a healthy margin of 17.54% and a consistent \
             markup margin of 1.80%, reflecting strong profitability and operational efficiency.",
        ]),

        buyer_sales: PieInput {
            labels: strings(&["Nutrilla Feed", "Rainbow", "Suryanarayanan"]),
            values: vec![3_045_000.0, 8_670_000.0, 2_900_000.0],
            colors: strings(&["#5A9BD5", "#70AD47", "#2F5597"]),
        },
        // Three separate payments landed on 8/29; each keeps its own slice.
        payment_distribution: PieInput {
            labels: strings(&[
                "8/12/2024",
                "8/24/2024",
                "8/29/2024 (1 of 3)",
                "8/29/2024 (2 of 3)",
                "8/29/2024 (3 of 3)",
            ]),
            values: vec![1_425_000.0, 2_992_500.0, 2_950_000.0, 2_850_000.0, 4_175_000.0],
            colors: palette,
        },
        cumulative_margin: MarginInput {
            dates: strings(&["8/24/2024", "8/28/2024", "8/29/2024"]),
            margins: vec![52_500.0, 146_135.0, 51_360.0],
        },
        progression: ProgressionInput {
            dates: strings(&["8/12/2024", "8/24/2024", "8/29/2024", "8/29/2024", "8/29/2024"]),
            sales_values: vec![0.0, 3_045_000.0, 8_390_000.0, 2_900_000.0, 0.0],
            payments_received: vec![1_425_000.0, 2_992_500.0, 2_950_000.0, 2_850_000.0, 4_175_000.0],
        },
        price_quantity: PriceQuantityInput {
            prices_per_kg: vec![29.0, 28.9, 29.0],
            quantities_lifted: vec![105.0, 292.27, 102.72],
        },
        buyer_margin: BuyerMarginInput {
            buyers: strings(&["Nutrilla Feed", "Rainbow", "Suryanarayanan"]),
            margin_percentages: vec![3.68, 10.26, 3.60],
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_rows_in_order() {
        let input = sales_summary().unwrap();
        let clients: Vec<_> = input.records.iter().map(|r| r.client.as_str()).collect();
        assert_eq!(
            clients,
            vec!["Nutrilla Feed", "Rainbow", "Suryanarayanan", "Nutrilla Feed", "Rainbow"]
        );
        assert_eq!(input.records[1].quantity_lifted, 292.27);
        assert_eq!(input.records[3].margin_percentage.as_str(), "4.5%");
        assert_eq!(input.records[4].date, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
    }

    #[test]
    fn test_parallel_inputs_line_up() {
        let input = sales_summary().unwrap();
        for pie in [&input.buyer_sales, &input.payment_distribution] {
            assert_eq!(pie.labels.len(), pie.values.len());
            assert_eq!(pie.colors.len(), pie.values.len());
        }
        assert_eq!(input.cumulative_margin.dates.len(), input.cumulative_margin.margins.len());
        assert_eq!(input.progression.dates.len(), input.progression.sales_values.len());
        assert_eq!(input.progression.dates.len(), input.progression.payments_received.len());
        assert_eq!(
            input.price_quantity.prices_per_kg.len(),
            input.price_quantity.quantities_lifted.len()
        );
        assert_eq!(
            input.buyer_margin.buyers.len(),
            input.buyer_margin.margin_percentages.len()
        );
    }

    #[tokio::test]
    async fn test_source_loads_literals() {
        let input = StaticReportSource::new().load().await.unwrap();
        assert_eq!(input.page_title, "Sales Summary Report");
        assert_eq!(input.cards().count(), 12);
    }
}
