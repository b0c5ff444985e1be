// Report inputs - everything the report shows, passed in explicitly
use super::metric::{MetricCard, MetricGroup};
use super::sales::SalesRecord;

/// Labels, values and colours of one pie, as parallel lists.
#[derive(Debug, Clone, PartialEq)]
pub struct PieInput {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
}

/// Dated amounts whose running sums are plotted.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginInput {
    pub dates: Vec<String>,
    pub margins: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionInput {
    pub dates: Vec<String>,
    pub sales_values: Vec<f64>,
    pub payments_received: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuantityInput {
    pub prices_per_kg: Vec<f64>,
    pub quantities_lifted: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuyerMarginInput {
    pub buyers: Vec<String>,
    pub margin_percentages: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportInput {
    pub page_title: String,
    pub title: String,
    pub intro: String,
    pub achievements_intro: String,
    pub records: Vec<SalesRecord>,

    pub contract_details: MetricGroup,
    pub payment_highlights: MetricGroup,
    pub quantity_and_value: MetricGroup,
    pub financial_efficiency: MetricGroup,
    pub dispatch_dates: Vec<String>,
    pub margin_analysis: Vec<MetricCard>,
    pub achievements: Vec<String>,

    pub buyer_sales: PieInput,
    pub payment_distribution: PieInput,
    pub cumulative_margin: MarginInput,
    pub progression: ProgressionInput,
    pub price_quantity: PriceQuantityInput,
    pub buyer_margin: BuyerMarginInput,
}

impl ReportInput {
    /// Every metric card, in display order.
    pub fn cards_mut(&mut self) -> impl Iterator<Item = &mut MetricCard> {
        self.contract_details
            .cards_mut()
            .chain(self.payment_highlights.cards_mut())
            .chain(self.quantity_and_value.cards_mut())
            .chain(self.financial_efficiency.cards_mut())
            .chain(self.margin_analysis.iter_mut())
    }

    pub fn cards(&self) -> impl Iterator<Item = &MetricCard> {
        self.contract_details
            .cards
            .iter()
            .chain(&self.payment_highlights.cards)
            .chain(&self.quantity_and_value.cards)
            .chain(&self.financial_efficiency.cards)
            .chain(&self.margin_analysis)
    }
}
