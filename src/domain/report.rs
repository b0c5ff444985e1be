// Report node tree - built once, handed whole to a renderer
use super::chart::{GridFigure, PieFigure};
use super::metric::MetricCard;
use super::sales::SalesRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum Node {
    Title(String),
    /// Paragraph text; supports `**bold**` spans and `- ` bullet lines.
    Text(String),
    Divider,
    Header(String),
    Subheader(String),
    Metric(MetricCard),
    Columns(Vec<Vec<Node>>),
    Expander { label: String, body: Vec<Node> },
    Table(Vec<SalesRecord>),
    Pies(PieFigure),
    Grid(GridFigure),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub page_title: String,
    pub nodes: Vec<Node>,
}

impl Report {
    pub fn new(page_title: String, nodes: Vec<Node>) -> Self {
        Self { page_title, nodes }
    }

    /// Depth-first walk over every node, nested ones included.
    pub fn walk(&self) -> Vec<&Node> {
        fn visit<'a>(nodes: &'a [Node], out: &mut Vec<&'a Node>) {
            for node in nodes {
                out.push(node);
                match node {
                    Node::Columns(columns) => {
                        for column in columns {
                            visit(column, out);
                        }
                    }
                    Node::Expander { body, .. } => visit(body, out),
                    _ => {}
                }
            }
        }

        let mut out = Vec::new();
        visit(&self.nodes, &mut out);
        out
    }

    pub fn metric_cards(&self) -> Vec<&MetricCard> {
        self.walk()
            .into_iter()
            .filter_map(|node| match node {
                Node::Metric(card) => Some(card),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_descends_into_columns_and_expanders() {
        let report = Report::new(
            "Sales Summary Report".to_string(),
            vec![
                Node::Title("Sales Report".to_string()),
                Node::Columns(vec![
                    vec![Node::Metric(MetricCard::new("A", "1"))],
                    vec![Node::Metric(MetricCard::new("B", "2"))],
                ]),
                Node::Expander {
                    label: "Click to expand".to_string(),
                    body: vec![Node::Text("- item".to_string())],
                },
            ],
        );

        assert_eq!(report.walk().len(), 6);
        let labels: Vec<_> = report.metric_cards().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
    }
}
