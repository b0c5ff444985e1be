// HTML renderer - turns the report node tree into a single page
//
// Styles and the table sorting script are inlined; charts are drawn by ECharts
// from the options carried on each chart container.
use super::charts::{cell_chart, chart_options, pie_chart};
use super::format::{group_thousands, trimmed};
use crate::application::report_renderer::ReportRenderer;
use crate::domain::chart::{GridFigure, PieChart, PieFigure};
use crate::domain::error::ReportError;
use crate::domain::metric::MetricCard;
use crate::domain::report::{Node, Report};
use crate::domain::sales::{SalesRecord, SALES_COLUMNS};
use charming::Chart;

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape, then turn `**bold**` pairs into `<strong>`. An unpaired marker is left as text.
fn inline_markdown(text: &str) -> String {
    let escaped = escape(text);
    let parts: Vec<&str> = escaped.split("**").collect();
    if parts.len() % 2 == 0 {
        return escaped;
    }

    let mut out = String::with_capacity(escaped.len() + 16);
    for (i, part) in parts.iter().enumerate() {
        if i % 2 == 1 {
            out.push_str("<strong>");
            out.push_str(part);
            out.push_str("</strong>");
        } else {
            out.push_str(part);
        }
    }
    out
}

/// Paragraphs for plain lines, a list for runs of `- ` lines.
fn render_text(text: &str) -> String {
    let mut out = String::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut bullets: Vec<&str> = Vec::new();

    fn flush_paragraph(out: &mut String, paragraph: &mut Vec<&str>) {
        if !paragraph.is_empty() {
            out.push_str(&format!("<p>{}</p>", inline_markdown(&paragraph.join(" "))));
            paragraph.clear();
        }
    }
    fn flush_bullets(out: &mut String, bullets: &mut Vec<&str>) {
        if !bullets.is_empty() {
            out.push_str("<ul>");
            for item in bullets.iter() {
                out.push_str(&format!("<li>{}</li>", inline_markdown(item)));
            }
            out.push_str("</ul>");
            bullets.clear();
        }
    }

    for line in text.lines().map(str::trim) {
        if let Some(item) = line.strip_prefix("- ") {
            flush_paragraph(&mut out, &mut paragraph);
            bullets.push(item);
        } else if line.is_empty() {
            flush_paragraph(&mut out, &mut paragraph);
            flush_bullets(&mut out, &mut bullets);
        } else {
            flush_bullets(&mut out, &mut bullets);
            paragraph.push(line);
        }
    }
    flush_paragraph(&mut out, &mut paragraph);
    flush_bullets(&mut out, &mut bullets);
    out
}

#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_header(&self, title: &str, intro: Option<&str>) -> String {
        format!(
            r#"<header class="page-header"><h1>{}</h1>{}</header>"#,
            escape(title),
            intro.map(render_text).unwrap_or_default()
        )
    }

    /// Stat displays in a two-column grid; values are printed as given.
    pub fn render_metric_section(&self, cards: &[&MetricCard]) -> String {
        let mut html = String::from(r#"<div class="metrics">"#);
        for card in cards {
            html.push_str(&format!(
                r#"<div class="metric"><div class="metric-label">{}</div><div class="metric-value">{}</div></div>"#,
                escape(&card.label),
                escape(&card.value)
            ));
        }
        html.push_str("</div>");
        html
    }

    /// One row per record in the given order; columns sort on header click.
    pub fn render_table(&self, rows: &[SalesRecord]) -> String {
        let mut html = String::from(r#"<div class="table-wrap"><table class="sales"><thead><tr>"#);
        for (i, column) in SALES_COLUMNS.iter().enumerate() {
            html.push_str(&format!(
                r#"<th class="sortable" data-column="{}">{}</th>"#,
                i,
                escape(column)
            ));
        }
        html.push_str("</tr></thead><tbody>");

        for row in rows {
            let cells = [
                (row.date.to_string(), row.date.format("%Y%m%d").to_string()),
                (row.client.clone(), String::new()),
                (group_thousands(row.sales_value), row.sales_value.to_string()),
                (group_thousands(row.payment_received), row.payment_received.to_string()),
                (trimmed(row.contract_quantity), row.contract_quantity.to_string()),
                (trimmed(row.quantity_lifted), row.quantity_lifted.to_string()),
                (
                    row.margin_percentage.as_str().to_string(),
                    row.margin_percentage.value().to_string(),
                ),
            ];

            html.push_str("<tr>");
            for (text, sort_value) in cells {
                if sort_value.is_empty() {
                    html.push_str(&format!("<td>{}</td>", escape(&text)));
                } else {
                    html.push_str(&format!(
                        r#"<td class="num" data-value="{}">{}</td>"#,
                        escape(&sort_value),
                        escape(&text)
                    ));
                }
            }
            html.push_str("</tr>");
        }

        html.push_str("</tbody></table></div>");
        html
    }

    /// A chart container carrying its options; the page script draws it.
    fn chart_container(&self, kind: &str, height: f64, chart: &Chart) -> Result<String, ReportError> {
        Ok(format!(
            r#"<div class="echart {}" style="height:{:.0}px" data-options="{}"></div>"#,
            kind,
            height,
            escape(&chart_options(chart)?)
        ))
    }

    /// A ring/pie with its legend, `height` pixels tall.
    pub fn render_pie_chart(&self, chart: &PieChart, height: f64) -> Result<String, ReportError> {
        self.chart_container("pie", height, &pie_chart(chart))
    }

    fn render_pie_figure(&self, figure: &PieFigure) -> Result<String, ReportError> {
        if figure.width == 0 || figure.height == 0 {
            return Err(ReportError::Render(format!(
                "figure '{}' has no area ({}x{})",
                figure.title, figure.width, figure.height
            )));
        }

        let height = (f64::from(figure.height) - 60.0).max(120.0);
        let mut html = format!(
            r#"<section class="figure"><h3>{}</h3><div class="figure-row">"#,
            escape(&figure.title)
        );
        for chart in &figure.charts {
            html.push_str(&self.render_pie_chart(chart, height)?);
        }
        html.push_str("</div></section>");
        Ok(html)
    }

    /// The fixed 2x2 plot grid, each cell with its own title and axes.
    pub fn render_grid_charts(&self, figure: &GridFigure) -> Result<String, ReportError> {
        if figure.width == 0 || figure.height == 0 {
            return Err(ReportError::Render(format!(
                "figure '{}' has no area ({}x{})",
                figure.title, figure.width, figure.height
            )));
        }

        let cell_height = (f64::from(figure.height) / 2.0 - 24.0).max(120.0);
        let mut html = format!(
            r#"<section class="figure"><h3>{}</h3><div class="grid">"#,
            escape(&figure.title)
        );
        for cell in figure.cells() {
            html.push_str(&self.chart_container("plot", cell_height, &cell_chart(cell))?);
        }
        html.push_str("</div></section>");
        Ok(html)
    }

    fn render_nodes(&self, nodes: &[Node], html: &mut String) -> Result<(), ReportError> {
        let mut i = 0;
        while i < nodes.len() {
            match &nodes[i] {
                Node::Title(title) => {
                    let intro = match nodes.get(i + 1) {
                        Some(Node::Text(text)) => {
                            i += 1;
                            Some(text.as_str())
                        }
                        _ => None,
                    };
                    html.push_str(&self.render_header(title, intro));
                }
                Node::Text(text) => html.push_str(&format!(
                    r#"<div class="text">{}</div>"#,
                    render_text(text)
                )),
                Node::Divider => html.push_str("<hr>"),
                Node::Header(text) => html.push_str(&format!("<h2>{}</h2>", escape(text))),
                Node::Subheader(text) => html.push_str(&format!("<h3>{}</h3>", escape(text))),
                Node::Metric(_) => {
                    let mut cards = Vec::new();
                    while let Some(Node::Metric(card)) = nodes.get(i) {
                        cards.push(card);
                        i += 1;
                    }
                    html.push_str(&self.render_metric_section(&cards));
                    continue;
                }
                Node::Columns(columns) => {
                    html.push_str(r#"<div class="columns">"#);
                    for column in columns {
                        html.push_str(r#"<div class="column">"#);
                        self.render_nodes(column, html)?;
                        html.push_str("</div>");
                    }
                    html.push_str("</div>");
                }
                Node::Expander { label, body } => {
                    html.push_str(&format!(
                        r#"<details class="expander"><summary>{}</summary>"#,
                        escape(label)
                    ));
                    self.render_nodes(body, html)?;
                    html.push_str("</details>");
                }
                Node::Table(rows) => html.push_str(&self.render_table(rows)),
                Node::Pies(figure) => html.push_str(&self.render_pie_figure(figure)?),
                Node::Grid(figure) => html.push_str(&self.render_grid_charts(figure)?),
            }
            i += 1;
        }
        Ok(())
    }
}

impl ReportRenderer for HtmlRenderer {
    fn render(&self, report: &Report) -> Result<String, ReportError> {
        let mut body = String::new();
        self.render_nodes(&report.nodes, &mut body)?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
    <script src="{echarts}"></script>
</head>
<body>
    <main class="container">
{body}
    </main>
    <script>{js}</script>
</body>
</html>"#,
            title = escape(&report.page_title),
            css = inline_css(),
            body = body,
            js = inline_javascript(),
            echarts = ECHARTS_SCRIPT,
        ))
    }

    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }
}

const ECHARTS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; }
body {
    margin: 0;
    background-color: #FFFFFF;
    color: #1F2937;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
}
.container { max-width: 1200px; margin: 0 auto; padding: 24px 32px 64px; }
h1 { font-size: 2.4rem; margin: 0.5rem 0; }
h2 { font-size: 1.7rem; margin: 1.5rem 0 0.5rem; }
h3 { font-size: 1.25rem; margin: 1rem 0 0.5rem; }
hr { border: none; border-top: 1px solid #E5EAF2; margin: 1.5rem 0; }
strong { color: #2755FF; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 24px; }
.metrics { display: grid; grid-template-columns: repeat(2, minmax(0, 1fr)); gap: 12px; }
.metric { padding: 8px 0; }
.metric-label { font-size: 0.9rem; color: #4B5563; }
.metric-value { font-size: 2rem; font-weight: 600; }
.expander { border: 1px solid #CCE3EB; border-radius: 6px; padding: 8px 16px; }
.expander summary { cursor: pointer; font-weight: 600; }
.table-wrap { overflow-x: auto; max-height: 420px; overflow-y: auto; }
table.sales { border-collapse: collapse; width: 100%; font-size: 0.95rem; }
table.sales th, table.sales td { padding: 6px 10px; border-bottom: 1px solid #E5EAF2; text-align: left; }
table.sales td.num { text-align: right; font-variant-numeric: tabular-nums; }
table.sales thead th { position: sticky; top: 0; background: #CCE3EB; }
th.sortable { cursor: pointer; user-select: none; }
th.sortable.asc::after { content: " \25B2"; }
th.sortable.desc::after { content: " \25BC"; }
.figure-row { display: flex; flex-wrap: wrap; gap: 24px; justify-content: space-around; }
.grid { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }
.echart { flex: 1 1 420px; min-width: 0; }
@media (max-width: 800px) {
    .columns, .grid { grid-template-columns: 1fr; }
}
"#
}

fn inline_javascript() -> &'static str {
    r#"
(function() {
    let sortColumn = null;
    let sortDirection = 'asc';

    function cellKey(cell) {
        const raw = cell.dataset.value;
        if (raw !== undefined) {
            const num = parseFloat(raw);
            if (!isNaN(num)) return num;
        }
        return cell.textContent.trim().toLowerCase();
    }

    function sortTable(table, column) {
        if (sortColumn === column) {
            sortDirection = sortDirection === 'asc' ? 'desc' : 'asc';
        } else {
            sortColumn = column;
            sortDirection = 'asc';
        }

        table.querySelectorAll('th.sortable').forEach(th => {
            th.classList.remove('asc', 'desc');
            if (th.dataset.column === column) th.classList.add(sortDirection);
        });

        const tbody = table.querySelector('tbody');
        const rows = Array.from(tbody.querySelectorAll('tr'));
        const index = parseInt(column, 10);
        rows.sort((a, b) => {
            const av = cellKey(a.children[index]);
            const bv = cellKey(b.children[index]);
            if (av < bv) return sortDirection === 'asc' ? -1 : 1;
            if (av > bv) return sortDirection === 'asc' ? 1 : -1;
            return 0;
        });
        rows.forEach(row => tbody.appendChild(row));
    }

    function drawCharts() {
        if (typeof echarts === 'undefined') return;
        document.querySelectorAll('.echart').forEach(el => {
            const chart = echarts.init(el);
            chart.setOption(JSON.parse(el.dataset.options));
            window.addEventListener('resize', () => chart.resize());
        });
    }

    document.addEventListener('DOMContentLoaded', function() {
        drawCharts();
        document.querySelectorAll('table.sales').forEach(table => {
            table.querySelectorAll('th.sortable').forEach(th => {
                th.addEventListener('click', function() {
                    sortTable(table, this.dataset.column);
                });
            });
        });
    });
})();
"#
}
