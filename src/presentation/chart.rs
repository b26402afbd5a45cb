// Chart data handed to Chart.js as `window.uadChartData`
use crate::domain::dashboard::DashboardViewModel;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    /// Hits only
    Line,
    /// Hits on the left axis, balance on the right
    DualAxis,
}

/// Per-day series. `top_link1`/`top_link2` are the hits of whichever link
/// ranked first/second on that day, so they carry no link name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayload {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub hits: Vec<u64>,
    pub balance: Vec<Decimal>,
    pub top_link1: Vec<u64>,
    pub top_link2: Vec<u64>,
    pub show_second_link: bool,
}

impl ChartPayload {
    pub fn from_view(view: &DashboardViewModel, kind: ChartKind) -> Self {
        Self {
            kind,
            labels: view.rows.iter().map(|row| row.record.date.to_string()).collect(),
            hits: view.rows.iter().map(|row| row.record.total_hits).collect(),
            balance: view.rows.iter().map(|row| row.record.balance).collect(),
            top_link1: view.rows.iter().map(|row| row.top_link_1.hits).collect(),
            top_link2: view.rows.iter().map(|row| row.top_link_2.hits).collect(),
            show_second_link: view.show_second_link,
        }
    }

    /// JSON that is safe to embed inside a `<script>` element.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}
