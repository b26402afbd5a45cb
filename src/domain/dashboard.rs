// Dashboard domain model
use super::activity::{DailyActivityRecord, LinkAggregate};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

const MAX_WINDOW_DAYS: i64 = 3650;

/// Inclusive date range the dashboard covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The trailing window ending today.
    pub fn trailing(today: NaiveDate, days: i64) -> Self {
        let days = days.clamp(0, MAX_WINDOW_DAYS);
        Self::new(today - Duration::days(days), today)
    }

    /// Explicit start/end overrides win when both parse as `YYYY-MM-DD` and are
    /// in order; anything else falls back to the trailing window.
    pub fn resolve(
        today: NaiveDate,
        days: i64,
        start_override: Option<&str>,
        end_override: Option<&str>,
    ) -> Self {
        match (start_override, end_override) {
            (Some(start), Some(end)) => match (parse_iso_date(start), parse_iso_date(end)) {
                (Some(start), Some(end)) if start <= end => Self::new(start, end),
                _ => {
                    tracing::warn!(start, end, "Ignoring invalid date range override");
                    Self::trailing(today, days)
                }
            },
            _ => Self::trailing(today, days),
        }
    }
}

fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    // chrono accepts unpadded fields; the date picker always sends zero-padded ones
    (date.format("%Y-%m-%d").to_string() == value).then_some(date)
}

/// Name and hit count of one of a day's top links. Empty when the day has no
/// qualifying link.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopLink {
    pub name: String,
    pub hits: u64,
}

impl TopLink {
    pub fn is_empty(&self) -> bool {
        self.hits == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRow {
    #[serde(flatten)]
    pub record: DailyActivityRecord,
    pub top_link_1: TopLink,
    pub top_link_2: TopLink,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_days: usize,
    pub total_hits: u64,
    pub total_cost: Decimal,
    pub avg_hits_per_day: f64,
    pub final_balance: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummary {
    pub total_links: usize,
    pub total_hits: u64,
    pub total_cost: Decimal,
}

/// Everything the dashboard template needs, derived from the two API responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewModel {
    pub rows: Vec<DashboardRow>,
    pub summary: DashboardSummary,
    /// At most two links, highest total hits first.
    pub top_links: Vec<LinkAggregate>,
    pub show_second_link: bool,
    pub links: Vec<LinkAggregate>,
    pub link_summary: LinkSummary,
}

impl DashboardViewModel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn top_link(&self, position: usize) -> Option<&LinkAggregate> {
        self.top_links.get(position)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub user_id: i64,
    pub window: DateWindow,
    pub view: DashboardViewModel,
}

impl Dashboard {
    pub fn new(user_id: i64, window: DateWindow, view: DashboardViewModel) -> Self {
        Self {
            user_id,
            window,
            view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trailing_window() {
        let window = DateWindow::trailing(date(2025, 8, 31), 30);
        assert_eq!(window, DateWindow::new(date(2025, 8, 1), date(2025, 8, 31)));
    }

    #[test]
    fn test_negative_days_collapse_to_today() {
        let window = DateWindow::trailing(date(2025, 8, 31), -5);
        assert_eq!(window.start, window.end);
    }

    #[test]
    fn test_overrides_take_priority() {
        let window = DateWindow::resolve(
            date(2025, 9, 15),
            30,
            Some("2025-08-01"),
            Some("2025-08-03"),
        );
        assert_eq!(window, DateWindow::new(date(2025, 8, 1), date(2025, 8, 3)));
    }

    #[test]
    fn test_invalid_overrides_fall_back_to_trailing_window() {
        let today = date(2025, 9, 15);
        let expected = DateWindow::trailing(today, 7);

        assert_eq!(DateWindow::resolve(today, 7, Some("2025-8-1"), Some("2025-08-03")), expected);
        assert_eq!(DateWindow::resolve(today, 7, Some("2025-08-05"), Some("2025-08-03")), expected);
        assert_eq!(DateWindow::resolve(today, 7, Some("2025-08-01"), None), expected);
    }
}
