// Server-rendered dashboard page
use crate::domain::activity::LinkAggregate;
use crate::domain::dashboard::{Dashboard, DashboardRow};
use crate::presentation::chart::{ChartKind, ChartPayload};
use crate::presentation::format::{format_count, format_currency};
use crate::presentation::pagination::{
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, PageItem, PageSize, Pagination,
};
use askama::Template;
use chrono::NaiveDate;

pub const CLIENT_SCRIPT_PATH: &str = "/assets/uad-scripts.js";
pub const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.0/dist/chart.umd.min.js";

/// Which sections the caller asked for.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub show_chart: bool,
    pub show_table: bool,
    pub chart_kind: ChartKind,
    pub today: NaiveDate,
}

#[derive(Debug)]
pub struct SummaryView {
    pub total_days: String,
    pub total_hits: String,
    pub total_cost: String,
    pub avg_hits_per_day: String,
    pub final_balance: String,
}

#[derive(Debug)]
pub struct DailyRowView {
    pub index: usize,
    pub hidden: bool,
    pub date: String,
    pub top1_hits: String,
    pub top1_name: String,
    pub top2_hits: String,
    pub top2_name: String,
    pub total_hits: String,
    pub cost: String,
    pub balance: String,
    pub balance_class: &'static str,
}

#[derive(Debug)]
pub struct LinkRowView {
    pub index: usize,
    pub hidden: bool,
    pub link_id: i64,
    pub keyword: String,
    pub keyword_deleted: bool,
    pub destination: String,
    pub destination_deleted: bool,
    pub destination_is_link: bool,
    pub total_hits: String,
    pub total_cost: String,
}

#[derive(Debug)]
pub struct PageButtonView {
    pub number: usize,
    pub active: bool,
    pub ellipsis: bool,
}

/// Initial state of one table's pagination controls.
#[derive(Debug)]
pub struct PagerView {
    pub prefix: &'static str,
    pub total: usize,
    pub showing_start: usize,
    pub showing_end: usize,
    pub page_sizes: Vec<usize>,
    pub buttons: Vec<PageButtonView>,
    pub first_disabled: bool,
    pub last_disabled: bool,
}

impl PagerView {
    fn new(prefix: &'static str, pagination: &Pagination) -> Self {
        let (showing_start, showing_end) = pagination.showing();
        let buttons = pagination
            .page_items()
            .into_iter()
            .map(|item| match item {
                PageItem::Page { number, active } => PageButtonView {
                    number,
                    active,
                    ellipsis: false,
                },
                PageItem::Ellipsis => PageButtonView {
                    number: 0,
                    active: false,
                    ellipsis: true,
                },
            })
            .collect();

        Self {
            prefix,
            total: pagination.total_rows(),
            showing_start,
            showing_end,
            page_sizes: PAGE_SIZE_OPTIONS.to_vec(),
            buttons,
            first_disabled: pagination.is_first_page(),
            last_disabled: pagination.is_last_page(),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub today: String,
    pub chart_js_url: &'static str,
    pub script_path: &'static str,
    pub summary: SummaryView,
    pub has_data: bool,
    pub show_chart: bool,
    pub show_table: bool,
    pub show_second_link: bool,
    /// Names of the overall top links, highest first.
    pub overall_top_links: String,
    pub rows: Vec<DailyRowView>,
    pub daily_pager: PagerView,
    pub has_links: bool,
    pub links: Vec<LinkRowView>,
    pub link_pager: PagerView,
    pub chart_json: String,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("chart data could not be serialized: {0}")]
    Chart(#[from] serde_json::Error),
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

pub fn render_dashboard(dashboard: &Dashboard, options: &RenderOptions) -> Result<String, RenderError> {
    let view = &dashboard.view;
    let has_data = !view.is_empty();

    let daily_pagination = Pagination::new(view.rows.len(), PageSize::Rows(DEFAULT_PAGE_SIZE));
    let link_pagination = Pagination::new(view.links.len(), PageSize::Rows(DEFAULT_PAGE_SIZE));

    let chart_json = if options.show_chart && has_data {
        ChartPayload::from_view(view, options.chart_kind).to_script_json()?
    } else {
        String::new()
    };

    let template = DashboardTemplate {
        user_id: dashboard.user_id,
        start_date: dashboard.window.start.to_string(),
        end_date: dashboard.window.end.to_string(),
        today: options.today.to_string(),
        chart_js_url: CHART_JS_URL,
        script_path: CLIENT_SCRIPT_PATH,
        summary: SummaryView {
            total_days: format_count(view.summary.total_days as u64),
            total_hits: format_count(view.summary.total_hits),
            total_cost: format_currency(view.summary.total_cost),
            avg_hits_per_day: format!("{:.1}", view.summary.avg_hits_per_day),
            final_balance: format_currency(view.summary.final_balance),
        },
        has_data,
        show_chart: options.show_chart && has_data,
        show_table: options.show_table && has_data,
        show_second_link: view.show_second_link,
        overall_top_links: view
            .top_links
            .iter()
            .map(LinkAggregate::display_name)
            .collect::<Vec<_>>()
            .join(", "),
        rows: view
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| daily_row(index, row, &daily_pagination))
            .collect(),
        daily_pager: PagerView::new("uad", &daily_pagination),
        has_links: !view.links.is_empty(),
        links: view
            .links
            .iter()
            .enumerate()
            .map(|(index, link)| link_row(index, link, &link_pagination))
            .collect(),
        link_pager: PagerView::new("uad-link", &link_pagination),
        chart_json,
    };

    Ok(template.render()?)
}

pub fn render_error(message: &str) -> Result<String, askama::Error> {
    ErrorTemplate { message }.render()
}

fn daily_row(index: usize, row: &DashboardRow, pagination: &Pagination) -> DailyRowView {
    let record = &row.record;
    DailyRowView {
        index,
        hidden: !pagination.is_visible(index),
        date: record.date.to_string(),
        top1_hits: format_count(row.top_link_1.hits),
        top1_name: row.top_link_1.name.clone(),
        top2_hits: format_count(row.top_link_2.hits),
        top2_name: row.top_link_2.name.clone(),
        total_hits: format_count(record.total_hits),
        cost: if !record.hit_cost.is_zero() {
            format_currency(record.hit_cost)
        } else {
            "-".to_string()
        },
        balance: format_currency(record.balance),
        balance_class: if record.balance.is_sign_negative() && !record.balance.is_zero() {
            "negative"
        } else {
            "positive"
        },
    }
}

fn link_row(index: usize, link: &LinkAggregate, pagination: &Pagination) -> LinkRowView {
    let destination = link.destination.clone().unwrap_or_default();
    LinkRowView {
        index,
        hidden: !pagination.is_visible(index),
        link_id: link.link_id,
        keyword: link.display_name().to_string(),
        keyword_deleted: link.is_deleted(),
        destination_is_link: destination.starts_with("http://") || destination.starts_with("https://"),
        destination_deleted: link.destination.is_none(),
        destination,
        total_hits: format_count(link.total_hits),
        total_cost: format_currency(link.total_cost.abs()),
    }
}
