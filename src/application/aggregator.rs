//! Pure aggregation over the raw API records.
//!
//! Ties on hit counts are broken by ascending link id, both for the overall
//! ranking and for each day's ranking. Link records without a date count
//! towards the overall totals only.

use crate::domain::activity::{DailyActivityRecord, LinkAggregate, LinkDayRecord};
use crate::domain::dashboard::{
    DashboardRow, DashboardSummary, DashboardViewModel, LinkSummary, TopLink,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Group link records by link id and rank by total hits, highest first.
pub fn aggregate_links_overall(records: &[LinkDayRecord]) -> Vec<LinkAggregate> {
    let mut totals: BTreeMap<i64, LinkAggregate> = BTreeMap::new();

    for record in records {
        let entry = totals
            .entry(record.link_id)
            .or_insert_with(|| LinkAggregate::new(record.link_id));
        entry.total_hits += record.hits;
        entry.total_cost += record.cost;
        if entry.keyword.is_none() {
            entry.keyword = record.keyword.clone();
        }
        if entry.destination.is_none() {
            entry.destination = record.destination.clone();
        }
    }

    let mut links: Vec<LinkAggregate> = totals.into_values().collect();
    links.sort_by(|a, b| {
        b.total_hits
            .cmp(&a.total_hits)
            .then(a.link_id.cmp(&b.link_id))
    });
    links
}

/// Group link records by date; each day's bucket is ranked by that day's hits.
pub fn aggregate_links_by_date(
    records: &[LinkDayRecord],
) -> BTreeMap<NaiveDate, Vec<LinkDayRecord>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<LinkDayRecord>> = BTreeMap::new();

    for record in records {
        if let Some(date) = record.date {
            by_date.entry(date).or_default().push(record.clone());
        }
    }

    for bucket in by_date.values_mut() {
        bucket.sort_by(|a, b| b.hits.cmp(&a.hits).then(a.link_id.cmp(&b.link_id)));
    }

    by_date
}

pub fn build_view_model(
    mut daily: Vec<DailyActivityRecord>,
    by_date: &BTreeMap<NaiveDate, Vec<LinkDayRecord>>,
    overall: Vec<LinkAggregate>,
) -> DashboardViewModel {
    // Stable, so same-day duplicates keep their API order
    daily.sort_by_key(|record| record.date);

    let rows: Vec<DashboardRow> = daily
        .into_iter()
        .map(|record| {
            let bucket = by_date.get(&record.date).map(Vec::as_slice).unwrap_or(&[]);
            DashboardRow {
                top_link_1: top_link_at(bucket, 0),
                top_link_2: top_link_at(bucket, 1),
                record,
            }
        })
        .collect();

    let summary = summarize(&rows);
    let show_second_link = rows.iter().any(|row| !row.top_link_2.is_empty());
    let top_links = overall
        .iter()
        .filter(|link| link.total_hits > 0)
        .take(2)
        .cloned()
        .collect();
    let link_summary = summarize_links(&overall);

    tracing::debug!(
        days = summary.total_days,
        links = link_summary.total_links,
        "Built dashboard view model"
    );

    DashboardViewModel {
        rows,
        summary,
        top_links,
        show_second_link,
        links: overall,
        link_summary,
    }
}

fn top_link_at(bucket: &[LinkDayRecord], position: usize) -> TopLink {
    bucket
        .get(position)
        .filter(|link| link.hits > 0)
        .map(|link| TopLink {
            name: link.display_name().to_string(),
            hits: link.hits,
        })
        .unwrap_or_default()
}

fn summarize(rows: &[DashboardRow]) -> DashboardSummary {
    let total_days = rows.len();
    let total_hits: u64 = rows.iter().map(|row| row.record.total_hits).sum();
    let total_cost: Decimal = rows.iter().map(|row| row.record.hit_cost.abs()).sum();
    let avg_hits_per_day = if total_days == 0 {
        0.0
    } else {
        total_hits as f64 / total_days as f64
    };
    let final_balance = rows
        .last()
        .map(|row| row.record.balance)
        .unwrap_or(Decimal::ZERO);

    DashboardSummary {
        total_days,
        total_hits,
        total_cost,
        avg_hits_per_day,
        final_balance,
    }
}

fn summarize_links(links: &[LinkAggregate]) -> LinkSummary {
    LinkSummary {
        total_links: links.len(),
        total_hits: links.iter().map(|link| link.total_hits).sum(),
        total_cost: links.iter().map(|link| link.total_cost.abs()).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, day).unwrap()
    }

    fn link(day: u32, link_id: i64, keyword: Option<&str>, hits: u64) -> LinkDayRecord {
        LinkDayRecord::new(
            date(day),
            link_id,
            keyword.map(str::to_string),
            keyword.map(|k| format!("https://example.com/{k}")),
            hits,
            Decimal::from(hits) * dec!(0.05),
        )
    }

    fn sample_links() -> Vec<LinkDayRecord> {
        vec![
            link(1, 3, Some("gamma"), 2),
            link(1, 1, Some("alpha"), 9),
            link(2, 2, None, 4),
            link(2, 1, Some("alpha"), 1),
            link(3, 3, Some("gamma"), 6),
            link(3, 2, None, 0),
        ]
    }

    #[test]
    fn test_overall_sorted_descending() {
        let overall = aggregate_links_overall(&sample_links());
        let hits: Vec<u64> = overall.iter().map(|l| l.total_hits).collect();
        assert_eq!(hits, vec![10, 8, 4]);
        assert!(overall.windows(2).all(|w| w[0].total_hits >= w[1].total_hits));
        assert_eq!(overall[0].keyword.as_deref(), Some("alpha"));
        assert!(overall[2].is_deleted());
    }

    #[test]
    fn test_overall_preserves_hit_total() {
        let inputs = vec![
            Vec::new(),
            sample_links(),
            (0..40)
                .map(|i| link(1 + (i % 5) as u32, (i % 7) as i64, Some("k"), (i * 13 % 11) as u64))
                .collect(),
        ];

        for records in inputs {
            let expected: u64 = records.iter().map(|r| r.hits).sum();
            let overall = aggregate_links_overall(&records);
            assert_eq!(overall.iter().map(|l| l.total_hits).sum::<u64>(), expected);
            assert!(overall.windows(2).all(|w| w[0].total_hits >= w[1].total_hits));
        }
    }

    #[test]
    fn test_ties_ordered_by_link_id() {
        let records = vec![link(1, 9, Some("z"), 5), link(1, 4, Some("y"), 5), link(2, 7, Some("x"), 5)];

        let overall = aggregate_links_overall(&records);
        let ids: Vec<i64> = overall.iter().map(|l| l.link_id).collect();
        assert_eq!(ids, vec![4, 7, 9]);

        let by_date = aggregate_links_by_date(&records);
        let day_one: Vec<i64> = by_date[&date(1)].iter().map(|l| l.link_id).collect();
        assert_eq!(day_one, vec![4, 9]);
    }

    #[test]
    fn test_deleted_link_keeps_metadata_from_any_record() {
        let records = vec![link(1, 5, None, 1), link(2, 5, Some("later"), 2)];
        let overall = aggregate_links_overall(&records);
        assert_eq!(overall[0].keyword.as_deref(), Some("later"));
        assert_eq!(overall[0].total_hits, 3);
    }

    #[test]
    fn test_by_date_sorted_per_day() {
        let by_date = aggregate_links_by_date(&sample_links());
        assert_eq!(by_date.len(), 3);
        let day_one: Vec<u64> = by_date[&date(1)].iter().map(|l| l.hits).collect();
        assert_eq!(day_one, vec![9, 2]);
        let day_three: Vec<u64> = by_date[&date(3)].iter().map(|l| l.hits).collect();
        assert_eq!(day_three, vec![6, 0]);
    }

    #[test]
    fn test_summary_for_three_days() {
        let daily = vec![
            DailyActivityRecord::new(date(1), 10, dec!(-0.5), dec!(100)),
            DailyActivityRecord::new(date(2), 0, Decimal::ZERO, dec!(100)),
            DailyActivityRecord::new(date(3), 5, dec!(-0.25), dec!(95)),
        ];

        let view = build_view_model(daily, &BTreeMap::new(), Vec::new());

        assert_eq!(view.summary.total_days, 3);
        assert_eq!(view.summary.total_hits, 15);
        assert!((view.summary.avg_hits_per_day - 5.0).abs() < f64::EPSILON);
        assert_eq!(view.summary.final_balance, dec!(95));
        assert_eq!(view.summary.total_cost, dec!(0.75));
    }

    #[test]
    fn test_total_cost_is_exact() {
        let daily = vec![
            DailyActivityRecord::new(date(1), 1, dec!(-0.1), dec!(9.9)),
            DailyActivityRecord::new(date(2), 1, dec!(-0.2), dec!(9.7)),
        ];

        let view = build_view_model(daily, &BTreeMap::new(), Vec::new());

        assert_eq!(view.summary.total_cost, dec!(0.3));
        let json = serde_json::to_value(&view.summary).unwrap();
        assert_eq!(json["totalCost"], 0.3);
    }

    #[test]
    fn test_final_balance_uses_latest_date() {
        let daily = vec![
            DailyActivityRecord::new(date(3), 1, Decimal::ZERO, dec!(42)),
            DailyActivityRecord::new(date(1), 1, Decimal::ZERO, dec!(10)),
            DailyActivityRecord::new(date(2), 1, Decimal::ZERO, dec!(20)),
        ];

        let view = build_view_model(daily, &BTreeMap::new(), Vec::new());

        assert_eq!(view.summary.final_balance, dec!(42));
        let dates: Vec<NaiveDate> = view.rows.iter().map(|r| r.record.date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3)]);
    }

    #[test]
    fn test_empty_daily_input() {
        let view = build_view_model(Vec::new(), &BTreeMap::new(), Vec::new());

        assert!(view.is_empty());
        assert_eq!(view.summary, DashboardSummary::default());
        assert!(!view.show_second_link);
    }

    #[test]
    fn test_top_two_excludes_zero_hit_link() {
        let records = vec![
            link(1, 1, Some("seven"), 7),
            link(1, 2, Some("three"), 3),
            link(1, 3, Some("zero"), 0),
            link(2, 3, Some("zero"), 12),
        ];
        let daily = vec![
            DailyActivityRecord::new(date(1), 10, Decimal::ZERO, dec!(50)),
            DailyActivityRecord::new(date(2), 12, Decimal::ZERO, dec!(50)),
        ];

        let by_date = aggregate_links_by_date(&records);
        let view = build_view_model(daily, &by_date, aggregate_links_overall(&records));

        let first = &view.rows[0];
        assert_eq!(first.top_link_1, TopLink { name: "seven".into(), hits: 7 });
        assert_eq!(first.top_link_2, TopLink { name: "three".into(), hits: 3 });

        let second = &view.rows[1];
        assert_eq!(second.top_link_1.hits, 12);
        assert!(second.top_link_2.is_empty());
        assert!(view.show_second_link);
    }

    #[test]
    fn test_zero_hit_day_has_no_top_links() {
        let records = vec![link(1, 1, Some("a"), 0), link(1, 2, Some("b"), 0), link(2, 1, Some("a"), 4)];
        let daily = vec![DailyActivityRecord::new(date(1), 0, Decimal::ZERO, Decimal::ZERO)];

        let view = build_view_model(daily, &aggregate_links_by_date(&records), Vec::new());

        assert!(view.rows[0].top_link_1.is_empty());
        assert!(view.rows[0].top_link_2.is_empty());
        assert!(!view.show_second_link);
    }

    #[test]
    fn test_overall_top_links_and_link_summary() {
        let records = sample_links();
        let overall = aggregate_links_overall(&records);
        let view = build_view_model(Vec::new(), &BTreeMap::new(), overall);

        assert_eq!(view.top_links.len(), 2);
        assert_eq!(view.top_link(0).map(|l| l.link_id), Some(1));
        assert_eq!(view.top_link(1).map(|l| l.link_id), Some(3));
        assert_eq!(view.link_summary.total_links, 3);
        assert_eq!(view.link_summary.total_hits, 22);
    }

    #[test]
    fn test_undated_link_records_only_count_overall() {
        let records: Vec<LinkDayRecord> = serde_json::from_str(
            r#"[
                {"mid":42,"keyword":"promo","destination":"https://x","totalHits":3,"totalCost":0.15},
                {"date":"2025-08-01","mid":42,"keyword":"promo","destination":"https://x","totalHits":2,"totalCost":"0.10"},
                {"mid":8,"keyword":null,"destination":null,"totalHits":1,"totalCost":"0.05"}
            ]"#,
        )
        .unwrap();

        let overall = aggregate_links_overall(&records);
        assert_eq!(overall[0].link_id, 42);
        assert_eq!(overall[0].total_hits, 5);
        assert_eq!(overall[0].total_cost, dec!(0.25));
        assert!(overall[1].is_deleted());

        let by_date = aggregate_links_by_date(&records);
        assert_eq!(by_date.len(), 1);
        assert_eq!(by_date[&date(1)].len(), 1);
        assert_eq!(by_date[&date(1)][0].hits, 2);

        let daily = vec![DailyActivityRecord::new(date(1), 2, dec!(-0.10), dec!(5))];
        let view = build_view_model(daily, &by_date, overall);
        assert_eq!(view.rows[0].top_link_1, TopLink { name: "promo".into(), hits: 2 });
        assert_eq!(view.link_summary.total_hits, 6);
        assert_eq!(view.link_summary.total_cost, dec!(0.30));
    }
}
