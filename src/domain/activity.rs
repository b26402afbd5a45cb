// Activity records as returned by the remote API
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

pub const DELETED_LINK_LABEL: &str = "(deleted)";

/// One day of activity for a user, with the running balance at the end of that day.
/// Money fields accept JSON numbers or decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivityRecord {
    #[serde(deserialize_with = "api_date")]
    pub date: NaiveDate,
    pub total_hits: u64,
    pub hit_cost: Decimal,
    pub balance: Decimal,
}

impl DailyActivityRecord {
    pub fn new(date: NaiveDate, total_hits: u64, hit_cost: Decimal, balance: Decimal) -> Self {
        Self {
            date,
            total_hits,
            hit_cost,
            balance,
        }
    }
}

/// Hits for a single link on a single day. A null keyword or destination means
/// the link has since been deleted. Records without a date only count towards
/// the link's overall totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDayRecord {
    #[serde(default, deserialize_with = "optional_api_date")]
    pub date: Option<NaiveDate>,
    #[serde(alias = "mid")]
    pub link_id: i64,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(alias = "totalHits")]
    pub hits: u64,
    #[serde(alias = "totalCost")]
    pub cost: Decimal,
}

impl LinkDayRecord {
    pub fn new(
        date: impl Into<Option<NaiveDate>>,
        link_id: i64,
        keyword: Option<String>,
        destination: Option<String>,
        hits: u64,
        cost: Decimal,
    ) -> Self {
        Self {
            date: date.into(),
            link_id,
            keyword,
            destination,
            hits,
            cost,
        }
    }

    pub fn display_name(&self) -> &str {
        self.keyword.as_deref().unwrap_or(DELETED_LINK_LABEL)
    }
}

/// Totals for one link across the whole date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAggregate {
    pub link_id: i64,
    pub keyword: Option<String>,
    pub destination: Option<String>,
    pub total_hits: u64,
    pub total_cost: Decimal,
}

impl LinkAggregate {
    pub fn new(link_id: i64) -> Self {
        Self {
            link_id,
            keyword: None,
            destination: None,
            total_hits: 0,
            total_cost: Decimal::ZERO,
        }
    }

    pub fn display_name(&self) -> &str {
        self.keyword.as_deref().unwrap_or(DELETED_LINK_LABEL)
    }

    pub fn is_deleted(&self) -> bool {
        self.keyword.is_none()
    }
}

// Accepts "2025-08-01" as well as full timestamps such as "2025-08-01T00:00:00.000Z".
fn parse_api_date<E: serde::de::Error>(raw: &str) -> Result<NaiveDate, E> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(E::custom)
}

fn api_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    parse_api_date(&String::deserialize(deserializer)?)
}

fn optional_api_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_api_date(&raw))
        .transpose()
}
