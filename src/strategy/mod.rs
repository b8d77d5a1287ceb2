mod tests;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::{error::Error, model::content_strategy::ContentStrategy};

pub const FREE_MONTHLY_LIMIT: i64 = 30;
pub const PRO_MONTHLY_LIMIT: i64 = 100;
/// Enterprise quota. Anything at or above this counts as unlimited.
pub const UNLIMITED_MONTHLY_LIMIT: i64 = 999_999;

/// Monthly content quota of a subscription tier.
/// Unknown tiers fall back to the free quota.
pub fn calculate_monthly_limit(subscription_status: &str) -> i64 {
    match subscription_status.trim().to_ascii_lowercase().as_str() {
        "pro" => PRO_MONTHLY_LIMIT,
        "enterprise" => UNLIMITED_MONTHLY_LIMIT,
        _ => FREE_MONTHLY_LIMIT,
    }
}

/// Where a strategy month sits relative to today.
#[derive(Display, Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StrategyStatus {
    Old,
    Current,
    Upcoming,
}

/// Compare only (year, month) of `target_month` against `today`.
pub fn get_strategy_status(target_month: NaiveDate, today: NaiveDate) -> StrategyStatus {
    let target = (target_month.year(), target_month.month());
    let current = (today.year(), today.month());
    match target.cmp(&current) {
        std::cmp::Ordering::Less => StrategyStatus::Old,
        std::cmp::Ordering::Equal => StrategyStatus::Current,
        std::cmp::Ordering::Greater => StrategyStatus::Upcoming,
    }
}

/// First strategy planned for the given month.
pub fn find_strategy_for_month(
    strategies: &[ContentStrategy],
    year: i32,
    month: u32,
) -> Option<&ContentStrategy> {
    strategies
        .iter()
        .find(|s| s.target_month.year() == year && s.target_month.month() == month)
}

/// Quota usage of one month.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MonthlyLimit {
    pub limit: i64,
    pub used: i64,
    pub remaining: i64,
    pub is_unlimited: bool,
    pub can_create: bool,
}

impl MonthlyLimit {
    pub fn compute(subscription_status: &str, used: i64) -> Self {
        let limit = calculate_monthly_limit(subscription_status);
        let is_unlimited = limit >= UNLIMITED_MONTHLY_LIMIT;
        let remaining = (limit - used).max(0);

        Self {
            limit,
            used,
            remaining,
            is_unlimited,
            can_create: is_unlimited || remaining > 0,
        }
    }
}

/// First day of the month after `today`.
pub fn next_month(today: NaiveDate) -> NaiveDate {
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    first_day(year, month).unwrap_or(today)
}

/// `[start, end)` of a month in UTC.
pub fn month_bounds(year: i32, month: u32) -> Result<(DateTime<Utc>, DateTime<Utc>), Error> {
    let start = first_day(year, month)
        .ok_or_else(|| Error::ParamError(format!("invalid month: {}-{}", year, month)))?;
    let end = next_month(start);

    match (midnight_utc(start), midnight_utc(end)) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(Error::ParamError(format!("invalid month: {}-{}", year, month))),
    }
}

/// Parse a `YYYY-MM` month given by client into its first day.
pub fn parse_month(value: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map_err(|_| Error::ParamError(format!("month should be YYYY-MM, got {}", value)))
}

fn first_day(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn midnight_utc(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}
