use chrono::{Datelike, NaiveDate};
use http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    controller::{json_response, org_id, query_parse, Request, Response},
    error::Error,
    model::{
        content,
        content_strategy::{self, ContentStrategy},
        organization, run,
    },
    strategy::{
        find_strategy_for_month, get_strategy_status, month_bounds, next_month, parse_month,
        MonthlyLimit, StrategyStatus,
    },
    util::today,
};

#[derive(Debug, Serialize)]
struct StrategyView {
    #[serde(flatten)]
    pub strategy: ContentStrategy,
    pub status: StrategyStatus,
}

impl StrategyView {
    fn new(strategy: ContentStrategy, today: NaiveDate) -> Self {
        let status = get_strategy_status(strategy.target_month, today);
        Self { strategy, status }
    }
}

#[derive(Debug, Serialize)]
struct ListResponse {
    pub strategies: Vec<StrategyView>,
}

#[derive(Debug, Serialize)]
struct QuotaResponse {
    /// `YYYY-MM`
    pub month: String,
    pub subscription_status: String,
    #[serde(flatten)]
    pub quota: MonthlyLimit,
    pub strategy: Option<StrategyView>,
}

fn quota_response(
    month: NaiveDate,
    subscription_status: &str,
    used: i64,
    strategies: Vec<ContentStrategy>,
    today: NaiveDate,
) -> QuotaResponse {
    let strategy = find_strategy_for_month(&strategies, month.year(), month.month())
        .cloned()
        .map(|s| StrategyView::new(s, today));

    QuotaResponse {
        month: month.format("%Y-%m").to_string(),
        subscription_status: subscription_status.to_string(),
        quota: MonthlyLimit::compute(subscription_status, used),
        strategy,
    }
}

pub async fn list(req: Request) -> Result<Response, Error> {
    let org = org_id(&query_parse(&req))?;
    let today = today();
    let strategies = run(move |conn| content_strategy::list(conn, org))
        .await?
        .into_iter()
        .map(|s| StrategyView::new(s, today))
        .collect();

    json_response(StatusCode::OK, &ListResponse { strategies })
}

pub async fn approve(req: Request, strategy_id: Uuid) -> Result<Response, Error> {
    let org = org_id(&query_parse(&req))?;
    let approved = run(move |conn| content_strategy::approve(conn, org, strategy_id)).await?;

    json_response(StatusCode::OK, &StrategyView::new(approved, today()))
}

/// Quota of the month given by `?month=YYYY-MM` (current month by default),
/// counting content created in it.
pub async fn monthly_limit(req: Request) -> Result<Response, Error> {
    let params = query_parse(&req);
    let org = org_id(&params)?;
    let today = today();
    let month = match params.get("month").filter(|m| !m.trim().is_empty()) {
        Some(month) => parse_month(month)?,
        None => NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today),
    };
    let (start, end) = month_bounds(month.year(), month.month())?;

    let (org_row, used, strategies) = run(move |conn| {
        let org_row = organization::find(conn, org)?;
        let used = content::count_created_between(conn, org, start, end)?;
        Ok((org_row, used, content_strategy::list(conn, org)?))
    })
    .await?;

    json_response(
        StatusCode::OK,
        &quota_response(month, &org_row.subscription_status, used, strategies, today),
    )
}

/// Quota of next month, counting content already scheduled into it.
pub async fn next_month_quota(req: Request) -> Result<Response, Error> {
    let org = org_id(&query_parse(&req))?;
    let today = today();
    let month = next_month(today);
    let (start, end) = month_bounds(month.year(), month.month())?;

    let (org_row, used, strategies) = run(move |conn| {
        let org_row = organization::find(conn, org)?;
        let used = content::count_scheduled_between(conn, org, start, end)?;
        Ok((org_row, used, content_strategy::list(conn, org)?))
    })
    .await?;

    json_response(
        StatusCode::OK,
        &quota_response(month, &org_row.subscription_status, used, strategies, today),
    )
}
