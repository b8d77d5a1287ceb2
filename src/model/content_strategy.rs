use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Error,
    schema::content_strategy,
    schema::content_strategy::dsl::*,
    util::now,
};

/// Monthly marketing plan of an org.
#[derive(Identifiable, Queryable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = content_strategy)]
pub struct ContentStrategy {
    pub id: Uuid,
    pub user_id: Uuid,
    pub strategy: String,
    pub target_month: NaiveDate,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Strategies of an org, latest month first.
pub fn list(conn: &mut PgConnection, org_id: Uuid) -> Result<Vec<ContentStrategy>, Error> {
    content_strategy
        .filter(user_id.eq(org_id))
        .order(target_month.desc())
        .load(conn)
        .map_err(|e| e.into())
}

pub fn approve(
    conn: &mut PgConnection,
    org_id: Uuid,
    strategy_id: Uuid,
) -> Result<ContentStrategy, Error> {
    diesel::update(
        content_strategy
            .filter(id.eq(strategy_id))
            .filter(user_id.eq(org_id)),
    )
    .set((approved.eq(true), updated_at.eq(now())))
    .get_result(conn)
    .optional()?
    .ok_or_else(|| Error::NotFound(format!("strategy {}", strategy_id)))
}
