use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use crate::{error::Error, schema::content, schema::content::dsl::*, util::now};

/// Lifecycle status of a post / article / newsletter item.
#[derive(Display, EnumString, Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContentStatus {
    #[strum(serialize = "Draft")]
    #[serde(rename = "Draft")]
    Draft,
    #[strum(serialize = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    #[strum(serialize = "Under Review")]
    #[serde(rename = "Under Review")]
    UnderReview,
    #[strum(serialize = "Scheduled")]
    #[serde(rename = "Scheduled")]
    Scheduled,
    #[strum(serialize = "Done")]
    #[serde(rename = "Done")]
    Done,
    #[strum(serialize = "Published")]
    #[serde(rename = "Published")]
    Published,
    #[strum(serialize = "Archived")]
    #[serde(rename = "Archived")]
    Archived,
    #[strum(serialize = "Deleted")]
    #[serde(rename = "Deleted")]
    Deleted,
}

impl ContentStatus {
    /// Parse a status given by client.
    pub fn parse(value: &str) -> Result<Self, Error> {
        value
            .trim()
            .parse()
            .map_err(|_| Error::ParamError(format!("unknown content status: {}", value)))
    }
}

#[derive(Identifiable, Queryable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = content)]
pub struct Content {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: Option<String>,
    pub content_type: String,
    pub status: String,
    pub media_urls: serde_json::Value,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub strategy_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Content of an org, newest first. Optionally narrowed to one status.
pub fn list(
    conn: &mut PgConnection,
    org_id: Uuid,
    status_filter: Option<ContentStatus>,
) -> Result<Vec<Content>, Error> {
    let scoped = content.filter(user_id.eq(org_id));
    match status_filter {
        Some(expected) => scoped
            .filter(status.eq(expected.to_string()))
            .order(created_at.desc())
            .load(conn),
        None => scoped.order(created_at.desc()).load(conn),
    }
    .map_err(|e| e.into())
}

pub fn update_status(
    conn: &mut PgConnection,
    org_id: Uuid,
    content_id: Uuid,
    new_status: ContentStatus,
) -> Result<Content, Error> {
    diesel::update(content.filter(id.eq(content_id)).filter(user_id.eq(org_id)))
        .set((status.eq(new_status.to_string()), updated_at.eq(now())))
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("content {}", content_id)))
}

/// Items created in `[start, end)`, ignoring deleted ones.
pub fn count_created_between(
    conn: &mut PgConnection,
    org_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<i64, Error> {
    content
        .filter(user_id.eq(org_id))
        .filter(status.ne(ContentStatus::Deleted.to_string()))
        .filter(created_at.ge(start))
        .filter(created_at.lt(end))
        .count()
        .get_result(conn)
        .map_err(|e| e.into())
}

/// Items scheduled into `[start, end)`, ignoring deleted ones.
pub fn count_scheduled_between(
    conn: &mut PgConnection,
    org_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<i64, Error> {
    content
        .filter(user_id.eq(org_id))
        .filter(status.ne(ContentStatus::Deleted.to_string()))
        .filter(scheduled_date.ge(start))
        .filter(scheduled_date.lt(end))
        .count()
        .get_result(conn)
        .map_err(|e| e.into())
}
