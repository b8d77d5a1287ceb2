use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Error,
    schema::{call_logs, campaign, message_logs},
};

// Calling campaigns and their logs are written by the calling backend and
// n8n; this side only reads them.

#[derive(Identifiable, Queryable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = campaign)]
pub struct Campaign {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub status: String,
    pub total_calls: i32,
    pub answered_calls: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Share of answered calls, `0.0` before the first call.
    pub fn answer_rate(&self) -> f64 {
        if self.total_calls <= 0 {
            return 0.0;
        }
        f64::from(self.answered_calls) / f64::from(self.total_calls)
    }
}

#[derive(Identifiable, Queryable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = call_logs)]
pub struct CallLog {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub user_id: Uuid,
    pub phone_number: String,
    pub status: String,
    pub duration_seconds: Option<i32>,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Identifiable, Queryable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = message_logs)]
pub struct MessageLog {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub user_id: Uuid,
    pub channel: String,
    pub recipient: String,
    pub body: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub fn list(conn: &mut PgConnection, org_id: Uuid) -> Result<Vec<Campaign>, Error> {
    campaign::table
        .filter(campaign::user_id.eq(org_id))
        .order(campaign::created_at.desc())
        .load(conn)
        .map_err(|e| e.into())
}

pub fn find(conn: &mut PgConnection, org_id: Uuid, campaign_id: Uuid) -> Result<Campaign, Error> {
    campaign::table
        .filter(campaign::id.eq(campaign_id))
        .filter(campaign::user_id.eq(org_id))
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("campaign {}", campaign_id)))
}

pub fn list_call_logs(
    conn: &mut PgConnection,
    org_id: Uuid,
    campaign_id: Uuid,
) -> Result<Vec<CallLog>, Error> {
    call_logs::table
        .filter(call_logs::campaign_id.eq(campaign_id))
        .filter(call_logs::user_id.eq(org_id))
        .order(call_logs::created_at.desc())
        .load(conn)
        .map_err(|e| e.into())
}

pub fn list_message_logs(
    conn: &mut PgConnection,
    org_id: Uuid,
    campaign_id: Uuid,
) -> Result<Vec<MessageLog>, Error> {
    message_logs::table
        .filter(message_logs::campaign_id.eq(campaign_id))
        .filter(message_logs::user_id.eq(org_id))
        .order(message_logs::created_at.desc())
        .load(conn)
        .map_err(|e| e.into())
}
