use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::Error, schema::users, schema::users::dsl::*};

/// Tenant row. `id` is the org id every other table is scoped by, distinct
/// from the auth provider's `auth_user_id`.
#[derive(Identifiable, Queryable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = users)]
pub struct Organization {
    pub id: Uuid,
    pub auth_user_id: Option<Uuid>,
    pub company_name: Option<String>,
    pub subscription_status: String,
    pub onboarding_completed: bool,
    pub icp: Option<String>,
    pub kpi: Option<String>,
    pub tov: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn find(conn: &mut PgConnection, org_id: Uuid) -> Result<Organization, Error> {
    users
        .find(org_id)
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("organization {}", org_id)))
}

/// Insert a bare org row for database-backed tests.
#[cfg(test)]
pub fn create_for_test(conn: &mut PgConnection, tier: &str) -> Result<Organization, Error> {
    diesel::insert_into(users::table)
        .values((
            subscription_status.eq(tier),
            company_name.eq(Some("Test Co")),
        ))
        .get_result(conn)
        .map_err(|e| e.into())
}
