
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Error,
    schema::saved_searches,
    schema::saved_searches::dsl::*,
    util::now,
};

/// Named lead-search filter set.
#[derive(Identifiable, Queryable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = saved_searches)]
pub struct SavedSearch {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub query: Option<String>,
    pub location: Option<String>,
    pub headcount: Option<String>,
    pub ownership: Option<String>,
    pub filters: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = saved_searches)]
pub struct NewSavedSearch {
    pub user_id: Uuid,
    pub name: String,
    pub query: Option<String>,
    pub location: Option<String>,
    pub headcount: Option<String>,
    pub ownership: Option<String>,
    pub filters: serde_json::Value,
}

/// Partial update. `None` fields are left untouched; `filters` is merged
/// onto the stored value as a JSON merge patch.
#[derive(Debug, Clone, Default)]
pub struct SavedSearchPatch {
    pub name: Option<String>,
    pub query: Option<String>,
    pub location: Option<String>,
    pub headcount: Option<String>,
    pub ownership: Option<String>,
    pub filters: Option<serde_json::Value>,
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = saved_searches)]
struct SavedSearchChangeset {
    name: Option<String>,
    query: Option<String>,
    location: Option<String>,
    headcount: Option<String>,
    ownership: Option<String>,
    filters: Option<serde_json::Value>,
    updated_at: DateTime<Utc>,
}

impl SavedSearch {
    /// Apply a patch onto current record.
    pub fn patch(&self, conn: &mut PgConnection, patch: SavedSearchPatch) -> Result<SavedSearch, Error> {
        let merged_filters = patch.filters.map(|filter_patch| {
            let mut merged = self.filters.clone();
            json_patch::merge(&mut merged, &filter_patch);
            merged
        });

        diesel::update(self)
            .set(&SavedSearchChangeset {
                name: patch.name,
                query: patch.query,
                location: patch.location,
                headcount: patch.headcount,
                ownership: patch.ownership,
                filters: merged_filters,
                updated_at: now(),
            })
            .get_result(conn)
            .map_err(|e| e.into())
    }
}

/// All saved searches of an org, newest first.
pub fn list(conn: &mut PgConnection, org_id: Uuid) -> Result<Vec<SavedSearch>, Error> {
    saved_searches
        .filter(user_id.eq(org_id))
        .order(created_at.desc())
        .load(conn)
        .map_err(|e| e.into())
}

pub fn find(conn: &mut PgConnection, org_id: Uuid, search_id: Uuid) -> Result<SavedSearch, Error> {
    saved_searches
        .filter(id.eq(search_id))
        .filter(user_id.eq(org_id))
        .first(conn)
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("saved search {}", search_id)))
}

pub fn create(conn: &mut PgConnection, new_search: &NewSavedSearch) -> Result<SavedSearch, Error> {
    diesel::insert_into(saved_searches::table)
        .values(new_search)
        .get_result(conn)
        .map_err(|e| e.into())
}

pub fn delete(conn: &mut PgConnection, org_id: Uuid, search_id: Uuid) -> Result<(), Error> {
    let deleted = diesel::delete(
        saved_searches
            .filter(id.eq(search_id))
            .filter(user_id.eq(org_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(Error::NotFound(format!("saved search {}", search_id)));
    }
    Ok(())
}
