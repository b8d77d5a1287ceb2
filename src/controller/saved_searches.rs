use http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    controller::{json_parse_body, json_response, org_id, query_parse, Request, Response},
    error::Error,
    model::{
        run,
        saved_search::{self, NewSavedSearch, SavedSearch, SavedSearchPatch},
    },
};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
struct CreateRequest {
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub query: Option<String>,
    pub location: Option<String>,
    pub headcount: Option<String>,
    pub ownership: Option<String>,
    pub filters: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
struct UpdateRequest {
    pub name: Option<String>,
    pub query: Option<String>,
    pub location: Option<String>,
    pub headcount: Option<String>,
    pub ownership: Option<String>,
    pub filters: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ListResponse {
    pub searches: Vec<SavedSearch>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DeleteResponse {
    pub deleted: bool,
}

/// Blank strings count as "not given".
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn ensure_object(filters: &serde_json::Value) -> Result<(), Error> {
    if filters.is_object() {
        Ok(())
    } else {
        Err(Error::ParamError("filters should be a JSON object".into()))
    }
}

fn validate_create(req: CreateRequest) -> Result<NewSavedSearch, Error> {
    let user_id = req.user_id.ok_or_else(|| Error::ParamMissing("user_id".into()))?;
    let name = non_blank(req.name).ok_or_else(|| Error::ParamMissing("name".into()))?;
    let filters = req.filters.unwrap_or_else(|| serde_json::json!({}));
    ensure_object(&filters)?;

    Ok(NewSavedSearch {
        user_id,
        name,
        query: non_blank(req.query),
        location: non_blank(req.location),
        headcount: non_blank(req.headcount),
        ownership: non_blank(req.ownership),
        filters,
    })
}

fn validate_update(req: UpdateRequest) -> Result<SavedSearchPatch, Error> {
    let name = match req.name {
        Some(name) => Some(non_blank(Some(name)).ok_or_else(|| Error::ParamError("name should not be blank".into()))?),
        None => None,
    };
    if let Some(filters) = &req.filters {
        ensure_object(filters)?;
    }

    Ok(SavedSearchPatch {
        name,
        query: req.query,
        location: req.location,
        headcount: req.headcount,
        ownership: req.ownership,
        filters: req.filters,
    })
}

pub async fn list(req: Request) -> Result<Response, Error> {
    let org = org_id(&query_parse(&req))?;
    let searches = run(move |conn| saved_search::list(conn, org)).await?;

    json_response(StatusCode::OK, &ListResponse { searches })
}

pub async fn create(req: Request) -> Result<Response, Error> {
    let body: CreateRequest = json_parse_body(req).await?;
    let new_search = validate_create(body)?;

    let created = run(move |conn| saved_search::create(conn, &new_search)).await?;
    json_response(StatusCode::CREATED, &created)
}

pub async fn show(req: Request, search_id: Uuid) -> Result<Response, Error> {
    let org = org_id(&query_parse(&req))?;
    let found = run(move |conn| saved_search::find(conn, org, search_id)).await?;

    json_response(StatusCode::OK, &found)
}

pub async fn update(req: Request, search_id: Uuid) -> Result<Response, Error> {
    let org = org_id(&query_parse(&req))?;
    let body: UpdateRequest = json_parse_body(req).await?;
    let patch = validate_update(body)?;

    let updated = run(move |conn| {
        let found = saved_search::find(conn, org, search_id)?;
        found.patch(conn, patch)
    })
    .await?;
    json_response(StatusCode::OK, &updated)
}

pub async fn delete(req: Request, search_id: Uuid) -> Result<Response, Error> {
    let org = org_id(&query_parse(&req))?;
    run(move |conn| saved_search::delete(conn, org, search_id)).await?;

    json_response(StatusCode::OK, &DeleteResponse { deleted: true })
}
