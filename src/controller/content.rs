use http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    controller::{json_parse_body, json_response, org_id, query_parse, Request, Response},
    error::Error,
    model::{
        content::{self, Content, ContentStatus},
        run,
    },
};

#[derive(Debug, Serialize, Deserialize)]
struct ListResponse {
    pub content: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct StatusRequest {
    pub status: Option<String>,
}

pub async fn list(req: Request) -> Result<Response, Error> {
    let params = query_parse(&req);
    let org = org_id(&params)?;
    let status_filter = match params.get("status").filter(|s| !s.trim().is_empty()) {
        Some(status) => Some(ContentStatus::parse(status)?),
        None => None,
    };

    let found = run(move |conn| content::list(conn, org, status_filter)).await?;
    json_response(StatusCode::OK, &ListResponse { content: found })
}

pub async fn update_status(req: Request, content_id: Uuid) -> Result<Response, Error> {
    let org = org_id(&query_parse(&req))?;
    let body: StatusRequest = json_parse_body(req).await?;
    let status = body
        .status
        .ok_or_else(|| Error::ParamMissing("status".into()))
        .and_then(|s| ContentStatus::parse(&s))?;

    let updated = run(move |conn| content::update_status(conn, org, content_id, status)).await?;
    json_response(StatusCode::OK, &updated)
}
