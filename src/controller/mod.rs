mod campaigns;
mod chat;
mod content;
mod healthz;
mod knowledge_base;
pub mod lambda;
mod saved_searches;
mod strategy;

use std::collections::HashMap;

use http::{
    header::{self, HeaderMap, HeaderValue},
    Method, StatusCode,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Error,
    util::{parse_uuid, require},
};

pub use hyper::Body;
pub type Request = http::Request<Body>;
pub type Response = http::Response<Body>;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Shared entrypoint of every deployment shape.
pub async fn route(req: Request) -> Response {
    info!("{} {}", req.method(), req.uri().path());

    if req.method() == Method::OPTIONS {
        let mut resp = Response::new(Body::empty());
        *resp.status_mut() = StatusCode::NO_CONTENT;
        cors(resp.headers_mut());
        return resp;
    }

    match dispatch(req).await {
        Ok(resp) => resp,
        Err(err) => error_response(err),
    }
}

async fn dispatch(req: Request) -> Result<Response, Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (&method, segments.as_slice()) {
        (&Method::GET, ["api", "healthz"]) => healthz::controller(req).await,

        (&Method::POST, ["api", "ai", "chat"]) => chat::controller(req).await,

        (&Method::GET, ["api", "leads", "searches"]) => saved_searches::list(req).await,
        (&Method::POST, ["api", "leads", "searches"]) => saved_searches::create(req).await,
        (&Method::GET, ["api", "leads", "searches", id]) => {
            saved_searches::show(req, parse_uuid("id", id)?).await
        }
        (&Method::PATCH | &Method::PUT, ["api", "leads", "searches", id]) => {
            saved_searches::update(req, parse_uuid("id", id)?).await
        }
        (&Method::DELETE, ["api", "leads", "searches", id]) => {
            saved_searches::delete(req, parse_uuid("id", id)?).await
        }

        (&Method::POST, ["api", "calls", "knowledge-base-register"]) => {
            knowledge_base::register(req).await
        }
        (&Method::GET, ["api", "calls", "knowledge-base"]) => knowledge_base::list(req).await,
        (&Method::GET, ["api", "calls", "campaigns"]) => campaigns::list(req).await,
        (&Method::GET, ["api", "calls", "campaigns", id, "logs"]) => {
            campaigns::logs(req, parse_uuid("id", id)?).await
        }

        (&Method::GET, ["api", "content"]) => content::list(req).await,
        (&Method::PATCH, ["api", "content", id, "status"]) => {
            content::update_status(req, parse_uuid("id", id)?).await
        }

        (&Method::GET, ["api", "strategy"]) => strategy::list(req).await,
        (&Method::GET, ["api", "strategy", "monthly-limit"]) => strategy::monthly_limit(req).await,
        (&Method::GET, ["api", "strategy", "next-month-quota"]) => {
            strategy::next_month_quota(req).await
        }
        (&Method::POST, ["api", "strategy", id, "approve"]) => {
            strategy::approve(req, parse_uuid("id", id)?).await
        }

        (_, known) if is_known_path(known) => Err(Error::MethodNotAllowed),
        _ => Err(Error::NotFound(path.clone())),
    }
}

fn is_known_path(segments: &[&str]) -> bool {
    matches!(
        segments,
        ["api", "healthz"]
            | ["api", "ai", "chat"]
            | ["api", "leads", "searches"]
            | ["api", "leads", "searches", _]
            | ["api", "calls", "knowledge-base-register"]
            | ["api", "calls", "knowledge-base"]
            | ["api", "calls", "campaigns"]
            | ["api", "calls", "campaigns", _, "logs"]
            | ["api", "content"]
            | ["api", "content", _, "status"]
            | ["api", "strategy"]
            | ["api", "strategy", "monthly-limit" | "next-month-quota"]
            | ["api", "strategy", _, "approve"]
    )
}

/// Parse query string into a map. Later duplicates win.
pub(crate) fn query_parse(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}

/// The org every query is scoped by, from `?user_id=`.
pub(crate) fn org_id(params: &HashMap<String, String>) -> Result<Uuid, Error> {
    parse_uuid("user_id", require(params, "user_id")?)
}

pub(crate) async fn json_parse_body<T>(req: Request) -> Result<T, Error>
where
    for<'de> T: Deserialize<'de>,
{
    let bytes = hyper::body::to_bytes(req.into_body()).await?;
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(Error::BodyMissing);
    }
    serde_json::from_slice(&bytes).map_err(|e| e.into())
}

pub(crate) fn json_response<T>(status: StatusCode, resp: &T) -> Result<Response, Error>
where
    T: Serialize,
{
    let body = serde_json::to_string(resp)?;
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    cors(response.headers_mut());

    Ok(response)
}

pub(crate) fn cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type,Authorization,X-Api-Key"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, PATCH, DELETE, OPTIONS"),
    );
}

pub(crate) fn error_body(err: &Error) -> String {
    let resp = ErrorResponse {
        error: err.to_string(),
        details: err.details(),
    };
    serde_json::to_string(&resp).unwrap_or_else(|_| r#"{"error":"internal error"}"#.into())
}

pub(crate) fn error_response(err: Error) -> Response {
    let status = err.http_status();
    if status.is_server_error() {
        error!("{} {:?}", status, err);
    } else {
        warn!("{} {}", status, err);
    }

    let mut resp = Response::new(Body::from(error_body(&err)));
    *resp.status_mut() = status;
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    cors(resp.headers_mut());
    resp
}
