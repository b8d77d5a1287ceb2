
use http::{header, Method, Request, Response};
use hyper::{client::HttpConnector, Body, Client};
use hyper_tls::HttpsConnector;
use log::{info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Error;

/// Payload sent to the knowledge-base ingestion workflow.
#[derive(Serialize, Debug, Clone)]
pub struct KnowledgeBasePayload {
    pub user_id: Uuid,
    pub files: Vec<KnowledgeBasePayloadFile>,
}

#[derive(Serialize, Debug, Clone)]
pub struct KnowledgeBasePayloadFile {
    pub id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
}

fn make_client() -> Client<HttpsConnector<HttpConnector>> {
    let https = HttpsConnector::new();
    Client::builder().build::<_, hyper::Body>(https)
}

fn webhook_url(url: &str) -> Result<http::Uri, Error> {
    if url.trim().is_empty() {
        return Err(Error::General(
            "Webhook URL is not configured".into(),
            http::StatusCode::INTERNAL_SERVER_ERROR,
        ));
    }
    url.parse().map_err(|e: http::uri::InvalidUri| e.into())
}

async fn post_json(url: &str, body: Body) -> Result<Response<Body>, Error> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(webhook_url(url)?)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)?;

    Ok(make_client().request(request).await?)
}

/// Turn a non-2xx upstream response into `Error::Upstream`, keeping its body text.
async fn ensure_success(resp: Response<Body>) -> Result<Response<Body>, Error> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let bytes = hyper::body::to_bytes(resp.into_body()).await?;
    let body = String::from_utf8_lossy(&bytes).into_owned();
    warn!("Webhook responded {}: {}", status, body);

    Err(Error::Upstream { status, body })
}

/// Relay a chat submission. The returned body is the live upstream stream,
/// so callers can hand it to the client chunk by chunk.
pub async fn forward_chat(url: &str, body: Vec<u8>) -> Result<Response<Body>, Error> {
    let resp = post_json(url, Body::from(body)).await?;
    ensure_success(resp).await
}

/// Tell the ingestion workflow that files are ready in temp storage.
pub async fn notify_knowledge_base(url: &str, payload: &KnowledgeBasePayload) -> Result<(), Error> {
    let body = serde_json::to_vec(payload)?;
    let resp = post_json(url, Body::from(body)).await?;
    let resp = ensure_success(resp).await?;
    info!(
        "Knowledge base webhook accepted {} file(s) for {}: {}",
        payload.files.len(),
        payload.user_id,
        resp.status()
    );

    Ok(())
}
