use http::{
    header::{self, HeaderValue},
    StatusCode,
};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    config::C,
    controller::{cors, json_response, Request, Response},
    dedup::{DuplicateGuard, CHAT_SUBMISSIONS},
    error::Error,
    n8n_client,
};

#[derive(Debug, Deserialize)]
struct ChatSubmission {
    #[serde(default)]
    message: String,
    /// Client-generated id, string or number.
    #[serde(default, rename = "messageId", alias = "message_id")]
    message_id: Option<serde_json::Value>,
}

impl ChatSubmission {
    fn message_id(&self) -> Option<String> {
        match &self.message_id {
            Some(serde_json::Value::String(id)) if !id.trim().is_empty() => Some(id.trim().to_string()),
            Some(serde_json::Value::Number(id)) => Some(id.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct DuplicatedResponse {
    pub ok: bool,
    pub duplicated: bool,
}

pub async fn controller(req: Request) -> Result<Response, Error> {
    relay(req, &CHAT_SUBMISSIONS, &C.n8n.chat_url).await
}

/// Suppress a resubmitted message id, otherwise hand the submission to the
/// chat workflow and stream its answer back untouched.
///
/// The id is recorded before forwarding, so a retry after an upstream
/// failure inside the window is still answered as a duplicate.
async fn relay(req: Request, guard: &DuplicateGuard, upstream_url: &str) -> Result<Response, Error> {
    let raw = hyper::body::to_bytes(req.into_body()).await?;
    if raw.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(Error::BodyMissing);
    }
    let submission: ChatSubmission = serde_json::from_slice(&raw)?;
    if submission.message.trim().is_empty() {
        return Err(Error::ParamMissing("message".into()));
    }

    if let Some(message_id) = submission.message_id() {
        if guard.check_and_record(&message_id) {
            info!("Duplicate chat submission {} suppressed", message_id);
            return json_response(
                StatusCode::OK,
                &DuplicatedResponse {
                    ok: true,
                    duplicated: true,
                },
            );
        }
    }

    let upstream = n8n_client::forward_chat(upstream_url, raw.to_vec()).await?;

    let mut resp = Response::new(upstream.into_body());
    let headers = resp.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    cors(headers);

    Ok(resp)
}
