use http::StatusCode;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::C,
    controller::{json_parse_body, json_response, org_id, query_parse, Request, Response},
    error::Error,
    model::{
        knowledge_file::{self, KnowledgeFile, KnowledgeFileStatus, NewKnowledgeFile},
        run,
    },
    n8n_client::{self, KnowledgeBasePayload, KnowledgeBasePayloadFile},
};

#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterRequest {
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub files: Vec<RegisterFile>,
}

/// Metadata of an object the browser already put into temp storage.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterFile {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_path: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RegisterResponse {
    pub success: bool,
    pub files: Vec<KnowledgeFile>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ListResponse {
    pub files: Vec<KnowledgeFile>,
}

fn validate(req: RegisterRequest) -> Result<(Uuid, Vec<NewKnowledgeFile>), Error> {
    let org = req.user_id.ok_or_else(|| Error::ParamMissing("user_id".into()))?;
    if req.files.is_empty() {
        return Err(Error::ParamMissing("files".into()));
    }

    let files = req
        .files
        .into_iter()
        .enumerate()
        .map(|(index, file)| {
            if file.file_name.trim().is_empty() {
                return Err(Error::ParamMissing(format!("files[{}].file_name", index)));
            }
            if file.file_path.trim().is_empty() {
                return Err(Error::ParamMissing(format!("files[{}].file_path", index)));
            }
            if matches!(file.file_size, Some(size) if size < 0) {
                return Err(Error::ParamError(format!("files[{}].file_size is negative", index)));
            }
            Ok(NewKnowledgeFile::uploaded(
                org,
                file.file_name.trim().to_string(),
                file.file_path.trim().to_string(),
                file.file_size,
                file.mime_type,
            ))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok((org, files))
}

fn webhook_payload(org: Uuid, registered: &[KnowledgeFile]) -> KnowledgeBasePayload {
    KnowledgeBasePayload {
        user_id: org,
        files: registered
            .iter()
            .map(|file| KnowledgeBasePayloadFile {
                id: file.id,
                file_name: file.file_name.clone(),
                file_path: file.file_path.clone(),
                file_size: file.file_size,
                mime_type: file.mime_type.clone(),
            })
            .collect(),
    }
}

pub async fn register(req: Request) -> Result<Response, Error> {
    register_with(req, &C.n8n.knowledge_base_url).await
}

/// Register uploaded files, then notify the ingestion workflow at
/// `webhook_url`.
///
/// Rows are inserted as `uploaded_to_temp` first and moved to
/// `sent_to_webhook` or `failed` depending on the webhook outcome. A failed
/// webhook leaves the rows (and the stored objects) in place.
async fn register_with(req: Request, webhook_url: &str) -> Result<Response, Error> {
    let body: RegisterRequest = json_parse_body(req).await?;
    let (org, files) = validate(body)?;

    let registered = run(move |conn| knowledge_file::insert_uploaded(conn, &files)).await?;
    let ids: Vec<Uuid> = registered.iter().map(|f| f.id).collect();
    info!("Registered {} knowledge file(s) for {}", ids.len(), org);

    let payload = webhook_payload(org, &registered);
    match n8n_client::notify_knowledge_base(webhook_url, &payload).await {
        Ok(()) => {
            let updated = run(move |conn| {
                knowledge_file::mark_all(conn, &ids, KnowledgeFileStatus::SentToWebhook, None)
            })
            .await?;
            json_response(
                StatusCode::OK,
                &RegisterResponse {
                    success: true,
                    files: updated,
                },
            )
        }
        Err(err) => {
            let reason = err.details().unwrap_or_else(|| err.to_string());
            warn!("Knowledge base webhook failed for {}: {}", org, reason);
            let marked = run(move |conn| {
                knowledge_file::mark_all(conn, &ids, KnowledgeFileStatus::Failed, Some(reason.as_str()))
            })
            .await;
            if let Err(mark_err) = marked {
                error!("Could not mark knowledge files as failed: {:?}", mark_err);
            }
            Err(err)
        }
    }
}

pub async fn list(req: Request) -> Result<Response, Error> {
    let org = org_id(&query_parse(&req))?;
    let files = run(move |conn| knowledge_file::list(conn, org)).await?;

    json_response(StatusCode::OK, &ListResponse { files })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        controller::{error_response, Body},
        model::{establish_connection, organization},
        test_util::{body_string, spawn_upstream},
        util::now,
    };
    use http::Method;
    use serde_json::json;

    fn register_call(org: Uuid) -> Request {
        ::http::Request::builder()
            .method(Method::POST)
            .uri("http://localhost/api/calls/knowledge-base-register")
            .body(Body::from(
                json!({
                    "user_id": org,
                    "files": [
                        {"file_name": "faq.pdf", "file_path": "temp/faq.pdf", "file_size": 1200},
                        {"file_name": "pricing.md", "file_path": "temp/pricing.md", "mime_type": "text/markdown"}
                    ]
                })
                .to_string(),
            ))
            .unwrap()
    }

    fn register_request(body: serde_json::Value) -> RegisterRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_validate() {
        let org = Uuid::new_v4();
        let (parsed_org, files) = validate(register_request(json!({
            "user_id": org,
            "files": [
                {"file_name": "faq.pdf", "file_path": "temp/faq.pdf", "file_size": 1200, "mime_type": "application/pdf"},
                {"file_name": " notes.txt ", "file_path": "temp/notes.txt"}
            ]
        })))
        .unwrap();
        assert_eq!(org, parsed_org);
        assert_eq!(2, files.len());
        assert_eq!("notes.txt", files[1].file_name);
        assert!(files.iter().all(|f| f.status == "uploaded_to_temp"));
        assert!(files.iter().all(|f| f.user_id == org));
    }

    #[test]
    fn test_validate_rejects() {
        let err = validate(register_request(json!({"files": []}))).unwrap_err();
        assert!(matches!(err, Error::ParamMissing(p) if p == "user_id"));

        let err = validate(register_request(json!({"user_id": Uuid::new_v4()}))).unwrap_err();
        assert!(matches!(err, Error::ParamMissing(p) if p == "files"));

        let err = validate(register_request(json!({
            "user_id": Uuid::new_v4(),
            "files": [{"file_name": "a.pdf", "file_path": "temp/a.pdf"}, {"file_name": "b.pdf"}]
        })))
        .unwrap_err();
        assert!(matches!(err, Error::ParamMissing(p) if p == "files[1].file_path"));

        let err = validate(register_request(json!({
            "user_id": Uuid::new_v4(),
            "files": [{"file_name": "a.pdf", "file_path": "temp/a.pdf", "file_size": -1}]
        })))
        .unwrap_err();
        assert!(matches!(err, Error::ParamError(_)));
    }

    #[test]
    fn test_webhook_payload() {
        let org = Uuid::new_v4();
        let registered = KnowledgeFile {
            id: Uuid::new_v4(),
            user_id: org,
            file_name: "faq.pdf".into(),
            file_path: "temp/faq.pdf".into(),
            file_size: Some(1200),
            mime_type: None,
            status: "uploaded_to_temp".into(),
            error_message: None,
            created_at: now(),
            updated_at: now(),
        };
        let payload = webhook_payload(org, &[registered.clone()]);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(json!(org), value["user_id"]);
        assert_eq!(json!(registered.id), value["files"][0]["id"]);
        assert_eq!(json!("temp/faq.pdf"), value["files"][0]["file_path"]);
    }

    #[tokio::test]
    async fn test_register_rejected_before_insert() {
        let req: Request = ::http::Request::builder()
            .method(Method::POST)
            .uri("http://localhost/api/calls/knowledge-base-register")
            .body(Body::from(json!({"user_id": Uuid::new_v4(), "files": []}).to_string()))
            .unwrap();
        let err = register(req).await.unwrap_err();
        assert_eq!(StatusCode::BAD_REQUEST, err.http_status());
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_register_webhook_accepted() {
        let org = organization::create_for_test(&mut establish_connection().unwrap(), "pro").unwrap();
        let webhook = spawn_upstream(StatusCode::OK, vec!["queued"]).await;

        let resp = register_with(register_call(org.id), &webhook.url).await.unwrap();
        assert_eq!(StatusCode::OK, resp.status());
        let body: RegisterResponse = serde_json::from_str(&body_string(resp.into_body()).await).unwrap();
        assert!(body.success);
        assert_eq!(2, body.files.len());

        let sent: serde_json::Value = serde_json::from_slice(&webhook.received()[0]).unwrap();
        assert_eq!(json!(org.id), sent["user_id"]);
        assert_eq!(2, sent["files"].as_array().unwrap().len());

        let stored = knowledge_file::list(&mut establish_connection().unwrap(), org.id).unwrap();
        assert_eq!(2, stored.len());
        assert!(stored.iter().all(|f| f.status == "sent_to_webhook"));
        assert!(stored.iter().all(|f| f.error_message.is_none()));
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_register_webhook_rejected() {
        let org = organization::create_for_test(&mut establish_connection().unwrap(), "free").unwrap();
        let webhook = spawn_upstream(StatusCode::INTERNAL_SERVER_ERROR, vec!["workflow inactive"]).await;

        let err = register_with(register_call(org.id), &webhook.url).await.unwrap_err();
        let resp = error_response(err);
        assert_eq!(StatusCode::BAD_GATEWAY, resp.status());
        let body: serde_json::Value = serde_json::from_str(&body_string(resp.into_body()).await).unwrap();
        assert!(body["error"].is_string());
        assert_eq!(json!("workflow inactive"), body["details"]);

        let stored = knowledge_file::list(&mut establish_connection().unwrap(), org.id).unwrap();
        assert_eq!(2, stored.len());
        assert!(stored.iter().all(|f| f.status == "failed"));
        assert!(stored
            .iter()
            .all(|f| f.error_message.as_deref() == Some("workflow inactive")));
    }
}
