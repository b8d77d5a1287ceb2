mod tests;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use crate::{
    error::Error,
    schema::calls_knowledge_files,
    schema::calls_knowledge_files::dsl::*,
    util::now,
};

/// Where a knowledge-base file is in the register-then-notify flow.
#[derive(Display, EnumString, Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeFileStatus {
    /// Row inserted, object sits in temp storage, webhook not called yet.
    UploadedToTemp,
    SentToWebhook,
    Failed,
}

#[derive(Identifiable, Queryable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = calls_knowledge_files)]
pub struct KnowledgeFile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = calls_knowledge_files)]
pub struct NewKnowledgeFile {
    pub user_id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub status: String,
}

impl NewKnowledgeFile {
    pub fn uploaded(
        org_id: Uuid,
        name: String,
        path: String,
        size: Option<i64>,
        mime: Option<String>,
    ) -> Self {
        Self {
            user_id: org_id,
            file_name: name,
            file_path: path,
            file_size: size,
            mime_type: mime,
            status: KnowledgeFileStatus::UploadedToTemp.to_string(),
        }
    }
}

/// Insert tracking rows, all in `uploaded_to_temp`.
pub fn insert_uploaded(
    conn: &mut PgConnection,
    files: &[NewKnowledgeFile],
) -> Result<Vec<KnowledgeFile>, Error> {
    diesel::insert_into(calls_knowledge_files::table)
        .values(files)
        .get_results(conn)
        .map_err(|e| e.into())
}

/// Move every given row to `new_status`. `error` is stored as-is (clears
/// a previous message when `None`).
pub fn mark_all(
    conn: &mut PgConnection,
    ids: &[Uuid],
    new_status: KnowledgeFileStatus,
    error: Option<&str>,
) -> Result<Vec<KnowledgeFile>, Error> {
    diesel::update(calls_knowledge_files.filter(id.eq_any(ids.to_vec())))
        .set((
            status.eq(new_status.to_string()),
            error_message.eq(error),
            updated_at.eq(now()),
        ))
        .get_results(conn)
        .map_err(|e| e.into())
}

/// Knowledge base of an org, newest first.
pub fn list(conn: &mut PgConnection, org_id: Uuid) -> Result<Vec<KnowledgeFile>, Error> {
    calls_knowledge_files
        .filter(user_id.eq(org_id))
        .order(created_at.desc())
        .load(conn)
        .map_err(|e| e.into())
}
