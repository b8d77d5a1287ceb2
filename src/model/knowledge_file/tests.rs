#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::{
        error::Error,
        model::{
            establish_connection,
            knowledge_file::{self, KnowledgeFileStatus, NewKnowledgeFile},
            organization,
        },
    };

    #[test]
    fn test_status_names() {
        assert_eq!("uploaded_to_temp", KnowledgeFileStatus::UploadedToTemp.to_string());
        assert_eq!("sent_to_webhook", KnowledgeFileStatus::SentToWebhook.to_string());
        assert_eq!(
            KnowledgeFileStatus::Failed,
            KnowledgeFileStatus::from_str("failed").unwrap()
        );
        assert_eq!(
            "\"sent_to_webhook\"",
            serde_json::to_string(&KnowledgeFileStatus::SentToWebhook).unwrap()
        );
    }

    #[test]
    #[ignore = "requires DATABASE_URL"]
    fn test_insert_then_mark() -> Result<(), Error> {
        let mut conn = establish_connection()?;
        let org = organization::create_for_test(&mut conn, "pro")?;
        let inserted = knowledge_file::insert_uploaded(
            &mut conn,
            &[
                NewKnowledgeFile::uploaded(org.id, "a.pdf".into(), "temp/a.pdf".into(), Some(10), None),
                NewKnowledgeFile::uploaded(org.id, "b.txt".into(), "temp/b.txt".into(), None, Some("text/plain".into())),
            ],
        )?;
        assert_eq!(2, inserted.len());
        assert!(inserted.iter().all(|f| f.status == "uploaded_to_temp"));

        let ids: Vec<_> = inserted.iter().map(|f| f.id).collect();
        let failed = knowledge_file::mark_all(&mut conn, &ids, KnowledgeFileStatus::Failed, Some("timeout"))?;
        assert!(failed.iter().all(|f| f.status == "failed"));
        assert!(failed.iter().all(|f| f.error_message.as_deref() == Some("timeout")));

        let listed = knowledge_file::list(&mut conn, org.id)?;
        assert_eq!(2, listed.len());
        Ok(())
    }
}
