//! Saved-resume persistence: metadata rows in Postgres, the document body as
//! a JSON snapshot in S3.

use anyhow::Result;
use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::resume::ResumeData;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavedResumeRow {
    pub id: Uuid,
    pub client_id: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub s3_key: String,
    pub payment_id: String,
    pub saved_at: DateTime<Utc>,
}

/// Stores a paid-for resume: snapshot to S3 first, then the metadata row.
pub async fn save_resume(
    pool: &PgPool,
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    client_id: &str,
    name: &str,
    payment_id: &str,
    document: &ResumeData,
) -> Result<SavedResumeRow> {
    let id = Uuid::new_v4();
    let saved_at = Utc::now();
    let s3_key = format!("resumes/{client_id}/{id}.json");

    let body = serde_json::to_vec(document)?;
    s3.put_object()
        .bucket(s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(body))
        .content_type("application/json")
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

    info!("Uploaded resume snapshot to s3://{}/{}", s3_bucket, s3_key);

    sqlx::query(
        "INSERT INTO saved_resumes (id, client_id, name, s3_key, payment_id, saved_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(id)
    .bind(client_id)
    .bind(name)
    .bind(&s3_key)
    .bind(payment_id)
    .bind(saved_at)
    .execute(pool)
    .await?;

    Ok(SavedResumeRow {
        id,
        client_id: client_id.to_string(),
        name: name.to_string(),
        s3_key,
        payment_id: payment_id.to_string(),
        saved_at,
    })
}

/// Lists a client's saved resumes, newest first.
pub async fn list_saved(pool: &PgPool, client_id: &str) -> Result<Vec<SavedResumeRow>> {
    Ok(sqlx::query_as::<_, SavedResumeRow>(
        "SELECT * FROM saved_resumes WHERE client_id = $1 ORDER BY saved_at DESC",
    )
    .bind(client_id)
    .fetch_all(pool)
    .await?)
}

pub async fn find_saved(
    pool: &PgPool,
    client_id: &str,
    id: Uuid,
) -> Result<Option<SavedResumeRow>> {
    Ok(sqlx::query_as::<_, SavedResumeRow>(
        "SELECT * FROM saved_resumes WHERE client_id = $1 AND id = $2",
    )
    .bind(client_id)
    .bind(id)
    .fetch_optional(pool)
    .await?)
}

/// Loads the document body for a saved resume from S3.
pub async fn load_document(
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    row: &SavedResumeRow,
) -> Result<ResumeData> {
    let object = s3
        .get_object()
        .bucket(s3_bucket)
        .key(&row.s3_key)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("S3 download failed: {e}"))?;
    let bytes = object
        .body
        .collect()
        .await
        .map_err(|e| anyhow::anyhow!("S3 body read failed: {e}"))?
        .into_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

/// Deletes a saved resume row and its snapshot.
pub async fn delete_saved(
    pool: &PgPool,
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    row: &SavedResumeRow,
) -> Result<()> {
    s3.delete_object()
        .bucket(s3_bucket)
        .key(&row.s3_key)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("S3 delete failed: {e}"))?;

    sqlx::query("DELETE FROM saved_resumes WHERE id = $1")
        .bind(row.id)
        .execute(pool)
        .await?;

    info!("Deleted saved resume {}", row.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_serialization_hides_s3_key() {
        let row = SavedResumeRow {
            id: Uuid::nil(),
            client_id: "c1".into(),
            name: "Meu Currículo".into(),
            s3_key: "resumes/c1/x.json".into(),
            payment_id: "123".into(),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("s3Key").is_none());
        assert_eq!(json["clientId"], "c1");
        assert_eq!(json["paymentId"], "123");
    }
}
