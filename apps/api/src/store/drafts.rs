//! In-progress draft persistence, keyed by anonymous client id in Redis.
//!
//! A draft is the wizard's full working state; it is overwritten on every
//! autosave and deleted once the resume is saved for good.

use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::resume::ResumeData;

/// Drafts older than 30 days are dropped by Redis.
const DRAFT_TTL_SECONDS: u64 = 60 * 60 * 24 * 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Draft {
    pub resume_data: ResumeData,
    pub current_step: u32,
    pub is_finished: bool,
}

fn draft_key(client_id: &str) -> String {
    format!("draft:{client_id}")
}

pub async fn save_draft(
    redis: &redis::Client,
    client_id: &str,
    draft: &Draft,
) -> anyhow::Result<()> {
    let mut con = redis.get_multiplexed_async_connection().await?;
    let payload = serde_json::to_string(draft)?;
    let _: () = con
        .set_ex(draft_key(client_id), payload, DRAFT_TTL_SECONDS)
        .await?;
    debug!(client_id, "draft saved");
    Ok(())
}

pub async fn load_draft(
    redis: &redis::Client,
    client_id: &str,
) -> anyhow::Result<Option<Draft>> {
    let mut con = redis.get_multiplexed_async_connection().await?;
    let payload: Option<String> = con.get(draft_key(client_id)).await?;
    match payload {
        Some(p) => Ok(Some(serde_json::from_str(&p)?)),
        None => Ok(None),
    }
}

pub async fn delete_draft(redis: &redis::Client, client_id: &str) -> anyhow::Result<()> {
    let mut con = redis.get_multiplexed_async_connection().await?;
    let _: () = con.del(draft_key(client_id)).await?;
    debug!(client_id, "draft deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_key_format() {
        assert_eq!(draft_key("abc-123"), "draft:abc-123");
    }

    #[test]
    fn test_draft_wire_format() {
        let draft = Draft {
            current_step: 3,
            is_finished: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["currentStep"], 3);
        assert_eq!(json["isFinished"], true);
        assert!(json["resumeData"].is_object());
    }
}
