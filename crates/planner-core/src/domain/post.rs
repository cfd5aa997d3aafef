use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Post entity - a single planned or published social media content item.
///
/// `platform` and `status` are open string sets: the backend stores whatever
/// casing the client sent and folds case only when grouping for display
/// (see [`crate::stats`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub platform: String,
    pub status: String,
    #[serde(default)]
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub engagement_score: i32,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Assigned by the backend on insert; records ingested from elsewhere
    /// may lack it, so aggregation treats it as optional.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new post with a fresh id and creation timestamp.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        platform: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            platform: platform.into(),
            status: status.into(),
            scheduled_time: None,
            engagement_score: 0,
            image_url: None,
            created_at: Some(Utc::now()),
        }
    }

    /// Validate the fields a post must carry to be persisted.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".into()));
        }
        if self.content.trim().is_empty() {
            return Err(DomainError::Validation("content must not be empty".into()));
        }
        if self.platform.trim().is_empty() {
            return Err(DomainError::Validation("platform must not be empty".into()));
        }
        Ok(())
    }
}
