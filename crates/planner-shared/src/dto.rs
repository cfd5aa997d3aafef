//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Request body for creating or fully updating a post.
///
/// Form clients submit blank strings for fields they left empty, so
/// `scheduled_time` and `engagement_score` accept `""`/`null`/absent and
/// coerce them to their defaults instead of rejecting the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPayload {
    pub title: String,
    pub content: String,
    pub platform: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub engagement_score: i32,
    #[serde(default, deserialize_with = "empty_string_opt")]
    pub image_url: Option<String>,
}

fn default_status() -> String {
    "Draft".to_string()
}

/// A post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub platform: String,
    pub status: String,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub engagement_score: i32,
    pub image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// One platform bucket in the analytics response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformStat {
    pub platform: String,
    pub count: u64,
}

/// One status bucket in the analytics response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusStat {
    pub status: String,
    pub count: u64,
}

/// Mean engagement per platform in the analytics response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementStat {
    pub platform: String,
    pub avg_engagement: f64,
}

/// Compact "latest post" card for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestPostSummary {
    pub id: Uuid,
    pub title: String,
    pub platform: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Derived statistics for the dashboard and reports views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub total_posts: u64,
    pub platforms_used: u64,
    pub total_engagement: i64,
    pub platform_stats: Vec<PlatformStat>,
    pub status_stats: Vec<StatusStat>,
    pub engagement_stats: Vec<EngagementStat>,
    pub latest_post: Option<LatestPostSummary>,
}

/// Response from the random-quote proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub content: String,
    pub author: String,
}

/// Response from the image-search proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    pub url: String,
}

/// `""` and `null` both mean "no timestamp".
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => match parse_datetime(s.trim()) {
            Some(dt) => Ok(Some(dt)),
            None => Err(DeError::custom(format!("invalid datetime: {s}"))),
        },
    }
}

/// RFC 3339, or the offset-less `datetime-local` values HTML forms submit
/// (treated as UTC).
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = s.parse::<DateTime<Utc>>() {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// `""` and `null` both mean "no value".
fn empty_string_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

/// Accept a number, `null`, `""`, or a numeric string; anything blank
/// becomes 0.
fn blank_as_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(0),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(0),
        Some(serde_json::Value::String(s)) => s.trim().parse().map_err(DeError::custom),
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| DeError::custom("engagement_score out of range")),
        Some(other) => Err(DeError::custom(format!(
            "invalid engagement_score: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_scheduled_time_and_score_are_coerced() {
        let payload: PostPayload = serde_json::from_str(
            r#"{
                "title": "Launch",
                "content": "Going live",
                "platform": "Instagram",
                "status": "Scheduled",
                "scheduled_time": "",
                "engagement_score": ""
            }"#,
        )
        .unwrap();

        assert_eq!(payload.scheduled_time, None);
        assert_eq!(payload.engagement_score, 0);
    }

    #[test]
    fn missing_optional_fields_default() {
        let payload: PostPayload = serde_json::from_str(
            r#"{"title": "T", "content": "C", "platform": "twitter"}"#,
        )
        .unwrap();

        assert_eq!(payload.status, "Draft");
        assert_eq!(payload.engagement_score, 0);
        assert!(payload.scheduled_time.is_none());
        assert!(payload.image_url.is_none());
    }

    #[test]
    fn real_values_pass_through() {
        let payload: PostPayload = serde_json::from_str(
            r#"{
                "title": "T",
                "content": "C",
                "platform": "linkedin",
                "status": "Published",
                "scheduled_time": "2026-08-30T12:00:00Z",
                "engagement_score": 42,
                "image_url": "https://example.com/a.jpg"
            }"#,
        )
        .unwrap();

        assert_eq!(payload.engagement_score, 42);
        assert!(payload.scheduled_time.is_some());
        assert_eq!(payload.image_url.as_deref(), Some("https://example.com/a.jpg"));
    }

    #[test]
    fn datetime_local_without_offset_parses_as_utc() {
        let payload: PostPayload = serde_json::from_str(
            r#"{
                "title": "T",
                "content": "C",
                "platform": "instagram",
                "scheduled_time": "2026-08-30T12:00"
            }"#,
        )
        .unwrap();

        assert_eq!(
            payload.scheduled_time,
            Some("2026-08-30T12:00:00Z".parse::<DateTime<Utc>>().unwrap())
        );
    }

    #[test]
    fn garbage_scheduled_time_is_rejected() {
        let result = serde_json::from_str::<PostPayload>(
            r#"{"title": "T", "content": "C", "platform": "x", "scheduled_time": "not-a-date"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn numeric_string_score_parses() {
        let payload: PostPayload = serde_json::from_str(
            r#"{"title": "T", "content": "C", "platform": "x", "engagement_score": "17"}"#,
        )
        .unwrap();
        assert_eq!(payload.engagement_score, 17);
    }
}
