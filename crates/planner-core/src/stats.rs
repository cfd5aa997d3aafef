//! Derived statistics over a snapshot of posts.
//!
//! Everything in this module is pure and synchronous: functions take a slice
//! of [`Post`] records, never mutate or retain them, and return fresh values.
//! Missing data (absent platform, absent score, empty input) is treated as
//! degenerate-but-valid, never as an error. The stats are recomputed on every
//! request and live only as long as one response.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Post;

/// Bucket for posts whose platform is missing or blank.
pub const UNKNOWN_PLATFORM: &str = "Unknown";

/// Bucket for posts whose status is missing or blank. Status keys are
/// lower-case folded, so the sentinel follows the same convention.
pub const UNKNOWN_STATUS: &str = "unknown";

/// A grouping key with the number of posts that fell into it.
///
/// Buckets are emitted in insertion order of first occurrence, which is the
/// order charts render them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCount {
    pub name: String,
    pub count: u64,
}

/// Mean engagement score for one platform bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementAverage {
    pub platform: String,
    pub average: f64,
}

/// Headline counters for the dashboard stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub total_posts: u64,
    pub distinct_platforms: u64,
}

/// Everything the dashboard and reports views derive from one post snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_posts: u64,
    pub distinct_platforms: u64,
    pub total_engagement: i64,
    pub platform_counts: Vec<BucketCount>,
    pub status_counts: Vec<BucketCount>,
    pub engagement_by_platform: Vec<EngagementAverage>,
    pub latest_post: Option<Post>,
}

/// Fold a platform name to its canonical display form: first codepoint
/// upper-cased, the rest lower-cased, so `instagram` and `INSTAGRAM` land in
/// the same bucket. Blank input maps to [`UNKNOWN_PLATFORM`].
pub fn normalize_platform(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNKNOWN_PLATFORM.to_string();
    }
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => UNKNOWN_PLATFORM.to_string(),
    }
}

/// Fold a status to its canonical lower-case form. Blank input maps to
/// [`UNKNOWN_STATUS`].
pub fn normalize_status(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNKNOWN_STATUS.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

/// Total post count plus the number of distinct normalized platforms.
/// Empty input yields zeros.
pub fn compute_totals(posts: &[Post]) -> Totals {
    let platforms: HashSet<String> = posts
        .iter()
        .map(|p| normalize_platform(&p.platform))
        .collect();

    Totals {
        total_posts: posts.len() as u64,
        distinct_platforms: platforms.len() as u64,
    }
}

/// Count posts per normalized platform. Every post lands in exactly one
/// bucket, so the bucket counts always sum to the input length.
pub fn group_by_platform(posts: &[Post]) -> Vec<BucketCount> {
    count_by(posts, |p| normalize_platform(&p.platform))
}

/// Count posts per normalized status. Same bucketing policy as
/// [`group_by_platform`].
pub fn group_by_status(posts: &[Post]) -> Vec<BucketCount> {
    count_by(posts, |p| normalize_status(&p.status))
}

/// Pick the most recent post: maximum `created_at`, missing timestamps
/// losing to any present one, ties broken by the highest id. The input
/// order is deliberately ignored so a change in backend ordering cannot
/// silently change the answer. Returns `None` for an empty snapshot;
/// callers render a placeholder.
pub fn select_latest(posts: &[Post]) -> Option<&Post> {
    posts.iter().max_by_key(|p| recency_key(p))
}

fn recency_key(post: &Post) -> (Option<DateTime<Utc>>, Uuid) {
    // None < Some(_) under Option's ordering, so timestamp-less posts
    // only win when nothing else is available.
    (post.created_at, post.id)
}

/// Arithmetic mean of `engagement_score` per normalized platform bucket.
/// A bucket only exists once a post has landed in it, so the divisor is
/// never zero.
pub fn average_engagement_by_platform(posts: &[Post]) -> Vec<EngagementAverage> {
    let mut sums: Vec<(String, i64, u64)> = Vec::new();

    for post in posts {
        let name = normalize_platform(&post.platform);
        match sums.iter_mut().find(|(bucket, _, _)| *bucket == name) {
            Some((_, sum, count)) => {
                *sum += i64::from(post.engagement_score);
                *count += 1;
            }
            None => sums.push((name, i64::from(post.engagement_score), 1)),
        }
    }

    sums.into_iter()
        .map(|(platform, sum, count)| EngagementAverage {
            platform,
            average: sum as f64 / count as f64,
        })
        .collect()
}

/// Truncate to at most `max_len` codepoints, appending an ellipsis when
/// anything was cut. Operates on chars rather than bytes so multi-byte
/// text is never split mid-character.
pub fn truncate_for_display(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_len).collect();
    truncated.push('…');
    truncated
}

/// Run the whole engine over one snapshot. This is what the analytics
/// endpoint serves.
pub fn aggregate(posts: &[Post]) -> AggregateStats {
    let totals = compute_totals(posts);

    AggregateStats {
        total_posts: totals.total_posts,
        distinct_platforms: totals.distinct_platforms,
        total_engagement: posts.iter().map(|p| i64::from(p.engagement_score)).sum(),
        platform_counts: group_by_platform(posts),
        status_counts: group_by_status(posts),
        engagement_by_platform: average_engagement_by_platform(posts),
        latest_post: select_latest(posts).cloned(),
    }
}

fn count_by<F>(posts: &[Post], key: F) -> Vec<BucketCount>
where
    F: Fn(&Post) -> String,
{
    // Vec over a map keeps first-occurrence order; bucket cardinality is a
    // handful of platforms/statuses, so the linear probe is fine.
    let mut buckets: Vec<BucketCount> = Vec::new();

    for post in posts {
        let name = key(post);
        match buckets.iter_mut().find(|b| b.name == name) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(BucketCount { name, count: 1 }),
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(platform: &str, status: &str) -> Post {
        Post::new("title", "content", platform, status)
    }

    fn post_at(platform: &str, ts: Option<DateTime<Utc>>) -> Post {
        let mut p = post(platform, "Published");
        p.created_at = ts;
        p
    }

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn totals_on_empty_input_are_zero() {
        let totals = compute_totals(&[]);
        assert_eq!(totals.total_posts, 0);
        assert_eq!(totals.distinct_platforms, 0);
        assert!(group_by_platform(&[]).is_empty());
        assert!(group_by_status(&[]).is_empty());
        assert!(average_engagement_by_platform(&[]).is_empty());
    }

    #[test]
    fn case_variants_collapse_into_one_bucket() {
        // Scenario from the dashboard: mixed-case platform strings.
        let posts = vec![
            post("Instagram", "draft"),
            post("instagram", "published"),
            post("Facebook", "draft"),
        ];

        let platforms = group_by_platform(&posts);
        assert_eq!(
            platforms,
            vec![
                BucketCount { name: "Instagram".into(), count: 2 },
                BucketCount { name: "Facebook".into(), count: 1 },
            ]
        );

        let statuses = group_by_status(&posts);
        assert_eq!(
            statuses,
            vec![
                BucketCount { name: "draft".into(), count: 2 },
                BucketCount { name: "published".into(), count: 1 },
            ]
        );

        let totals = compute_totals(&posts);
        assert_eq!(totals.total_posts, 3);
        assert_eq!(totals.distinct_platforms, 2);
    }

    #[test]
    fn bucket_counts_sum_to_input_length() {
        let posts = vec![
            post("twitter", "Draft"),
            post("TWITTER", "Scheduled"),
            post("LinkedIn", "Published"),
            post("", "Draft"),
            post("facebook", ""),
        ];

        let platform_sum: u64 = group_by_platform(&posts).iter().map(|b| b.count).sum();
        let status_sum: u64 = group_by_status(&posts).iter().map(|b| b.count).sum();
        assert_eq!(platform_sum, posts.len() as u64);
        assert_eq!(status_sum, posts.len() as u64);
    }

    #[test]
    fn blank_fields_land_in_unknown_buckets() {
        let posts = vec![post("", "  "), post("   ", "draft")];

        let platforms = group_by_platform(&posts);
        assert_eq!(platforms.len(), 1);
        assert_eq!(platforms[0].name, UNKNOWN_PLATFORM);
        assert_eq!(platforms[0].count, 2);

        let statuses = group_by_status(&posts);
        assert_eq!(statuses[0].name, UNKNOWN_STATUS);
    }

    #[test]
    fn grouping_preserves_first_occurrence_order() {
        let posts = vec![
            post("linkedin", "draft"),
            post("Instagram", "draft"),
            post("LinkedIn", "draft"),
            post("facebook", "draft"),
        ];

        let buckets = group_by_platform(&posts);
        let names: Vec<&str> = buckets.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Linkedin", "Instagram", "Facebook"]);
    }

    #[test]
    fn select_latest_on_empty_is_none() {
        assert!(select_latest(&[]).is_none());
    }

    #[test]
    fn select_latest_ignores_input_order() {
        let oldest = post_at("Instagram", Some(ts(1_000)));
        let newest = post_at("Facebook", Some(ts(3_000)));
        let middle = post_at("Twitter", Some(ts(2_000)));

        let forward = vec![oldest.clone(), newest.clone(), middle.clone()];
        let backward = vec![middle, oldest, newest.clone()];

        assert_eq!(select_latest(&forward).unwrap().id, newest.id);
        assert_eq!(select_latest(&backward).unwrap().id, newest.id);
    }

    #[test]
    fn select_latest_sorts_missing_timestamps_last() {
        let dated = post_at("Instagram", Some(ts(5)));
        let undated = post_at("Facebook", None);

        let posts = vec![undated.clone(), dated.clone()];
        assert_eq!(select_latest(&posts).unwrap().id, dated.id);

        // With nothing dated, an undated post still wins over no post at all.
        let only_undated = vec![undated.clone()];
        assert_eq!(select_latest(&only_undated).unwrap().id, undated.id);
    }

    #[test]
    fn select_latest_breaks_timestamp_ties_by_highest_id() {
        let mut a = post_at("Instagram", Some(ts(42)));
        let mut b = post_at("Facebook", Some(ts(42)));
        a.id = Uuid::from_u128(1);
        b.id = Uuid::from_u128(2);

        let posts = vec![b.clone(), a];
        assert_eq!(select_latest(&posts).unwrap().id, b.id);
    }

    #[test]
    fn single_post_average_is_its_score() {
        let mut p = post("Instagram", "published");
        p.engagement_score = 37;

        let averages = average_engagement_by_platform(&[p]);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].platform, "Instagram");
        assert_eq!(averages[0].average, 37.0);
    }

    #[test]
    fn averages_fold_case_variants_together() {
        let mut a = post("instagram", "published");
        a.engagement_score = 10;
        let mut b = post("Instagram", "published");
        b.engagement_score = 20;

        let averages = average_engagement_by_platform(&[a, b]);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].average, 15.0);
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate_for_display("hi", 5), "hi");
        assert_eq!(truncate_for_display("hello", 5), "hello");
    }

    #[test]
    fn truncate_cuts_and_appends_ellipsis() {
        assert_eq!(truncate_for_display("hello world", 5), "hello…");
    }

    #[test]
    fn truncate_counts_codepoints_not_bytes() {
        // Each of these is multiple bytes in UTF-8; byte slicing would panic
        // or corrupt the string.
        assert_eq!(truncate_for_display("héllo wörld", 5), "héllo…");
        assert_eq!(truncate_for_display("日本語のタイトル", 3), "日本語…");
        assert_eq!(truncate_for_display("日本語", 3), "日本語");
    }

    #[test]
    fn aggregate_composes_all_stats() {
        let mut a = post("Instagram", "Draft");
        a.engagement_score = 10;
        a.created_at = Some(ts(100));
        let mut b = post("instagram", "Published");
        b.engagement_score = 30;
        b.created_at = Some(ts(200));
        let mut c = post("Facebook", "Draft");
        c.engagement_score = 5;
        c.created_at = Some(ts(50));

        let stats = aggregate(&[a, b.clone(), c]);

        assert_eq!(stats.total_posts, 3);
        assert_eq!(stats.distinct_platforms, 2);
        assert_eq!(stats.total_engagement, 45);
        assert_eq!(stats.platform_counts[0].name, "Instagram");
        assert_eq!(stats.platform_counts[0].count, 2);
        assert_eq!(stats.status_counts[0].name, "draft");
        assert_eq!(stats.status_counts[0].count, 2);
        assert_eq!(stats.latest_post.unwrap().id, b.id);
        assert_eq!(stats.engagement_by_platform[0].average, 20.0);
    }

    #[test]
    fn aggregate_on_empty_snapshot() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_posts, 0);
        assert_eq!(stats.total_engagement, 0);
        assert!(stats.platform_counts.is_empty());
        assert!(stats.latest_post.is_none());
    }
}
