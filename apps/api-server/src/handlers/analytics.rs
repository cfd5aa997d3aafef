//! Analytics endpoint - runs the aggregation engine over a post snapshot.

use actix_web::{HttpResponse, web};

use planner_core::stats::{self, AggregateStats};
use planner_shared::dto::{
    AnalyticsResponse, EngagementStat, LatestPostSummary, PlatformStat, StatusStat,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Codepoint budget for the dashboard's "latest post" stat card.
const LATEST_TITLE_MAX_LEN: usize = 15;

/// GET /api/posts/analytics/
///
/// Stats are derived fresh from the current snapshot on every call; nothing
/// is cached between requests.
pub async fn analytics(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    let stats = stats::aggregate(&posts);

    Ok(HttpResponse::Ok().json(to_response(stats)))
}

fn to_response(stats: AggregateStats) -> AnalyticsResponse {
    AnalyticsResponse {
        total_posts: stats.total_posts,
        platforms_used: stats.distinct_platforms,
        total_engagement: stats.total_engagement,
        platform_stats: stats
            .platform_counts
            .into_iter()
            .map(|b| PlatformStat {
                platform: b.name,
                count: b.count,
            })
            .collect(),
        status_stats: stats
            .status_counts
            .into_iter()
            .map(|b| StatusStat {
                status: b.name,
                count: b.count,
            })
            .collect(),
        engagement_stats: stats
            .engagement_by_platform
            .into_iter()
            .map(|e| EngagementStat {
                platform: e.platform,
                avg_engagement: e.average,
            })
            .collect(),
        latest_post: stats.latest_post.map(|post| LatestPostSummary {
            id: post.id,
            title: stats::truncate_for_display(&post.title, LATEST_TITLE_MAX_LEN),
            platform: stats::normalize_platform(&post.platform),
            created_at: post.created_at,
        }),
    }
}
