//! CRUD handlers for the post resource.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use planner_core::domain::Post;
use planner_shared::dto::{PostPayload, PostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

/// GET /api/posts/ - all posts, newest first. `?search=` filters on
/// title/content.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let posts = match query.search.as_deref() {
        Some(q) if !q.trim().is_empty() => state.posts.search(q.trim()).await?,
        _ => state.posts.list_recent().await?,
    };

    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts/ - create a post.
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner();

    let mut post = Post::new(
        payload.title,
        payload.content,
        payload.platform,
        payload.status,
    );
    post.scheduled_time = payload.scheduled_time;
    post.engagement_score = payload.engagement_score;
    post.image_url = payload.image_url;

    post.validate()?;
    let saved = state.posts.save(post).await?;

    tracing::info!(post_id = %saved.id, platform = %saved.platform, "Post created");
    Ok(HttpResponse::Created().json(to_response(saved)))
}

/// GET /api/posts/{id}/ - fetch one post.
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PUT /api/posts/{id}/ - full update. Id and creation timestamp are kept
/// from the stored record.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let existing = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    let payload = body.into_inner();
    let updated = Post {
        id: existing.id,
        title: payload.title,
        content: payload.content,
        platform: payload.platform,
        status: payload.status,
        scheduled_time: payload.scheduled_time,
        engagement_score: payload.engagement_score,
        image_url: payload.image_url,
        created_at: existing.created_at,
    };

    updated.validate()?;
    let saved = state.posts.save(updated).await?;

    Ok(HttpResponse::Ok().json(to_response(saved)))
}

/// DELETE /api/posts/{id}/ - remove a post.
pub async fn remove(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;

    tracing::info!(post_id = %id, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}

pub(crate) fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        platform: post.platform,
        status: post.status,
        scheduled_time: post.scheduled_time,
        engagement_score: post.engagement_score,
        image_url: post.image_url,
        created_at: post.created_at,
    }
}
