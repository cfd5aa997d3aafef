//! Proxies for the third-party APIs the planner UI consumes directly.

use std::time::Duration;

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use planner_shared::dto::{ImageResponse, QuoteResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_IMAGE_QUERY: &str = "social media";

/// Canned quotes served when every upstream quote API is down. The UI always
/// gets something to render.
const FALLBACK_QUOTES: &[(&str, &str)] = &[
    (
        "The best time to plant a tree was 20 years ago. The second best time is now.",
        "Chinese Proverb",
    ),
    ("Great things never come from comfort zones.", "Unknown"),
    (
        "Success doesn't just find you. You have to go out and get it.",
        "Unknown",
    ),
    ("Dream it. Wish it. Do it.", "Unknown"),
];

#[derive(Debug, Deserialize)]
struct QuotableQuote {
    content: String,
    #[serde(default)]
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ZenQuote {
    q: String,
    #[serde(default)]
    a: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    query: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    urls: UnsplashUrls,
}

/// GET /api/posts/random_quote/
///
/// Tries quotable.io, then zenquotes.io, then the built-in list. This
/// endpoint never fails.
pub async fn random_quote(state: web::Data<AppState>) -> HttpResponse {
    match fetch_quotable(&state.http).await {
        Ok(quote) => return HttpResponse::Ok().json(quote),
        Err(e) => tracing::debug!("quotable.io failed: {}", e),
    }

    match fetch_zenquotes(&state.http).await {
        Ok(quote) => return HttpResponse::Ok().json(quote),
        Err(e) => tracing::debug!("zenquotes.io failed: {}", e),
    }

    tracing::warn!("All quote APIs unavailable, serving built-in quote");
    HttpResponse::Ok().json(builtin_quote())
}

/// GET /api/posts/fetch_image/?query=
///
/// Unsplash random-photo proxy. Requires `UNSPLASH_ACCESS_KEY`.
pub async fn fetch_image(
    state: web::Data<AppState>,
    query: web::Query<ImageQuery>,
) -> AppResult<HttpResponse> {
    let access_key = state
        .unsplash_access_key
        .as_deref()
        .ok_or_else(|| AppError::Internal("Unsplash API key not configured".to_string()))?;

    let search = query
        .query
        .as_deref()
        .filter(|q| !q.trim().is_empty())
        .unwrap_or(DEFAULT_IMAGE_QUERY);

    let photo: UnsplashPhoto = state
        .http
        .get("https://api.unsplash.com/photos/random")
        .query(&[("query", search), ("client_id", access_key)])
        .timeout(UPSTREAM_TIMEOUT)
        .send()
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?
        .error_for_status()
        .map_err(|e| AppError::Upstream(e.to_string()))?
        .json()
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ImageResponse {
        url: photo.urls.regular,
    }))
}

async fn fetch_quotable(client: &reqwest::Client) -> Result<QuoteResponse, reqwest::Error> {
    let quote: QuotableQuote = client
        .get("https://api.quotable.io/random")
        .timeout(UPSTREAM_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(QuoteResponse {
        content: quote.content,
        author: quote.author.unwrap_or_else(|| "Unknown".to_string()),
    })
}

async fn fetch_zenquotes(client: &reqwest::Client) -> Result<QuoteResponse, reqwest::Error> {
    // zenquotes wraps the quote in a one-element array.
    let quotes: Vec<ZenQuote> = client
        .get("https://zenquotes.io/api/random")
        .timeout(UPSTREAM_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    match quotes.into_iter().next() {
        Some(quote) => Ok(QuoteResponse {
            content: quote.q,
            author: quote.a.unwrap_or_else(|| "Unknown".to_string()),
        }),
        None => Ok(builtin_quote()),
    }
}

fn builtin_quote() -> QuoteResponse {
    // Rotate through the canned list without dragging in an RNG.
    let index = chrono::Utc::now().timestamp_subsec_nanos() as usize % FALLBACK_QUOTES.len();
    let (content, author) = FALLBACK_QUOTES[index];

    QuoteResponse {
        content: content.to_string(),
        author: author.to_string(),
    }
}
