//! HTTP handlers and route configuration.

mod analytics;
mod health;
mod posts;
mod third_party;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health/", web::get().to(health::health_check))
            // Post resource + derived views
            .service(
                web::scope("/posts")
                    .route("/analytics/", web::get().to(analytics::analytics))
                    .route("/random_quote/", web::get().to(third_party::random_quote))
                    .route("/fetch_image/", web::get().to(third_party::fetch_image))
                    .route("/", web::get().to(posts::list))
                    .route("/", web::post().to(posts::create))
                    .route("/{id}/", web::get().to(posts::get))
                    .route("/{id}/", web::put().to(posts::update))
                    .route("/{id}/", web::delete().to(posts::remove)),
            ),
    );
}
