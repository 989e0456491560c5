//! Route configuration
//!
//! Public routes are registered before the JWT-wrapped scope so that
//! unauthenticated reads (stream detail, course reviews) stay open.

use crate::handlers;
use crate::middleware::JwtAuthMiddleware;
use actix_web::web;

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health::health_check))
        .configure(courses)
        .configure(streams);
}

fn courses(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/courses")
            .route(
                "/{id}/reviews",
                web::get().to(handlers::courses::list_reviews),
            )
            .service(
                web::scope("")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::post().to(handlers::courses::create_course))
                    .route("", web::get().to(handlers::courses::list_courses))
                    .route("/{id}", web::get().to(handlers::courses::get_course))
                    .route("/{id}", web::put().to(handlers::courses::update_course))
                    .route(
                        "/{id}/reviews",
                        web::post().to(handlers::courses::create_review),
                    ),
            ),
    );
}

fn streams(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/streams")
            .route("/{id}", web::get().to(handlers::streams::get_stream))
            .service(
                web::scope("")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::post().to(handlers::streams::create_stream))
                    .route("", web::get().to(handlers::streams::list_streams))
                    .route("/{id}", web::put().to(handlers::streams::update_stream))
                    .route("/{id}", web::delete().to(handlers::streams::delete_stream))
                    .route(
                        "/{id}/participate",
                        web::post().to(handlers::streams::join_stream),
                    ),
            ),
    );
}
