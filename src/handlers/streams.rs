/// Stream handlers - HTTP endpoints for stream lifecycle and enrollment
use crate::error::Result;
use crate::middleware::UserId;
use crate::pagination::PageQuery;
use crate::services::streams::{CreateStream, StreamService, UpdateStream};
use crate::services::EnrollmentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

/// Request body for creating a stream
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStreamRequest {
    #[validate(range(min = 1))]
    pub course_id: i64,
    #[validate(custom(function = "crate::validators::not_blank"))]
    pub name: String,
    #[validate(custom(function = "crate::validators::not_blank"))]
    pub description: String,
    #[validate(range(min = 0))]
    pub total_cost: i64,
    #[validate(range(min = 2, max = 100))]
    pub min_participants: i32,
    #[validate(range(min = 2, max = 100))]
    pub max_participants: i32,
    #[validate(range(min = 1))]
    pub duration_weeks: i32,
    #[validate(custom(function = "crate::validators::not_blank"))]
    pub schedule: String,
}

/// Request body for updating a stream; absent fields stay unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateStreamRequest {
    #[validate(custom(function = "crate::validators::not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "crate::validators::not_blank"))]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub total_cost: Option<i64>,
    #[validate(range(min = 2, max = 100))]
    pub min_participants: Option<i32>,
    #[validate(range(min = 2, max = 100))]
    pub max_participants: Option<i32>,
    #[validate(range(min = 1))]
    pub duration_weeks: Option<i32>,
    #[validate(custom(function = "crate::validators::not_blank"))]
    pub schedule: Option<String>,
    pub has_started: Option<bool>,
}

/// POST /streams
pub async fn create_stream(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<CreateStreamRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = StreamService::new((**pool).clone());
    let req = req.into_inner();
    let view = service
        .create_stream(
            user.0,
            CreateStream {
                course_id: req.course_id,
                name: req.name,
                description: req.description,
                total_cost: req.total_cost,
                min_participants: req.min_participants,
                max_participants: req.max_participants,
                duration_weeks: req.duration_weeks,
                schedule: req.schedule,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(view))
}

/// GET /streams?page&per_page
pub async fn list_streams(
    pool: web::Data<PgPool>,
    _user: UserId,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    query.validate()?;

    let service = StreamService::new((**pool).clone());
    let page = service.list_streams(query.page, query.per_page).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /streams/{id} (public)
pub async fn get_stream(pool: web::Data<PgPool>, stream_id: web::Path<i64>) -> Result<HttpResponse> {
    let service = StreamService::new((**pool).clone());
    let view = service.get_stream(*stream_id).await?;

    Ok(HttpResponse::Ok().json(view))
}

/// PUT /streams/{id}
pub async fn update_stream(
    pool: web::Data<PgPool>,
    user: UserId,
    stream_id: web::Path<i64>,
    req: web::Json<UpdateStreamRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = StreamService::new((**pool).clone());
    let req = req.into_inner();
    let view = service
        .update_stream(
            *stream_id,
            user.0,
            UpdateStream {
                name: req.name,
                description: req.description,
                total_cost: req.total_cost,
                min_participants: req.min_participants,
                max_participants: req.max_participants,
                duration_weeks: req.duration_weeks,
                schedule: req.schedule,
                has_started: req.has_started,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(view))
}

/// DELETE /streams/{id}
pub async fn delete_stream(
    pool: web::Data<PgPool>,
    user: UserId,
    stream_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = StreamService::new((**pool).clone());
    service.delete_stream(*stream_id, user.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /streams/{id}/participate
pub async fn join_stream(
    pool: web::Data<PgPool>,
    user: UserId,
    stream_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = EnrollmentService::new((**pool).clone());
    service.join_stream(*stream_id, user.0).await?;

    Ok(HttpResponse::Created().finish())
}
