/// Course handlers - HTTP endpoints for course and review operations
use crate::error::Result;
use crate::middleware::UserId;
use crate::pagination::PageQuery;
use crate::services::courses::{CourseChanges, CourseService};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

/// Request body for creating a course
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(custom(function = "crate::validators::not_blank"))]
    pub title: String,
    #[validate(custom(function = "crate::validators::not_blank"))]
    pub description: String,
    #[validate(custom(function = "crate::validators::not_blank"))]
    pub course_url: String,
}

/// Request body for updating a course; absent fields stay unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(custom(function = "crate::validators::not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "crate::validators::not_blank"))]
    pub description: Option<String>,
    #[validate(custom(function = "crate::validators::not_blank"))]
    pub course_url: Option<String>,
}

/// Request body for creating a review
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(custom(function = "crate::validators::not_blank"))]
    pub comment: Option<String>,
}

/// POST /courses
pub async fn create_course(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CourseService::new((**pool).clone());
    let course = service
        .create_course(user.0, &req.title, &req.description, &req.course_url)
        .await?;

    Ok(HttpResponse::Created().json(course))
}

/// GET /courses?page&per_page
pub async fn list_courses(
    pool: web::Data<PgPool>,
    _user: UserId,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    query.validate()?;

    let service = CourseService::new((**pool).clone());
    let page = service.list_courses(query.page, query.per_page).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /courses/{id}
pub async fn get_course(
    pool: web::Data<PgPool>,
    _user: UserId,
    course_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = CourseService::new((**pool).clone());
    let course = service.get_course(*course_id).await?;

    Ok(HttpResponse::Ok().json(course))
}

/// PUT /courses/{id}
pub async fn update_course(
    pool: web::Data<PgPool>,
    user: UserId,
    course_id: web::Path<i64>,
    req: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CourseService::new((**pool).clone());
    let req = req.into_inner();
    let course = service
        .update_course(
            *course_id,
            user.0,
            CourseChanges {
                title: req.title,
                description: req.description,
                course_url: req.course_url,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(course))
}

/// POST /courses/{id}/reviews
pub async fn create_review(
    pool: web::Data<PgPool>,
    user: UserId,
    course_id: web::Path<i64>,
    req: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CourseService::new((**pool).clone());
    let review = service
        .create_review(*course_id, user.0, req.rating, req.comment.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(review))
}

/// GET /courses/{id}/reviews (public)
pub async fn list_reviews(
    pool: web::Data<PgPool>,
    course_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = CourseService::new((**pool).clone());
    let reviews = service.list_reviews(*course_id).await?;

    Ok(HttpResponse::Ok().json(reviews))
}
