/// Course service - course creation, listing and review management
use crate::db::{course_repo, review_repo};
use crate::error::{AppError, Result};
use crate::models::{Course, CourseWithReviews, Review};
use crate::pagination::{self, Page};
use sqlx::PgPool;
use uuid::Uuid;

pub struct CourseService {
    pool: PgPool,
}

/// Optional field changes applied by `update_course`
#[derive(Debug, Default)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub course_url: Option<String>,
}

impl CourseService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a course; the creator becomes its owner
    pub async fn create_course(
        &self,
        creator_id: Uuid,
        title: &str,
        description: &str,
        course_url: &str,
    ) -> Result<Course> {
        let course = course_repo::create_course(
            &self.pool,
            creator_id,
            title.trim(),
            description.trim(),
            course_url.trim(),
        )
        .await?;

        tracing::info!(course_id = course.id, %creator_id, "course created");
        Ok(course)
    }

    /// List courses, newest first
    pub async fn list_courses(&self, page: i64, per_page: i64) -> Result<Page<Course>> {
        let total = course_repo::count(&self.pool).await?;
        let offset = pagination::offset(page, per_page);
        let items = course_repo::list(&self.pool, per_page, offset).await?;

        Ok(Page::new(page, per_page, total, items))
    }

    /// Get a course together with its reviews
    pub async fn get_course(&self, id: i64) -> Result<CourseWithReviews> {
        let course = course_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
        let reviews = review_repo::list_by_course(&self.pool, id).await?;

        Ok(CourseWithReviews { course, reviews })
    }

    /// Update a course; only the creator may change it
    pub async fn update_course(
        &self,
        id: i64,
        actor_id: Uuid,
        changes: CourseChanges,
    ) -> Result<Course> {
        let course = course_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if course.created_by != actor_id {
            return Err(AppError::Forbidden(
                "Not authorized to update this course".to_string(),
            ));
        }

        let updated = course_repo::update_course(
            &self.pool,
            id,
            changes.title.as_deref().map(str::trim),
            changes.description.as_deref().map(str::trim),
            changes.course_url.as_deref().map(str::trim),
        )
        .await?;

        Ok(updated)
    }

    /// Attach a review to a course
    pub async fn create_review(
        &self,
        course_id: i64,
        user_id: Uuid,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Review> {
        if course_repo::find_by_id(&self.pool, course_id).await?.is_none() {
            return Err(AppError::NotFound("Course not found".to_string()));
        }

        let review = review_repo::create_review(
            &self.pool,
            course_id,
            user_id,
            rating,
            comment.map(str::trim),
        )
        .await?;

        Ok(review)
    }

    /// Reviews for a course, newest first
    pub async fn list_reviews(&self, course_id: i64) -> Result<Vec<Review>> {
        if course_repo::find_by_id(&self.pool, course_id).await?.is_none() {
            return Err(AppError::NotFound("Course not found".to_string()));
        }

        Ok(review_repo::list_by_course(&self.pool, course_id).await?)
    }
}
