/// Review repository - database operations for course reviews
use crate::models::Review;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a review on a course
pub async fn create_review(
    pool: &PgPool,
    course_id: i64,
    user_id: Uuid,
    rating: i32,
    comment: Option<&str>,
) -> Result<Review, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (course_id, user_id, rating, comment, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, course_id, user_id, rating, comment, created_at
        "#,
    )
    .bind(course_id)
    .bind(user_id)
    .bind(rating)
    .bind(comment)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// List reviews for a course, newest first
pub async fn list_by_course(pool: &PgPool, course_id: i64) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        r#"
        SELECT id, course_id, user_id, rating, comment, created_at
        FROM reviews
        WHERE course_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
}
