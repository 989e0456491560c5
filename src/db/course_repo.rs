/// Course repository - database operations for courses
use crate::models::Course;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new course
pub async fn create_course(
    pool: &PgPool,
    created_by: Uuid,
    title: &str,
    description: &str,
    course_url: &str,
) -> Result<Course, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Course>(
        r#"
        INSERT INTO courses (created_by, title, description, course_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING id, created_by, title, description, course_url, created_at, updated_at
        "#,
    )
    .bind(created_by)
    .bind(title)
    .bind(description)
    .bind(course_url)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Find a course by ID
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT id, created_by, title, description, course_url, created_at, updated_at
        FROM courses
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List courses ordered by creation time, newest first
pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT id, created_by, title, description, course_url, created_at, updated_at
        FROM courses
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count all courses
pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
        .fetch_one(pool)
        .await
}

/// Apply only the supplied fields; absent fields keep their stored value
pub async fn update_course(
    pool: &PgPool,
    id: i64,
    title: Option<&str>,
    description: Option<&str>,
    course_url: Option<&str>,
) -> Result<Course, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Course>(
        r#"
        UPDATE courses
        SET title = COALESCE($1, title),
            description = COALESCE($2, description),
            course_url = COALESCE($3, course_url),
            updated_at = $4
        WHERE id = $5
        RETURNING id, created_by, title, description, course_url, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(course_url)
    .bind(now)
    .bind(id)
    .fetch_one(pool)
    .await
}
