/// Stream repository - database operations for course streams
use crate::models::CourseStream;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const STREAM_COLUMNS: &str = "id, created_by, course_id, name, description, start_date, \
     has_started, total_cost, min_participants, max_participants, duration_weeks, schedule, \
     created_at, updated_at";

/// Fields for a new stream; start_date and has_started are always initialized
/// by the insert itself
pub struct NewStream<'a> {
    pub created_by: Uuid,
    pub course_id: i64,
    pub name: &'a str,
    pub description: &'a str,
    pub total_cost: i64,
    pub min_participants: i32,
    pub max_participants: i32,
    pub duration_weeks: i32,
    pub schedule: &'a str,
}

/// Optional field changes for a stream update
#[derive(Debug, Default)]
pub struct StreamChanges<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub total_cost: Option<i64>,
    pub min_participants: Option<i32>,
    pub max_participants: Option<i32>,
    pub duration_weeks: Option<i32>,
    pub schedule: Option<&'a str>,
    pub has_started: Option<bool>,
}

/// Create a stream; starts unscheduled (start_date NULL, has_started false)
pub async fn create_stream(
    pool: &PgPool,
    stream: NewStream<'_>,
) -> Result<CourseStream, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, CourseStream>(&format!(
        r#"
        INSERT INTO course_streams
            (created_by, course_id, name, description, start_date, has_started,
             total_cost, min_participants, max_participants, duration_weeks, schedule,
             created_at, updated_at)
        VALUES ($1, $2, $3, $4, NULL, FALSE, $5, $6, $7, $8, $9, $10, $10)
        RETURNING {STREAM_COLUMNS}
        "#
    ))
    .bind(stream.created_by)
    .bind(stream.course_id)
    .bind(stream.name)
    .bind(stream.description)
    .bind(stream.total_cost)
    .bind(stream.min_participants)
    .bind(stream.max_participants)
    .bind(stream.duration_weeks)
    .bind(stream.schedule)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Find a stream by ID
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<CourseStream>, sqlx::Error> {
    sqlx::query_as::<_, CourseStream>(&format!(
        "SELECT {STREAM_COLUMNS} FROM course_streams WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List streams ordered by creation time, newest first
pub async fn list(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<CourseStream>, sqlx::Error> {
    sqlx::query_as::<_, CourseStream>(&format!(
        "SELECT {STREAM_COLUMNS} FROM course_streams ORDER BY created_at DESC LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count all streams
pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM course_streams")
        .fetch_one(pool)
        .await
}

/// Apply only the supplied fields. When the update carries
/// `has_started = true`, start_date is stamped to `now` in the same
/// statement; it is never reset to NULL. A started stream stays
/// started: an explicit `has_started = false` is ignored once the
/// transition has happened.
pub async fn update_stream(
    pool: &PgPool,
    id: i64,
    changes: StreamChanges<'_>,
    now: DateTime<Utc>,
) -> Result<CourseStream, sqlx::Error> {
    sqlx::query_as::<_, CourseStream>(&format!(
        r#"
        UPDATE course_streams
        SET name = COALESCE($1, name),
            description = COALESCE($2, description),
            total_cost = COALESCE($3, total_cost),
            min_participants = COALESCE($4, min_participants),
            max_participants = COALESCE($5, max_participants),
            duration_weeks = COALESCE($6, duration_weeks),
            schedule = COALESCE($7, schedule),
            has_started = CASE WHEN has_started THEN TRUE ELSE COALESCE($8, has_started) END,
            start_date = CASE WHEN $8 IS TRUE THEN $9 ELSE start_date END,
            updated_at = $9
        WHERE id = $10
        RETURNING {STREAM_COLUMNS}
        "#
    ))
    .bind(changes.name)
    .bind(changes.description)
    .bind(changes.total_cost)
    .bind(changes.min_participants)
    .bind(changes.max_participants)
    .bind(changes.duration_weeks)
    .bind(changes.schedule)
    .bind(changes.has_started)
    .bind(now)
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Delete a stream and all its participants in one transaction.
/// Participants go first so no orphan rows survive a partial failure.
pub async fn delete_with_participants(pool: &PgPool, id: i64) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM participants WHERE stream_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM course_streams WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await
}
