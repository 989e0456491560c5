/// Participant repository - database operations for stream enrollment rows
use crate::models::Participant;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert an enrollment row.
/// The (user_id, stream_id) unique constraint backs the application-level
/// duplicate check against concurrent joins.
pub async fn insert(
    pool: &PgPool,
    user_id: Uuid,
    stream_id: i64,
) -> Result<Participant, sqlx::Error> {
    sqlx::query_as::<_, Participant>(
        r#"
        INSERT INTO participants (user_id, stream_id)
        VALUES ($1, $2)
        RETURNING id, user_id, stream_id
        "#,
    )
    .bind(user_id)
    .bind(stream_id)
    .fetch_one(pool)
    .await
}

/// Check whether a user already participates in a stream
pub async fn exists(pool: &PgPool, user_id: Uuid, stream_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM participants WHERE user_id = $1 AND stream_id = $2)",
    )
    .bind(user_id)
    .bind(stream_id)
    .fetch_one(pool)
    .await
}

/// Participant user ids for a stream, in enrollment order
pub async fn list_user_ids(pool: &PgPool, stream_id: i64) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        "SELECT user_id FROM participants WHERE stream_id = $1 ORDER BY id",
    )
    .bind(stream_id)
    .fetch_all(pool)
    .await
}
