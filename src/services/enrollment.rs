/// Enrollment service - registering users as stream participants
use crate::db::{participant_repo, stream_repo};
use crate::error::{AppError, Result};
use sqlx::PgPool;
use uuid::Uuid;

pub struct EnrollmentService {
    pool: PgPool,
}

impl EnrollmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register the user as a participant of the stream.
    ///
    /// Known limitation: enrollment is not checked against
    /// max_participants; capacity enforcement is pending product
    /// clarification.
    pub async fn join_stream(&self, stream_id: i64, user_id: Uuid) -> Result<()> {
        if stream_repo::find_by_id(&self.pool, stream_id).await?.is_none() {
            return Err(AppError::NotFound("Stream not found".to_string()));
        }

        if participant_repo::exists(&self.pool, user_id, stream_id).await? {
            return Err(AppError::Conflict(
                "User already participates in this stream".to_string(),
            ));
        }

        // The read-check-then-insert above can race with a concurrent join;
        // the UNIQUE(user_id, stream_id) constraint closes the window.
        match participant_repo::insert(&self.pool, user_id, stream_id).await {
            Ok(participant) => {
                tracing::info!(stream_id, %user_id, participant_id = participant.id, "user joined stream");
                Ok(())
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
                "User already participates in this stream".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }
}
