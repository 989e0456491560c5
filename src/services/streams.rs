/// Stream service - cohort lifecycle, ownership-gated mutation and the
/// assembled read model
use crate::db::{course_repo, participant_repo, stream_repo};
use crate::db::stream_repo::{NewStream, StreamChanges};
use crate::error::{AppError, Result};
use crate::models::{CourseStream, StreamView};
use crate::pagination::{self, Page};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct StreamService {
    pool: PgPool,
}

/// Fields for `create_stream`
#[derive(Debug)]
pub struct CreateStream {
    pub course_id: i64,
    pub name: String,
    pub description: String,
    pub total_cost: i64,
    pub min_participants: i32,
    pub max_participants: i32,
    pub duration_weeks: i32,
    pub schedule: String,
}

/// Optional field changes applied by `update_stream`
#[derive(Debug, Default)]
pub struct UpdateStream {
    pub name: Option<String>,
    pub description: Option<String>,
    pub total_cost: Option<i64>,
    pub min_participants: Option<i32>,
    pub max_participants: Option<i32>,
    pub duration_weeks: Option<i32>,
    pub schedule: Option<String>,
    pub has_started: Option<bool>,
}

impl StreamService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a stream for an existing course; the creator becomes its leader
    pub async fn create_stream(&self, creator_id: Uuid, fields: CreateStream) -> Result<StreamView> {
        let course = course_repo::find_by_id(&self.pool, fields.course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        let stream = stream_repo::create_stream(
            &self.pool,
            NewStream {
                created_by: creator_id,
                course_id: fields.course_id,
                name: fields.name.trim(),
                description: fields.description.trim(),
                total_cost: fields.total_cost,
                min_participants: fields.min_participants,
                max_participants: fields.max_participants,
                duration_weeks: fields.duration_weeks,
                schedule: fields.schedule.trim(),
            },
        )
        .await?;

        tracing::info!(stream_id = stream.id, course_id = course.id, %creator_id, "stream created");

        // A fresh stream has no participants yet
        Ok(StreamView::assemble(&stream, &course.title, Vec::new()))
    }

    /// List streams, newest first
    pub async fn list_streams(&self, page: i64, per_page: i64) -> Result<Page<StreamView>> {
        let total = stream_repo::count(&self.pool).await?;
        let offset = pagination::offset(page, per_page);
        let streams = stream_repo::list(&self.pool, per_page, offset).await?;

        let mut items = Vec::with_capacity(streams.len());
        for stream in &streams {
            items.push(self.assemble_view(stream).await?);
        }

        Ok(Page::new(page, per_page, total, items))
    }

    /// Get a single stream as its assembled read model
    pub async fn get_stream(&self, id: i64) -> Result<StreamView> {
        let stream = stream_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Stream not found".to_string()))?;

        self.assemble_view(&stream).await
    }

    /// Update a stream; only the leader may change it.
    ///
    /// Setting `has_started = true` stamps start_date to the update's
    /// timestamp after the generic field copy, so it cannot be overridden
    /// by other fields in the same payload. The transition is one-way: a
    /// started stream ignores `has_started = false`.
    pub async fn update_stream(
        &self,
        id: i64,
        actor_id: Uuid,
        fields: UpdateStream,
    ) -> Result<StreamView> {
        let stream = stream_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Stream not found".to_string()))?;

        if stream.created_by != actor_id {
            return Err(AppError::Forbidden(
                "Not authorized to update this stream".to_string(),
            ));
        }

        let updated = stream_repo::update_stream(
            &self.pool,
            id,
            StreamChanges {
                name: fields.name.as_deref().map(str::trim),
                description: fields.description.as_deref().map(str::trim),
                total_cost: fields.total_cost,
                min_participants: fields.min_participants,
                max_participants: fields.max_participants,
                duration_weeks: fields.duration_weeks,
                schedule: fields.schedule.as_deref().map(str::trim),
                has_started: fields.has_started,
            },
            Utc::now(),
        )
        .await?;

        if fields.has_started == Some(true) {
            tracing::info!(stream_id = id, "stream started");
        }

        self.assemble_view(&updated).await
    }

    /// Delete a stream that has not started, cascading to its participants
    pub async fn delete_stream(&self, id: i64, actor_id: Uuid) -> Result<()> {
        let stream = stream_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Stream not found".to_string()))?;

        if stream.created_by != actor_id {
            return Err(AppError::Forbidden(
                "Not authorized to delete this stream".to_string(),
            ));
        }

        if stream.has_started {
            return Err(AppError::Conflict(
                "Cannot delete an already started stream".to_string(),
            ));
        }

        stream_repo::delete_with_participants(&self.pool, id).await?;
        tracing::info!(stream_id = id, "stream deleted");
        Ok(())
    }

    async fn assemble_view(&self, stream: &CourseStream) -> Result<StreamView> {
        let course = course_repo::find_by_id(&self.pool, stream.course_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Stream {} references missing course {}",
                    stream.id, stream.course_id
                ))
            })?;
        let participants = participant_repo::list_user_ids(&self.pool, stream.id).await?;

        Ok(StreamView::assemble(stream, &course.title, participants))
    }
}
