use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A course published on the marketplace
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub created_by: Uuid,
    pub title: String,
    pub description: String,
    pub course_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user rating/review attached to a course
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub course_id: i64,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A scheduled cohort of a course with its own capacity and lifecycle
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseStream {
    pub id: i64,
    pub created_by: Uuid,
    pub course_id: i64,
    pub name: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub has_started: bool,
    pub total_cost: i64,
    pub min_participants: i32,
    pub max_participants: i32,
    pub duration_weeks: i32,
    pub schedule: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Join-record of a user enrolled in a stream
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participant {
    pub id: i64,
    pub user_id: Uuid,
    pub stream_id: i64,
}

/// Course response including its reviews
#[derive(Debug, Serialize)]
pub struct CourseWithReviews {
    #[serde(flatten)]
    pub course: Course,
    pub reviews: Vec<Review>,
}

/// Denormalized stream representation returned to clients
///
/// The persisted stream row alone lacks human-readable course and leader
/// context; this view flattens the stream with its course title, the leader
/// id and the enrolled participant ids. Reconstructed per request, never
/// stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamView {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub description: String,
    pub total_cost: i64,
    pub min_participants: i32,
    pub max_participants: i32,
    pub duration_weeks: i32,
    pub schedule: String,
    pub leader_id: Uuid,
    pub course_name: String,
    pub has_started: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub participants: Vec<Uuid>,
}

impl StreamView {
    /// Assemble the read model from a stream row plus joined lookups.
    ///
    /// The leader is the stream's creator, not the course owner.
    pub fn assemble(stream: &CourseStream, course_name: &str, participants: Vec<Uuid>) -> Self {
        Self {
            id: stream.id,
            course_id: stream.course_id,
            name: stream.name.clone(),
            description: stream.description.clone(),
            total_cost: stream.total_cost,
            min_participants: stream.min_participants,
            max_participants: stream.max_participants,
            duration_weeks: stream.duration_weeks,
            schedule: stream.schedule.clone(),
            leader_id: stream.created_by,
            course_name: course_name.to_string(),
            has_started: stream.has_started,
            start_date: stream.start_date,
            created_at: stream.created_at,
            updated_at: stream.updated_at,
            participants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stream(leader: Uuid) -> CourseStream {
        let now = Utc::now();
        CourseStream {
            id: 10,
            created_by: leader,
            course_id: 1,
            name: "Autumn cohort".to_string(),
            description: "Evening group".to_string(),
            start_date: None,
            has_started: false,
            total_cost: 15000,
            min_participants: 2,
            max_participants: 5,
            duration_weeks: 8,
            schedule: "Tue/Thu 19:00".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_assemble_flattens_stream_and_lookups() {
        let leader = Uuid::new_v4();
        let participant = Uuid::new_v4();
        let stream = sample_stream(leader);

        let view = StreamView::assemble(&stream, "Rust for Backenders", vec![participant]);

        assert_eq!(view.id, 10);
        assert_eq!(view.course_id, 1);
        assert_eq!(view.leader_id, leader);
        assert_eq!(view.course_name, "Rust for Backenders");
        assert_eq!(view.participants, vec![participant]);
        assert!(!view.has_started);
        assert!(view.start_date.is_none());
    }

    #[test]
    fn test_assemble_preserves_lifecycle_fields() {
        let leader = Uuid::new_v4();
        let mut stream = sample_stream(leader);
        let started_at = Utc::now();
        stream.has_started = true;
        stream.start_date = Some(started_at);

        let view = StreamView::assemble(&stream, "Rust for Backenders", vec![]);

        assert!(view.has_started);
        assert_eq!(view.start_date, Some(started_at));
        assert!(view.participants.is_empty());
    }
}
