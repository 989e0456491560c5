//! Store-backed lifecycle rules: ownership gating, the start transition,
//! cascade deletion and duplicate enrollment.
//!
//! Each test provisions its own database and applies ./migrations via
//! #[sqlx::test]; requires DATABASE_URL to point at a PostgreSQL server.
use course_service::error::AppError;
use course_service::services::streams::{CreateStream, UpdateStream};
use course_service::services::{CourseService, EnrollmentService, StreamService};
use sqlx::PgPool;
use uuid::Uuid;

fn cohort(course_id: i64) -> CreateStream {
    CreateStream {
        course_id,
        name: "Autumn cohort".to_string(),
        description: "Evening group".to_string(),
        total_cost: 15000,
        min_participants: 2,
        max_participants: 5,
        duration_weeks: 8,
        schedule: "Tue/Thu 19:00".to_string(),
    }
}

/// Course owned by `leader` plus one stream they lead; returns the stream id
async fn seed_stream(pool: &PgPool, leader: Uuid) -> i64 {
    let courses = CourseService::new(pool.clone());
    let course = courses
        .create_course(leader, "Rust for Backenders", "From zero", "https://example.com")
        .await
        .unwrap();

    let streams = StreamService::new(pool.clone());
    streams
        .create_stream(leader, cohort(course.id))
        .await
        .unwrap()
        .id
}

async fn participant_count(pool: &PgPool, stream_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM participants WHERE stream_id = $1")
        .bind(stream_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test]
async fn create_stream_for_missing_course_persists_nothing(pool: PgPool) {
    let streams = StreamService::new(pool.clone());

    let err = streams
        .create_stream(Uuid::new_v4(), cohort(4242))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM course_streams")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
async fn non_owner_update_is_forbidden_and_changes_nothing(pool: PgPool) {
    let leader = Uuid::new_v4();
    let stream_id = seed_stream(&pool, leader).await;

    let streams = StreamService::new(pool.clone());
    let err = streams
        .update_stream(
            stream_id,
            Uuid::new_v4(),
            UpdateStream {
                name: Some("Hijacked".to_string()),
                has_started: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let view = streams.get_stream(stream_id).await.unwrap();
    assert_eq!(view.name, "Autumn cohort");
    assert!(!view.has_started);
    assert!(view.start_date.is_none());
}

#[sqlx::test]
async fn starting_stamps_start_date_alongside_other_fields(pool: PgPool) {
    let leader = Uuid::new_v4();
    let stream_id = seed_stream(&pool, leader).await;

    let streams = StreamService::new(pool.clone());
    let view = streams
        .update_stream(
            stream_id,
            leader,
            UpdateStream {
                name: Some("Renamed cohort".to_string()),
                duration_weeks: Some(10),
                has_started: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(view.has_started);
    assert_eq!(view.name, "Renamed cohort");
    assert_eq!(view.duration_weeks, 10);
    // start_date is the update's timestamp
    assert_eq!(view.start_date, Some(view.updated_at));
}

#[sqlx::test]
async fn started_stream_cannot_be_unstarted(pool: PgPool) {
    let leader = Uuid::new_v4();
    let stream_id = seed_stream(&pool, leader).await;

    let streams = StreamService::new(pool.clone());
    let started = streams
        .update_stream(
            stream_id,
            leader,
            UpdateStream {
                has_started: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(started.has_started);

    let view = streams
        .update_stream(
            stream_id,
            leader,
            UpdateStream {
                has_started: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(view.has_started, "start transition is one-way");
    assert_eq!(view.start_date, started.start_date);
}

#[sqlx::test]
async fn duplicate_join_conflicts_with_single_row(pool: PgPool) {
    let leader = Uuid::new_v4();
    let member = Uuid::new_v4();
    let stream_id = seed_stream(&pool, leader).await;

    let enrollment = EnrollmentService::new(pool.clone());
    enrollment.join_stream(stream_id, member).await.unwrap();

    let err = enrollment.join_stream(stream_id, member).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    assert_eq!(participant_count(&pool, stream_id).await, 1);
}

#[sqlx::test]
async fn join_missing_stream_is_not_found(pool: PgPool) {
    let enrollment = EnrollmentService::new(pool.clone());
    let err = enrollment
        .join_stream(4242, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[sqlx::test]
async fn delete_cascades_to_participants(pool: PgPool) {
    let leader = Uuid::new_v4();
    let stream_id = seed_stream(&pool, leader).await;

    let enrollment = EnrollmentService::new(pool.clone());
    enrollment.join_stream(stream_id, Uuid::new_v4()).await.unwrap();
    enrollment.join_stream(stream_id, Uuid::new_v4()).await.unwrap();
    assert_eq!(participant_count(&pool, stream_id).await, 2);

    let streams = StreamService::new(pool.clone());
    streams.delete_stream(stream_id, leader).await.unwrap();

    let err = streams.get_stream(stream_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(participant_count(&pool, stream_id).await, 0);
}

#[sqlx::test]
async fn non_owner_delete_is_forbidden(pool: PgPool) {
    let leader = Uuid::new_v4();
    let stream_id = seed_stream(&pool, leader).await;

    let streams = StreamService::new(pool.clone());
    let err = streams
        .delete_stream(stream_id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    assert!(streams.get_stream(stream_id).await.is_ok());
}

#[sqlx::test]
async fn started_stream_cannot_be_deleted(pool: PgPool) {
    let leader = Uuid::new_v4();
    let stream_id = seed_stream(&pool, leader).await;

    let streams = StreamService::new(pool.clone());
    streams
        .update_stream(
            stream_id,
            leader,
            UpdateStream {
                has_started: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let err = streams.delete_stream(stream_id, leader).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(streams.get_stream(stream_id).await.is_ok());
}

/// Full cohort walkthrough: user B joins once, a second join conflicts,
/// a stranger cannot mutate, the leader starts the stream, and a started
/// stream refuses deletion.
#[sqlx::test]
async fn cohort_lifecycle_end_to_end(pool: PgPool) {
    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();
    let user_c = Uuid::new_v4();
    let stream_id = seed_stream(&pool, user_a).await;

    let streams = StreamService::new(pool.clone());
    let enrollment = EnrollmentService::new(pool.clone());

    enrollment.join_stream(stream_id, user_b).await.unwrap();
    let err = enrollment.join_stream(stream_id, user_b).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = streams
        .update_stream(
            stream_id,
            user_c,
            UpdateStream {
                has_started: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let view = streams
        .update_stream(
            stream_id,
            user_a,
            UpdateStream {
                has_started: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(view.has_started);
    assert!(view.start_date.is_some());
    assert_eq!(view.participants, vec![user_b]);

    let err = streams.delete_stream(stream_id, user_a).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}
