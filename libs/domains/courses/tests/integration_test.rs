//! Integration tests for Courses domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - The sea-orm adapter round-trips rows through the migrated schema
//! - Zero-row updates and deletes surface as not found
//! - The service keeps identity across updates

use database::postgres::StatementTimeouts;
use domain_courses::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn repository(db: &TestDatabase) -> PgCourseRepository {
    PgCourseRepository::new(db.connection(), StatementTimeouts::default())
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_course() {
    let db = TestDatabase::new().await;
    let repo = repository(&db);
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let course = Course::new(builder.title("main"), builder.description("main")).unwrap();
    repo.create_course(&course).await.unwrap();

    let retrieved = repo.get_course_by_id(course.id()).await.unwrap();
    assert_uuid_eq(retrieved.id(), course.id(), "retrieved course id");
    assert_eq!(retrieved, course);

    // idempotent read
    let again = repo.get_course_by_id(course.id()).await.unwrap();
    assert_eq!(again, retrieved);
}

#[tokio::test]
async fn test_duplicate_id_is_internal() {
    let db = TestDatabase::new().await;
    let repo = repository(&db);
    let builder = TestDataBuilder::from_test_name("duplicate_id");

    let course = Course::new(builder.title("main"), builder.description("main")).unwrap();
    repo.create_course(&course).await.unwrap();

    let err = repo.create_course(&course).await.unwrap_err();
    assert_eq!(err.code(), axum_helpers::ErrorCode::Internal);
    assert!(err.sentinel().is_none());
}

#[tokio::test]
async fn test_unknown_id_is_not_found_everywhere() {
    let db = TestDatabase::new().await;
    let repo = repository(&db);
    let builder = TestDataBuilder::from_test_name("unknown_id");
    let id = builder.course_id();

    assert!(matches!(
        repo.get_course_by_id(id).await,
        Err(CourseError::NotFound)
    ));
    assert!(matches!(
        repo.delete_course_by_id(id).await,
        Err(CourseError::NotFound)
    ));

    let never_stored = Course::new(builder.title("ghost"), builder.description("ghost")).unwrap();
    assert!(matches!(
        repo.update_course(&never_stored).await,
        Err(CourseError::NotFound)
    ));
}

#[tokio::test]
async fn test_update_and_delete_course() {
    let db = TestDatabase::new().await;
    let repo = repository(&db);
    let builder = TestDataBuilder::from_test_name("update_and_delete");

    let mut course = Course::new(builder.title("main"), builder.description("main")).unwrap();
    repo.create_course(&course).await.unwrap();

    course
        .update(builder.title("updated"), builder.description("updated"))
        .unwrap();
    repo.update_course(&course).await.unwrap();

    let stored = repo.get_course_by_id(course.id()).await.unwrap();
    assert_eq!(stored.title(), builder.title("updated"));
    assert_eq!(stored.description(), builder.description("updated"));
    assert_eq!(stored.created_at(), course.created_at());

    repo.delete_course_by_id(course.id()).await.unwrap();
    assert!(matches!(
        repo.get_course_by_id(course.id()).await,
        Err(CourseError::NotFound)
    ));
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn test_service_update_preserves_identity() {
    let db = TestDatabase::new().await;
    let service = CourseService::new(repository(&db));
    let builder = TestDataBuilder::from_test_name("service_update_identity");

    let created = service
        .create_course(CreateCourse {
            title: builder.title("main"),
            description: builder.description("main"),
        })
        .await
        .unwrap();

    service
        .update_course(
            created.id(),
            UpdateCourse {
                title: builder.title("updated"),
                description: builder.description("updated"),
            },
        )
        .await
        .unwrap();

    let stored = service.get_course_by_id(created.id()).await.unwrap();
    assert_uuid_eq(stored.id(), created.id(), "course id after update");
    assert_eq!(stored.created_at(), created.created_at());
    assert_eq!(stored.title(), builder.title("updated"));
}

#[tokio::test]
async fn test_service_rejected_update_leaves_row_untouched() {
    let db = TestDatabase::new().await;
    let service = CourseService::new(repository(&db));
    let builder = TestDataBuilder::from_test_name("service_rejected_update");

    let created = service
        .create_course(CreateCourse {
            title: builder.title("main"),
            description: builder.description("main"),
        })
        .await
        .unwrap();

    let err = service
        .update_course(
            created.id(),
            UpdateCourse {
                title: builder.title("updated"),
                description: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err.sentinel(), Some(CourseError::EmptyDescription)));

    let stored = service.get_course_by_id(created.id()).await.unwrap();
    assert_eq!(stored, created);
}
