use axum_helpers::{AppError, ErrorCode};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CourseError, CourseResult};
use crate::models::{Course, CreateCourse, UpdateCourse};
use crate::repository::CourseRepository;

/// Service layer for Course business logic
///
/// Stateless: every request is at most one fetch plus one write against the
/// repository, and every failure keeps its original kind.
#[derive(Clone)]
pub struct CourseService<R: CourseRepository> {
    repository: Arc<R>,
}

impl<R: CourseRepository> CourseService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new course and persist it
    #[tracing::instrument(skip(self, input), fields(course_title = %input.title))]
    pub async fn create_course(&self, input: CreateCourse) -> CourseResult<Course> {
        let course = Course::new(input.title, input.description)?;

        self.repository.create_course(&course).await?;

        Ok(course)
    }

    /// Get a course by ID
    #[tracing::instrument(skip(self), fields(course_id = %id))]
    pub async fn get_course_by_id(&self, id: Uuid) -> CourseResult<Course> {
        self.repository.get_course_by_id(id).await
    }

    /// Replace title and description of an existing course.
    ///
    /// The write is skipped entirely when the course is missing or the new
    /// values are rejected.
    #[tracing::instrument(skip(self, input), fields(course_id = %id))]
    pub async fn update_course(&self, id: Uuid, input: UpdateCourse) -> CourseResult<Course> {
        let mut course = self.repository.get_course_by_id(id).await?;

        course
            .update(input.title, input.description)
            .map_err(|e| {
                let message = e.to_string();
                CourseError::Fault(AppError::wrap(e, message, ErrorCode::Invalid))
            })?;

        self.repository.update_course(&course).await?;

        Ok(course)
    }

    /// Delete a course by ID
    #[tracing::instrument(skip(self), fields(course_id = %id))]
    pub async fn delete_course_by_id(&self, id: Uuid) -> CourseResult<()> {
        self.repository.delete_course_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCourseRepository;
    use mockall::predicate::eq;

    fn create_input(title: &str, description: &str) -> CreateCourse {
        CreateCourse {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    fn update_input(title: &str, description: &str) -> UpdateCourse {
        UpdateCourse {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_course_persists_new_course() {
        let mut mock_repo = MockCourseRepository::new();

        mock_repo
            .expect_create_course()
            .withf(|course| course.title() == "Rust" && course.description() == "Ownership")
            .times(1)
            .returning(|_| Ok(()));

        let service = CourseService::new(mock_repo);
        let course = service
            .create_course(create_input("Rust", "Ownership"))
            .await
            .unwrap();

        assert!(!course.id().is_nil());
        assert_eq!(course.title(), "Rust");
    }

    #[tokio::test]
    async fn test_create_course_propagates_repository_error() {
        let mut mock_repo = MockCourseRepository::new();

        mock_repo.expect_create_course().returning(|_| {
            Err(AppError::new("failed to insert course into database", ErrorCode::Internal).into())
        });

        let service = CourseService::new(mock_repo);
        let err = service
            .create_course(create_input("Rust", "Ownership"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Internal);
    }

    #[tokio::test]
    async fn test_create_course_with_empty_title_never_persists() {
        let mut mock_repo = MockCourseRepository::new();
        mock_repo.expect_create_course().never();

        let service = CourseService::new(mock_repo);
        let err = service
            .create_course(create_input("", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, CourseError::EmptyTitle));
    }

    #[tokio::test]
    async fn test_get_course_by_id_delegates() {
        let mut mock_repo = MockCourseRepository::new();
        let course = Course::new("Rust", "Ownership").unwrap();
        let id = course.id();
        let stored = course.clone();

        mock_repo
            .expect_get_course_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(stored.clone()));

        let service = CourseService::new(mock_repo);
        assert_eq!(service.get_course_by_id(id).await.unwrap(), course);
    }

    #[tokio::test]
    async fn test_get_course_by_id_propagates_not_found() {
        let mut mock_repo = MockCourseRepository::new();
        mock_repo
            .expect_get_course_by_id()
            .returning(|_| Err(CourseError::NotFound));

        let service = CourseService::new(mock_repo);
        let err = service.get_course_by_id(Uuid::now_v7()).await.unwrap_err();

        assert!(matches!(err, CourseError::NotFound));
    }

    #[tokio::test]
    async fn test_update_course_keeps_identity() {
        let mut mock_repo = MockCourseRepository::new();
        let course = Course::new("Rust", "Basics").unwrap();
        let (id, created_at) = (course.id(), course.created_at());

        mock_repo
            .expect_get_course_by_id()
            .with(eq(id))
            .returning(move |_| Ok(course.clone()));
        mock_repo
            .expect_update_course()
            .withf(move |c| c.id() == id && c.title() == "Advanced Rust")
            .times(1)
            .returning(|_| Ok(()));

        let service = CourseService::new(mock_repo);
        let updated = service
            .update_course(id, update_input("Advanced Rust", "Lifetimes"))
            .await
            .unwrap();

        assert_eq!(updated.id(), id);
        assert_eq!(updated.created_at(), created_at);
        assert_eq!(updated.title(), "Advanced Rust");
        assert_eq!(updated.description(), "Lifetimes");
    }

    #[tokio::test]
    async fn test_update_missing_course_never_persists() {
        let mut mock_repo = MockCourseRepository::new();
        mock_repo
            .expect_get_course_by_id()
            .returning(|_| Err(CourseError::NotFound));
        mock_repo.expect_update_course().never();

        let service = CourseService::new(mock_repo);
        let err = service
            .update_course(Uuid::now_v7(), update_input("Rust", "Traits"))
            .await
            .unwrap_err();

        assert!(matches!(err, CourseError::NotFound));
    }

    #[tokio::test]
    async fn test_update_with_empty_title_never_persists() {
        let mut mock_repo = MockCourseRepository::new();
        let course = Course::new("Rust", "Basics").unwrap();
        let id = course.id();

        mock_repo
            .expect_get_course_by_id()
            .returning(move |_| Ok(course.clone()));
        mock_repo.expect_update_course().never();

        let service = CourseService::new(mock_repo);
        let err = service
            .update_course(id, update_input("", "Traits"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Invalid);
        assert!(matches!(err.sentinel(), Some(CourseError::EmptyTitle)));
        assert_eq!(AppError::from(err).message(), "course title cannot be empty");
    }

    #[tokio::test]
    async fn test_delete_course_by_id_delegates() {
        let mut mock_repo = MockCourseRepository::new();
        let id = Uuid::now_v7();

        mock_repo
            .expect_delete_course_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(()));

        let service = CourseService::new(mock_repo);
        service.delete_course_by_id(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_course_by_id_propagates_not_found() {
        let mut mock_repo = MockCourseRepository::new();
        mock_repo
            .expect_delete_course_by_id()
            .returning(|_| Err(CourseError::NotFound));

        let service = CourseService::new(mock_repo);
        let err = service.delete_course_by_id(Uuid::now_v7()).await.unwrap_err();

        assert!(matches!(err, CourseError::NotFound));
    }
}
