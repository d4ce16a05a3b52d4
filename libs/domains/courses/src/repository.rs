use async_trait::async_trait;
use axum_helpers::AppError;
use serde_json::{Map, json};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CourseError, CourseResult};
use crate::models::Course;

/// Repository trait for Course persistence
///
/// Lookups, updates and deletes of an unknown id fail with
/// [`CourseError::NotFound`]; every other storage failure is a `Fault`
/// with code `internal`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create_course(&self, course: &Course) -> CourseResult<()>;

    async fn get_course_by_id(&self, id: Uuid) -> CourseResult<Course>;

    /// Persist title and description of an existing course
    async fn update_course(&self, course: &Course) -> CourseResult<()>;

    async fn delete_course_by_id(&self, id: Uuid) -> CourseResult<()>;
}

/// In-memory implementation of CourseRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCourseRepository {
    courses: Arc<RwLock<HashMap<Uuid, Course>>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self {
            courses: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn create_course(&self, course: &Course) -> CourseResult<()> {
        let mut courses = self.courses.write().await;

        if courses.contains_key(&course.id()) {
            let mut context = Map::new();
            context.insert("course_id".into(), json!(course.id()));
            return Err(AppError::internal("duplicate course id", context).into());
        }

        courses.insert(course.id(), course.clone());
        tracing::debug!(course_id = %course.id(), "Stored course");
        Ok(())
    }

    async fn get_course_by_id(&self, id: Uuid) -> CourseResult<Course> {
        let courses = self.courses.read().await;
        courses.get(&id).cloned().ok_or(CourseError::NotFound)
    }

    async fn update_course(&self, course: &Course) -> CourseResult<()> {
        let mut courses = self.courses.write().await;
        let stored = courses.get_mut(&course.id()).ok_or(CourseError::NotFound)?;
        *stored = course.clone();
        Ok(())
    }

    async fn delete_course_by_id(&self, id: Uuid) -> CourseResult<()> {
        let mut courses = self.courses.write().await;
        courses.remove(&id).map(|_| ()).ok_or(CourseError::NotFound)
    }
}
