use async_trait::async_trait;
use axum_helpers::{AppError, ErrorCode};
use database::postgres::StatementTimeouts;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde_json::{Map, json};
use std::future::Future;
use std::time::Duration;
use uuid::Uuid;

use crate::{
    entity,
    error::{CourseError, CourseResult},
    models::Course,
    repository::CourseRepository,
};

/// PostgreSQL-backed repository.
///
/// Reads run under the query deadline and writes under the exec deadline.
/// Dropping a call's future abandons the statement.
pub struct PgCourseRepository {
    db: DatabaseConnection,
    timeouts: StatementTimeouts,
}

impl PgCourseRepository {
    pub fn new(db: DatabaseConnection, timeouts: StatementTimeouts) -> Self {
        Self { db, timeouts }
    }
}

/// Await `statement` within `deadline`, shaping failures as internal faults.
async fn bounded<T, F>(
    operation: &'static str,
    failure: &'static str,
    deadline: Duration,
    statement: F,
) -> CourseResult<T>
where
    F: Future<Output = Result<T, DbErr>>,
{
    match tokio::time::timeout(deadline, statement).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(AppError::wrap(e, failure, ErrorCode::Internal)
            .with_context("operation", operation)
            .into()),
        Err(elapsed) => {
            let mut context = Map::new();
            context.insert("operation".into(), json!(operation));
            context.insert("timeout_ms".into(), json!(deadline.as_millis() as u64));
            Err(AppError::internal(elapsed, context).into())
        }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn create_course(&self, course: &Course) -> CourseResult<()> {
        let model = entity::ActiveModel::from(course);

        bounded(
            "create_course",
            "failed to insert course into database",
            self.timeouts.exec,
            model.insert(&self.db),
        )
        .await?;

        tracing::debug!(course_id = %course.id(), "Inserted course");
        Ok(())
    }

    async fn get_course_by_id(&self, id: Uuid) -> CourseResult<Course> {
        let model = bounded(
            "get_course_by_id",
            "failed to fetch course from database",
            self.timeouts.query,
            entity::Entity::find_by_id(id).one(&self.db),
        )
        .await?;

        model.map(Course::from).ok_or(CourseError::NotFound)
    }

    async fn update_course(&self, course: &Course) -> CourseResult<()> {
        let changes = entity::ActiveModel {
            title: Set(course.title().to_string()),
            description: Set(course.description().to_string()),
            ..Default::default()
        };

        let result = bounded(
            "update_course",
            "failed to update course in database",
            self.timeouts.exec,
            entity::Entity::update_many()
                .set(changes)
                .filter(entity::Column::Id.eq(course.id()))
                .exec(&self.db),
        )
        .await?;

        if result.rows_affected == 0 {
            return Err(CourseError::NotFound);
        }

        tracing::debug!(course_id = %course.id(), "Updated course");
        Ok(())
    }

    async fn delete_course_by_id(&self, id: Uuid) -> CourseResult<()> {
        let result = bounded(
            "delete_course_by_id",
            "failed to delete course from database",
            self.timeouts.exec,
            entity::Entity::delete_by_id(id).exec(&self.db),
        )
        .await?;

        if result.rows_affected == 0 {
            return Err(CourseError::NotFound);
        }

        tracing::debug!(course_id = %id, "Deleted course");
        Ok(())
    }
}
