use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CourseError, CourseResult};

/// A titled, described course with an immutable identity and creation time.
///
/// Only [`Course::new`] and [`Course::restore`] build a value, so a course
/// with an empty title or description never exists outside storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: Uuid,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl Course {
    /// Title is checked before description.
    ///
    /// The id is a UUIDv7, so ids sort by creation time.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> CourseResult<Self> {
        let title = title.into();
        let description = description.into();
        ensure_valid(&title, &description)?;

        Ok(Self {
            id: Uuid::now_v7(),
            title,
            description,
            // timestamptz keeps microseconds
            created_at: Utc::now().trunc_subsecs(6),
        })
    }

    /// Rebuild a course read back from storage.
    pub fn restore(id: Uuid, title: String, description: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            description,
            created_at,
        }
    }

    /// Replace title and description in place, keeping id and creation time.
    /// On error the course is left untouched.
    pub fn update(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> CourseResult<()> {
        let title = title.into();
        let description = description.into();
        ensure_valid(&title, &description)?;

        self.title = title;
        self.description = description;
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn ensure_valid(title: &str, description: &str) -> CourseResult<()> {
    if title.is_empty() {
        return Err(CourseError::EmptyTitle);
    }
    if description.is_empty() {
        return Err(CourseError::EmptyDescription);
    }
    Ok(())
}

/// Payload for creating a course.
///
/// Missing fields decode as empty strings so they surface as `required`
/// violations.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateCourse {
    #[validate(length(min = 1, code = "required"))]
    #[schema(example = "E2E Testing")]
    pub title: String,
    #[validate(length(min = 1, code = "required"))]
    #[schema(example = "How to test everything.")]
    pub description: String,
}

/// Payload for replacing a course's title and description.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateCourse {
    #[validate(length(min = 1, code = "required"))]
    #[schema(example = "Advanced E2E Testing")]
    pub title: String,
    #[validate(length(min = 1, code = "required"))]
    #[schema(example = "Updated description.")]
    pub description: String,
}

/// Wire representation of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// RFC 3339 timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            created_at: course.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_course_assigns_identity_and_timestamp() {
        let before = Utc::now().trunc_subsecs(6);
        let course = Course::new("Rust", "Ownership and borrowing").unwrap();
        let after = Utc::now();

        assert!(!course.id().is_nil());
        assert_eq!(course.id().get_version_num(), 7);
        assert_eq!(course.title(), "Rust");
        assert_eq!(course.description(), "Ownership and borrowing");
        assert!(course.created_at() >= before && course.created_at() <= after);
    }

    #[test]
    fn test_new_courses_get_distinct_ids() {
        let a = Course::new("A", "first").unwrap();
        let b = Course::new("B", "second").unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_empty_title_is_checked_first() {
        assert!(matches!(Course::new("", "set"), Err(CourseError::EmptyTitle)));
        assert!(matches!(Course::new("", ""), Err(CourseError::EmptyTitle)));
        assert!(matches!(
            Course::new("set", ""),
            Err(CourseError::EmptyDescription)
        ));
    }

    #[test]
    fn test_update_replaces_text_and_keeps_identity() {
        let mut course = Course::new("Rust", "Basics").unwrap();
        let (id, created_at) = (course.id(), course.created_at());

        course.update("Advanced Rust", "Lifetimes").unwrap();

        assert_eq!(course.id(), id);
        assert_eq!(course.created_at(), created_at);
        assert_eq!(course.title(), "Advanced Rust");
        assert_eq!(course.description(), "Lifetimes");
    }

    #[test]
    fn test_failed_update_leaves_course_untouched() {
        let mut course = Course::new("Rust", "Basics").unwrap();
        let original = course.clone();

        assert!(matches!(
            course.update("New", ""),
            Err(CourseError::EmptyDescription)
        ));
        assert!(matches!(
            course.update("", "New"),
            Err(CourseError::EmptyTitle)
        ));
        assert_eq!(course, original);
    }

    #[test]
    fn test_missing_payload_fields_default_to_empty() {
        let input: CreateCourse = serde_json::from_str("{}").unwrap();
        assert!(input.title.is_empty());
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_response_serializes_rfc3339_timestamp() {
        let created_at = DateTime::parse_from_rfc3339("2025-06-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let course = Course::restore(Uuid::nil(), "T".into(), "D".into(), created_at);

        let json = serde_json::to_value(CourseResponse::from(course)).unwrap();
        assert_eq!(json["created_at"], "2025-06-01T10:00:00Z");
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
    }
}
