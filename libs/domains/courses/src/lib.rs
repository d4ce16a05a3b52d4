//! Courses Domain
//!
//! Course lifecycle: creation, lookup, update and deletion, with input
//! validation and typed errors shared with the HTTP layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Course entity, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_courses::{
//!     handlers,
//!     repository::InMemoryCourseRepository,
//!     service::CourseService,
//! };
//!
//! let repository = InMemoryCourseRepository::new();
//! let service = CourseService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CourseError, CourseResult};
pub use models::{Course, CourseResponse, CreateCourse, UpdateCourse};
pub use postgres::PgCourseRepository;
pub use repository::{CourseRepository, InMemoryCourseRepository};
pub use service::CourseService;
