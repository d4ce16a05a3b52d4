use axum::Router;
use domain_courses::{CourseService, PgCourseRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgCourseRepository::new(
        state.db.clone(),
        state.config.database.statement_timeouts(),
    );
    let service = CourseService::new(repository);
    handlers::router(service)
}
