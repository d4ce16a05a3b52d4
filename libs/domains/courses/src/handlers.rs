use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ErrorCode, ErrorDetail, ErrorResponse, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

use crate::error::CourseResult;
use crate::models::{CourseResponse, CreateCourse, UpdateCourse};
use crate::repository::CourseRepository;
use crate::service::CourseService;

pub const TAG: &str = "courses";

/// OpenAPI documentation for Courses API
#[derive(OpenApi)]
#[openapi(
    paths(create_course, get_course, update_course, delete_course),
    components(
        schemas(CourseResponse, CreateCourse, UpdateCourse, ErrorResponse, ErrorDetail, ErrorCode),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Course management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the course router with all HTTP endpoints
pub fn router<R: CourseRepository + 'static>(service: CourseService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_course::<R>))
        .route(
            "/{id}",
            get(get_course::<R>)
                .put(update_course::<R>)
                .delete(delete_course::<R>),
        )
        .with_state(shared_service)
}

/// Create a new course
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateCourse,
    responses(
        (status = 201, description = "Course created successfully", body = CourseResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_course<R: CourseRepository>(
    State(service): State<Arc<CourseService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCourse>,
) -> CourseResult<impl IntoResponse> {
    let course = service.create_course(input).await?;
    info!(course_id = %course.id(), "course created successfully");

    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}

/// Get a course by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_course<R: CourseRepository>(
    State(service): State<Arc<CourseService<R>>>,
    UuidPath(id): UuidPath,
) -> CourseResult<Json<CourseResponse>> {
    let course = service.get_course_by_id(id).await?;
    Ok(Json(course.into()))
}

/// Replace a course's title and description
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = UpdateCourse,
    responses(
        (status = 200, description = "Course updated successfully", body = CourseResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_course<R: CourseRepository>(
    State(service): State<Arc<CourseService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCourse>,
) -> CourseResult<Json<CourseResponse>> {
    let course = service.update_course(id, input).await?;
    info!(course_id = %id, "course updated successfully");

    Ok(Json(course.into()))
}

/// Delete a course
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Course deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_course<R: CourseRepository>(
    State(service): State<Arc<CourseService<R>>>,
    UuidPath(id): UuidPath,
) -> CourseResult<impl IntoResponse> {
    service.delete_course_by_id(id).await?;
    info!(course_id = %id, "course deleted successfully");

    Ok(StatusCode::NO_CONTENT)
}
