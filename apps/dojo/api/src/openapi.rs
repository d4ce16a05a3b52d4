use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dojo API",
        version = "0.1.0",
        description = "Course management API"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/v1/courses", api = domain_courses::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
