use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::recover::TIMEOUT_STATUS;
use crate::http::{
    RateLimit, create_cors_layer, panic_response, rate_limit, security_headers, timeout_response,
};
use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    middleware,
    response::Response,
};
use core_config::{cors::CorsConfig, server::ServerConfig};
use std::io;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span, info, info_span};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const RATE_LIMIT_EVICTION: Duration = Duration::from_secs(60);

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - Swagger UI at `/swagger-ui` serving `/api-docs/openapi.json`
/// - API routes nested under `/api` with security headers and a body limit
/// - 404 fallback returning the standard error envelope
///
/// Layers, outermost first: request id (set, then propagated to the
/// response), tracing, panic recovery, compression, CORS, rate limiting,
/// request timeout. Panics and timeouts answer with the error envelope.
///
/// Probes (`/healthz`, `/readyz`) are merged by the app after this call so
/// they stay outside the rate limiter.
///
/// # Errors
/// Returns `InvalidInput` when the CORS policy does not parse or the rate
/// limit is zero.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use utoipa::OpenApi;
/// use axum_helpers::server::create_router;
///
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let api_routes = Router::new().nest("/v1/courses", courses_router);
/// let router = create_router::<ApiDoc>(api_routes, &server_config, &cors_config).await?;
/// ```
pub async fn create_router<T>(
    apis: Router,
    server_config: &ServerConfig,
    cors_config: &CorsConfig,
) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = create_cors_layer(cors_config)?;

    let per_minute = NonZeroU32::new(server_config.rate_limit_per_minute).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "rate limit must be at least one request per minute",
        )
    })?;
    let limit = RateLimit::per_minute(per_minute);
    // exits on its own once the router and its limiter are dropped
    limit.spawn_eviction(RATE_LIMIT_EVICTION);
    let deadline = server_config.request_timeout();

    info!(
        rate_limit_per_minute = per_minute.get(),
        request_timeout = ?deadline,
        max_body_size = server_config.max_body_size,
        "HTTP middleware configured"
    );

    let apis = apis
        .layer(middleware::from_fn(security_headers))
        .layer(DefaultBodyLimit::max(server_config.max_body_size));

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(TIMEOUT_STATUS, deadline))
        .layer(middleware::map_response(move |response: Response| {
            timeout_response(deadline, response)
        }))
        .layer(middleware::from_fn_with_state(limit, rate_limit))
        .layer(cors_layer)
        // gzip, br, deflate, zstd based on Accept-Encoding
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    Ok(router)
}

/// Request span carrying the id assigned by `SetRequestIdLayer`.
fn request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
        request_id,
    )
}

/// Production-ready server with coordinated shutdown and cleanup.
///
/// Peer addresses are exposed as `ConnectInfo<SocketAddr>` for the rate
/// limiter. On SIGINT or SIGTERM in-flight requests drain while `cleanup`
/// runs, bounded by `shutdown_timeout`.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::create_production_app;
///
/// let cleanup = async move {
///     db.close().await.ok();
/// };
///
/// create_production_app(router, &config, config.shutdown_timeout(), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let shutdown_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        shutdown_handle.wait_for_signal().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed successfully"),
            Err(_) => tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let serve_result = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { coordinator.wait_for_signal().await })
    .await
    .inspect_err(|e| {
        tracing::error!("Server encountered an error: {:?}", e);
    });

    cleanup_handle.await.ok();

    serve_result
}
