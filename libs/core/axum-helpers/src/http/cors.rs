use axum::http::{HeaderName, HeaderValue, Method};
use core_config::cors::CorsConfig;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer, ExposeHeaders};
use tracing::info;

/// Builds a CORS layer from [`CorsConfig`].
///
/// A `*` entry in the origin, method or header lists is mirrored back from
/// the request when credentials are allowed, since browsers reject a literal
/// wildcard together with credentials. Exposed headers have no request value
/// to mirror, so `*` there is only accepted without credentials.
///
/// # Errors
/// Returns `InvalidInput` when an origin, method or header name does not
/// parse, or when `*` exposed headers are combined with credentials.
pub fn create_cors_layer(config: &CorsConfig) -> io::Result<CorsLayer> {
    let origin = if config.allows_any_origin() {
        if config.allow_credentials {
            AllowOrigin::mirror_request()
        } else {
            AllowOrigin::any()
        }
    } else {
        let origins = parse_all(&config.allowed_origins, |s| s.parse::<HeaderValue>())?;
        AllowOrigin::list(origins)
    };

    let methods = if is_wildcard(&config.allowed_methods) {
        if config.allow_credentials {
            AllowMethods::mirror_request()
        } else {
            AllowMethods::any()
        }
    } else {
        AllowMethods::list(parse_all(&config.allowed_methods, |s| {
            Method::from_bytes(s.to_ascii_uppercase().as_bytes())
        })?)
    };

    let headers = if is_wildcard(&config.allowed_headers) {
        if config.allow_credentials {
            AllowHeaders::mirror_request()
        } else {
            AllowHeaders::any()
        }
    } else {
        AllowHeaders::list(parse_all(&config.allowed_headers, |s| {
            s.parse::<HeaderName>()
        })?)
    };

    let exposed = if is_wildcard(&config.exposed_headers) {
        if config.allow_credentials {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "CORS exposed headers cannot be '*' when credentials are allowed",
            ));
        }
        Some(ExposeHeaders::any())
    } else if config.exposed_headers.is_empty() {
        None
    } else {
        Some(ExposeHeaders::list(parse_all(&config.exposed_headers, |s| {
            s.parse::<HeaderName>()
        })?))
    };

    info!(
        origins = ?config.allowed_origins,
        credentials = config.allow_credentials,
        "CORS configured"
    );

    let mut layer = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(config.allow_credentials)
        .max_age(Duration::from_secs(3600));

    if let Some(exposed) = exposed {
        layer = layer.expose_headers(exposed);
    }

    Ok(layer)
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|value| value == "*")
}

fn parse_all<T, E, F>(values: &[String], parse: F) -> io::Result<Vec<T>>
where
    F: Fn(&str) -> Result<T, E>,
    E: std::fmt::Display,
{
    values
        .iter()
        .map(|value| {
            parse(value).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid CORS value '{value}': {e}"),
                )
            })
        })
        .collect()
}
