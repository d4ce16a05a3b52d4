//! Turns `validator` failures into structured [`AppError`] values.
//!
//! Every violated constraint becomes one detail entry carrying the field
//! path, the constraint tag and its parameters, so a client sees all
//! failing fields in one response.

use crate::errors::{AppError, ErrorCode};
use serde_json::{Map, Value, json};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Cause of every aggregate validation error.
#[derive(Debug, Error)]
#[error("validation failed")]
pub struct ValidationFailed;

/// Validate `payload` against its declared constraints.
///
/// ```rust
/// use axum_helpers::validation::{validate, ValidationFailed};
/// use validator::Validate;
///
/// #[derive(Validate)]
/// struct Input {
///     #[validate(length(min = 1, code = "required"))]
///     title: String,
/// }
///
/// let err = validate(&Input { title: String::new() }).unwrap_err();
/// assert_eq!(err.details().len(), 1);
/// assert!(err.find_cause::<ValidationFailed>().is_some());
/// ```
pub fn validate<T: Validate>(payload: &T) -> Result<(), AppError> {
    let Err(errors) = payload.validate() else {
        return Ok(());
    };

    let mut violations = Vec::new();
    collect_violations(&errors, &[], &mut violations);

    if violations.is_empty() {
        let mut context = Map::new();
        context.insert("reason".into(), json!("validator reported no field violations"));
        return Err(AppError::internal(errors, context));
    }

    violations.sort_by(|a, b| a.0.cmp(&b.0));
    let details = violations
        .into_iter()
        .map(|(path, err)| field_detail(render_path(&path), err))
        .collect();

    Err(
        AppError::wrap(ValidationFailed, "Request validation failed", ErrorCode::Invalid)
            .with_details(details),
    )
}

/// One step of a field path. List indices order numerically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum PathSegment {
    Field(String),
    Index(usize),
}

fn collect_violations<'a>(
    errors: &'a ValidationErrors,
    prefix: &[PathSegment],
    out: &mut Vec<(Vec<PathSegment>, &'a ValidationError)>,
) {
    for (field, kind) in errors.errors() {
        let mut path = prefix.to_vec();
        path.push(PathSegment::Field(field.to_string()));
        match kind {
            ValidationErrorsKind::Field(violations) => {
                out.extend(violations.iter().map(|v| (path.clone(), v)));
            }
            ValidationErrorsKind::Struct(nested) => collect_violations(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let mut item = path.clone();
                    item.push(PathSegment::Index(*index));
                    collect_violations(nested, &item, out);
                }
            }
        }
    }
}

/// `lessons[1].name` style rendering.
fn render_path(path: &[PathSegment]) -> String {
    let mut rendered = String::new();
    for segment in path {
        match segment {
            PathSegment::Field(name) if rendered.is_empty() => rendered.push_str(name),
            PathSegment::Field(name) => {
                rendered.push('.');
                rendered.push_str(name);
            }
            PathSegment::Index(index) => rendered.push_str(&format!("[{index}]")),
        }
    }
    rendered
}

fn field_detail(field: String, err: &ValidationError) -> AppError {
    AppError::new(
        format!("validation failed on field '{field}'"),
        ErrorCode::Invalid,
    )
    .with_context("tag", err.code.to_string())
    .with_context("param", render_params(err))
    .with_context("field", field)
}

/// `k=v` pairs sorted by key, skipping the rejected value itself.
fn render_params(err: &ValidationError) -> String {
    let mut params: Vec<(String, String)> = err
        .params
        .iter()
        .filter_map(|(key, value)| {
            if key == "value" {
                return None;
            }
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.to_string(), value))
        })
        .collect();
    params.sort();
    params
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}
