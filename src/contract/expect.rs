//! Assertions over observed responses.
//!
//! Every check returns `Err(AssertionError)` describing the mismatch, so case
//! bodies can chain them with `?`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::client::ApiResponse;
use crate::models::Envelope;

/// A failed contract expectation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}{}", body_suffix(.body))]
pub struct AssertionError {
    pub message: String,
    /// Response body excerpt, when the body helps explain the failure.
    pub body: Option<String>,
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!("\nResponse body: {body}"),
        None => String::new(),
    }
}

impl AssertionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            body: None,
        }
    }

    /// Attach the response body.
    pub fn with_body(mut self, response: &ApiResponse) -> Self {
        self.body = Some(response.excerpt());
        self
    }
}

type Check<T = ()> = Result<T, AssertionError>;

/// Fail unless `condition` holds.
pub fn ensure(condition: bool, message: impl Into<String>) -> Check {
    if condition { Ok(()) } else { Err(AssertionError::new(message)) }
}

/// Status equals `expected`.
pub fn status(response: &ApiResponse, expected: u16) -> Check {
    if response.status == expected {
        return Ok(());
    }
    Err(AssertionError::new(format!(
        "{path}: expected status {expected}, got {actual}",
        path = response.path,
        actual = response.status
    ))
    .with_body(response))
}

/// Status is one of `allowed`. Returns the observed status.
pub fn status_in(response: &ApiResponse, allowed: &[u16]) -> Check<u16> {
    if allowed.contains(&response.status) {
        return Ok(response.status);
    }
    Err(AssertionError::new(format!(
        "{path}: unexpected status {actual}, expected one of {allowed:?}",
        path = response.path,
        actual = response.status
    ))
    .with_body(response))
}

/// Body parses as JSON.
pub fn json(response: &ApiResponse) -> Check<Value> {
    serde_json::from_str(&response.body).map_err(|e| {
        AssertionError::new(format!("{}: body is not JSON: {e}", response.path)).with_body(response)
    })
}

/// Body decodes as an envelope around `T`.
pub fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Check<Envelope<T>> {
    response.envelope().map_err(|e| {
        AssertionError::new(format!("{}: body does not match the envelope model: {e}", response.path))
            .with_body(response)
    })
}

/// Value at JSON pointer `pointer` (e.g. "/data/content"). The key must exist, null is allowed.
pub fn field<'a>(value: &'a Value, pointer: &str) -> Check<&'a Value> {
    value
        .pointer(pointer)
        .ok_or_else(|| AssertionError::new(format!("missing property {pointer}")))
}

/// Property `pointer` equals `expected`.
pub fn field_eq(value: &Value, pointer: &str, expected: impl Into<Value>) -> Check {
    let expected = expected.into();
    let actual = field(value, pointer)?;
    if *actual == expected {
        return Ok(());
    }
    Err(AssertionError::new(format!(
        "property {pointer}: expected {expected}, got {actual}"
    )))
}

/// Property `pointer` is an array.
pub fn array<'a>(value: &'a Value, pointer: &str) -> Check<&'a Vec<Value>> {
    match field(value, pointer)? {
        Value::Array(items) => Ok(items),
        other => Err(AssertionError::new(format!(
            "property {pointer}: expected array, got {}",
            type_name(other)
        ))),
    }
}

/// Property `pointer` is an integer.
pub fn integer(value: &Value, pointer: &str) -> Check<i64> {
    let actual = field(value, pointer)?;
    actual
        .as_i64()
        .ok_or_else(|| AssertionError::new(format!("property {pointer}: expected integer, got {actual}")))
}

/// Property `pointer` is any JSON number.
pub fn number(value: &Value, pointer: &str) -> Check<f64> {
    let actual = field(value, pointer)?;
    actual
        .as_f64()
        .ok_or_else(|| AssertionError::new(format!("property {pointer}: expected number, got {actual}")))
}

/// Property `pointer` is a string.
pub fn string<'a>(value: &'a Value, pointer: &str) -> Check<&'a str> {
    let actual = field(value, pointer)?;
    actual
        .as_str()
        .ok_or_else(|| AssertionError::new(format!("property {pointer}: expected string, got {actual}")))
}

/// Property `pointer` is null or an array.
pub fn null_or_array(value: &Value, pointer: &str) -> Check {
    match field(value, pointer)? {
        Value::Null | Value::Array(_) => Ok(()),
        other => Err(AssertionError::new(format!(
            "property {pointer}: expected null or array, got {}",
            type_name(other)
        ))),
    }
}

/// Property `pointer` is present and null.
pub fn is_null(value: &Value, pointer: &str) -> Check {
    match field(value, pointer)? {
        Value::Null => Ok(()),
        other => Err(AssertionError::new(format!("property {pointer}: expected null, got {other}"))),
    }
}

/// Property `pointer` is present and either null or `{}`.
pub fn null_or_empty_object(value: &Value, pointer: &str) -> Check {
    match field(value, pointer)? {
        Value::Null => Ok(()),
        Value::Object(map) if map.is_empty() => Ok(()),
        other => Err(AssertionError::new(format!(
            "property {pointer}: expected null or empty object, got {other}"
        ))),
    }
}

/// `actual <= bound`.
pub fn at_most<T: PartialOrd + std::fmt::Display>(what: &str, actual: T, bound: T) -> Check {
    ensure(actual <= bound, format!("{what}: expected at most {bound}, got {actual}"))
}

/// Request finished within `budget`.
pub fn within(response: &ApiResponse, budget: Duration) -> Check {
    ensure(
        response.elapsed <= budget,
        format!(
            "{path}: took {} ms, budget {} ms",
            response.elapsed.as_millis(),
            budget.as_millis(),
            path = response.path
        ),
    )
}

/// `haystack` contains `needle`, ignoring case.
pub fn contains_ci(haystack: &str, needle: &str) -> Check {
    ensure(
        haystack.to_lowercase().contains(&needle.to_lowercase()),
        format!("{haystack:?} does not contain {needle:?}"),
    )
}

/// Envelope metadata reports `code`.
pub fn http_code(body: &Value, code: u16) -> Check {
    field_eq(body, "/metadata/httpCode", code)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
