//! Shared fixtures for formatter integration tests.

#![allow(dead_code)]

use shapekit_formatter::{Data, Response};
use serde_json::Value;

/// Unwraps a `json!` object literal into response data.
pub fn object(value: Value) -> Data {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture is not an object: {other}"),
    }
}

pub fn response(value: Value) -> Response {
    Response::complete(object(value))
}

pub fn partial(value: Value) -> Response {
    Response::partial(object(value))
}
