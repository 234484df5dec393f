//! Core type definitions for shapekit.
//!
//! This crate defines the unit of data that flows through the response
//! formatter:
//! - [`Response`]: a decoded JSON object plus a completeness flag
//! - [`Data`]: the object-shaped tree the formatter mutates
//!
//! Decoding and encoding of payloads on the wire belong to the routing layer,
//! not here.

mod response;

pub use response::{Data, Response};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building a [`Response`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("response data must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}
