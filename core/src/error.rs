//! Error types for request building and dispatch.
//!
//! # Design
//! URL interpolation itself never fails. Errors only arise around it: an
//! unknown method name, a leftover body that cannot be serialized, or the
//! dispatcher reporting a transport failure. Dispatcher errors are boxed and
//! passed through untouched so the caller sees the transport's own error.

use thiserror::Error;

/// Errors returned by `Httpi` and `HttpiResource`.
#[derive(Debug, Error)]
pub enum HttpiError {
    /// The method name is not one of get, post, put, delete, head or jsonp.
    #[error("invalid http method: {0}")]
    InvalidMethod(String),

    /// The leftover request data could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The dispatcher failed to execute the request.
    #[error("dispatch failed: {0}")]
    Dispatch(#[source] Box<dyn std::error::Error + Send + Sync>),
}
