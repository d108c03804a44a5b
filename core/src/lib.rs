//! URL-interpolating request builder.
//!
//! # Overview
//! Resolves URL templates such as `/users/:userId(/posts/:postId)` against a
//! request's `data` and `params` collections, consuming every value it bakes
//! into the URL so the remainder can be sent as query string and body. The
//! resulting `HttpRequest` is plain data; a caller-supplied `Dispatch`
//! implementation performs the actual round-trip (host-does-IO pattern).
//!
//! # Design
//! - `interpolate` is pure and synchronous; its only side effect is removing
//!   consumed keys from the `&mut` collections it is given.
//! - `Httpi` wires interpolation to a dispatcher passed in by the caller.
//!   There is no global registry.
//! - `HttpiResource` pins a URL and exposes one method per verb, including
//!   JSONP with callback-marker injection.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod interpolate;
pub mod resource;
pub mod types;

pub use client::Httpi;
pub use config::HttpiConfig;
pub use dispatch::{Dispatch, FnDispatcher};
pub use error::HttpiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use interpolate::{clean_url, interpolate_url, pop_first_key};
pub use resource::HttpiResource;
pub use types::{Params, RequestConfig};
