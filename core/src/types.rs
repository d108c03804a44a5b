//! Request descriptor types.
//!
//! # Design
//! `RequestConfig` is what a caller hands to `Httpi`: a URL template plus the
//! `params` and `data` collections its labels are resolved against. It is
//! serde-friendly so the FFI layer and the test vectors can describe requests
//! as JSON. `data` stays an arbitrary `Value` because a body does not have to
//! be an object; only an object body takes part in label lookup.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::HttpMethod;
use crate::interpolate::interpolate_url;

/// A mutable key/value collection consulted during interpolation.
pub type Params = Map<String, Value>;

/// Caller-supplied description of an outgoing request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RequestConfig {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Interpolate `url` in place, popping label values from `data` first
    /// and `params` second.
    ///
    /// Absent collections, and a `data` payload that is not an object, are
    /// simply skipped.
    pub fn resolve_url(&mut self) {
        let mut collections: Vec<&mut Params> = Vec::with_capacity(2);
        if let Some(Value::Object(data)) = self.data.as_mut() {
            collections.push(data);
        }
        if let Some(params) = self.params.as_mut() {
            collections.push(params);
        }
        self.url = interpolate_url(&self.url, &mut collections);
    }
}
