//! Request builder and dispatching proxy.
//!
//! # Design
//! `Httpi` holds a dispatcher and a small config, nothing else. Building a
//! request is a pure step: the URL template is interpolated from
//! `data` (first) and `params`, leftover params become the query string and
//! leftover data becomes the body. `send` then forwards the built request to
//! the dispatcher and returns its result unchanged.

use serde_json::Value;
use url::form_urlencoded;

use crate::config::HttpiConfig;
use crate::dispatch::Dispatch;
use crate::error::HttpiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::interpolate::value_to_segment;
use crate::resource::HttpiResource;
use crate::types::{Params, RequestConfig};

const CONTENT_TYPE: &str = "content-type";
const APPLICATION_JSON: &str = "application/json";

/// Interpolating proxy in front of a `Dispatch` implementation.
#[derive(Debug, Clone)]
pub struct Httpi<D> {
    dispatcher: D,
    config: HttpiConfig,
}

impl<D> Httpi<D> {
    pub fn new(dispatcher: D) -> Self {
        Self::with_config(dispatcher, HttpiConfig::default())
    }

    pub fn with_config(dispatcher: D, config: HttpiConfig) -> Self {
        Self { dispatcher, config }
    }

    pub fn config(&self) -> &HttpiConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Create a resource that injects `url` into every request it sends.
    pub fn resource(&self, url: impl Into<String>) -> HttpiResource<'_, D> {
        HttpiResource::new(self, url)
    }

    /// Turn a descriptor into a plain-data request without sending it.
    pub fn build_request(&self, mut config: RequestConfig) -> Result<HttpRequest, HttpiError> {
        config.resolve_url();

        let mut url = config.url;
        if let Some(query) = config.params.as_ref().and_then(encode_query) {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
        }

        let mut headers = config.headers;
        let body = match config.data {
            None | Some(Value::Null) => None,
            Some(Value::Object(ref map)) if map.is_empty() => None,
            Some(Value::String(raw)) => Some(raw),
            Some(data) => {
                let body = serde_json::to_string(&data)
                    .map_err(|e| HttpiError::Serialization(e.to_string()))?;
                if !headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(CONTENT_TYPE)) {
                    headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
                }
                Some(body)
            }
        };

        Ok(HttpRequest {
            method: config.method,
            url,
            headers,
            body,
        })
    }
}

impl<D: Dispatch> Httpi<D> {
    /// Build `config` and hand it to the dispatcher.
    pub async fn send(&self, config: RequestConfig) -> Result<HttpResponse, HttpiError> {
        let request = self.build_request(config)?;
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");

        self.dispatcher.dispatch(request).await.map_err(|e| {
            tracing::debug!(error = %e, "dispatch failed");
            HttpiError::Dispatch(Box::new(e))
        })
    }
}

/// Encode leftover params as a query string. Arrays repeat their key and
/// `null` values are skipped. Returns `None` when nothing is left to send.
fn encode_query(params: &Params) -> Option<String> {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut appended = false;

    for (key, value) in params {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items.iter().filter(|item| !item.is_null()) {
                    serializer.append_pair(key, &value_to_segment(item));
                    appended = true;
                }
            }
            other => {
                serializer.append_pair(key, &value_to_segment(other));
                appended = true;
            }
        }
    }

    appended.then(|| serializer.finish())
}
