//! Fixed-URL resource.
//!
//! A resource pins one URL template and sends every request through the
//! `Httpi` proxy it was created from, so `resource.get(config)` is the same as
//! setting `method` and `url` on `config` by hand and calling `send`.

use serde_json::Value;

use crate::client::Httpi;
use crate::dispatch::Dispatch;
use crate::error::HttpiError;
use crate::http::{HttpMethod, HttpResponse};
use crate::types::RequestConfig;

#[derive(Debug)]
pub struct HttpiResource<'a, D> {
    http: &'a Httpi<D>,
    url: String,
}

impl<'a, D> HttpiResource<'a, D> {
    pub fn new(http: &'a Httpi<D>, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Inject this resource's method and URL into `config`.
    ///
    /// JSONP requests additionally get the callback marker when neither the
    /// URL nor any param already carries it.
    pub fn prepare(&self, method: HttpMethod, mut config: RequestConfig) -> RequestConfig {
        config.method = method;
        config.url = self.url.clone();
        if method == HttpMethod::Jsonp {
            self.ensure_jsonp_callback(&mut config);
        }
        config
    }

    /// Make sure the JSONP callback marker appears in the URL or the params,
    /// adding it as a param if needed.
    pub fn ensure_jsonp_callback(&self, config: &mut RequestConfig) {
        let settings = self.http.config();
        let marker = settings.callback_marker.as_str();

        if self.url.contains(marker) {
            return;
        }

        let params = config.params.get_or_insert_with(Default::default);
        if params.values().any(|value| value.as_str() == Some(marker)) {
            return;
        }

        tracing::trace!(param = %settings.callback_param, "injecting jsonp callback");
        params.insert(
            settings.callback_param.clone(),
            Value::String(marker.to_string()),
        );
    }
}

impl<D: Dispatch> HttpiResource<'_, D> {
    pub async fn get(&self, config: RequestConfig) -> Result<HttpResponse, HttpiError> {
        self.http.send(self.prepare(HttpMethod::Get, config)).await
    }

    pub async fn post(&self, config: RequestConfig) -> Result<HttpResponse, HttpiError> {
        self.http.send(self.prepare(HttpMethod::Post, config)).await
    }

    pub async fn put(&self, config: RequestConfig) -> Result<HttpResponse, HttpiError> {
        self.http.send(self.prepare(HttpMethod::Put, config)).await
    }

    pub async fn delete(&self, config: RequestConfig) -> Result<HttpResponse, HttpiError> {
        self.http.send(self.prepare(HttpMethod::Delete, config)).await
    }

    pub async fn head(&self, config: RequestConfig) -> Result<HttpResponse, HttpiError> {
        self.http.send(self.prepare(HttpMethod::Head, config)).await
    }

    pub async fn jsonp(&self, config: RequestConfig) -> Result<HttpResponse, HttpiError> {
        self.http.send(self.prepare(HttpMethod::Jsonp, config)).await
    }
}
