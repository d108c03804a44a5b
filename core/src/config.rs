//! Configuration for the `Httpi` proxy.

use serde::{Deserialize, Serialize};

/// Marker AngularJS-style JSONP transports replace with a generated callback.
pub const DEFAULT_CALLBACK_MARKER: &str = "JSON_CALLBACK";

/// Query parameter that carries the marker when a resource has to inject it.
pub const DEFAULT_CALLBACK_PARAM: &str = "callback";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpiConfig {
    /// Token a JSONP request must carry somewhere in its URL or params.
    pub callback_marker: String,
    /// Param name used when the token has to be injected.
    pub callback_param: String,
}

impl Default for HttpiConfig {
    fn default() -> Self {
        Self {
            callback_marker: DEFAULT_CALLBACK_MARKER.to_string(),
            callback_param: DEFAULT_CALLBACK_PARAM.to_string(),
        }
    }
}
