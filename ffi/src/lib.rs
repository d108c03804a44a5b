//! C-ABI wrapper around `httpi-core`.
//!
//! # Overview
//! Exposes URL interpolation and request building through `extern "C"`
//! functions so any language with a C FFI can resolve URL templates and get
//! back a ready-to-send request description. Collections travel as JSON
//! text; the host performs the actual HTTP round-trip.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A null collection argument means "absent", exactly like `None` in the
//!   core API. A null template or config is a `NullArg` error.
//! - The C caller owns all returned pointers and must call the matching
//!   `httpi_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use httpi_core::{HttpMethod, HttpiConfig, Params, RequestConfig};
use serde_json::Value;

use types::*;

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

/// Read a required C string argument.
fn read_str<'a>(ptr: *const c_char, name: &'static str) -> Result<&'a str, ArgError> {
    if ptr.is_null() {
        return Err(ArgError::Null(name));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| ArgError::Utf8(name))
}

/// Read an optional JSON argument; null means absent.
fn read_json(ptr: *const c_char, name: &'static str) -> Result<Option<Value>, ArgError> {
    if ptr.is_null() {
        return Ok(None);
    }
    let raw = read_str(ptr, name)?;
    serde_json::from_str(raw)
        .map(Some)
        .map_err(|e| ArgError::Json(name, e))
}

/// Read an optional JSON object argument; null means absent.
fn read_params(ptr: *const c_char, name: &'static str) -> Result<Option<Params>, ArgError> {
    match read_json(ptr, name)? {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(ArgError::NotObject(name)),
    }
}

fn read_config(ptr: *const c_char) -> Result<RequestConfig, ArgError> {
    let raw = read_str(ptr, "config_json")?;
    serde_json::from_str(raw).map_err(|e| ArgError::Json("config_json", e))
}

/// Read the arguments of `httpi_build_resource_request`; a null config is an
/// empty descriptor.
fn read_resource_args<'a>(
    url: *const c_char,
    method: *const c_char,
    config_json: *const c_char,
) -> Result<(&'a str, &'a str, RequestConfig), ArgError> {
    let url = read_str(url, "url")?;
    let method = read_str(method, "method")?;
    let config = if config_json.is_null() {
        RequestConfig::default()
    } else {
        read_config(config_json)?
    };
    Ok((url, method, config))
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a request builder.
///
/// `config_json` may be null for defaults, or a JSON object with optional
/// `callback_marker` / `callback_param` fields. Returns null if the config
/// is not valid JSON or if an internal panic occurs. The caller must free
/// the returned pointer with `httpi_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn httpi_client_new(config_json: *const c_char) -> *mut FfiHttpi {
    catch_unwind(|| {
        let config = if config_json.is_null() {
            HttpiConfig::default()
        } else {
            let parsed = read_str(config_json, "config_json")
                .ok()
                .and_then(|raw| serde_json::from_str::<HttpiConfig>(raw).ok());
            match parsed {
                Some(config) => config,
                None => return std::ptr::null_mut(),
            }
        };
        let inner = httpi_core::Httpi::with_config((), config);
        Box::into_raw(Box::new(FfiHttpi { inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a builder created by `httpi_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn httpi_client_free(client: *mut FfiHttpi) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

/// Resolve `template` against `data_json` (first) and `params_json`.
///
/// Either collection may be null. The result carries the resolved URL and
/// the JSON of each collection with consumed keys removed. Free it with
/// `httpi_free_interpolation`.
#[unsafe(no_mangle)]
pub extern "C" fn httpi_interpolate(
    template: *const c_char,
    params_json: *const c_char,
    data_json: *const c_char,
) -> *mut FfiInterpolation {
    catch_unwind(|| {
        let run = || -> Result<*mut FfiInterpolation, ArgError> {
            let mut config = RequestConfig {
                url: read_str(template, "template")?.to_string(),
                params: read_params(params_json, "params_json")?,
                data: read_json(data_json, "data_json")?,
                ..RequestConfig::default()
            };
            config.resolve_url();
            Ok(FfiInterpolation::ok(
                config.url,
                config.params.map(|p| Value::Object(p).to_string()),
                config.data.map(|d| d.to_string()),
            ))
        };
        run().unwrap_or_else(|e| FfiInterpolation::error(e.code(), e.to_string()))
    })
    .unwrap_or_else(|_| FfiInterpolation::error(FfiErrorCode::Panic, "panic in httpi_interpolate".to_string()))
}

/// Collapse repeated slashes in `url` (keeping `scheme://`) and drop
/// trailing slashes. Returns null if `url` is null or not UTF-8. Free the
/// result with `httpi_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn httpi_clean_url(url: *const c_char) -> *mut c_char {
    catch_unwind(|| match read_str(url, "url") {
        Ok(url) => c_string(httpi_core::clean_url(url)),
        Err(_) => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Request building
// ---------------------------------------------------------------------------

/// Build a request from a JSON descriptor
/// (`{"method", "url", "headers", "params", "data"}`).
///
/// Free the result with `httpi_free_build_result`.
#[unsafe(no_mangle)]
pub extern "C" fn httpi_build_request(
    client: *const FfiHttpi,
    config_json: *const c_char,
) -> *mut FfiBuildResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiBuildResult::error(FfiErrorCode::NullArg, "null argument: client".to_string());
        }
        let client = unsafe { &*client };
        let config = match read_config(config_json) {
            Ok(config) => config,
            Err(e) => return FfiBuildResult::error(e.code(), e.to_string()),
        };
        match client.inner.build_request(config) {
            Ok(req) => FfiBuildResult::ok(req),
            Err(e) => FfiBuildResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiBuildResult::error(FfiErrorCode::Panic, "panic in httpi_build_request".to_string()))
}

/// Build a request for the fixed resource `url` with the given `method`
/// name (`get`, `post`, `put`, `delete`, `head` or `jsonp`).
///
/// The descriptor's own `method` and `url` are overridden. `jsonp` requests
/// get the callback marker injected when missing. `config_json` may be
/// null for an empty descriptor.
#[unsafe(no_mangle)]
pub extern "C" fn httpi_build_resource_request(
    client: *const FfiHttpi,
    url: *const c_char,
    method: *const c_char,
    config_json: *const c_char,
) -> *mut FfiBuildResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiBuildResult::error(FfiErrorCode::NullArg, "null argument: client".to_string());
        }
        let client = unsafe { &*client };

        let (url, method, config) = match read_resource_args(url, method, config_json) {
            Ok(args) => args,
            Err(e) => return FfiBuildResult::error(e.code(), e.to_string()),
        };

        let method: HttpMethod = match method.parse() {
            Ok(method) => method,
            Err(e) => return FfiBuildResult::from_error(e),
        };
        let config = client.inner.resource(url).prepare(method, config);
        match client.inner.build_request(config) {
            Ok(req) => FfiBuildResult::ok(req),
            Err(e) => FfiBuildResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| {
        FfiBuildResult::error(FfiErrorCode::Panic, "panic in httpi_build_resource_request".to_string())
    })
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiInterpolation` returned by `httpi_interpolate`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn httpi_free_interpolation(result: *mut FfiInterpolation) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        free_c_string(result.url);
        free_c_string(result.params_json);
        free_c_string(result.data_json);
    });
}

/// Free an `FfiBuildResult` returned by any `httpi_build_*` function,
/// including the request it points to. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn httpi_free_build_result(result: *mut FfiBuildResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        FfiHttpRequest::free(result.request);
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn httpi_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn cstr<'a>(ptr: *const c_char) -> &'a str {
        assert!(!ptr.is_null());
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
    }

    fn json(ptr: *const c_char) -> Value {
        serde_json::from_str(cstr(ptr)).unwrap()
    }

    fn new_client() -> *mut FfiHttpi {
        let client = httpi_client_new(std::ptr::null());
        assert!(!client.is_null());
        client
    }

    // --- client lifecycle ---

    #[test]
    fn client_new_and_free() {
        let client = new_client();
        httpi_client_free(client);
    }

    #[test]
    fn client_new_with_config() {
        let config = CString::new(r#"{"callback_marker":"CB"}"#).unwrap();
        let client = httpi_client_new(config.as_ptr());
        assert!(!client.is_null());
        assert_eq!(unsafe { &*client }.inner.config().callback_marker, "CB");
        httpi_client_free(client);
    }

    #[test]
    fn client_new_bad_config_returns_null() {
        let config = CString::new("not json").unwrap();
        assert!(httpi_client_new(config.as_ptr()).is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        httpi_client_free(std::ptr::null_mut());
    }

    // --- interpolation ---

    #[test]
    fn interpolate_pops_from_data_first() {
        let template = CString::new("/users/:id/posts/:postId").unwrap();
        let params = CString::new(r#"{"id":1,"postId":9,"page":2}"#).unwrap();
        let data = CString::new(r#"{"id":5,"title":"Hi"}"#).unwrap();

        let result = httpi_interpolate(template.as_ptr(), params.as_ptr(), data.as_ptr());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());
        assert_eq!(cstr(r.url), "/users/5/posts/9");
        assert_eq!(json(r.params_json), serde_json::json!({"id": 1, "page": 2}));
        assert_eq!(json(r.data_json), serde_json::json!({"title": "Hi"}));

        httpi_free_interpolation(result);
    }

    #[test]
    fn interpolate_null_collections_are_absent() {
        let template = CString::new("http://host//a/:id/").unwrap();
        let result = httpi_interpolate(template.as_ptr(), std::ptr::null(), std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(cstr(r.url), "http://host/a");
        assert!(r.params_json.is_null());
        assert!(r.data_json.is_null());
        httpi_free_interpolation(result);
    }

    #[test]
    fn interpolate_null_template_is_null_arg() {
        let result = httpi_interpolate(std::ptr::null(), std::ptr::null(), std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);
        assert_eq!(cstr(r.error_message), "null argument: template");
        assert!(r.url.is_null());
        httpi_free_interpolation(result);
    }

    #[test]
    fn interpolate_rejects_non_object_params() {
        let template = CString::new("/a/:id").unwrap();
        let params = CString::new("[1,2]").unwrap();
        let result = httpi_interpolate(template.as_ptr(), params.as_ptr(), std::ptr::null());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::InvalidJson);
        httpi_free_interpolation(result);
    }

    #[test]
    fn interpolate_rejects_malformed_json() {
        let template = CString::new("/a/:id").unwrap();
        let data = CString::new("{").unwrap();
        let result = httpi_interpolate(template.as_ptr(), std::ptr::null(), data.as_ptr());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::InvalidJson);
        httpi_free_interpolation(result);
    }

    #[test]
    fn clean_url_collapses_slashes() {
        let url = CString::new("https://x.test//a///b/").unwrap();
        let cleaned = httpi_clean_url(url.as_ptr());
        assert_eq!(cstr(cleaned), "https://x.test/a/b");
        httpi_free_string(cleaned);
        assert!(httpi_clean_url(std::ptr::null()).is_null());
    }

    // --- request building ---

    #[test]
    fn build_request_produces_post_with_json_body() {
        let client = new_client();
        let config = CString::new(
            r#"{"method":"post","url":"/users/:id","params":{"id":3,"dry":true},"data":{"name":"Ann"}}"#,
        )
        .unwrap();

        let result = httpi_build_request(client, config.as_ptr());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        let req = unsafe { &*r.request };
        assert_eq!(req.method, FfiHttpMethod::Post);
        assert_eq!(cstr(req.url), "/users/3?dry=true");
        assert_eq!(req.headers_len, 1);
        let header = unsafe { &*req.headers };
        assert_eq!(cstr(header.key), "content-type");
        assert_eq!(cstr(header.value), "application/json");
        assert_eq!(json(req.body), serde_json::json!({"name": "Ann"}));

        httpi_free_build_result(result);
        httpi_client_free(client);
    }

    #[test]
    fn build_request_without_body() {
        let client = new_client();
        let config = CString::new(r#"{"url":"/users/:id","params":{"id":3}}"#).unwrap();
        let result = httpi_build_request(client, config.as_ptr());
        let req = unsafe { &*(*result).request };
        assert_eq!(req.method, FfiHttpMethod::Get);
        assert!(req.body.is_null());
        assert!(req.headers.is_null());
        assert_eq!(req.headers_len, 0);
        httpi_free_build_result(result);
        httpi_client_free(client);
    }

    #[test]
    fn build_request_invalid_method_is_invalid_json() {
        let client = new_client();
        let config = CString::new(r#"{"method":"brew","url":"/"}"#).unwrap();
        let result = httpi_build_request(client, config.as_ptr());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::InvalidJson);
        assert!(r.request.is_null());
        httpi_free_build_result(result);
        httpi_client_free(client);
    }

    #[test]
    fn build_request_null_args() {
        let config = CString::new(r#"{"url":"/"}"#).unwrap();
        let result = httpi_build_request(std::ptr::null(), config.as_ptr());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);
        httpi_free_build_result(result);

        let client = new_client();
        let result = httpi_build_request(client, std::ptr::null());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);
        httpi_free_build_result(result);
        httpi_client_free(client);
    }

    #[test]
    fn resource_request_injects_jsonp_callback() {
        let client = new_client();
        let url = CString::new("http://api.test/feed/:topic").unwrap();
        let method = CString::new("jsonp").unwrap();
        let config = CString::new(r#"{"params":{"topic":"rust"}}"#).unwrap();

        let result = httpi_build_resource_request(client, url.as_ptr(), method.as_ptr(), config.as_ptr());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        let req = unsafe { &*r.request };
        assert_eq!(req.method, FfiHttpMethod::Jsonp);
        assert_eq!(cstr(req.url), "http://api.test/feed/rust?callback=JSON_CALLBACK");

        httpi_free_build_result(result);
        httpi_client_free(client);
    }

    #[test]
    fn resource_request_overrides_descriptor_url() {
        let client = new_client();
        let url = CString::new("/users/:id").unwrap();
        let method = CString::new("DELETE").unwrap();
        let config = CString::new(r#"{"url":"/ignored","params":{"id":4}}"#).unwrap();

        let result = httpi_build_resource_request(client, url.as_ptr(), method.as_ptr(), config.as_ptr());
        let req = unsafe { &*(*result).request };
        assert_eq!(req.method, FfiHttpMethod::Delete);
        assert_eq!(cstr(req.url), "/users/4");

        httpi_free_build_result(result);
        httpi_client_free(client);
    }

    #[test]
    fn resource_request_unknown_method() {
        let client = new_client();
        let url = CString::new("/users").unwrap();
        let method = CString::new("teleport").unwrap();

        let result = httpi_build_resource_request(client, url.as_ptr(), method.as_ptr(), std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::InvalidMethod);
        assert_eq!(cstr(r.error_message), "invalid http method: teleport");

        httpi_free_build_result(result);
        httpi_client_free(client);
    }

    // --- free functions ---

    #[test]
    fn free_functions_accept_null() {
        httpi_free_interpolation(std::ptr::null_mut());
        httpi_free_build_result(std::ptr::null_mut());
        httpi_free_string(std::ptr::null_mut());
    }
}
