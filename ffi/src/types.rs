//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Collections cross the boundary as JSON
//! text. Conversion functions live here to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use httpi_core::{HttpMethod, HttpiError};
use thiserror::Error;

/// Opaque handle to an `Httpi` builder. C callers receive a pointer to this
/// and pass it back into every request-building function.
///
/// The handle never dispatches; the C host executes the built requests.
pub struct FfiHttpi {
    pub(crate) inner: httpi_core::Httpi<()>,
}

/// Allocate a C string, falling back to an empty string if `s` contains an
/// interior NUL byte.
pub(crate) fn c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

/// Free a C string previously produced by `c_string`. Null is a no-op.
pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
    Head = 4,
    Jsonp = 5,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
            HttpMethod::Head => FfiHttpMethod::Head,
            HttpMethod::Jsonp => FfiHttpMethod::Jsonp,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// `url` already carries the query string. `body` is null when the request
/// has no body.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: httpi_core::HttpRequest) -> *mut Self {
        let url = c_string(req.url);
        let body = req.body.map(c_string).unwrap_or(std::ptr::null_mut());

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
        }))
    }

    /// Release a request produced by `from_core`. Null is a no-op.
    pub(crate) fn free(req: *mut Self) {
        if req.is_null() {
            return;
        }
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers: Box<[FfiHeader]> = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in result envelopes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidJson = 1,
    InvalidMethod = 2,
    Serialization = 3,
    Panic = 4,
    NullArg = 5,
    InvalidUtf8 = 6,
    Dispatch = 7,
}

/// Result of `httpi_interpolate`.
///
/// On success `url` holds the resolved URL and `params_json` / `data_json`
/// hold what is left of the collections (null when the input collection was
/// null). On failure `error_code` and `error_message` are set and every
/// other pointer is null.
#[repr(C)]
pub struct FfiInterpolation {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub url: *mut c_char,
    pub params_json: *mut c_char,
    pub data_json: *mut c_char,
}

impl FfiInterpolation {
    pub(crate) fn ok(url: String, params_json: Option<String>, data_json: Option<String>) -> *mut Self {
        Box::into_raw(Box::new(FfiInterpolation {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            url: c_string(url),
            params_json: params_json.map(c_string).unwrap_or(std::ptr::null_mut()),
            data_json: data_json.map(c_string).unwrap_or(std::ptr::null_mut()),
        }))
    }

    pub(crate) fn error(error_code: FfiErrorCode, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiInterpolation {
            error_code,
            error_message: c_string(msg),
            url: std::ptr::null_mut(),
            params_json: std::ptr::null_mut(),
            data_json: std::ptr::null_mut(),
        }))
    }
}

/// Result envelope for request-building functions.
///
/// On success `error_code` is `Ok` and `request` points to the built request.
/// On failure `request` is null and `error_message` describes the problem.
#[repr(C)]
pub struct FfiBuildResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub request: *mut FfiHttpRequest,
}

impl FfiBuildResult {
    pub(crate) fn ok(req: httpi_core::HttpRequest) -> *mut Self {
        Box::into_raw(Box::new(FfiBuildResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            request: FfiHttpRequest::from_core(req),
        }))
    }

    pub(crate) fn error(error_code: FfiErrorCode, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiBuildResult {
            error_code,
            error_message: c_string(msg),
            request: std::ptr::null_mut(),
        }))
    }

    /// Build an error result from an `HttpiError`.
    pub(crate) fn from_error(err: HttpiError) -> *mut Self {
        let code = match &err {
            HttpiError::InvalidMethod(_) => FfiErrorCode::InvalidMethod,
            HttpiError::Serialization(_) => FfiErrorCode::Serialization,
            HttpiError::Dispatch(_) => FfiErrorCode::Dispatch,
        };
        Self::error(code, err.to_string())
    }
}

/// Failure while reading arguments handed over by C.
#[derive(Debug, Error)]
pub(crate) enum ArgError {
    #[error("null argument: {0}")]
    Null(&'static str),
    #[error("argument is not valid UTF-8: {0}")]
    Utf8(&'static str),
    #[error("invalid JSON in {0}: {1}")]
    Json(&'static str, #[source] serde_json::Error),
    #[error("{0} must be a JSON object")]
    NotObject(&'static str),
}

impl ArgError {
    pub(crate) fn code(&self) -> FfiErrorCode {
        match self {
            ArgError::Null(_) => FfiErrorCode::NullArg,
            ArgError::Utf8(_) => FfiErrorCode::InvalidUtf8,
            ArgError::Json(..) | ArgError::NotObject(_) => FfiErrorCode::InvalidJson,
        }
    }
}
