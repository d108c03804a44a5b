//! The seam between request building and the network.
//!
//! # Design
//! The core never performs I/O. `Httpi` is handed a `Dispatch`
//! implementation at construction time and forwards every built
//! `HttpRequest` to it. Retries, timeouts and response interpretation all
//! belong to the implementation, not to this crate.

use std::future::Future;

use crate::http::{HttpRequest, HttpResponse};

/// Executes a built request and reports the response.
pub trait Dispatch {
    type Error: std::error::Error + Send + Sync + 'static;

    fn dispatch(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send;
}

/// Adapts an async function or closure into a `Dispatch`.
///
/// ```ignore
/// let http = Httpi::new(FnDispatcher::new(|req: HttpRequest| async move {
///     transport.execute(req).await
/// }));
/// ```
#[derive(Debug, Clone)]
pub struct FnDispatcher<F> {
    f: F,
}

impl<F> FnDispatcher<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, Fut, E> Dispatch for FnDispatcher<F>
where
    F: Fn(HttpRequest) -> Fut,
    Fut: Future<Output = Result<HttpResponse, E>> + Send,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn dispatch(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send {
        (self.f)(request)
    }
}
