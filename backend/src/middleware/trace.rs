//! Tracing middleware attaching a request-scoped trace identifier.
//!
//! Each request runs inside a `request` span carrying the method, path and a
//! fresh [`TraceId`]. The identifier is installed in task-local storage so
//! domain errors pick it up, and it is echoed in a `trace-id` response
//! header.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, error, info, info_span};

use crate::domain::TraceId;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Tracing middleware adding a `trace-id` header to every response.
///
/// Handlers can read the identifier via [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use homework_backend::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
        );
        let fut = {
            let _entered = span.enter();
            self.service.call(req)
        };
        let header_value = trace_id.to_string();
        Box::pin(TraceId::scope(
            trace_id,
            async move {
                let mut res = fut.await?;
                info!(status = res.status().as_u16(), "request completed");
                match HeaderValue::from_str(&header_value) {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(error) => {
                        error!(%error, "failed to encode trace identifier header");
                    }
                }
                Ok(res)
            }
            .instrument(span),
        ))
    }
}
