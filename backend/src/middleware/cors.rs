//! Permissive CORS middleware for browser clients.
//!
//! Every response gets the CORS headers. `OPTIONS` preflight requests are
//! answered here with `200 OK` and an empty body; they never reach routing,
//! extractors or handlers.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, HeaderMap, HeaderValue,
};
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

/// Value of `Access-Control-Allow-Origin`.
pub const ALLOW_ORIGIN: &str = "*";
/// Value of `Access-Control-Allow-Headers`.
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

/// CORS middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use homework_backend::{Cors, Trace};
///
/// let _app = App::new().wrap(Cors).wrap(Trace);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Cors;

impl<S, B> Transform<S, ServiceRequest> for Cors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CorsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsMiddleware { service }))
    }
}

/// Service wrapper produced by [`Cors`].
pub struct CorsMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CorsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if req.method() == Method::OPTIONS {
            debug!(path = %req.path(), "answering CORS preflight");
            let mut preflight = HttpResponse::Ok().finish();
            apply_cors_headers(preflight.headers_mut());
            let res = req.into_response(preflight).map_into_right_body();
            return Box::pin(ready(Ok(res)));
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            apply_cors_headers(res.headers_mut());
            Ok(res.map_into_left_body())
        })
    }
}
