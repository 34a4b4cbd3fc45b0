//! Bearer credential extraction.
//!
//! Extraction never fails: a missing or unusable `Authorization` header
//! yields `None`, and the solve service reports `Unauthorized` only after the
//! question itself has been validated.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::BearerToken;

/// Optional bearer credential taken from the `Authorization` header.
#[derive(Debug, Clone, Default)]
pub struct BearerCredentials(Option<BearerToken>);

impl BearerCredentials {
    /// Parse the credential carried by `req`, if any.
    pub fn from_http_request(req: &HttpRequest) -> Self {
        let Some(raw) = req.headers().get(AUTHORIZATION) else {
            return Self(None);
        };
        let token = raw
            .to_str()
            .map_err(|_| debug!("authorization header is not visible ASCII"))
            .ok()
            .and_then(|value| {
                BearerToken::from_authorization_header(value)
                    .map_err(|err| debug!(reason = %err, "ignoring unusable authorization header"))
                    .ok()
            });
        Self(token)
    }

    pub fn into_inner(self) -> Option<BearerToken> {
        self.0
    }
}

impl FromRequest for BearerCredentials {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_http_request(req)))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for Authorization header parsing.
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case(Some("Bearer abc.def"), Some("abc.def"))]
    #[case(Some("bearer xyz"), Some("xyz"))]
    #[case(Some("Basic dXNlcjpwYXNz"), None)]
    #[case(Some("Bearer "), None)]
    #[case(None, None)]
    fn extracts_optional_token(#[case] header: Option<&str>, #[case] expected: Option<&str>) {
        let mut request = TestRequest::default();
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let credentials = BearerCredentials::from_http_request(&request.to_http_request());
        assert_eq!(
            credentials.into_inner().as_ref().map(BearerToken::expose),
            expected
        );
    }
}
