//! Authentication gate run in front of every resource scope.
//!
//! The gate extracts [`RequestCredentials`] from the `Authorization` header and
//! asks the configured [`RequestAuthenticator`] whether the request may reach
//! its handler. A rejection short-circuits with the authenticator's error,
//! rendered through the usual `{"error": ...}` envelope.

use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{Error, ResponseError};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::{RequestAuthenticator, RequestCredentials};

/// Read bearer credentials from request headers.
///
/// Anything other than `Authorization: Bearer <token>` (scheme matched
/// case-insensitively) yields anonymous credentials.
#[must_use]
pub fn credentials_from(headers: &HeaderMap) -> RequestCredentials {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map_or_else(RequestCredentials::anonymous, |(_, token)| {
            RequestCredentials::bearer(token.trim())
        })
}

/// Middleware factory wrapping a scope with the authentication gate.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use marketplace::domain::AllowAllAuthenticator;
/// use marketplace::inbound::http::auth::AuthGate;
///
/// let app = App::new().service(
///     web::scope("/clients").wrap(AuthGate::new(Arc::new(AllowAllAuthenticator))),
/// );
/// ```
#[derive(Clone)]
pub struct AuthGate {
    authenticator: Arc<dyn RequestAuthenticator>,
}

impl AuthGate {
    #[must_use]
    pub fn new(authenticator: Arc<dyn RequestAuthenticator>) -> Self {
        Self { authenticator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
            authenticator: Arc::clone(&self.authenticator),
        }))
    }
}

/// Service wrapper produced by [`AuthGate`].
pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
    authenticator: Arc<dyn RequestAuthenticator>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = Arc::clone(&self.authenticator);
        // Runs inside the request's trace scope so rejections carry its id.
        Box::pin(async move {
            let credentials = credentials_from(req.headers());
            match authenticator.authenticate(&credentials) {
                Ok(()) => service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body),
                Err(error) => {
                    warn!(path = req.path(), %error, "request rejected by authentication gate");
                    let response = error.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error as DomainError;
    use crate::domain::ports::MockRequestAuthenticator;
    use actix_web::http::StatusCode;
    use actix_web::http::header::HeaderValue;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[rstest]
    #[case("Bearer s3cret", Some("s3cret"))]
    #[case("bearer s3cret", Some("s3cret"))]
    #[case("Bearer  padded ", Some("padded"))]
    #[case("Basic dXNlcjpwYXNz", None)]
    #[case("Bearer", None)]
    fn credentials_follow_bearer_scheme(#[case] header: &'static str, #[case] token: Option<&str>) {
        let credentials = credentials_from(&headers_with(header));
        assert_eq!(credentials.bearer_token(), token);
    }

    #[rstest]
    fn missing_header_is_anonymous() {
        assert_eq!(
            credentials_from(&HeaderMap::new()),
            RequestCredentials::anonymous()
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn accepted_requests_reach_the_handler() {
        let mut authenticator = MockRequestAuthenticator::new();
        authenticator
            .expect_authenticate()
            .withf(|credentials| credentials.bearer_token() == Some("s3cret"))
            .times(1)
            .returning(|_| Ok(()));
        let app = actix_test::init_service(
            App::new().service(
                web::scope("/gated")
                    .wrap(AuthGate::new(Arc::new(authenticator)))
                    .route("", web::get().to(|| async { HttpResponse::Ok().body("handled") })),
            ),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/gated")
            .insert_header((AUTHORIZATION, "Bearer s3cret"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            actix_test::read_body(res).await,
            web::Bytes::from_static(b"handled")
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn rejection_short_circuits_before_the_handler() {
        let mut authenticator = MockRequestAuthenticator::new();
        authenticator
            .expect_authenticate()
            .returning(|_| Err(DomainError::unauthorized("missing bearer token")));
        let reached = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&reached);
        let app = actix_test::init_service(
            App::new().service(
                web::scope("/gated")
                    .wrap(AuthGate::new(Arc::new(authenticator)))
                    .route(
                        "",
                        web::get().to(move || {
                            let flag = Arc::clone(&flag);
                            async move {
                                flag.store(true, Ordering::SeqCst);
                                HttpResponse::Ok().finish()
                            }
                        }),
                    ),
            ),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/gated").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!({ "error": "missing bearer token" }));
        assert!(!reached.load(Ordering::SeqCst));
    }
}
