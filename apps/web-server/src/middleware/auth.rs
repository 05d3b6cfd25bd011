//! Authentication extractors.
//!
//! Browser sessions live in an HttpOnly cookie. Handlers that require a
//! logged-in user take [`CurrentUser`]; a missing or invalid session turns
//! into a redirect to the login page carrying the originally requested
//! path in `next`, so the user lands back where they started.

use std::fmt;
use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, http::header, web};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use scribe_core::ports::SessionService;

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Characters that must not leak unescaped into the `next` query value. A
/// protected URL carrying its own query string stays a single parameter.
const NEXT_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'=');

/// The logged-in user, decoded from the session cookie.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected(user: CurrentUser) -> impl Responder {
///     format!("Hello, {}!", user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: uuid::Uuid,
    pub username: String,
}

/// Extraction failure: the request needs a login first. Responds with a
/// redirect to the login page, preserving the original target.
#[derive(Debug)]
pub struct LoginRedirect {
    next: String,
}

impl fmt::Display for LoginRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "login required to access {}", self.next)
    }
}

impl actix_web::ResponseError for LoginRedirect {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        let next = utf8_percent_encode(&self.next, NEXT_VALUE);
        HttpResponse::Found()
            .insert_header((header::LOCATION, format!("/auth/login/?next={next}")))
            .finish()
    }
}

impl FromRequest for CurrentUser {
    type Error = LoginRedirect;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let next = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| req.path().to_string());

        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(LoginRedirect { next }));
        };

        let Some(cookie) = req.cookie(SESSION_COOKIE) else {
            return ready(Err(LoginRedirect { next }));
        };

        match state.sessions.verify(cookie.value()) {
            Ok(claims) => ready(Ok(CurrentUser {
                id: claims.user_id,
                username: claims.username,
            })),
            Err(e) => {
                tracing::debug!("Rejected session cookie: {e}");
                ready(Err(LoginRedirect { next }))
            }
        }
    }
}

/// Optional user extractor - doesn't redirect if not authenticated.
pub struct MaybeUser(pub Option<CurrentUser>);

impl FromRequest for MaybeUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        match CurrentUser::from_request(req, payload).into_inner() {
            Ok(user) => ready(Ok(MaybeUser(Some(user)))),
            Err(_) => ready(Ok(MaybeUser(None))),
        }
    }
}
