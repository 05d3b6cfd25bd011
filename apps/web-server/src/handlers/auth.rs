//! Login and logout handlers.

use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use scribe_core::ports::{PasswordService, SessionService, UserRepository};
use scribe_shared::forms::LoginForm;

use crate::middleware::auth::{MaybeUser, SESSION_COOKIE};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::templates::{self, LoginTemplate};

use super::redirect;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    next: String,
}

/// GET /auth/login/?next=<path>
pub async fn login_form(user: MaybeUser, query: web::Query<LoginQuery>) -> AppResult<HttpResponse> {
    templates::render(&LoginTemplate {
        user: user.0,
        next: query.into_inner().next,
        username: String::new(),
        error: None,
    })
}

/// POST /auth/login/
pub async fn login(state: web::Data<AppState>, form: web::Form<LoginForm>) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let found = state.users.find_by_username(&form.username).await?;
    let valid = match &found {
        Some(user) => state
            .passwords
            .verify(&form.password, &user.password_hash)
            .map_err(|e| AppError::Internal(e.to_string()))?,
        None => false,
    };

    let Some(user) = found.filter(|_| valid) else {
        tracing::debug!(username = %form.username, "Failed login attempt");

        return templates::render(&LoginTemplate {
            user: None,
            next: form.next.clone(),
            username: form.username.clone(),
            error: Some("Please enter a correct username and password.".to_string()),
        });
    };

    let token = state
        .sessions
        .issue(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .finish();

    tracing::info!(username = %user.username, "User logged in");

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, form.redirect_target()))
        .cookie(cookie)
        .finish())
}

/// POST /auth/logout/
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();

    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(cookie)
        .finish()
}
