//! HTTP handlers and route configuration.

mod auth;
mod posts;


use actix_web::http::header;
use actix_web::{HttpResponse, web};

use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(posts::index)))
        .service(web::resource("/group/{slug}/").route(web::get().to(posts::group_list)))
        .service(web::resource("/profile/{username}/").route(web::get().to(posts::profile)))
        .service(
            web::resource("/create/")
                .route(web::get().to(posts::create_form))
                .route(web::post().to(posts::create)),
        )
        .service(web::resource("/posts/{id}/").route(web::get().to(posts::detail)))
        .service(
            web::resource("/posts/{id}/edit/")
                .route(web::get().to(posts::edit_form))
                .route(web::post().to(posts::edit)),
        )
        .service(
            web::scope("/auth")
                .service(
                    web::resource("/login/")
                        .route(web::get().to(auth::login_form))
                        .route(web::post().to(auth::login)),
                )
                .service(web::resource("/logout/").route(web::post().to(auth::logout))),
        )
        .default_service(web::route().to(not_found));
}

/// 302 to `location`.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

async fn not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound("No page at this address".to_string()))
}
