//! HTTP handlers and route configuration.

mod api;
mod health;
mod pages;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(api::list_posts))
                    .route("", web::post().to(api::create_post))
                    .route("/{id}", web::get().to(api::get_post))
                    .route("/{id}", web::patch().to(api::update_post))
                    .route("/{id}", web::delete().to(api::delete_post)),
            ),
    )
    .route("/", web::get().to(pages::home))
    .route("/blog", web::get().to(pages::blog))
    .service(
        web::scope("/dashboard")
            .route("", web::get().to(pages::dashboard))
            .route("/new", web::get().to(pages::new_post))
            .route("/new", web::post().to(pages::create_post))
            .route("/{id}", web::get().to(pages::show_post))
            .route("/{id}/edit", web::get().to(pages::edit_post))
            .route("/{id}/edit", web::post().to(pages::update_post))
            .route("/{id}/delete", web::post().to(pages::delete_post)),
    )
    .default_service(web::to(pages::not_found));
}
