//! HTTP handlers and route configuration.

mod drafts;
mod health;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/drafts")
                    .route("", web::get().to(drafts::list))
                    .route("", web::post().to(drafts::save_or_update))
                    .route("/{id}", web::get().to(drafts::load))
                    .route("/{id}", web::delete().to(drafts::delete)),
            ),
    );
}
