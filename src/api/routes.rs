// API route configuration

use crate::api::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check
        .route("/health", web::get().to(handlers::health_check))
        // Catalog surface
        .service(
            web::scope("/api/games")
                .route("", web::get().to(handlers::list_games))
                .route("", web::post().to(handlers::create_game))
                .route("/search", web::post().to(handlers::search_games))
                .route("/populate", web::post().to(handlers::populate_games))
                .route("/{id}", web::put().to(handlers::update_game))
                .route("/{id}", web::delete().to(handlers::delete_game)),
        );
}
