use actix_web::web;

use crate::handlers::match_handler;
use crate::middleware::auth::AuthMiddleware;

pub fn init_match_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/matches")
            .wrap(AuthMiddleware)
            .service(
                web::resource("")
                    .route(web::get().to(match_handler::get_matches))
                    .route(web::post().to(match_handler::create_match))
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(match_handler::get_match))
                    .route(web::put().to(match_handler::update_match))
                    .route(web::delete().to(match_handler::delete_match))
            )
            .service(
                web::resource("/{id}/score")
                    .route(web::put().to(match_handler::update_match_score))
            )
    );
}
