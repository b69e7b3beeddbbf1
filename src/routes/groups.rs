use actix_web::web;

use crate::handlers::group_handler;
use crate::middleware::auth::AuthMiddleware;

pub fn init_group_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/groups")
            .wrap(AuthMiddleware)
            .service(
                web::resource("")
                    .route(web::post().to(group_handler::create_group))
            )
            .service(
                web::resource("/{id}")
                    .route(web::put().to(group_handler::update_group))
                    .route(web::delete().to(group_handler::delete_group))
            )
            .service(
                web::resource("/{id}/teams")
                    .route(web::post().to(group_handler::add_team_to_group))
            )
            .service(
                web::resource("/{id}/teams/{team_id}")
                    .route(web::delete().to(group_handler::remove_team_from_group))
            )
            .service(
                web::resource("/{id}/teams/{team_id}/move")
                    .route(web::post().to(group_handler::move_team_to_group))
            )
            .service(
                web::resource("/{id}/standings")
                    .route(web::get().to(group_handler::get_group_standings))
            )
    );
}
