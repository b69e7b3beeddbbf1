use actix_web::web;

use crate::handlers::{player_handler, stadium_handler, team_handler};
use crate::middleware::auth::AuthMiddleware;

pub fn init_catalogue_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/teams")
            .wrap(AuthMiddleware)
            .service(
                web::resource("")
                    .route(web::get().to(team_handler::get_teams))
                    .route(web::post().to(team_handler::create_team))
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(team_handler::get_team))
                    .route(web::put().to(team_handler::update_team))
                    .route(web::delete().to(team_handler::delete_team))
            )
            .service(
                web::resource("/{id}/players")
                    .route(web::get().to(player_handler::get_team_players))
            )
    );
    cfg.service(
        web::scope("/players")
            .wrap(AuthMiddleware)
            .service(
                web::resource("")
                    .route(web::get().to(player_handler::get_players))
                    .route(web::post().to(player_handler::create_player))
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(player_handler::get_player))
                    .route(web::put().to(player_handler::update_player))
                    .route(web::delete().to(player_handler::delete_player))
            )
            .service(
                web::resource("/{id}/team")
                    .route(web::put().to(player_handler::assign_player_to_team))
            )
    );
    cfg.service(
        web::scope("/stadiums")
            .wrap(AuthMiddleware)
            .service(
                web::resource("")
                    .route(web::get().to(stadium_handler::get_stadiums))
                    .route(web::post().to(stadium_handler::create_stadium))
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(stadium_handler::get_stadium))
                    .route(web::put().to(stadium_handler::update_stadium))
                    .route(web::delete().to(stadium_handler::delete_stadium))
            )
    );
}
