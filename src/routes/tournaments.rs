use actix_web::web;

use crate::handlers::{group_handler, player_handler, tournament_handler};
use crate::middleware::auth::AuthMiddleware;

pub fn init_tournament_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tournaments")
            .wrap(AuthMiddleware)
            .service(
                web::resource("")
                    .route(web::get().to(tournament_handler::get_tournaments))
                    .route(web::post().to(tournament_handler::create_tournament))
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(tournament_handler::get_tournament))
                    .route(web::put().to(tournament_handler::update_tournament))
                    .route(web::delete().to(tournament_handler::delete_tournament))
            )

            // Registrations
            .service(
                web::resource("/{id}/teams")
                    .route(web::get().to(tournament_handler::get_registered_teams))
                    .route(web::post().to(tournament_handler::register_team))
            )
            .service(
                web::resource("/{id}/teams/{team_id}")
                    .route(web::delete().to(tournament_handler::unregister_team))
            )
            .service(
                web::resource("/{id}/players")
                    .route(web::get().to(player_handler::get_tournament_players))
            )

            // Group phase and knockout
            .service(
                web::resource("/{id}/groups")
                    .route(web::get().to(group_handler::get_tournament_groups))
            )
            .service(
                web::resource("/{id}/draw")
                    .route(web::post().to(tournament_handler::generate_draw))
            )
            .service(
                web::resource("/{id}/generate-matches")
                    .route(web::post().to(tournament_handler::generate_matches))
            )
            .service(
                web::resource("/{id}/qualified-teams")
                    .route(web::post().to(tournament_handler::assign_qualified_teams))
            )
            .service(
                web::resource("/{id}/final-phase")
                    .route(web::post().to(tournament_handler::generate_final_phase))
            )
    );
}
