use actix_web::web;

pub mod backend_health;
pub mod catalogue;
pub mod groups;
pub mod matches;
pub mod tournaments;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Everything below requires a bearer token
    tournaments::init_tournament_routes(cfg);
    groups::init_group_routes(cfg);
    matches::init_match_routes(cfg);
    catalogue::init_catalogue_routes(cfg);
}
