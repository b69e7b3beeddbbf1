pub mod backend_health_handler;
pub mod group_handler;
pub mod match_handler;
pub mod player_handler;
pub mod stadium_handler;
pub mod team_handler;
pub mod tournament_handler;
