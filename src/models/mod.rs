pub mod common;
pub mod context;
pub mod group;
pub mod matches;
pub mod player;
pub mod stadium;
pub mod team;
pub mod tournament;
