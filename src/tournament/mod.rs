pub mod catalogue;
pub mod draw;
pub mod groups;
pub mod matches;
pub mod players;
pub mod qualification;
pub mod results;
pub mod schedule;
pub mod standings;
pub mod tournament;
pub mod validation;
