pub mod groups;
pub mod helpers;
pub mod matches;
pub mod players;
pub mod stadiums;
pub mod teams;
pub mod tournaments;
