use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlayerPosition {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

/// A player is either on one team's roster or a free agent (`team_id` is None).
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub team_id: Option<Uuid>,
    pub name: String,
    pub position: PlayerPosition,
    pub level: String,
    pub age: i32,
    pub jersey_number: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerRequest {
    pub name: String,
    pub position: PlayerPosition,
    pub level: String,
    pub age: i32,
    pub team_id: Option<Uuid>,
    pub jersey_number: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlayerRequest {
    pub name: Option<String>,
    pub position: Option<PlayerPosition>,
    pub level: Option<String>,
    pub age: Option<i32>,
    pub jersey_number: Option<i32>,
}

/// `teamId: null` releases the player.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPlayerRequest {
    pub team_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerQuery {
    pub team_id: Option<Uuid>,
    pub search: Option<String>,
    /// Only players without a team.
    #[serde(default)]
    pub free: bool,
}
