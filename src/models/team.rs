use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub logo: Option<String>,
    pub coach_name: Option<String>,
    pub matches_played: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_scored: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub name: String,
    pub logo: Option<String>,
    pub coach_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub coach_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TeamQuery {
    pub search: Option<String>,
}
