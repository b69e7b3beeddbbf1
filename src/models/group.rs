use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub tournament_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Membership row with per-group aggregates.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GroupTeam {
    pub id: Uuid,
    pub group_id: Uuid,
    pub team_id: Uuid,
    pub tournament_id: Uuid,
    pub played: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub points: i32,
}

impl GroupTeam {
    pub fn goal_difference(&self) -> i32 {
        self.goals_for - self.goals_against
    }
}

/// Membership joined with the team's display fields.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GroupTeamEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub membership: GroupTeam,
    pub team_name: String,
    pub team_logo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GroupWithTeams {
    #[serde(flatten)]
    pub group: Group,
    pub group_teams: Vec<GroupTeamEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    pub tournament_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTeamToGroupRequest {
    pub team_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTeamRequest {
    pub to_group_id: Uuid,
}

/// One ranked line of a group table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub position: i32,
    pub team_id: Uuid,
    pub team_name: String,
    pub played: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
    pub points: i32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStandingsResponse {
    pub group: Group,
    pub standings: Vec<StandingRow>,
}
