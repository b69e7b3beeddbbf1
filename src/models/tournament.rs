use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::group::GroupWithTeams;
use crate::models::team::Team;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Upcoming,
    Active,
    Completed,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Upcoming => "upcoming",
            TournamentStatus::Active => "active",
            TournamentStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub logo: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub prize: Option<String>,
    pub rules: Option<String>,
    pub stadium: Option<String>,
    pub status: TournamentStatus,
    pub number_of_groups: i32,
    pub teams_per_group: i32,
    pub qualifiers_per_group: i32,
    pub draw_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateTournamentRequest {
    pub name: String,
    pub logo: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub prize: Option<String>,
    pub rules: Option<String>,
    pub stadium: Option<String>,
    pub number_of_groups: Option<i32>,
    pub teams_per_group: Option<i32>,
    pub qualifiers_per_group: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTournamentRequest {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub prize: Option<String>,
    pub rules: Option<String>,
    pub stadium: Option<String>,
    pub status: Option<TournamentStatus>,
    pub number_of_groups: Option<i32>,
    pub teams_per_group: Option<i32>,
    pub qualifiers_per_group: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct TournamentQuery {
    pub status: Option<TournamentStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDetails {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub groups: Vec<GroupWithTeams>,
    pub tournament_teams: Vec<Team>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTeamRequest {
    pub team_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DrawRequest {
    pub number_of_groups: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMatchesRequest {
    pub time: Option<String>,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalPhaseRequest {
    pub time: Option<String>,
}

/// Counts returned by group fixture generation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSummary {
    pub total_matches: i32,
    pub total_days: i32,
    pub group_matches: i32,
    pub final_matches: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinalPhaseSummary {
    pub total_matches: i32,
    pub round_of_16: i32,
    pub quarters: i32,
    pub semis: i32,
    #[serde(rename = "final")]
    pub final_match: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QualifiedTeam {
    pub group_id: Uuid,
    pub group_name: String,
    pub team_id: Uuid,
    pub team_name: String,
    pub position: i32,
    pub points: i32,
    pub goal_difference: i32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationResponse {
    pub qualified_teams: Vec<QualifiedTeam>,
}
