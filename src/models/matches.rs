use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use std::fmt;

use crate::models::common::hhmm;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Completed => "completed",
        }
    }
}

/// Phase of the competition a match belongs to.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    Group,
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    Final,
}

impl MatchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStage::Group => "group",
            MatchStage::RoundOf16 => "round_of_16",
            MatchStage::QuarterFinal => "quarter_final",
            MatchStage::SemiFinal => "semi_final",
            MatchStage::Final => "final",
        }
    }

    pub fn is_knockout(&self) -> bool {
        !matches!(self, MatchStage::Group)
    }

    /// Knockout stage played by `team_count` teams.
    pub fn for_bracket_size(team_count: usize) -> Option<MatchStage> {
        match team_count {
            16 => Some(MatchStage::RoundOf16),
            8 => Some(MatchStage::QuarterFinal),
            4 => Some(MatchStage::SemiFinal),
            2 => Some(MatchStage::Final),
            _ => None,
        }
    }

    pub fn next(&self) -> Option<MatchStage> {
        match self {
            MatchStage::Group => None,
            MatchStage::RoundOf16 => Some(MatchStage::QuarterFinal),
            MatchStage::QuarterFinal => Some(MatchStage::SemiFinal),
            MatchStage::SemiFinal => Some(MatchStage::Final),
            MatchStage::Final => None,
        }
    }
}

impl fmt::Display for MatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub tournament_id: Uuid,
    pub group_id: Option<Uuid>,
    pub stage: MatchStage,
    pub bracket_position: Option<i32>,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub venue: String,
    pub home_team: Uuid,
    pub away_team: Uuid,
    pub status: MatchStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Winner of a completed, decisive match.
    pub fn winner(&self) -> Option<Uuid> {
        if !self.is_completed() {
            return None;
        }
        match (self.home_score, self.away_score) {
            (Some(h), Some(a)) if h > a => Some(self.home_team),
            (Some(h), Some(a)) if a > h => Some(self.away_team),
            _ => None,
        }
    }

    pub fn involves(&self, team_id: Uuid) -> bool {
        self.home_team == team_id || self.away_team == team_id
    }
}

/// Raw create payload; date and time arrive as strings and are validated.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    pub date: String,
    pub time: String,
    pub venue: String,
    pub home_team: Uuid,
    pub away_team: Uuid,
    pub tournament_id: Uuid,
    pub group_id: Option<Uuid>,
    pub stage: Option<MatchStage>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMatchRequest {
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub status: Option<MatchStatus>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreRequest {
    pub home_score: i32,
    pub away_score: i32,
    pub status: Option<MatchStatus>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuery {
    pub tournament_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub status: Option<MatchStatus>,
    pub date: Option<NaiveDate>,
}

impl fmt::Display for MatchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tournament_id: {:?}, group_id: {:?}, status: {:?}, date: {:?}",
            self.tournament_id, self.group_id, self.status, self.date
        )
    }
}

/// Validated, typed match ready to insert.
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub tournament_id: Uuid,
    pub group_id: Option<Uuid>,
    pub stage: MatchStage,
    pub bracket_position: Option<i32>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub venue: String,
    pub home_team: Uuid,
    pub away_team: Uuid,
}
