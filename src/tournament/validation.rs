use std::collections::HashSet;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::error::{TournamentError, TournamentResult};
use crate::models::common::hhmm;
use crate::models::matches::{CreateMatchRequest, MatchStage, MatchStatus, NewMatch};
use crate::models::stadium::StadiumRequest;
use crate::models::tournament::CreateTournamentRequest;

pub const MAX_SCORE: i32 = 50;
pub const MAX_NAME_LEN: usize = 255;
pub const MIN_VENUE_LEN: usize = 3;
pub const MAX_VENUE_LEN: usize = 100;
pub const MIN_PLAYER_AGE: i32 = 10;
pub const MAX_PLAYER_AGE: i32 = 60;
pub const MAX_LEVEL_LEN: usize = 50;
pub const MAX_JERSEY_NUMBER: i32 = 99;

/// Centralized validation for tournament operations.
///
/// Everything here runs before the first write of an operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct TournamentValidator;

impl TournamentValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_name(&self, what: &str, name: &str) -> TournamentResult<()> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(TournamentError::validation(format!("{} name cannot be empty", what)));
        }

        if trimmed.len() > MAX_NAME_LEN {
            return Err(TournamentError::validation(format!(
                "{} name too long (maximum {} characters)",
                what, MAX_NAME_LEN
            )));
        }

        if trimmed.contains('\0') {
            return Err(TournamentError::validation(format!("{} name contains invalid characters", what)));
        }

        Ok(())
    }

    /// Parse a `YYYY-MM-DD` date.
    pub fn parse_match_date(&self, raw: &str) -> TournamentResult<NaiveDate> {
        let raw = raw.trim();
        if raw.len() != 10 {
            return Err(TournamentError::validation("Invalid date format (YYYY-MM-DD)"));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| TournamentError::validation("Invalid date format (YYYY-MM-DD)"))
    }

    /// Parse an `HH:MM` kick-off time (the hour may be a single digit).
    pub fn parse_kickoff_time(&self, raw: &str) -> TournamentResult<NaiveTime> {
        let raw = raw.trim();
        let valid_shape = matches!(raw.split_once(':'), Some((h, m))
            if (1..=2).contains(&h.len()) && m.len() == 2
                && h.chars().all(|c| c.is_ascii_digit())
                && m.chars().all(|c| c.is_ascii_digit()));
        if !valid_shape {
            return Err(TournamentError::validation("Invalid time format (HH:MM)"));
        }
        NaiveTime::parse_from_str(raw, hhmm::FORMAT)
            .map_err(|_| TournamentError::validation("Invalid time format (HH:MM)"))
    }

    pub fn validate_venue(&self, venue: &str) -> TournamentResult<()> {
        let len = venue.trim().chars().count();
        if !(MIN_VENUE_LEN..=MAX_VENUE_LEN).contains(&len) {
            return Err(TournamentError::validation(format!(
                "Venue must be between {} and {} characters",
                MIN_VENUE_LEN, MAX_VENUE_LEN
            )));
        }
        Ok(())
    }

    pub fn validate_scores(&self, home_score: i32, away_score: i32) -> TournamentResult<()> {
        for (side, score) in [("home", home_score), ("away", away_score)] {
            if !(0..=MAX_SCORE).contains(&score) {
                return Err(TournamentError::validation(format!(
                    "Invalid {} score {} (must be between 0 and {})",
                    side, score, MAX_SCORE
                )));
            }
        }
        Ok(())
    }

    /// A knockout tie needs a winner before it can be closed.
    pub fn validate_result_for_stage(
        &self,
        stage: MatchStage,
        home_score: i32,
        away_score: i32,
        status: MatchStatus,
    ) -> TournamentResult<()> {
        if stage.is_knockout() && status == MatchStatus::Completed && home_score == away_score {
            return Err(TournamentError::validation(
                "A knockout match cannot be completed as a draw",
            ));
        }
        Ok(())
    }

    /// Turn a raw create request into a typed match, rejecting bad input.
    pub fn validate_create_match(&self, request: &CreateMatchRequest) -> TournamentResult<NewMatch> {
        if request.home_team == request.away_team {
            return Err(TournamentError::validation("A team cannot play against itself"));
        }
        let date = self.parse_match_date(&request.date)?;
        let time = self.parse_kickoff_time(&request.time)?;
        self.validate_venue(&request.venue)?;

        // a group-stage match without a group is a friendly and feeds no table
        let stage = request.stage.unwrap_or(MatchStage::Group);
        if stage.is_knockout() && request.group_id.is_some() {
            return Err(TournamentError::validation("Knockout matches cannot belong to a group"));
        }

        Ok(NewMatch {
            tournament_id: request.tournament_id,
            group_id: request.group_id,
            stage,
            bracket_position: None,
            date,
            time,
            venue: request.venue.trim().to_string(),
            home_team: request.home_team,
            away_team: request.away_team,
        })
    }

    pub fn validate_tournament_shape(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        number_of_groups: i32,
        teams_per_group: i32,
        qualifiers_per_group: i32,
    ) -> TournamentResult<()> {
        if end_date < start_date {
            return Err(TournamentError::validation("End date must be on or after the start date"));
        }
        if number_of_groups < 1 {
            return Err(TournamentError::validation("A tournament needs at least one group"));
        }
        if teams_per_group < 2 {
            return Err(TournamentError::validation("A group needs at least 2 teams"));
        }
        if qualifiers_per_group < 1 || qualifiers_per_group > teams_per_group {
            return Err(TournamentError::validation(format!(
                "Qualifiers per group must be between 1 and {}",
                teams_per_group
            )));
        }
        Ok(())
    }

    pub fn validate_create_tournament(&self, request: &CreateTournamentRequest) -> TournamentResult<()> {
        self.validate_name("Tournament", &request.name)?;
        self.validate_tournament_shape(
            request.start_date,
            request.end_date,
            request.number_of_groups.unwrap_or(2),
            request.teams_per_group.unwrap_or(4),
            request.qualifiers_per_group.unwrap_or(2),
        )
    }

    pub fn validate_stadium(&self, request: &StadiumRequest) -> TournamentResult<()> {
        self.validate_name("Stadium", &request.name)?;
        if request.city.trim().is_empty() {
            return Err(TournamentError::validation("City is required"));
        }
        if request.capacity <= 0 {
            return Err(TournamentError::validation("Capacity must be greater than 0"));
        }
        if request.field_count.unwrap_or(1) < 1 {
            return Err(TournamentError::validation("A stadium needs at least one field"));
        }
        Ok(())
    }

    /// Checks the optional parts of a player profile; absent values are skipped.
    pub fn validate_player_profile(
        &self,
        level: Option<&str>,
        age: Option<i32>,
        jersey_number: Option<i32>,
    ) -> TournamentResult<()> {
        if let Some(level) = level {
            let level = level.trim();
            if level.is_empty() || level.chars().count() > MAX_LEVEL_LEN {
                return Err(TournamentError::validation(format!(
                    "Level must be between 1 and {} characters",
                    MAX_LEVEL_LEN
                )));
            }
        }
        if let Some(age) = age {
            if !(MIN_PLAYER_AGE..=MAX_PLAYER_AGE).contains(&age) {
                return Err(TournamentError::validation(format!(
                    "Age must be between {} and {}",
                    MIN_PLAYER_AGE, MAX_PLAYER_AGE
                )));
            }
        }
        if let Some(jersey) = jersey_number {
            if !(1..=MAX_JERSEY_NUMBER).contains(&jersey) {
                return Err(TournamentError::validation(format!(
                    "Jersey number must be between 1 and {}",
                    MAX_JERSEY_NUMBER
                )));
            }
        }
        Ok(())
    }

    pub fn validate_unique_teams(&self, team_ids: &[Uuid]) -> TournamentResult<()> {
        let mut seen = HashSet::new();
        for team_id in team_ids {
            if !seen.insert(team_id) {
                return Err(TournamentError::validation(format!("Duplicate team ID found: {}", team_id)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateMatchRequest {
        CreateMatchRequest {
            date: "2025-06-01".into(),
            time: "15:00".into(),
            venue: "Stade Municipal".into(),
            home_team: Uuid::new_v4(),
            away_team: Uuid::new_v4(),
            tournament_id: Uuid::new_v4(),
            group_id: Some(Uuid::new_v4()),
            stage: None,
        }
    }

    #[test]
    fn same_team_on_both_sides_is_rejected() {
        let mut request = create_request();
        request.away_team = request.home_team;
        let err = TournamentValidator::new().validate_create_match(&request).unwrap_err();
        assert!(matches!(err, TournamentError::Validation(_)));
    }

    #[test]
    fn valid_request_becomes_group_match() {
        let request = create_request();
        let new_match = TournamentValidator::new().validate_create_match(&request).unwrap();
        assert_eq!(new_match.stage, MatchStage::Group);
        assert_eq!(new_match.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(new_match.time, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
    }

    #[test]
    fn player_profile_bounds() {
        let v = TournamentValidator::new();
        assert!(v.validate_player_profile(Some("Amateur"), Some(24), Some(10)).is_ok());
        assert!(v.validate_player_profile(None, None, None).is_ok());
        assert!(v.validate_player_profile(Some("  "), None, None).is_err());
        assert!(v.validate_player_profile(None, Some(9), None).is_err());
        assert!(v.validate_player_profile(None, Some(61), None).is_err());
        assert!(v.validate_player_profile(None, None, Some(0)).is_err());
        assert!(v.validate_player_profile(None, None, Some(100)).is_err());
    }

    #[test]
    fn match_without_group_is_accepted() {
        let mut request = create_request();
        request.group_id = None;
        let new_match = TournamentValidator::new().validate_create_match(&request).unwrap();
        assert_eq!(new_match.stage, MatchStage::Group);
        assert!(new_match.group_id.is_none());

        request.stage = Some(MatchStage::SemiFinal);
        request.group_id = Some(Uuid::new_v4());
        assert!(TournamentValidator::new().validate_create_match(&request).is_err());
    }

    #[test]
    fn kickoff_time_accepts_single_digit_hour() {
        let v = TournamentValidator::new();
        assert_eq!(v.parse_kickoff_time("9:30").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert!(v.parse_kickoff_time("24:00").is_err());
        assert!(v.parse_kickoff_time("12:5").is_err());
        assert!(v.parse_kickoff_time("12:60").is_err());
        assert!(v.parse_kickoff_time("noon").is_err());
    }

    #[test]
    fn match_date_must_be_iso() {
        let v = TournamentValidator::new();
        assert!(v.parse_match_date("2025-02-30").is_err());
        assert!(v.parse_match_date("01/06/2025").is_err());
        assert!(v.parse_match_date("2025-6-1").is_err());
        assert!(v.parse_match_date("2025-06-01").is_ok());
    }

    #[test]
    fn venue_length_is_bounded() {
        let v = TournamentValidator::new();
        assert!(v.validate_venue("ab").is_err());
        assert!(v.validate_venue("abc").is_ok());
        assert!(v.validate_venue(&"x".repeat(101)).is_err());
    }

    #[test]
    fn scores_must_be_in_range() {
        let v = TournamentValidator::new();
        assert!(v.validate_scores(0, 50).is_ok());
        assert!(v.validate_scores(-1, 0).is_err());
        assert!(v.validate_scores(0, 51).is_err());
    }

    #[test]
    fn knockout_draw_cannot_complete() {
        let v = TournamentValidator::new();
        assert!(v
            .validate_result_for_stage(MatchStage::SemiFinal, 1, 1, MatchStatus::Completed)
            .is_err());
        assert!(v
            .validate_result_for_stage(MatchStage::SemiFinal, 1, 1, MatchStatus::InProgress)
            .is_ok());
        assert!(v
            .validate_result_for_stage(MatchStage::Group, 1, 1, MatchStatus::Completed)
            .is_ok());
    }

    #[test]
    fn tournament_shape_rules() {
        let v = TournamentValidator::new();
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert!(v.validate_tournament_shape(start, end, 2, 4, 2).is_ok());
        assert!(v.validate_tournament_shape(end, start, 2, 4, 2).is_err());
        assert!(v.validate_tournament_shape(start, end, 0, 4, 2).is_err());
        assert!(v.validate_tournament_shape(start, end, 2, 1, 1).is_err());
        assert!(v.validate_tournament_shape(start, end, 2, 4, 5).is_err());
    }
}
