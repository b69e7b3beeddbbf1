use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{groups, helpers::require_record, matches, teams};
use crate::error::{TournamentError, TournamentResult};
use crate::models::context::RequestContext;
use crate::models::matches::{Match, MatchStatus, UpdateScoreRequest};
use crate::tournament::validation::TournamentValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

pub fn outcome(home_score: i32, away_score: i32) -> Outcome {
    if home_score > away_score {
        Outcome::HomeWin
    } else if home_score < away_score {
        Outcome::AwayWin
    } else {
        Outcome::Draw
    }
}

/// What one result adds to a single team's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamStatDelta {
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub points: i32,
}

impl TeamStatDelta {
    fn from_perspective(scored: i32, conceded: i32) -> Self {
        let (wins, draws, losses, points) = match outcome(scored, conceded) {
            Outcome::HomeWin => (1, 0, 0, 3),
            Outcome::Draw => (0, 1, 0, 1),
            Outcome::AwayWin => (0, 0, 1, 0),
        };
        Self { wins, draws, losses, goals_for: scored, goals_against: conceded, points }
    }
}

/// Deltas for (home, away).
pub fn result_deltas(home_score: i32, away_score: i32) -> (TeamStatDelta, TeamStatDelta) {
    (
        TeamStatDelta::from_perspective(home_score, away_score),
        TeamStatDelta::from_perspective(away_score, home_score),
    )
}

/// Applies match results to the match, both teams and the group table.
#[derive(Debug, Clone)]
pub struct ResultService {
    pool: PgPool,
    validator: TournamentValidator,
}

impl ResultService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, validator: TournamentValidator::new() }
    }

    /// Record a score. Stats move only when the match becomes completed,
    /// and a completed match cannot be scored again.
    #[tracing::instrument(name = "Update match score", skip(self, ctx), fields(user_id = %ctx.user_id))]
    pub async fn update_match_score(
        &self,
        ctx: &RequestContext,
        match_id: Uuid,
        request: &UpdateScoreRequest,
    ) -> TournamentResult<Match> {
        ctx.require_manager()?;
        self.validator.validate_scores(request.home_score, request.away_score)?;
        let status = request.status.unwrap_or(MatchStatus::Completed);

        let mut tx = self.pool.begin().await?;

        let game = require_record(
            matches::fetch_match_for_update(&mut *tx, match_id, ctx.tenant_scope()).await,
            "Match not found",
        )?;

        if game.is_completed() {
            return Err(TournamentError::conflict(
                "Match is already completed; its score cannot be applied again",
            ));
        }
        self.validator
            .validate_result_for_stage(game.stage, request.home_score, request.away_score, status)?;

        let updated = matches::record_score(&mut *tx, game.id, request.home_score, request.away_score, status).await?;

        if status == MatchStatus::Completed {
            let (home_delta, away_delta) = result_deltas(request.home_score, request.away_score);

            for (team_id, delta) in [(game.home_team, &home_delta), (game.away_team, &away_delta)] {
                if teams::apply_team_result(&mut *tx, team_id, delta).await? == 0 {
                    tracing::error!("Team {} of match {} not found while applying result", team_id, game.id);
                    return Err(TournamentError::not_found("Team not found"));
                }
            }

            if let Some(group_id) = game.group_id {
                let home_row = groups::fetch_membership(&mut *tx, group_id, game.home_team).await?;
                let away_row = groups::fetch_membership(&mut *tx, group_id, game.away_team).await?;

                match (home_row, away_row) {
                    (Some(home_row), Some(away_row)) => {
                        groups::apply_group_result(&mut *tx, home_row.id, &home_delta).await?;
                        groups::apply_group_result(&mut *tx, away_row.id, &away_delta).await?;
                    }
                    _ => {
                        tracing::warn!(
                            "Skipping group table update for match {}: a team is no longer in group {}",
                            game.id,
                            group_id
                        );
                    }
                }
            }
        }

        tx.commit().await?;

        tracing::info!(
            "Recorded score for match {}: {} - {} ({})",
            updated.id,
            request.home_score,
            request.away_score,
            status.as_str()
        );

        Ok(updated)
    }
}
