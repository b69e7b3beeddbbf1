use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{groups, helpers::{require_affected, require_record}, matches, teams, tournaments};
use crate::error::{TournamentError, TournamentResult};
use crate::models::context::RequestContext;
use crate::models::matches::{CreateMatchRequest, Match, MatchQuery, MatchStatus, UpdateMatchRequest};
use crate::tournament::validation::TournamentValidator;

/// Manual match management. Generated fixtures come from `ScheduleService`.
#[derive(Debug, Clone)]
pub struct MatchService {
    pool: PgPool,
    validator: TournamentValidator,
}

impl MatchService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, validator: TournamentValidator::new() }
    }

    #[tracing::instrument(name = "Create match", skip(self, ctx, request))]
    pub async fn create_match(&self, ctx: &RequestContext, request: &CreateMatchRequest) -> TournamentResult<Match> {
        ctx.require_manager()?;
        let new_match = self.validator.validate_create_match(request)?;

        let tournament = require_record(
            tournaments::fetch_tournament(&self.pool, new_match.tournament_id, ctx.tenant_scope()).await,
            "Tournament not found",
        )?;

        for (side, team_id) in [("Home", new_match.home_team), ("Away", new_match.away_team)] {
            if teams::fetch_team(&self.pool, team_id, ctx.tenant_scope()).await?.is_none() {
                return Err(TournamentError::validation(format!("{} team not found", side)));
            }
        }

        if let Some(group_id) = new_match.group_id {
            let group = require_record(
                groups::fetch_group(&self.pool, group_id, ctx.tenant_scope()).await,
                "Group not found",
            )?;
            if group.tournament_id != tournament.id {
                return Err(TournamentError::validation("Group does not belong to this tournament"));
            }
            if matches::fixture_exists(&self.pool, group.id, new_match.home_team, new_match.away_team).await? {
                return Err(TournamentError::conflict("These teams already have a match in this group"));
            }
        }

        let created = matches::insert_match(&self.pool, tournament.tenant_id, &new_match).await?;
        tracing::info!("Created match {} ({} v {})", created.id, created.home_team, created.away_team);
        Ok(created)
    }

    pub async fn list_matches(&self, ctx: &RequestContext, query: &MatchQuery) -> TournamentResult<Vec<Match>> {
        tracing::debug!("Listing matches with {}", query);
        Ok(matches::list_matches(&self.pool, ctx.tenant_scope(), query).await?)
    }

    pub async fn get_match(&self, ctx: &RequestContext, match_id: Uuid) -> TournamentResult<Match> {
        require_record(
            matches::fetch_match(&self.pool, match_id, ctx.tenant_scope()).await,
            "Match not found",
        )
    }

    /// Reschedule or change status. Completion only happens through scoring,
    /// and a completed match only takes date, time and venue edits.
    #[tracing::instrument(name = "Update match", skip(self, ctx, request))]
    pub async fn update_match(
        &self,
        ctx: &RequestContext,
        match_id: Uuid,
        request: &UpdateMatchRequest,
    ) -> TournamentResult<Match> {
        ctx.require_manager()?;

        let date = request.date.as_deref().map(|d| self.validator.parse_match_date(d)).transpose()?;
        let time = request.time.as_deref().map(|t| self.validator.parse_kickoff_time(t)).transpose()?;
        if let Some(venue) = request.venue.as_deref() {
            self.validator.validate_venue(venue)?;
        }
        if request.status == Some(MatchStatus::Completed) {
            return Err(TournamentError::validation("Submit a score to complete a match"));
        }

        let game = require_record(
            matches::fetch_match(&self.pool, match_id, ctx.tenant_scope()).await,
            "Match not found",
        )?;
        if game.is_completed() && request.status.is_some() {
            return Err(TournamentError::validation("The status of a completed match cannot change"));
        }

        Ok(matches::update_match_details(
            &self.pool,
            game.id,
            date,
            time,
            request.venue.as_deref().map(str::trim),
            request.status,
        )
        .await?)
    }

    #[tracing::instrument(name = "Delete match", skip(self, ctx))]
    pub async fn delete_match(&self, ctx: &RequestContext, match_id: Uuid) -> TournamentResult<()> {
        ctx.require_manager()?;
        let game = require_record(
            matches::fetch_match(&self.pool, match_id, ctx.tenant_scope()).await,
            "Match not found",
        )?;
        if game.is_completed() {
            return Err(TournamentError::validation("A completed match cannot be deleted"));
        }
        require_affected(matches::delete_match(&self.pool, game.id).await, "Match not found")?;
        tracing::info!("Deleted match {}", game.id);
        Ok(())
    }
}
