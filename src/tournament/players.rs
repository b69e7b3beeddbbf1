use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::{helpers::{require_affected, require_record}, players, teams, tournaments};
use crate::error::{TournamentError, TournamentResult};
use crate::models::context::RequestContext;
use crate::models::player::{CreatePlayerRequest, Player, PlayerQuery, UpdatePlayerRequest};
use crate::tournament::validation::TournamentValidator;

/// Player registry and team rosters.
#[derive(Debug, Clone)]
pub struct PlayerService {
    pool: PgPool,
    validator: TournamentValidator,
}

impl PlayerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, validator: TournamentValidator::new() }
    }

    #[tracing::instrument(name = "Create player", skip(self, ctx, request))]
    pub async fn create_player(&self, ctx: &RequestContext, request: &CreatePlayerRequest) -> TournamentResult<Player> {
        ctx.require_manager()?;
        self.validator.validate_name("Player", &request.name)?;
        self.validator
            .validate_player_profile(Some(&request.level), Some(request.age), request.jersey_number)?;

        let mut tx = self.pool.begin().await?;
        if let Some(team_id) = request.team_id {
            self.check_roster_slot(ctx, &mut tx, team_id, request.jersey_number, None).await?;
        }
        let player = players::insert_player(&mut *tx, ctx.tenant_id, request).await?;
        tx.commit().await?;

        tracing::info!("Created player {} ({})", player.name, player.id);
        Ok(player)
    }

    pub async fn list_players(&self, ctx: &RequestContext, query: &PlayerQuery) -> TournamentResult<Vec<Player>> {
        Ok(players::list_players(&self.pool, ctx.tenant_scope(), query).await?)
    }

    pub async fn get_player(&self, ctx: &RequestContext, player_id: Uuid) -> TournamentResult<Player> {
        require_record(players::fetch_player(&self.pool, player_id, ctx.tenant_scope()).await, "Player not found")
    }

    pub async fn list_team_players(&self, ctx: &RequestContext, team_id: Uuid) -> TournamentResult<Vec<Player>> {
        let team = require_record(teams::fetch_team(&self.pool, team_id, ctx.tenant_scope()).await, "Team not found")?;
        let query = PlayerQuery { team_id: Some(team.id), ..Default::default() };
        Ok(players::list_players(&self.pool, ctx.tenant_scope(), &query).await?)
    }

    pub async fn list_tournament_players(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
    ) -> TournamentResult<Vec<Player>> {
        let tournament = require_record(
            tournaments::fetch_tournament(&self.pool, tournament_id, ctx.tenant_scope()).await,
            "Tournament not found",
        )?;
        Ok(players::list_tournament_players(&self.pool, tournament.id).await?)
    }

    #[tracing::instrument(name = "Update player", skip(self, ctx, request))]
    pub async fn update_player(
        &self,
        ctx: &RequestContext,
        player_id: Uuid,
        request: &UpdatePlayerRequest,
    ) -> TournamentResult<Player> {
        ctx.require_manager()?;
        if let Some(name) = request.name.as_deref() {
            self.validator.validate_name("Player", name)?;
        }
        self.validator
            .validate_player_profile(request.level.as_deref(), request.age, request.jersey_number)?;

        let mut tx = self.pool.begin().await?;
        let player = require_record(
            players::fetch_player(&mut *tx, player_id, ctx.tenant_scope()).await,
            "Player not found",
        )?;
        if let (Some(team_id), Some(jersey)) = (player.team_id, request.jersey_number) {
            if players::jersey_taken(&mut *tx, team_id, jersey, Some(player.id)).await? {
                return Err(jersey_conflict(jersey));
            }
        }
        let updated = require_record(
            players::update_player(&mut *tx, player.id, request).await,
            "Player not found",
        )?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Move a player onto a team's roster, or release them with `None`.
    #[tracing::instrument(name = "Assign player", skip(self, ctx))]
    pub async fn assign_player_to_team(
        &self,
        ctx: &RequestContext,
        player_id: Uuid,
        team_id: Option<Uuid>,
    ) -> TournamentResult<Player> {
        ctx.require_manager()?;
        let mut tx = self.pool.begin().await?;

        let player = require_record(
            players::fetch_player(&mut *tx, player_id, ctx.tenant_scope()).await,
            "Player not found",
        )?;
        if let Some(team_id) = team_id {
            if player.team_id == Some(team_id) {
                return Err(TournamentError::validation("Player is already on this team"));
            }
            self.check_roster_slot(ctx, &mut tx, team_id, player.jersey_number, Some(player.id)).await?;
        }

        let updated = require_record(
            players::set_player_team(&mut *tx, player.id, team_id).await,
            "Player not found",
        )?;
        tx.commit().await?;

        match team_id {
            Some(team_id) => tracing::info!("Player {} joined team {}", updated.id, team_id),
            None => tracing::info!("Player {} released", updated.id),
        }
        Ok(updated)
    }

    pub async fn delete_player(&self, ctx: &RequestContext, player_id: Uuid) -> TournamentResult<()> {
        ctx.require_manager()?;
        require_affected(
            players::delete_player(&self.pool, player_id, ctx.tenant_scope()).await,
            "Player not found",
        )?;
        tracing::info!("Deleted player {}", player_id);
        Ok(())
    }

    /// The team must be visible to the caller and the jersey free on its roster.
    async fn check_roster_slot(
        &self,
        ctx: &RequestContext,
        tx: &mut Transaction<'_, Postgres>,
        team_id: Uuid,
        jersey_number: Option<i32>,
        player_id: Option<Uuid>,
    ) -> TournamentResult<()> {
        if teams::fetch_team(&mut **tx, team_id, ctx.tenant_scope()).await?.is_none() {
            return Err(TournamentError::validation("Team not found"));
        }
        if let Some(jersey) = jersey_number {
            if players::jersey_taken(&mut **tx, team_id, jersey, player_id).await? {
                return Err(jersey_conflict(jersey));
            }
        }
        Ok(())
    }
}

fn jersey_conflict(jersey: i32) -> TournamentError {
    TournamentError::conflict(format!("Jersey number {} is already taken in this team", jersey))
}
