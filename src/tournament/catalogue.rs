use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{helpers::{require_affected, require_record}, matches, stadiums, teams};
use crate::error::{TournamentError, TournamentResult};
use crate::models::context::RequestContext;
use crate::models::stadium::{Stadium, StadiumQuery, StadiumRequest};
use crate::models::team::{CreateTeamRequest, Team, TeamQuery, UpdateTeamRequest};
use crate::tournament::validation::TournamentValidator;

#[derive(Debug, Clone)]
pub struct TeamService {
    pool: PgPool,
    validator: TournamentValidator,
}

impl TeamService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, validator: TournamentValidator::new() }
    }

    pub async fn create_team(&self, ctx: &RequestContext, request: &CreateTeamRequest) -> TournamentResult<Team> {
        ctx.require_manager()?;
        self.validator.validate_name("Team", &request.name)?;
        let team = teams::insert_team(&self.pool, ctx.tenant_id, request).await?;
        tracing::info!("Created team {} ({})", team.name, team.id);
        Ok(team)
    }

    pub async fn list_teams(&self, ctx: &RequestContext, query: &TeamQuery) -> TournamentResult<Vec<Team>> {
        Ok(teams::list_teams(&self.pool, ctx.tenant_scope(), query.search.as_deref()).await?)
    }

    pub async fn get_team(&self, ctx: &RequestContext, team_id: Uuid) -> TournamentResult<Team> {
        require_record(teams::fetch_team(&self.pool, team_id, ctx.tenant_scope()).await, "Team not found")
    }

    pub async fn update_team(
        &self,
        ctx: &RequestContext,
        team_id: Uuid,
        request: &UpdateTeamRequest,
    ) -> TournamentResult<Team> {
        ctx.require_manager()?;
        if let Some(name) = request.name.as_deref() {
            self.validator.validate_name("Team", name)?;
        }
        require_record(
            teams::update_team(&self.pool, team_id, ctx.tenant_scope(), request).await,
            "Team not found",
        )
    }

    /// Delete a team along with its unplayed fixtures. A team with completed
    /// matches stays, since those results are part of the standings.
    #[tracing::instrument(name = "Delete team", skip(self, ctx))]
    pub async fn delete_team(&self, ctx: &RequestContext, team_id: Uuid) -> TournamentResult<()> {
        ctx.require_manager()?;
        let mut tx = self.pool.begin().await?;

        let team = require_record(
            teams::fetch_team(&mut *tx, team_id, ctx.tenant_scope()).await,
            "Team not found",
        )?;
        if matches::count_completed_team_matches(&mut *tx, team.id).await? > 0 {
            return Err(TournamentError::validation(
                "Cannot delete a team that has completed matches",
            ));
        }

        let dropped = matches::delete_open_team_matches(&mut *tx, team.id).await?;
        require_affected(teams::delete_team(&mut *tx, team.id, ctx.tenant_scope()).await, "Team not found")?;
        tx.commit().await?;

        tracing::info!("Deleted team {} and {} unplayed matches", team.id, dropped);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct StadiumService {
    pool: PgPool,
    validator: TournamentValidator,
}

impl StadiumService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, validator: TournamentValidator::new() }
    }

    pub async fn create_stadium(&self, ctx: &RequestContext, request: &StadiumRequest) -> TournamentResult<Stadium> {
        ctx.require_manager()?;
        self.validator.validate_stadium(request)?;
        let stadium = stadiums::insert_stadium(&self.pool, ctx.tenant_id, request).await?;
        tracing::info!("Created stadium {} in {}", stadium.name, stadium.city);
        Ok(stadium)
    }

    pub async fn list_stadiums(&self, ctx: &RequestContext, query: &StadiumQuery) -> TournamentResult<Vec<Stadium>> {
        Ok(stadiums::list_stadiums(
            &self.pool,
            ctx.tenant_scope(),
            query.search.as_deref(),
            query.city.as_deref(),
        )
        .await?)
    }

    pub async fn get_stadium(&self, ctx: &RequestContext, stadium_id: Uuid) -> TournamentResult<Stadium> {
        require_record(
            stadiums::fetch_stadium(&self.pool, stadium_id, ctx.tenant_scope()).await,
            "Stadium not found",
        )
    }

    pub async fn update_stadium(
        &self,
        ctx: &RequestContext,
        stadium_id: Uuid,
        request: &StadiumRequest,
    ) -> TournamentResult<Stadium> {
        ctx.require_manager()?;
        self.validator.validate_stadium(request)?;
        require_record(
            stadiums::update_stadium(&self.pool, stadium_id, ctx.tenant_scope(), request).await,
            "Stadium not found",
        )
    }

    pub async fn delete_stadium(&self, ctx: &RequestContext, stadium_id: Uuid) -> TournamentResult<()> {
        ctx.require_manager()?;
        require_affected(
            stadiums::delete_stadium(&self.pool, stadium_id, ctx.tenant_scope()).await,
            "Stadium not found",
        )
    }
}
