use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{groups, helpers::{require_affected, require_record}, teams, tournaments};
use crate::error::{TournamentError, TournamentResult};
use crate::models::context::RequestContext;
use crate::models::group::GroupWithTeams;
use crate::models::team::Team;
use crate::models::tournament::*;
use crate::tournament::draw::DrawService;
use crate::tournament::groups::GroupService;
use crate::tournament::qualification::QualificationService;
use crate::tournament::schedule::ScheduleService;
use crate::tournament::validation::TournamentValidator;

/// Main tournament service that orchestrates tournament-level operations
pub struct TournamentService {
    pool: PgPool,
    groups: GroupService,
    draw: DrawService,
    schedule: ScheduleService,
    qualification: QualificationService,
    validator: TournamentValidator,
}

impl TournamentService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            groups: GroupService::new(pool.clone()),
            draw: DrawService::new(pool.clone()),
            schedule: ScheduleService::new(pool.clone()),
            qualification: QualificationService::new(pool.clone()),
            validator: TournamentValidator::new(),
            pool,
        }
    }

    #[tracing::instrument(name = "Create tournament", skip(self, ctx, request), fields(name = %request.name))]
    pub async fn create_tournament(
        &self,
        ctx: &RequestContext,
        request: &CreateTournamentRequest,
    ) -> TournamentResult<Tournament> {
        ctx.require_manager()?;
        self.validator.validate_create_tournament(request)?;
        let tournament = tournaments::insert_tournament(&self.pool, ctx.tenant_id, request).await?;
        tracing::info!("Created tournament {} ({})", tournament.name, tournament.id);
        Ok(tournament)
    }

    pub async fn list_tournaments(
        &self,
        ctx: &RequestContext,
        query: &TournamentQuery,
    ) -> TournamentResult<Vec<Tournament>> {
        Ok(tournaments::list_tournaments(&self.pool, ctx.tenant_scope(), query.status).await?)
    }

    /// Tournament with its groups and registered teams.
    pub async fn get_tournament(&self, ctx: &RequestContext, tournament_id: Uuid) -> TournamentResult<TournamentDetails> {
        let tournament = self.fetch(ctx, tournament_id).await?;
        let groups = self.groups.list_groups(ctx, tournament.id).await?;
        let tournament_teams = tournaments::list_registered_teams(&self.pool, tournament.id).await?;
        Ok(TournamentDetails { tournament, groups, tournament_teams })
    }

    pub async fn update_tournament(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        request: &UpdateTournamentRequest,
    ) -> TournamentResult<Tournament> {
        ctx.require_manager()?;
        let current = self.fetch(ctx, tournament_id).await?;

        if let Some(name) = request.name.as_deref() {
            self.validator.validate_name("Tournament", name)?;
        }
        self.validator.validate_tournament_shape(
            request.start_date.unwrap_or(current.start_date),
            request.end_date.unwrap_or(current.end_date),
            request.number_of_groups.unwrap_or(current.number_of_groups),
            request.teams_per_group.unwrap_or(current.teams_per_group),
            request.qualifiers_per_group.unwrap_or(current.qualifiers_per_group),
        )?;

        require_record(
            tournaments::update_tournament(&self.pool, current.id, ctx.tenant_scope(), request).await,
            "Tournament not found",
        )
    }

    /// Groups, matches and registrations go with it.
    #[tracing::instrument(name = "Delete tournament", skip(self, ctx))]
    pub async fn delete_tournament(&self, ctx: &RequestContext, tournament_id: Uuid) -> TournamentResult<()> {
        ctx.require_manager()?;
        require_affected(
            tournaments::delete_tournament(&self.pool, tournament_id, ctx.tenant_scope()).await,
            "Tournament not found",
        )?;
        tracing::info!("Deleted tournament {}", tournament_id);
        Ok(())
    }

    pub async fn register_team(&self, ctx: &RequestContext, tournament_id: Uuid, team_id: Uuid) -> TournamentResult<Team> {
        ctx.require_manager()?;
        let tournament = self.fetch(ctx, tournament_id).await?;
        let team = require_record(teams::fetch_team(&self.pool, team_id, ctx.tenant_scope()).await, "Team not found")?;

        if !tournaments::register_team(&self.pool, tournament.id, team.id).await? {
            return Err(TournamentError::conflict("Team already registered in this tournament"));
        }
        tracing::info!("Registered team {} in tournament {}", team.name, tournament.id);
        Ok(team)
    }

    /// A team still placed in a group keeps its fixtures, so it has to leave
    /// the group before it can leave the tournament.
    pub async fn unregister_team(&self, ctx: &RequestContext, tournament_id: Uuid, team_id: Uuid) -> TournamentResult<()> {
        ctx.require_manager()?;
        let tournament = self.fetch(ctx, tournament_id).await?;
        let mut tx = self.pool.begin().await?;
        if groups::fetch_tournament_membership(&mut *tx, tournament.id, team_id).await?.is_some() {
            return Err(TournamentError::validation(
                "Remove the team from its group before unregistering it",
            ));
        }
        require_affected(
            tournaments::unregister_team(&mut *tx, tournament.id, team_id).await,
            "Team is not registered in this tournament",
        )?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn list_registered_teams(&self, ctx: &RequestContext, tournament_id: Uuid) -> TournamentResult<Vec<Team>> {
        let tournament = self.fetch(ctx, tournament_id).await?;
        Ok(tournaments::list_registered_teams(&self.pool, tournament.id).await?)
    }

    pub async fn list_groups(&self, ctx: &RequestContext, tournament_id: Uuid) -> TournamentResult<Vec<GroupWithTeams>> {
        self.groups.list_groups(ctx, tournament_id).await
    }

    pub async fn generate_draw(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        request: &DrawRequest,
    ) -> TournamentResult<Vec<GroupWithTeams>> {
        self.draw.generate_draw(ctx, tournament_id, request.number_of_groups).await
    }

    pub async fn generate_group_matches(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        request: &GenerateMatchesRequest,
    ) -> TournamentResult<GenerationSummary> {
        self.schedule
            .generate_group_matches(ctx, tournament_id, request.time.as_deref(), request.start_date)
            .await
    }

    pub async fn assign_qualified_teams(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
    ) -> TournamentResult<QualificationResponse> {
        self.qualification.assign_qualified_teams(ctx, tournament_id).await
    }

    pub async fn generate_final_phase_matches(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        request: &FinalPhaseRequest,
    ) -> TournamentResult<FinalPhaseSummary> {
        self.schedule
            .generate_final_phase_matches(ctx, tournament_id, request.time.as_deref())
            .await
    }

    async fn fetch(&self, ctx: &RequestContext, tournament_id: Uuid) -> TournamentResult<Tournament> {
        require_record(
            tournaments::fetch_tournament(&self.pool, tournament_id, ctx.tenant_scope()).await,
            "Tournament not found",
        )
    }
}
