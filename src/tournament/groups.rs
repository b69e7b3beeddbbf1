use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{groups, helpers::{require_affected, require_record}, teams, tournaments};
use crate::error::{TournamentError, TournamentResult};
use crate::models::context::RequestContext;
use crate::models::group::{CreateGroupRequest, Group, GroupTeam, GroupWithTeams, UpdateGroupRequest};
use crate::tournament::validation::TournamentValidator;

/// Groups and the teams inside them.
///
/// A team is in at most one group per tournament; the service checks it and
/// the `group_teams (tournament_id, team_id)` unique index backs it up.
#[derive(Debug, Clone)]
pub struct GroupService {
    pool: PgPool,
    validator: TournamentValidator,
}

impl GroupService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, validator: TournamentValidator::new() }
    }

    pub async fn list_groups(&self, ctx: &RequestContext, tournament_id: Uuid) -> TournamentResult<Vec<GroupWithTeams>> {
        let tournament = require_record(
            tournaments::fetch_tournament(&self.pool, tournament_id, ctx.tenant_scope()).await,
            "Tournament not found",
        )?;

        let mut members = groups::list_tournament_group_teams(&self.pool, tournament.id).await?;
        let mut result = Vec::new();
        for group in groups::list_groups(&self.pool, tournament.id).await? {
            let (group_teams, rest): (Vec<_>, Vec<_>) =
                members.into_iter().partition(|m| m.membership.group_id == group.id);
            members = rest;
            result.push(GroupWithTeams { group, group_teams });
        }
        Ok(result)
    }

    #[tracing::instrument(name = "Create group", skip(self, ctx, request), fields(name = %request.name))]
    pub async fn create_group(&self, ctx: &RequestContext, request: &CreateGroupRequest) -> TournamentResult<Group> {
        ctx.require_manager()?;
        self.validator.validate_name("Group", &request.name)?;
        let name = request.name.trim();

        let tournament = require_record(
            tournaments::fetch_tournament(&self.pool, request.tournament_id, ctx.tenant_scope()).await,
            "Tournament not found",
        )?;

        if groups::group_name_taken(&self.pool, tournament.id, name, None).await? {
            return Err(TournamentError::conflict(format!("A group named '{}' already exists", name)));
        }

        let group = groups::insert_group(&self.pool, tournament.tenant_id, tournament.id, name).await?;
        tracing::info!("Created {} in tournament {}", group.name, tournament.id);
        Ok(group)
    }

    pub async fn update_group(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        request: &UpdateGroupRequest,
    ) -> TournamentResult<Group> {
        ctx.require_manager()?;
        self.validator.validate_name("Group", &request.name)?;
        let name = request.name.trim();

        let group = require_record(
            groups::fetch_group(&self.pool, group_id, ctx.tenant_scope()).await,
            "Group not found",
        )?;
        if groups::group_name_taken(&self.pool, group.tournament_id, name, Some(group.id)).await? {
            return Err(TournamentError::conflict(format!("A group named '{}' already exists", name)));
        }

        Ok(groups::rename_group(&self.pool, group.id, name).await?)
    }

    /// Memberships go with the group; its matches stay with no group.
    #[tracing::instrument(name = "Delete group", skip(self, ctx))]
    pub async fn delete_group(&self, ctx: &RequestContext, group_id: Uuid) -> TournamentResult<()> {
        ctx.require_manager()?;
        let group = require_record(
            groups::fetch_group(&self.pool, group_id, ctx.tenant_scope()).await,
            "Group not found",
        )?;
        require_affected(groups::delete_group(&self.pool, group.id).await, "Group not found")?;
        tracing::info!("Deleted {} ({})", group.name, group.id);
        Ok(())
    }

    #[tracing::instrument(name = "Add team to group", skip(self, ctx))]
    pub async fn add_team_to_group(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        team_id: Uuid,
    ) -> TournamentResult<GroupTeam> {
        ctx.require_manager()?;
        let mut tx = self.pool.begin().await?;
        let membership = self.insert_member(ctx, &mut tx, group_id, team_id).await?;
        tx.commit().await?;
        Ok(membership)
    }

    #[tracing::instrument(name = "Remove team from group", skip(self, ctx))]
    pub async fn remove_team_from_group(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        team_id: Uuid,
    ) -> TournamentResult<()> {
        ctx.require_manager()?;
        let group = require_record(
            groups::fetch_group(&self.pool, group_id, ctx.tenant_scope()).await,
            "Group not found",
        )?;
        require_affected(
            groups::delete_membership(&self.pool, group.id, team_id).await,
            "Team is not in this group",
        )?;
        tracing::info!("Removed team {} from {}", team_id, group.name);
        Ok(())
    }

    /// Remove from one group and add to another as a single unit.
    #[tracing::instrument(name = "Move team between groups", skip(self, ctx))]
    pub async fn move_team_to_group(
        &self,
        ctx: &RequestContext,
        team_id: Uuid,
        from_group_id: Uuid,
        to_group_id: Uuid,
    ) -> TournamentResult<GroupTeam> {
        ctx.require_manager()?;
        if from_group_id == to_group_id {
            return Err(TournamentError::validation("Team is already in this group"));
        }

        let mut tx = self.pool.begin().await?;

        let from = require_record(
            groups::fetch_group(&mut *tx, from_group_id, ctx.tenant_scope()).await,
            "Group not found",
        )?;
        let to = require_record(
            groups::fetch_group(&mut *tx, to_group_id, ctx.tenant_scope()).await,
            "Target group not found",
        )?;
        if from.tournament_id != to.tournament_id {
            return Err(TournamentError::validation("Both groups must belong to the same tournament"));
        }

        require_affected(
            groups::delete_membership(&mut *tx, from.id, team_id).await,
            "Team is not in this group",
        )?;
        let membership = self.insert_member(ctx, &mut tx, to.id, team_id).await?;

        tx.commit().await?;
        tracing::info!("Moved team {} from {} to {}", team_id, from.name, to.name);
        Ok(membership)
    }

    async fn insert_member(
        &self,
        ctx: &RequestContext,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        group_id: Uuid,
        team_id: Uuid,
    ) -> TournamentResult<GroupTeam> {
        let group = require_record(
            groups::fetch_group(&mut **tx, group_id, ctx.tenant_scope()).await,
            "Group not found",
        )?;
        require_record(
            teams::fetch_team(&mut **tx, team_id, ctx.tenant_scope()).await,
            "Team not found",
        )?;

        if let Some(existing) = groups::fetch_tournament_membership(&mut **tx, group.tournament_id, team_id).await? {
            let message = if existing.group_id == group.id {
                "Team is already in this group"
            } else {
                "Team is already in another group of this tournament"
            };
            return Err(TournamentError::conflict(message));
        }

        let membership = groups::insert_membership(&mut **tx, group.id, team_id, group.tournament_id).await?;
        tracing::debug!("Team {} joined {}", team_id, group.name);
        Ok(membership)
    }
}
