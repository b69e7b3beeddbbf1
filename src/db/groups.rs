use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::group::{Group, GroupTeam, GroupTeamEntry};
use crate::tournament::results::TeamStatDelta;

const GROUP_TEAM_ENTRY_SELECT: &str = r#"
    SELECT gt.*, t.name AS team_name, t.logo AS team_logo
    FROM group_teams gt
    JOIN teams t ON t.id = gt.team_id
"#;

pub async fn insert_group<'e, E: PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
    tournament_id: Uuid,
    name: &str,
) -> Result<Group, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        r#"
        INSERT INTO groups (id, tenant_id, tournament_id, name)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(tenant_id)
    .bind(tournament_id)
    .bind(name)
    .fetch_one(executor)
    .await
}

pub async fn fetch_group<'e, E: PgExecutor<'e>>(
    executor: E,
    group_id: Uuid,
    tenant_scope: Option<Uuid>,
) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        "SELECT * FROM groups WHERE id = $1 AND ($2::uuid IS NULL OR tenant_id = $2)",
    )
    .bind(group_id)
    .bind(tenant_scope)
    .fetch_optional(executor)
    .await
}

pub async fn list_groups<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
) -> Result<Vec<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE tournament_id = $1 ORDER BY name ASC")
        .bind(tournament_id)
        .fetch_all(executor)
        .await
}

pub async fn group_name_taken<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
    name: &str,
    exclude_group: Option<Uuid>,
) -> Result<bool, sqlx::Error> {
    let (taken,): (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM groups
            WHERE tournament_id = $1 AND LOWER(name) = LOWER($2)
            AND ($3::uuid IS NULL OR id <> $3)
        )
        "#,
    )
    .bind(tournament_id)
    .bind(name)
    .bind(exclude_group)
    .fetch_one(executor)
    .await?;
    Ok(taken)
}

pub async fn rename_group<'e, E: PgExecutor<'e>>(
    executor: E,
    group_id: Uuid,
    name: &str,
) -> Result<Group, sqlx::Error> {
    sqlx::query_as::<_, Group>("UPDATE groups SET name = $2 WHERE id = $1 RETURNING *")
        .bind(group_id)
        .bind(name)
        .fetch_one(executor)
        .await
}

pub async fn delete_group<'e, E: PgExecutor<'e>>(
    executor: E,
    group_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM groups WHERE id = $1")
        .bind(group_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn list_group_teams<'e, E: PgExecutor<'e>>(
    executor: E,
    group_id: Uuid,
) -> Result<Vec<GroupTeamEntry>, sqlx::Error> {
    let sql = format!("{} WHERE gt.group_id = $1 ORDER BY t.name ASC", GROUP_TEAM_ENTRY_SELECT);
    sqlx::query_as::<_, GroupTeamEntry>(&sql)
        .bind(group_id)
        .fetch_all(executor)
        .await
}

pub async fn list_tournament_group_teams<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
) -> Result<Vec<GroupTeamEntry>, sqlx::Error> {
    let sql = format!("{} WHERE gt.tournament_id = $1 ORDER BY t.name ASC", GROUP_TEAM_ENTRY_SELECT);
    sqlx::query_as::<_, GroupTeamEntry>(&sql)
        .bind(tournament_id)
        .fetch_all(executor)
        .await
}

pub async fn fetch_membership<'e, E: PgExecutor<'e>>(
    executor: E,
    group_id: Uuid,
    team_id: Uuid,
) -> Result<Option<GroupTeam>, sqlx::Error> {
    sqlx::query_as::<_, GroupTeam>("SELECT * FROM group_teams WHERE group_id = $1 AND team_id = $2")
        .bind(group_id)
        .bind(team_id)
        .fetch_optional(executor)
        .await
}

/// Membership of a team anywhere in the tournament.
pub async fn fetch_tournament_membership<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
    team_id: Uuid,
) -> Result<Option<GroupTeam>, sqlx::Error> {
    sqlx::query_as::<_, GroupTeam>(
        "SELECT * FROM group_teams WHERE tournament_id = $1 AND team_id = $2",
    )
    .bind(tournament_id)
    .bind(team_id)
    .fetch_optional(executor)
    .await
}

pub async fn insert_membership<'e, E: PgExecutor<'e>>(
    executor: E,
    group_id: Uuid,
    team_id: Uuid,
    tournament_id: Uuid,
) -> Result<GroupTeam, sqlx::Error> {
    sqlx::query_as::<_, GroupTeam>(
        r#"
        INSERT INTO group_teams (id, group_id, team_id, tournament_id)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(group_id)
    .bind(team_id)
    .bind(tournament_id)
    .fetch_one(executor)
    .await
}

pub async fn delete_membership<'e, E: PgExecutor<'e>>(
    executor: E,
    group_id: Uuid,
    team_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM group_teams WHERE group_id = $1 AND team_id = $2")
        .bind(group_id)
        .bind(team_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Add one match result to a membership row, from that team's perspective.
pub async fn apply_group_result<'e, E: PgExecutor<'e>>(
    executor: E,
    membership_id: Uuid,
    delta: &TeamStatDelta,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE group_teams SET
            played = played + 1,
            wins = wins + $2,
            draws = draws + $3,
            losses = losses + $4,
            goals_for = goals_for + $5,
            goals_against = goals_against + $6,
            points = points + $7
        WHERE id = $1
        "#,
    )
    .bind(membership_id)
    .bind(delta.wins)
    .bind(delta.draws)
    .bind(delta.losses)
    .bind(delta.goals_for)
    .bind(delta.goals_against)
    .bind(delta.points)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
