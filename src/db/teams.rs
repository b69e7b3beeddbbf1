use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::team::{CreateTeamRequest, Team, UpdateTeamRequest};
use crate::tournament::results::TeamStatDelta;

pub async fn insert_team<'e, E: PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
    request: &CreateTeamRequest,
) -> Result<Team, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"
        INSERT INTO teams (id, tenant_id, name, logo, coach_name)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(tenant_id)
    .bind(request.name.trim())
    .bind(&request.logo)
    .bind(&request.coach_name)
    .fetch_one(executor)
    .await
}

pub async fn fetch_team<'e, E: PgExecutor<'e>>(
    executor: E,
    team_id: Uuid,
    tenant_scope: Option<Uuid>,
) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        "SELECT * FROM teams WHERE id = $1 AND ($2::uuid IS NULL OR tenant_id = $2)",
    )
    .bind(team_id)
    .bind(tenant_scope)
    .fetch_optional(executor)
    .await
}

pub async fn list_teams<'e, E: PgExecutor<'e>>(
    executor: E,
    tenant_scope: Option<Uuid>,
    search: Option<&str>,
) -> Result<Vec<Team>, sqlx::Error> {
    let pattern = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s));

    sqlx::query_as::<_, Team>(
        r#"
        SELECT * FROM teams
        WHERE ($1::uuid IS NULL OR tenant_id = $1)
        AND ($2::text IS NULL OR name ILIKE $2)
        ORDER BY name ASC
        "#,
    )
    .bind(tenant_scope)
    .bind(pattern)
    .fetch_all(executor)
    .await
}

pub async fn update_team<'e, E: PgExecutor<'e>>(
    executor: E,
    team_id: Uuid,
    tenant_scope: Option<Uuid>,
    request: &UpdateTeamRequest,
) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"
        UPDATE teams SET
            name = COALESCE($3, name),
            logo = COALESCE($4, logo),
            coach_name = COALESCE($5, coach_name),
            updated_at = NOW()
        WHERE id = $1 AND ($2::uuid IS NULL OR tenant_id = $2)
        RETURNING *
        "#,
    )
    .bind(team_id)
    .bind(tenant_scope)
    .bind(request.name.as_deref().map(str::trim))
    .bind(&request.logo)
    .bind(&request.coach_name)
    .fetch_optional(executor)
    .await
}

pub async fn delete_team<'e, E: PgExecutor<'e>>(
    executor: E,
    team_id: Uuid,
    tenant_scope: Option<Uuid>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM teams WHERE id = $1 AND ($2::uuid IS NULL OR tenant_id = $2)")
        .bind(team_id)
        .bind(tenant_scope)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Add one match result to a team's aggregate counters.
pub async fn apply_team_result<'e, E: PgExecutor<'e>>(
    executor: E,
    team_id: Uuid,
    delta: &TeamStatDelta,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE teams SET
            matches_played = matches_played + 1,
            wins = wins + $2,
            draws = draws + $3,
            losses = losses + $4,
            goals_scored = goals_scored + $5,
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(team_id)
    .bind(delta.wins)
    .bind(delta.draws)
    .bind(delta.losses)
    .bind(delta.goals_for)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
