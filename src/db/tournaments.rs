use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::team::Team;
use crate::models::tournament::{CreateTournamentRequest, Tournament, TournamentStatus, UpdateTournamentRequest};

pub async fn insert_tournament<'e, E: PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
    request: &CreateTournamentRequest,
) -> Result<Tournament, sqlx::Error> {
    sqlx::query_as::<_, Tournament>(
        r#"
        INSERT INTO tournaments (
            id, tenant_id, name, logo, start_date, end_date, prize, rules, stadium,
            status, number_of_groups, teams_per_group, qualifiers_per_group
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'upcoming', $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(tenant_id)
    .bind(request.name.trim())
    .bind(&request.logo)
    .bind(request.start_date)
    .bind(request.end_date)
    .bind(&request.prize)
    .bind(&request.rules)
    .bind(&request.stadium)
    .bind(request.number_of_groups.unwrap_or(2))
    .bind(request.teams_per_group.unwrap_or(4))
    .bind(request.qualifiers_per_group.unwrap_or(2))
    .fetch_one(executor)
    .await
}

pub async fn fetch_tournament<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
    tenant_scope: Option<Uuid>,
) -> Result<Option<Tournament>, sqlx::Error> {
    sqlx::query_as::<_, Tournament>(
        "SELECT * FROM tournaments WHERE id = $1 AND ($2::uuid IS NULL OR tenant_id = $2)",
    )
    .bind(tournament_id)
    .bind(tenant_scope)
    .fetch_optional(executor)
    .await
}

pub async fn list_tournaments<'e, E: PgExecutor<'e>>(
    executor: E,
    tenant_scope: Option<Uuid>,
    status: Option<TournamentStatus>,
) -> Result<Vec<Tournament>, sqlx::Error> {
    sqlx::query_as::<_, Tournament>(
        r#"
        SELECT * FROM tournaments
        WHERE ($1::uuid IS NULL OR tenant_id = $1)
        AND ($2::varchar IS NULL OR status = $2)
        ORDER BY start_date DESC, name ASC
        "#,
    )
    .bind(tenant_scope)
    .bind(status)
    .fetch_all(executor)
    .await
}

pub async fn update_tournament<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
    tenant_scope: Option<Uuid>,
    request: &UpdateTournamentRequest,
) -> Result<Option<Tournament>, sqlx::Error> {
    sqlx::query_as::<_, Tournament>(
        r#"
        UPDATE tournaments SET
            name = COALESCE($3, name),
            logo = COALESCE($4, logo),
            start_date = COALESCE($5, start_date),
            end_date = COALESCE($6, end_date),
            prize = COALESCE($7, prize),
            rules = COALESCE($8, rules),
            stadium = COALESCE($9, stadium),
            status = COALESCE($10, status),
            number_of_groups = COALESCE($11, number_of_groups),
            teams_per_group = COALESCE($12, teams_per_group),
            qualifiers_per_group = COALESCE($13, qualifiers_per_group),
            updated_at = NOW()
        WHERE id = $1 AND ($2::uuid IS NULL OR tenant_id = $2)
        RETURNING *
        "#,
    )
    .bind(tournament_id)
    .bind(tenant_scope)
    .bind(request.name.as_deref().map(str::trim))
    .bind(&request.logo)
    .bind(request.start_date)
    .bind(request.end_date)
    .bind(&request.prize)
    .bind(&request.rules)
    .bind(&request.stadium)
    .bind(request.status)
    .bind(request.number_of_groups)
    .bind(request.teams_per_group)
    .bind(request.qualifiers_per_group)
    .fetch_optional(executor)
    .await
}

pub async fn delete_tournament<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
    tenant_scope: Option<Uuid>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM tournaments WHERE id = $1 AND ($2::uuid IS NULL OR tenant_id = $2)",
    )
    .bind(tournament_id)
    .bind(tenant_scope)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

pub async fn mark_draw_completed<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
    number_of_groups: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE tournaments
        SET draw_completed = TRUE, number_of_groups = $2, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(tournament_id)
    .bind(number_of_groups)
    .execute(executor)
    .await?;
    Ok(())
}

/// Returns false when the team was already registered.
pub async fn register_team<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
    team_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO tournament_teams (tournament_id, team_id)
        VALUES ($1, $2)
        ON CONFLICT (tournament_id, team_id) DO NOTHING
        "#,
    )
    .bind(tournament_id)
    .bind(team_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn unregister_team<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
    team_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tournament_teams WHERE tournament_id = $1 AND team_id = $2")
        .bind(tournament_id)
        .bind(team_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn list_registered_teams<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
) -> Result<Vec<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"
        SELECT t.*
        FROM tournament_teams tt
        JOIN teams t ON t.id = tt.team_id
        WHERE tt.tournament_id = $1
        ORDER BY tt.registered_at ASC, t.name ASC
        "#,
    )
    .bind(tournament_id)
    .fetch_all(executor)
    .await
}
