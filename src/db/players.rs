use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::player::{CreatePlayerRequest, Player, PlayerQuery, UpdatePlayerRequest};

pub async fn insert_player<'e, E: PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
    request: &CreatePlayerRequest,
) -> Result<Player, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"
        INSERT INTO players (id, tenant_id, team_id, name, position, level, age, jersey_number)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(tenant_id)
    .bind(request.team_id)
    .bind(request.name.trim())
    .bind(request.position)
    .bind(request.level.trim())
    .bind(request.age)
    .bind(request.jersey_number)
    .fetch_one(executor)
    .await
}

pub async fn fetch_player<'e, E: PgExecutor<'e>>(
    executor: E,
    player_id: Uuid,
    tenant_scope: Option<Uuid>,
) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        "SELECT * FROM players WHERE id = $1 AND ($2::uuid IS NULL OR tenant_id = $2)",
    )
    .bind(player_id)
    .bind(tenant_scope)
    .fetch_optional(executor)
    .await
}

pub async fn list_players<'e, E: PgExecutor<'e>>(
    executor: E,
    tenant_scope: Option<Uuid>,
    query: &PlayerQuery,
) -> Result<Vec<Player>, sqlx::Error> {
    let pattern = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s));

    sqlx::query_as::<_, Player>(
        r#"
        SELECT * FROM players
        WHERE ($1::uuid IS NULL OR tenant_id = $1)
        AND ($2::uuid IS NULL OR team_id = $2)
        AND ($3::text IS NULL OR name ILIKE $3)
        AND (NOT $4 OR team_id IS NULL)
        ORDER BY name ASC
        "#,
    )
    .bind(tenant_scope)
    .bind(query.team_id)
    .bind(pattern)
    .bind(query.free)
    .fetch_all(executor)
    .await
}

/// Players on the rosters of every team registered in a tournament.
pub async fn list_tournament_players<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"
        SELECT p.* FROM players p
        JOIN tournament_teams tt ON tt.team_id = p.team_id
        WHERE tt.tournament_id = $1
        ORDER BY p.team_id, p.jersey_number ASC NULLS LAST, p.name ASC
        "#,
    )
    .bind(tournament_id)
    .fetch_all(executor)
    .await
}

/// Whether another player of `team_id` already wears `jersey_number`.
pub async fn jersey_taken<'e, E: PgExecutor<'e>>(
    executor: E,
    team_id: Uuid,
    jersey_number: i32,
    except_player: Option<Uuid>,
) -> Result<bool, sqlx::Error> {
    let (taken,): (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM players
            WHERE team_id = $1 AND jersey_number = $2
            AND ($3::uuid IS NULL OR id <> $3)
        )
        "#,
    )
    .bind(team_id)
    .bind(jersey_number)
    .bind(except_player)
    .fetch_one(executor)
    .await?;
    Ok(taken)
}

pub async fn update_player<'e, E: PgExecutor<'e>>(
    executor: E,
    player_id: Uuid,
    request: &UpdatePlayerRequest,
) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"
        UPDATE players SET
            name = COALESCE($2, name),
            position = COALESCE($3, position),
            level = COALESCE($4, level),
            age = COALESCE($5, age),
            jersey_number = COALESCE($6, jersey_number),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(player_id)
    .bind(request.name.as_deref().map(str::trim))
    .bind(request.position)
    .bind(request.level.as_deref().map(str::trim))
    .bind(request.age)
    .bind(request.jersey_number)
    .fetch_optional(executor)
    .await
}

pub async fn set_player_team<'e, E: PgExecutor<'e>>(
    executor: E,
    player_id: Uuid,
    team_id: Option<Uuid>,
) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        "UPDATE players SET team_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(player_id)
    .bind(team_id)
    .fetch_optional(executor)
    .await
}

pub async fn delete_player<'e, E: PgExecutor<'e>>(
    executor: E,
    player_id: Uuid,
    tenant_scope: Option<Uuid>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM players WHERE id = $1 AND ($2::uuid IS NULL OR tenant_id = $2)")
        .bind(player_id)
        .bind(tenant_scope)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
