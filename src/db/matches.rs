use chrono::{NaiveDate, NaiveTime};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::matches::{Match, MatchQuery, MatchStage, MatchStatus, NewMatch};

pub async fn insert_match<'e, E: PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
    new_match: &NewMatch,
) -> Result<Match, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        r#"
        INSERT INTO matches (
            id, tenant_id, tournament_id, group_id, stage, bracket_position,
            date, time, venue, home_team, away_team, status
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'scheduled')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(tenant_id)
    .bind(new_match.tournament_id)
    .bind(new_match.group_id)
    .bind(new_match.stage)
    .bind(new_match.bracket_position)
    .bind(new_match.date)
    .bind(new_match.time)
    .bind(&new_match.venue)
    .bind(new_match.home_team)
    .bind(new_match.away_team)
    .fetch_one(executor)
    .await
}

pub async fn fetch_match<'e, E: PgExecutor<'e>>(
    executor: E,
    match_id: Uuid,
    tenant_scope: Option<Uuid>,
) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        "SELECT * FROM matches WHERE id = $1 AND ($2::uuid IS NULL OR tenant_id = $2)",
    )
    .bind(match_id)
    .bind(tenant_scope)
    .fetch_optional(executor)
    .await
}

/// Same as `fetch_match` but takes a row lock for the rest of the transaction.
pub async fn fetch_match_for_update<'e, E: PgExecutor<'e>>(
    executor: E,
    match_id: Uuid,
    tenant_scope: Option<Uuid>,
) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        r#"
        SELECT * FROM matches
        WHERE id = $1 AND ($2::uuid IS NULL OR tenant_id = $2)
        FOR UPDATE
        "#,
    )
    .bind(match_id)
    .bind(tenant_scope)
    .fetch_optional(executor)
    .await
}

pub async fn list_matches<'e, E: PgExecutor<'e>>(
    executor: E,
    tenant_scope: Option<Uuid>,
    query: &MatchQuery,
) -> Result<Vec<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        r#"
        SELECT * FROM matches
        WHERE ($1::uuid IS NULL OR tenant_id = $1)
        AND ($2::uuid IS NULL OR tournament_id = $2)
        AND ($3::uuid IS NULL OR group_id = $3)
        AND ($4::varchar IS NULL OR status = $4)
        AND ($5::date IS NULL OR date = $5)
        ORDER BY date ASC, time ASC
        "#,
    )
    .bind(tenant_scope)
    .bind(query.tournament_id)
    .bind(query.group_id)
    .bind(query.status)
    .bind(query.date)
    .fetch_all(executor)
    .await
}

pub async fn list_group_matches<'e, E: PgExecutor<'e>>(
    executor: E,
    group_id: Uuid,
) -> Result<Vec<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        "SELECT * FROM matches WHERE group_id = $1 ORDER BY date ASC, time ASC",
    )
    .bind(group_id)
    .fetch_all(executor)
    .await
}

pub async fn list_tournament_matches<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
) -> Result<Vec<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        "SELECT * FROM matches WHERE tournament_id = $1 ORDER BY date ASC, time ASC",
    )
    .bind(tournament_id)
    .fetch_all(executor)
    .await
}

pub async fn list_stage_matches<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
    stage: MatchStage,
) -> Result<Vec<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        r#"
        SELECT * FROM matches
        WHERE tournament_id = $1 AND stage = $2
        ORDER BY bracket_position ASC NULLS LAST, date ASC, time ASC
        "#,
    )
    .bind(tournament_id)
    .bind(stage)
    .fetch_all(executor)
    .await
}

/// Whether the two teams already meet in this group, in either direction.
pub async fn fixture_exists<'e, E: PgExecutor<'e>>(
    executor: E,
    group_id: Uuid,
    team_a: Uuid,
    team_b: Uuid,
) -> Result<bool, sqlx::Error> {
    let (exists,): (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM matches
            WHERE group_id = $1
            AND ((home_team = $2 AND away_team = $3) OR (home_team = $3 AND away_team = $2))
        )
        "#,
    )
    .bind(group_id)
    .bind(team_a)
    .bind(team_b)
    .fetch_one(executor)
    .await?;
    Ok(exists)
}

pub async fn last_match_date<'e, E: PgExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
) -> Result<Option<NaiveDate>, sqlx::Error> {
    let (date,): (Option<NaiveDate>,) =
        sqlx::query_as("SELECT MAX(date) FROM matches WHERE tournament_id = $1")
            .bind(tournament_id)
            .fetch_one(executor)
            .await?;
    Ok(date)
}

pub async fn update_match_details<'e, E: PgExecutor<'e>>(
    executor: E,
    match_id: Uuid,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    venue: Option<&str>,
    status: Option<MatchStatus>,
) -> Result<Match, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        r#"
        UPDATE matches SET
            date = COALESCE($2, date),
            time = COALESCE($3, time),
            venue = COALESCE($4, venue),
            status = COALESCE($5, status),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(match_id)
    .bind(date)
    .bind(time)
    .bind(venue)
    .bind(status)
    .fetch_one(executor)
    .await
}

pub async fn record_score<'e, E: PgExecutor<'e>>(
    executor: E,
    match_id: Uuid,
    home_score: i32,
    away_score: i32,
    status: MatchStatus,
) -> Result<Match, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        r#"
        UPDATE matches SET
            home_score = $2,
            away_score = $3,
            status = $4,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(match_id)
    .bind(home_score)
    .bind(away_score)
    .bind(status)
    .fetch_one(executor)
    .await
}

pub async fn delete_match<'e, E: PgExecutor<'e>>(
    executor: E,
    match_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM matches WHERE id = $1")
        .bind(match_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count_completed_team_matches<'e, E: PgExecutor<'e>>(
    executor: E,
    team_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM matches
        WHERE (home_team = $1 OR away_team = $1) AND status = 'completed'
        "#,
    )
    .bind(team_id)
    .fetch_one(executor)
    .await?;
    Ok(count)
}

/// Remove every match of a team that has not been completed.
pub async fn delete_open_team_matches<'e, E: PgExecutor<'e>>(
    executor: E,
    team_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM matches WHERE (home_team = $1 OR away_team = $1) AND status <> 'completed'",
    )
    .bind(team_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
