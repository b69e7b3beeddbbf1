use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::stadium::{Stadium, StadiumRequest};

pub async fn insert_stadium<'e, E: PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
    request: &StadiumRequest,
) -> Result<Stadium, sqlx::Error> {
    sqlx::query_as::<_, Stadium>(
        r#"
        INSERT INTO stadiums (
            id, tenant_id, name, address, city, region, capacity, field_count,
            field_types, amenities, description, is_partner
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(tenant_id)
    .bind(request.name.trim())
    .bind(&request.address)
    .bind(request.city.trim())
    .bind(&request.region)
    .bind(request.capacity)
    .bind(request.field_count.unwrap_or(1))
    .bind(&request.field_types)
    .bind(&request.amenities)
    .bind(&request.description)
    .bind(request.is_partner)
    .fetch_one(executor)
    .await
}

pub async fn fetch_stadium<'e, E: PgExecutor<'e>>(
    executor: E,
    stadium_id: Uuid,
    tenant_scope: Option<Uuid>,
) -> Result<Option<Stadium>, sqlx::Error> {
    sqlx::query_as::<_, Stadium>(
        "SELECT * FROM stadiums WHERE id = $1 AND ($2::uuid IS NULL OR tenant_id = $2)",
    )
    .bind(stadium_id)
    .bind(tenant_scope)
    .fetch_optional(executor)
    .await
}

pub async fn list_stadiums<'e, E: PgExecutor<'e>>(
    executor: E,
    tenant_scope: Option<Uuid>,
    search: Option<&str>,
    city: Option<&str>,
) -> Result<Vec<Stadium>, sqlx::Error> {
    let like = |value: Option<&str>| {
        value
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s))
    };

    sqlx::query_as::<_, Stadium>(
        r#"
        SELECT * FROM stadiums
        WHERE ($1::uuid IS NULL OR tenant_id = $1)
        AND ($2::text IS NULL OR name ILIKE $2)
        AND ($3::text IS NULL OR city ILIKE $3)
        ORDER BY name ASC
        "#,
    )
    .bind(tenant_scope)
    .bind(like(search))
    .bind(like(city))
    .fetch_all(executor)
    .await
}

pub async fn update_stadium<'e, E: PgExecutor<'e>>(
    executor: E,
    stadium_id: Uuid,
    tenant_scope: Option<Uuid>,
    request: &StadiumRequest,
) -> Result<Option<Stadium>, sqlx::Error> {
    sqlx::query_as::<_, Stadium>(
        r#"
        UPDATE stadiums SET
            name = $3,
            address = $4,
            city = $5,
            region = $6,
            capacity = $7,
            field_count = $8,
            field_types = $9,
            amenities = $10,
            description = $11,
            is_partner = $12,
            updated_at = NOW()
        WHERE id = $1 AND ($2::uuid IS NULL OR tenant_id = $2)
        RETURNING *
        "#,
    )
    .bind(stadium_id)
    .bind(tenant_scope)
    .bind(request.name.trim())
    .bind(&request.address)
    .bind(request.city.trim())
    .bind(&request.region)
    .bind(request.capacity)
    .bind(request.field_count.unwrap_or(1))
    .bind(&request.field_types)
    .bind(&request.amenities)
    .bind(&request.description)
    .bind(request.is_partner)
    .fetch_optional(executor)
    .await
}

pub async fn delete_stadium<'e, E: PgExecutor<'e>>(
    executor: E,
    stadium_id: Uuid,
    tenant_scope: Option<Uuid>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM stadiums WHERE id = $1 AND ($2::uuid IS NULL OR tenant_id = $2)")
        .bind(stadium_id)
        .bind(tenant_scope)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
