use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::TournamentError;
use crate::models::common::ApiResponse;
use crate::models::context::RequestContext;
use crate::models::stadium::{StadiumQuery, StadiumRequest};
use crate::tournament::catalogue::StadiumService;

// POST /stadiums
pub async fn create_stadium(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    body: web::Json<StadiumRequest>,
) -> Result<HttpResponse, TournamentError> {
    let stadium = StadiumService::new(pool.get_ref().clone()).create_stadium(&ctx, &body).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(stadium, "Stadium created")))
}

// GET /stadiums
pub async fn get_stadiums(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    query: web::Query<StadiumQuery>,
) -> Result<HttpResponse, TournamentError> {
    let stadiums = StadiumService::new(pool.get_ref().clone()).list_stadiums(&ctx, &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(stadiums)))
}

// GET /stadiums/{id}
pub async fn get_stadium(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    let stadium = StadiumService::new(pool.get_ref().clone())
        .get_stadium(&ctx, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(stadium)))
}

// PUT /stadiums/{id}
pub async fn update_stadium(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<StadiumRequest>,
) -> Result<HttpResponse, TournamentError> {
    let stadium = StadiumService::new(pool.get_ref().clone())
        .update_stadium(&ctx, path.into_inner(), &body)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(stadium, "Stadium updated")))
}

// DELETE /stadiums/{id}
pub async fn delete_stadium(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    StadiumService::new(pool.get_ref().clone())
        .delete_stadium(&ctx, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::with_message((), "Stadium deleted")))
}
