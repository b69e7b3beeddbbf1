use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::TournamentError;
use crate::models::common::ApiResponse;
use crate::models::context::RequestContext;
use crate::models::matches::{CreateMatchRequest, MatchQuery, UpdateMatchRequest, UpdateScoreRequest};
use crate::tournament::matches::MatchService;
use crate::tournament::results::ResultService;

// POST /matches
pub async fn create_match(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    body: web::Json<CreateMatchRequest>,
) -> Result<HttpResponse, TournamentError> {
    let service = MatchService::new(pool.get_ref().clone());
    let created = service.create_match(&ctx, &body).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(created, "Match created")))
}

// GET /matches
pub async fn get_matches(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    query: web::Query<MatchQuery>,
) -> Result<HttpResponse, TournamentError> {
    let service = MatchService::new(pool.get_ref().clone());
    let matches = service.list_matches(&ctx, &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(matches)))
}

// GET /matches/{id}
pub async fn get_match(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    let service = MatchService::new(pool.get_ref().clone());
    let game = service.get_match(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(game)))
}

// PUT /matches/{id}
pub async fn update_match(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateMatchRequest>,
) -> Result<HttpResponse, TournamentError> {
    let service = MatchService::new(pool.get_ref().clone());
    let game = service.update_match(&ctx, path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(game, "Match updated")))
}

// PUT /matches/{id}/score
pub async fn update_match_score(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateScoreRequest>,
) -> Result<HttpResponse, TournamentError> {
    let service = ResultService::new(pool.get_ref().clone());
    let game = service.update_match_score(&ctx, path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(game, "Score updated")))
}

// DELETE /matches/{id}
pub async fn delete_match(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    let service = MatchService::new(pool.get_ref().clone());
    service.delete_match(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::with_message((), "Match deleted")))
}
