use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::TournamentError;
use crate::models::common::ApiResponse;
use crate::models::context::RequestContext;
use crate::models::player::{AssignPlayerRequest, CreatePlayerRequest, PlayerQuery, UpdatePlayerRequest};
use crate::tournament::players::PlayerService;

// POST /players
pub async fn create_player(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    body: web::Json<CreatePlayerRequest>,
) -> Result<HttpResponse, TournamentError> {
    let player = PlayerService::new(pool.get_ref().clone()).create_player(&ctx, &body).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(player, "Player created")))
}

// GET /players?teamId&search&free
pub async fn get_players(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    query: web::Query<PlayerQuery>,
) -> Result<HttpResponse, TournamentError> {
    let players = PlayerService::new(pool.get_ref().clone()).list_players(&ctx, &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(players)))
}

// GET /players/{id}
pub async fn get_player(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    let player = PlayerService::new(pool.get_ref().clone()).get_player(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(player)))
}

// PUT /players/{id}
pub async fn update_player(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePlayerRequest>,
) -> Result<HttpResponse, TournamentError> {
    let player = PlayerService::new(pool.get_ref().clone())
        .update_player(&ctx, path.into_inner(), &body)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(player, "Player updated")))
}

// PUT /players/{id}/team
pub async fn assign_player_to_team(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<AssignPlayerRequest>,
) -> Result<HttpResponse, TournamentError> {
    let player = PlayerService::new(pool.get_ref().clone())
        .assign_player_to_team(&ctx, path.into_inner(), body.team_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(player)))
}

// DELETE /players/{id}
pub async fn delete_player(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    PlayerService::new(pool.get_ref().clone()).delete_player(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::with_message((), "Player deleted")))
}

// GET /teams/{id}/players
pub async fn get_team_players(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    let players = PlayerService::new(pool.get_ref().clone())
        .list_team_players(&ctx, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(players)))
}

// GET /tournaments/{id}/players
pub async fn get_tournament_players(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    let players = PlayerService::new(pool.get_ref().clone())
        .list_tournament_players(&ctx, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(players)))
}
