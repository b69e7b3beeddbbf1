use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::TournamentError;
use crate::models::common::ApiResponse;
use crate::models::context::RequestContext;
use crate::models::tournament::*;
use crate::tournament::tournament::TournamentService;

// POST /tournaments
pub async fn create_tournament(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    body: web::Json<CreateTournamentRequest>,
) -> Result<HttpResponse, TournamentError> {
    let service = TournamentService::new(pool.get_ref().clone());
    let tournament = service.create_tournament(&ctx, &body).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(tournament, "Tournament created")))
}

// GET /tournaments
pub async fn get_tournaments(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    query: web::Query<TournamentQuery>,
) -> Result<HttpResponse, TournamentError> {
    let service = TournamentService::new(pool.get_ref().clone());
    let tournaments = service.list_tournaments(&ctx, &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(tournaments)))
}

// GET /tournaments/{id}
pub async fn get_tournament(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    let service = TournamentService::new(pool.get_ref().clone());
    let details = service.get_tournament(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(details)))
}

// PUT /tournaments/{id}
pub async fn update_tournament(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTournamentRequest>,
) -> Result<HttpResponse, TournamentError> {
    let service = TournamentService::new(pool.get_ref().clone());
    let tournament = service.update_tournament(&ctx, path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(tournament, "Tournament updated")))
}

// DELETE /tournaments/{id}
pub async fn delete_tournament(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    let service = TournamentService::new(pool.get_ref().clone());
    service.delete_tournament(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::with_message((), "Tournament deleted")))
}

// GET /tournaments/{id}/teams
pub async fn get_registered_teams(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    let service = TournamentService::new(pool.get_ref().clone());
    let teams = service.list_registered_teams(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(teams)))
}

// POST /tournaments/{id}/teams
pub async fn register_team(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<RegisterTeamRequest>,
) -> Result<HttpResponse, TournamentError> {
    let service = TournamentService::new(pool.get_ref().clone());
    let team = service.register_team(&ctx, path.into_inner(), body.team_id).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(team, "Team registered")))
}

// DELETE /tournaments/{id}/teams/{team_id}
pub async fn unregister_team(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, TournamentError> {
    let (tournament_id, team_id) = path.into_inner();
    let service = TournamentService::new(pool.get_ref().clone());
    service.unregister_team(&ctx, tournament_id, team_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::with_message((), "Team unregistered")))
}

// POST /tournaments/{id}/draw
pub async fn generate_draw(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: Option<web::Json<DrawRequest>>,
) -> Result<HttpResponse, TournamentError> {
    let request = body.map(web::Json::into_inner).unwrap_or_default();
    let service = TournamentService::new(pool.get_ref().clone());
    let groups = service.generate_draw(&ctx, path.into_inner(), &request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(groups, "Draw completed")))
}

// POST /tournaments/{id}/generate-matches
pub async fn generate_matches(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<GenerateMatchesRequest>,
) -> Result<HttpResponse, TournamentError> {
    let service = TournamentService::new(pool.get_ref().clone());
    let summary = service.generate_group_matches(&ctx, path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(summary, "Matches generated")))
}

// POST /tournaments/{id}/qualified-teams
pub async fn assign_qualified_teams(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    let service = TournamentService::new(pool.get_ref().clone());
    let qualified = service.assign_qualified_teams(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(qualified)))
}

// POST /tournaments/{id}/final-phase
pub async fn generate_final_phase(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<FinalPhaseRequest>,
) -> Result<HttpResponse, TournamentError> {
    let service = TournamentService::new(pool.get_ref().clone());
    let summary = service.generate_final_phase_matches(&ctx, path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(summary, "Final phase generated")))
}
