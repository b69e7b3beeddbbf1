use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::TournamentError;
use crate::models::common::ApiResponse;
use crate::models::context::RequestContext;
use crate::models::team::{CreateTeamRequest, TeamQuery, UpdateTeamRequest};
use crate::tournament::catalogue::TeamService;

// POST /teams
pub async fn create_team(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    body: web::Json<CreateTeamRequest>,
) -> Result<HttpResponse, TournamentError> {
    let team = TeamService::new(pool.get_ref().clone()).create_team(&ctx, &body).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(team, "Team created")))
}

// GET /teams
pub async fn get_teams(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    query: web::Query<TeamQuery>,
) -> Result<HttpResponse, TournamentError> {
    let teams = TeamService::new(pool.get_ref().clone()).list_teams(&ctx, &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(teams)))
}

// GET /teams/{id}
pub async fn get_team(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    let team = TeamService::new(pool.get_ref().clone()).get_team(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(team)))
}

// PUT /teams/{id}
pub async fn update_team(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTeamRequest>,
) -> Result<HttpResponse, TournamentError> {
    let team = TeamService::new(pool.get_ref().clone())
        .update_team(&ctx, path.into_inner(), &body)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(team, "Team updated")))
}

// DELETE /teams/{id}
pub async fn delete_team(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    TeamService::new(pool.get_ref().clone()).delete_team(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::with_message((), "Team deleted")))
}
