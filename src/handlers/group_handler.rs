use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::TournamentError;
use crate::models::common::ApiResponse;
use crate::models::context::RequestContext;
use crate::models::group::{AddTeamToGroupRequest, CreateGroupRequest, MoveTeamRequest, UpdateGroupRequest};
use crate::tournament::groups::GroupService;
use crate::tournament::standings::StandingsService;

// GET /tournaments/{id}/groups
pub async fn get_tournament_groups(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    let service = GroupService::new(pool.get_ref().clone());
    let groups = service.list_groups(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(groups)))
}

// POST /groups
pub async fn create_group(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    body: web::Json<CreateGroupRequest>,
) -> Result<HttpResponse, TournamentError> {
    let service = GroupService::new(pool.get_ref().clone());
    let group = service.create_group(&ctx, &body).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(group, "Group created")))
}

// PUT /groups/{id}
pub async fn update_group(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateGroupRequest>,
) -> Result<HttpResponse, TournamentError> {
    let service = GroupService::new(pool.get_ref().clone());
    let group = service.update_group(&ctx, path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(group, "Group updated")))
}

// DELETE /groups/{id}
pub async fn delete_group(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    let service = GroupService::new(pool.get_ref().clone());
    service.delete_group(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::with_message((), "Group deleted")))
}

// POST /groups/{id}/teams
pub async fn add_team_to_group(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<AddTeamToGroupRequest>,
) -> Result<HttpResponse, TournamentError> {
    let service = GroupService::new(pool.get_ref().clone());
    let membership = service.add_team_to_group(&ctx, path.into_inner(), body.team_id).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(membership, "Team added to group")))
}

// DELETE /groups/{id}/teams/{team_id}
pub async fn remove_team_from_group(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, TournamentError> {
    let (group_id, team_id) = path.into_inner();
    let service = GroupService::new(pool.get_ref().clone());
    service.remove_team_from_group(&ctx, group_id, team_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::with_message((), "Team removed from group")))
}

// POST /groups/{id}/teams/{team_id}/move
pub async fn move_team_to_group(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<MoveTeamRequest>,
) -> Result<HttpResponse, TournamentError> {
    let (from_group_id, team_id) = path.into_inner();
    let service = GroupService::new(pool.get_ref().clone());
    let membership = service
        .move_team_to_group(&ctx, team_id, from_group_id, body.to_group_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(membership, "Team moved")))
}

// GET /groups/{id}/standings
pub async fn get_group_standings(
    ctx: RequestContext,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, TournamentError> {
    let service = StandingsService::new(pool.get_ref().clone());
    let standings = service.get_group_standings(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(standings)))
}
