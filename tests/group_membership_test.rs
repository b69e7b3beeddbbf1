use serde_json::json;

mod common;
use common::tournament_helpers::*;
use common::utils::{data_of, spawn_app};

#[tokio::test]
async fn move_team_between_groups() {
    let app = spawn_app().await;
    let token = app.coach_token();
    let tournament_id = create_default_tournament(&app, &token).await;
    let group_a = create_group(&app, &token, tournament_id, "Group A").await;
    let group_b = create_group(&app, &token, tournament_id, "Group B").await;
    let team = create_team(&app, &token, "Wydad").await;
    add_team_to_group(&app, &token, group_a, team).await;

    let response = app
        .post(
            &format!("/groups/{}/teams/{}/move", group_a, team),
            &token,
            &json!({ "toGroupId": group_b }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let groups = data_of(app.get(&format!("/tournaments/{}/groups", tournament_id), &token).await).await;
    let groups = groups.as_array().unwrap();
    let members = |name: &str| {
        groups
            .iter()
            .find(|g| g["name"] == name)
            .map(|g| g["groupTeams"].as_array().unwrap().len())
            .unwrap()
    };
    assert_eq!(members("Group A"), 0);
    assert_eq!(members("Group B"), 1);
}

#[tokio::test]
async fn team_sits_in_one_group_per_tournament() {
    let app = spawn_app().await;
    let token = app.coach_token();
    let tournament_id = create_default_tournament(&app, &token).await;
    let group_a = create_group(&app, &token, tournament_id, "Group A").await;
    let group_b = create_group(&app, &token, tournament_id, "Group B").await;
    let team = create_team(&app, &token, "Wydad").await;
    add_team_to_group(&app, &token, group_a, team).await;

    for group in [group_a, group_b] {
        let response = app
            .post(&format!("/groups/{}/teams", group), &token, &json!({ "teamId": team }))
            .await;
        assert_eq!(response.status().as_u16(), 400);
    }

    // a second tournament is a separate competition
    let other_tournament = create_default_tournament(&app, &token).await;
    let other_group = create_group(&app, &token, other_tournament, "Group A").await;
    add_team_to_group(&app, &token, other_group, team).await;
}

#[tokio::test]
async fn move_rejects_same_group_and_leaves_team_in_place() {
    let app = spawn_app().await;
    let token = app.coach_token();
    let (_, group_id, teams) = group_with_teams(&app, &token, &["Wydad"]).await;
    let other_tournament = create_default_tournament(&app, &token).await;
    let foreign_group = create_group(&app, &token, other_tournament, "Group A").await;

    for target in [group_id, foreign_group] {
        let response = app
            .post(
                &format!("/groups/{}/teams/{}/move", group_id, teams[0]),
                &token,
                &json!({ "toGroupId": target }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 400);
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM group_teams WHERE group_id = $1")
        .bind(group_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn duplicate_group_names_conflict() {
    let app = spawn_app().await;
    let token = app.coach_token();
    let tournament_id = create_default_tournament(&app, &token).await;
    create_group(&app, &token, tournament_id, "Group A").await;

    let response = app
        .post("/groups", &token, &json!({ "name": "group a", "tournamentId": tournament_id }))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app
        .post("/groups", &token, &json!({ "name": "  ", "tournamentId": tournament_id }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn standings_follow_results() {
    let app = spawn_app().await;
    let token = app.coach_token();
    let (tournament_id, group_id, teams) = group_with_teams(&app, &token, &["Alpha", "Beta", "Gamma"]).await;
    let (alpha, beta, gamma) = (teams[0], teams[1], teams[2]);

    let first = create_match(&app, &token, tournament_id, Some(group_id), alpha, beta).await;
    let second = create_match(&app, &token, tournament_id, Some(group_id), beta, gamma).await;
    score(&app, &token, first, 2, 1).await;
    score(&app, &token, second, 0, 0).await;

    let table = data_of(app.get(&format!("/groups/{}/standings", group_id), &token).await).await;
    let rows = table["standings"].as_array().unwrap();
    let summary: Vec<(String, i64, i64)> = rows
        .iter()
        .map(|r| {
            (
                r["teamName"].as_str().unwrap().to_string(),
                r["points"].as_i64().unwrap(),
                r["goalDifference"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Alpha".to_string(), 3, 1),
            ("Gamma".to_string(), 1, 0),
            ("Beta".to_string(), 1, -1),
        ]
    );
    assert_eq!(rows[0]["position"], 1);
}
