use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::tournament_helpers::*;
use common::utils::{data_of, spawn_app, TestApp};

async fn registered_tournament(app: &TestApp, token: &str, team_count: usize) -> Uuid {
    let tournament_id = create_default_tournament(app, token).await;
    for i in 0..team_count {
        let team_id = create_team(app, token, &format!("Team {}", i + 1)).await;
        let response = app
            .post(&format!("/tournaments/{}/teams", tournament_id), token, &json!({ "teamId": team_id }))
            .await;
        assert_eq!(response.status().as_u16(), 201);
    }
    tournament_id
}

async fn matches_of(app: &TestApp, token: &str, tournament_id: Uuid) -> Vec<Value> {
    data_of(app.get(&format!("/matches?tournamentId={}", tournament_id), token).await)
        .await
        .as_array()
        .unwrap()
        .clone()
}

async fn finish_open_matches(app: &TestApp, token: &str, tournament_id: Uuid) {
    for game in matches_of(app, token, tournament_id).await {
        if game["status"] != "completed" {
            let id = Uuid::parse_str(game["id"].as_str().unwrap()).unwrap();
            assert_eq!(score(app, token, id, 2, 0).await.status().as_u16(), 200);
        }
    }
}

#[tokio::test]
async fn registering_twice_conflicts() {
    let app = spawn_app().await;
    let token = app.coach_token();
    let tournament_id = create_default_tournament(&app, &token).await;
    let team_id = create_team(&app, &token, "Atlas").await;
    let path = format!("/tournaments/{}/teams", tournament_id);

    assert_eq!(app.post(&path, &token, &json!({ "teamId": team_id })).await.status().as_u16(), 201);
    let response = app.post(&path, &token, &json!({ "teamId": team_id })).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Team already registered in this tournament");
}

#[tokio::test]
async fn draw_then_generate_group_matches() {
    let app = spawn_app().await;
    let token = app.coach_token();
    let tournament_id = registered_tournament(&app, &token, 8).await;

    let drawn = data_of(app.post(&format!("/tournaments/{}/draw", tournament_id), &token, &json!({})).await).await;
    let drawn = drawn.as_array().unwrap();
    assert_eq!(drawn.len(), 2);
    assert!(drawn.iter().all(|g| g["groupTeams"].as_array().unwrap().len() == 4));

    let again = app.post(&format!("/tournaments/{}/draw", tournament_id), &token, &json!({})).await;
    assert_eq!(again.status().as_u16(), 400);

    let path = format!("/tournaments/{}/generate-matches", tournament_id);
    let summary = data_of(app.post(&path, &token, &json!({ "time": "16:00" })).await).await;
    assert_eq!(summary["groupMatches"], 12);
    assert_eq!(summary["finalMatches"], 3);
    assert_eq!(summary["totalMatches"], 15);
    assert_eq!(summary["totalDays"], 14);

    let games = matches_of(&app, &token, tournament_id).await;
    assert_eq!(games.len(), 12);
    let mut dates: Vec<&str> = games.iter().map(|g| g["date"].as_str().unwrap()).collect();
    dates.dedup();
    assert_eq!(dates.len(), 12, "one match per day");
    assert_eq!(games[0]["date"], "2025-07-01");
    assert!(games.iter().all(|g| g["time"] == "16:00" && g["venue"] == "Stade Municipal"));

    // nothing new the second time
    let summary = data_of(app.post(&path, &token, &json!({ "time": "16:00" })).await).await;
    assert_eq!(summary["groupMatches"], 0);
    assert_eq!(matches_of(&app, &token, tournament_id).await.len(), 12);
}

#[tokio::test]
async fn generation_needs_groups_with_two_teams() {
    let app = spawn_app().await;
    let token = app.coach_token();
    let tournament_id = create_default_tournament(&app, &token).await;
    let path = format!("/tournaments/{}/generate-matches", tournament_id);

    assert_eq!(app.post(&path, &token, &json!({ "time": "16:00" })).await.status().as_u16(), 400);

    let group_id = create_group(&app, &token, tournament_id, "Group A").await;
    let team_id = create_team(&app, &token, "Lonely FC").await;
    add_team_to_group(&app, &token, group_id, team_id).await;
    assert_eq!(app.post(&path, &token, &json!({ "time": "16:00" })).await.status().as_u16(), 400);
}

#[tokio::test]
async fn knockout_rounds_follow_the_group_phase() {
    let app = spawn_app().await;
    let token = app.coach_token();
    let tournament_id = registered_tournament(&app, &token, 8).await;
    app.post(&format!("/tournaments/{}/draw", tournament_id), &token, &json!({})).await;
    app.post(
        &format!("/tournaments/{}/generate-matches", tournament_id),
        &token,
        &json!({ "time": "16:00" }),
    )
    .await;

    let qualified_path = format!("/tournaments/{}/qualified-teams", tournament_id);
    let final_phase_path = format!("/tournaments/{}/final-phase", tournament_id);

    // group phase still running
    assert_eq!(app.post(&qualified_path, &token, &json!({})).await.status().as_u16(), 400);
    assert_eq!(app.post(&final_phase_path, &token, &json!({ "time": "20:00" })).await.status().as_u16(), 400);

    finish_open_matches(&app, &token, tournament_id).await;

    let qualified = data_of(app.post(&qualified_path, &token, &json!({})).await).await;
    let qualified = qualified["qualifiedTeams"].as_array().unwrap();
    assert_eq!(qualified.len(), 4);
    assert_eq!(qualified[0]["position"], 1);
    assert_eq!(qualified[1]["position"], 1);
    assert_eq!(qualified[2]["position"], 2);

    let semis = data_of(app.post(&final_phase_path, &token, &json!({ "time": "20:00" })).await).await;
    assert_eq!(semis["semis"], 2);
    assert_eq!(semis["totalMatches"], 2);

    let games = matches_of(&app, &token, tournament_id).await;
    let last_group_day = games
        .iter()
        .filter(|g| g["stage"] == "group")
        .map(|g| g["date"].as_str().unwrap().to_string())
        .max()
        .unwrap();
    let first_semi_day = games
        .iter()
        .filter(|g| g["stage"] == "semi_final")
        .map(|g| g["date"].as_str().unwrap().to_string())
        .min()
        .unwrap();
    assert!(first_semi_day > last_group_day);

    // semis not played yet
    assert_eq!(app.post(&final_phase_path, &token, &json!({ "time": "20:00" })).await.status().as_u16(), 400);

    finish_open_matches(&app, &token, tournament_id).await;
    let final_round = data_of(app.post(&final_phase_path, &token, &json!({ "time": "20:00" })).await).await;
    assert_eq!(final_round["final"], 1);

    assert_eq!(app.post(&final_phase_path, &token, &json!({ "time": "20:00" })).await.status().as_u16(), 400);
}

#[tokio::test]
async fn regenerating_after_a_new_team_joins_keeps_one_match_per_day() {
    let app = spawn_app().await;
    let token = app.coach_token();
    let (tournament_id, group_id, _) = group_with_teams(&app, &token, &["Alpha", "Beta", "Gamma"]).await;
    let path = format!("/tournaments/{}/generate-matches", tournament_id);

    let summary = data_of(app.post(&path, &token, &json!({ "time": "16:00" })).await).await;
    assert_eq!(summary["groupMatches"], 3);

    let delta = create_team(&app, &token, "Delta").await;
    add_team_to_group(&app, &token, group_id, delta).await;
    let summary = data_of(app.post(&path, &token, &json!({ "time": "16:00" })).await).await;
    assert_eq!(summary["groupMatches"], 3);

    let games = matches_of(&app, &token, tournament_id).await;
    assert_eq!(games.len(), 6);

    let mut team_days = std::collections::HashSet::new();
    for game in &games {
        let date = game["date"].as_str().unwrap().to_string();
        for side in ["homeTeam", "awayTeam"] {
            let team = game[side].as_str().unwrap().to_string();
            assert!(team_days.insert((date.clone(), team)), "double booking on {}", date);
        }
    }

    let mut dates: Vec<&str> = games.iter().map(|g| g["date"].as_str().unwrap()).collect();
    dates.dedup();
    assert_eq!(dates.len(), 6, "one match per day");
    assert!(games.iter().filter(|g| g["homeTeam"] == delta.to_string() || g["awayTeam"] == delta.to_string())
        .all(|g| g["date"].as_str().unwrap() > "2025-07-03"));
}
