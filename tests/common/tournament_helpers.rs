use serde_json::{json, Value};
use uuid::Uuid;

use super::utils::{data_of, TestApp};

fn id_of(value: &Value) -> Uuid {
    value["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("Response has no id")
}

pub async fn create_team(app: &TestApp, token: &str, name: &str) -> Uuid {
    let response = app.post("/teams", token, &json!({ "name": name })).await;
    assert_eq!(response.status().as_u16(), 201);
    id_of(&data_of(response).await)
}

pub async fn create_tournament(app: &TestApp, token: &str, body: Value) -> Value {
    let response = app.post("/tournaments", token, &body).await;
    assert_eq!(response.status().as_u16(), 201);
    data_of(response).await
}

pub async fn create_default_tournament(app: &TestApp, token: &str) -> Uuid {
    let tournament = create_tournament(
        app,
        token,
        json!({
            "name": format!("Cup {}", Uuid::new_v4()),
            "startDate": "2025-07-01",
            "endDate": "2025-07-31",
            "stadium": "Stade Municipal",
            "numberOfGroups": 2,
            "teamsPerGroup": 4,
            "qualifiersPerGroup": 2
        }),
    )
    .await;
    id_of(&tournament)
}

pub async fn create_group(app: &TestApp, token: &str, tournament_id: Uuid, name: &str) -> Uuid {
    let response = app
        .post("/groups", token, &json!({ "name": name, "tournamentId": tournament_id }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
    id_of(&data_of(response).await)
}

pub async fn add_team_to_group(app: &TestApp, token: &str, group_id: Uuid, team_id: Uuid) {
    let response = app
        .post(&format!("/groups/{}/teams", group_id), token, &json!({ "teamId": team_id }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
}

/// Tournament with one group holding the given teams.
pub async fn group_with_teams(app: &TestApp, token: &str, names: &[&str]) -> (Uuid, Uuid, Vec<Uuid>) {
    let tournament_id = create_default_tournament(app, token).await;
    let group_id = create_group(app, token, tournament_id, "Group A").await;
    let mut team_ids = Vec::with_capacity(names.len());
    for name in names {
        let team_id = create_team(app, token, name).await;
        add_team_to_group(app, token, group_id, team_id).await;
        team_ids.push(team_id);
    }
    (tournament_id, group_id, team_ids)
}

pub async fn create_match(
    app: &TestApp,
    token: &str,
    tournament_id: Uuid,
    group_id: Option<Uuid>,
    home: Uuid,
    away: Uuid,
) -> Uuid {
    let response = app
        .post(
            "/matches",
            token,
            &json!({
                "date": "2025-07-02",
                "time": "15:00",
                "venue": "Stade Municipal",
                "homeTeam": home,
                "awayTeam": away,
                "tournamentId": tournament_id,
                "groupId": group_id
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);
    id_of(&data_of(response).await)
}

pub async fn score(app: &TestApp, token: &str, match_id: Uuid, home: i32, away: i32) -> reqwest::Response {
    app.put(
        &format!("/matches/{}/score", match_id),
        token,
        &json!({ "homeScore": home, "awayScore": away }),
    )
    .await
}
