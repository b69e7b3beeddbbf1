use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::utils::spawn_app_without_db;

async fn failure_message(response: reqwest::Response) -> String {
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.expect("Response was not JSON");
    assert_eq!(body["success"], Value::Bool(false));
    assert!(body["data"].is_null());
    body["message"].as_str().expect("Missing message").to_string()
}

#[tokio::test]
async fn missing_body_field_is_reported_in_the_envelope() {
    let test_app = spawn_app_without_db();
    let token = test_app.coach_token();

    let response = test_app
        .post(
            "/matches",
            &token,
            &json!({
                "date": "2025-07-02",
                "time": "15:00",
                "venue": "Stade Municipal",
                "awayTeam": Uuid::new_v4(),
                "tournamentId": Uuid::new_v4()
            }),
        )
        .await;

    let message = failure_message(response).await;
    assert!(message.starts_with("Invalid request body"), "{}", message);
    assert!(message.contains("homeTeam"), "{}", message);
}

#[tokio::test]
async fn mistyped_body_field_is_reported_in_the_envelope() {
    let test_app = spawn_app_without_db();
    let token = test_app.coach_token();

    let response = test_app
        .put(
            &format!("/matches/{}/score", Uuid::new_v4()),
            &token,
            &json!({ "homeScore": "two", "awayScore": 1 }),
        )
        .await;

    let message = failure_message(response).await;
    assert!(message.starts_with("Invalid request body"), "{}", message);
}

#[tokio::test]
async fn bad_query_and_path_values_are_reported_in_the_envelope() {
    let test_app = spawn_app_without_db();
    let token = test_app.coach_token();

    let message = failure_message(test_app.get("/matches?status=postponed", &token).await).await;
    assert!(message.starts_with("Invalid query string"), "{}", message);

    let message = failure_message(test_app.get("/matches/not-a-uuid", &token).await).await;
    assert!(message.starts_with("Invalid path parameter"), "{}", message);
}
