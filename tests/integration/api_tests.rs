//! API integration tests against a running server
//!
//! Start the server (with its database) and run: cargo test -- --ignored

use chrono::Duration;
use mangateca_server::models::Claims;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Token signed with the same secret as the server
fn auth_token() -> String {
    let secret = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| "change-this-secret-in-production".to_string());
    Claims::new("integration", Duration::hours(1))
        .create_token(&secret)
        .expect("Failed to sign token")
}

async fn create_manga(client: &Client, token: &str, body: Value) -> Value {
    let response = client
        .post(format!("{}/manga", BASE_URL))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_ready_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/manga", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_manga_lifecycle() {
    let client = Client::new();
    let token = auth_token();

    let created = create_manga(
        &client,
        &token,
        json!({"Titulo": "Naruto", "Autor": "Kishimoto", "Capitulos": 700}),
    )
    .await;
    let id = created["data"]["Id"].as_i64().expect("No manga ID");
    assert!(id > 0);
    assert_eq!(created["data"]["Titulo"], "Naruto");

    let response = client
        .get(format!("{}/manga/{}", BASE_URL, id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"], created["data"]);

    let response = client
        .delete(format!("{}/manga/{}", BASE_URL, id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(format!("{}/manga/{}", BASE_URL, id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_search_manga_by_title() {
    let client = Client::new();
    let token = auth_token();

    let created = create_manga(&client, &token, json!({"Titulo": "One Piece"})).await;
    let id = created["data"]["Id"].as_i64().expect("No manga ID");

    let response = client
        .get(format!("{}/manga/search", BASE_URL))
        .query(&[("titulo", "Piece")])
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]
        .as_array()
        .expect("No data")
        .iter()
        .any(|m| m["Id"] == id));

    // Cleanup
    let _ = client
        .delete(format!("{}/manga/{}", BASE_URL, id))
        .bearer_auth(&token)
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_loan_lifecycle() {
    let client = Client::new();
    let token = auth_token();

    let manga = create_manga(&client, &token, json!({"Titulo": "Vagabond"})).await;
    let manga_id = manga["data"]["Id"].as_i64().expect("No manga ID");

    let response = client
        .post(format!("{}/prestamo", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({"NombreCliente": "Integración", "MangaId": manga_id}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    let loan_id = body["data"]["Id"].as_i64().expect("No loan ID");
    assert!(body["data"]["FechaPrestamo"].is_string());

    let response = client
        .get(format!("{}/prestamo/manga/{}", BASE_URL, manga_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().expect("No data").len(), 1);

    // A manga with loans cannot be deleted
    let response = client
        .delete(format!("{}/manga/{}", BASE_URL, manga_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Cleanup
    let _ = client
        .delete(format!("{}/prestamo/{}", BASE_URL, loan_id))
        .bearer_auth(&token)
        .send()
        .await;
    let _ = client
        .delete(format!("{}/manga/{}", BASE_URL, manga_id))
        .bearer_auth(&token)
        .send()
        .await;
}
