use reqwest::StatusCode;
use signature_recipients::{domain::AppData, routes::ErrorBody};

use crate::helpers::{seed_data, spawn_app};

#[tokio::test]
async fn get_data_returns_the_stored_document() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get_data().await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let data: AppData = response.json().await.expect("Failed to parse body.");
    assert_eq!(data, seed_data());
}

#[tokio::test]
async fn get_data_uses_camel_case_keys() {
    let app = spawn_app().await;

    let body: serde_json::Value = app.get_data().await.json().await.unwrap();

    assert!(body.get("signatureReasons").is_some());
    assert!(body.get("otherReasons").is_some());
    assert_eq!(body["users"][0]["name"], "John Doe");
}

#[tokio::test]
async fn get_data_returns_500_with_an_error_body_for_a_corrupt_file() {
    // Arrange
    let app = spawn_app().await;
    app.overwrite_data_file(b"{ definitely not json");

    // Act
    let response = app.get_data().await;

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = response.json().await.expect("Failed to parse body.");
    assert_eq!(body.error, "Failed to load data");
}

#[tokio::test]
async fn get_data_serves_an_empty_document_when_the_file_is_missing() {
    let app = spawn_app().await;
    std::fs::remove_file(&app.data_path).unwrap();

    let response = app.get_data().await;

    assert_eq!(response.status(), StatusCode::OK);
    let data: AppData = response.json().await.unwrap();
    assert_eq!(data, AppData::default());
}
