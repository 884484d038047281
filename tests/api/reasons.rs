use reqwest::StatusCode;
use serde_json::json;
use signature_recipients::routes::{ErrorBody, Success};

use crate::helpers::spawn_app;

#[tokio::test]
async fn post_reasons_returns_success_and_persists_to_other_reasons() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.post_reasons(&json!({ "reason": "Board Resolution" })).await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body: Success = response.json().await.unwrap();
    assert!(body.success);
    let saved = app.saved_data();
    assert_eq!(saved.other_reasons, vec!["Audit", "Board Resolution"]);
    assert_eq!(saved.signature_reasons, vec!["Approval", "Review"]);
}

#[tokio::test]
async fn post_reasons_honours_the_signature_catalog_flag() {
    let app = spawn_app().await;

    let response = app
        .post_reasons(&json!({ "reason": "Witness", "addToSignatureReasons": true }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let saved = app.saved_data();
    assert_eq!(saved.signature_reasons, vec!["Approval", "Review", "Witness"]);
    assert_eq!(saved.other_reasons, vec!["Audit"]);
}

#[tokio::test]
async fn posting_the_same_reason_twice_keeps_one_entry() {
    // Arrange
    let app = spawn_app().await;
    let body = json!({ "reason": "Board Resolution" });

    // Act
    let first = app.post_reasons(&body).await;
    let second = app.post_reasons(&body).await;

    // Assert
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    let saved = app.saved_data();
    let occurrences = saved
        .other_reasons
        .iter()
        .chain(&saved.signature_reasons)
        .filter(|r| *r == "Board Resolution")
        .count();
    assert_eq!(occurrences, 1);
}

#[tokio::test]
async fn post_reasons_returns_a_400_when_the_reason_is_invalid() {
    // Arrange
    let app = spawn_app().await;
    let test_cases = vec![
        (json!({ "reason": "" }), "empty reason"),
        (json!({ "reason": "   " }), "whitespace only"),
        (json!({ "reason": "a".repeat(300) }), "too long"),
    ];

    for (body, description) in test_cases {
        // Act
        let response = app.post_reasons(&body).await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload was {}.",
            description
        );
        let error: ErrorBody = response.json().await.unwrap();
        assert!(!error.error.is_empty());
    }
    assert_eq!(app.saved_data().other_reasons, vec!["Audit"]);
}

#[tokio::test]
async fn post_reasons_returns_a_422_when_the_reason_is_missing() {
    let app = spawn_app().await;

    let response = app.post_reasons(&json!({ "addToSignatureReasons": true })).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_reason_removes_an_other_reason() {
    // Arrange
    let app = spawn_app().await;
    app.post_reasons(&json!({ "reason": "Board Resolution" })).await;

    // Act
    let response = app.delete_reason("Board%20Resolution").await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body: Success = response.json().await.unwrap();
    assert!(body.success);
    assert_eq!(app.saved_data().other_reasons, vec!["Audit"]);
}

#[tokio::test]
async fn deleting_an_absent_reason_still_succeeds() {
    let app = spawn_app().await;

    let response = app.delete_reason("Never%20Added").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.saved_data().other_reasons, vec!["Audit"]);
}

#[tokio::test]
async fn delete_reason_leaves_canonical_reasons_alone() {
    let app = spawn_app().await;

    let response = app.delete_reason("Approval").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.saved_data().signature_reasons, vec!["Approval", "Review"]);
}
