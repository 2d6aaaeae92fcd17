//! Integration tests for the `/api/v1/widgets` management API.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{admin_get, body_json, create_widget, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn requests_without_key_are_rejected(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/api/v1/widgets").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/api/v1/widgets")
        .header("Authorization", "Bearer wrong-key")
        .body(Body::empty())
        .unwrap();
    let response = common::send(common::build_test_app(pool), request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unset_key_disables_management_api(pool: PgPool) {
    let config = floatqr_api::config::ServerConfig {
        admin_api_key: None,
        ..common::test_config()
    };
    let app = common::build_app_with_config(pool, config);

    let response = admin_get(app, "/api/v1/widgets").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_201_with_envelope(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/widgets",
        json!({ "name": "Lobby", "button_shape": "circle", "margin_x": 40 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Lobby");
    assert_eq!(json["data"]["button_shape"], "circle");
    assert_eq!(json["data"]["margin_x"], 40);
    assert_eq!(json["data"]["is_active"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_invalid_input(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/widgets",
        json!({ "name": "Bad", "url_type": "custom" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/widgets",
        json!({ "name": "Bad", "size": 5000, "button_color": "not a color!" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_list_update_delete_flow(pool: PgPool) {
    let id = create_widget(&pool, json!({ "name": "Flow" })).await;
    create_widget(&pool, json!({ "name": "Other" })).await;

    let response = admin_get(common::build_test_app(pool.clone()), &format!("/api/v1/widgets/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Flow");

    let response = admin_get(common::build_test_app(pool.clone()), "/api/v1/widgets?limit=1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/widgets/{id}"),
        json!({ "display_text": "Order here", "show_on_mobile": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["display_text"], "Order here");
    assert_eq!(json["data"]["show_on_mobile"], false);
    assert_eq!(json["data"]["name"], "Flow");

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/v1/widgets/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = admin_get(common::build_test_app(pool.clone()), &format!("/api/v1/widgets/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(common::build_test_app(pool), &format!("/api/v1/widgets/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_checks_merged_url_rule(pool: PgPool) {
    let id = create_widget(&pool, json!({ "name": "Switch" })).await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/widgets/{id}"),
        json!({ "url_type": "custom" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/widgets/{id}"),
        json!({ "url_type": "custom", "custom_url": "https://example.com/x" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
