//! Integration tests for the server-side widget preview, which runs the embed
//! runtime against the store and the static directory.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_text, create_widget, get};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn preview_renders_container_markup(pool: PgPool) {
    let id = create_widget(
        &pool,
        json!({ "name": "Preview", "button_icon": "phone", "start_collapsed": true }),
    )
    .await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/widget/{id}/preview?url=https%3A%2F%2Fshop.test%2Fitem"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.starts_with(r#"<div data-position="bottom-right" id="qr-widget-container""#));
    assert!(html.contains(r#"data-qr-payload="https://shop.test/item""#));
    assert!(html.contains("display: none;"));
    // Icon inlined from static/icons and recolored.
    assert!(html.contains(r#"stroke="currentColor""#));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn preview_applies_query_overrides(pool: PgPool) {
    let id = create_widget(&pool, json!({ "name": "Overrides" })).await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/widget/{id}/preview?position=left&show_button=false&display_text=Hi"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(r#"data-position="left""#));
    assert!(html.contains("translateY(-50%)"));
    assert!(!html.contains("qr-widget-toggle"));
    assert!(html.contains(">Hi</div>"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn preview_respects_device_gate(pool: PgPool) {
    let id = create_widget(&pool, json!({ "name": "Mobile only", "show_on_desktop": false })).await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/widget/{id}/preview?width=1280"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/widget/{id}/preview?width=390"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn preview_of_unknown_widget_is_404(pool: PgPool) {
    let response = get(
        common::build_test_app(pool),
        "/api/widget/00000000-0000-0000-0000-000000000000/preview",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn preview_behind_tls_proxy_uses_https_origin(pool: PgPool) {
    let id = create_widget(&pool, json!({ "name": "Proxied" })).await;

    let request = Request::builder()
        .uri(format!("/api/widget/{id}/preview"))
        .header("Host", "qr.test")
        .header("X-Forwarded-Proto", "https")
        .body(Body::empty())
        .unwrap();
    let response = common::send(common::build_test_app(pool), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(r#"data-qr-payload="https://qr.test/""#), "{html}");
    assert!(html.contains(r#"href="https://qr.test/logo.png""#));
}
