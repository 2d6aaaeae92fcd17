//! Integration tests for the public `/api/widget` routes read by embeds.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, body_text, create_widget, get, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Configuration document
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn config_document_has_wire_shape(pool: PgPool) {
    let id = create_widget(
        &pool,
        json!({
            "name": "Storefront",
            "url_type": "custom",
            "custom_url": "https://example.com/menu",
            "position": "top-left",
            "button_icon": "phone",
        }),
    )
    .await;

    let response = get(common::build_test_app(pool), &format!("/api/widget/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "public, max-age=60"
    );

    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["url_type"], "custom");
    assert_eq!(json["custom_url"], "https://example.com/menu");
    assert_eq!(json["position"], "top-left");
    assert_eq!(json["size"], 150);
    assert_eq!(json["button_shape"], "rounded");
    assert_eq!(json["button_icon"], "phone");
    assert_eq!(json["display_text"], "Scan me");
    assert_eq!(json["show_on_desktop"], true);
    assert_eq!(json["auto_show_on_scroll"], false);
    // Store-only fields stay private.
    assert!(json.get("name").is_none());
    assert!(json.get("is_active").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn config_is_readable_from_any_origin(pool: PgPool) {
    let id = create_widget(&pool, json!({ "name": "Cors" })).await;

    let request = Request::builder()
        .uri(format!("/api/widget/{id}"))
        .header("Origin", "https://some-shop.example")
        .body(Body::empty())
        .unwrap();
    let response = common::send(common::build_test_app(pool), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_and_malformed_ids_are_404(pool: PgPool) {
    let response = get(
        common::build_test_app(pool.clone()),
        "/api/widget/00000000-0000-0000-0000-000000000000",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(common::build_test_app(pool), "/api/widget/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inactive_and_deleted_widgets_are_404(pool: PgPool) {
    let inactive = create_widget(&pool, json!({ "name": "Paused" })).await;
    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/widgets/{inactive}"),
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let deleted = create_widget(&pool, json!({ "name": "Gone" })).await;
    let response = common::delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/widgets/{deleted}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for id in [inactive, deleted] {
        let response = get(common::build_test_app(pool.clone()), &format!("/api/widget/{id}")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

// ---------------------------------------------------------------------------
// QR SVG
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn qr_svg_for_custom_widget(pool: PgPool) {
    let id = create_widget(
        &pool,
        json!({
            "name": "Menu",
            "url_type": "custom",
            "custom_url": "https://example.com/menu",
            "qr_code_color": "#112233",
            "size": 240,
        }),
    )
    .await;

    let response = get(common::build_test_app(pool), &format!("/api/widget/{id}/qr.svg")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/svg+xml"
    );

    let svg = body_text(response).await;
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="240" height="240""#));
    assert!(svg.contains(r##"<g fill="#112233">"##));
    assert!(svg.contains(r#"href="/logo.png""#));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn qr_svg_for_current_widget_needs_data(pool: PgPool) {
    let id = create_widget(&pool, json!({ "name": "Current" })).await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/widget/{id}/qr.svg"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/widget/{id}/qr.svg?data=https%3A%2F%2Fshop.test%2Fp%2F1"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
