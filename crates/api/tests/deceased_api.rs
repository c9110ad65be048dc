//! HTTP-level integration tests for memorial records.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_memorial, delete_auth, get_auth, list_graveyards, post_json_auth,
    put_json_auth, signup, TestUser,
};
use serde_json::json;
use sqlx::PgPool;

async fn user_with_graveyard(app: axum::Router, email: &str) -> (TestUser, i64) {
    let user = signup(app.clone(), email).await;
    let graveyard = list_graveyards(app, &user.token).await[0]["id"].as_i64().unwrap();
    (user, graveyard)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_uses_defaults_and_random_position(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user, graveyard) = user_with_graveyard(app.clone(), "d@x.com").await;

    let row = create_memorial(app, &user.token, graveyard, "Jane Doe").await;
    assert_eq!(row["name"], "Jane Doe");
    assert_eq!(row["tombstone_style"], 1);
    assert!(row["birth_date"].is_null());
    assert!(row["notes"].is_null());
    assert_eq!(row["user_id"], user.id);
    for axis in ["position_x", "position_y"] {
        let v = row[axis].as_i64().unwrap();
        assert!((0..100).contains(&v), "{axis} out of range: {v}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_new_memorial_heads_the_list_once(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user, graveyard) = user_with_graveyard(app.clone(), "head@x.com").await;
    create_memorial(app.clone(), &user.token, graveyard, "First").await;
    let newest = create_memorial(app.clone(), &user.token, graveyard, "Second").await;

    let response = get_auth(app, "/api/v1/deceased", &user.token).await;
    let rows = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(rows[0]["id"], newest["id"]);
    assert_eq!(rows.iter().filter(|r| r["id"] == newest["id"]).count(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_filters_by_graveyard(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user, first) = user_with_graveyard(app.clone(), "f@x.com").await;
    let body = json!({ "name": "Second", "theme": "final-meadow" });
    let response = post_json_auth(app.clone(), "/api/v1/graveyards", body, &user.token).await;
    let second = body_json(response).await["data"]["id"].as_i64().unwrap();

    create_memorial(app.clone(), &user.token, first, "In first").await;
    create_memorial(app.clone(), &user.token, second, "In second").await;

    let uri = format!("/api/v1/deceased?graveyard_id={second}");
    let rows = body_json(get_auth(app, &uri, &user.token).await).await["data"].clone();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["name"], "In second");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user, graveyard) = user_with_graveyard(app.clone(), "val@x.com").await;

    for body in [
        json!({ "graveyard_id": graveyard, "name": "", "epitaph": "E" }),
        json!({ "graveyard_id": graveyard, "name": "x".repeat(51), "epitaph": "E" }),
        json!({ "graveyard_id": graveyard, "name": "N", "epitaph": "e".repeat(101) }),
        json!({ "graveyard_id": graveyard, "name": "N", "epitaph": "E", "notes": "n".repeat(1001) }),
        json!({ "graveyard_id": graveyard, "name": "N", "epitaph": "E", "tombstone_style": 9 }),
        json!({ "graveyard_id": graveyard, "name": "N", "epitaph": "E", "position_x": 100 }),
    ] {
        let response = post_json_auth(app.clone(), "/api/v1/deceased", body, &user.token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_cannot_bury_in_someone_elses_graveyard(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_owner, graveyard) = user_with_graveyard(app.clone(), "own@x.com").await;
    let intruder = signup(app.clone(), "in@x.com").await;

    let body = json!({ "graveyard_id": graveyard, "name": "N", "epitaph": "E" });
    let response = post_json_auth(app, "/api/v1/deceased", body, &intruder.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_is_partial_and_clears_with_null(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user, graveyard) = user_with_graveyard(app.clone(), "upd@x.com").await;

    let body = json!({
        "graveyard_id": graveyard,
        "name": "Old Tom",
        "epitaph": "Gone fishing",
        "birth_date": "1931-05-17",
        "death_date": "2004-11-02",
        "notes": "Liked boats",
        "tombstone_style": 3,
    });
    let response = post_json_auth(app.clone(), "/api/v1/deceased", body, &user.token).await;
    let created = body_json(response).await["data"].clone();
    let uri = format!("/api/v1/deceased/{}", created["id"]);

    let patch = json!({ "birth_date": null, "notes": "   ", "epitaph": "Still fishing" });
    let response = put_json_auth(app.clone(), &uri, patch, &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await["data"].clone();
    assert!(updated["birth_date"].is_null());
    assert_eq!(updated["death_date"], "2004-11-02");
    assert!(updated["notes"].is_null());
    assert_eq!(updated["epitaph"], "Still fishing");
    assert_eq!(updated["name"], "Old Tom");
    assert_eq!(updated["tombstone_style"], 3);
    assert_ne!(updated["updated_at"], created["updated_at"]);

    let detail_uri = format!("{uri}/detail");
    let detail = body_json(get_auth(app, &detail_uri, &user.token).await).await["data"].clone();
    assert_eq!(detail["dates"], "? — 2004-11-02");
    assert_eq!(detail["shape"], "rip-stone");
    assert!(detail["notes"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_removes_only_that_memorial(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user, graveyard) = user_with_graveyard(app.clone(), "del@x.com").await;
    let keep = create_memorial(app.clone(), &user.token, graveyard, "Keep").await;
    let gone = create_memorial(app.clone(), &user.token, graveyard, "Gone").await;

    let uri = format!("/api/v1/deceased/{}", gone["id"]);
    let response = delete_auth(app.clone(), &uri, &user.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), &uri, &user.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &uri, &user.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let rows = body_json(get_auth(app, "/api/v1/deceased", &user.token).await).await["data"].clone();
    let ids: Vec<_> = rows.as_array().unwrap().iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![keep["id"].clone()]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deleting_graveyard_cascades_memorials(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user, first) = user_with_graveyard(app.clone(), "casc@x.com").await;
    let body = json!({ "name": "Doomed", "theme": "stillwater" });
    let response = post_json_auth(app.clone(), "/api/v1/graveyards", body, &user.token).await;
    let doomed = body_json(response).await["data"]["id"].as_i64().unwrap();

    create_memorial(app.clone(), &user.token, first, "Safe").await;
    let lost = create_memorial(app.clone(), &user.token, doomed, "Lost").await;

    let uri = format!("/api/v1/graveyards/{doomed}");
    let response = delete_auth(app.clone(), &uri, &user.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let uri = format!("/api/v1/deceased/{}", lost["id"]);
    let response = get_auth(app, &uri, &user.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
