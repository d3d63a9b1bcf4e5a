//! HTTP-level integration tests for the cat endpoints.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router
//! without an actual TCP listener. The in-memory store backs every test so
//! no database is required.

mod common;

use axum::http::{Method, StatusCode};
use catdb_db::CatStore;
use common::{delete, expect_json, get, post_json, put_json, send_raw, test_app};
use serde_json::{json, Value};

fn mittens() -> Value {
    json!({"name": "Mittens", "age": 2, "gender": "Female", "breed": "Tabby"})
}

// ---------------------------------------------------------------------------
// GET /cats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_starts_empty() {
    let (_store, app) = test_app();
    let json = expect_json(get(app, "/cats").await, StatusCode::OK).await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn create_then_list_contains_exactly_that_cat() {
    let (_store, app) = test_app();
    let created = expect_json(
        post_json(app.clone(), "/add-cat", mittens()).await,
        StatusCode::CREATED,
    )
    .await;

    let list = expect_json(get(app, "/cats").await, StatusCode::OK).await;
    let cats = list.as_array().expect("list should be an array");
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0], created["cat"]);
    assert_eq!(cats[0]["name"], "Mittens");
    assert_eq!(cats[0]["breed"], "Tabby");
}

// ---------------------------------------------------------------------------
// POST /add-cat
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_with_message_and_cat() {
    let (_store, app) = test_app();
    let json = expect_json(
        post_json(app, "/add-cat", mittens()).await,
        StatusCode::CREATED,
    )
    .await;

    assert_eq!(json["message"], "Successfully added cat to the database");
    let cat = &json["cat"];
    assert!(cat["id"].is_string());
    assert_eq!(cat["revision"], 0);
    assert_eq!(cat["age"], 2);
    assert_eq!(cat["gender"], "Female");
    assert!(cat["createdAt"].is_string());
    assert!(cat.get("imageUrl").is_none());
}

#[tokio::test]
async fn create_issues_distinct_ids() {
    let (_store, app) = test_app();
    let a = expect_json(
        post_json(app.clone(), "/add-cat", mittens()).await,
        StatusCode::CREATED,
    )
    .await;
    let b = expect_json(
        post_json(app, "/add-cat", mittens()).await,
        StatusCode::CREATED,
    )
    .await;
    assert_ne!(a["cat"]["id"], b["cat"]["id"]);
}

#[tokio::test]
async fn create_keeps_image_url() {
    let (_store, app) = test_app();
    let mut body = mittens();
    body["imageUrl"] = json!("https://cats.example/mittens.png");

    let json = expect_json(post_json(app, "/add-cat", body).await, StatusCode::CREATED).await;
    assert_eq!(json["cat"]["imageUrl"], "https://cats.example/mittens.png");
}

#[tokio::test]
async fn create_missing_breed_returns_400_and_does_not_store() {
    let (store, app) = test_app();
    let json = expect_json(
        post_json(
            app,
            "/add-cat",
            json!({"name": "Mittens", "age": 2, "gender": "Female"}),
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;

    assert_eq!(json["error"], "Validation failed");
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let details = json["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["field"], "breed");
    assert_eq!(details[0]["message"], "breed is required");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_with_empty_name_returns_400() {
    let (store, app) = test_app();
    let mut body = mittens();
    body["name"] = json!("");

    let json = expect_json(post_json(app, "/add-cat", body).await, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["details"][0]["field"], "name");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_with_gender_other_returns_400() {
    let (_store, app) = test_app();
    let mut body = mittens();
    body["gender"] = json!("Other");

    let json = expect_json(post_json(app, "/add-cat", body).await, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["details"][0]["field"], "gender");
    assert_eq!(
        json["details"][0]["message"],
        "gender must be one of: Male, Female"
    );
}

#[tokio::test]
async fn create_with_empty_body_lists_every_required_field() {
    let (_store, app) = test_app();
    let json = expect_json(
        send_raw(app, Method::POST, "/add-cat", "").await,
        StatusCode::BAD_REQUEST,
    )
    .await;

    let fields: Vec<_> = json["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["name", "age", "gender", "breed"]);
}

#[tokio::test]
async fn create_with_malformed_json_returns_400() {
    let (_store, app) = test_app();
    let json = expect_json(
        send_raw(app, Method::POST, "/add-cat", "{\"name\": ").await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// PUT /update-cat/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_bumps_revision_and_returns_updated_cat() {
    let (_store, app) = test_app();
    let created = expect_json(
        post_json(app.clone(), "/add-cat", mittens()).await,
        StatusCode::CREATED,
    )
    .await;
    let id = created["cat"]["id"].as_str().unwrap().to_string();

    let mut body = mittens();
    body["age"] = json!(3);
    let json = expect_json(
        put_json(app, &format!("/update-cat/{id}"), body).await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(json["message"], "Successfully updated cat information");
    let updated = &json["updatedCat"];
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["age"], 3);
    assert_eq!(updated["revision"], 1);
}

#[tokio::test]
async fn update_with_empty_object_returns_400() {
    let (store, app) = test_app();
    let created = store
        .create(&catdb_core::cat::NewCat::from_json(mittens().as_object().unwrap()).unwrap())
        .await
        .unwrap();

    let json = expect_json(
        put_json(app, &format!("/update-cat/{}", created.id), json!({})).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["error"], "Request body cannot be empty");
}

#[tokio::test]
async fn update_with_no_body_returns_400_even_for_unknown_id() {
    let (_store, app) = test_app();
    let json = expect_json(
        send_raw(app, Method::PUT, "/update-cat/not-an-id", "").await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["error"], "Request body cannot be empty");
}

#[tokio::test]
async fn update_nonexistent_returns_404_and_store_unchanged() {
    let (store, app) = test_app();
    post_json(app.clone(), "/add-cat", mittens()).await;
    let before = store.list().await.unwrap();

    let json = expect_json(
        put_json(
            app,
            "/update-cat/0190a1b2-0000-7000-8000-000000000000",
            mittens(),
        )
        .await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(store.list().await.unwrap(), before);
}

#[tokio::test]
async fn update_unknown_id_with_partial_body_returns_404() {
    let (store, app) = test_app();
    let json = expect_json(
        put_json(
            app,
            "/update-cat/0190a1b2-0000-7000-8000-000000000000",
            json!({"age": 5}),
        )
        .await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn update_with_malformed_id_returns_404() {
    let (_store, app) = test_app();
    let response = put_json(app, "/update-cat/12345", mittens()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_invalid_fields_returns_400_and_keeps_record() {
    let (store, app) = test_app();
    let created = expect_json(
        post_json(app.clone(), "/add-cat", mittens()).await,
        StatusCode::CREATED,
    )
    .await;
    let id = created["cat"]["id"].as_str().unwrap().to_string();

    // Full replacement: omitting required fields is a validation failure,
    // not a partial merge.
    let json = expect_json(
        put_json(app, &format!("/update-cat/{id}"), json!({"age": 5})).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let cats = store.list().await.unwrap();
    assert_eq!(cats[0].age, 2);
    assert_eq!(cats[0].revision, 0);
}

// ---------------------------------------------------------------------------
// DELETE /delete-cat/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_cat_from_list() {
    let (_store, app) = test_app();
    let created = expect_json(
        post_json(app.clone(), "/add-cat", mittens()).await,
        StatusCode::CREATED,
    )
    .await;
    let id = created["cat"]["id"].as_str().unwrap().to_string();

    let json = expect_json(
        delete(app.clone(), &format!("/delete-cat/{id}")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["message"], "Successfully removed cat from database");

    let list = expect_json(get(app, "/cats").await, StatusCode::OK).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn delete_absent_id_still_returns_200() {
    let (_store, app) = test_app();
    let response = delete(
        app.clone(),
        "/delete-cat/0190a1b2-0000-7000-8000-000000000000",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete(app, "/delete-cat/garbage").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Worked example
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mittens_lifecycle() {
    let (_store, app) = test_app();

    let created = expect_json(
        post_json(app.clone(), "/add-cat", mittens()).await,
        StatusCode::CREATED,
    )
    .await;
    assert!(!created["cat"]["id"].is_null());
    assert_eq!(created["cat"]["revision"], 0);
    let id = created["cat"]["id"].as_str().unwrap().to_string();

    let updated = expect_json(
        put_json(
            app.clone(),
            &format!("/update-cat/{id}"),
            json!({"name": "Mittens", "age": 3, "gender": "Female", "breed": "Tabby"}),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(updated["updatedCat"]["revision"], 1);

    expect_json(
        delete(app.clone(), &format!("/delete-cat/{id}")).await,
        StatusCode::OK,
    )
    .await;
    let response = put_json(app, &format!("/update-cat/{id}"), mittens()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
