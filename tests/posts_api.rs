use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use time::macros::datetime;
use tower::ServiceExt;

use quire::application::admin::posts::{AdminPostEditService, PostEditOptions};
use quire::domain::entities::{CategoryRecord, PostRecord};
use quire::domain::types::PostStatus;
use quire::infra::http::{ApiState, build_api_router};
use quire::infra::memory::InMemoryRepositories;
use quire_api_types::{DataResponse, Post};

fn repositories() -> Arc<InMemoryRepositories> {
    let categories = ["Tech", "Life", "Travel"]
        .into_iter()
        .zip(1..)
        .map(|(title, id)| CategoryRecord {
            id,
            title: title.to_string(),
        })
        .collect();
    let posts = vec![PostRecord {
        id: 3,
        title: "Packing list".into(),
        content: "- socks".into(),
        status: PostStatus::Draft,
        category_id: 3,
        created_at: datetime!(2024-02-10 12:00 UTC),
        updated_at: datetime!(2024-02-10 12:00 UTC),
    }];
    Arc::new(InMemoryRepositories::with_records(posts, categories))
}

fn api(repos: Arc<InMemoryRepositories>) -> Router {
    let posts = Arc::new(AdminPostEditService::new(
        repos.clone(),
        repos.clone(),
        repos,
        PostEditOptions::default(),
    ));
    build_api_router(ApiState { posts })
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn patch(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

#[tokio::test]
async fn fetch_one_returns_the_post_with_nested_category() {
    let (status, body) = call(api(repositories()), get("/api/posts/3")).await;

    assert_eq!(status, StatusCode::OK);
    let response: DataResponse<Post> = serde_json::from_value(body).expect("post payload");
    insta::assert_json_snapshot!(response.data, @r#"
    {
      "id": 3,
      "title": "Packing list",
      "content": "- socks",
      "status": "draft",
      "category": {
        "id": 3
      },
      "created_at": "2024-02-10T12:00:00Z",
      "updated_at": "2024-02-10T12:00:00Z"
    }
    "#);
}

#[tokio::test]
async fn fetch_one_reports_missing_posts() {
    let (status, body) = call(api(repositories()), get("/api/posts/404")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn fetch_list_pages_categories() {
    let (status, body) = call(
        api(repositories()),
        get("/api/categories?current=2&page_size=2"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["data"], json!([{ "id": 3, "title": "Travel" }]));
}

#[tokio::test]
async fn fetch_list_rejects_zero_page_size() {
    let (status, body) = call(api(repositories()), get("/api/categories?page_size=0")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_page");
}

#[tokio::test]
async fn update_dispatches_validated_payload() {
    let repos = repositories();
    let payload = json!({
        "title": "  Packing list, revised  ",
        "content": "- socks\n- charger",
        "status": "published",
        "category": { "id": 1 }
    });

    let (status, body) = call(api(repos.clone()), patch("/api/posts/3", &payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Packing list, revised");
    assert_eq!(body["data"]["status"], "published");

    let stored = repos.post(3).expect("post");
    assert_eq!(stored.category_id, 1);
    assert_eq!(stored.content, "- socks\n- charger");
}

#[tokio::test]
async fn update_reports_every_missing_field() {
    let repos = repositories();
    let payload = json!({
        "title": "",
        "content": " ",
        "status": "draft",
        "category": { "id": 3 }
    });

    let (status, body) = call(api(repos.clone()), patch("/api/posts/3", &payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_failed");
    assert_eq!(
        body["error"]["fields"],
        json!([
            { "field": "title", "message": "Title is required" },
            { "field": "content", "message": "Content is required" }
        ])
    );
    assert_eq!(repos.post(3).expect("post").title, "Packing list");
}

#[tokio::test]
async fn update_rejects_unknown_categories() {
    let payload = json!({
        "title": "Packing list",
        "content": "- socks",
        "status": "draft",
        "category": { "id": 99 }
    });

    let (status, body) = call(api(repositories()), patch("/api/posts/3", &payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["fields"][0]["field"], "category.id");
    assert_eq!(
        body["error"]["fields"][0]["message"],
        "Category does not exist"
    );
}

#[tokio::test]
async fn update_of_missing_post_is_not_found() {
    let payload = json!({
        "title": "Ghost",
        "content": "boo",
        "status": "draft",
        "category": { "id": 1 }
    });

    let (status, _) = call(api(repositories()), patch("/api/posts/77", &payload)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_without_category_reports_it_as_required() {
    let repos = repositories();
    let payload = json!({
        "title": "Packing list",
        "content": "- socks",
        "status": "draft"
    });

    let (status, body) = call(api(repos.clone()), patch("/api/posts/3", &payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_failed");
    assert_eq!(
        body["error"]["fields"],
        json!([{ "field": "category.id", "message": "Category is required" }])
    );
    assert_eq!(repos.post(3).expect("post").category_id, 3);
}

#[tokio::test]
async fn update_with_unknown_status_reports_it_as_invalid() {
    let repos = repositories();
    let payload = json!({
        "title": "Packing list",
        "content": "- socks",
        "status": "archived",
        "category": { "id": 3 }
    });

    let (status, body) = call(api(repos.clone()), patch("/api/posts/3", &payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"]["fields"],
        json!([{ "field": "status", "message": "Status is invalid" }])
    );
    assert_eq!(repos.post(3).expect("post").status, PostStatus::Draft);
}
