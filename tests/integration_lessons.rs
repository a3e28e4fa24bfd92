mod common;

use axum::http::StatusCode;
use common::{
    count, create_category, create_course, create_lesson, create_profile, json_request, request,
    send, setup_test_app,
};
use onlearn_auth::StaticIdentityProvider;
use onlearn_models::Role;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_owner_creates_lesson(pool: PgPool) {
    let owner = create_profile(&pool, Some(Role::Instructor)).await;
    let category = create_category(&pool, "Programming").await;
    let course = create_course(&pool, owner, category).await;
    let app = setup_test_app(
        pool.clone(),
        StaticIdentityProvider::new().with_token("owner", owner),
    );

    let (status, body) = send(
        &app.router,
        json_request(
            "POST",
            &format!("/api/courses/{}/lessons", course),
            Some("owner"),
            json!({ "title": "Borrowing", "video_url": "https://cdn.test/v.mp4" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["title"], "Borrowing");
    assert_eq!(body["data"]["order_index"], 0);
    assert_eq!(body["data"]["course_id"], course.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_lessons_listed_in_order_without_token(pool: PgPool) {
    let owner = create_profile(&pool, Some(Role::Instructor)).await;
    let category = create_category(&pool, "Programming").await;
    let course = create_course(&pool, owner, category).await;
    create_lesson(&pool, course, "Third", 2).await;
    create_lesson(&pool, course, "First", 0).await;
    create_lesson(&pool, course, "Second", 1).await;

    let app = setup_test_app(pool.clone(), StaticIdentityProvider::new());

    let (status, body) = send(
        &app.router,
        request("GET", &format!("/api/courses/{}/lessons", course), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|lesson| lesson["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_update_keeps_other_fields(pool: PgPool) {
    let owner = create_profile(&pool, Some(Role::Instructor)).await;
    let category = create_category(&pool, "Programming").await;
    let course = create_course(&pool, owner, category).await;
    let lesson = create_lesson(&pool, course, "Original", 3).await;
    let app = setup_test_app(
        pool.clone(),
        StaticIdentityProvider::new().with_token("owner", owner),
    );

    let (status, body) = send(
        &app.router,
        json_request(
            "PATCH",
            &format!("/api/courses/{}/lessons/{}", course, lesson),
            Some("owner"),
            json!({ "description": "Now with notes" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Original");
    assert_eq!(body["data"]["order_index"], 3);
    assert_eq!(body["data"]["description"], "Now with notes");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_lesson(pool: PgPool) {
    let owner = create_profile(&pool, Some(Role::Instructor)).await;
    let category = create_category(&pool, "Programming").await;
    let course = create_course(&pool, owner, category).await;
    let app = setup_test_app(
        pool.clone(),
        StaticIdentityProvider::new().with_token("owner", owner),
    );

    let (status, body) = send(
        &app.router,
        json_request(
            "PATCH",
            &format!("/api/courses/{}/lessons/{}", course, Uuid::new_v4()),
            Some("owner"),
            json!({ "title": "Ghost" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Lesson not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_is_idempotent(pool: PgPool) {
    let owner = create_profile(&pool, Some(Role::Instructor)).await;
    let category = create_category(&pool, "Programming").await;
    let course = create_course(&pool, owner, category).await;
    let lesson = create_lesson(&pool, course, "Doomed", 0).await;
    let app = setup_test_app(
        pool.clone(),
        StaticIdentityProvider::new().with_token("owner", owner),
    );
    let uri = format!("/api/courses/{}/lessons/{}", course, lesson);

    let (status, _) = send(&app.router, request("DELETE", &uri, Some("owner"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM course_lessons WHERE id = $1", lesson).await,
        0
    );

    let (status, _) = send(&app.router, request("DELETE", &uri, Some("owner"))).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_other_instructor_cannot_add_lessons(pool: PgPool) {
    let owner = create_profile(&pool, Some(Role::Instructor)).await;
    let other = create_profile(&pool, Some(Role::Instructor)).await;
    let category = create_category(&pool, "Programming").await;
    let course = create_course(&pool, owner, category).await;
    let app = setup_test_app(
        pool.clone(),
        StaticIdentityProvider::new().with_token("other", other),
    );

    let (status, _) = send(
        &app.router,
        json_request(
            "POST",
            &format!("/api/courses/{}/lessons", course),
            Some("other"),
            json!({ "title": "Intrusion" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM course_lessons WHERE course_id = $1", course).await,
        0
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_lesson_on_missing_course(pool: PgPool) {
    let instructor = create_profile(&pool, Some(Role::Instructor)).await;
    let app = setup_test_app(
        pool.clone(),
        StaticIdentityProvider::new().with_token("instructor", instructor),
    );

    let (status, body) = send(
        &app.router,
        json_request(
            "POST",
            &format!("/api/courses/{}/lessons", Uuid::new_v4()),
            Some("instructor"),
            json!({ "title": "Orphan" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Course not found");
}
