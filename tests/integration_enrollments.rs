mod common;

use axum::http::StatusCode;
use common::{
    count, create_category, create_course, create_profile, json_request, request, send,
    setup_test_app,
};
use onlearn_auth::StaticIdentityProvider;
use onlearn_models::Role;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const ENROLLMENT_COUNT: &str = "SELECT COUNT(*) FROM enrollments WHERE course_id = $1";

async fn course_fixture(pool: &PgPool) -> Uuid {
    let instructor = create_profile(pool, Some(Role::Instructor)).await;
    let category = create_category(pool, "Programming").await;
    create_course(pool, instructor, category).await
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_twice_is_idempotent(pool: PgPool) {
    let student = create_profile(&pool, Some(Role::Client)).await;
    let course = course_fixture(&pool).await;
    let app = setup_test_app(
        pool.clone(),
        StaticIdentityProvider::new().with_token("student", student),
    );
    let body = json!({ "course_id": course });

    let (status, first) = send(
        &app.router,
        json_request("POST", "/api/enrollments", Some("student"), body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["data"]["progress"], 0.0);
    assert_eq!(first["data"]["user_id"], student.to_string());

    let (status, second) = send(
        &app.router,
        json_request("POST", "/api/enrollments", Some("student"), body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["message"], "Already enrolled in this course");
    assert_eq!(count(&pool, ENROLLMENT_COUNT, course).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_unknown_course(pool: PgPool) {
    let student = create_profile(&pool, Some(Role::Client)).await;
    let app = setup_test_app(
        pool.clone(),
        StaticIdentityProvider::new().with_token("student", student),
    );

    let (status, body) = send(
        &app.router,
        json_request(
            "POST",
            "/api/enrollments",
            Some("student"),
            json!({ "course_id": Uuid::new_v4() }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Course not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_progress_out_of_range(pool: PgPool) {
    let student = create_profile(&pool, Some(Role::Client)).await;
    let course = course_fixture(&pool).await;
    let app = setup_test_app(
        pool.clone(),
        StaticIdentityProvider::new().with_token("student", student),
    );

    let (status, body) = send(
        &app.router,
        json_request(
            "PATCH",
            &format!("/api/enrollments/{}/progress", course),
            Some("student"),
            json!({ "progress": 150 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "progress must be between 0 and 100");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_progress_requires_enrollment(pool: PgPool) {
    let student = create_profile(&pool, Some(Role::Client)).await;
    let course = course_fixture(&pool).await;
    let app = setup_test_app(
        pool.clone(),
        StaticIdentityProvider::new().with_token("student", student),
    );

    let (status, body) = send(
        &app.router,
        json_request(
            "PATCH",
            &format!("/api/enrollments/{}/progress", course),
            Some("student"),
            json!({ "progress": 40 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Enrollment not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_progress_update_and_listing(pool: PgPool) {
    let student = create_profile(&pool, Some(Role::Client)).await;
    let course = course_fixture(&pool).await;
    let app = setup_test_app(
        pool.clone(),
        StaticIdentityProvider::new().with_token("student", student),
    );

    let (status, _) = send(
        &app.router,
        json_request(
            "POST",
            "/api/enrollments",
            Some("student"),
            json!({ "course_id": course }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app.router,
        json_request(
            "PATCH",
            &format!("/api/enrollments/{}/progress", course),
            Some("student"),
            json!({ "progress": 40 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"], 40.0);

    let (status, body) = send(&app.router, request("GET", "/api/enrollments/me", Some("student"))).await;
    assert_eq!(status, StatusCode::OK);

    let enrollments = body.as_array().unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0]["progress"], 40.0);
    assert_eq!(enrollments[0]["course"]["id"], course.to_string());
    assert_eq!(enrollments[0]["course"]["title"], "Intro to Rust");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_listing_only_shows_own_enrollments(pool: PgPool) {
    let student = create_profile(&pool, Some(Role::Client)).await;
    let other = create_profile(&pool, Some(Role::Client)).await;
    let course = course_fixture(&pool).await;
    let app = setup_test_app(
        pool.clone(),
        StaticIdentityProvider::new()
            .with_token("student", student)
            .with_token("other", other),
    );

    send(
        &app.router,
        json_request(
            "POST",
            "/api/enrollments",
            Some("other"),
            json!({ "course_id": course }),
        ),
    )
    .await;

    let (status, body) = send(&app.router, request("GET", "/api/enrollments/me", Some("student"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}
