mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{FILES_BASE_URL, multipart_request, offline_app, send};
use http_body_util::BodyExt;
use onlearn_auth::StaticIdentityProvider;
use tower::ServiceExt;

fn files_in(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| {
                    let path = e.path();
                    if path.is_dir() { files_in(&path) } else { 1 }
                })
                .sum()
        })
        .unwrap_or(0)
}

#[tokio::test]
async fn test_upload_without_file_writes_nothing() {
    let app = offline_app(StaticIdentityProvider::new());

    let (status, body) = send(&app.router, multipart_request(None, Some("avatars"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(files_in(app.upload_dir.path()), 0);
}

#[tokio::test]
async fn test_upload_with_empty_file_writes_nothing() {
    let app = offline_app(StaticIdentityProvider::new());

    let (status, _) = send(
        &app.router,
        multipart_request(Some(("empty.txt", "text/plain", b"")), None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(files_in(app.upload_dir.path()), 0);
}

#[tokio::test]
async fn test_upload_builds_key_and_url() {
    let app = offline_app(StaticIdentityProvider::new());

    let (status, body) = send(
        &app.router,
        multipart_request(Some(("my file.png", "image/png", b"\x89PNG")), Some("avatars")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["type"], "image/png");

    let path = body["path"].as_str().unwrap();
    assert!(path.starts_with("avatars/"), "{path}");
    assert!(path.ends_with("-my_file.png"), "{path}");

    let millis = path
        .trim_start_matches("avatars/")
        .trim_end_matches("-my_file.png");
    assert!(millis.parse::<i64>().is_ok(), "{path}");

    assert_eq!(body["url"], format!("{}/{}", FILES_BASE_URL, path));
    assert_eq!(
        std::fs::read(app.upload_dir.path().join(path)).unwrap(),
        b"\x89PNG"
    );
}

#[tokio::test]
async fn test_uploaded_file_is_served_from_its_url() {
    let app = offline_app(StaticIdentityProvider::new());

    let (_, body) = send(
        &app.router,
        multipart_request(Some(("notes.txt", "text/plain", b"hello")), None),
    )
    .await;

    let path = body["path"].as_str().unwrap();
    assert!(path.starts_with("uploads/"));

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/files/{}", path))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"hello");
}

#[tokio::test]
async fn test_upload_rejects_path_traversal() {
    let app = offline_app(StaticIdentityProvider::new());

    let (status, _) = send(
        &app.router,
        multipart_request(Some(("a.txt", "text/plain", b"x")), Some("../escape")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(files_in(app.upload_dir.path()), 0);
}

#[tokio::test]
async fn test_upload_needs_no_token() {
    let app = offline_app(StaticIdentityProvider::new());

    let (status, _) = send(
        &app.router,
        multipart_request(Some(("a.txt", "text/plain", b"x")), Some("docs")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_upload_accepts_everyday_file_names() {
    let app = offline_app(StaticIdentityProvider::new());

    for (name, suffix) in [
        ("photo (1).png", "-photo__1_.png"),
        ("Résumé, final.pdf", "-R_sum___final.pdf"),
        ("O'Brien.jpg", "-O_Brien.jpg"),
        ("a+b.png", "-a_b.png"),
        ("v1..2.png", "-v1_2.png"),
    ] {
        let (status, body) = send(
            &app.router,
            multipart_request(Some((name, "application/octet-stream", b"data")), Some("avatars")),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{name}: {body}");
        let path = body["path"].as_str().unwrap();
        assert!(path.starts_with("avatars/"), "{path}");
        assert!(path.ends_with(suffix), "{path}");
        assert!(app.upload_dir.path().join(path).is_file(), "{path}");
    }
}
