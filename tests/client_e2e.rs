//! Client E2E Tests
//!
//! Runs the API server on an ephemeral port and drives it through the
//! terminal client's controller.

#![cfg(feature = "sqlite")]

use code_museum::client::{ApiClient, IdentityStore, MuseumApp, SnippetDraft};
use code_museum::config::{ServerConfig, WebConfig};
use code_museum::snippet::Category;
use code_museum::{Database, MuseumError, WebServer};
use tempfile::TempDir;

/// Start a server and return its base URL.
async fn start_server() -> String {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let server_config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
    };
    let server = WebServer::new(&server_config, &WebConfig::default(), db)
        .expect("Failed to create server");
    let addr = server.run_with_addr().await.expect("Failed to start server");
    format!("http://{addr}")
}

fn new_app(base_url: &str, dir: &TempDir) -> MuseumApp {
    let api = ApiClient::new(base_url).expect("Failed to create client");
    MuseumApp::new(api, IdentityStore::new(dir.path().join("local_storage.json")))
}

fn draft(title: &str) -> SnippetDraft {
    SnippetDraft {
        title: title.to_string(),
        category: Category::Optimization,
        story: "Cut the runtime in half.".to_string(),
        code: "for (const x of xs) { total += x; }".to_string(),
        before: "xs.forEach(x => total += x);".to_string(),
        tags: "perf, loops, ".to_string(),
        ..SnippetDraft::default()
    }
}

#[tokio::test]
async fn test_health() {
    let base_url = start_server().await;
    let api = ApiClient::new(&base_url).unwrap();

    let health = api.health().await.unwrap();

    assert_eq!(health.status, "OK");
}

#[tokio::test]
async fn test_signup_post_like_comment_flow() {
    let base_url = start_server().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = new_app(&base_url, &dir);

    let user = app
        .signup("ada", "ada@example.com", "secret")
        .await
        .unwrap();
    assert_eq!(app.current_user(), Some(&user));

    let snippet = app.create_snippet(&draft("Loop Unrolled")).await.unwrap();
    assert_eq!(snippet.author, "ada");
    assert_eq!(snippet.category, "Optimization");
    assert_eq!(snippet.language, "JavaScript");
    assert_eq!(snippet.tags, vec!["perf", "loops"]);
    assert!(snippet.has_before_code());
    assert_eq!(app.store().snippets()[0].id, snippet.id);

    assert_eq!(app.like(snippet.id).await.unwrap(), 1);
    // Already liked in this run: no second request.
    assert_eq!(app.like(snippet.id).await.unwrap(), 1);

    let comment = app.add_comment(snippet.id, "  Nice one  ").await.unwrap();
    assert_eq!(comment.comment_text, "Nice one");
    assert_eq!(comment.username, "ada");

    let detail = app.open_snippet(snippet.id).await.unwrap();
    assert_eq!(detail.snippet.views, 1);
    assert_eq!(detail.comments.len(), 1);

    assert!(app.refresh().await);
    let stored = app.store().snippet(snippet.id).unwrap();
    assert_eq!((stored.likes, stored.comments, stored.views), (1, 1, 1));

    let summary = app.account_summary().unwrap();
    assert_eq!(summary.snippets.len(), 1);
    assert_eq!(summary.total_likes, 1);
}

#[tokio::test]
async fn test_identity_survives_restart() {
    let base_url = start_server().await;
    let dir = tempfile::tempdir().unwrap();

    let mut app = new_app(&base_url, &dir);
    app.signup("ada", "ada@example.com", "secret")
        .await
        .unwrap();

    let mut restarted = new_app(&base_url, &dir);
    assert_eq!(restarted.current_user().unwrap().username, "ada");

    restarted.logout().unwrap();
    assert!(new_app(&base_url, &dir).current_user().is_none());
}

#[tokio::test]
async fn test_server_errors_reach_the_client() {
    let base_url = start_server().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = new_app(&base_url, &dir);

    app.signup("ada", "ada@example.com", "secret")
        .await
        .unwrap();

    let other_dir = tempfile::tempdir().unwrap();
    let mut other = new_app(&base_url, &other_dir);
    let err = other
        .signup("ada", "other@example.com", "secret")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MuseumError::Api { status: 400, ref message } if message == "User already exists"
    ));

    let err = other.login("ada@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(other.current_user().is_none());

    let err = app.like(999).await.unwrap_err();
    assert!(matches!(
        err,
        MuseumError::Api { status: 500, ref message } if message == "Server error"
    ));
}

#[tokio::test]
async fn test_local_filtering_after_refresh() {
    let base_url = start_server().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = new_app(&base_url, &dir);
    app.signup("ada", "ada@example.com", "secret")
        .await
        .unwrap();

    app.create_snippet(&draft("Loop Unrolled")).await.unwrap();
    let mut hack = draft("Bit Trick");
    hack.category = Category::Hack;
    hack.tags = "bits".to_string();
    app.create_snippet(&hack).await.unwrap();

    assert!(app.refresh().await);
    let store = app.store_mut();
    store.set_category("Hack");
    assert_eq!(store.filtered_snippets().len(), 1);
    store.set_category("All");
    store.set_search("BITS");
    assert_eq!(store.filtered_snippets()[0].title, "Bit Trick");
}

#[tokio::test]
async fn test_unreachable_server_uses_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = new_app("http://127.0.0.1:1", &dir);

    assert!(!app.refresh().await);

    assert!(app.store().is_fallback());
    assert_eq!(
        app.store().snippets()[0].title,
        "The Null Pointer That Cost 3 Days"
    );
}
