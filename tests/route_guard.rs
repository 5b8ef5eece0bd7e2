#![allow(clippy::unwrap_used)]

use secrecy::ExposeSecret;
use serde_json::json;
use std::{net::TcpListener, sync::Arc};
use waypoint::{
    api::{ApiClient, ApiConfig},
    auth::{MemoryStorage, SessionStore, TokenStorage, TOKEN_KEY},
    router::{Navigation, RouteGuard, RouteName, Router},
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn session_for(server: &MockServer, storage: Arc<MemoryStorage>) -> SessionStore {
    let api = ApiClient::new(&ApiConfig::default().with_base_url(server.uri())).unwrap();
    SessionStore::new(api, storage)
}

async fn mount_logout(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn landing_without_token_redirects_to_login() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    let session = session_for(&server, Arc::new(MemoryStorage::new()));

    let guard = RouteGuard::new(&session);
    assert_eq!(
        guard.before_each(RouteName::Landing).await,
        Navigation::Redirect(RouteName::Login)
    );

    let mut router = Router::new(&session);
    let route = router.push(RouteName::Landing).await.unwrap();
    assert_eq!(route.name, RouteName::Login);
    assert_eq!(route.path, "/");

    // No token means no round trip.
    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn landing_with_valid_token_is_allowed() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "phone": "555" } })))
        .expect(2)
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, "T1").unwrap();
    let session = session_for(&server, storage.clone());

    let mut router = Router::new(&session);
    let route = router.push(RouteName::Landing).await.unwrap();

    assert_eq!(route.name, RouteName::Landing);
    assert_eq!(session.user().unwrap().phone, "555");
    assert!(session.is_logged_in());

    // Every protected navigation re-validates.
    let route = router.push_str("/landing").await.unwrap();
    assert_eq!(route.name, RouteName::Landing);
    assert_eq!(storage.get(TOKEN_KEY), Some("T1".to_string()));
}

#[tokio::test]
async fn landing_with_rejected_token_redirects_and_clears() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_logout(&server).await;

    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, "stale").unwrap();
    let session = session_for(&server, storage.clone());

    let mut router = Router::new(&session);
    let route = router.push(RouteName::Landing).await.unwrap();

    assert_eq!(route.name, RouteName::Login);
    assert_eq!(router.current().unwrap().name, RouteName::Login);
    assert_eq!(storage.get(TOKEN_KEY), None);

    let snapshot = session.snapshot();
    assert!(snapshot.user.is_none());
    assert!(snapshot.token.is_none());
    assert!(!snapshot.is_authenticated);
}

#[tokio::test]
async fn login_route_never_redirects() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;

    let storage = Arc::new(MemoryStorage::new());
    let anonymous = session_for(&server, storage.clone());
    assert_eq!(
        RouteGuard::new(&anonymous).before_each(RouteName::Login).await,
        Navigation::Allow
    );

    storage.set(TOKEN_KEY, "T1").unwrap();
    let hydrated = session_for(&server, storage);
    assert_eq!(
        RouteGuard::new(&hydrated).before_each(RouteName::Login).await,
        Navigation::Allow
    );
    assert!(hydrated.is_logged_in());

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn full_session_lifecycle() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "code sent" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "T1" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "phone": "555", "name": "Ada" } })),
        )
        .mount(&server)
        .await;
    mount_logout(&server).await;

    let storage = Arc::new(MemoryStorage::new());
    let session = session_for(&server, storage.clone());
    let mut router = Router::new(&session);

    assert_eq!(session.login("555").await.unwrap(), "code sent");
    assert!(!session.is_logged_in());
    assert_eq!(
        router.push(RouteName::Landing).await.unwrap().name,
        RouteName::Login
    );

    session.verify_code("555", "1234").await.unwrap();
    assert_eq!(storage.get(TOKEN_KEY), Some("T1".to_string()));
    assert_eq!(session.token().unwrap().expose_secret(), "T1");

    assert_eq!(
        router.push(RouteName::Landing).await.unwrap().name,
        RouteName::Landing
    );
    assert_eq!(session.user().unwrap().name.as_deref(), Some("Ada"));

    session.logout().await;
    assert!(!session.is_logged_in());
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(
        router.push(RouteName::Landing).await.unwrap().name,
        RouteName::Login
    );
}
