use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use wander_auth::{
    AuthClient, AuthClientError, AuthError, AuthProvider, AuthSettings, CredentialKey,
    CredentialStore, MemoryCredentialStore, Navigator, TokenManager,
};

fn token_expiring_in(secs: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#);
    let exp = chrono::Utc::now().timestamp() + secs;
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
    format!("{}.{}.sig", header, payload)
}

#[derive(Default)]
struct MockAuthServer {
    refresh_calls: AtomicUsize,
    refresh_headers: Mutex<Vec<String>>,
    fail_refresh: bool,
}

async fn refresh_handler(
    State(server): State<Arc<MockAuthServer>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    server.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(value) = headers.get("authorization-refresh") {
        server
            .refresh_headers
            .lock()
            .unwrap()
            .push(value.to_str().unwrap().to_string());
    }

    if server.fail_refresh {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "status": 401, "message": "refresh token expired" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "status": 200,
            "message": "ok",
            "data": { "accessToken": "fresh-access" }
        })),
    )
}

async fn login_handler(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let code = params.get("code").cloned().unwrap_or_default();
    Json(json!({
        "accessToken": format!("access-for-{}", code),
        "refreshToken": "refresh-for-login",
        "user": { "id": 7, "nickname": "wanderer", "profileImage": "https://img" }
    }))
}

async fn spawn_auth_server(server: Arc<MockAuthServer>) -> String {
    let app = Router::new()
        .route("/auth/refresh", post(refresh_handler))
        .route("/auth/login/kakao", get(login_handler))
        .with_state(server);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[derive(Default)]
struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

#[tokio::test]
async fn refresh_presents_refresh_token_in_header() {
    let server = Arc::new(MockAuthServer::default());
    let base_url = spawn_auth_server(server.clone()).await;
    let client = AuthClient::new(&AuthSettings::with_base_url(base_url)).unwrap();

    let token = client.refresh("my-refresh").await.unwrap();

    assert_eq!(token, "fresh-access");
    assert_eq!(
        *server.refresh_headers.lock().unwrap(),
        vec!["Bearer my-refresh".to_string()]
    );
}

#[tokio::test]
async fn refresh_rejection_is_a_status_error() {
    let server = Arc::new(MockAuthServer {
        fail_refresh: true,
        ..Default::default()
    });
    let base_url = spawn_auth_server(server).await;
    let client = AuthClient::new(&AuthSettings::with_base_url(base_url)).unwrap();

    let err = client.refresh("expired").await.unwrap_err();

    match err {
        AuthClientError::Status(status, body) => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("refresh token expired"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn exchange_code_returns_pair_and_profile() {
    let server = Arc::new(MockAuthServer::default());
    let base_url = spawn_auth_server(server).await;
    let client = AuthClient::new(&AuthSettings::with_base_url(base_url)).unwrap();

    let login = client.exchange_code("xyz").await.unwrap();

    assert_eq!(login.credentials.access_token(), "access-for-xyz");
    assert_eq!(login.credentials.refresh_token(), "refresh-for-login");
    let user = login.user.unwrap();
    assert_eq!(user.nickname.as_deref(), Some("wanderer"));
    assert_eq!(user.extra.get("profileImage"), Some(&json!("https://img")));
}

#[tokio::test]
async fn expiring_token_refreshed_through_auth_server() {
    let server = Arc::new(MockAuthServer::default());
    let base_url = spawn_auth_server(server.clone()).await;

    let store = Arc::new(MemoryCredentialStore::new());
    store
        .set(CredentialKey::AccessToken, &token_expiring_in(120))
        .unwrap();
    store.set(CredentialKey::RefreshToken, "stored-refresh").unwrap();

    let manager = TokenManager::new(
        store.clone(),
        Arc::new(AuthClient::new(&AuthSettings::with_base_url(base_url)).unwrap()),
        Arc::new(RecordingNavigator::default()),
    );

    manager.check_and_refresh().await.unwrap();

    assert_eq!(server.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        store.get(CredentialKey::AccessToken).unwrap().as_deref(),
        Some("fresh-access")
    );
    assert_eq!(
        *server.refresh_headers.lock().unwrap(),
        vec!["Bearer stored-refresh".to_string()]
    );
}

#[tokio::test]
async fn rejected_refresh_signs_user_out() {
    let server = Arc::new(MockAuthServer {
        fail_refresh: true,
        ..Default::default()
    });
    let base_url = spawn_auth_server(server).await;

    let store = Arc::new(MemoryCredentialStore::new());
    store
        .set(CredentialKey::AccessToken, &token_expiring_in(30))
        .unwrap();
    store.set(CredentialKey::RefreshToken, "stale").unwrap();
    store.set(CredentialKey::User, r#"{"nickname":"kim"}"#).unwrap();
    let navigator = Arc::new(RecordingNavigator::default());

    let manager = TokenManager::new(
        store.clone(),
        Arc::new(AuthClient::new(&AuthSettings::with_base_url(base_url)).unwrap()),
        navigator.clone(),
    );

    let result = manager.check_and_refresh().await;

    assert!(matches!(result, Err(AuthError::AuthClient(_))));
    for key in [
        CredentialKey::AccessToken,
        CredentialKey::RefreshToken,
        CredentialKey::User,
    ] {
        assert!(store.get(key).unwrap().is_none());
    }
    assert_eq!(*navigator.routes.lock().unwrap(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn login_persists_session() {
    let server = Arc::new(MockAuthServer::default());
    let base_url = spawn_auth_server(server).await;
    let store = Arc::new(MemoryCredentialStore::new());

    let manager = TokenManager::new(
        store.clone(),
        Arc::new(AuthClient::new(&AuthSettings::with_base_url(base_url)).unwrap()),
        Arc::new(RecordingNavigator::default()),
    );

    manager.login("code-1").await.unwrap();

    assert_eq!(
        manager.access_token().unwrap().as_deref(),
        Some("access-for-code-1")
    );
    let cached: Value =
        serde_json::from_str(&store.get(CredentialKey::User).unwrap().unwrap()).unwrap();
    assert_eq!(cached["nickname"], "wanderer");
    assert_eq!(cached["profileImage"], "https://img");
}
