use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post},
    Json, Router,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use wander::cli::Command;
use wander::settings::{Settings, StorageSettings};
use wander::App;
use wander_api::ClientSettings;
use wander_auth::{AuthError, AuthSettings, CredentialKey, CredentialStore, MemoryCredentialStore};

fn access_token() -> String {
    token_expiring_in(3600)
}

fn token_expiring_in(secs: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#);
    let exp = chrono::Utc::now().timestamp() + secs;
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
    format!("{}.{}.sig", header, payload)
}

async fn login(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if params.get("code").map(String::as_str) != Some("good-code") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "invalid code" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "status": 200,
            "data": {
                "accessToken": access_token(),
                "refreshToken": "refresh",
                "user": { "id": 1, "nickname": "haneul" }
            }
        })),
    )
}

async fn refresh() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "status": 401, "message": "refresh token expired" })),
    )
}

async fn trips(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if headers.get(AUTHORIZATION).is_none() {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "status": 401 })));
    }
    (
        StatusCode::OK,
        Json(json!({
            "status": 200,
            "data": [{ "id": 5, "title": "Gangneung coffee street" }]
        })),
    )
}

async fn spawn_service() -> String {
    let app = Router::new()
        .route("/auth/login/kakao", get(login))
        .route("/auth/refresh", post(refresh))
        .route("/trips", get(trips));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn test_app() -> (App, Arc<MemoryCredentialStore>) {
    let base_url = spawn_service().await;
    let settings = Settings {
        api: ClientSettings {
            base_url: base_url.clone(),
            timeout_secs: 5,
        },
        auth: AuthSettings::with_base_url(base_url),
        storage: StorageSettings::default(),
    };
    let store = Arc::new(MemoryCredentialStore::new());
    let app = App::with_store(&settings, store.clone()).unwrap();
    (app, store)
}

#[tokio::test]
async fn login_then_browse_then_logout() {
    let (app, store) = test_app().await;

    assert_eq!(app.run(Command::Status).await.unwrap(), "Not signed in.");

    let out = app
        .run(Command::Login {
            code: Some("good-code".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(out, "Signed in as haneul.");
    assert!(app.run(Command::Status).await.unwrap().starts_with("Signed in as haneul"));

    let out = app
        .run(Command::Trips {
            keyword: None,
            page: None,
        })
        .await
        .unwrap();
    let trips: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(trips[0]["title"], "Gangneung coffee street");

    app.run(Command::Logout).await.unwrap();
    assert!(store.get(CredentialKey::AccessToken).unwrap().is_none());
    assert!(store.get(CredentialKey::User).unwrap().is_none());
}

#[tokio::test]
async fn rejected_code_leaves_store_empty() {
    let (app, store) = test_app().await;

    let err = app
        .run(Command::Login {
            code: Some("bad-code".to_string()),
        })
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Could not sign in"));
    assert!(store.get(CredentialKey::AccessToken).unwrap().is_none());
}

#[tokio::test]
async fn unauthorized_without_session_fails_refresh() {
    let (app, _store) = test_app().await;

    let err = app
        .run(Command::Trips {
            keyword: Some("sea".to_string()),
            page: None,
        })
        .await
        .unwrap_err();

    // The 401 triggers a refresh, which cannot succeed without a refresh token
    let api_err = err.downcast_ref::<wander_api::ApiError>().unwrap();
    assert!(matches!(
        api_err,
        wander_api::ApiError::Auth(AuthError::MissingRefreshToken)
    ));
}

#[tokio::test]
async fn login_over_expiring_session_keeps_new_session() {
    let (app, store) = test_app().await;
    let stale = token_expiring_in(30);
    store.set(CredentialKey::AccessToken, &stale).unwrap();
    store.set(CredentialKey::RefreshToken, "stale-refresh").unwrap();

    let out = app
        .run(Command::Login {
            code: Some("good-code".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(out, "Signed in as haneul.");

    // Give a stray refresh of the stale session time to land
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let access = store.get(CredentialKey::AccessToken).unwrap();
    assert!(access.is_some_and(|token| token != stale));
    assert_eq!(
        store.get(CredentialKey::RefreshToken).unwrap().as_deref(),
        Some("refresh")
    );
}

#[tokio::test]
async fn logout_over_expiring_session_stays_signed_out() {
    let (app, store) = test_app().await;
    store
        .set(CredentialKey::AccessToken, &token_expiring_in(30))
        .unwrap();
    store.set(CredentialKey::RefreshToken, "stale-refresh").unwrap();

    assert_eq!(app.run(Command::Logout).await.unwrap(), "Signed out.");
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    for key in CredentialKey::ALL {
        assert!(store.get(key).unwrap().is_none());
    }
    assert_eq!(app.run(Command::Status).await.unwrap(), "Not signed in.");
}
