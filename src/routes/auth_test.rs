use super::*;
use crate::config::ChatUpstreamConfig;
use crate::services::chat_proxy::ChatProxy;
use crate::services::directory::UserDirectory;

fn test_state() -> AppState {
    let chat = ChatProxy::new(&ChatUpstreamConfig {
        url: "http://127.0.0.1:9/api/chat".to_owned(),
        connect_timeout_secs: 1,
        request_timeout_secs: 1,
    })
    .unwrap();
    AppState::new(UserDirectory::seeded(), chat)
}

fn request(username: &str, password: &str) -> Json<LoginRequest> {
    Json(LoginRequest { username: username.to_owned(), password: password.to_owned() })
}

#[tokio::test]
async fn login_admin_succeeds() {
    let (status, Json(body)) = login(State(test_state()), request("cqk", "123456")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.success);
    let user = body.user.unwrap();
    assert_eq!(user.id, 1);
    assert!(user.is_admin());
    assert!(user.created_time.is_none());
}

#[tokio::test]
async fn login_trims_username() {
    let (status, Json(body)) = login(State(test_state()), request("  lyy ", "123456")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.user.unwrap().username, "lyy");
}

#[tokio::test]
async fn login_wrong_password_is_unauthorized() {
    let (status, Json(body)) = login(State(test_state()), request("cqk", "nope")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(!body.success);
    assert!(body.user.is_none());
    assert_eq!(body.error.as_deref(), Some("invalid username or password"));
}

#[tokio::test]
async fn login_unknown_user_is_unauthorized() {
    let (status, _) = login(State(test_state()), request("x", "y")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
