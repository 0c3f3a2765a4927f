//! Operator registration and login through the auth service.

#![allow(clippy::unwrap_used)]

use matchbook_admin::db::AdminUserStore;
use matchbook_admin::services::auth::PasswordIssue;
use matchbook_admin::services::{AuthError, AuthService, Registration};
use matchbook_integration_tests::MemoryStore;

const PASSWORD: &str = "Str0ng!Pass";

fn registration(username: &str, email: &str) -> Registration {
    Registration {
        username: username.to_owned(),
        email: email.to_owned(),
        full_name: "Desk Lead".to_owned(),
        password: PASSWORD.to_owned(),
    }
}

async fn service_with_user() -> (AuthService<MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    let auth = AuthService::new(store.clone());
    auth.register(&registration("desk_lead", "lead@example.com"))
        .await
        .unwrap();
    (auth, store)
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_hashes_password() {
    let (auth, store) = service_with_user().await;

    let user = auth.get_user("desk_lead").await.unwrap();
    assert!(user.is_active);
    assert!(user.last_login.is_none());

    let hash = store.password_hash(user.id).unwrap();
    assert!(hash.starts_with("$argon2id$"));
    assert!(!hash.contains(PASSWORD));
}

#[tokio::test]
async fn test_register_rejects_duplicate_username() {
    let (auth, _) = service_with_user().await;

    let err = auth
        .register(&registration("DESK_LEAD", "other@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UsernameTaken));
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let (auth, _) = service_with_user().await;

    let err = auth
        .register(&registration("night_editor", "Lead@Example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));
}

#[tokio::test]
async fn test_register_reports_every_password_rule() {
    let auth = AuthService::new(MemoryStore::new());
    let mut weak = registration("desk_lead", "lead@example.com");
    weak.password = "short".to_owned();

    let err = auth.register(&weak).await.unwrap_err();
    let AuthError::WeakPassword(issues) = err else {
        panic!("expected weak password, got {err}");
    };
    assert_eq!(
        issues,
        vec![
            PasswordIssue::TooShort,
            PasswordIssue::MissingUppercase,
            PasswordIssue::MissingDigit,
            PasswordIssue::MissingSpecial,
        ]
    );
}

#[tokio::test]
async fn test_weak_password_message_lists_every_rule() {
    let auth = AuthService::new(MemoryStore::new());
    let mut weak = registration("desk_lead", "lead@example.com");
    weak.password = "alllowercase".to_owned();

    let message = auth.register(&weak).await.unwrap_err().to_string();
    assert_eq!(
        message,
        "password does not meet requirements: \
         must contain at least one uppercase letter; \
         must contain at least one number; \
         must contain at least one special character"
    );
}

#[tokio::test]
async fn test_register_limits_full_name() {
    let (auth, store) = service_with_user().await;

    let mut long = registration("night_editor", "night@example.com");
    long.full_name = "N".repeat(101);
    let err = auth.register(&long).await.unwrap_err();
    assert!(matches!(err, AuthError::FullNameTooLong));
    assert_eq!(auth.list_users().await.unwrap().len(), 1);

    long.full_name = format!("  {}  ", "N".repeat(100));
    let user = auth.register(&long).await.unwrap();
    assert_eq!(user.full_name.len(), 100);
    assert!(store.password_hash(user.id).is_some());
}

#[tokio::test]
async fn test_register_rejects_malformed_identity() {
    let auth = AuthService::new(MemoryStore::new());

    let err = auth
        .register(&registration("x", "lead@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidUsername(_)));

    let err = auth
        .register(&registration("desk_lead", "not-an-email"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidEmail(_)));
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_correct_then_incorrect_password() {
    let (auth, _) = service_with_user().await;

    assert!(auth.login("desk_lead", PASSWORD).await.is_ok());

    let err = auth.login("desk_lead", "Wr0ng!Pass").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_by_email() {
    let (auth, _) = service_with_user().await;
    let user = auth.login("LEAD@example.com", PASSWORD).await.unwrap();
    assert_eq!(user.username.as_str(), "desk_lead");
}

#[tokio::test]
async fn test_unknown_and_wrong_password_look_the_same() {
    let (auth, _) = service_with_user().await;

    let unknown = auth.login("nobody", PASSWORD).await.unwrap_err();
    let wrong = auth.login("desk_lead", "Wr0ng!Pass").await.unwrap_err();

    assert!(matches!(unknown, AuthError::InvalidCredentials));
    assert!(matches!(wrong, AuthError::InvalidCredentials));
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test]
async fn test_inactive_account_cannot_log_in() {
    let (auth, _) = service_with_user().await;
    auth.set_active("desk_lead", false).await.unwrap();

    let err = auth.login("desk_lead", PASSWORD).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    auth.set_active("desk_lead", true).await.unwrap();
    assert!(auth.login("desk_lead", PASSWORD).await.is_ok());
}

#[tokio::test]
async fn test_last_login_only_moves_on_success() {
    let (auth, store) = service_with_user().await;

    let _ = auth.login("desk_lead", "Wr0ng!Pass").await;
    let user = store
        .get_password_hash("desk_lead")
        .await
        .unwrap()
        .unwrap()
        .0;
    assert!(user.last_login.is_none());

    let logged_in = auth.login("desk_lead", PASSWORD).await.unwrap();
    let first = logged_in.last_login.unwrap();
    assert_eq!(auth.get_user("desk_lead").await.unwrap().last_login, Some(first));

    let _ = auth.login("desk_lead", "Wr0ng!Pass").await;
    assert_eq!(auth.get_user("desk_lead").await.unwrap().last_login, Some(first));
}

// =============================================================================
// Administration
// =============================================================================

#[tokio::test]
async fn test_change_password() {
    let (auth, _) = service_with_user().await;

    let err = auth.change_password("desk_lead", "weak").await.unwrap_err();
    assert!(matches!(err, AuthError::WeakPassword(_)));

    auth.change_password("desk_lead", "N3w!Secret").await.unwrap();
    assert!(auth.login("desk_lead", PASSWORD).await.is_err());
    assert!(auth.login("desk_lead", "N3w!Secret").await.is_ok());
}

#[tokio::test]
async fn test_list_and_delete() {
    let (auth, _) = service_with_user().await;
    auth.register(&registration("night_editor", "night@example.com"))
        .await
        .unwrap();

    assert_eq!(auth.list_users().await.unwrap().len(), 2);

    auth.delete_user("night_editor").await.unwrap();
    assert_eq!(auth.list_users().await.unwrap().len(), 1);

    let err = auth.delete_user("night_editor").await.unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}
