//! Auth store integration tests.

use pretty_assertions::assert_eq;
use snapscribe_core::{AuthStore, KeyValueStore, Latency, MemoryStore, StoreError};
use std::sync::Arc;

fn auth_store() -> (Arc<MemoryStore>, AuthStore) {
    let store = Arc::new(MemoryStore::new());
    let auth = AuthStore::with_latency(store.clone(), Latency::none());
    (store, auth)
}

#[tokio::test]
async fn signup_sets_current_user() {
    let (_store, auth) = auth_store();
    let user = auth.signup("Ann", "ann@x.com", "pw").await.expect("signup");

    let current = auth.current_user().expect("current").expect("some user");
    assert_eq!(current, user);
    assert_eq!(current.email, "ann@x.com");
    assert_eq!(current.name, "Ann");
}

#[tokio::test]
async fn duplicate_signup_conflicts_and_leaves_collection_unchanged() {
    let (store, auth) = auth_store();
    let first = auth.signup("Ann", "ann@x.com", "pw").await.expect("signup");

    let err = auth
        .signup("Other Ann", "ann@x.com", "pw2")
        .await
        .expect_err("duplicate");
    match err {
        StoreError::UserExists(email) => assert_eq!(email, "ann@x.com"),
        other => panic!("unexpected error: {other:?}"),
    }

    // The users collection still holds exactly the first record.
    let users = store
        .get("auth_users")
        .expect("get")
        .expect("users collection");
    assert_eq!(users.as_array().expect("array").len(), 1);
    assert_eq!(users[0]["name"], "Ann");

    // The current-user pointer still references the first signup.
    let current = auth.current_user().expect("current").expect("some user");
    assert_eq!(current, first);
}

#[tokio::test]
async fn login_requires_known_email_but_ignores_password() {
    let (_store, auth) = auth_store();
    let user = auth.signup("Ann", "ann@x.com", "pw").await.expect("signup");
    auth.logout().await.expect("logout");

    let err = auth
        .login("nobody@x.com", "pw")
        .await
        .expect_err("unknown email");
    match err {
        StoreError::UserNotFound(email) => assert_eq!(email, "nobody@x.com"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(auth.current_user().expect("current"), None);

    // Any password succeeds for a known email.
    let logged_in = auth
        .login("ann@x.com", "completely-wrong")
        .await
        .expect("login");
    assert_eq!(logged_in, user);
    assert_eq!(auth.current_user().expect("current"), Some(user));
}

#[tokio::test]
async fn email_match_is_case_sensitive() {
    let (_store, auth) = auth_store();
    auth.signup("Ann", "ann@x.com", "pw").await.expect("signup");

    let err = auth.login("Ann@x.com", "pw").await.expect_err("case mismatch");
    assert!(matches!(err, StoreError::UserNotFound(_)));
}

#[tokio::test]
async fn logout_is_idempotent() {
    let (_store, auth) = auth_store();
    auth.logout().await.expect("logout with nobody set");

    auth.signup("Ann", "ann@x.com", "pw").await.expect("signup");
    auth.logout().await.expect("logout");
    auth.logout().await.expect("second logout");
    assert_eq!(auth.current_user().expect("current"), None);
}
