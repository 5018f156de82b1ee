mod common;

use common::{seed_refresh_token, seed_user, test_state};

#[tokio::test]
async fn missing_cookie_fails_immediately() {
    let (state, _store) = test_state(5);

    let result = state.credentials.validate_refresh_token(None).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn unknown_token_fails() {
    let (state, _store) = test_state(5);

    let result = state
        .credentials
        .validate_refresh_token(Some("not-a-known-token"))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn expired_token_fails_and_record_is_purged() {
    let (state, store) = test_state(5);
    let user = seed_user(&store, "expired@example.com");
    let (raw, _token_id) = seed_refresh_token(&store, user.user_id, -1);

    let result = state.credentials.validate_refresh_token(Some(&raw)).await;
    assert!(result.is_err());

    // Lazy cleanup: the stale record must be gone afterwards.
    use admin_api::store::IdentityStore;
    let record = store.find_refresh_token(&raw).await.unwrap();
    assert!(record.is_none());
}

#[tokio::test]
async fn inactive_user_is_rejected() {
    let (state, store) = test_state(5);
    let user = seed_user(&store, "suspended@example.com");
    let (raw, _token_id) = seed_refresh_token(&store, user.user_id, 7);

    store.set_user_active(user.user_id, false);

    let result = state.credentials.validate_refresh_token(Some(&raw)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn valid_token_returns_minimal_principal() {
    let (state, store) = test_state(5);
    let user = seed_user(&store, "valid@example.com");
    let (raw, token_id) = seed_refresh_token(&store, user.user_id, 7);

    let principal = state
        .credentials
        .validate_refresh_token(Some(&raw))
        .await
        .unwrap();

    assert_eq!(principal.user_id, user.user_id);
    assert_eq!(principal.email, user.email);
    assert_eq!(principal.token_id, token_id);
}

#[tokio::test]
async fn rotation_spends_the_presented_token() {
    let (state, store) = test_state(5);
    let user = seed_user(&store, "rotate@example.com");
    let (raw, _token_id) = seed_refresh_token(&store, user.user_id, 7);

    let session = state.auth.refresh(Some(&raw)).await.unwrap();
    assert!(!session.access_token.is_empty());
    assert_ne!(session.refresh_token, raw);

    // The old token is deleted; presenting it again fails.
    let result = state.auth.refresh(Some(&raw)).await;
    assert!(result.is_err());

    // The rotated token works.
    let again = state.auth.refresh(Some(&session.refresh_token)).await;
    assert!(again.is_ok());
}

#[tokio::test]
async fn logout_is_idempotent() {
    let (state, store) = test_state(5);
    let user = seed_user(&store, "logout@example.com");
    let (raw, _token_id) = seed_refresh_token(&store, user.user_id, 7);

    state.auth.logout(Some(&raw)).await.unwrap();
    // Second logout with the same (now unknown) token is a no-op.
    state.auth.logout(Some(&raw)).await.unwrap();

    let result = state.credentials.validate_refresh_token(Some(&raw)).await;
    assert!(result.is_err());
}
