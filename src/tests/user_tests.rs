use crate::auth::jwt::JwtService;
use crate::core::errors::WhoOwesError;
use crate::infrastructure::seeder::{TEST_USER_EMAIL, TEST_USER_PASSWORD, seed_test_user};
use crate::tests::{create_test_service, test_jwt_service};

#[tokio::test]
async fn test_sign_up_and_login() {
    let service = create_test_service();

    let user = service.sign_up("alice@example.com", "secret").await.unwrap();
    assert_eq!(user.email, "alice@example.com");
    assert_ne!(user.password_hash, "secret");

    let token = service.login("alice@example.com", "secret").await.unwrap();
    assert_eq!(token.user_id, user.id);
    assert_eq!(token.email, user.email);
    assert!(token.expires_at > chrono::Utc::now());

    let claims = service.validate_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, "alice@example.com");
}

#[tokio::test]
async fn test_sign_up_rejects_duplicate_email_ignoring_case() {
    let service = create_test_service();
    service.sign_up("alice@example.com", "secret").await.unwrap();

    let result = service.sign_up("ALICE@example.com", "other").await;
    assert!(matches!(result, Err(WhoOwesError::EmailAlreadyRegistered(_))));
}

#[tokio::test]
async fn test_sign_up_requires_email_and_password() {
    let service = create_test_service();

    let result = service.sign_up(" ", "secret").await;
    assert!(matches!(result, Err(WhoOwesError::InvalidInput(field, _)) if field == "email"));

    let result = service.sign_up("alice@example.com", "").await;
    assert!(matches!(result, Err(WhoOwesError::InvalidInput(field, _)) if field == "password"));
}

#[tokio::test]
async fn test_login_with_bad_credentials() {
    let service = create_test_service();
    service.sign_up("alice@example.com", "secret").await.unwrap();

    let result = service.login("alice@example.com", "wrong").await;
    assert!(matches!(result, Err(WhoOwesError::InvalidCredentials)));

    let result = service.login("nobody@example.com", "secret").await;
    assert!(matches!(result, Err(WhoOwesError::InvalidCredentials)));
}

#[test]
fn test_token_from_other_issuer_is_rejected() {
    let other = JwtService::new(
        "test-signing-key".to_string(),
        "someone-else".to_string(),
        "whoowes-test-clients".to_string(),
        60,
    );
    let (token, _) = other.generate_token("user-1", "a@example.com").unwrap();

    let result = test_jwt_service().validate_token(&token);
    assert!(matches!(result, Err(WhoOwesError::Unauthorized(_))));
}

#[test]
fn test_expired_token_is_rejected() {
    let expired = JwtService::new(
        "test-signing-key".to_string(),
        "whoowes-test".to_string(),
        "whoowes-test-clients".to_string(),
        -10,
    );
    let (token, _) = expired.generate_token("user-1", "a@example.com").unwrap();

    let result = test_jwt_service().validate_token(&token);
    assert!(matches!(result, Err(WhoOwesError::Unauthorized(_))));
}

#[tokio::test]
async fn test_seed_test_user_is_idempotent() {
    let service = create_test_service();

    seed_test_user(&service).await.unwrap();
    seed_test_user(&service).await.unwrap();

    let token = service.login(TEST_USER_EMAIL, TEST_USER_PASSWORD).await.unwrap();
    assert_eq!(token.email, TEST_USER_EMAIL);
}
