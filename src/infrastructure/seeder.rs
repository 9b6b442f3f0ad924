use crate::core::errors::WhoOwesError;
use crate::core::services::WhoOwesService;
use crate::infrastructure::storage::Storage;
use tracing::info;

pub const TEST_USER_EMAIL: &str = "user@example.com";
pub const TEST_USER_PASSWORD: &str = "password123";

/// Registers the demo account unless it already exists.
pub async fn seed_test_user<S: Storage>(service: &WhoOwesService<S>) -> Result<(), WhoOwesError> {
    match service.sign_up(TEST_USER_EMAIL, TEST_USER_PASSWORD).await {
        Ok(user) => {
            info!(user_id = %user.id, email = TEST_USER_EMAIL, "test user created");
            Ok(())
        }
        Err(WhoOwesError::EmailAlreadyRegistered(_)) => {
            info!(email = TEST_USER_EMAIL, "test user already exists, skipping seed");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
