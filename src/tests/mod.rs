mod group_tests;
mod user_tests;

use crate::auth::jwt::JwtService;
use crate::core::services::WhoOwesService;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub const TEST_BCRYPT_COST: u32 = 4;

pub fn test_jwt_service() -> JwtService {
    JwtService::new(
        "test-signing-key".to_string(),
        "whoowes-test".to_string(),
        "whoowes-test-clients".to_string(),
        60,
    )
}

pub fn create_test_service() -> WhoOwesService<InMemoryStorage> {
    WhoOwesService::new(InMemoryStorage::new(), test_jwt_service(), TEST_BCRYPT_COST)
}
