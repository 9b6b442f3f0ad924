use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub access_token_minutes: i64,
    pub bcrypt_cost: u32,
    pub seed_test_user: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("access_token_minutes", &self.access_token_minutes)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("seed_test_user", &self.seed_test_user)
            .finish()
    }
}

fn parsed_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: parsed_var("PORT", 3000),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            // Override in any shared deployment
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "whoowes-development-signing-key".to_string()),
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "whoowes".to_string()),
            jwt_audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "whoowes-clients".to_string()),
            access_token_minutes: parsed_var("JWT_ACCESS_TOKEN_MINUTES", 60),
            bcrypt_cost: parsed_var("BCRYPT_COST", bcrypt::DEFAULT_COST),
            seed_test_user: parsed_var("SEED_TEST_USER", true),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
