pub mod api;
pub mod auth;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::WhoOwesError;
pub use crate::core::services::WhoOwesService;
pub use crate::core::settlement::{compute_settlements, net_balances};
pub use crate::infrastructure::storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
