use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Largest amount a single payment may carry: one trillion.
pub const MAX_PAYMENT_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Payment {
    pub id: String,
    pub member_id: String,
    /// Payer's name at the time the payment was recorded
    pub member_name: String,
    pub amount: Decimal,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub payment_date: DateTime<Utc>,
    pub description: String,
}
