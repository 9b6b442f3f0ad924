use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single transfer instruction: `from` pays `to` the given amount.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Settlement {
    pub from_member_id: String,
    pub from_member_name: String,
    pub to_member_id: String,
    pub to_member_name: String,
    /// Rounded to cents, always above the settlement threshold
    pub amount: Decimal,
}

/// How far a member is from their equal share of the group spend.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MemberBalance {
    pub member_id: String,
    pub member_name: String,
    pub total_paid: Decimal,
    pub equal_share: Decimal,
    /// Positive: owed money. Negative: owes money.
    pub net: Decimal,
}
