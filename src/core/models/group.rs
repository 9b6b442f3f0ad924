use super::member::Member;
use super::payment::Payment;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: String,
    pub creator_user_id: String,
    pub title: String,
    pub members: Vec<Member>,
    pub payments: Vec<Payment>,
}

impl Group {
    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }

    pub fn has_payments_from(&self, member_id: &str) -> bool {
        self.payments.iter().any(|p| p.member_id == member_id)
    }

    pub fn summary(&self) -> GroupSummary {
        GroupSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            member_count: self.members.len(),
            payment_count: self.payments.len(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct GroupSummary {
    pub id: String,
    pub title: String,
    pub member_count: usize,
    pub payment_count: usize,
}
