use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Name of the member row that stands for the group's creator.
pub const RESERVED_MEMBER_NAME: &str = "You";

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub name: String,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Member {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.has_name(RESERVED_MEMBER_NAME)
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
