pub mod group;
pub mod member;
pub mod payment;
pub mod settlement;
pub mod user;

pub use group::{Group, GroupSummary};
pub use member::Member;
pub use payment::Payment;
pub use settlement::{MemberBalance, Settlement};
pub use user::AppUser;
