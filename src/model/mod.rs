//! Member/Team data model
//!
//! Two entities and the join record the store hands back:
//! - `Member`: optional username, age, optional team reference
//! - `Team`: named group owning zero or more members (back-reference only)
//! - `MemberWithTeam`: a member with its team resolved (left-join shape)

mod member;
mod team;

pub use member::{Member, MemberId, MemberWithTeam};
pub use team::{Team, TeamId};
