use crate::core::member::{Member, MemberId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors arising from group construction.
#[derive(Debug, Error)]
pub enum GroupError {
    #[error("group name must not be empty")]
    EmptyName,
    #[error("group must have at least one member")]
    NoMembers,
}

/// A named collection of members sharing expenses.
///
/// Groups are identified by a join code for sharing and carry a privacy
/// flag. In a private group each member only sees the transactions they
/// took part in, and debt derivation switches from global netting to
/// per-transaction direct debts.
///
/// # Examples
///
/// ```
/// use split_engine::core::group::Group;
/// use split_engine::core::member::Member;
///
/// let group = Group::new(
///     "Trip to Bilbao",
///     "X7K2",
///     vec![Member::new("u-alice", "Alice"), Member::new("u-bob", "Bob")],
/// )
/// .unwrap();
///
/// assert!(!group.is_private());
/// assert_eq!(group.members().len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier for this group.
    id: Uuid,
    /// Human-facing group name.
    name: String,
    /// Short join code used to invite members.
    code: String,
    /// Whether visibility is restricted to each member's own transactions.
    is_private: bool,
    /// The group roster, in join order.
    members: Vec<Member>,
}

impl Group {
    /// Create a new public group.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        members: Vec<Member>,
    ) -> Result<Self, GroupError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GroupError::EmptyName);
        }
        if members.is_empty() {
            return Err(GroupError::NoMembers);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            code: code.into(),
            is_private: false,
            members,
        })
    }

    /// Mark this group as private.
    pub fn with_privacy(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Look up a member by stable id.
    pub fn member_by_id(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    /// Look up a member by display name. First match wins, matching the
    /// name-resolution rule used for payments.
    pub fn member_by_name(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }
}
