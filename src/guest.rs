use serde::{Deserialize, Serialize};

/// Table class of a booking group.
///
/// Resolved once from the group name when the source is loaded, so the
/// assigner never has to look at names again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    Standard,
    Vip,
}

/// Identity of a booking group, taken from its source filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTag {
    pub id: u32,
    pub name: String,
    pub kind: GroupKind,
}

/// A cleaned guest from one of the group sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub name: String,
    pub menu: String,
    pub group_id: u32,
    pub group_name: String,
    pub group_kind: GroupKind,
    /// Position across the whole load, used for stable in-group ordering
    pub original_order: u64,
}

/// A standby guest from the reserve pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveGuest {
    pub name: String,
    pub menu: String,
    pub original_order: u64,
}

impl GuestRecord {
    pub fn new(name: impl Into<String>, menu: impl Into<String>, tag: &GroupTag, original_order: u64) -> Self {
        Self {
            name: name.into(),
            menu: menu.into(),
            group_id: tag.id,
            group_name: tag.name.clone(),
            group_kind: tag.kind,
            original_order,
        }
    }
}
