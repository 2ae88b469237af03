//! The capability role an actor resolves to on a resource.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::share::ShareRole;

/// Capability role of an actor on a single resource.
///
/// A closed enumeration; every permission gate routes through the
/// predicates here rather than comparing strings at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The actor owns the resource.
    Owner,
    /// The resource was shared with the actor for editing.
    Editor,
    /// The resource is readable only. Also the strict default when no
    /// grant exists, so absent information never widens capability.
    Viewer,
}

impl Role {
    /// Whether this role permits mutating operations (rename, trash, move).
    pub fn can_mutate(self) -> bool {
        matches!(self, Self::Owner | Self::Editor)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ShareRole> for Role {
    fn from(role: ShareRole) -> Self {
        match role {
            ShareRole::Editor => Self::Editor,
            ShareRole::Viewer => Self::Viewer,
        }
    }
}
