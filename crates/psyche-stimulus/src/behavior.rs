//! Candidate behaviors, optionally restricted to role names.

use psyche_types::BehaviorKind;
use serde::{Deserialize, Serialize};

/// A response an agent may exhibit.
///
/// An empty `associated_roles` list makes the behavior valid under any
/// role. Otherwise it is only valid while the agent's most important role
/// has one of the listed names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Behavior {
    /// Which behavior this is.
    pub kind: BehaviorKind,
    /// Role names this behavior is restricted to.
    #[serde(default)]
    pub associated_roles: Vec<String>,
}

impl Behavior {
    /// An unrestricted behavior.
    pub const fn new(kind: BehaviorKind) -> Self {
        Self {
            kind,
            associated_roles: Vec::new(),
        }
    }

    /// A behavior restricted to the given role names.
    pub fn for_roles<I, S>(kind: BehaviorKind, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            associated_roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// The behavior's display name.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Whether this behavior may be chosen while acting in `role_name`.
    ///
    /// `None` means the agent currently has no role; only unrestricted
    /// behaviors pass then.
    pub fn allowed_for(&self, role_name: Option<&str>) -> bool {
        if self.associated_roles.is_empty() {
            return true;
        }
        role_name.is_some_and(|current| self.associated_roles.iter().any(|role| role == current))
    }
}
