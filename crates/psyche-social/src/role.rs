//! Social roles held by a character.
//!
//! A [`Role`] (Friend, Supervisor, Student, ...) carries goals, actions,
//! and free-form numeric values. Two roles with the same name are still
//! distinct: identity is the [`RoleId`]. The [`RoleManager`] keeps the
//! roles of one owner and answers "which role matters most right now".

use std::collections::BTreeMap;

use psyche_types::{CharacterId, RoleId};
use tracing::warn;

use crate::error::SocialError;

/// Default importance of a freshly created role.
pub const DEFAULT_IMPORTANCE: f32 = 1.0;

/// Default priority of a freshly created goal.
pub const DEFAULT_GOAL_PRIORITY: f32 = 1.0;

// ---------------------------------------------------------------------------
// Goals and actions
// ---------------------------------------------------------------------------

/// A goal pursued while acting in a role.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleGoal {
    /// What the goal is, e.g. `"SecureFood"`. Effects match goals by this text.
    pub description: String,
    /// Current priority. Stimulus effects keep it within [0, 1].
    pub priority: f32,
}

impl RoleGoal {
    /// Create a goal with the default priority.
    pub fn new(description: impl Into<String>) -> Self {
        Self::with_priority(description, DEFAULT_GOAL_PRIORITY)
    }

    /// Create a goal with an explicit priority.
    pub fn with_priority(description: impl Into<String>, priority: f32) -> Self {
        Self {
            description: description.into(),
            priority,
        }
    }
}

/// An action a role makes available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAction {
    /// Short action name.
    pub action_name: String,
    /// Optional free-text description.
    pub description: String,
}

impl RoleAction {
    /// Create an action with an empty description.
    pub fn new(action_name: impl Into<String>) -> Self {
        Self {
            action_name: action_name.into(),
            description: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A social role, owned by one character and optionally aimed at another.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    id: RoleId,
    name: String,
    owner: CharacterId,
    target: Option<CharacterId>,
    goals: Vec<RoleGoal>,
    actions: Vec<RoleAction>,
    values: BTreeMap<String, f32>,
    importance: f32,
}

impl Role {
    /// Create a role with default importance and no target.
    pub fn new(name: impl Into<String>, owner: CharacterId) -> Self {
        Self {
            id: RoleId::new(),
            name: name.into(),
            owner,
            target: None,
            goals: Vec::new(),
            actions: Vec::new(),
            values: BTreeMap::new(),
            importance: DEFAULT_IMPORTANCE,
        }
    }

    /// Builder-style: aim the role at `target`.
    #[must_use]
    pub const fn with_target(mut self, target: CharacterId) -> Self {
        self.target = Some(target);
        self
    }

    /// Builder-style: set the importance.
    #[must_use]
    pub const fn with_importance(mut self, importance: f32) -> Self {
        self.importance = importance;
        self
    }

    /// The role's identity.
    pub const fn id(&self) -> RoleId {
        self.id
    }

    /// The role name, e.g. `"Friend"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The character holding this role.
    pub const fn owner(&self) -> CharacterId {
        self.owner
    }

    /// The character this role is directed at, if any.
    pub const fn target(&self) -> Option<CharacterId> {
        self.target
    }

    /// Re-assign the owning character.
    pub const fn set_owner(&mut self, owner: CharacterId) {
        self.owner = owner;
    }

    /// Re-assign (or clear) the target character.
    pub const fn set_target(&mut self, target: Option<CharacterId>) {
        self.target = target;
    }

    /// The role's importance.
    pub const fn importance(&self) -> f32 {
        self.importance
    }

    /// Overwrite the role's importance.
    pub const fn set_importance(&mut self, importance: f32) {
        self.importance = importance;
    }

    /// Append a goal.
    pub fn add_goal(&mut self, goal: RoleGoal) {
        self.goals.push(goal);
    }

    /// Goals in insertion order.
    pub fn goals(&self) -> &[RoleGoal] {
        &self.goals
    }

    /// The first goal whose description equals `description`.
    pub fn goal(&self, description: &str) -> Option<&RoleGoal> {
        self.goals.iter().find(|goal| goal.description == description)
    }

    /// Mutable access to the first goal whose description equals `description`.
    pub fn goal_mut(&mut self, description: &str) -> Option<&mut RoleGoal> {
        self.goals
            .iter_mut()
            .find(|goal| goal.description == description)
    }

    /// Append an action.
    pub fn add_action(&mut self, action: RoleAction) {
        self.actions.push(action);
    }

    /// Actions in insertion order.
    pub fn actions(&self) -> &[RoleAction] {
        &self.actions
    }

    /// Set a named value.
    pub fn set_value(&mut self, key: impl Into<String>, value: f32) {
        self.values.insert(key.into(), value);
    }

    /// A named value, or 0 if unset.
    pub fn value(&self, key: &str) -> f32 {
        self.values.get(key).copied().unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// RoleManager
// ---------------------------------------------------------------------------

/// The roles held by one character, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleManager {
    owner: CharacterId,
    roles: Vec<Role>,
}

impl RoleManager {
    /// Create an empty manager for `owner`.
    pub const fn new(owner: CharacterId) -> Self {
        Self {
            owner,
            roles: Vec::new(),
        }
    }

    /// The character these roles belong to.
    pub const fn owner(&self) -> CharacterId {
        self.owner
    }

    /// Add a role. Adding the same role (by identity) twice is rejected.
    pub fn add_role(&mut self, role: Role) -> Result<RoleId, SocialError> {
        let id = role.id();
        if self.role_by_id(id).is_some() {
            warn!(owner = %self.owner, role = role.name(), "Role already exists");
            return Err(SocialError::DuplicateRole {
                id,
                name: role.name,
            });
        }
        self.roles.push(role);
        Ok(id)
    }

    /// Remove a role by identity. Missing roles are ignored.
    pub fn remove_role(&mut self, id: RoleId) -> Option<Role> {
        let position = self.roles.iter().position(|role| role.id == id)?;
        Some(self.roles.remove(position))
    }

    /// The first role named `name`.
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.name == name)
    }

    /// Mutable access to the first role named `name`.
    pub fn role_mut(&mut self, name: &str) -> Option<&mut Role> {
        self.roles.iter_mut().find(|role| role.name == name)
    }

    /// Look up a role by identity.
    pub fn role_by_id(&self, id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    /// All roles in insertion order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// The role with the highest importance. Ties go to the earliest role.
    pub fn most_important_role(&self) -> Option<&Role> {
        self.most_important_position()
            .and_then(|position| self.roles.get(position))
    }

    /// Mutable access to the role with the highest importance.
    pub fn most_important_role_mut(&mut self) -> Option<&mut Role> {
        self.most_important_position()
            .and_then(|position| self.roles.get_mut(position))
    }

    /// Remove every role.
    pub fn clear_roles(&mut self) {
        self.roles.clear();
    }

    /// Set the importance of the first role named `name`.
    ///
    /// Returns `false` if no such role exists.
    pub fn update_role_importance(&mut self, name: &str, importance: f32) -> bool {
        self.role_mut(name).is_some_and(|role| {
            role.importance = importance;
            true
        })
    }

    fn most_important_position(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (position, role) in self.roles.iter().enumerate() {
            if best.is_none_or(|(_, importance)| role.importance > importance) {
                best = Some((position, role.importance));
            }
        }
        best.map(|(position, _)| position)
    }
}
