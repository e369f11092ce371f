//! Named groups of characters.
//!
//! A single [`GroupRegistry`] owns every [`Group`]. Characters refer to
//! groups by [`GroupId`] through their [`GroupMembership`], and joining or
//! leaving updates both sides through the registry so the two views never
//! drift apart.

use std::collections::{BTreeMap, BTreeSet};

use psyche_types::{CharacterId, GroupId};
use tracing::{debug, warn};

use crate::error::SocialError;

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// A named set of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    name: String,
    members: BTreeSet<CharacterId>,
}

impl Group {
    fn new(name: String) -> Self {
        Self {
            id: GroupId::new(),
            name,
            members: BTreeSet::new(),
        }
    }

    /// The group's identifier.
    pub const fn id(&self) -> GroupId {
        self.id
    }

    /// The group's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `character` belongs to this group.
    pub fn has_member(&self, character: CharacterId) -> bool {
        self.members.contains(&character)
    }

    /// The current members.
    pub const fn members(&self) -> &BTreeSet<CharacterId> {
        &self.members
    }
}

// ---------------------------------------------------------------------------
// GroupRegistry
// ---------------------------------------------------------------------------

/// Owner of all groups. Group names are unique within a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupRegistry {
    groups: BTreeMap<GroupId, Group>,
}

impl GroupRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    /// Create a group named `name`.
    pub fn create_group(&mut self, name: impl Into<String>) -> Result<GroupId, SocialError> {
        let name = name.into();
        if self.group_by_name(&name).is_some() {
            warn!(group = %name, "Group name already in use");
            return Err(SocialError::DuplicateGroupName(name));
        }
        let group = Group::new(name);
        let id = group.id;
        debug!(group = %group.name, %id, "Group created");
        self.groups.insert(id, group);
        Ok(id)
    }

    /// Look up a group by identifier.
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Look up a group by name.
    pub fn group_by_name(&self, name: &str) -> Option<&Group> {
        self.groups.values().find(|group| group.name == name)
    }

    /// Delete a group. Memberships referring to it become dangling and are
    /// ignored by every query.
    pub fn delete_group(&mut self, id: GroupId) -> Result<Group, SocialError> {
        self.groups.remove(&id).ok_or(SocialError::GroupNotFound(id))
    }

    /// Whether `character` belongs to the group named `group_name`.
    pub fn is_member(&self, character: CharacterId, group_name: &str) -> bool {
        self.group_by_name(group_name)
            .is_some_and(|group| group.has_member(character))
    }

    /// Every group `character` belongs to.
    pub fn groups_of(&self, character: CharacterId) -> impl Iterator<Item = &Group> {
        self.groups
            .values()
            .filter(move |group| group.has_member(character))
    }

    /// Every registered group.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    fn add_member(&mut self, id: GroupId, character: CharacterId) -> Result<(), SocialError> {
        let group = self.groups.get_mut(&id).ok_or(SocialError::GroupNotFound(id))?;
        group.members.insert(character);
        Ok(())
    }

    fn remove_member(&mut self, id: GroupId, character: CharacterId) {
        if let Some(group) = self.groups.get_mut(&id) {
            group.members.remove(&character);
        }
    }
}

// ---------------------------------------------------------------------------
// GroupMembership
// ---------------------------------------------------------------------------

/// The groups one character has joined, in join order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMembership {
    owner: CharacterId,
    groups: Vec<GroupId>,
}

impl GroupMembership {
    /// Create an empty membership for `owner`.
    pub const fn new(owner: CharacterId) -> Self {
        Self {
            owner,
            groups: Vec::new(),
        }
    }

    /// The member character.
    pub const fn owner(&self) -> CharacterId {
        self.owner
    }

    /// Join a group. Joining a group twice is a no-op.
    pub fn join(&mut self, registry: &mut GroupRegistry, group: GroupId) -> Result<(), SocialError> {
        if self.groups.contains(&group) {
            return Ok(());
        }
        if let Err(err) = registry.add_member(group, self.owner) {
            warn!(character = %self.owner, %group, %err, "Join failed");
            return Err(err);
        }
        self.groups.push(group);
        Ok(())
    }

    /// Leave a group. Leaving a group not joined is a no-op.
    pub fn leave(&mut self, registry: &mut GroupRegistry, group: GroupId) {
        if let Some(position) = self.groups.iter().position(|joined| *joined == group) {
            self.groups.remove(position);
            registry.remove_member(group, self.owner);
        }
    }

    /// Whether this character has joined `group`.
    pub fn is_in_group(&self, group: GroupId) -> bool {
        self.groups.contains(&group)
    }

    /// Joined group identifiers in join order.
    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    /// Joined groups that still exist in `registry`.
    pub fn resolve<'a>(&'a self, registry: &'a GroupRegistry) -> impl Iterator<Item = &'a Group> {
        self.groups.iter().filter_map(|id| registry.group(*id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn group_names_are_unique() {
        let mut registry = GroupRegistry::new();
        let id = registry.create_group("Villagers").unwrap();
        assert_eq!(
            registry.create_group("Villagers"),
            Err(SocialError::DuplicateGroupName(String::from("Villagers")))
        );
        assert_eq!(registry.group_by_name("Villagers").map(Group::id), Some(id));
        assert_eq!(registry.groups().count(), 1);
    }

    #[test]
    fn join_and_leave_update_both_sides() {
        let mut registry = GroupRegistry::new();
        let guild = registry.create_group("Guild").unwrap();
        let npc = CharacterId::new();
        let mut membership = GroupMembership::new(npc);

        membership.join(&mut registry, guild).unwrap();
        membership.join(&mut registry, guild).unwrap();
        assert_eq!(membership.groups(), &[guild]);
        assert!(membership.is_in_group(guild));
        assert!(registry.is_member(npc, "Guild"));
        assert_eq!(registry.groups_of(npc).count(), 1);

        membership.leave(&mut registry, guild);
        assert!(!membership.is_in_group(guild));
        assert!(!registry.is_member(npc, "Guild"));
        assert!(registry.group(guild).unwrap().members().is_empty());
    }

    #[test]
    fn joining_unknown_group_fails() {
        let mut registry = GroupRegistry::new();
        let mut membership = GroupMembership::new(CharacterId::new());
        let missing = GroupId::new();
        assert_eq!(
            membership.join(&mut registry, missing),
            Err(SocialError::GroupNotFound(missing))
        );
        assert!(membership.groups().is_empty());
    }

    #[test]
    fn deleted_groups_drop_out_of_resolution() {
        let mut registry = GroupRegistry::new();
        let a = registry.create_group("A").unwrap();
        let b = registry.create_group("B").unwrap();
        let npc = CharacterId::new();
        let mut membership = GroupMembership::new(npc);
        membership.join(&mut registry, a).unwrap();
        membership.join(&mut registry, b).unwrap();

        registry.delete_group(a).unwrap();
        let names: Vec<&str> = membership.resolve(&registry).map(Group::name).collect();
        assert_eq!(names, vec!["B"]);
        assert!(registry.delete_group(a).is_err());
    }
}
