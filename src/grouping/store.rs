//! Groups and the key-ordered group store.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::model::{Edge, Node};

/// Identifier of a group.
pub type GroupKey = String;

/// A named partition of nodes plus the edges fully contained in it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
	/// Member nodes, in encounter order.
	pub nodes: Vec<Arc<Node>>,
	/// Edges whose endpoints are both members.
	pub edges: Vec<Arc<Edge>>,
}

impl Group {
	/// Ids of all member nodes.
	pub fn node_ids(&self) -> HashSet<&str> {
		self.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	/// True when `id` is a member.
	pub fn contains(&self, id: &str) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}
}

/// Mapping from group key to [`Group`].
///
/// Keys are unique and kept in insertion order so that cards render in a stable
/// order and two stores built the same way compare equal. Every node of the
/// graph is a member of exactly one group.
///
/// Cloning is a full snapshot: the node and edge sequences are copied, the
/// immutable node and edge records are shared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupStore {
	entries: Vec<(GroupKey, Group)>,
}

impl GroupStore {
	/// Create an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of groups.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when there are no groups.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Look up a group.
	pub fn get(&self, key: &str) -> Option<&Group> {
		self.entries.iter().find(|(k, _)| k == key).map(|(_, g)| g)
	}

	/// Look up a group for mutation.
	pub fn get_mut(&mut self, key: &str) -> Option<&mut Group> {
		self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, g)| g)
	}

	/// True when `key` names a group.
	pub fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Get a group, appending an empty one under `key` if absent.
	pub fn entry(&mut self, key: &str) -> &mut Group {
		let idx = match self.entries.iter().position(|(k, _)| k == key) {
			Some(idx) => idx,
			None => {
				self.entries.push((key.to_string(), Group::default()));
				self.entries.len() - 1
			}
		};
		&mut self.entries[idx].1
	}

	/// Replace the group under `key` in place, or append it if absent.
	pub fn insert(&mut self, key: &str, group: Group) {
		*self.entry(key) = group;
	}

	/// Remove and return a group.
	pub fn remove(&mut self, key: &str) -> Option<Group> {
		let idx = self.entries.iter().position(|(k, _)| k == key)?;
		Some(self.entries.remove(idx).1)
	}

	/// Group keys in order.
	pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
		self.entries.iter().map(|(k, _)| k.as_str())
	}

	/// Groups in order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Group)> + '_ {
		self.entries.iter().map(|(k, g)| (k.as_str(), g))
	}

	/// Node id to owning group key.
	pub fn membership(&self) -> HashMap<&str, &str> {
		self.iter()
			.flat_map(|(key, group)| group.nodes.iter().map(move |n| (n.id.as_str(), key)))
			.collect()
	}

	/// Total number of member nodes across all groups.
	pub fn node_count(&self) -> usize {
		self.entries.iter().map(|(_, g)| g.nodes.len()).sum()
	}

	/// Total number of intra-group edges across all groups.
	pub fn edge_count(&self) -> usize {
		self.entries.iter().map(|(_, g)| g.edges.len()).sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str) -> Arc<Node> {
		Arc::new(Node::new(id, "aws_instance"))
	}

	#[test]
	fn entry_appends_in_insertion_order() {
		let mut store = GroupStore::new();
		store.entry("vpc").nodes.push(node("a"));
		store.entry("db").nodes.push(node("b"));
		store.entry("vpc").nodes.push(node("c"));

		assert_eq!(store.keys().collect::<Vec<_>>(), ["vpc", "db"]);
		assert_eq!(store.get("vpc").unwrap().nodes.len(), 2);
		assert_eq!(store.node_count(), 3);
	}

	#[test]
	fn insert_keeps_position_and_remove_drops_entry() {
		let mut store = GroupStore::new();
		store.entry("a");
		store.entry("b");
		store.entry("c");

		store.insert("a", Group {
			nodes: vec![node("x")],
			edges: Vec::new(),
		});
		assert_eq!(store.keys().collect::<Vec<_>>(), ["a", "b", "c"]);

		assert!(store.remove("b").is_some());
		assert!(store.remove("b").is_none());
		assert_eq!(store.keys().collect::<Vec<_>>(), ["a", "c"]);
	}

	#[test]
	fn clone_is_independent_of_later_mutation() {
		let mut store = GroupStore::new();
		store.entry("vpc").nodes.push(node("a"));
		let snapshot = store.clone();

		store.entry("vpc").nodes.push(node("b"));
		store.remove("vpc");

		assert_eq!(snapshot.get("vpc").unwrap().nodes.len(), 1);
		assert!(store.is_empty());
	}

	#[test]
	fn membership_maps_node_to_group() {
		let mut store = GroupStore::new();
		store.entry("vpc").nodes.push(node("a"));
		store.entry("db").nodes.push(node("b"));

		let membership = store.membership();
		assert_eq!(membership.get("a"), Some(&"vpc"));
		assert_eq!(membership.get("b"), Some(&"db"));
		assert_eq!(membership.get("c"), None);
	}
}
