//! Drag-and-drop merge of one group into another.

use std::collections::HashSet;
use std::sync::Arc;

use super::model::Edge;
use super::store::{Group, GroupStore};

/// Why a merge request was turned into a no-op.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeRejection {
	/// Source and target are the same group.
	SameGroup,
	/// No group exists under the source key.
	UnknownSource(String),
	/// No group exists under the target key.
	UnknownTarget(String),
}

impl std::fmt::Display for MergeRejection {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			MergeRejection::SameGroup => write!(f, "cannot merge a group into itself"),
			MergeRejection::UnknownSource(key) => write!(f, "unknown source group: {}", key),
			MergeRejection::UnknownTarget(key) => write!(f, "unknown target group: {}", key),
		}
	}
}

impl std::error::Error for MergeRejection {}

/// Merge the group under `source_key` into the one under `target_key`.
///
/// The merged group keeps the target's position and key, lists the target's
/// nodes before the source's, and takes its edges from the full edge set of the
/// graph: every edge with both endpoints in the merged group, first occurrence
/// of each `source->target` pair only, in graph order. Edges that used to cross
/// between the two groups are recovered this way.
///
/// `store` is left untouched; the result is a new store.
pub fn merge(
	store: &GroupStore,
	source_key: &str,
	target_key: &str,
	graph_edges: &[Arc<Edge>],
) -> Result<GroupStore, MergeRejection> {
	if source_key == target_key {
		return Err(MergeRejection::SameGroup);
	}
	let source = store
		.get(source_key)
		.ok_or_else(|| MergeRejection::UnknownSource(source_key.to_string()))?;
	let target = store
		.get(target_key)
		.ok_or_else(|| MergeRejection::UnknownTarget(target_key.to_string()))?;

	let nodes: Vec<_> = target.nodes.iter().chain(&source.nodes).cloned().collect();
	let ids: HashSet<&str> = target
		.nodes
		.iter()
		.chain(&source.nodes)
		.map(|n| n.id.as_str())
		.collect();

	let mut seen = HashSet::new();
	let edges = graph_edges
		.iter()
		.filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
		.filter(|e| seen.insert((e.source.as_str(), e.target.as_str())))
		.cloned()
		.collect();

	let mut next = store.clone();
	next.insert(target_key, Group { nodes, edges });
	next.remove(source_key);
	Ok(next)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::grouping::model::{GraphModel, Node};
	use crate::grouping::partition::partition;

	fn graph() -> GraphModel {
		GraphModel::new(
			[
				Node::new("n1", "aws_vpc").with_module_path("module.a"),
				Node::new("n2", "aws_db_instance").with_module_path("module.b"),
				Node::new("n3", "aws_subnet").with_module_path("module.a"),
				Node::new("n4", "aws_iam_role").with_module_path("module.c"),
			],
			[
				Edge::new("n3", "n1"),
				Edge::new("n1", "n2"),
				Edge::new("n1", "n2").with_kind("ref"),
				Edge::new("n2", "n4"),
				Edge::new("n2", "ghost"),
			],
		)
	}

	fn ids(group: &Group) -> Vec<&str> {
		group.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn recovers_cross_group_edges() {
		let graph = graph();
		let store = partition(&graph);
		assert!(store.get("a").unwrap().edges.iter().all(|e| e.target != "n2"));

		let merged = merge(&store, "a", "b", &graph.edges).unwrap();

		assert!(!merged.contains_key("a"));
		let b = merged.get("b").unwrap();
		assert_eq!(ids(b), ["n2", "n1", "n3"]);
		let pairs: Vec<_> = b.edges.iter().map(|e| e.key()).collect();
		assert_eq!(pairs, ["n3->n1", "n1->n2"], "duplicate pair must collapse to its first occurrence");
		assert_eq!(b.edges[1].kind, None);
	}

	#[test]
	fn keeps_target_position_and_other_groups() {
		let graph = graph();
		let store = partition(&graph);
		assert_eq!(store.keys().collect::<Vec<_>>(), ["a", "b", "c"]);

		let merged = merge(&store, "a", "c", &graph.edges).unwrap();
		assert_eq!(merged.keys().collect::<Vec<_>>(), ["b", "c"]);
		assert_eq!(merged.get("b"), store.get("b"));
		assert_eq!(merged.node_count(), store.node_count());
	}

	#[test]
	fn rejects_invalid_requests_without_touching_store() {
		let graph = graph();
		let store = partition(&graph);
		let before = store.clone();

		assert_eq!(merge(&store, "a", "a", &graph.edges), Err(MergeRejection::SameGroup));
		assert_eq!(
			merge(&store, "missing", "a", &graph.edges),
			Err(MergeRejection::UnknownSource("missing".into()))
		);
		assert_eq!(
			merge(&store, "a", "missing", &graph.edges),
			Err(MergeRejection::UnknownTarget("missing".into()))
		);
		assert_eq!(store, before);
	}

	#[test]
	fn rejection_messages_name_the_key() {
		assert_eq!(
			MergeRejection::UnknownSource("vpc".into()).to_string(),
			"unknown source group: vpc"
		);
	}
}
