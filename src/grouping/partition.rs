//! Initial grouping derived from node module paths.

use std::collections::HashMap;

use log::debug;

use super::key::key_of;
use super::model::GraphModel;
use super::store::GroupStore;

/// Build the default grouping of `graph`.
///
/// Each node goes to the group named by [`key_of`] its module path. An edge is
/// kept only when both endpoints resolve to the same group; cross-group edges
/// and edges naming unknown nodes belong to no group.
pub fn partition(graph: &GraphModel) -> GroupStore {
	let mut store = GroupStore::new();
	let mut membership: HashMap<&str, String> = HashMap::with_capacity(graph.nodes.len());
	for node in &graph.nodes {
		let key = key_of(node.module_path.as_deref());
		store.entry(&key).nodes.push(node.clone());
		membership.insert(node.id.as_str(), key);
	}

	let mut dropped = 0usize;
	for edge in &graph.edges {
		let source = membership.get(edge.source.as_str());
		let target = membership.get(edge.target.as_str());
		match (source, target) {
			(Some(s), Some(t)) if s == t => {
				if let Some(group) = store.get_mut(s) {
					group.edges.push(edge.clone());
				}
			}
			_ => dropped += 1,
		}
	}

	debug!(
		"partition: {} nodes into {} groups, {} intra-group edges, {} dropped",
		graph.nodes.len(),
		store.len(),
		store.edge_count(),
		dropped
	);
	store
}
