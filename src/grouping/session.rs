//! One interactive regrouping session over a loaded graph.

use log::{debug, info};

use super::elements::{ElementList, to_elements};
use super::history::History;
use super::merge::{MergeRejection, merge};
use super::model::GraphModel;
use super::partition::partition;
use super::store::{Group, GroupStore};
use super::summary::{GroupLink, GroupSummary, cross_group_links, summarize};
use crate::config::HistoryConfig;

/// A loaded graph with its undoable grouping.
///
/// This is the surface the UI drives: load, merge, undo, redo, reset. Each call
/// records at most one history entry, and calls that would not change the
/// grouping record none.
#[derive(Clone, Debug)]
pub struct GroupingSession {
	graph: GraphModel,
	history: History<GroupStore>,
}

impl Default for GroupingSession {
	fn default() -> Self {
		Self::new(&HistoryConfig::default())
	}
}

impl GroupingSession {
	/// Create a session with no graph loaded.
	pub fn new(config: &HistoryConfig) -> Self {
		Self {
			graph: GraphModel::default(),
			history: History::with_config(GroupStore::new(), config),
		}
	}

	/// Create a session and load `graph` into it.
	pub fn with_graph(graph: GraphModel, config: &HistoryConfig) -> Self {
		let mut session = Self::new(config);
		session.load_graph(graph);
		session
	}

	/// Replace the graph, regroup it from scratch and forget all history.
	pub fn load_graph(&mut self, graph: GraphModel) {
		let store = partition(&graph);
		info!(
			"session: loaded {} nodes, {} edges into {} groups",
			graph.nodes.len(),
			graph.edges.len(),
			store.len()
		);
		self.graph = graph;
		self.history.reset(store);
	}

	/// Merge `source` into `target` as one undoable step.
	///
	/// A rejected merge leaves the grouping and both history stacks unchanged.
	pub fn merge_groups(&mut self, source: &str, target: &str) -> Result<(), MergeRejection> {
		let edges = &self.graph.edges;
		let result = self
			.history
			.try_commit(|store| merge(store, source, target, edges));
		match &result {
			Ok(()) => info!("session: merged {} into {}", source, target),
			Err(rejection) => debug!("session: merge ignored: {}", rejection),
		}
		result
	}

	/// Undo the last grouping change. Returns false when there was none.
	pub fn undo(&mut self) -> bool {
		self.history.undo()
	}

	/// Redo the last undone change. Returns false when there was none.
	pub fn redo(&mut self) -> bool {
		self.history.redo()
	}

	/// Restore the default grouping as one undoable step.
	///
	/// Returns false, recording nothing, when the grouping already is the default.
	pub fn reset_to_default_partition(&mut self) -> bool {
		let default = partition(&self.graph);
		if &default == self.history.current() {
			debug!("session: reset ignored, grouping is already the default");
			return false;
		}
		self.history.commit(move |_| default);
		info!("session: reset to default grouping");
		true
	}

	/// The loaded graph.
	pub fn graph(&self) -> &GraphModel {
		&self.graph
	}

	/// Current grouping.
	pub fn groups(&self) -> &GroupStore {
		self.history.current()
	}

	/// Current content of one group.
	pub fn group(&self, key: &str) -> Option<&Group> {
		self.groups().get(key)
	}

	/// Group keys in display order.
	pub fn group_keys(&self) -> Vec<String> {
		self.groups().keys().map(str::to_string).collect()
	}

	/// Element list of one group, if it exists.
	pub fn elements(&self, key: &str) -> Option<ElementList> {
		self.group(key).map(to_elements)
	}

	/// Card figures for every group.
	pub fn summaries(&self) -> Vec<GroupSummary> {
		summarize(self.groups())
	}

	/// Card figures for one group.
	pub fn summary(&self, key: &str) -> Option<GroupSummary> {
		self.group(key).map(|g| GroupSummary::of(key, g))
	}

	/// Edges currently crossing between groups, per ordered pair.
	pub fn cross_group_links(&self) -> Vec<GroupLink> {
		cross_group_links(self.groups(), &self.graph)
	}

	/// True when [`undo`](Self::undo) would change the grouping.
	pub fn can_undo(&self) -> bool {
		self.history.can_undo()
	}

	/// True when [`redo`](Self::redo) would change the grouping.
	pub fn can_redo(&self) -> bool {
		self.history.can_redo()
	}

	/// Number of undoable steps.
	pub fn undo_depth(&self) -> usize {
		self.history.past_len()
	}

	/// Number of redoable steps.
	pub fn redo_depth(&self) -> usize {
		self.history.future_len()
	}
}
