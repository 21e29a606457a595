//! Read-only projection of a group into layout elements.
//!
//! The element list is what the canvas lays out and draws. It carries display
//! attributes only and is rebuilt whenever the group changes.

use serde::Serialize;

use super::model::DEFAULT_EDGE_KIND;
use super::store::Group;

/// A node as handed to the layout engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeElement {
	/// Full node id.
	pub id: String,
	/// Compact label: the last two `.`-separated segments of the id.
	pub label: String,
	/// Resource type.
	#[serde(rename = "type")]
	pub node_type: String,
	/// Architectural layer, if known.
	pub layer: Option<String>,
}

/// An edge as handed to the layout engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EdgeElement {
	/// `source->target`.
	pub id: String,
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Kind tag, `dep` when the edge carried none.
	pub kind: String,
}

/// Nodes and edges of one group, ready for layout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ElementList {
	/// Node elements in group order.
	pub nodes: Vec<NodeElement>,
	/// Edge elements in group order.
	pub edges: Vec<EdgeElement>,
}

impl ElementList {
	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Compact display label for a node id.
pub fn short_label(id: &str) -> String {
	let segments: Vec<&str> = id.split('.').collect();
	let start = segments.len().saturating_sub(2);
	segments[start..].join(".")
}

/// Project a group into its element list.
///
/// Edges whose endpoints are not both members are skipped.
pub fn to_elements(group: &Group) -> ElementList {
	let ids = group.node_ids();
	let nodes = group
		.nodes
		.iter()
		.map(|n| NodeElement {
			id: n.id.clone(),
			label: short_label(&n.id),
			node_type: n.node_type.clone(),
			layer: n.layer.clone(),
		})
		.collect();
	let edges = group
		.edges
		.iter()
		.filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
		.map(|e| EdgeElement {
			id: e.key(),
			source: e.source.clone(),
			target: e.target.clone(),
			kind: e.kind.clone().unwrap_or_else(|| DEFAULT_EDGE_KIND.to_string()),
		})
		.collect();
	ElementList { nodes, edges }
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use rstest::rstest;

	use super::*;
	use crate::grouping::model::{Edge, Node};

	#[rstest]
	#[case("module.vpc.aws_subnet.private", "aws_subnet.private")]
	#[case("aws_s3_bucket.logs", "aws_s3_bucket.logs")]
	#[case("single", "single")]
	#[case("", "")]
	fn labels_use_last_two_segments(#[case] id: &str, #[case] expected: &str) {
		assert_eq!(short_label(id), expected);
	}

	#[test]
	fn projects_nodes_and_edges() {
		let group = Group {
			nodes: vec![
				Arc::new(Node::new("module.vpc.aws_vpc.main", "aws_vpc").with_layer("foundations")),
				Arc::new(Node::new("module.vpc.aws_subnet.a", "aws_subnet")),
			],
			edges: vec![
				Arc::new(Edge::new("module.vpc.aws_subnet.a", "module.vpc.aws_vpc.main")),
				Arc::new(Edge::new("module.vpc.aws_vpc.main", "module.vpc.aws_subnet.a").with_kind("ref")),
				Arc::new(Edge::new("module.vpc.aws_subnet.a", "elsewhere")),
			],
		};

		let elements = to_elements(&group);

		assert_eq!(elements.nodes.len(), 2);
		assert_eq!(elements.nodes[0].label, "aws_vpc.main");
		assert_eq!(elements.nodes[0].layer.as_deref(), Some("foundations"));
		assert_eq!(elements.nodes[1].node_type, "aws_subnet");

		assert_eq!(elements.edges.len(), 2, "dangling edge must be skipped");
		assert_eq!(elements.edges[0].kind, "dep");
		assert_eq!(elements.edges[0].id, "module.vpc.aws_subnet.a->module.vpc.aws_vpc.main");
		assert_eq!(elements.edges[1].kind, "ref");
	}

	#[test]
	fn serializes_type_field() {
		let group = Group {
			nodes: vec![Arc::new(Node::new("a.b.c", "aws_eks_cluster"))],
			edges: Vec::new(),
		};
		let json = serde_json::to_value(to_elements(&group)).unwrap();
		assert_eq!(json["nodes"][0]["type"], "aws_eks_cluster");
		assert_eq!(json["nodes"][0]["label"], "b.c");
	}
}
