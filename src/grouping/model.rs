//! Graph data structures produced by the state ingestion service.
//!
//! The payload is `{ nodes, edges, compounds? }`. Missing or `null` collections
//! are read as empty so a malformed document degrades to an empty partition.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

/// Edge kind used when an edge carries no `kind` tag.
pub const DEFAULT_EDGE_KIND: &str = "dep";

/// A provisioned resource.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	/// Resource address, unique across the graph (e.g. `module.vpc.aws_subnet.a`).
	pub id: String,
	/// Resource type (e.g. `aws_subnet`).
	#[serde(rename = "type", default)]
	pub node_type: String,
	/// Dot-delimited module path. Absent for resources declared at the root.
	#[serde(default)]
	pub module_path: Option<String>,
	/// Cloud account the resource lives in.
	#[serde(default)]
	pub account: Option<String>,
	/// Cloud region the resource lives in.
	#[serde(default)]
	pub region: Option<String>,
	/// Architectural layer, an open set (`foundations`, `platforms`, `apps`, ...).
	#[serde(default)]
	pub layer: Option<String>,
}

impl Node {
	/// Create a node with only an id and type set.
	pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			node_type: node_type.into(),
			module_path: None,
			account: None,
			region: None,
			layer: None,
		}
	}

	/// Set the module path.
	pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
		self.module_path = Some(module_path.into());
		self
	}

	/// Set the account.
	pub fn with_account(mut self, account: impl Into<String>) -> Self {
		self.account = Some(account.into());
		self
	}

	/// Set the region.
	pub fn with_region(mut self, region: impl Into<String>) -> Self {
		self.region = Some(region.into());
		self
	}

	/// Set the layer.
	pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
		self.layer = Some(layer.into());
		self
	}
}

/// Relationship tag carried by an edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeKind {
	/// Structural dependency (`depends_on`). The default.
	Dep,
	/// Non-structural attribute reference.
	Ref,
	/// Any other tag, kept verbatim.
	Other(String),
}

impl EdgeKind {
	/// Interpret an optional raw tag.
	pub fn parse(raw: Option<&str>) -> Self {
		match raw {
			None | Some(DEFAULT_EDGE_KIND) => EdgeKind::Dep,
			Some("ref") => EdgeKind::Ref,
			Some(other) => EdgeKind::Other(other.to_string()),
		}
	}

	/// The tag as it appears on the wire.
	pub fn as_str(&self) -> &str {
		match self {
			EdgeKind::Dep => DEFAULT_EDGE_KIND,
			EdgeKind::Ref => "ref",
			EdgeKind::Other(s) => s,
		}
	}
}

impl std::fmt::Display for EdgeKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A directed relationship between two node ids.
///
/// Endpoints are not validated: an edge may name ids that do not exist in the
/// graph, and such edges are dropped wherever membership is checked.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Edge {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Raw kind tag, `dep` when absent.
	#[serde(default)]
	pub kind: Option<String>,
}

impl Edge {
	/// Create an untagged edge.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			kind: None,
		}
	}

	/// Set the kind tag.
	pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
		self.kind = Some(kind.into());
		self
	}

	/// Parsed kind, defaulting to [`EdgeKind::Dep`].
	pub fn kind(&self) -> EdgeKind {
		EdgeKind::parse(self.kind.as_deref())
	}

	/// Composite identity used for de-duplication and element ids.
	pub fn key(&self) -> String {
		format!("{}->{}", self.source, self.target)
	}
}

/// A module grouping hint from the ingestion service. Carried through untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Compound {
	/// Module path this compound stands for.
	pub id: String,
	/// Human-readable label.
	#[serde(default)]
	pub label: Option<String>,
	/// Member node ids.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub children: Vec<String>,
}

/// Complete ingested graph.
///
/// Nodes and edges are immutable once loaded, so they are shared by `Arc`
/// between the graph and every group snapshot that holds them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GraphModel {
	/// All resources, in ingestion order.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub nodes: Vec<Arc<Node>>,
	/// All relationships, in ingestion order.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub edges: Vec<Arc<Edge>>,
	/// Optional module hints.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub compounds: Vec<Compound>,
}

impl GraphModel {
	/// Build a graph from owned nodes and edges.
	pub fn new(nodes: impl IntoIterator<Item = Node>, edges: impl IntoIterator<Item = Edge>) -> Self {
		Self {
			nodes: nodes.into_iter().map(Arc::new).collect(),
			edges: edges.into_iter().map(Arc::new).collect(),
			compounds: Vec::new(),
		}
	}

	/// Parse an ingestion payload.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// True when the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
