//! Per-group figures shown on the board, and the read-only cross-group index.

use std::collections::{HashMap, HashSet};

use super::model::GraphModel;
use super::store::{Group, GroupStore};

/// Human-readable title for a group key.
pub fn display_name(key: &str) -> String {
	let known = match key {
		"vpc" => Some("VPC"),
		"eks" => Some("EKS"),
		"app" => Some("App"),
		"db" => Some("Database"),
		"iam" => Some("IAM"),
		"kms" => Some("KMS"),
		"s3" => Some("S3"),
		"msg" => Some("Messaging"),
		"root" => Some("Root"),
		"misc" => Some("Misc"),
		_ => None,
	};
	if let Some(name) = known {
		return name.to_string();
	}
	let mut chars = key.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Node counts for the three well-known layers. Other layers are not counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerCounts {
	/// Networking, identity, key management.
	pub foundations: usize,
	/// Clusters, queues, shared runtime services.
	pub platforms: usize,
	/// Everything deployed on top.
	pub apps: usize,
}

/// Figures for one group card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupSummary {
	/// Group key.
	pub key: String,
	/// Display title.
	pub title: String,
	/// Number of member nodes.
	pub resources: usize,
	/// Number of intra-group edges.
	pub links: usize,
	/// Per-layer node counts.
	pub layers: LayerCounts,
	/// Distinct accounts among members.
	pub accounts: usize,
	/// Distinct regions among members.
	pub regions: usize,
}

impl GroupSummary {
	/// Summarize `group` under `key`.
	pub fn of(key: &str, group: &Group) -> Self {
		let mut layers = LayerCounts::default();
		let mut accounts = HashSet::new();
		let mut regions = HashSet::new();
		for node in &group.nodes {
			match node.layer.as_deref() {
				Some("foundations") => layers.foundations += 1,
				Some("platforms") => layers.platforms += 1,
				Some("apps") => layers.apps += 1,
				_ => {}
			}
			if let Some(account) = node.account.as_deref().filter(|a| !a.is_empty()) {
				accounts.insert(account);
			}
			if let Some(region) = node.region.as_deref().filter(|r| !r.is_empty()) {
				regions.insert(region);
			}
		}
		Self {
			key: key.to_string(),
			title: display_name(key),
			resources: group.nodes.len(),
			links: group.edges.len(),
			layers,
			accounts: accounts.len(),
			regions: regions.len(),
		}
	}
}

/// Summaries for every group, in store order.
pub fn summarize(store: &GroupStore) -> Vec<GroupSummary> {
	store.iter().map(|(key, group)| GroupSummary::of(key, group)).collect()
}

/// Number of graph edges running from one group to another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupLink {
	/// Group holding the edge sources.
	pub source: String,
	/// Group holding the edge targets.
	pub target: String,
	/// Edge count.
	pub count: usize,
}

/// Edges that cross group boundaries, aggregated per ordered group pair.
///
/// Group edge lists never hold these; this index is computed on demand from the
/// graph and does not feed back into the store. Pairs appear in the order their
/// first edge appears in the graph. Edges naming unknown nodes are ignored.
pub fn cross_group_links(store: &GroupStore, graph: &GraphModel) -> Vec<GroupLink> {
	let membership = store.membership();
	let mut links: Vec<GroupLink> = Vec::new();
	let mut index: HashMap<(&str, &str), usize> = HashMap::new();

	for edge in &graph.edges {
		let (Some(&source), Some(&target)) = (
			membership.get(edge.source.as_str()),
			membership.get(edge.target.as_str()),
		) else {
			continue;
		};
		if source == target {
			continue;
		}
		match index.get(&(source, target)) {
			Some(&i) => links[i].count += 1,
			None => {
				index.insert((source, target), links.len());
				links.push(GroupLink {
					source: source.to_string(),
					target: target.to_string(),
					count: 1,
				});
			}
		}
	}
	links
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;
	use crate::grouping::model::{Edge, Node};
	use crate::grouping::partition::partition;

	#[rstest]
	#[case("vpc", "VPC")]
	#[case("db", "Database")]
	#[case("msg", "Messaging")]
	#[case("network", "Network")]
	#[case("écluse", "Écluse")]
	#[case("", "")]
	fn titles(#[case] key: &str, #[case] expected: &str) {
		assert_eq!(display_name(key), expected);
	}

	fn graph() -> GraphModel {
		GraphModel::new(
			[
				Node::new("v1", "aws_vpc")
					.with_module_path("module.vpc")
					.with_layer("foundations")
					.with_account("111")
					.with_region("eu-west-1"),
				Node::new("v2", "aws_eks_cluster")
					.with_module_path("module.vpc")
					.with_layer("platforms")
					.with_account("111")
					.with_region("us-east-1"),
				Node::new("v3", "aws_lambda_function")
					.with_module_path("module.vpc")
					.with_layer("apps")
					.with_account("222"),
				Node::new("v4", "random_id").with_module_path("module.vpc").with_layer("other"),
				Node::new("d1", "aws_db_instance").with_module_path("module.db"),
			],
			[
				Edge::new("v1", "v2"),
				Edge::new("v2", "d1"),
				Edge::new("v3", "d1").with_kind("ref"),
				Edge::new("d1", "v1"),
				Edge::new("d1", "nowhere"),
			],
		)
	}

	#[test]
	fn summarizes_layers_accounts_and_regions() {
		let store = partition(&graph());
		let summaries = summarize(&store);

		let vpc = &summaries[0];
		assert_eq!(vpc.title, "VPC");
		assert_eq!(vpc.resources, 4);
		assert_eq!(vpc.links, 1);
		assert_eq!(vpc.layers, LayerCounts {
			foundations: 1,
			platforms: 1,
			apps: 1,
		});
		assert_eq!(vpc.accounts, 2);
		assert_eq!(vpc.regions, 2);

		let db = &summaries[1];
		assert_eq!((db.resources, db.links, db.accounts, db.regions), (1, 0, 0, 0));
	}

	#[test]
	fn indexes_cross_group_links_per_direction() {
		let graph = graph();
		let store = partition(&graph);

		let links = cross_group_links(&store, &graph);
		assert_eq!(links, vec![
			GroupLink {
				source: "vpc".into(),
				target: "db".into(),
				count: 2,
			},
			GroupLink {
				source: "db".into(),
				target: "vpc".into(),
				count: 1,
			},
		]);
	}
}
