//! Simulation state for one group canvas.
//!
//! Wraps the `force_graph` physics simulation with per-node display data built
//! from an [`ElementList`], the pan/zoom transform, drag tracking and the
//! current hover highlight.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::theme::Theme;
use crate::grouping::{EdgeKind, ElementList};

/// Per-node display data attached to each simulated node.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	/// CSS fill color.
	pub color: String,
}

/// An edge between two simulated nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasEdge {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	/// Drawn with the `ref` dash pattern.
	pub dashed: bool,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Radius of the ring nodes are seeded on, in world units.
const SEED_RADIUS: f64 = 60.0;

/// Graph simulation combined with interaction state.
///
/// Rebuilt from scratch whenever the group's element list changes; the
/// animation loop calls [`tick`](Self::tick) once per frame.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	edges: Vec<CanvasEdge>,
	hovered: Option<DefaultNodeIdx>,
	highlighted: HashSet<DefaultNodeIdx>,
}

impl ForceGraphState {
	pub fn new(elements: &ElementList, width: f64, height: f64, theme: &Theme) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 80.0,
			force_spring: 0.06,
			force_max: 60.0,
			node_speed: 2000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::with_capacity(elements.nodes.len());

		let count = elements.nodes.len().max(1) as f64;
		for (i, node) in elements.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count;
			let idx = graph.add_node(NodeData {
				x: (SEED_RADIUS * angle.cos()) as f32,
				y: (SEED_RADIUS * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
					color: theme.layers.for_layer(node.layer.as_deref()).to_css(),
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		let mut edges = Vec::with_capacity(elements.edges.len());
		for edge in &elements.edges {
			let (Some(&source), Some(&target)) =
				(id_to_idx.get(edge.source.as_str()), id_to_idx.get(edge.target.as_str()))
			else {
				continue;
			};
			if source != target {
				graph.add_edge(source, target, EdgeData::default());
			}
			edges.push(CanvasEdge {
				source,
				target,
				dashed: EdgeKind::parse(Some(edge.kind.as_str())) == EdgeKind::Ref,
			});
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			animation_running: true,
			hovered: None,
			highlighted: HashSet::new(),
		}
	}

	pub fn edges(&self) -> &[CanvasEdge] {
		&self.edges
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Current world-space position of every node.
	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn node_at_position(&self, sx: f64, sy: f64, theme: &Theme) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let hit_radius = (theme.node.hit_radius / self.transform.k).max(theme.node.radius);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Highlight `node` and its direct neighbors, or clear the highlight.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		self.highlighted.clear();
		if let Some(idx) = node {
			self.highlighted.insert(idx);
			for edge in &self.edges {
				if edge.source == idx {
					self.highlighted.insert(edge.target);
				} else if edge.target == idx {
					self.highlighted.insert(edge.source);
				}
			}
		}
	}

	pub fn hovered(&self) -> Option<DefaultNodeIdx> {
		self.hovered
	}

	/// True while a hover highlight is active.
	pub fn has_highlight(&self) -> bool {
		!self.highlighted.is_empty()
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.highlighted.contains(&idx)
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::grouping::{EdgeElement, NodeElement};

	fn node(id: &str, layer: Option<&str>) -> NodeElement {
		NodeElement {
			id: id.into(),
			label: id.into(),
			node_type: "t".into(),
			layer: layer.map(str::to_string),
		}
	}

	fn edge(source: &str, target: &str, kind: &str) -> EdgeElement {
		EdgeElement {
			id: format!("{source}->{target}"),
			source: source.into(),
			target: target.into(),
			kind: kind.into(),
		}
	}

	fn elements() -> ElementList {
		ElementList {
			nodes: vec![node("a", Some("apps")), node("b", None), node("c", None)],
			edges: vec![
				edge("a", "b", "dep"),
				edge("b", "c", "ref"),
				edge("c", "c", "dep"),
				edge("a", "ghost", "dep"),
			],
		}
	}

	#[test]
	fn builds_nodes_and_known_edges() {
		let state = ForceGraphState::new(&elements(), 300.0, 200.0, &Theme::default());

		assert_eq!(state.positions().len(), 3);
		assert_eq!(state.edges().len(), 3);
		assert_eq!(state.edges().iter().filter(|e| e.dashed).count(), 1);
		assert_eq!((state.transform.x, state.transform.y), (150.0, 100.0));

		let mut colors = Vec::new();
		state.graph.visit_nodes(|n| colors.push(n.data.user_data.color.clone()));
		assert!(colors.contains(&"#f3c5a1".to_string()));
	}

	#[test]
	fn hover_highlights_direct_neighbors() {
		let mut state = ForceGraphState::new(&elements(), 300.0, 200.0, &Theme::default());
		let first = state.edges()[0];

		state.set_hover(Some(first.source));
		assert!(state.is_highlighted(first.source));
		assert!(state.is_highlighted(first.target));
		assert_eq!(state.hovered(), Some(first.source));

		state.set_hover(None);
		assert!(!state.has_highlight());
	}

	#[test]
	fn finds_node_under_cursor() {
		let state = ForceGraphState::new(&elements(), 300.0, 200.0, &Theme::default());
		let (&idx, &(x, y)) = state.positions().iter().next().unwrap();
		let (sx, sy) = (x + state.transform.x, y + state.transform.y);

		assert_eq!(state.node_at_position(sx, sy, &Theme::default()), Some(idx));
		assert_eq!(state.node_at_position(-500.0, -500.0, &Theme::default()), None);
	}
}
