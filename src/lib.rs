//! tfmap-graph: interactive regrouping of Terraform state dependency graphs.
//!
//! Resources are grouped by the Terraform module they belong to. Groups can be
//! merged by dragging one card onto another, and every change can be undone,
//! redone or reset back to the module grouping. Each group is drawn as its own
//! force-directed layout.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod config;
pub mod grouping;

pub use components::board::GroupBoard;
pub use components::force_graph::ForceGraphCanvas;
pub use config::{BoardConfig, HistoryConfig};
pub use grouping::{GraphModel, GroupingSession};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("tfmap-graph: logging initialized");
}

/// Load the graph from the script element with the given id.
/// Expected format: JSON with { nodes: [...], edges: [...], compounds: [...] }
fn load_graph_data(element_id: &str) -> Option<GraphModel> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(element_id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match GraphModel::from_json(&json_text) {
		Ok(graph) => {
			info!(
				"tfmap-graph: loaded {} nodes, {} edges, {} compounds",
				graph.nodes.len(),
				graph.edges.len(),
				graph.compounds.len()
			);
			Some(graph)
		}
		Err(e) => {
			warn!("tfmap-graph: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the graph from the DOM and renders the group board.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = BoardConfig::default();
	let graph = load_graph_data(config.data_element_id).unwrap_or_default();
	let session = RwSignal::new(GroupingSession::with_graph(graph, &config.history));

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Terraform Map" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="board-page">
			<h1>"Terraform Map"</h1>
			<p class="subtitle">
				"Drag a card's header onto another card to merge the groups. Drag nodes to reposition, scroll to zoom."
			</p>
			<GroupBoard session config />
		</main>
	}
}
