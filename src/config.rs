//! Board and history configuration.

/// Undo history limits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryConfig {
	/// Maximum number of undoable steps kept. Older steps are dropped first.
	pub max_undo_steps: usize,
}

impl Default for HistoryConfig {
	fn default() -> Self {
		Self { max_undo_steps: 128 }
	}
}

/// Settings for the group board.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardConfig {
	/// DOM id of the `<script>` element carrying the graph JSON.
	pub data_element_id: &'static str,
	/// Canvas height of a group card, in pixels.
	pub card_height: f64,
	/// Canvas height of the group detail view, in pixels.
	pub detail_height: f64,
	/// Undo history limits.
	pub history: HistoryConfig,
}

impl Default for BoardConfig {
	fn default() -> Self {
		Self {
			data_element_id: "graph-data",
			card_height: 224.0,
			detail_height: 640.0,
			history: HistoryConfig::default(),
		}
	}
}
