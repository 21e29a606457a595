//! Leptos UI: the group board and the per-group canvas it draws with.

pub mod board;
pub mod force_graph;
