//! Force-directed canvas for a single group.
//!
//! Lays out an [`ElementList`](crate::grouping::ElementList) on an HTML canvas
//! with:
//! - Physics-based node positioning via force simulation
//! - Pan, zoom, and node dragging interactions
//! - Neighborhood highlighting on hover
//! - Layer colors, solid `dep` edges and dashed `ref` edges
//!
//! # Example
//!
//! ```ignore
//! let elements = Signal::derive(move || session.with(|s| s.elements("vpc").unwrap_or_default()));
//!
//! view! { <ForceGraphCanvas data=elements height=224.0 /> }
//! ```

mod component;
mod render;
mod state;
pub mod theme;

pub use component::ForceGraphCanvas;
pub use theme::Theme;
