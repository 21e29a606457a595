//! Visual theming for group canvases.
//!
//! Nodes are colored by architectural layer. `dep` edges are drawn solid and
//! `ref` edges dashed.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill colors per layer.
#[derive(Clone, Debug)]
pub struct LayerColors {
	pub foundations: Color,
	pub platforms: Color,
	pub apps: Color,
	/// Nodes with no layer or an unknown one.
	pub fallback: Color,
}

impl LayerColors {
	/// Fill for a node in `layer`.
	pub fn for_layer(&self, layer: Option<&str>) -> Color {
		match layer {
			Some("foundations") => self.foundations,
			Some("platforms") => self.platforms,
			Some("apps") => self.apps,
			_ => self.fallback,
		}
	}
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Radius in world units.
	pub radius: f64,
	/// Hit detection radius in screen pixels.
	pub hit_radius: f64,
	/// Border width in screen pixels.
	pub border_width: f64,
	pub border_color: Color,
	/// Label font size in screen pixels.
	pub label_size: f64,
	pub label_color: Color,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Line width in screen pixels.
	pub line_width: f64,
	/// Color of `dep` edges and any unrecognized kind.
	pub dep_color: Color,
	/// Color of `ref` edges.
	pub ref_color: Color,
	/// Dash pattern (dash, gap) for `ref` edges, in screen pixels.
	pub ref_dash: (f64, f64),
	/// Arrow head length in world units.
	pub arrow_size: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	/// Alpha applied to nodes that are not part of the hover highlight.
	pub dim_alpha: f64,
	pub layers: LayerColors,
	pub node: NodeStyle,
	pub edge: EdgeStyle,
}

impl Theme {
	/// Light card theme matching the board.
	pub fn light() -> Self {
		Self {
			background: Color::rgb(255, 255, 255),
			dim_alpha: 0.35,
			layers: LayerColors {
				foundations: Color::rgb(0xa3, 0xd5, 0xa1),
				platforms: Color::rgb(0xa1, 0xc5, 0xf3),
				apps: Color::rgb(0xf3, 0xc5, 0xa1),
				fallback: Color::rgb(0x88, 0xaa, 0xaa),
			},
			node: NodeStyle {
				radius: 6.0,
				hit_radius: 10.0,
				border_width: 1.0,
				border_color: Color::rgb(0x44, 0x44, 0x55),
				label_size: 9.0,
				label_color: Color::rgba(30, 35, 42, 0.9),
			},
			edge: EdgeStyle {
				line_width: 1.0,
				dep_color: Color::rgba(70, 80, 95, 0.7),
				ref_color: Color::rgba(70, 80, 95, 0.5),
				ref_dash: (4.0, 3.0),
				arrow_size: 4.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}
