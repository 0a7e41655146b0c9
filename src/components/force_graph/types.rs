use crate::graph::{GraphEdge, GraphNode, GraphState};
use crate::theme::Theme;

/// Snapshot of the nodes and edges to draw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

impl From<&GraphState> for GraphData {
	fn from(graph: &GraphState) -> Self {
		Self {
			nodes: graph.nodes.clone(),
			edges: graph.edges.clone(),
		}
	}
}

/// Canvas colors for one theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
	pub background: &'static str,
	/// `r, g, b` of node label text.
	pub text_rgb: &'static str,
	pub label_background: &'static str,
	pub label_text: &'static str,
}

impl Palette {
	pub fn for_theme(theme: Theme) -> Self {
		match theme {
			Theme::Light => Self {
				background: "#f8fafc",
				text_rgb: "30, 41, 59",
				label_background: "rgba(255, 255, 255, 0.8)",
				label_text: "#374151",
			},
			Theme::Dark => Self {
				background: "#1a1a2e",
				text_rgb: "255, 255, 255",
				label_background: "rgba(30, 41, 59, 0.8)",
				label_text: "#e2e8f0",
			},
		}
	}
}
