use crate::search::{ResultMetadata, SearchResult};

/// Maximum number of characters shown in a node label before truncating.
pub const LABEL_MAX_CHARS: usize = 100;

/// Canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal offset.
	pub x: f64,
	/// Vertical offset.
	pub y: f64,
}

impl Position {
	/// Grid slot for the `index`-th result of a response.
	pub fn for_index(index: usize) -> Self {
		Self {
			x: 250.0 + index as f64 * 200.0,
			y: 100.0 + index as f64 * 150.0,
		}
	}
}

/// What a node displays.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeData {
	/// Excerpt of the document, see [`excerpt`].
	pub label: String,
	/// Whole document text.
	pub full_text: String,
	/// Similarity score of the result.
	pub similarity: f64,
	/// Source location of the chunk.
	pub metadata: ResultMetadata,
}

/// One document chunk placed in the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Result id.
	pub id: String,
	/// Initial position.
	pub position: Position,
	/// Displayed content.
	pub data: NodeData,
}

impl GraphNode {
	/// Node for the `index`-th result of a response.
	pub fn from_result(result: &SearchResult, index: usize) -> Self {
		Self {
			id: result.id.clone(),
			position: Position::for_index(index),
			data: NodeData {
				label: excerpt(&result.document),
				full_text: result.document.clone(),
				similarity: result.similarity_score,
				metadata: result.metadata.clone(),
			},
		}
	}
}

/// How the renderer routes the edge line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
	/// Between two nodes found by the same search.
	Step,
	/// From an earlier node to a newly found one.
	Default,
}

/// Undirected connection between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	/// Unique within the session.
	pub id: String,
	/// Id of the earlier node.
	pub source: String,
	/// Id of the later node.
	pub target: String,
	/// Routing style.
	pub kind: EdgeKind,
	/// Mean similarity rendered as a percentage, e.g. `"90.0%"`.
	pub strength_label: String,
	/// Stroke width in canvas units.
	pub visual_weight: f64,
	/// Stroke hue in degrees.
	pub hue: f64,
}

/// Truncate `text` to [`LABEL_MAX_CHARS`] characters, marking the cut with `...`.
pub fn excerpt(text: &str) -> String {
	match text.char_indices().nth(LABEL_MAX_CHARS) {
		Some((cut, _)) => format!("{}...", &text[..cut]),
		None => text.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_text_is_kept() {
		assert_eq!(excerpt("short"), "short");
		let exact = "x".repeat(LABEL_MAX_CHARS);
		assert_eq!(excerpt(&exact), exact);
	}

	#[test]
	fn long_text_is_cut_on_char_boundary() {
		let text = "é".repeat(LABEL_MAX_CHARS + 5);
		let label = excerpt(&text);
		assert!(label.ends_with("..."));
		assert_eq!(label.chars().count(), LABEL_MAX_CHARS + 3);
	}

	#[test]
	fn grid_positions_step_diagonally() {
		assert_eq!(Position::for_index(0), Position { x: 250.0, y: 100.0 });
		assert_eq!(Position::for_index(2), Position { x: 650.0, y: 400.0 });
	}
}
