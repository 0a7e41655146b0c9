//! Translates search results into the nodes and edges drawn on the canvas.

mod builder;
pub mod policy;
mod types;

pub use builder::{EdgeIds, GraphIncrement, GraphState, build_increment};
pub use policy::{EdgeStrength, SIMILARITY_THRESHOLD, edge_policy};
pub use types::{EdgeKind, GraphEdge, GraphNode, LABEL_MAX_CHARS, NodeData, Position, excerpt};
