use std::collections::HashSet;

use super::policy::edge_policy;
use super::types::{EdgeKind, GraphEdge, GraphNode, NodeData, Position};
use crate::search::{ResultMetadata, SearchResult};

/// Nodes and edges produced by one batch of results.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphIncrement {
	/// Results not seen before, in response order.
	pub nodes: Vec<GraphNode>,
	/// Edges touching at least one new node.
	pub edges: Vec<GraphEdge>,
	/// `existing_ids` plus the ids of `nodes`.
	pub seen_ids: HashSet<String>,
}

/// Source of the uniqueness token appended to edge ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeIds {
	next: u64,
}

impl EdgeIds {
	fn issue(&mut self, source: &str, target: &str) -> String {
		let id = format!("e{source}-{target}-{}", self.next);
		self.next += 1;
		id
	}
}

/// Turn a batch of search results into new nodes and the edges they add.
///
/// Results whose id is already in `existing_ids` (or repeated within the
/// batch) are dropped. New nodes are connected to each other and to every
/// node in `existing_nodes` when [`edge_policy`] allows it.
pub fn build_increment(
	results: &[SearchResult],
	existing_ids: &HashSet<String>,
	existing_nodes: &[GraphNode],
	edge_ids: &mut EdgeIds,
) -> GraphIncrement {
	let mut seen_ids = existing_ids.clone();
	let nodes: Vec<GraphNode> = results
		.iter()
		.enumerate()
		.filter(|(_, result)| seen_ids.insert(result.id.clone()))
		.map(|(index, result)| GraphNode::from_result(result, index))
		.collect();

	let mut edges = Vec::new();
	for (i, a) in nodes.iter().enumerate() {
		for b in &nodes[i + 1..] {
			edges.extend(connect(a, b, EdgeKind::Step, edge_ids));
		}
	}
	for existing in existing_nodes {
		for node in &nodes {
			edges.extend(connect(existing, node, EdgeKind::Default, edge_ids));
		}
	}

	GraphIncrement {
		nodes,
		edges,
		seen_ids,
	}
}

fn connect(
	source: &GraphNode,
	target: &GraphNode,
	kind: EdgeKind,
	edge_ids: &mut EdgeIds,
) -> Option<GraphEdge> {
	let strength = edge_policy(source.data.similarity, target.data.similarity)?;
	Some(GraphEdge {
		id: edge_ids.issue(&source.id, &target.id),
		source: source.id.clone(),
		target: target.id.clone(),
		kind,
		strength_label: strength.label(),
		visual_weight: strength.visual_weight(),
		hue: strength.hue(),
	})
}

/// Every node and edge materialized in the current session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphState {
	/// Nodes in insertion order.
	pub nodes: Vec<GraphNode>,
	/// Edges in insertion order.
	pub edges: Vec<GraphEdge>,
	/// Ids of every node in `nodes`.
	pub seen_ids: HashSet<String>,
	edge_ids: EdgeIds,
}

impl GraphState {
	/// No nodes yet.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Append the nodes and edges contributed by `results`.
	///
	/// Returns `(nodes added, edges added)`.
	pub fn merge(&mut self, results: &[SearchResult]) -> (usize, usize) {
		let increment = build_increment(results, &self.seen_ids, &self.nodes, &mut self.edge_ids);
		let added = (increment.nodes.len(), increment.edges.len());
		self.nodes.extend(increment.nodes);
		self.edges.extend(increment.edges);
		self.seen_ids = increment.seen_ids;
		added
	}

	/// Drop every node, edge and seen id.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.edges.clear();
		self.seen_ids.clear();
	}

	/// Replace the graph with a fixed two-node, one-edge fixture.
	pub fn inject_test_graph(&mut self) {
		let node = |id: &str, label: &str, text: &str, similarity, position| GraphNode {
			id: id.into(),
			position,
			data: NodeData {
				label: label.into(),
				full_text: text.into(),
				similarity,
				metadata: ResultMetadata {
					source_page_id: id.replace("-node-", ""),
					block_type: "test".into(),
					page_title_path: vec!["Test".into()],
					active_headings: vec!["Test Heading".into()],
				},
			},
		};

		self.nodes = vec![
			node(
				"test-node-1",
				"Test Node 1",
				"This is a test node",
				0.8,
				Position { x: 100.0, y: 100.0 },
			),
			node(
				"test-node-2",
				"Test Node 2",
				"This is another test node",
				0.7,
				Position { x: 400.0, y: 400.0 },
			),
		];
		self.edges = vec![GraphEdge {
			id: "test-edge-1".into(),
			source: "test-node-1".into(),
			target: "test-node-2".into(),
			kind: EdgeKind::Default,
			strength_label: "75%".into(),
			visual_weight: 3.0,
			hue: 217.0,
		}];
		self.seen_ids = self.nodes.iter().map(|n| n.id.clone()).collect();
	}
}
