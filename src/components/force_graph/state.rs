use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::{GraphData, Palette};
use crate::graph::{EdgeKind, GraphNode};
use crate::theme::Theme;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const NODE_RADIUS: f64 = 8.0;
pub const HIT_RADIUS: f64 = 14.0;
/// Pointer travel (screen px) below which a press counts as a click.
pub const CLICK_SLOP: f64 = 3.0;
/// Characters of the excerpt drawn next to a node.
const CANVAS_LABEL_CHARS: usize = 24;
/// Screen margin kept around the graph when fitting it into view.
const FIT_PADDING: f64 = 60.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: String,
}

#[derive(Clone, Debug, Default)]
pub struct EdgeInfo {
	pub label: String,
	pub weight: f64,
	pub hue: f64,
	pub kind: Option<EdgeKind>,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub selected: Option<DefaultNodeIdx>,
	pub palette: Palette,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	edge_ids: HashSet<String>,
	groups: HashMap<String, usize>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: ForceGraph::new(SimulationParameters {
				force_charge: 150.0,
				force_spring: 0.05,
				force_max: 100.0,
				node_speed: 3000.0,
				damping_factor: 0.9,
			}),
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			selected: None,
			palette: Palette::for_theme(Theme::Light),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
			id_to_idx: HashMap::new(),
			edge_ids: HashSet::new(),
			groups: HashMap::new(),
			edges: Vec::new(),
		};
		state.sync(data);
		state
	}

	/// Bring the simulation in line with `data`.
	///
	/// Nodes and edges only ever get appended between resets, so new entries
	/// are added in place. If a known node disappeared the graph was replaced
	/// and the simulation is rebuilt from scratch.
	pub fn sync(&mut self, data: &GraphData) {
		let incoming: HashSet<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		if self.id_to_idx.keys().any(|id| !incoming.contains(id.as_str())) {
			let (palette, width, height) = (self.palette, self.width, self.height);
			*self = Self::new(data, width, height);
			self.palette = palette;
			return;
		}

		let before = self.id_to_idx.len();
		for node in &data.nodes {
			if !self.id_to_idx.contains_key(&node.id) {
				self.add_node(node);
			}
		}
		for edge in &data.edges {
			if self.edge_ids.contains(&edge.id) {
				continue;
			}
			if let (Some(&src), Some(&tgt)) =
				(self.id_to_idx.get(&edge.source), self.id_to_idx.get(&edge.target))
			{
				self.graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: EdgeInfo {
							label: edge.strength_label.clone(),
							weight: edge.visual_weight,
							hue: edge.hue,
							kind: Some(edge.kind),
						},
					},
				);
				self.edges.push((src, tgt));
				self.edge_ids.insert(edge.id.clone());
			}
		}
		if self.id_to_idx.len() != before {
			self.fit_view();
		}
	}

	fn add_node(&mut self, node: &GraphNode) {
		let next_group = self.groups.len();
		let group = *self
			.groups
			.entry(node.data.metadata.block_type.clone())
			.or_insert(next_group);
		let label = match node.data.label.char_indices().nth(CANVAS_LABEL_CHARS) {
			Some((cut, _)) => format!("{}…", &node.data.label[..cut]),
			None => node.data.label.clone(),
		};

		let idx = self.graph.add_node(NodeData {
			x: node.position.x as f32,
			y: node.position.y as f32,
			mass: 10.0,
			is_anchor: false,
			user_data: NodeInfo {
				id: node.id.clone(),
				label,
				color: COLORS[group % COLORS.len()].into(),
			},
		});
		self.id_to_idx.insert(node.id.clone(), idx);
	}

	/// Center the nodes and zoom so they fit the canvas.
	pub fn fit_view(&mut self) {
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			min_x = min_x.min(x);
			min_y = min_y.min(y);
			max_x = max_x.max(x);
			max_y = max_y.max(y);
		});
		if !min_x.is_finite() {
			return;
		}

		let (span_x, span_y) = ((max_x - min_x).max(1.0), (max_y - min_y).max(1.0));
		let (avail_x, avail_y) = (
			(self.width - 2.0 * FIT_PADDING).max(1.0),
			(self.height - 2.0 * FIT_PADDING).max(1.0),
		);
		let k = (avail_x / span_x).min(avail_y / span_y).clamp(0.1, 1.5);
		self.transform = ViewTransform {
			x: self.width / 2.0 - (min_x + max_x) / 2.0 * k,
			y: self.height / 2.0 - (min_y + max_y) / 2.0 * k,
			k,
		};
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Id of the search result behind `idx`.
	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
