use std::collections::HashSet;

use log::{debug, info};
use rand::Rng;

use super::adapter;
use super::layout::grid_layout;
use super::style::{HANDLE_RADIUS, NODE_HEIGHT, NODE_WIDTH};
use super::types::{MindMapData, Position, PositionedNode, RenderedEdge};
use super::viewport::{Rect, ViewTransform};

/// Handles are small on screen, so give the pointer some slack.
pub const HANDLE_HIT_RADIUS: f64 = HANDLE_RADIUS * 2.0;
pub const MINIMAP_WIDTH: f64 = 200.0;
pub const MINIMAP_HEIGHT: f64 = 150.0;
pub const MINIMAP_MARGIN: f64 = 12.0;
const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Slot in `nodes` of the grabbed box, so duplicate ids cannot mix up.
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub last_x: f64,
	pub last_y: f64,
}

/// An edge being pulled out of a node's source handle.
#[derive(Clone, Debug, Default)]
pub struct ConnectState {
	pub source: Option<String>,
	/// Where the loose end currently is, in layout-space.
	pub cursor: Position,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<String>,
	pub neighbors: HashSet<String>,
}

/// Screen-space placement of the overview panel and its projection of layout-space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minimap {
	pub panel: Rect,
	pub scale: f64,
	origin_x: f64,
	origin_y: f64,
}

impl Minimap {
	pub fn project(&self, p: Position) -> (f64, f64) {
		(
			self.origin_x + p.x * self.scale,
			self.origin_y + p.y * self.scale,
		)
	}
}

/// Box occupied by a node in layout-space.
pub fn node_rect(node: &PositionedNode) -> Rect {
	Rect {
		min_x: node.position.x,
		min_y: node.position.y,
		max_x: node.position.x + NODE_WIDTH,
		max_y: node.position.y + NODE_HEIGHT,
	}
}

/// Outgoing handle, bottom centre of the box.
pub fn source_handle(node: &PositionedNode) -> Position {
	Position::new(node.position.x + NODE_WIDTH / 2.0, node.position.y + NODE_HEIGHT)
}

/// Incoming handle, top centre of the box.
pub fn target_handle(node: &PositionedNode) -> Position {
	Position::new(node.position.x + NODE_WIDTH / 2.0, node.position.y)
}

pub struct MindMapState {
	pub nodes: Vec<PositionedNode>,
	pub edges: Vec<RenderedEdge>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub connect: ConnectState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub show_minimap: bool,
	pub flow_time: f64,
}

impl MindMapState {
	pub fn new<R: Rng>(data: &MindMapData, width: f64, height: f64, rng: &mut R) -> Self {
		let mut state = Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			connect: ConnectState::default(),
			hover: HoverState::default(),
			width,
			height,
			show_minimap: true,
			flow_time: 0.0,
		};
		state.load(data, rng);
		state
	}

	/// Throw away the current graph and show `data` instead.
	pub fn load<R: Rng>(&mut self, data: &MindMapData, rng: &mut R) {
		let (nodes, edges) = adapter::to_canvas(&data.nodes, &data.edges, rng);
		self.nodes = nodes;
		self.edges = edges;
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.connect = ConnectState::default();
		self.hover = HoverState::default();
		self.fit_view();
		info!(
			"Loaded mind map with {} nodes and {} edges",
			self.nodes.len(),
			self.edges.len()
		);
	}

	pub fn node(&self, id: &str) -> Option<&PositionedNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Both endpoints of `edge`, or `None` when either id is unknown.
	pub fn resolve_edge(&self, edge: &RenderedEdge) -> Option<(&PositionedNode, &PositionedNode)> {
		Some((self.node(&edge.source)?, self.node(&edge.target)?))
	}

	/// Put the node at `index` at `position`. Returns false if there is no such node.
	pub fn move_node(&mut self, index: usize, position: Position) -> bool {
		match self.nodes.get_mut(index) {
			Some(node) => {
				node.position = position;
				true
			}
			None => false,
		}
	}

	/// Append an edge. Self-loops and repeated pairs are allowed.
	pub fn connect(&mut self, source: &str, target: &str) -> &RenderedEdge {
		let edge = RenderedEdge::at_index(self.edges.len(), source, target);
		debug!("Connected {source} -> {target} as {}", edge.id);
		self.edges.push(edge);
		&self.edges[self.edges.len() - 1]
	}

	/// Re-arrange the current nodes, in their current order, on a grid.
	pub fn auto_layout(&mut self) {
		self.nodes = grid_layout(&self.nodes);
		debug!("Grid layout applied to {} nodes", self.nodes.len());
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.transform.pan_by(dx, dy);
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.transform.zoom_at(sx, sy, factor);
	}

	/// Zoom about the centre of the canvas.
	pub fn zoom_by(&mut self, factor: f64) {
		self.transform.zoom_at(self.width / 2.0, self.height / 2.0, factor);
	}

	pub fn bounds(&self) -> Option<Rect> {
		self.nodes.iter().map(node_rect).reduce(Rect::union)
	}

	pub fn fit_view(&mut self) {
		self.transform = match self.bounds() {
			Some(bounds) => ViewTransform::fit(bounds, self.width, self.height),
			None => ViewTransform::default(),
		};
	}

	/// Index of the topmost node whose box contains the screen point.
	pub fn node_index_at(&self, sx: f64, sy: f64) -> Option<usize> {
		let p = self.transform.screen_to_layout(sx, sy);
		self.nodes
			.iter()
			.rposition(|n| node_rect(n).contains(p.x, p.y))
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<&PositionedNode> {
		self.node_index_at(sx, sy).map(|i| &self.nodes[i])
	}

	/// Topmost node whose source handle is under the screen point.
	pub fn handle_at_position(&self, sx: f64, sy: f64) -> Option<&PositionedNode> {
		let p = self.transform.screen_to_layout(sx, sy);
		let reach = HANDLE_HIT_RADIUS / self.transform.k.max(1.0);
		self.nodes.iter().rev().find(|n| {
			let h = source_handle(n);
			let (dx, dy) = (h.x - p.x, h.y - p.y);
			(dx * dx + dy * dy).sqrt() <= reach
		})
	}

	pub fn set_hover(&mut self, id: Option<String>) {
		if self.hover.node == id {
			return;
		}
		self.hover.neighbors.clear();
		if let Some(id) = &id {
			for edge in &self.edges {
				if &edge.source == id {
					self.hover.neighbors.insert(edge.target.clone());
				} else if &edge.target == id {
					self.hover.neighbors.insert(edge.source.clone());
				}
			}
		}
		self.hover.node = id;
	}

	pub fn is_highlighted(&self, id: &str) -> bool {
		self.hover.node.as_deref() == Some(id) || self.hover.neighbors.contains(id)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some()
	}

	fn in_minimap(&self, sx: f64, sy: f64) -> bool {
		self.show_minimap && self.minimap().panel.contains(sx, sy)
	}

	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		if self.in_minimap(sx, sy) {
			return;
		}
		if let Some(id) = self.handle_at_position(sx, sy).map(|n| n.id.clone()) {
			debug!("Connecting from {id}");
			self.connect.source = Some(id);
			self.connect.cursor = self.transform.screen_to_layout(sx, sy);
		} else if let Some(index) = self.node_index_at(sx, sy) {
			self.drag = DragState {
				node: Some(index),
				start_x: sx,
				start_y: sy,
				node_start: self.nodes[index].position,
			};
		} else {
			self.pan = PanState {
				active: true,
				last_x: sx,
				last_y: sy,
			};
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.in_minimap(sx, sy) {
			self.set_hover(None);
		} else if self.drag.node.is_none() {
			let hovered = self.node_at_position(sx, sy).map(|n| n.id.clone());
			self.set_hover(hovered);
		}

		if let Some(index) = self.drag.node {
			let k = self.transform.k;
			let position = Position::new(
				self.drag.node_start.x + (sx - self.drag.start_x) / k,
				self.drag.node_start.y + (sy - self.drag.start_y) / k,
			);
			self.move_node(index, position);
		} else if self.connect.source.is_some() {
			self.connect.cursor = self.transform.screen_to_layout(sx, sy);
		} else if self.pan.active {
			let (dx, dy) = (sx - self.pan.last_x, sy - self.pan.last_y);
			self.pan.last_x = sx;
			self.pan.last_y = sy;
			self.pan_by(dx, dy);
		}
	}

	pub fn pointer_up(&mut self, sx: f64, sy: f64) {
		if let Some(source) = self.connect.source.take() {
			let target = if self.in_minimap(sx, sy) {
				None
			} else {
				self.node_at_position(sx, sy).map(|n| n.id.clone())
			};
			match target {
				Some(target) => {
					self.connect(&source, &target);
				}
				None => debug!("Connection from {source} dropped on empty canvas"),
			}
		}
		if let Some(index) = self.drag.node.take() {
			debug!("Dropped {}", self.nodes[index].id);
		}
		self.pan.active = false;
	}

	pub fn pointer_leave(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.connect = ConnectState::default();
		self.set_hover(None);
	}

	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		if self.in_minimap(sx, sy) {
			return;
		}
		let factor = if delta_y > 0.0 {
			WHEEL_ZOOM_OUT
		} else {
			WHEEL_ZOOM_IN
		};
		self.zoom_at(sx, sy, factor);
	}

	pub fn minimap(&self) -> Minimap {
		let panel = Rect {
			min_x: self.width - MINIMAP_WIDTH - MINIMAP_MARGIN,
			min_y: self.height - MINIMAP_HEIGHT - MINIMAP_MARGIN,
			max_x: self.width - MINIMAP_MARGIN,
			max_y: self.height - MINIMAP_MARGIN,
		};
		let visible = self.transform.visible(self.width, self.height);
		let world = self.bounds().map_or(visible, |b| b.union(visible));
		let scale = (panel.width() / world.width().max(1.0))
			.min(panel.height() / world.height().max(1.0));
		let (used_w, used_h) = (world.width() * scale, world.height() * scale);
		Minimap {
			panel,
			scale,
			origin_x: panel.min_x + (panel.width() - used_w) / 2.0 - world.min_x * scale,
			origin_y: panel.min_y + (panel.height() - used_h) / 2.0 - world.min_y * scale,
		}
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
