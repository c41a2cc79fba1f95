use serde::{Deserialize, Serialize};

/// A node as described by the analysis service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
}

/// A directed edge between two node ids. Endpoints are not validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MindMapData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

/// Visual category of a node. Anything unrecognised is a `File`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
	#[default]
	File,
	Component,
	Service,
}

impl Category {
	pub const ALL: [Category; 3] = [Category::File, Category::Component, Category::Service];

	pub fn from_tag(tag: &str) -> Self {
		let tag = tag.trim();
		Self::ALL
			.into_iter()
			.find(|c| c.as_str().eq_ignore_ascii_case(tag))
			.unwrap_or_default()
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Category::File => "file",
			Category::Component => "component",
			Category::Service => "service",
		}
	}
}

/// Point in layout-space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct PositionedNode {
	pub id: String,
	pub category: Category,
	pub label: String,
	/// Top-left corner of the node box.
	pub position: Position,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeStyle {
	pub animated: bool,
	pub stroke: &'static str,
}

impl Default for EdgeStyle {
	fn default() -> Self {
		Self {
			animated: true,
			stroke: "#6c8cff",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub style: EdgeStyle,
}

impl RenderedEdge {
	/// Edges are identified by their slot in the edge list, not by endpoints.
	pub fn at_index(index: usize, source: &str, target: &str) -> Self {
		Self {
			id: format!("edge-{index}"),
			source: source.to_owned(),
			target: target.to_owned(),
			style: EdgeStyle::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_or_blank_tags_fall_back_to_file() {
		assert_eq!(Category::from_tag("component"), Category::Component);
		assert_eq!(Category::from_tag("Service"), Category::Service);
		assert_eq!(Category::from_tag("database"), Category::File);
		assert_eq!(Category::from_tag(""), Category::File);
	}

	#[test]
	fn node_type_is_optional_in_json() {
		let data: MindMapData = serde_json::from_str(
			r#"{"nodes":[{"id":"a","label":"main.rs"},{"id":"b","label":"api","type":"service"}],
			"edges":[{"source":"a","target":"b"}]}"#,
		)
		.unwrap();
		assert_eq!(data.nodes[0].kind, None);
		assert_eq!(data.nodes[1].kind.as_deref(), Some("service"));
		assert_eq!(data.edges.len(), 1);
	}

	#[test]
	fn edge_ids_follow_list_position() {
		let edge = RenderedEdge::at_index(3, "x", "y");
		assert_eq!(edge.id, "edge-3");
		assert!(edge.style.animated);
	}
}
