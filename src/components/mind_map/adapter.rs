//! Conversion from the service's graph description into canvas nodes and edges.

use std::collections::HashSet;

use log::warn;
use rand::Rng;

use super::types::{Category, GraphEdge, GraphNode, Position, PositionedNode, RenderedEdge};

/// Side length of the square the initial scatter samples from.
pub const SCATTER_EXTENT: f64 = 400.0;

/// Build fresh canvas state from a graph description.
///
/// Every node lands at an independent uniform sample in
/// `[0, SCATTER_EXTENT)²`, so two loads of the same graph look different.
/// Edges keep their input order and are named `edge-<index>`. Edges whose
/// endpoints are missing are kept; they simply never get drawn.
pub fn to_canvas<R: Rng>(
	nodes: &[GraphNode],
	edges: &[GraphEdge],
	rng: &mut R,
) -> (Vec<PositionedNode>, Vec<RenderedEdge>) {
	let positioned: Vec<PositionedNode> = nodes
		.iter()
		.map(|node| PositionedNode {
			id: node.id.clone(),
			category: node
				.kind
				.as_deref()
				.map(Category::from_tag)
				.unwrap_or_default(),
			label: node.label.clone(),
			position: Position::new(
				rng.gen_range(0.0..SCATTER_EXTENT),
				rng.gen_range(0.0..SCATTER_EXTENT),
			),
		})
		.collect();

	let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let rendered = edges
		.iter()
		.enumerate()
		.map(|(i, edge)| {
			for end in [&edge.source, &edge.target] {
				if !known.contains(end.as_str()) {
					warn!("edge-{i} references unknown node {end:?}");
				}
			}
			RenderedEdge::at_index(i, &edge.source, &edge.target)
		})
		.collect();

	(positioned, rendered)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn node(id: &str, kind: Option<&str>) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: format!("{id}.rs"),
			kind: kind.map(Into::into),
		}
	}

	fn edge(source: &str, target: &str) -> GraphEdge {
		GraphEdge {
			source: source.into(),
			target: target.into(),
		}
	}

	#[test]
	fn categories_default_to_file() {
		let nodes = [
			node("a", None),
			node("b", Some("component")),
			node("c", Some("service")),
			node("d", Some("queue")),
		];
		let (out, _) = to_canvas(&nodes, &[], &mut StdRng::seed_from_u64(1));
		let cats: Vec<_> = out.iter().map(|n| n.category).collect();
		assert_eq!(
			cats,
			[
				Category::File,
				Category::Component,
				Category::Service,
				Category::File
			]
		);
		assert_eq!(out[1].label, "b.rs");
	}

	#[test]
	fn scatter_stays_inside_the_square() {
		let nodes: Vec<_> = (0..200).map(|i| node(&i.to_string(), None)).collect();
		let (out, _) = to_canvas(&nodes, &[], &mut StdRng::seed_from_u64(7));
		for n in &out {
			assert!((0.0..SCATTER_EXTENT).contains(&n.position.x));
			assert!((0.0..SCATTER_EXTENT).contains(&n.position.y));
		}
	}

	#[test]
	fn scatter_differs_between_loads() {
		let nodes: Vec<_> = (0..10).map(|i| node(&i.to_string(), None)).collect();
		let (first, _) = to_canvas(&nodes, &[], &mut StdRng::seed_from_u64(1));
		let (second, _) = to_canvas(&nodes, &[], &mut StdRng::seed_from_u64(2));
		assert_ne!(first, second);
	}

	#[test]
	fn edges_are_named_by_position_and_dangling_ones_survive() {
		let nodes = [node("x", None)];
		let edges = [edge("x", "y"), edge("x", "x")];
		let (_, out) = to_canvas(&nodes, &edges, &mut StdRng::seed_from_u64(0));
		assert_eq!(out.len(), 2);
		assert_eq!(out[0].id, "edge-0");
		assert_eq!(out[0].target, "y");
		assert_eq!(out[1].id, "edge-1");
	}

	#[test]
	fn input_is_left_untouched() {
		let nodes = vec![node("a", Some("service")), node("b", None)];
		let edges = vec![edge("a", "b")];
		let (nodes_before, edges_before) = (nodes.clone(), edges.clone());

		let (mut out_nodes, mut out_edges) =
			to_canvas(&nodes, &edges, &mut StdRng::seed_from_u64(3));
		out_nodes[0].label.push_str("-edited");
		out_edges[0].target = "z".into();

		assert_eq!(nodes, nodes_before);
		assert_eq!(edges, edges_before);
	}

	#[test]
	fn empty_graph_yields_empty_canvas() {
		let (n, e) = to_canvas(&[], &[], &mut StdRng::seed_from_u64(0));
		assert!(n.is_empty() && e.is_empty());
	}
}
