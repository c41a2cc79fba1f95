use super::types::{Position, PositionedNode};

pub const CELL_WIDTH: f64 = 200.0;
pub const CELL_HEIGHT: f64 = 150.0;
pub const GRID_ORIGIN: f64 = 100.0;

/// Anything the grid layout can move.
pub trait Positioned {
	fn set_position(&mut self, position: Position);
}

impl Positioned for PositionedNode {
	fn set_position(&mut self, position: Position) {
		self.position = position;
	}
}

/// `ceil(sqrt(n))` in integers, zero for an empty graph.
pub fn grid_columns(n: usize) -> usize {
	let mut cols = (n as f64).sqrt() as usize;
	while cols * cols < n {
		cols += 1;
	}
	while cols > 0 && (cols - 1) * (cols - 1) >= n {
		cols -= 1;
	}
	cols
}

/// `(row, col)` of the `index`-th item in a grid `columns` wide.
pub fn grid_cell(index: usize, columns: usize) -> (usize, usize) {
	(index / columns, index % columns)
}

pub fn grid_position(row: usize, col: usize) -> Position {
	Position::new(
		col as f64 * CELL_WIDTH + GRID_ORIGIN,
		row as f64 * CELL_HEIGHT + GRID_ORIGIN,
	)
}

/// Lay `nodes` out on a roughly square grid, row-major in input order.
///
/// Only positions change; the i-th output is the i-th input.
pub fn grid_layout<T: Positioned + Clone>(nodes: &[T]) -> Vec<T> {
	let columns = grid_columns(nodes.len());
	if columns == 0 {
		return Vec::new();
	}
	nodes
		.iter()
		.enumerate()
		.map(|(i, node)| {
			let (row, col) = grid_cell(i, columns);
			let mut node = node.clone();
			node.set_position(grid_position(row, col));
			node
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mind_map::types::Category;

	fn nodes(ids: &[&str]) -> Vec<PositionedNode> {
		ids.iter()
			.enumerate()
			.map(|(i, id)| PositionedNode {
				id: (*id).into(),
				category: Category::File,
				label: id.to_uppercase(),
				position: Position::new(i as f64 * 13.7, 400.0 - i as f64),
			})
			.collect()
	}

	#[test]
	fn five_nodes_use_three_columns() {
		let out = grid_layout(&nodes(&["a", "b", "c", "d", "e"]));
		let got: Vec<_> = out
			.iter()
			.map(|n| (n.id.as_str(), n.position.x, n.position.y))
			.collect();
		assert_eq!(
			got,
			[
				("a", 100.0, 100.0),
				("b", 300.0, 100.0),
				("c", 500.0, 100.0),
				("d", 100.0, 250.0),
				("e", 300.0, 250.0),
			]
		);
	}

	#[test]
	fn columns_are_integer_ceil_sqrt() {
		let expected = [0, 1, 2, 2, 2, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 5];
		for (n, &cols) in expected.iter().enumerate() {
			assert_eq!(grid_columns(n), cols, "n = {n}");
		}
		assert_eq!(grid_columns(10_000), 100);
		assert_eq!(grid_columns(10_001), 101);
	}

	#[test]
	fn cells_reconstruct_the_index() {
		for n in 1..60 {
			let cols = grid_columns(n);
			for i in 0..n {
				let (row, col) = grid_cell(i, cols);
				assert!(col < cols);
				assert_eq!(row * cols + col, i);
			}
		}
	}

	#[test]
	fn empty_input_gives_empty_output() {
		assert!(grid_layout::<PositionedNode>(&[]).is_empty());
	}

	#[test]
	fn layout_is_deterministic_and_keeps_everything_but_position() {
		let input = nodes(&["m", "n", "o", "p"]);
		let first = grid_layout(&input);
		let second = grid_layout(&first);
		assert_eq!(first, second);
		for (before, after) in input.iter().zip(&first) {
			assert_eq!(before.id, after.id);
			assert_eq!(before.label, after.label);
			assert_eq!(before.category, after.category);
		}
	}
}
