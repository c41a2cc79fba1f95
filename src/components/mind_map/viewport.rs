//! View-space transform. Nothing here touches node positions.

use super::types::Position;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 4.0;
const FIT_PADDING: f64 = 0.1;

/// Axis-aligned rectangle in whatever space the caller is working in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Rect {
	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
	}

	pub fn union(self, other: Rect) -> Rect {
		Rect {
			min_x: self.min_x.min(other.min_x),
			min_y: self.min_y.min(other.min_y),
			max_x: self.max_x.max(other.max_x),
			max_y: self.max_y.max(other.max_y),
		}
	}
}

/// `screen = layout * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_layout(&self, sx: f64, sy: f64) -> Position {
		Position::new((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	pub fn layout_to_screen(&self, p: Position) -> (f64, f64) {
		(p.x * self.k + self.x, p.y * self.k + self.y)
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
	}

	/// Scale by `factor`, keeping the layout point under `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}

	/// Frame `bounds` inside a `width` x `height` screen, centred, never zooming past 1.
	pub fn fit(bounds: Rect, width: f64, height: f64) -> Self {
		let (bw, bh) = (bounds.width().max(1.0), bounds.height().max(1.0));
		let (aw, ah) = (width * (1.0 - 2.0 * FIT_PADDING), height * (1.0 - 2.0 * FIT_PADDING));
		let k = (aw / bw).min(ah / bh).clamp(MIN_ZOOM, 1.0);
		let (cx, cy) = (
			bounds.min_x + bounds.width() / 2.0,
			bounds.min_y + bounds.height() / 2.0,
		);
		Self {
			x: width / 2.0 - cx * k,
			y: height / 2.0 - cy * k,
			k,
		}
	}

	/// The layout-space region currently visible on a `width` x `height` screen.
	pub fn visible(&self, width: f64, height: f64) -> Rect {
		let tl = self.screen_to_layout(0.0, 0.0);
		let br = self.screen_to_layout(width, height);
		Rect {
			min_x: tl.x,
			min_y: tl.y,
			max_x: br.x,
			max_y: br.y,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn screen_and_layout_round_trip() {
		let t = ViewTransform {
			x: 40.0,
			y: -12.0,
			k: 2.5,
		};
		let p = t.screen_to_layout(140.0, 88.0);
		let (sx, sy) = t.layout_to_screen(p);
		assert!(close(sx, 140.0) && close(sy, 88.0));
	}

	#[test]
	fn zoom_keeps_the_cursor_anchored() {
		let mut t = ViewTransform::default();
		let before = t.screen_to_layout(300.0, 200.0);
		t.zoom_at(300.0, 200.0, 1.1);
		let after = t.screen_to_layout(300.0, 200.0);
		assert!(close(before.x, after.x) && close(before.y, after.y));
		assert!(close(t.k, 1.1));
	}

	#[test]
	fn zoom_is_clamped() {
		let mut t = ViewTransform::default();
		for _ in 0..100 {
			t.zoom_at(0.0, 0.0, 0.5);
		}
		assert_eq!(t.k, MIN_ZOOM);
		for _ in 0..100 {
			t.zoom_at(0.0, 0.0, 2.0);
		}
		assert_eq!(t.k, MAX_ZOOM);
	}

	#[test]
	fn fit_centres_the_bounds() {
		let bounds = Rect {
			min_x: 100.0,
			min_y: 100.0,
			max_x: 700.0,
			max_y: 400.0,
		};
		let t = ViewTransform::fit(bounds, 800.0, 600.0);
		let (cx, cy) = t.layout_to_screen(Position::new(400.0, 250.0));
		assert!(close(cx, 400.0) && close(cy, 300.0));
		let visible = t.visible(800.0, 600.0);
		assert!(visible.contains(bounds.min_x, bounds.min_y));
		assert!(visible.contains(bounds.max_x, bounds.max_y));
	}
}
