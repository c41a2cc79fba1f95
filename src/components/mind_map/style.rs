use super::types::Category;

pub const NODE_WIDTH: f64 = 150.0;
pub const NODE_HEIGHT: f64 = 56.0;
pub const NODE_CORNER: f64 = 8.0;
pub const HANDLE_RADIUS: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeStyle {
	pub fill: &'static str,
	pub border: &'static str,
	pub text: &'static str,
	pub subtext: &'static str,
}

static STYLES: [(Category, NodeStyle); 3] = [
	(
		Category::File,
		NodeStyle {
			fill: "#ffffff",
			border: "rgba(99, 102, 241, 0.25)",
			text: "#111827",
			subtext: "#6b7280",
		},
	),
	(
		Category::Component,
		NodeStyle {
			fill: "rgba(236, 72, 153, 0.10)",
			border: "rgba(236, 72, 153, 0.35)",
			text: "#111827",
			subtext: "#6b7280",
		},
	),
	(
		Category::Service,
		NodeStyle {
			fill: "rgba(239, 68, 68, 0.10)",
			border: "rgba(239, 68, 68, 0.25)",
			text: "#111827",
			subtext: "#6b7280",
		},
	),
];

impl Category {
	pub fn style(self) -> &'static NodeStyle {
		STYLES
			.iter()
			.find(|(c, _)| *c == self)
			.map(|(_, s)| s)
			.unwrap_or(&STYLES[0].1)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_category_has_its_own_style() {
		let styles: Vec<_> = Category::ALL.iter().map(|c| c.style()).collect();
		assert_ne!(styles[0], styles[1]);
		assert_ne!(styles[1], styles[2]);
		assert_ne!(styles[0], styles[2]);
	}

	#[test]
	fn unrecognised_tags_render_like_files() {
		assert_eq!(
			Category::from_tag("database").style(),
			Category::File.style()
		);
	}
}
