use leptos::mount::mount_to_body;
use repo_mind_map::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
