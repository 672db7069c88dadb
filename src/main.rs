use leptos::mount::mount_to_body;
use news_atlas::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
