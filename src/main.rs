//! Trunk entry point: mounts the app into `<body>`.

use nodetion::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
