use leptos::prelude::*;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="container">
			<h1>"Page not found"</h1>
			<p class="subtitle">
				<a href="/">"Back to search"</a>
			</p>
		</div>
	}
}
