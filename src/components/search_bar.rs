use leptos::ev::KeyboardEvent;
use leptos::prelude::*;

/// Query input with Search, Reset and Test Edge buttons.
#[component]
pub fn SearchBar(
	#[prop(into)] query: Signal<String>,
	#[prop(into)] searching: Signal<bool>,
	#[prop(into)] has_searched: Signal<bool>,
	#[prop(into)] on_input: Callback<String>,
	#[prop(into)] on_submit: Callback<()>,
	#[prop(into)] on_reset: Callback<()>,
	#[prop(into)] on_test_edge: Callback<()>,
) -> impl IntoView {
	let blank = move || query.with(|q| q.trim().is_empty());
	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" && !searching.get_untracked() {
			on_submit.run(());
		}
	};

	view! {
		<div class="search-bar" class=("search-bar--compact", move || has_searched.get())>
			<input
				class="search-bar__input"
				type="text"
				placeholder="What would you like to search for today?"
				prop:value=move || query.get()
				prop:disabled=move || searching.get()
				on:input=move |ev| on_input.run(event_target_value(&ev))
				on:keydown=on_keydown
			/>
			<button
				class="button button--primary"
				type="button"
				disabled=move || blank() || searching.get()
				on:click=move |_| on_submit.run(())
			>
				{move || if searching.get() { "Searching..." } else { "Search" }}
			</button>
			<Show when=move || has_searched.get()>
				<button class="button" type="button" on:click=move |_| on_reset.run(())>
					"↻ Reset"
				</button>
			</Show>
			<button
				class="button button--debug"
				type="button"
				on:click=move |_| on_test_edge.run(())
			>
				"Test Edge"
			</button>
		</div>
	}
}
