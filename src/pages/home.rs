use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error};
use web_sys::AbortController;

use crate::components::document_card::DocumentCard;
use crate::components::force_graph::{ForceGraphCanvas, GraphData, Palette};
use crate::components::search_bar::SearchBar;
use crate::components::theme_toggle::{ThemeToggle, use_theme};
use crate::graph::{GraphNode, NodeData};
use crate::search::SearchClient;
use crate::state::{Action, SearchState};

/// Search page: query form, similarity graph and result cards.
#[component]
pub fn Home() -> impl IntoView {
	let state = RwSignal::new(SearchState::default());
	let selected = RwSignal::new(None::<String>);
	let in_flight = StoredValue::new_local(None::<AbortController>);
	let client = StoredValue::new(SearchClient::from_build_env());
	client.with_value(|client| {
		if let Err(e) = client {
			error!("search is disabled: {e}");
		}
	});

	let cancel_in_flight = move || {
		in_flight.update_value(|slot| {
			if let Some(controller) = slot.take() {
				controller.abort();
			}
		});
	};

	let on_submit = move |()| {
		let mut request = None;
		state.update(|s| {
			request = s.next_request();
			if let Some(request) = request {
				s.apply(Action::SearchStarted { request });
			}
		});
		let Some(request) = request else {
			return;
		};

		let client = match client.get_value() {
			Ok(client) => client,
			Err(error) => {
				state.update(|s| s.apply(Action::SearchFailed { request, error }));
				return;
			}
		};

		cancel_in_flight();
		let controller = AbortController::new().ok();
		let signal = controller.as_ref().map(|c| c.signal());
		in_flight.set_value(controller);

		let query = state.with_untracked(|s| s.trimmed_query().to_string());
		debug!("search {request:?} started");
		spawn_local(async move {
			let action = match client.search(&query, signal.as_ref()).await {
				Ok(results) => Action::SearchSucceeded { request, results },
				Err(error) => Action::SearchFailed { request, error },
			};
			state.update(|s| s.apply(action));
		});
	};

	let on_reset = move |()| {
		cancel_in_flight();
		selected.set(None);
		state.update(|s| s.apply(Action::Reset));
	};

	let on_test_edge = move |()| {
		selected.set(None);
		state.update(|s| s.apply(Action::InjectTestGraph));
	};

	let query = Signal::derive(move || state.with(|s| s.query.clone()));
	let searching = Signal::derive(move || state.with(SearchState::is_searching));
	let has_searched = Signal::derive(move || state.with(|s| s.has_searched));
	let graph_data = Memo::new(move |_| state.with(|s| GraphData::from(&s.graph)));
	let nodes = Memo::new(move |_| state.with(|s| s.graph.nodes.clone()));
	let selected_data = Memo::new(move |_| {
		let id = selected.get()?;
		nodes.with(|nodes| {
			nodes
				.iter()
				.find(|n| n.id == id)
				.map(|n| n.data.clone())
		})
	});

	let theme = use_theme();
	let palette = Signal::derive(move || Palette::for_theme(theme.get()));

	view! {
		<div class="page">
			<ThemeToggle />
			<div class="container">
				<header class="page-header">
					<h1>"Semantic Search Graph"</h1>
					<p class="subtitle">"Explore document relationships through semantic similarity"</p>
				</header>

				<SearchBar
					query=query
					searching=searching
					has_searched=has_searched
					on_input=move |q: String| state.update(|s| s.apply(Action::QueryChanged(q)))
					on_submit=on_submit
					on_reset=on_reset
					on_test_edge=on_test_edge
				/>

				<Show when=move || has_searched.get()>
					<section class="graph-panel">
						<ForceGraphCanvas
							data=graph_data
							palette=palette
							on_select=Callback::new(move |id: Option<String>| selected.set(id))
						/>
						<div class="graph-overlay">
							<p class="subtitle">
								"Drag nodes to reposition. Scroll to zoom. Double-click to fit. Click a node for details."
							</p>
						</div>
						{move || {
							selected_data
								.get()
								.map(|data: NodeData| {
									view! {
										<div class="graph-selection">
											<DocumentCard data=data />
										</div>
									}
								})
						}}
					</section>

					<section class="result-list">
						<For
							each=move || nodes.get()
							key=|node: &GraphNode| node.id.clone()
							children=move |node: GraphNode| view! { <DocumentCard data=node.data /> }
						/>
					</section>
				</Show>
			</div>
		</div>
	}
}
