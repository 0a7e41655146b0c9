//! A whole browsing session driven through the page reducer.

use std::collections::HashSet;

use nodetion::error::SearchError;
use nodetion::search::{SearchResponse, SearchResult};
use nodetion::state::{Action, SearchState};
use nodetion::theme::{MemoryPreferences, Theme, resolve_theme, save_theme};

fn response(body: &str) -> Vec<SearchResult> {
	serde_json::from_str::<SearchResponse>(body)
		.expect("valid json")
		.into_results()
}

fn search(state: &mut SearchState, query: &str, results: Vec<SearchResult>) {
	state.apply(Action::QueryChanged(query.into()));
	let request = state.next_request().expect("query is not blank");
	state.apply(Action::SearchStarted { request });
	state.apply(Action::SearchSucceeded { request, results });
}

fn assert_unique_nodes(state: &SearchState) {
	let ids: HashSet<_> = state.graph.nodes.iter().map(|n| n.id.clone()).collect();
	assert_eq!(ids.len(), state.graph.nodes.len(), "duplicate node ids");
	assert_eq!(ids, state.graph.seen_ids);
}

#[test]
fn repeated_searches_accumulate_without_duplicates() {
	let mut state = SearchState::default();

	search(
		&mut state,
		"hyraxes",
		response(
			r#"{"success": true, "message": "Found 3 matching documents", "results": [
				{"rank": 1, "id": "id1", "document": "A document about hyraxes.", "similarity_score": 0.62},
				{"rank": 2, "id": "id2", "document": "Rock hyraxes live in Africa.", "similarity_score": 0.55},
				{"rank": 3, "id": "id3", "document": "Baltimore is a city.", "similarity_score": 0.01}
			]}"#,
		),
	);
	assert_eq!(state.graph.nodes.len(), 3);
	// id1-id2, id1-id3 and id2-id3 all average above the threshold
	assert_eq!(state.graph.edges.len(), 3);
	assert_unique_nodes(&state);

	search(
		&mut state,
		"baltimore",
		response(
			r#"{"success": true, "message": "Found 2 matching documents", "results": [
				{"id": "id3", "document": "Baltimore is a city.", "similarity_score": 0.71},
				{"id": "id4", "document": "Johns Hopkins is in Baltimore.", "similarity_score": 0.69}
			]}"#,
		),
	);
	assert_eq!(state.graph.nodes.len(), 4);
	// id4 connects to the three earlier nodes
	assert_eq!(state.graph.edges.len(), 6);
	assert_unique_nodes(&state);
	assert!(!state.is_searching());
}

#[test]
fn backend_error_payload_adds_nothing() {
	let mut state = SearchState::default();
	search(
		&mut state,
		"anything",
		response(r#"{"success": false, "message": "Error searching documents: down", "results": []}"#),
	);
	assert!(state.has_searched);
	assert!(state.graph.is_empty());
}

#[test]
fn transport_failure_then_reset() {
	let mut state = SearchState::default();
	search(
		&mut state,
		"first",
		response(r#"{"success": true, "message": "", "results": [
			{"id": "a", "document": "x", "similarity_score": 0.9},
			{"id": "b", "document": "y", "similarity_score": 0.9}
		]}"#),
	);

	state.apply(Action::QueryChanged("second".into()));
	let request = state.next_request().unwrap();
	state.apply(Action::SearchStarted { request });
	state.apply(Action::SearchFailed {
		request,
		error: SearchError::Transport("Failed to fetch".into()),
	});
	assert_eq!(state.graph.nodes.len(), 2);
	assert!(!state.is_searching());

	state.apply(Action::Reset);
	assert!(state.graph.nodes.is_empty());
	assert!(state.graph.edges.is_empty());
	assert!(state.graph.seen_ids.is_empty());
	assert!(!state.has_searched);

	// After a reset the same ids are welcome again
	search(
		&mut state,
		"again",
		response(r#"{"success": true, "message": "", "results": [
			{"id": "a", "document": "x", "similarity_score": 0.9}
		]}"#),
	);
	assert_eq!(state.graph.nodes.len(), 1);
}

#[test]
fn theme_preference_survives_reload() {
	let storage = MemoryPreferences::default();
	assert_eq!(resolve_theme(&storage, || false), Theme::Light);

	let toggled = resolve_theme(&storage, || false).toggled();
	save_theme(&storage, toggled);

	// Reload: the stored value wins and the system is never asked
	let reloaded = resolve_theme(&storage, || unreachable!("system preference consulted"));
	assert_eq!(reloaded, Theme::Dark);
}
