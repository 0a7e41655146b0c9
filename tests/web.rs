//! Browser tests for the pieces that touch the DOM and `localStorage`.
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use nodetion::config::SearchConfig;
use nodetion::error::SearchError;
use nodetion::search::SearchClient;
use nodetion::theme::{
	DARK_CLASS, LocalPreferences, PreferenceStore, THEME_KEY, Theme, apply_to_document,
	resolve_theme, save_theme,
};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn root_has_dark_class() -> bool {
	web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
		.map(|el| el.class_list().contains(DARK_CLASS))
		.unwrap_or(false)
}

#[wasm_bindgen_test]
fn local_storage_round_trip() {
	let store = LocalPreferences;
	save_theme(&store, Theme::Dark);
	assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

	let reloaded = resolve_theme(&LocalPreferences, || panic!("system preference consulted"));
	assert_eq!(reloaded, Theme::Dark);

	save_theme(&store, Theme::Light);
	assert_eq!(resolve_theme(&store, || true), Theme::Light);
}

#[wasm_bindgen_test]
fn dark_class_follows_theme() {
	apply_to_document(Theme::Dark);
	assert!(root_has_dark_class());
	apply_to_document(Theme::Light);
	assert!(!root_has_dark_class());
}

#[wasm_bindgen_test]
async fn blank_query_never_hits_the_network() {
	let client = SearchClient::new(SearchConfig::new("http://127.0.0.1:9", 3).unwrap());
	assert_eq!(client.search("   ", None).await, Err(SearchError::EmptyQuery));
}

#[wasm_bindgen_test]
async fn unreachable_service_is_a_transport_error() {
	let client = SearchClient::new(SearchConfig::new("http://127.0.0.1:9", 3).unwrap());
	let err = client.search("hyrax", None).await.unwrap_err();
	assert!(matches!(err, SearchError::Transport(_)), "unexpected {err:?}");
}

#[wasm_bindgen_test]
async fn aborted_request_reports_abort() {
	let client = SearchClient::new(SearchConfig::new("http://127.0.0.1:9", 3).unwrap());
	let controller = web_sys::AbortController::new().unwrap();
	controller.abort();
	let err = client.search("hyrax", Some(&controller.signal())).await.unwrap_err();
	assert_eq!(err, SearchError::Aborted);
}
