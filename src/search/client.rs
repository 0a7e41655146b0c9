use gloo_net::http::{Request, Response};
use log::debug;
use web_sys::AbortSignal;

use super::types::{DocumentsResponse, SearchRequest, SearchResponse, SearchResult};
use crate::config::{SearchConfig, SearchRoute};
use crate::error::SearchError;

/// HTTP client for the semantic search service.
///
/// One request per call: no retries and no timeout beyond the browser's own.
#[derive(Clone, Debug)]
pub struct SearchClient {
	config: SearchConfig,
}

impl SearchClient {
	/// Client for an already validated configuration.
	pub fn new(config: SearchConfig) -> Self {
		Self { config }
	}

	/// Client for the endpoint compiled into this build.
	pub fn from_build_env() -> Result<Self, SearchError> {
		SearchConfig::from_build_env().map(Self::new)
	}

	/// Configuration in use.
	pub fn config(&self) -> &SearchConfig {
		&self.config
	}

	/// Run `query` and return the ranked results.
	///
	/// `abort` cancels the request when its controller is aborted, in which
	/// case the call fails with [`SearchError::Aborted`].
	pub async fn search(
		&self,
		query: &str,
		abort: Option<&AbortSignal>,
	) -> Result<Vec<SearchResult>, SearchError> {
		let query = query.trim();
		if query.is_empty() {
			return Err(SearchError::EmptyQuery);
		}

		let url = self.config.endpoint();
		let top_k = self.config.top_k();
		debug!("searching {url} for {query:?} (top_k={top_k})");

		match self.config.route() {
			SearchRoute::Search => {
				let response = Request::post(&url)
					.abort_signal(abort)
					.json(&SearchRequest { query, top_k })?
					.send()
					.await?;
				let body: SearchResponse = check_status(response)?.json().await?;
				Ok(body.into_results())
			}
			SearchRoute::Documents => {
				let top_k = top_k.to_string();
				let response = Request::get(&url)
					.query([("query", query), ("top_k", top_k.as_str())])
					.abort_signal(abort)
					.send()
					.await?;
				let body: DocumentsResponse = check_status(response)?.json().await?;
				Ok(body.results)
			}
		}
	}
}

fn check_status(response: Response) -> Result<Response, SearchError> {
	if response.ok() {
		Ok(response)
	} else {
		Err(SearchError::Http {
			status: response.status(),
			status_text: response.status_text(),
		})
	}
}
