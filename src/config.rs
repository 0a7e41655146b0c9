//! Build-time configuration of the search service.
//!
//! Values are baked in at compile time with `option_env!`, so a Trunk build
//! picks them up from the environment of the build, not the browser:
//!
//! - `NODETION_API_BASE`: base URL of the search service.
//! - `NODETION_TOP_K`: number of results requested per search.
//! - `NODETION_SEARCH_ROUTE`: `search` (POST, default) or `documents` (GET).

use crate::error::SearchError;

/// Base URL used when `NODETION_API_BASE` is not set at build time.
pub const DEFAULT_API_BASE: &str = "http://localhost:8001";
/// Results per search when `NODETION_TOP_K` is not set at build time.
pub const DEFAULT_TOP_K: u32 = 3;

/// Which endpoint of the search service answers queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchRoute {
	/// `POST /search` with a JSON body.
	#[default]
	Search,
	/// `GET /documents?query=..&top_k=..`.
	Documents,
}

impl SearchRoute {
	/// Path appended to the base URL.
	pub fn path(self) -> &'static str {
		match self {
			Self::Search => "/search",
			Self::Documents => "/documents",
		}
	}

	fn parse(raw: &str) -> Result<Self, SearchError> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"" | "search" | "post" => Ok(Self::Search),
			"documents" | "get" => Ok(Self::Documents),
			other => Err(SearchError::Config(format!(
				"unknown search route {other:?}, expected \"search\" or \"documents\""
			))),
		}
	}
}

/// Validated settings for [`crate::search::SearchClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
	base_url: String,
	top_k: u32,
	route: SearchRoute,
}

impl SearchConfig {
	/// Validate a base URL and result count.
	pub fn new(base_url: impl Into<String>, top_k: u32) -> Result<Self, SearchError> {
		let base_url = base_url.into().trim().trim_end_matches('/').to_string();
		if base_url.is_empty() {
			return Err(SearchError::Config("API base URL is not set".into()));
		}
		if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
			return Err(SearchError::Config(format!(
				"API base URL must be absolute http(s), got {base_url:?}"
			)));
		}
		if top_k == 0 {
			return Err(SearchError::Config("top_k must be at least 1".into()));
		}
		Ok(Self {
			base_url,
			top_k,
			route: SearchRoute::default(),
		})
	}

	/// Switch to a different endpoint.
	pub fn with_route(mut self, route: SearchRoute) -> Self {
		self.route = route;
		self
	}

	/// Read the values compiled into this build.
	pub fn from_build_env() -> Result<Self, SearchError> {
		Self::from_vars(
			option_env!("NODETION_API_BASE"),
			option_env!("NODETION_TOP_K"),
			option_env!("NODETION_SEARCH_ROUTE"),
		)
	}

	fn from_vars(
		base: Option<&str>,
		top_k: Option<&str>,
		route: Option<&str>,
	) -> Result<Self, SearchError> {
		let top_k = match top_k {
			Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
				SearchError::Config(format!("NODETION_TOP_K is not a number ({raw:?}): {e}"))
			})?,
			None => DEFAULT_TOP_K,
		};
		let route = route.map(SearchRoute::parse).transpose()?.unwrap_or_default();
		Ok(Self::new(base.unwrap_or(DEFAULT_API_BASE), top_k)?.with_route(route))
	}

	/// Base URL without a trailing slash.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Results requested per search.
	pub fn top_k(&self) -> u32 {
		self.top_k
	}

	/// Endpoint used for queries.
	pub fn route(&self) -> SearchRoute {
		self.route
	}

	/// Full URL of the configured endpoint.
	pub fn endpoint(&self) -> String {
		format!("{}{}", self.base_url, self.route.path())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_apply_when_nothing_is_set() {
		let config = SearchConfig::from_vars(None, None, None).unwrap();
		assert_eq!(config.base_url(), DEFAULT_API_BASE);
		assert_eq!(config.top_k(), DEFAULT_TOP_K);
		assert_eq!(config.endpoint(), "http://localhost:8001/search");
	}

	#[test]
	fn explicitly_empty_base_is_rejected() {
		let err = SearchConfig::from_vars(Some("  "), None, None).unwrap_err();
		assert!(matches!(err, SearchError::Config(_)));
	}

	#[test]
	fn relative_base_is_rejected() {
		assert!(SearchConfig::new("/api", 3).is_err());
	}

	#[test]
	fn zero_top_k_is_rejected() {
		assert!(matches!(
			SearchConfig::new("http://search.local", 0),
			Err(SearchError::Config(_))
		));
		assert!(SearchConfig::from_vars(None, Some("many"), None).is_err());
	}

	#[test]
	fn trailing_slash_is_trimmed() {
		let config = SearchConfig::new("https://search.local/", 5).unwrap();
		assert_eq!(config.endpoint(), "https://search.local/search");
	}

	#[test]
	fn documents_route_is_opt_in() {
		let config =
			SearchConfig::from_vars(Some("http://h"), Some("7"), Some("documents")).unwrap();
		assert_eq!(config.route(), SearchRoute::Documents);
		assert_eq!(config.endpoint(), "http://h/documents");
		assert_eq!(config.top_k(), 7);
		assert!(SearchConfig::from_vars(None, None, Some("graphql")).is_err());
	}
}
