//! Error types shared by the search client and preference storage.

use thiserror::Error;

/// Errors raised while configuring or calling the search service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
	/// The client configuration is unusable (empty base URL, zero `top_k`, ...).
	#[error("configuration error: {0}")]
	Config(String),

	/// The query was blank after trimming; no request was issued.
	#[error("query is empty")]
	EmptyQuery,

	/// The service answered with a non-success status.
	#[error("search failed: {status} {status_text}")]
	Http {
		/// HTTP status code.
		status: u16,
		/// Reason phrase sent with the status.
		status_text: String,
	},

	/// The request never produced a response (network, CORS, ...).
	#[error("transport error: {0}")]
	Transport(String),

	/// The body could not be decoded as a search response.
	#[error("failed to decode response: {0}")]
	Decode(String),

	/// A newer search aborted this one.
	#[error("request aborted")]
	Aborted,
}

impl SearchError {
	/// Aborts are expected whenever a search supersedes another one.
	pub fn is_abort(&self) -> bool {
		matches!(self, Self::Aborted)
	}
}

impl From<gloo_net::Error> for SearchError {
	fn from(err: gloo_net::Error) -> Self {
		match err {
			gloo_net::Error::SerdeError(e) => Self::Decode(e.to_string()),
			gloo_net::Error::JsError(e) if e.name == "AbortError" => Self::Aborted,
			gloo_net::Error::JsError(e) => Self::Transport(e.message),
			gloo_net::Error::GlooError(msg) => Self::Transport(msg),
		}
	}
}

/// Errors from the preference store backing the theme toggle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
	/// No `window.localStorage` (private mode, sandboxed iframe, non-browser host).
	#[error("local storage is unavailable")]
	Unavailable,

	/// The browser rejected the read or write.
	#[error("storage access failed: {0}")]
	Access(String),
}
