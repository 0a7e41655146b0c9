//! Page state and the single update function that drives it.

use log::{debug, error, info};

use crate::error::SearchError;
use crate::graph::GraphState;
use crate::search::SearchResult;

/// Identifies one submitted search so late completions can be told apart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// Everything the home page renders from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
	/// Text currently in the search box.
	pub query: String,
	/// Set once any search or test graph has been requested; cleared by reset.
	pub has_searched: bool,
	/// Nodes and edges accumulated since the last reset.
	pub graph: GraphState,
	in_flight: Option<RequestId>,
	last_request: RequestId,
}

/// User intents and search completions.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
	/// The search box was edited.
	QueryChanged(String),
	/// A request was sent.
	SearchStarted {
		/// Id from [`SearchState::next_request`].
		request: RequestId,
	},
	/// A request came back with results.
	SearchSucceeded {
		/// Request the results belong to.
		request: RequestId,
		/// Ranked results, possibly empty.
		results: Vec<SearchResult>,
	},
	/// A request failed or was aborted.
	SearchFailed {
		/// Request that failed.
		request: RequestId,
		/// Why it failed.
		error: SearchError,
	},
	/// Clear the graph and the query.
	Reset,
	/// Replace the graph with the two-node fixture.
	InjectTestGraph,
}

impl SearchState {
	/// A request is in flight.
	pub fn is_searching(&self) -> bool {
		self.in_flight.is_some()
	}

	/// Query as it will be sent.
	pub fn trimmed_query(&self) -> &str {
		self.query.trim()
	}

	/// The query has something besides whitespace.
	pub fn can_submit(&self) -> bool {
		!self.trimmed_query().is_empty()
	}

	/// Allocate an id for a new search, or `None` when the query is blank.
	///
	/// Starting a new search while another is in flight is allowed; the old
	/// one becomes stale and its completion is ignored.
	pub fn next_request(&mut self) -> Option<RequestId> {
		if !self.can_submit() {
			return None;
		}
		self.last_request = RequestId(self.last_request.0 + 1);
		Some(self.last_request)
	}

	/// Advance the state by one action.
	pub fn apply(&mut self, action: Action) {
		match action {
			Action::QueryChanged(query) => self.query = query,
			Action::SearchStarted { request } => {
				if request != self.last_request {
					debug!("ignoring start of superseded search {request:?}");
					return;
				}
				self.in_flight = Some(request);
				self.has_searched = true;
			}
			Action::SearchSucceeded { request, results } => {
				if !self.settle(request) {
					return;
				}
				let (nodes, edges) = self.graph.merge(&results);
				info!(
					"search returned {} results: {nodes} new nodes, {edges} new edges ({} nodes total)",
					results.len(),
					self.graph.nodes.len()
				);
			}
			Action::SearchFailed { request, error } => {
				if !self.settle(request) {
					return;
				}
				if error.is_abort() {
					debug!("search {request:?} aborted");
				} else {
					error!("search error: {error}");
				}
			}
			Action::Reset => {
				self.graph.clear();
				self.has_searched = false;
				self.query.clear();
				self.in_flight = None;
			}
			Action::InjectTestGraph => {
				self.graph.inject_test_graph();
				self.has_searched = true;
				info!("test nodes and edge injected");
			}
		}
	}

	/// Clear the in-flight marker if `request` is the current search.
	fn settle(&mut self, request: RequestId) -> bool {
		if self.in_flight != Some(request) {
			debug!("dropping stale completion for {request:?}");
			return false;
		}
		self.in_flight = None;
		true
	}
}
