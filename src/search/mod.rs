//! Client for the remote semantic search service and its wire types.

mod client;
mod types;

pub use client::SearchClient;
pub use types::{DocumentsResponse, ResultMetadata, SearchRequest, SearchResponse, SearchResult};
