use serde::{Deserialize, Serialize};

/// Where a chunk came from in the source workspace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultMetadata {
	/// Id of the page the chunk was taken from.
	pub source_page_id: String,
	/// Kind of block, e.g. `paragraph` or `heading_2`.
	pub block_type: String,
	/// Page titles from the root down to the page holding the chunk.
	pub page_title_path: Vec<String>,
	/// Headings in effect at the chunk's position.
	pub active_headings: Vec<String>,
}

/// One ranked document chunk returned by the search service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
	/// Stable chunk id, used as the node id.
	pub id: String,
	/// Chunk text.
	pub document: String,
	/// Cosine similarity to the query.
	pub similarity_score: f64,
	/// Missing on some backends.
	#[serde(default)]
	pub metadata: ResultMetadata,
	/// 1-based position in the response.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rank: Option<u32>,
}

/// Body of `POST /search`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchRequest<'a> {
	/// Trimmed query text.
	pub query: &'a str,
	/// Number of results wanted.
	pub top_k: u32,
}

/// Envelope returned by `POST /search`.
///
/// Every field is optional on the wire. A payload missing `success` or
/// `results` is treated as an empty result set.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
	/// `false` when the backend reports an error.
	pub success: bool,
	/// Human-readable status from the backend.
	pub message: String,
	/// Ranked results.
	pub results: Option<Vec<SearchResult>>,
}

impl SearchResponse {
	/// Results of a successful, well-formed response; empty otherwise.
	pub fn into_results(self) -> Vec<SearchResult> {
		match (self.success, self.results) {
			(true, Some(results)) => results,
			(success, results) => {
				log::warn!(
					"ignoring search response (success: {}, results present: {}): {}",
					success,
					results.is_some(),
					self.message
				);
				Vec::new()
			}
		}
	}
}

/// Envelope returned by `GET /documents`, which has no success flag.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentsResponse {
	/// Ranked results.
	pub results: Vec<SearchResult>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_backend_payload_without_metadata() {
		let body = r#"{
			"success": true,
			"message": "Found 1 matching documents",
			"query": "hyrax",
			"top_k": 3,
			"results": [
				{"rank": 1, "document": "Hyraxes are freaky.", "similarity_score": 0.42, "id": "id1"}
			]
		}"#;
		let response: SearchResponse = serde_json::from_str(body).unwrap();
		let results = response.into_results();
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].rank, Some(1));
		assert_eq!(results[0].metadata, ResultMetadata::default());
	}

	#[test]
	fn decodes_full_metadata() {
		let body = r#"{"success": true, "message": "", "results": [{
			"id": "b1", "document": "text", "similarity_score": 0.9,
			"metadata": {
				"source_page_id": "p1", "block_type": "paragraph",
				"page_title_path": ["Root", "Child"], "active_headings": ["Intro"]
			}
		}]}"#;
		let response: SearchResponse = serde_json::from_str(body).unwrap();
		let result = &response.into_results()[0];
		assert_eq!(result.metadata.page_title_path, ["Root", "Child"]);
		assert_eq!(result.metadata.block_type, "paragraph");
	}

	#[test]
	fn missing_success_means_no_results() {
		let response: SearchResponse =
			serde_json::from_str(r#"{"results": [{"id": "a", "document": "", "similarity_score": 1.0}]}"#)
				.unwrap();
		assert!(response.into_results().is_empty());
	}

	#[test]
	fn failed_search_yields_nothing() {
		let response: SearchResponse = serde_json::from_str(
			r#"{"success": false, "message": "Error searching documents: boom", "results": []}"#,
		)
		.unwrap();
		assert!(response.into_results().is_empty());
		let empty: SearchResponse = serde_json::from_str("{}").unwrap();
		assert!(empty.into_results().is_empty());
	}

	#[test]
	fn request_body_uses_snake_case_keys() {
		let body = serde_json::to_value(SearchRequest {
			query: "graphs",
			top_k: 3,
		})
		.unwrap();
		assert_eq!(body, serde_json::json!({"query": "graphs", "top_k": 3}));
	}
}
