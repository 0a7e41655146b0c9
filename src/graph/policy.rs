//! Decides whether two nodes are connected and how the edge looks.

/// Mean similarity a pair must exceed (in magnitude) to be connected.
pub const SIMILARITY_THRESHOLD: f64 = 0.01;

/// Thinnest stroke drawn for any edge.
const MIN_WEIGHT: f64 = 2.0;

/// Visual description of a connection between two nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStrength {
	/// Arithmetic mean of the two similarity scores.
	pub mean: f64,
}

impl EdgeStrength {
	/// Mean rendered as a percentage with one decimal.
	pub fn label(&self) -> String {
		format!("{:.1}%", self.mean * 100.0)
	}

	/// Stroke width: eight times the mean, never below 2.
	pub fn visual_weight(&self) -> f64 {
		(self.mean * 8.0).max(MIN_WEIGHT)
	}

	/// Stroke hue in degrees.
	pub fn hue(&self) -> f64 {
		200.0 + self.mean * 60.0
	}
}

/// Edge between nodes scoring `a` and `b`, if their mean clears the threshold.
///
/// Symmetric in its arguments.
pub fn edge_policy(a: f64, b: f64) -> Option<EdgeStrength> {
	let mean = (a + b) / 2.0;
	(mean.abs() > SIMILARITY_THRESHOLD).then_some(EdgeStrength { mean })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn high_scores_connect() {
		let strength = edge_policy(0.9, 0.9).unwrap();
		assert_eq!(strength.label(), "90.0%");
		assert!((strength.visual_weight() - 7.2).abs() < 1e-9);
	}

	#[test]
	fn threshold_is_exclusive() {
		assert!(edge_policy(0.01, 0.01).is_none());
		assert!(edge_policy(0.0, 0.02).is_none());
		assert!(edge_policy(0.005, 0.005).is_none());
		assert!(edge_policy(0.011, 0.011).is_some());
	}

	#[test]
	fn large_negative_means_still_connect() {
		let strength = edge_policy(-0.4, -0.2).unwrap();
		assert_eq!(strength.label(), "-30.0%");
		assert_eq!(strength.visual_weight(), MIN_WEIGHT);
	}

	#[test]
	fn weight_is_clamped_and_symmetric() {
		assert_eq!(edge_policy(0.2, 0.1).unwrap().visual_weight(), MIN_WEIGHT);
		assert_eq!(edge_policy(0.3, 0.8), edge_policy(0.8, 0.3));
	}
}
