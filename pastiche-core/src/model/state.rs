use std::collections::HashMap;

use rand::Rng;

/// Outgoing transitions of a single n-gram.
///
/// A `State` is a node in the Markov chain: for one n-gram it stores how
/// many times each next token was observed after it.
///
/// ## Responsibilities
/// - Accumulate next-token occurrences during learning
/// - Pick a next token using weighted random sampling
/// - Merge with the same n-gram's state from another contribution
///
/// ## Invariants
/// - Each occurrence count is strictly positive
#[derive(Clone, Debug)]
pub struct State {
	/// Occurrence counts indexed by the next token.
	/// Example: { "люблю" => 2, "гулять" => 1 }
	transitions: HashMap<String, usize>,
}

impl State {
	pub fn new() -> Self {
		Self { transitions: HashMap::new() }
	}

	/// Records a single observation of a transition toward `next_token`.
	pub fn add_transition(&mut self, next_token: &str) {
		self.add_transitions(next_token, 1);
	}

	/// Records `occurrences` observations at once. Used when restoring a
	/// persisted model, where whole counts arrive per transition.
	pub fn add_transitions(&mut self, next_token: &str, occurrences: usize) {
		*self.transitions.entry(next_token.to_owned()).or_insert(0) += occurrences;
	}

	/// Occurrence counts per next token.
	pub fn transitions(&self) -> &HashMap<String, usize> {
		&self.transitions
	}

	/// Picks the next token using weighted random sampling.
	///
	/// The probability of selecting a token is proportional to its
	/// occurrence count. This is an O(n) scan with a cumulative
	/// subtraction to select a bucket.
	///
	/// Returns `None` if the state has no transitions.
	pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<&str> {
		if self.transitions.is_empty() {
			return None;
		}

		let total: usize = self.transitions.values().sum();
		if total == 0 {
			// Should not happen due to invariants, but kept for safety
			return None;
		}

		let mut r = rng.random_range(0..total);

		let mut fallback: Option<&str> = None;
		for (next_token, occurrence) in &self.transitions {
			if r < *occurrence {
				return Some(next_token);
			}
			r -= occurrence;
			fallback = Some(next_token);
		}

		// Fallback: should not happen, but kept for safety.
		fallback
	}

	/// Merges another state for the same n-gram into this one.
	/// Occurrence counts are summed.
	pub fn merge(&mut self, other: &Self) {
		for (next_token, occurrence) in &other.transitions {
			*self.transitions.entry(next_token.clone()).or_insert(0) += *occurrence;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::State;

	#[test]
	fn singleton_transition_is_always_sampled() {
		let mut state = State::new();
		state.add_transition("a");

		let mut rng = rand::rng();
		for _ in 0..32 {
			assert_eq!(state.sample(&mut rng), Some("a"));
		}
	}

	#[test]
	fn every_positive_weight_is_reachable() {
		let mut state = State::new();
		state.add_transition("a");
		state.add_transitions("b", 3);

		let mut rng = rand::rng();
		let mut seen_a = false;
		let mut seen_b = false;
		for _ in 0..200 {
			match state.sample(&mut rng) {
				Some("a") => seen_a = true,
				Some("b") => seen_b = true,
				other => panic!("unexpected sample {other:?}"),
			}
		}
		assert!(seen_a && seen_b);
	}

	#[test]
	fn empty_state_samples_nothing() {
		assert_eq!(State::new().sample(&mut rand::rng()), None);
	}

	#[test]
	fn merge_sums_occurrence_counts() {
		let mut first = State::new();
		first.add_transition("a");
		first.add_transition("b");

		let mut second = State::new();
		second.add_transitions("b", 2);
		second.add_transition("c");

		first.merge(&second);
		assert_eq!(first.transitions()["a"], 1);
		assert_eq!(first.transitions()["b"], 3);
		assert_eq!(first.transitions()["c"], 1);
	}
}
