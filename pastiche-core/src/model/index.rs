use std::collections::HashMap;

use super::ngram::Ngram;
use super::state::State;

/// Next-token frequency counts for n-grams of orders `1..=n`.
///
/// One index holds either a single text's contribution or the aggregate
/// over all learned texts; both are built and merged the same way.
///
/// # Responsibilities
/// - Extract n-grams of every order from a token sequence
/// - Resolve an n-gram to its observed next tokens during generation
/// - Merge with other indices (contribution aggregation)
///
/// # Invariants
/// - Every stored state has at least one transition
/// - The aggregate index equals the entry-wise sum of the per-text
///   indices it was merged from
#[derive(Clone, Debug)]
pub struct NgramIndex {
	/// Mapping from an n-gram to its observed next tokens.
	states: HashMap<Ngram, State>,
}

impl NgramIndex {
	pub fn new() -> Self {
		Self { states: HashMap::new() }
	}

	/// Builds the index for one token sequence.
	///
	/// A sliding window keeps up to `n` previously seen tokens; every new
	/// token increments the count of each window suffix (orders 1 up to
	/// the window length) toward itself, so a single token updates up to
	/// `n` distinct n-gram entries. Tokens must be case-folded already.
	pub fn from_tokens(n: usize, tokens: &[String]) -> Self {
		let mut index = Self::new();
		let mut window: Vec<String> = Vec::new();

		for next_token in tokens {
			for k in 1..=window.len() {
				let ngram = Ngram::new(window[window.len() - k..].to_vec());
				index.observe(ngram, next_token);
			}

			window.push(next_token.clone());
			if window.len() > n {
				window.remove(0);
			}
		}

		index
	}

	/// Records one observation of `next_token` after `ngram`.
	pub fn observe(&mut self, ngram: Ngram, next_token: &str) {
		self.states.entry(ngram).or_insert_with(State::new).add_transition(next_token);
	}

	/// Records `occurrences` observations at once. Used when restoring a
	/// persisted model.
	pub(crate) fn observe_many(&mut self, ngram: Ngram, next_token: &str, occurrences: usize) {
		self.states
			.entry(ngram)
			.or_insert_with(State::new)
			.add_transitions(next_token, occurrences);
	}

	/// Resolves an n-gram to its state, if it was ever observed.
	pub(crate) fn state(&self, ngram: &Ngram) -> Option<&State> {
		self.states.get(ngram)
	}

	/// Next-token counts recorded for `ngram`.
	pub fn counts(&self, ngram: &Ngram) -> Option<&HashMap<String, usize>> {
		self.states.get(ngram).map(State::transitions)
	}

	/// Returns true if `ngram` has at least one recorded transition.
	pub fn contains(&self, ngram: &Ngram) -> bool {
		self.states.contains_key(ngram)
	}

	/// Number of distinct n-grams in the index.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	pub(crate) fn iter(&self) -> impl Iterator<Item = (&Ngram, &State)> {
		self.states.iter()
	}

	/// Merges another index into this one. Counts for matching n-grams
	/// and transitions are summed.
	pub fn merge(&mut self, other: &Self) {
		for (ngram, state) in &other.states {
			if let Some(existing) = self.states.get_mut(ngram) {
				existing.merge(state);
			} else {
				self.states.insert(ngram.clone(), state.clone());
			}
		}
	}
}

impl Default for NgramIndex {
	fn default() -> Self {
		Self::new()
	}
}
