use std::collections::HashMap;

use crate::error::Error;

use super::index::NgramIndex;

/// Per-text n-gram contributions.
///
/// Each learned text keeps its own isolated [`NgramIndex`], so its
/// counts can be removed exactly later, however much they overlap with
/// other texts.
///
/// # Lifecycle
/// An entry is created once by learn and lives until forget deletes it.
/// Duplicate ids and unknown ids are errors, never implicit overwrites.
#[derive(Debug, Default)]
pub struct CorpusStore {
	texts: HashMap<String, NgramIndex>,
}

impl CorpusStore {
	pub fn new() -> Self {
		Self { texts: HashMap::new() }
	}

	/// Records `contribution` under `text_id`.
	///
	/// # Errors
	/// [`Error::DuplicateText`] if the id is already present.
	pub fn insert(&mut self, text_id: &str, contribution: NgramIndex) -> Result<(), Error> {
		if self.texts.contains_key(text_id) {
			return Err(Error::DuplicateText(text_id.to_owned()));
		}
		self.texts.insert(text_id.to_owned(), contribution);
		Ok(())
	}

	/// Removes and returns the contribution recorded under `text_id`.
	///
	/// # Errors
	/// [`Error::TextNotFound`] if the id is unknown.
	pub fn remove(&mut self, text_id: &str) -> Result<NgramIndex, Error> {
		self.texts
			.remove(text_id)
			.ok_or_else(|| Error::TextNotFound(text_id.to_owned()))
	}

	/// Rebuilds the aggregate index by summing every contribution from
	/// scratch. Cost is linear in the total remaining corpus size.
	pub fn aggregate(&self) -> NgramIndex {
		let mut aggregate = NgramIndex::new();
		for contribution in self.texts.values() {
			aggregate.merge(contribution);
		}
		aggregate
	}

	/// The contribution recorded under `text_id`, if any.
	pub fn get(&self, text_id: &str) -> Option<&NgramIndex> {
		self.texts.get(text_id)
	}

	pub fn contains(&self, text_id: &str) -> bool {
		self.texts.contains_key(text_id)
	}

	/// Ids of all learned texts, in no particular order.
	pub fn text_ids(&self) -> impl Iterator<Item = &str> {
		self.texts.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.texts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.texts.is_empty()
	}

	pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &NgramIndex)> {
		self.texts.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::CorpusStore;
	use crate::error::Error;
	use crate::model::index::NgramIndex;
	use crate::model::ngram::Ngram;

	fn tokens(words: &[&str]) -> Vec<String> {
		words.iter().map(|word| (*word).to_owned()).collect()
	}

	#[test]
	fn rejects_duplicate_text_ids() {
		let mut store = CorpusStore::new();
		store.insert("first", NgramIndex::new()).unwrap();

		match store.insert("first", NgramIndex::new()) {
			Err(Error::DuplicateText(id)) => assert_eq!(id, "first"),
			other => panic!("expected DuplicateText, got {other:?}"),
		}
	}

	#[test]
	fn rejects_removal_of_unknown_id() {
		let mut store = CorpusStore::new();
		match store.remove("third") {
			Err(Error::TextNotFound(id)) => assert_eq!(id, "third"),
			other => panic!("expected TextNotFound, got {other:?}"),
		}
	}

	#[test]
	fn aggregate_is_the_sum_of_contributions() {
		let mut store = CorpusStore::new();
		store.insert("first", NgramIndex::from_tokens(2, &tokens(&["a", "b"]))).unwrap();
		store.insert("second", NgramIndex::from_tokens(2, &tokens(&["a", "b", "c"]))).unwrap();

		let aggregate = store.aggregate();
		let a = Ngram::new(tokens(&["a"]));
		assert_eq!(aggregate.counts(&a).unwrap()["b"], 2);
	}

	#[test]
	fn removal_leaves_other_contributions_intact() {
		let mut store = CorpusStore::new();
		store.insert("first", NgramIndex::from_tokens(2, &tokens(&["a", "b"]))).unwrap();
		store.insert("second", NgramIndex::from_tokens(2, &tokens(&["a", "c"]))).unwrap();

		store.remove("first").unwrap();

		let aggregate = store.aggregate();
		let a = Ngram::new(tokens(&["a"]));
		assert_eq!(aggregate.counts(&a).unwrap().get("b"), None);
		assert_eq!(aggregate.counts(&a).unwrap()["c"], 1);
	}
}
