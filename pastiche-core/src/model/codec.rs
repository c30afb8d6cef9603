//! Text encoding of the per-text n-gram count tables.
//!
//! The persisted form is a single JSON document mapping text id →
//! encoded n-gram → next token → count. N-gram keys use the
//! length-prefixed encoding from [`Ngram::encode`], so tokens containing
//! digits, quotes or the separator round-trip exactly. The aggregate
//! index is never persisted; it is rebuilt from the contributions on
//! restore.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::corpus::CorpusStore;
use super::index::NgramIndex;
use super::ngram::Ngram;

/// On-disk shape of the model: text id → encoded n-gram → next token →
/// count. `BTreeMap`s keep the rendered document stable across runs.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct CorpusDocument(BTreeMap<String, BTreeMap<String, BTreeMap<String, usize>>>);

/// Renders every per-text contribution as one text document.
pub(crate) fn serialize(corpus: &CorpusStore) -> Result<String, Error> {
	let mut document = CorpusDocument(BTreeMap::new());

	for (text_id, contribution) in corpus.iter() {
		let entries = document.0.entry(text_id.clone()).or_default();
		for (ngram, state) in contribution.iter() {
			let counts = entries.entry(ngram.encode()).or_default();
			for (next_token, occurrences) in state.transitions() {
				counts.insert(next_token.clone(), *occurrences);
			}
		}
	}

	serde_json::to_string(&document).map_err(|error| Error::Format(error.to_string()))
}

/// Parses a document produced by [`serialize`] back into per-text
/// tables.
///
/// # Errors
/// [`Error::Format`] on an unparseable document, a malformed n-gram key
/// or a zero occurrence count.
pub(crate) fn deserialize(text: &str) -> Result<CorpusStore, Error> {
	let document: CorpusDocument =
		serde_json::from_str(text).map_err(|error| Error::Format(error.to_string()))?;

	let mut corpus = CorpusStore::new();
	for (text_id, entries) in document.0 {
		let mut contribution = NgramIndex::new();
		for (encoded, counts) in entries {
			let ngram = Ngram::decode(&encoded)?;
			for (next_token, occurrences) in counts {
				if occurrences == 0 {
					return Err(Error::Format(format!(
						"zero count for '{next_token}' after '{encoded}'"
					)));
				}
				contribution.observe_many(ngram.clone(), &next_token, occurrences);
			}
		}
		corpus.insert(&text_id, contribution)?;
	}

	Ok(corpus)
}

#[cfg(test)]
mod tests {
	use super::{deserialize, serialize};
	use crate::error::Error;
	use crate::model::corpus::CorpusStore;
	use crate::model::index::NgramIndex;
	use crate::model::ngram::Ngram;

	fn tokens(words: &[&str]) -> Vec<String> {
		words.iter().map(|word| (*word).to_owned()).collect()
	}

	#[test]
	fn round_trips_per_text_counts() {
		let mut corpus = CorpusStore::new();
		corpus.insert("first", NgramIndex::from_tokens(2, &tokens(&["я", "люблю", "кошек", "."]))).unwrap();
		corpus.insert("second", NgramIndex::from_tokens(2, &tokens(&["я", "люблю", "гулять", "."]))).unwrap();

		let restored = deserialize(&serialize(&corpus).unwrap()).unwrap();

		assert_eq!(restored.len(), 2);
		let aggregate = restored.aggregate();
		let ya = Ngram::new(tokens(&["я"]));
		assert_eq!(aggregate.counts(&ya).unwrap()["люблю"], 2);
		assert_eq!(aggregate.len(), corpus.aggregate().len());
	}

	#[test]
	fn round_trips_tokens_containing_the_delimiters() {
		let mut corpus = CorpusStore::new();
		corpus.insert("tricky", NgramIndex::from_tokens(2, &tokens(&["a#a", "\"r#r\"", "42"]))).unwrap();

		let restored = deserialize(&serialize(&corpus).unwrap()).unwrap();

		let key = Ngram::new(tokens(&["a#a", "\"r#r\""]));
		assert_eq!(restored.aggregate().counts(&key).unwrap()["42"], 1);
	}

	#[test]
	fn rejects_unparseable_documents() {
		assert!(matches!(deserialize("not a document"), Err(Error::Format(_))));
	}

	#[test]
	fn rejects_malformed_ngram_keys() {
		let document = r#"{"first": {"x#y": {"a": 1}}}"#;
		assert!(matches!(deserialize(document), Err(Error::Format(_))));
	}

	#[test]
	fn rejects_zero_counts() {
		let document = r#"{"first": {"1#a": {"b": 0}}}"#;
		assert!(matches!(deserialize(document), Err(Error::Format(_))));
	}
}
