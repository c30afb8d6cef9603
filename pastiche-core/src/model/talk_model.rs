use log::info;

use crate::error::Error;
use crate::module::{ChatModule, IncomingMessage};
use crate::rng::seeded_rng;
use crate::tokenize::{Tokenizer, WordTokenizer};

use super::codec;
use super::corpus::CorpusStore;
use super::generator::SentenceGenerator;
use super::index::NgramIndex;

/// Default number of tokens a generated sentence may append.
const DEFAULT_MAX_TOKENS_PER_SENTENCE: usize = 20;

/// Default number of trailing input words used as sentence seeds.
const DEFAULT_SEED_TOKENS: usize = 5;

/// The pastiche language model: learns named texts, forgets them, and
/// generates replies in their style.
///
/// # Responsibilities
/// - Tokenize and case-fold submitted texts
/// - Keep the aggregate index equal to the sum of all per-text
///   contributions across learns and forgets
/// - Drive sentence generation and render readable replies
/// - Persist and restore the per-text count tables as text
///
/// Callers must serialize access to one instance; no internal locking is
/// provided and every operation runs to completion without yielding.
pub struct TalkModel {
	/// Highest n-gram order tracked by the model.
	n: usize,
	/// Aggregate counts over all learned texts.
	aggregate: NgramIndex,
	/// Isolated per-text counts, kept so a text can be forgotten exactly.
	corpus: CorpusStore,
	/// Splits raw text into word and punctuation tokens.
	tokenizer: Box<dyn Tokenizer>,
}

impl std::fmt::Debug for TalkModel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TalkModel")
			.field("n", &self.n)
			.field("aggregate", &self.aggregate)
			.field("corpus", &self.corpus)
			.field("tokenizer", &"<dyn Tokenizer>")
			.finish()
	}
}

impl TalkModel {
	/// Creates a model tracking n-grams of orders `1..=n`, tokenizing
	/// with the built-in [`WordTokenizer`].
	///
	/// # Errors
	/// [`Error::InvalidConfiguration`] if `n` is zero.
	pub fn new(n: usize) -> Result<Self, Error> {
		Self::with_tokenizer(n, Box::new(WordTokenizer))
	}

	/// Same as [`TalkModel::new`] with a caller-provided tokenizer.
	pub fn with_tokenizer(n: usize, tokenizer: Box<dyn Tokenizer>) -> Result<Self, Error> {
		if n == 0 {
			return Err(Error::InvalidConfiguration(
				"n-gram order must be at least 1".to_owned(),
			));
		}
		Ok(Self {
			n,
			aggregate: NgramIndex::new(),
			corpus: CorpusStore::new(),
			tokenizer,
		})
	}

	/// Highest n-gram order tracked by the model.
	pub fn order(&self) -> usize {
		self.n
	}

	/// Aggregate next-token counts across all learned texts.
	pub fn aggregate(&self) -> &NgramIndex {
		&self.aggregate
	}

	/// Ids of all currently learned texts, in no particular order.
	pub fn text_ids(&self) -> Vec<&str> {
		self.corpus.text_ids().collect()
	}

	/// Learns `text` under `text_id`.
	///
	/// The text is tokenized and case-folded, its n-gram counts are
	/// recorded as an isolated contribution, and the aggregate is
	/// updated in the same pass.
	///
	/// # Errors
	/// [`Error::DuplicateText`] if `text_id` was already learned.
	pub fn learn_text(&mut self, text_id: &str, text: &str) -> Result<(), Error> {
		if self.corpus.contains(text_id) {
			return Err(Error::DuplicateText(text_id.to_owned()));
		}

		let tokens: Vec<String> = self
			.tokenizer
			.tokenize(text)
			.iter()
			.map(|token| token.to_lowercase())
			.collect();

		let contribution = NgramIndex::from_tokens(self.n, &tokens);
		self.aggregate.merge(&contribution);
		self.corpus.insert(text_id, contribution)?;

		info!("learned text '{text_id}' ({} tokens)", tokens.len());
		Ok(())
	}

	/// Forgets the text learned under `text_id`.
	///
	/// Its contribution is dropped and the aggregate is rebuilt from the
	/// remaining texts, so the result is exactly as if the text had
	/// never been learned. Cost is linear in the remaining corpus size.
	///
	/// # Errors
	/// [`Error::TextNotFound`] if the id is unknown.
	pub fn forget_text(&mut self, text_id: &str) -> Result<(), Error> {
		self.corpus.remove(text_id)?;
		self.aggregate = self.corpus.aggregate();

		info!("forgot text '{text_id}'");
		Ok(())
	}

	/// Generates a pastiche reply to `text` with the default sentence
	/// length and seed counts and a non-deterministic draw.
	pub fn generate_reply(&self, text: &str) -> String {
		self.generate_text(text, DEFAULT_MAX_TOKENS_PER_SENTENCE, DEFAULT_SEED_TOKENS, None)
	}

	/// Generates one sentence per seed word taken from the end of
	/// `text`.
	///
	/// The last `n_seed_tokens` purely alphabetic tokens of `text` each
	/// seed one sentence of at most `max_tokens_per_sentence` appended
	/// tokens. Sentences are capitalized, concatenated, and respaced
	/// around punctuation. `seed` reseeds the random source so equal
	/// seeds reproduce equal replies; `None` draws non-deterministically.
	pub fn generate_text(
		&self,
		text: &str,
		max_tokens_per_sentence: usize,
		n_seed_tokens: usize,
		seed: Option<&str>,
	) -> String {
		let mut rng = seeded_rng(seed);
		let generator = SentenceGenerator::new(&self.aggregate, self.n);

		let seed_words: Vec<String> = {
			let alphabetic: Vec<String> = self
				.tokenizer
				.tokenize(text)
				.into_iter()
				.filter(|token| !token.is_empty() && token.chars().all(char::is_alphabetic))
				.collect();
			let skip = alphabetic.len().saturating_sub(n_seed_tokens);
			alphabetic.into_iter().skip(skip).collect()
		};

		let mut words: Vec<String> = Vec::new();
		for seed_word in &seed_words {
			let sentence = generator.generate_sentence(
				&[seed_word.to_lowercase()],
				max_tokens_per_sentence,
				&mut rng,
			);
			words.extend(capitalized(sentence));
		}

		respace_punctuation(&words.join(" "))
	}

	/// Writes the per-text count tables as a single text document.
	/// Storage I/O is the caller's responsibility.
	///
	/// # Errors
	/// [`Error::Format`] if the document cannot be rendered.
	pub fn serialize(&self) -> Result<String, Error> {
		codec::serialize(&self.corpus)
	}

	/// Replaces the model contents with a document produced by
	/// [`TalkModel::serialize`] and rebuilds the aggregate.
	///
	/// # Errors
	/// [`Error::Format`] on malformed input; the model is left untouched
	/// in that case.
	pub fn deserialize(&mut self, text: &str) -> Result<(), Error> {
		let corpus = codec::deserialize(text)?;
		self.aggregate = corpus.aggregate();
		self.corpus = corpus;

		info!("restored {} learned texts", self.corpus.len());
		Ok(())
	}
}

impl ChatModule for TalkModel {
	fn handle_message(&mut self, message: &dyn IncomingMessage) -> Result<String, Error> {
		let text = message
			.text()
			.ok_or_else(|| Error::InvalidConfiguration("message carries no text".to_owned()))?;
		Ok(self.generate_reply(text))
	}
}

/// Upper-cases the first character of the sentence's first word. The
/// rest of the sentence stays as the model produced it (lower case).
fn capitalized(mut sentence: Vec<String>) -> Vec<String> {
	if let Some(first) = sentence.first_mut() {
		let mut chars = first.chars();
		if let Some(c) = chars.next() {
			let upper: String = c.to_uppercase().chain(chars).collect();
			*first = upper;
		}
	}
	sentence
}

/// Removes the spaces the token join introduces around punctuation:
/// closing marks glue to the preceding word, opening marks to the next.
fn respace_punctuation(text: &str) -> String {
	let mut text = text.to_owned();
	for mark in ['!', '?', '.', ',', ':', ')', ']'] {
		text = text.replace(&format!(" {mark}"), &mark.to_string());
	}
	for mark in ['(', '['] {
		text = text.replace(&format!("{mark} "), &mark.to_string());
	}
	text
}

#[cfg(test)]
mod tests {
	use super::{capitalized, respace_punctuation};

	fn tokens(words: &[&str]) -> Vec<String> {
		words.iter().map(|word| (*word).to_owned()).collect()
	}

	#[test]
	fn capitalizes_only_the_first_word() {
		assert_eq!(capitalized(tokens(&["я", "люблю", "."])), tokens(&["Я", "люблю", "."]));
	}

	#[test]
	fn capitalized_handles_empty_sentences() {
		assert_eq!(capitalized(Vec::new()), Vec::<String>::new());
	}

	#[test]
	fn respacing_glues_punctuation_to_words() {
		assert_eq!(respace_punctuation("я люблю кошек ."), "я люблю кошек.");
		assert_eq!(respace_punctuation("так ( или нет ) ?"), "так (или нет)?");
		assert_eq!(respace_punctuation("ну ..."), "ну...");
	}
}
