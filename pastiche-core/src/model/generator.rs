use rand::Rng;

use super::index::NgramIndex;
use super::ngram::Ngram;

/// Tokens that close a sentence during generation.
pub const SENTENCE_ENDINGS: [&str; 4] = [".", "?", "!", "..."];

/// Returns true for tokens that end a sentence.
pub fn is_sentence_ending(token: &str) -> bool {
	SENTENCE_ENDINGS.contains(&token)
}

/// Extends a seed into a full sentence against an aggregate
/// [`NgramIndex`].
///
/// # Responsibilities
/// - Longest-context-first n-gram lookup with order fallback
/// - Weighted random choice of every next token
/// - Sentence termination (terminator tokens, length cap)
pub struct SentenceGenerator<'a> {
	index: &'a NgramIndex,
	n: usize,
}

impl<'a> SentenceGenerator<'a> {
	pub fn new(index: &'a NgramIndex, n: usize) -> Self {
		Self { index, n }
	}

	/// Picks the n-gram context to extend `words` with.
	///
	/// Tail orders `n` down to 1 are tried against the index and the
	/// first match wins; a tail shorter than the order is used whole.
	/// When no order matches, the single-token terminator n-gram `"."`
	/// is the context, so generation restarts at a sentence boundary.
	/// That key may itself be absent; the caller stops in that case.
	fn lookup_context(&self, words: &[String]) -> Ngram {
		for k in (1..=self.n).rev() {
			let tail = &words[words.len().saturating_sub(k)..];
			let ngram = Ngram::new(tail.to_vec());
			if self.index.contains(&ngram) {
				return ngram;
			}
		}
		Ngram::new(vec![".".to_owned()])
	}

	/// Generates one sentence from `seed_words`.
	///
	/// Repeatedly samples a next token for the current tail until a
	/// sentence terminator is drawn, the index offers no continuation,
	/// or `max_tokens` tokens have been appended. The result always
	/// ends with a sentence terminator: a literal "." is appended when
	/// generation stopped on anything else.
	///
	/// Seed words must be case-folded already.
	pub fn generate_sentence<R: Rng>(
		&self,
		seed_words: &[String],
		max_tokens: usize,
		rng: &mut R,
	) -> Vec<String> {
		let mut words: Vec<String> = seed_words.to_vec();

		for _ in 0..max_tokens {
			let context = self.lookup_context(&words);

			let Some(state) = self.index.state(&context) else {
				break;
			};
			let Some(next_token) = state.sample(rng) else {
				break;
			};

			let next_token = next_token.to_owned();
			let ends_sentence = is_sentence_ending(&next_token);
			words.push(next_token);
			if ends_sentence {
				break;
			}
		}

		if !words.last().is_some_and(|token| is_sentence_ending(token)) {
			words.push(".".to_owned());
		}

		words
	}
}

#[cfg(test)]
mod tests {
	use super::SentenceGenerator;
	use crate::model::index::NgramIndex;

	fn tokens(words: &[&str]) -> Vec<String> {
		words.iter().map(|word| (*word).to_owned()).collect()
	}

	#[test]
	fn never_appends_more_than_max_tokens() {
		// "a" always continues with "a", so only the cap stops the loop
		let index = NgramIndex::from_tokens(1, &tokens(&["a", "a", "a"]));
		let generator = SentenceGenerator::new(&index, 1);

		let sentence = generator.generate_sentence(&tokens(&["a"]), 5, &mut rand::rng());
		// seed + at most 5 appended + the closing "."
		assert!(sentence.len() <= 7);
		assert_eq!(sentence.last().unwrap(), ".");
	}

	#[test]
	fn unknown_context_falls_back_to_the_terminator_ngram() {
		let index = NgramIndex::from_tokens(2, &tokens(&[".", "и"]));
		let generator = SentenceGenerator::new(&index, 2);

		let sentence = generator.generate_sentence(&tokens(&["неизвестно"]), 1, &mut rand::rng());
		assert_eq!(sentence[1], "и");
	}

	#[test]
	fn empty_index_keeps_the_seed_and_terminates_it() {
		let index = NgramIndex::new();
		let generator = SentenceGenerator::new(&index, 3);

		let sentence = generator.generate_sentence(&tokens(&["seed"]), 10, &mut rand::rng());
		assert_eq!(sentence, tokens(&["seed", "."]));
	}

	#[test]
	fn terminator_seed_is_not_doubled() {
		let index = NgramIndex::new();
		let generator = SentenceGenerator::new(&index, 2);

		let sentence = generator.generate_sentence(&tokens(&["!"]), 10, &mut rand::rng());
		assert_eq!(sentence, tokens(&["!"]));
	}

	#[test]
	fn longest_context_wins() {
		// ("b",) -> "x" and ("a", "b") -> "y": the order-2 context must win
		let mut index = NgramIndex::from_tokens(2, &tokens(&["a", "b", "y"]));
		index.merge(&NgramIndex::from_tokens(1, &tokens(&["b", "x"])));
		let generator = SentenceGenerator::new(&index, 2);

		let sentence = generator.generate_sentence(&tokens(&["a", "b"]), 1, &mut rand::rng());
		assert_eq!(sentence[2], "y");
	}
}
