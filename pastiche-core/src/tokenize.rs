/// Splits raw natural-language text into word and punctuation tokens.
///
/// Implementations split on whitespace and emit punctuation marks as
/// standalone tokens. Case-folding is NOT the tokenizer's job; the model
/// folds tokens itself at learn and generation time.
pub trait Tokenizer {
	fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Naive whitespace-and-punctuation tokenizer.
///
/// Words are maximal runs of alphanumeric characters; anything else that
/// is not whitespace becomes its own token. Runs of the same punctuation
/// mark stay together, so an ellipsis survives as a single "..." token.
///
/// This is a reference implementation, good enough for the model's
/// behavior; a proper NLP tokenizer can be plugged in through the
/// [`Tokenizer`] trait.
#[derive(Clone, Copy, Debug, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
	fn tokenize(&self, text: &str) -> Vec<String> {
		let mut tokens: Vec<String> = Vec::new();
		let mut current = String::new();

		for c in text.chars() {
			if c.is_whitespace() {
				if !current.is_empty() {
					tokens.push(std::mem::take(&mut current));
				}
				continue;
			}

			let breaks_run = if c.is_alphanumeric() {
				current.chars().next_back().is_some_and(|last| !last.is_alphanumeric())
			} else {
				// A punctuation mark only continues a run of the same mark
				current.chars().next_back().is_some_and(|last| last != c)
			};
			if breaks_run {
				tokens.push(std::mem::take(&mut current));
			}
			current.push(c);
		}

		if !current.is_empty() {
			tokens.push(current);
		}

		tokens
	}
}

#[cfg(test)]
mod tests {
	use super::{Tokenizer, WordTokenizer};

	fn tokenize(text: &str) -> Vec<String> {
		WordTokenizer.tokenize(text)
	}

	#[test]
	fn splits_words_and_punctuation() {
		assert_eq!(tokenize("Я люблю кошек. И её."), ["Я", "люблю", "кошек", ".", "И", "её", "."]);
	}

	#[test]
	fn keeps_an_ellipsis_whole() {
		assert_eq!(tokenize("ну... ладно"), ["ну", "...", "ладно"]);
	}

	#[test]
	fn separates_mixed_punctuation_runs() {
		assert_eq!(tokenize("что?!"), ["что", "?", "!"]);
	}

	#[test]
	fn ignores_extra_whitespace() {
		assert_eq!(tokenize("  a \n b\t"), ["a", "b"]);
	}

	#[test]
	fn empty_input_yields_no_tokens() {
		assert!(tokenize("").is_empty());
	}
}
