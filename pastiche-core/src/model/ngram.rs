use crate::error::Error;

/// An ordered sequence of 1 to N case-folded tokens, used as the lookup
/// key for next-token prediction.
///
/// N-grams of every order from 1 to the model's N are tracked
/// simultaneously, so keys of different lengths coexist in one index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ngram(Vec<String>);

impl Ngram {
	pub fn new(tokens: Vec<String>) -> Self {
		Self(tokens)
	}

	pub fn tokens(&self) -> &[String] {
		&self.0
	}

	/// Encodes the n-gram for the persisted model document.
	///
	/// Each token is written as its decimal character count, a `#`
	/// separator, then the token itself, with nothing between tokens.
	/// Length-prefixing alone disambiguates token boundaries, so tokens
	/// may themselves contain digits, quotes or `#`.
	pub fn encode(&self) -> String {
		self.0
			.iter()
			.map(|token| format!("{}#{}", token.chars().count(), token))
			.collect()
	}

	/// Decodes an n-gram written by [`Ngram::encode`].
	///
	/// # Errors
	/// Returns [`Error::Format`] on a non-digit where a length is
	/// expected, a length with no `#` separator, or a truncated token.
	pub fn decode(serialized: &str) -> Result<Self, Error> {
		let chars: Vec<char> = serialized.chars().collect();
		let mut tokens = Vec::new();
		let mut i = 0;

		while i < chars.len() {
			let digits_start = i;
			while i < chars.len() && chars[i] != '#' {
				if !chars[i].is_ascii_digit() {
					return Err(Error::Format(format!(
						"expected a digit at position {i} of '{serialized}', got '{}'",
						chars[i]
					)));
				}
				i += 1;
			}
			if i == chars.len() {
				return Err(Error::Format(format!(
					"unterminated token length in '{serialized}'"
				)));
			}

			let length: usize = chars[digits_start..i]
				.iter()
				.collect::<String>()
				.parse()
				.map_err(|_| Error::Format(format!("invalid token length in '{serialized}'")))?;

			i += 1; // skip the separator
			if i + length > chars.len() {
				return Err(Error::Format(format!("truncated token in '{serialized}'")));
			}
			tokens.push(chars[i..i + length].iter().collect());
			i += length;
		}

		Ok(Self(tokens))
	}
}

#[cfg(test)]
mod tests {
	use super::Ngram;
	use crate::error::Error;

	fn ngram(tokens: &[&str]) -> Ngram {
		Ngram::new(tokens.iter().map(|token| (*token).to_owned()).collect())
	}

	#[test]
	fn round_trips_tokens_containing_delimiters() {
		let original = ngram(&["abc", "a#a", "a,a,a", "\"aaa\"", "\"r#r\"", "42", "#a"]);
		assert_eq!(Ngram::decode(&original.encode()).unwrap(), original);
	}

	#[test]
	fn round_trips_multibyte_tokens() {
		let original = ngram(&["я", "люблю", "..."]);
		assert_eq!(Ngram::decode(&original.encode()).unwrap(), original);
	}

	#[test]
	fn encodes_character_counts_not_byte_counts() {
		assert_eq!(ngram(&["её"]).encode(), "2#её");
	}

	#[test]
	fn rejects_non_digit_length() {
		assert!(matches!(Ngram::decode("a#b"), Err(Error::Format(_))));
	}

	#[test]
	fn rejects_unterminated_length() {
		assert!(matches!(Ngram::decode("12"), Err(Error::Format(_))));
	}

	#[test]
	fn rejects_truncated_token() {
		assert!(matches!(Ngram::decode("5#ab"), Err(Error::Format(_))));
	}

	#[test]
	fn rejects_empty_length() {
		assert!(matches!(Ngram::decode("#ab"), Err(Error::Format(_))));
	}
}
