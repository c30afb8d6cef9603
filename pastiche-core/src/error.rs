use thiserror::Error;

/// Error kinds surfaced by the pastiche core.
///
/// Every failure is raised synchronously to the immediate caller and
/// carries the offending id or substring, so the embedding bot can build
/// a diagnostic message. Nothing is retried internally.
#[derive(Error, Debug)]
pub enum Error {
	/// A text with this id has already been learned. Texts are
	/// write-once; relearning under the same id is rejected.
	#[error("text id '{0}' already exists")]
	DuplicateText(String),

	/// No learned text carries this id.
	#[error("there is no text with id '{0}'")]
	TextNotFound(String),

	/// Serialized model data could not be decoded.
	#[error("malformed model data: {0}")]
	Format(String),

	/// No valid gift assignment was found within the attempt cap.
	#[error("max {0} attempts reached, couldn't generate a permutation")]
	AttemptsExhausted(usize),

	/// An operation was invoked with missing or malformed configuration.
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),
}
