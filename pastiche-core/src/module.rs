use std::path::Path;

use crate::error::Error;

/// Narrow view over an incoming chat message.
///
/// The transport layer (whatever it is) adapts its own message type to
/// this trait, so feature modules never touch transport objects.
pub trait IncomingMessage {
	/// Plain text content, if any.
	fn text(&self) -> Option<&str>;

	/// Local path of a document attached to the message, if any.
	/// Downloading is the transport's responsibility.
	fn document(&self) -> Option<&Path>;

	/// Identifier of the sending user, if known.
	fn sender(&self) -> Option<&str>;
}

/// A feature module that answers chat messages.
pub trait ChatModule {
	/// Produces the reply to `message`.
	///
	/// # Errors
	/// Returns an error when the message cannot be handled; how it is
	/// reported back to the user is the dispatch layer's decision.
	fn handle_message(&mut self, message: &dyn IncomingMessage) -> Result<String, Error>;
}
