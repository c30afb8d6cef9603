use std::collections::HashMap;

use log::info;
use rand::seq::SliceRandom;

use crate::error::Error;
use crate::module::{ChatModule, IncomingMessage};
use crate::rng::seeded_rng;

/// Attempt cap before a constraint set is declared infeasible.
pub const MAX_ATTEMPTS: usize = 100;

/// Draws a gift assignment: a bijection over `names` with no fixed point
/// and no pair from `forbidden_pairs`.
///
/// Rejection sampling: receivers are a shuffled copy of `names`, paired
/// positionally with senders; the whole attempt is abandoned on the
/// first fixed point or forbidden pair and a fresh shuffle starts.
/// `seed` makes the draw reproducible.
///
/// # Errors
/// [`Error::AttemptsExhausted`] after [`MAX_ATTEMPTS`] rejected
/// attempts, which usually means the constraints are infeasible (two
/// participants whose only pairing is forbidden, for example).
pub fn generate_permutation(
	names: &[String],
	forbidden_pairs: &[(String, String)],
	seed: Option<&str>,
) -> Result<HashMap<String, String>, Error> {
	let mut rng = seeded_rng(seed);

	for _ in 0..MAX_ATTEMPTS {
		let mut receivers = names.to_vec();
		receivers.shuffle(&mut rng);

		let mut permutation = HashMap::new();
		for (sender, receiver) in names.iter().zip(&receivers) {
			let forbidden = forbidden_pairs
				.iter()
				.any(|(from, to)| from == sender && to == receiver);
			if sender == receiver || forbidden {
				break;
			}
			permutation.insert(sender.clone(), receiver.clone());
		}

		if permutation.len() == names.len() {
			return Ok(permutation);
		}
	}

	Err(Error::AttemptsExhausted(MAX_ATTEMPTS))
}

/// Chat module holding the Secret Santa state.
///
/// Keeps the participant list, the forbidden pairs and the last drawn
/// assignment. Every draw recomputes the permutation wholesale; there is
/// no incremental mutation.
#[derive(Debug, Default)]
pub struct SantaModule {
	usernames: Option<Vec<String>>,
	forbidden_pairs: Vec<(String, String)>,
	permutation: Option<HashMap<String, String>>,
}

impl SantaModule {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the participants and forbidden pairs, discarding any
	/// previous draw.
	pub fn initialize(&mut self, usernames: Vec<String>, forbidden_pairs: Vec<(String, String)>) {
		self.usernames = Some(usernames);
		self.forbidden_pairs = forbidden_pairs;
		self.permutation = None;
	}

	/// Parses the submission format:
	///
	/// ```text
	/// login1,login2,login3,login4
	/// login1,login2
	/// login2,login1
	/// ```
	///
	/// The first non-empty line lists the participants; every further
	/// non-empty line is one forbidden (sender, receiver) pair. Spaces
	/// are ignored everywhere.
	///
	/// # Errors
	/// [`Error::InvalidConfiguration`] naming the offending line when a
	/// pair line does not hold exactly two logins, or when no
	/// participant line is present.
	pub fn initialize_from_str(&mut self, s: &str) -> Result<(), Error> {
		let spaceless = s.replace(' ', "");
		let lines: Vec<&str> = spaceless.split('\n').filter(|line| !line.is_empty()).collect();
		let Some((first, rest)) = lines.split_first() else {
			return Err(Error::InvalidConfiguration(
				"no participant line found".to_owned(),
			));
		};

		let usernames: Vec<String> = first.split(',').map(str::to_owned).collect();

		let mut forbidden_pairs = Vec::new();
		for line in rest {
			let pair: Vec<&str> = line.split(',').collect();
			if pair.len() != 2 {
				return Err(Error::InvalidConfiguration(format!(
					"'{line}' contains {} logins, should be 2",
					pair.len()
				)));
			}
			forbidden_pairs.push((pair[0].to_owned(), pair[1].to_owned()));
		}

		self.initialize(usernames, forbidden_pairs);
		Ok(())
	}

	/// Draws a fresh assignment over the current participants.
	///
	/// # Errors
	/// [`Error::InvalidConfiguration`] when called before
	/// [`SantaModule::initialize`]; [`Error::AttemptsExhausted`] when
	/// the constraints turn out infeasible.
	pub fn draw(&mut self, seed: Option<&str>) -> Result<(), Error> {
		let Some(usernames) = &self.usernames else {
			return Err(Error::InvalidConfiguration(
				"participant list is not initialized".to_owned(),
			));
		};

		let permutation = generate_permutation(usernames, &self.forbidden_pairs, seed)?;
		info!("drew assignments for {} participants", permutation.len());
		self.permutation = Some(permutation);
		Ok(())
	}

	/// The last drawn assignment, if any.
	pub fn permutation(&self) -> Option<&HashMap<String, String>> {
		self.permutation.as_ref()
	}

	/// Receiver assigned to `name` in the last draw.
	pub fn assignment_for(&self, name: &str) -> Option<&str> {
		self.permutation.as_ref()?.get(name).map(String::as_str)
	}

	/// Current participants, if initialized.
	pub fn usernames(&self) -> Option<&[String]> {
		self.usernames.as_deref()
	}

	/// Current forbidden (sender, receiver) pairs.
	pub fn forbidden_pairs(&self) -> &[(String, String)] {
		&self.forbidden_pairs
	}
}

impl ChatModule for SantaModule {
	/// Answers the sender with their assignment from the last draw.
	fn handle_message(&mut self, message: &dyn IncomingMessage) -> Result<String, Error> {
		let Some(permutation) = &self.permutation else {
			return Ok("No assignments drawn yet, ask for a draw first!".to_owned());
		};

		let Some(sender) = message.sender() else {
			return Err(Error::InvalidConfiguration(
				"message carries no sender".to_owned(),
			));
		};

		match permutation.get(sender) {
			Some(receiver) => Ok(format!("{sender}, you give your gift to @{receiver}!")),
			None => Ok(format!("Your username {sender} is not part of the draw, sorry!")),
		}
	}
}
