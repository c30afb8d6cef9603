use std::hash::{DefaultHasher, Hash, Hasher};

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Builds the random source behind generation and assignment draws.
///
/// - `Some(seed)`: the seed string is hashed into a [`StdRng`] seed, so
///   repeated calls with the same seed reproduce the same draws.
/// - `None`: the rng is forked from the thread-local generator and the
///   draws are non-deterministic.
pub(crate) fn seeded_rng(seed: Option<&str>) -> StdRng {
	match seed {
		Some(seed) => {
			let mut hasher = DefaultHasher::new();
			seed.hash(&mut hasher);
			StdRng::seed_from_u64(hasher.finish())
		}
		None => StdRng::from_rng(&mut rand::rng()),
	}
}
