//! Pseudonymous sender names.

use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Animals used for the anonymous sender, after Google Drive's
/// "Anonymous [Animal]" viewers.
pub const ANIMALS: &[&str] = &[
    "Alligator", "Anteater", "Armadillo", "Auroch", "Axolotl", "Badger", "Bat", "Beaver", "Buffalo",
    "Camel", "Chameleon", "Cheetah", "Chipmunk", "Chinchilla", "Chupacabra", "Cormorant", "Coyote",
    "Crow", "Dingo", "Dinosaur", "Dolphin", "Duck", "Elephant", "Ferret", "Fox", "Frog", "Giraffe",
    "Gopher", "Grizzly", "Hedgehog", "Hippo", "Hyena", "Jackal", "Ibex", "Ifrit", "Iguana", "Koala",
    "Kraken", "Lemur", "Leopard", "Liger", "Llama", "Manatee", "Mink", "Monkey", "Narwhal", "Nyan Cat",
    "Orangutan", "Otter", "Panda", "Penguin", "Platypus", "Python", "Pumpkin", "Quagga", "Rabbit", "Raccoon",
    "Rhino", "Sheep", "Shrew", "Skunk", "Slow Loris", "Squirrel", "Turtle", "Walrus", "Wolf", "Wolverine", "Wombat",
];

/// Prefix of every display name.
pub const NAME_PREFIX: &str = "Santa";

/// Picks sender names from [`ANIMALS`].
///
/// One generator is shared by all requests. `StdRng` is not `Sync`, so it
/// sits behind a mutex; the lock is held only for a single draw.
pub struct NameGenerator {
    rng: Mutex<StdRng>,
}

impl NameGenerator {
    /// Seed from the current wall-clock time.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        Self::with_seed(nanos as u64)
    }

    /// Fixed seed, for reproducible sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Uniformly pick one animal.
    pub fn pick_animal(&self) -> &'static str {
        // A panic mid-draw cannot leave the rng in a bad state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        ANIMALS.choose(&mut *rng).copied().unwrap_or(ANIMALS[0])
    }

    /// Display name for one outbound message, e.g. `Santa Narwhal`.
    pub fn display_name(&self) -> String {
        format!("{} {}", NAME_PREFIX, self.pick_animal())
    }
}
