//! Deterministic RNG construction (the actual entropy source is an
//! external collaborator; the generator only needs *a* seeded stream).

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// A reproducible RNG stream from a `u64` seed: the same seed always
/// produces the same generated puzzle, independent of platform or Rust
/// version.
pub fn rng_from_u64(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}
