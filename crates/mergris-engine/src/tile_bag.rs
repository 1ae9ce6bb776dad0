use std::{collections::VecDeque, fmt::Write as _};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The multiset of tile ranks one bag refill provides.
pub const BAG_TILES: [u8; 3] = [1, 2, 3];

/// The tile supply: an exhaustible bag refilled with a shuffled `{1, 2, 3}`
/// multiset.
///
/// Every three draws contain each of the ranks 1, 2, and 3 exactly once, in
/// a random order. The bag owns its own PRNG stream; two bags never share
/// randomness state.
///
/// The original framework also documents a 90%/10% two-value tile policy,
/// but the bag is the behavior its live code actually exercises; this crate
/// implements the bag and nothing else (see DESIGN.md).
///
/// # Example
///
/// ```
/// use mergris_engine::TileBag;
///
/// let mut bag = TileBag::new();
/// let mut first_three = [bag.next_tile(), bag.next_tile(), bag.next_tile()];
/// first_three.sort_unstable();
/// assert_eq!(first_three, [1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct TileBag {
    rng: Pcg32,
    bag: VecDeque<u8>,
}

impl Default for TileBag {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic tile generation.
///
/// A 128-bit seed for the bag's PRNG stream. Reusing a seed reproduces the
/// exact tile sequence, which keeps training runs and tests repeatable.
#[derive(Debug, Clone, Copy)]
pub struct BagSeed([u8; 16]);

impl BagSeed {
    /// Expands a 64-bit seed (e.g. a `seed=` config value) into a full seed.
    #[must_use]
    pub fn from_u64(seed: u64) -> Self {
        let half = seed.to_le_bytes();
        let mut bytes = [0; 16];
        bytes[..8].copy_from_slice(&half);
        bytes[8..].copy_from_slice(&half);
        Self(bytes)
    }
}

impl Serialize for BagSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for BagSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

/// Allows generating random `BagSeed` values with `rng.random()`.
impl Distribution<BagSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BagSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BagSeed(seed)
    }
}

impl TileBag {
    /// Creates a bag with a random seed.
    ///
    /// For deterministic tile sequences use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but seeded for a reproducible tile sequence.
    #[must_use]
    pub fn with_seed(seed: BagSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            bag: VecDeque::with_capacity(BAG_TILES.len()),
        }
    }

    /// Draws the next tile rank, refilling the bag when it runs out.
    pub fn next_tile(&mut self) -> u8 {
        if self.bag.is_empty() {
            let mut refill = BAG_TILES;
            refill.shuffle(&mut self.rng);
            self.bag.extend(refill);
        }
        self.bag.pop_front().expect("bag was just refilled")
    }

    /// Returns the tiles still waiting in the current bag, in draw order.
    pub fn remaining(&self) -> impl Iterator<Item = u8> + '_ {
        self.bag.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_refill_contains_each_rank_once() {
        let mut bag = TileBag::new();
        for _ in 0..10 {
            let mut draws = [bag.next_tile(), bag.next_tile(), bag.next_tile()];
            draws.sort_unstable();
            assert_eq!(draws, BAG_TILES);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed = BagSeed::from_u64(0x1234_5678);
        let mut a = TileBag::with_seed(seed);
        let mut b = TileBag::with_seed(seed);
        for _ in 0..30 {
            assert_eq!(a.next_tile(), b.next_tile());
        }
    }

    #[test]
    fn test_seed_serialization_roundtrip() {
        let seed: BagSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let deserialized: BagSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(seed.0, deserialized.0);

        let mut a = TileBag::with_seed(seed);
        let mut b = TileBag::with_seed(deserialized);
        for _ in 0..30 {
            assert_eq!(a.next_tile(), b.next_tile());
        }
    }

    #[test]
    fn test_seed_serializes_as_32_char_hex() {
        let seed = BagSeed([0u8; 16]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"00000000000000000000000000000000\"");
    }

    #[test]
    fn test_seed_deserialization_rejects_bad_length() {
        assert!(serde_json::from_str::<BagSeed>("\"0011\"").is_err());
        assert!(serde_json::from_str::<BagSeed>("\"\"").is_err());
    }
}
