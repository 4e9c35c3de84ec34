use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for the built-in collaborators.
///
/// A 128-bit seed, written as 32 hex digits. Every collaborator draws from its own
/// stream of the same seed, so replaying a seed replays the whole match.
///
/// # Example
///
/// ```
/// use dugout_director::heuristic::MatchSeed;
/// use rand::Rng as _;
///
/// let seed: MatchSeed = rand::rng().random();
/// let again: MatchSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, again);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchSeed([u8; 16]);

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex digits")]
pub struct ParseMatchSeedError {
    input: String,
}

impl MatchSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// A generator for one consumer of this seed.
    ///
    /// Different `stream`s give independent sequences.
    #[must_use]
    pub fn rng(&self, stream: u64) -> Pcg32 {
        // The low bit of the increment half is forced to 1 by PCG, so keep streams off it.
        let mut bytes = self.0;
        for (b, s) in bytes[8..].iter_mut().zip((stream << 1).to_le_bytes()) {
            *b ^= s;
        }
        Pcg32::from_seed(bytes)
    }
}

impl fmt::Display for MatchSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for MatchSeed {
    type Err = ParseMatchSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMatchSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for MatchSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MatchSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<MatchSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> MatchSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        MatchSeed(seed)
    }
}
