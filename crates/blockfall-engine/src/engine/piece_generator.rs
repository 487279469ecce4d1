use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Piece, PieceKind};

/// Produces the sequence of upcoming pieces.
///
/// Every piece is drawn independently and uniformly from the seven kinds.
/// The generator is deterministic for a given [`PieceSeed`].
///
/// # Example
///
/// ```
/// use blockfall_engine::engine::{PieceGenerator, PieceSeed};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
///
/// for _ in 0..10 {
///     assert_eq!(a.next_kind(), b.next_kind());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws the next piece kind.
    pub fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }

    /// Draws the next piece, placed at its spawn position.
    pub fn next_piece(&mut self) -> Piece {
        Piece::new(self.next_kind())
    }
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed. It is written as a 32-character hex
/// string, both in serialized form and on the command line. Using the same
/// seed produces the same sequence of pieces, which makes games
/// reproducible.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameSession, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
///
/// let session1 = GameSession::with_seed(seed);
/// let session2 = GameSession::with_seed(seed);
/// assert_eq!(session1.next_piece(), session2.next_piece());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

/// Error returned when a string is not a valid 32-character hex seed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("invalid hex: expected 32 characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid hex: {_0}")]
    InvalidDigit(#[error(not(source))] String),
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParsePieceSeedError::InvalidLength(s.len()));
        }
        // `from_str_radix` accepts a leading sign, which is not a hex digit.
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError::InvalidDigit(s.to_owned()));
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|_| ParsePieceSeedError::InvalidDigit(s.to_owned()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([
        0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        0x88,
    ]);

    #[test]
    fn test_deterministic_piece_generation() {
        let mut generator1 = PieceGenerator::with_seed(SEED);
        let mut generator2 = PieceGenerator::with_seed(SEED);

        for _ in 0..50 {
            assert_eq!(generator1.next_kind(), generator2.next_kind());
        }
    }

    #[test]
    fn test_next_piece_is_at_spawn_position() {
        let mut generator = PieceGenerator::with_seed(SEED);
        for _ in 0..20 {
            let piece = generator.next_piece();
            assert_eq!(piece, Piece::new(piece.kind()));
        }
    }

    #[test]
    fn test_generates_every_kind() {
        let mut generator = PieceGenerator::with_seed(SEED);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            seen[generator.next_kind() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing kinds: {seen:?}");
    }

    #[test]
    fn test_display_is_big_endian_hex() {
        let seed = PieceSeed::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
    }

    #[test]
    fn test_parse_accepts_uppercase() {
        let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "0123".parse::<PieceSeed>(),
            Err(ParsePieceSeedError::InvalidLength(4))
        );
        assert!(matches!(
            "ghijklmnopqrstuvwxyzghijklmnopqr".parse::<PieceSeed>(),
            Err(ParsePieceSeedError::InvalidDigit(_))
        ));
        assert!(matches!(
            "+123456789abcdef0123456789abcdef".parse::<PieceSeed>(),
            Err(ParsePieceSeedError::InvalidDigit(_))
        ));
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let serialized = serde_json::to_string(&SEED).unwrap();
        assert_eq!(serialized, "\"123456789abcdef01122334455667788\"");

        let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, SEED);

        let err = serde_json::from_str::<PieceSeed>("\"abc\"").unwrap_err();
        assert!(err.to_string().contains("invalid hex"));
    }
}
