//! Seed values for reproducible artwork.
//!
//! A [`Seed`] is either free text or a number. Text seeds are folded into a
//! number with a 32-bit rolling hash before they drive the sine stream in
//! [`crate::prng`]; numeric seeds drive it directly. The same seed always
//! yields the same artwork for the same [`Config`](crate::Config).

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of hex digits in a generated seed (after the `0x` prefix).
const GENERATED_SEED_DIGITS: usize = 64;

/// Caller-held seed for a generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Text(String),
    Number(f64),
}

impl Seed {
    /// Creates a fresh, non-reproducible seed string such as `0x3fa9…`.
    ///
    /// Drawn from the thread-local OS-seeded generator, so two calls almost
    /// never collide. Store the result to reproduce the artwork later.
    pub fn generate() -> Self {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        let mut rng = rand::thread_rng();
        let mut text = String::with_capacity(GENERATED_SEED_DIGITS + 2);
        text.push_str("0x");
        for _ in 0..GENERATED_SEED_DIGITS {
            text.push(HEX[rng.gen_range(0..16)] as char);
        }
        Seed::Text(text)
    }

    /// 32-bit rolling hash over UTF-16 code units.
    ///
    /// `hash = hash * 31 + unit`, wrapped to a signed 32-bit integer after
    /// every step, then the absolute value taken (in 64-bit so `i32::MIN`
    /// maps to 2^31 rather than overflowing).
    pub fn hash_text(text: &str) -> f64 {
        let hash = text
            .encode_utf16()
            .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
        (i64::from(hash)).abs() as f64
    }

    /// The numeric starting state of the sine stream for this seed.
    pub fn initial_state(&self) -> f64 {
        match self {
            Seed::Text(text) => Self::hash_text(text),
            Seed::Number(n) => *n,
        }
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Text(text) => write!(f, "{text}"),
            Seed::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Seed::Text(text.to_owned())
    }
}

impl From<String> for Seed {
    fn from(text: String) -> Self {
        Seed::Text(text)
    }
}

impl From<f64> for Seed {
    fn from(n: f64) -> Self {
        Seed::Number(n)
    }
}

impl From<u32> for Seed {
    fn from(n: u32) -> Self {
        Seed::Number(f64::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Hashing --

    #[test]
    fn hash_of_empty_string_is_zero() {
        assert_eq!(Seed::hash_text(""), 0.0);
    }

    #[test]
    fn hash_matches_known_golden_values() {
        // "a" = 97; "abc" = ((97*31)+98)*31+99 = 96354
        assert_eq!(Seed::hash_text("a"), 97.0);
        assert_eq!(Seed::hash_text("abc"), 96354.0);
    }

    #[test]
    fn hash_wraps_to_32_bits_and_takes_absolute_value() {
        let long = "the quick brown fox jumps over the lazy dog";
        let h = Seed::hash_text(long);
        assert!(h >= 0.0);
        assert!(h <= 2_147_483_648.0, "hash {h} exceeds 32-bit range");
        assert_eq!(h.fract(), 0.0);
    }

    #[test]
    fn hash_uses_utf16_code_units() {
        // U+1F600 is a surrogate pair: 0xD83D, 0xDE00.
        let expected = (0xD83Di32.wrapping_mul(31).wrapping_add(0xDE00)) as f64;
        assert_eq!(Seed::hash_text("\u{1F600}"), expected);
    }

    // -- Construction --

    #[test]
    fn generated_seed_has_prefix_and_length() {
        let Seed::Text(text) = Seed::generate() else {
            panic!("generated seed should be text");
        };
        assert!(text.starts_with("0x"));
        assert_eq!(text.len(), GENERATED_SEED_DIGITS + 2);
        assert!(text[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn numeric_seed_uses_value_directly() {
        assert_eq!(Seed::Number(42.0).initial_state(), 42.0);
        assert_eq!(Seed::from("abc").initial_state(), 96354.0);
    }

    #[test]
    fn display_shows_raw_value() {
        assert_eq!(Seed::from("abc").to_string(), "abc");
        assert_eq!(Seed::from(7u32).to_string(), "7");
    }

    // -- Serialization --

    #[test]
    fn json_accepts_string_and_number() {
        let text: Seed = serde_json::from_str("\"hello\"").unwrap();
        let number: Seed = serde_json::from_str("12.5").unwrap();
        assert_eq!(text, Seed::Text("hello".into()));
        assert_eq!(number, Seed::Number(12.5));
    }

    #[test]
    fn json_round_trip() {
        let original = Seed::from("0xdeadbeef");
        let json = serde_json::to_string(&original).unwrap();
        let restored: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
