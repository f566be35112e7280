//! Play-through identifiers
//!
//! Every session gets a short random identifier so that log lines, render
//! messages and result reports belonging to the same play-through can be
//! correlated. Identifiers are displayed in octal, five digits wide, and
//! travel as that string on the wire.

use std::{fmt, num::ParseIntError, str::FromStr};

use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Smallest generated id, the first with five octal digits
const FIRST: u16 = 0o10_000;
/// One past the largest five-digit octal id
const END: u16 = 0o100_000;

/// Identifier of one play-through
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct SessionId(u16);

impl SessionId {
    /// Draws an identifier from the session's generator
    pub fn from_rng(rng: &mut fastrand::Rng) -> Self {
        Self(rng.u16(FIRST..END))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05o}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = ParseIntError;

    /// Reads the octal form back
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u16::from_str_radix(s, 8).map(Self)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_from_rng_in_range() {
        let mut rng = fastrand::Rng::with_seed(1);
        for _ in 0..100 {
            let id = SessionId::from_rng(&mut rng);
            assert!((FIRST..END).contains(&id.0));
            assert_eq!(id.to_string().len(), 5);
        }
    }

    #[test]
    fn test_from_rng_is_deterministic() {
        let a = SessionId::from_rng(&mut fastrand::Rng::with_seed(9));
        let b = SessionId::from_rng(&mut fastrand::Rng::with_seed(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_octal_display() {
        assert_eq!(SessionId(FIRST).to_string(), "10000");
        assert_eq!(SessionId(END - 1).to_string(), "77777");
    }

    #[test]
    fn test_parse() {
        assert_eq!("12345".parse::<SessionId>().unwrap().0, 0o12345);
        assert!("888".parse::<SessionId>().is_err());
        assert!("".parse::<SessionId>().is_err());
    }

    #[test]
    fn test_wire_form_is_octal_string() {
        let id = SessionId(0o12345);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"12345\"");
        assert_eq!(serde_json::from_str::<SessionId>("\"12345\"").unwrap(), id);
        assert!(serde_json::from_str::<SessionId>("\"9\"").is_err());
    }
}
