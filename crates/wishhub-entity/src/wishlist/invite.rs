//! Invite code type and generation.

use std::fmt;

use rand::RngExt;
use serde::{Deserialize, Serialize};

/// Alphabet for invite codes: uppercase letters and digits.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Invite code length in characters.
pub const CODE_LENGTH: usize = 6;

/// A short opaque token granting join access to exactly one wishlist.
///
/// Uniqueness across the system is enforced by the wishlist repository's
/// invite-code index, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteCode(String);

impl InviteCode {
    /// Generates a fresh random code.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let code: String = (0..CODE_LENGTH)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Parses a client-supplied code, normalizing case.
    ///
    /// Returns `None` when the input cannot be a valid code.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_ascii_uppercase();
        if normalized.len() != CODE_LENGTH {
            return None;
        }
        if !normalized.bytes().all(|b| ALPHABET.contains(&b)) {
            return None;
        }
        Some(Self(normalized))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_well_formed() {
        for _ in 0..100 {
            let code = InviteCode::generate();
            assert_eq!(code.as_str().len(), CODE_LENGTH);
            assert!(code.as_str().bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let code = InviteCode::parse(" abc123 ").expect("valid code");
        assert_eq!(code.as_str(), "ABC123");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(InviteCode::parse("").is_none());
        assert!(InviteCode::parse("ABC12").is_none());
        assert!(InviteCode::parse("ABC1234").is_none());
        assert!(InviteCode::parse("ABC!23").is_none());
    }

    #[test]
    fn serde_is_transparent() {
        let code = InviteCode::parse("XYZ789").expect("valid code");
        let json = serde_json::to_string(&code).expect("serialize");
        assert_eq!(json, "\"XYZ789\"");
    }
}
