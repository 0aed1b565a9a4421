//! Credential obscuring for data at rest.
//!
//! Admin passwords and visitor passcodes are stored as obscured tokens so
//! the raw secrets never sit in the database file. The transform is a keyed
//! byte rotation hex-encoded for transport - reversible with the shared
//! static key, and explicitly NOT a security boundary: no key derivation,
//! no salt, no authentication. The toy trust model of the application does
//! not warrant more without a requirements change.
//!
//! Callers must compare secrets only after [`reveal`], never in obscured
//! form.

use std::env;

/// Fallback key for local development when `SPONSORBOARD_SECRET` is unset.
const DEV_KEY: &str = "sponsorboard-dev-key";

/// Returns the shared obscuring key from the environment, falling back to
/// the development default.
fn key_bytes() -> Vec<u8> {
    env::var("SPONSORBOARD_SECRET")
        .unwrap_or_else(|_| DEV_KEY.to_string())
        .into_bytes()
}

fn xor_with_key(data: &[u8]) -> Vec<u8> {
    let key = key_bytes();
    data.iter()
        .zip(key.iter().cycle())
        .map(|(byte, key_byte)| byte ^ key_byte)
        .collect()
}

/// Obscures a plaintext secret into a hex token for storage.
#[must_use]
pub fn obscure(text: &str) -> String {
    hex::encode(xor_with_key(text.as_bytes()))
}

/// Reveals a stored token back into plaintext.
///
/// Returns an empty string if the token is not valid hex or the revealed
/// bytes are not valid UTF-8 (e.g., the token was produced under a
/// different key). An empty string never matches a submitted credential,
/// so a failed reveal degrades into an authentication rejection.
#[must_use]
pub fn reveal(token: &str) -> String {
    let Ok(bytes) = hex::decode(token) else {
        return String::new();
    };
    String::from_utf8(xor_with_key(&bytes)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obscure_reveal_round_trip() {
        let token = obscure("alicepass");
        assert_ne!(token, "alicepass");
        assert_eq!(reveal(&token), "alicepass");
    }

    #[test]
    fn test_obscured_token_is_hex() {
        let token = obscure("bobcode");
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_reveal_rejects_invalid_hex() {
        assert_eq!(reveal("not hex at all"), "");
    }

    #[test]
    fn test_reveal_empty_token() {
        assert_eq!(reveal(""), "");
    }

    #[test]
    fn test_distinct_secrets_produce_distinct_tokens() {
        assert_ne!(obscure("alicecode"), obscure("bobcode"));
    }
}
