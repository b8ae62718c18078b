//! Local identifier minting.
//!
//! Suffixes are random Crockford base32 strings with a two-digit mod-97
//! checksum, grouped by five: `10.59350/sfzv4-xdb68`. Nothing is deposited
//! anywhere; the identifier only becomes resolvable once the content is
//! registered with a DOI agency out of band.

use rand::Rng;

use crate::error::RegistrarError;
use crate::registrar::{validate_prefix, Registrar, DOI_RESOLVER};

/// Crockford base32 alphabet (no i, l, o, u), lowercase.
const ALPHABET: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";

/// Random symbols per suffix, before the checksum.
const SUFFIX_SYMBOLS: u32 = 8;

const GROUP: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMinter;

impl LocalMinter {
    pub fn new() -> Self {
        Self
    }
}

impl Registrar for LocalMinter {
    fn register(&self, prefix: &str) -> Result<String, RegistrarError> {
        validate_prefix(prefix)?;
        let n = rand::thread_rng().gen_range(0..32u64.pow(SUFFIX_SYMBOLS));
        Ok(format!("{DOI_RESOLVER}{prefix}/{}", encode_suffix(n)))
    }
}

/// Encode `n` as a zero-padded base32 string plus checksum, grouped with `-`.
pub fn encode_suffix(n: u64) -> String {
    let mut symbols = vec![b'0'; SUFFIX_SYMBOLS as usize];
    let mut rest = n;
    for slot in symbols.iter_mut().rev() {
        *slot = ALPHABET[(rest % 32) as usize];
        rest /= 32;
    }
    let mut raw: String = symbols.into_iter().map(char::from).collect();
    raw.push_str(&format!("{:02}", checksum(n)));

    let chars: Vec<char> = raw.chars().collect();
    chars
        .chunks(GROUP)
        .map(|c| c.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("-")
}

/// Check a suffix produced by [`encode_suffix`]. Hyphens are ignored and
/// letters are case-insensitive.
pub fn verify_suffix(suffix: &str) -> bool {
    let cleaned: String = suffix
        .chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if cleaned.len() != SUFFIX_SYMBOLS as usize + 2 {
        return false;
    }
    let (body, check) = cleaned.split_at(SUFFIX_SYMBOLS as usize);
    let Ok(expected) = check.parse::<u64>() else {
        return false;
    };
    let mut n = 0u64;
    for c in body.bytes() {
        let Some(pos) = ALPHABET.iter().position(|a| *a == c) else {
            return false;
        };
        n = n * 32 + pos as u64;
    }
    checksum(n) == expected
}

/// ISO 7064 mod 97-10 check digits.
fn checksum(n: u64) -> u64 {
    97 - ((n * 100) % 97) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_encodes_as_padded_groups() {
        let s = encode_suffix(0);
        assert_eq!(s.len(), 11);
        assert!(s.starts_with("00000-000"));
        assert!(verify_suffix(&s));
    }

    #[test]
    fn largest_value_round_trips_checksum() {
        let s = encode_suffix(32u64.pow(SUFFIX_SYMBOLS) - 1);
        assert!(s.starts_with("zzzzz-zzz"));
        assert!(verify_suffix(&s));
    }

    #[test]
    fn corrupted_suffix_fails_verification() {
        let s = encode_suffix(123_456_789);
        let mut corrupted: Vec<char> = s.chars().collect();
        corrupted[0] = if corrupted[0] == '1' { '2' } else { '1' };
        let corrupted: String = corrupted.into_iter().collect();
        assert!(!verify_suffix(&corrupted));
    }

    #[test]
    fn minted_url_has_resolver_and_prefix() {
        let url = LocalMinter::new().register("10.59350").unwrap();
        let suffix = url
            .strip_prefix("https://doi.org/10.59350/")
            .expect("resolver + prefix");
        assert!(verify_suffix(suffix), "bad suffix {suffix}");
    }

    #[test]
    fn consecutive_mints_differ() {
        let minter = LocalMinter::new();
        let a = minter.register("10.59350").unwrap();
        let b = minter.register("10.59350").unwrap();
        assert_ne!(a, b);
    }
}
