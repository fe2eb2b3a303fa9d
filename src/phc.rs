//! The `$argon2d$...` PHC string format: encoding, parsing, and password
//! verification. This is a convenience layer over the core — the one
//! textual wire format this crate defines. Only the `d` variant is
//! supported; there is no `i`/`id` type byte to parse.

use crate::params::Params;
use crate::{Argon2, Error};
use std::fmt;
use std::str;

/// A parsed or freshly produced `$argon2d$...` string and the tag it wraps.
pub struct Phc {
    params: Params,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

/// Failures specific to parsing a PHC string. Malformed parameters surface
/// as this crate's ordinary [`Error`] via [`ParseError::BadParams`].
#[derive(Debug)]
pub enum ParseError {
    /// The string did not match the expected `$argon2d$m=...,t=...,p=...$salt$hash` grammar.
    Malformed,
    /// The grammar matched but the embedded cost parameters are invalid.
    BadParams(Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Malformed => write!(f, "malformed argon2d encoded string"),
            ParseError::BadParams(e) => write!(f, "invalid parameters in encoded string: {e}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl Phc {
    /// Hashes `password` under `params` and `salt`, ready for [`Phc::to_string`].
    pub fn hash(params: Params, password: &[u8], salt: &[u8]) -> Phc {
        let mut hash = vec![0u8; 32];
        Argon2::new(params).hash_into(&mut hash, password, salt, &[], &[]);
        Phc {
            params,
            salt: salt.to_vec(),
            hash,
        }
    }

    /// Parses an encoded `$argon2d$m=...,t=...,p=...$salt$hash` string.
    pub fn parse(encoded: &str) -> Result<Phc, ParseError> {
        let body = encoded.strip_prefix("$argon2d$").ok_or(ParseError::Malformed)?;
        let mut fields = body.splitn(2, '$');
        let header = fields.next().ok_or(ParseError::Malformed)?;
        let rest = fields.next().ok_or(ParseError::Malformed)?;

        let (m, t, p) = parse_header(header).ok_or(ParseError::Malformed)?;

        let mut rest_fields = rest.splitn(2, '$');
        let salt_b64 = rest_fields.next().ok_or(ParseError::Malformed)?;
        let hash_b64 = rest_fields.next().ok_or(ParseError::Malformed)?;

        let salt = base64::decode_config(salt_b64, base64::STANDARD_NO_PAD)
            .map_err(|_| ParseError::Malformed)?;
        let hash = base64::decode_config(hash_b64, base64::STANDARD_NO_PAD)
            .map_err(|_| ParseError::Malformed)?;

        let params = Params::new(t, p, m).map_err(ParseError::BadParams)?;
        Ok(Phc { params, salt, hash })
    }

    /// Checks `password` against this record in constant time.
    pub fn verify(&self, password: &[u8]) -> bool {
        let mut out = vec![0u8; self.hash.len()];
        Argon2::new(self.params).hash_into(&mut out, password, &self.salt, &[], &[]);
        constant_eq(&out, &self.hash)
    }
}

impl fmt::Display for Phc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "$argon2d$m={},t={},p={}${}${}",
            self.params.m_cost_kib(),
            self.params.passes(),
            self.params.lanes(),
            base64::encode_config(&self.salt, base64::STANDARD_NO_PAD),
            base64::encode_config(&self.hash, base64::STANDARD_NO_PAD),
        )
    }
}

fn parse_header(header: &str) -> Option<(u32, u32, u32)> {
    let mut m = None;
    let mut t = None;
    let mut p = None;
    for field in header.split(',') {
        let (key, value) = field.split_once('=')?;
        let value: u32 = value.parse().ok()?;
        match key {
            "m" => m = Some(value),
            "t" => t = Some(value),
            "p" => p = Some(value),
            _ => return None,
        }
    }
    Some((m?, t?, p?))
}

/// Constant-time byte comparison: every byte pair is examined regardless of
/// earlier mismatches, so timing does not leak the position of a mismatch.
fn constant_eq(xs: &[u8], ys: &[u8]) -> bool {
    if xs.len() != ys.len() {
        return false;
    }
    xs.iter().zip(ys.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_encoded_string() {
        let params = Params::new(2, 1, 64).unwrap();
        let phc = Phc::hash(params, b"hunter2", b"saltsaltsalt");
        let encoded = phc.to_string();

        let parsed = Phc::parse(&encoded).unwrap();
        assert!(parsed.verify(b"hunter2"));
        assert!(!parsed.verify(b"wrong"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Phc::parse("not an argon2 string").is_err());
        assert!(Phc::parse("$argon2i$m=64,t=2,p=1$c2FsdA$aGFzaA").is_err());
    }

    #[test]
    fn constant_eq_rejects_length_mismatch() {
        assert!(!constant_eq(b"abc", b"ab"));
    }

    #[test]
    fn constant_eq_accepts_equal_slices() {
        assert!(constant_eq(b"abcdef", b"abcdef"));
    }
}
