//! BLAKE2b adapter: the fixed-output input digest H0 and the
//! variable-length hash `H'` built on top of it.

use crate::params::Params;
use blake2::digest::VariableOutput;
use blake2::{Blake2b512, Blake2bVar, Digest};

/// Argon2 version this crate implements.
pub const VERSION: u32 = 0x10;
/// Type byte for the 2d variant (the only one this crate implements).
pub const TYPE_ARGON2D: u32 = 0;

/// Length of H0 plus the two trailing little-endian `u32` fields
/// (`i`, lane) used to seed each lane's first two blocks.
pub const SEED_BUF_LEN: usize = 72;
/// Length of H0 itself.
pub const PREHASH_LEN: usize = 64;

/// Computes H0: a BLAKE2b-512 digest over the canonically serialized
/// parameter prefix, returned inside a 72-byte buffer whose last 8
/// bytes are left zeroed for the caller to fill in per-lane.
pub fn initial_hash(params: &Params, tau: u32, p: &[u8], s: &[u8], k: &[u8], x: &[u8]) -> [u8; SEED_BUF_LEN] {
    let mut hasher = Blake2b512::new();
    hasher.update(&params.lanes().to_le_bytes());
    hasher.update(&tau.to_le_bytes());
    hasher.update(&params.m_cost_kib().to_le_bytes());
    hasher.update(&params.passes().to_le_bytes());
    hasher.update(&VERSION.to_le_bytes());
    hasher.update(&TYPE_ARGON2D.to_le_bytes());
    hasher.update(&(p.len() as u32).to_le_bytes());
    hasher.update(p);
    hasher.update(&(s.len() as u32).to_le_bytes());
    hasher.update(s);
    hasher.update(&(k.len() as u32).to_le_bytes());
    hasher.update(k);
    hasher.update(&(x.len() as u32).to_le_bytes());
    hasher.update(x);

    let mut buf = [0u8; SEED_BUF_LEN];
    buf[..PREHASH_LEN].copy_from_slice(&hasher.finalize());
    buf
}

/// `H'`: the variable-length hash built by chaining BLAKE2b-512 in 32-byte
/// steps. `out` is filled completely.
pub fn h_prime(out: &mut [u8], input: &[u8]) {
    if out.len() <= PREHASH_LEN {
        let mut hasher = Blake2bVar::new(out.len()).expect("0 < out.len() <= 64");
        blake2::digest::Update::update(&mut hasher, &(out.len() as u32).to_le_bytes());
        blake2::digest::Update::update(&mut hasher, input);
        hasher
            .finalize_variable(out)
            .expect("hasher output size matches out.len()");
        return;
    }

    let mut v = {
        let mut hasher = Blake2b512::new();
        hasher.update(&(out.len() as u32).to_le_bytes());
        hasher.update(input);
        let digest = hasher.finalize();
        let mut v = [0u8; PREHASH_LEN];
        v.copy_from_slice(&digest);
        v
    };

    out[0..32].copy_from_slice(&v[0..32]);
    let mut written = 32;

    while out.len() - written > PREHASH_LEN {
        let mut hasher = Blake2b512::new();
        hasher.update(&v);
        v.copy_from_slice(&hasher.finalize());
        out[written..written + 32].copy_from_slice(&v[0..32]);
        written += 32;
    }

    let remaining = out.len() - written;
    let mut hasher = Blake2bVar::new(remaining).expect("0 < remaining <= 64");
    blake2::digest::Update::update(&mut hasher, &v);
    hasher
        .finalize_variable(&mut out[written..])
        .expect("hasher output size matches remaining");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h_prime_short_matches_plain_blake2b() {
        let mut out = [0u8; 32];
        h_prime(&mut out, b"hello");

        let mut hasher = Blake2bVar::new(32).unwrap();
        blake2::digest::Update::update(&mut hasher, &32u32.to_le_bytes());
        blake2::digest::Update::update(&mut hasher, b"hello");
        let mut expected = [0u8; 32];
        hasher.finalize_variable(&mut expected).unwrap();

        assert_eq!(out, expected);
    }

    #[test]
    fn h_prime_is_deterministic_across_the_chaining_boundary() {
        let mut a = [0u8; 1024];
        let mut b = [0u8; 1024];
        h_prime(&mut a, b"argon2d seed");
        h_prime(&mut b, b"argon2d seed");
        assert_eq!(&a[..], &b[..]);
        assert_ne!(&a[..32], &a[32..64]);
    }

    #[test]
    fn h_prime_fills_exact_length() {
        for len in [4usize, 64, 65, 96, 1024] {
            let mut out = vec![0u8; len];
            h_prime(&mut out, b"x");
            assert_eq!(out.len(), len);
        }
    }
}
