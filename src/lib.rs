//! A pure Rust implementation of the Argon2d memory-hard password hash
//! (v0x10, data-dependent variant).
//!
//! The entry point most callers want is [`derive`], which validates its
//! arguments and writes a tag of the requested length. [`Argon2`] is the
//! lower-level core: it assumes its [`Params`] are already valid and will
//! panic rather than return an error if an internal invariant is violated
//! (see the `error` module's docs for why that split exists).

mod block;
mod compress;
mod digest;
mod index;

pub mod error;
pub mod params;
pub mod phc;
pub mod workers;

pub use error::{Error, Result};
pub use params::Params;

use block::{Block, Matrix, BLOCK_BYTES};
use workers::Workers;

/// A memory-hard hash run over a fixed, validated [`Params`] configuration.
///
/// Building one does no work; the matrix is allocated fresh on every call
/// to [`hash_into`](Argon2::hash_into).
pub struct Argon2 {
    params: Params,
}

impl Argon2 {
    /// Wraps an already-validated parameter set.
    pub fn new(params: Params) -> Self {
        Argon2 { params }
    }

    /// The parameters this instance will hash with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Fills `out` with the Argon2d tag for `(password, salt, secret, data)`.
    ///
    /// Does not validate `password`/`salt`/`secret`/`data` lengths or
    /// `out.len()` — callers that accept these from untrusted input should
    /// go through [`derive`] instead, which runs those checks before
    /// reaching here. Passing inputs this crate's preconditions forbid is a
    /// programmer error and may panic.
    pub fn hash_into(&self, out: &mut [u8], password: &[u8], salt: &[u8], secret: &[u8], data: &[u8]) {
        let params = &self.params;
        let mut seed = digest::initial_hash(params, out.len() as u32, password, salt, secret, data);

        let mut matrix = Matrix::new(params.lanes(), params.lane_len());
        let mut workers = Workers::new(params.lanes());

        workers.map(&mut matrix, &|m: &mut Matrix, lane: u32| {
            let mut buf = seed;
            seed_lane(m, &mut buf, lane);
            fill_segment(params, m, 0, lane, 0);
        });

        for slice in 1..4 {
            workers.map(&mut matrix, &|m: &mut Matrix, lane: u32| {
                fill_segment(params, m, 0, lane, slice);
            });
        }

        for pass in 1..params.passes() {
            for slice in 0..4 {
                workers.map(&mut matrix, &|m: &mut Matrix, lane: u32| {
                    fill_segment(params, m, pass, lane, slice);
                });
            }
        }

        let tag_block = matrix.xor_last_column();
        digest::h_prime(out, &tag_block.to_le_bytes());

        use zeroize::Zeroize;
        seed.zeroize();
    }
}

/// Writes the two seed blocks of `lane`: `H0 || le32(i) || le32(lane)`
/// run through `H'` for `i ∈ {0, 1}`.
fn seed_lane(matrix: &mut Matrix, seed_buf: &mut [u8; digest::SEED_BUF_LEN], lane: u32) {
    for i in 0..2u32 {
        seed_buf[64..68].copy_from_slice(&i.to_le_bytes());
        seed_buf[68..72].copy_from_slice(&lane.to_le_bytes());
        let mut bytes = [0u8; BLOCK_BYTES];
        digest::h_prime(&mut bytes, seed_buf);
        matrix[(lane, i)] = Block::from_le_bytes(&bytes);
    }
}

/// Fills every block of one segment — `(pass, lane, slice)` — in column
/// order. The first segment of the first pass starts at column 2;
/// columns 0 and 1 were already written by `seed_lane`.
fn fill_segment(params: &Params, matrix: &mut Matrix, pass: u32, lane: u32, slice: u32) {
    let slice_len = params.slice_len();
    let lane_len = params.lane_len();
    let lanes = params.lanes();
    let start = if pass == 0 && slice == 0 { 2 } else { 0 };

    for idx in start..slice_len {
        let abs_col = slice * slice_len + idx;
        let prev_col = if abs_col == 0 { lane_len - 1 } else { abs_col - 1 };

        let (j1, j2) = index::split_prev(matrix[(lane, prev_col)].words()[0]);
        let rlane = index::ref_lane(pass, slice, lane, lanes, j2);
        let rcol = index::index_alpha(pass, lane, slice, lanes, idx, slice_len, j1, j2);

        let (wr, prev, refblk) = matrix.get3((lane, abs_col), (lane, prev_col), (rlane, rcol));
        compress::compress(wr, prev, refblk);
    }
}

/// Validates `(password, salt, secret, data, n, p, m)`, then derives a tag
/// of `out.len()` bytes into `out`. This is the crate's main entry point.
pub fn derive(
    out: &mut [u8],
    password: &[u8],
    salt: &[u8],
    secret: &[u8],
    data: &[u8],
    passes: u32,
    lanes: u32,
    m_cost_kib: u32,
) -> Result<()> {
    if out.len() < params::MIN_OUTPUT_LEN {
        return Err(Error::OutputTooShort(out.len()));
    }
    params::validate_inputs(password, salt, secret, data)?;
    let checked = Params::new(passes, lanes, m_cost_kib)?;
    Argon2::new(checked).hash_into(out, password, salt, secret, data);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_is_deterministic() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        derive(&mut a, b"password", b"saltsaltsalt", b"", b"", 2, 1, 64).unwrap();
        derive(&mut b, b"password", b"saltsaltsalt", b"", b"", 2, 1, 64).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn derive_fills_requested_length() {
        let mut out = [0u8; 48];
        derive(&mut out, b"password", b"saltsaltsalt", b"", b"", 2, 1, 64).unwrap();
        assert!(out.iter().any(|&b| b != 0));
    }

    #[test]
    fn derive_responds_to_password_changes() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        derive(&mut a, b"password1", b"saltsaltsalt", b"", b"", 2, 1, 64).unwrap();
        derive(&mut b, b"password2", b"saltsaltsalt", b"", b"", 2, 1, 64).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn derive_rejects_bad_params() {
        let mut out = [0u8; 32];
        assert!(derive(&mut out, b"pw", b"shortsalt", b"", b"", 2, 1, 64).is_err());
        assert!(derive(&mut out, b"pw", b"saltsaltsalt", b"", b"", 0, 1, 64).is_err());
        assert!(derive(&mut out, b"pw", b"saltsaltsalt", b"", b"", 2, 0, 64).is_err());
    }

    #[test]
    fn four_lane_derive_produces_requested_length() {
        // p=4, m=16, n=3, tau=32 — small enough to run in a unit test, not a
        // claim about the exact tag (see tests/kat.rs for that).
        let mut out = [0u8; 32];
        let p = [0x01u8; 32];
        let s = [0x02u8; 16];
        let k = [0x03u8; 8];
        let x = [0x04u8; 12];
        derive(&mut out, &p, &s, &k, &x, 3, 4, 16).unwrap();
        assert_eq!(out.len(), 32);
    }
}
