//! Validated configuration for an Argon2d run.
//!
//! `Params` is the external collaborator the core algorithm assumes has
//! already run: constructing one is the only place `p`, `m`, and `n` are
//! checked. The core's fill routine (`crate::Argon2`) never re-validates.

use crate::error::{Error, Result};

/// Lower bound on lanes (`p`), inclusive.
pub const MIN_LANES: u32 = 1;
/// Upper bound on lanes (`p`), inclusive. The Argon2 spec permits up to
/// 2^24-1; this crate pins a much smaller ceiling as implementation policy.
pub const MAX_LANES: u32 = 64;
/// Lower bound on memory cost, in KiB (== 1024-byte blocks).
pub const MIN_MEMORY_KIB: u32 = 8;
/// Lower bound on salt length, in bytes.
pub const MIN_SALT_LEN: usize = 8;
/// Upper bound shared by password, salt, secret, and associated-data
/// lengths, in bytes.
pub const MAX_BYTE_LEN: usize = u32::MAX as usize;
/// Lower bound on requested output length, in bytes.
pub const MIN_OUTPUT_LEN: usize = 4;

const SLICES_PER_LANE: u32 = 4;

/// A checked set of Argon2d cost parameters.
///
/// Memory is tracked both as the caller-supplied `m` (used verbatim in the
/// input digest) and as the adjusted `m'` actually allocated
/// (`lane_len() * lanes()`), which is rounded down to a multiple of `4p`
/// with a floor of `8p` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    lanes: u32,
    passes: u32,
    m_cost_kib: u32,
    lane_len: u32,
}

impl Params {
    /// Validates and builds a new parameter set.
    ///
    /// `m_cost_kib` is memory cost in KiB, numerically equal to the block
    /// count (one block is 1024 bytes). `passes` is the iteration count
    /// `n`, `lanes` is the parallelism degree `p`.
    pub fn new(passes: u32, lanes: u32, m_cost_kib: u32) -> Result<Self> {
        if lanes < MIN_LANES || lanes > MAX_LANES {
            return Err(Error::InvalidLanes(lanes));
        }
        if passes < 1 {
            return Err(Error::InvalidIterations(passes));
        }
        if m_cost_kib < MIN_MEMORY_KIB {
            return Err(Error::InvalidMemory(m_cost_kib));
        }

        // m' = max(8p, floor(m / 4p) * 4p) blocks, expressed per-lane as
        // lane_len = max(2, floor(m / 4p)) * 4.
        let per_lane = (m_cost_kib / (SLICES_PER_LANE * lanes)).max(2);
        let lane_len = per_lane * SLICES_PER_LANE;

        Ok(Params {
            lanes,
            passes,
            m_cost_kib,
            lane_len,
        })
    }

    /// `p`: the number of lanes.
    pub fn lanes(&self) -> u32 {
        self.lanes
    }

    /// `n`: the number of passes over the matrix.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// The caller-supplied `m`, in KiB/blocks, as recorded in the input
    /// digest. This is *not* the adjusted block count actually allocated.
    pub fn m_cost_kib(&self) -> u32 {
        self.m_cost_kib
    }

    /// `q`: blocks per lane after rounding (`m' / p`).
    pub fn lane_len(&self) -> u32 {
        self.lane_len
    }

    /// `g`: blocks per segment (`q / 4`).
    pub fn slice_len(&self) -> u32 {
        self.lane_len / SLICES_PER_LANE
    }

    /// `m'`: the total adjusted block count actually allocated.
    pub fn block_count(&self) -> u32 {
        self.lane_len * self.lanes
    }
}

/// Validates the four byte-string inputs shared by every call. Cost
/// parameters are validated separately by `Params::new`.
pub fn validate_inputs(password: &[u8], salt: &[u8], secret: &[u8], data: &[u8]) -> Result<()> {
    if password.len() > MAX_BYTE_LEN {
        return Err(Error::PasswordTooLong(password.len()));
    }
    if salt.len() < MIN_SALT_LEN {
        return Err(Error::SaltTooShort(salt.len()));
    }
    if salt.len() > MAX_BYTE_LEN {
        return Err(Error::SaltTooLong(salt.len()));
    }
    if secret.len() > MAX_BYTE_LEN {
        return Err(Error::SecretTooLong(secret.len()));
    }
    if data.len() > MAX_BYTE_LEN {
        return Err(Error::AssociatedDataTooLong(data.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_lanes() {
        assert_eq!(Params::new(3, 0, 64), Err(Error::InvalidLanes(0)));
    }

    #[test]
    fn rejects_too_many_lanes() {
        assert_eq!(Params::new(3, 65, 64 * 65), Err(Error::InvalidLanes(65)));
    }

    #[test]
    fn rejects_zero_passes() {
        assert_eq!(Params::new(0, 1, 64), Err(Error::InvalidIterations(0)));
    }

    #[test]
    fn rejects_tiny_memory() {
        assert_eq!(Params::new(3, 1, 4), Err(Error::InvalidMemory(4)));
    }

    #[test]
    fn clamps_memory_up_to_the_8p_floor() {
        // 8 KiB is the absolute floor, but 4 lanes need 32 blocks minimum.
        let params = Params::new(3, 4, 8).unwrap();
        assert_eq!(params.block_count(), 32);
        assert_eq!(params.lane_len(), 8);
    }

    #[test]
    fn rounds_memory_down_to_a_multiple_of_4p() {
        let lo = Params::new(1, 1, 8).unwrap();
        for r in 0..4 {
            let hi = Params::new(1, 1, 8 + r).unwrap();
            assert_eq!(lo.block_count(), hi.block_count());
        }
        let bump = Params::new(1, 1, 12).unwrap();
        assert!(bump.block_count() > lo.block_count());
    }

    #[test]
    fn rejects_short_salt() {
        assert_eq!(
            validate_inputs(b"pw", b"short", b"", b""),
            Err(Error::SaltTooShort(5))
        );
    }

    #[test]
    fn accepts_empty_secret_and_data() {
        assert!(validate_inputs(b"pw", b"saltsalt", b"", b"").is_ok());
    }
}
