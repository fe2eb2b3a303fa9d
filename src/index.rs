//! The data-dependent reference-index rule that makes this
//! algorithm "2d": each block's second compression input is chosen from
//! the matrix itself, using bits of the previously written block.

/// Splits a 64-bit word into its low and high 32-bit halves (`J1`, `J2`).
#[inline]
pub fn split_prev(word: u64) -> (u32, u32) {
    (word as u32, (word >> 32) as u32)
}

/// Picks the reference lane `rlane` for the block at `(pass, slice, lane)`.
/// Every segment but the very first reads `J2 mod p`; the first segment of
/// the first pass always references its own lane, since no other lane has
/// written anything yet.
#[inline]
pub fn ref_lane(pass: u32, slice: u32, lane: u32, lanes: u32, j2: u32) -> u32 {
    if pass == 0 && slice == 0 {
        lane
    } else {
        j2 % lanes
    }
}

/// Computes the reference block's position within its lane (`rslice`,
/// folded together with `ri` as one offset into the lane), given the
/// pseudo-random pair `(j1, j2)` read from the previous block.
///
/// `slice_index` is `i`, the position being filled within the current
/// segment; `slice_len` is `g`. Returns an offset in `[0, lane_len)`.
pub fn index_alpha(
    pass: u32,
    lane: u32,
    slice: u32,
    lanes: u32,
    slice_index: u32,
    slice_len: u32,
    j1: u32,
    j2: u32,
) -> u32 {
    let lane_len = slice_len * 4;
    let same_lane = ref_lane(pass, slice, lane, lanes, j2) == lane;

    // Size of the reference window, before folding in j1.
    let window: u32 = match (pass, slice, same_lane) {
        (0, 0, _) => slice_index - 1,
        (0, _, false) => slice * slice_len - if slice_index == 0 { 1 } else { 0 },
        (0, _, true) => slice * slice_len + slice_index - 1,
        (_, _, false) => lane_len - slice_len - if slice_index == 0 { 1 } else { 0 },
        (_, _, true) => lane_len - slice_len + slice_index - 1,
    };

    // Non-uniform fold of j1 into [0, window): favors recently written
    // blocks without ever landing exactly on them.
    let (window64, j1_64) = (window as u64, j1 as u64);
    let relative = (window64 - 1 - (window64 * (j1_64 * j1_64 >> 32) >> 32)) as u32;

    match (pass, slice) {
        (0, _) | (_, 3) => relative % lane_len,
        _ => (slice_len * (slice + 1) + relative) % lane_len,
    }
}
