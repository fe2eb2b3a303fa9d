//! The BLAKE2b-derived round permutation `P` and block compression
//! function `G_block`.

use crate::block::{Block, BLOCK_WORDS};

#[inline(always)]
fn lower_mult(a: u64, b: u64) -> u64 {
    fn lo(x: u64) -> u64 {
        x & 0xffff_ffff
    }
    lo(a).wrapping_mul(lo(b)).wrapping_mul(2)
}

/// The strengthened BLAKE2b quarter-round mixer used by Argon2: four
/// ordinary BLAKE2b mix steps, each with an extra `2 * lo32(a) * lo32(b)`
/// term folded into the additions.
macro_rules! mix {
    ($a:expr, $b:expr, $c:expr, $d:expr) => {{
        $a = $a.wrapping_add($b).wrapping_add(lower_mult($a, $b));
        $d = ($d ^ $a).rotate_right(32);
        $c = $c.wrapping_add($d).wrapping_add(lower_mult($c, $d));
        $b = ($b ^ $c).rotate_right(24);
        $a = $a.wrapping_add($b).wrapping_add(lower_mult($a, $b));
        $d = ($d ^ $a).rotate_right(16);
        $c = $c.wrapping_add($d).wrapping_add(lower_mult($c, $d));
        $b = ($b ^ $c).rotate_right(63);
    }};
}

/// `P`: mixes the four columns of a 4x4 word matrix, then its four
/// diagonals.
macro_rules! permute {
    ($v0:expr, $v1:expr, $v2:expr, $v3:expr, $v4:expr, $v5:expr, $v6:expr, $v7:expr,
     $v8:expr, $v9:expr, $v10:expr, $v11:expr, $v12:expr, $v13:expr, $v14:expr, $v15:expr) => {{
        mix!($v0, $v4, $v8, $v12);
        mix!($v1, $v5, $v9, $v13);
        mix!($v2, $v6, $v10, $v14);
        mix!($v3, $v7, $v11, $v15);
        mix!($v0, $v5, $v10, $v15);
        mix!($v1, $v6, $v11, $v12);
        mix!($v2, $v7, $v8, $v13);
        mix!($v3, $v4, $v9, $v14);
    }};
}

/// Applies `P` to one 16-word row of the 8x16 view of a block.
fn permute_row(row: usize, b: &mut [u64; BLOCK_WORDS]) {
    let i = 16 * row;
    permute!(
        b[i], b[i + 1], b[i + 2], b[i + 3], b[i + 4], b[i + 5], b[i + 6], b[i + 7], b[i + 8],
        b[i + 9], b[i + 10], b[i + 11], b[i + 12], b[i + 13], b[i + 14], b[i + 15]
    );
}

/// Applies `P` to one 16-word column of the 16x8 word-pair view of a block:
/// indices `{2i, 2i+1, 16+2i, 16+2i+1, ..., 112+2i, 112+2i+1}`.
fn permute_col(col: usize, b: &mut [u64; BLOCK_WORDS]) {
    let i = 2 * col;
    permute!(
        b[i],
        b[i + 1],
        b[i + 16],
        b[i + 17],
        b[i + 32],
        b[i + 33],
        b[i + 48],
        b[i + 49],
        b[i + 64],
        b[i + 65],
        b[i + 80],
        b[i + 81],
        b[i + 96],
        b[i + 97],
        b[i + 112],
        b[i + 113]
    );
}

/// `G_block`: the Argon2 block compression function. Computes
/// `dest = P_col(P_row(lhs XOR rhs)) XOR lhs XOR rhs`.
pub fn compress(dest: &mut Block, lhs: &Block, rhs: &Block) {
    for (d, (l, r)) in dest
        .words_mut()
        .iter_mut()
        .zip(lhs.words().iter().zip(rhs.words().iter()))
    {
        *d = l ^ r;
    }

    let words = dest.words_mut();
    for row in 0..8 {
        permute_row(row, words);
    }
    for col in 0..8 {
        permute_col(col, words);
    }

    for (d, (l, r)) in dest
        .words_mut()
        .iter_mut()
        .zip(lhs.words().iter().zip(rhs.words().iter()))
    {
        *d ^= l ^ r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_is_deterministic() {
        let a = Block::from_le_bytes(&[0x11u8; crate::block::BLOCK_BYTES]);
        let b = Block::from_le_bytes(&[0x22u8; crate::block::BLOCK_BYTES]);
        let mut z1 = Block::zero();
        let mut z2 = Block::zero();
        compress(&mut z1, &a, &b);
        compress(&mut z2, &a, &b);
        assert_eq!(&z1.to_le_bytes()[..], &z2.to_le_bytes()[..]);
    }

    #[test]
    fn compress_is_not_the_identity() {
        let a = Block::zero();
        let b = Block::zero();
        let mut z = Block::zero();
        compress(&mut z, &a, &b);
        // G_block(0, 0) should not simply be zero again.
        assert!(z.words().iter().any(|&w| w != 0));
    }

    #[test]
    fn compress_responds_to_either_input() {
        let zero = Block::zero();
        let one = Block::from_le_bytes(&[0x01u8; crate::block::BLOCK_BYTES]);
        let mut z0 = Block::zero();
        let mut z1 = Block::zero();
        compress(&mut z0, &zero, &zero);
        compress(&mut z1, &one, &zero);
        assert_ne!(&z0.to_le_bytes()[..], &z1.to_le_bytes()[..]);
    }
}
