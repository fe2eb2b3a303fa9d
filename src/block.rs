//! The 1024-byte block and the in-memory matrix built from them.

use std::ops::{BitXorAssign, Index, IndexMut};
use zeroize::Zeroize;

/// Size of a block in bytes.
pub const BLOCK_BYTES: usize = 1024;
/// Size of a block in 64-bit little-endian words.
pub const BLOCK_WORDS: usize = BLOCK_BYTES / 8;

/// A single 1024-byte unit of the Argon2 matrix, viewed as 128 little-endian
/// 64-bit words.
#[derive(Clone, Zeroize)]
pub struct Block([u64; BLOCK_WORDS]);

impl Block {
    /// An all-zero block.
    pub fn zero() -> Self {
        Block([0u64; BLOCK_WORDS])
    }

    /// Parses a block out of a little-endian byte buffer. `bytes` must be
    /// at least `BLOCK_BYTES` long.
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() >= BLOCK_BYTES);
        let mut words = [0u64; BLOCK_WORDS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            *word = u64::from_le_bytes(chunk.try_into().unwrap());
        }
        Block(words)
    }

    /// Serializes this block as `BLOCK_BYTES` little-endian bytes.
    pub fn to_le_bytes(&self) -> [u8; BLOCK_BYTES] {
        let mut out = [0u8; BLOCK_BYTES];
        for (chunk, word) in out.chunks_exact_mut(8).zip(self.0.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// The block's words, for the compression function to mix in place.
    pub fn words(&self) -> &[u64; BLOCK_WORDS] {
        &self.0
    }

    /// Mutable access to the block's words.
    pub fn words_mut(&mut self) -> &mut [u64; BLOCK_WORDS] {
        &mut self.0
    }
}

impl<'a> BitXorAssign<&'a Block> for Block {
    #[inline]
    fn bitxor_assign(&mut self, rhs: &Block) {
        for (d, r) in self.0.iter_mut().zip(rhs.0.iter()) {
            *d ^= r;
        }
    }
}

/// The `p`-lane, `q`-block-per-lane matrix the filling algorithm operates
/// over. Stored as one flat allocation, row-major by `(lane, column)`.
pub struct Matrix {
    blocks: Vec<Block>,
    lanes: u32,
    lane_len: u32,
}

impl Matrix {
    /// Allocates a zeroed matrix with `lanes * lane_len` blocks.
    pub fn new(lanes: u32, lane_len: u32) -> Self {
        debug_assert!(lanes > 0 && lane_len > 0);
        Matrix {
            blocks: vec![Block::zero(); lanes as usize * lane_len as usize],
            lanes,
            lane_len,
        }
    }

    #[inline]
    fn flat_index(&self, lane: u32, col: u32) -> usize {
        debug_assert!(lane < self.lanes && col < self.lane_len);
        lane as usize * self.lane_len as usize + col as usize
    }

    /// Borrows the block being written and its two read-only inputs
    /// simultaneously. Panics if `write` aliases either read coordinate —
    /// the filling algorithm's own invariants guarantee this never
    /// happens for valid inputs.
    pub fn get3(
        &mut self,
        write: (u32, u32),
        read0: (u32, u32),
        read1: (u32, u32),
    ) -> (&mut Block, &Block, &Block) {
        let w = self.flat_index(write.0, write.1);
        let r0 = self.flat_index(read0.0, read0.1);
        let r1 = self.flat_index(read1.0, read1.1);
        assert!(w != r0 && w != r1, "compression target aliases its input");
        // SAFETY: `w`, `r0`, `r1` are distinct valid indices into `blocks`,
        // just asserted above; the three returned borrows touch disjoint
        // elements of the backing `Vec`.
        let ptr = self.blocks.as_mut_ptr();
        unsafe { (&mut *ptr.add(w), &*ptr.add(r0), &*ptr.add(r1)) }
    }

    /// Grants `'a`-lifetime mutable access to the whole matrix from inside a
    /// `Sync` closure. Safe to use only when the caller can prove that
    /// concurrent accesses through the returned reference touch disjoint
    /// lanes — which is exactly what `workers::Workers::map` guarantees by
    /// construction (one lane per task, synchronized at slice boundaries).
    pub unsafe fn alias_mut<'a>(&mut self) -> &'a mut Self {
        &mut *(self as *mut Self)
    }

    /// XORs together the last block of every lane (`B[l*q + q - 1]`), used
    /// for final-tag extraction.
    pub fn xor_last_column(&self) -> Block {
        let col = self.lane_len - 1;
        let mut acc = self[(0, col)].clone();
        for lane in 1..self.lanes {
            acc ^= &self[(lane, col)];
        }
        acc
    }
}

impl Index<(u32, u32)> for Matrix {
    type Output = Block;
    #[inline]
    fn index(&self, (lane, col): (u32, u32)) -> &Block {
        &self.blocks[self.flat_index(lane, col)]
    }
}

impl IndexMut<(u32, u32)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (lane, col): (u32, u32)) -> &mut Block {
        let idx = self.flat_index(lane, col);
        &mut self.blocks[idx]
    }
}

impl Drop for Matrix {
    fn drop(&mut self) {
        for block in self.blocks.iter_mut() {
            block.zeroize();
        }
    }
}
