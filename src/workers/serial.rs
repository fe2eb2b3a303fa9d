use crate::block::Matrix;

/// Runs every lane in-process, one after another. Used when the `threaded`
/// feature is disabled; always correct regardless of lane count, since the
/// algorithm permits (but does not require) concurrent lane execution.
pub struct Workers(u32);

impl Workers {
    pub fn new(lanes: u32) -> Workers {
        Workers(lanes)
    }

    pub fn map<F: Fn(&mut Matrix, u32) + Sync>(&mut self, blocks: &mut Matrix, f: &F) {
        for lane in 0..self.0 {
            f(blocks, lane);
        }
    }
}
