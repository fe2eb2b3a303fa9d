use crate::block::Matrix;

/// Holds a thread pool sized to the lane count, or nothing when there is
/// only one lane (no point pooling for a single sequential worker).
pub struct Workers(u32, Option<scoped_threadpool::Pool>);

impl Workers {
    pub fn new(lanes: u32) -> Workers {
        match lanes {
            1 => Workers(lanes, None),
            n => Workers(lanes, Some(scoped_threadpool::Pool::new(n))),
        }
    }

    /// Runs `f(blocks, lane)` for every lane, all within one slice, and
    /// waits for every lane to finish before returning — the barrier that
    /// makes it safe for the next slice to read across lanes.
    pub fn map<F: Fn(&mut Matrix, u32) + Sync>(&mut self, blocks: &mut Matrix, f: &F) {
        match self {
            Workers(1, _) => f(blocks, 0),
            Workers(lanes, Some(pool)) => {
                let lanes = *lanes;
                pool.scoped(|scope| {
                    for lane in 0..lanes {
                        // SAFETY: each spawned task only ever touches its
                        // own lane's blocks within this slice; `pool.scoped`
                        // joins every task before returning.
                        let aliased: &mut Matrix = unsafe { blocks.alias_mut() };
                        scope.execute(move || f(aliased, lane));
                    }
                })
            }
            Workers(_, None) => unreachable!("lanes > 1 always builds a pool"),
        }
    }
}
