//! Fans lane-filling work out across a thread pool, synchronized at slice
//! boundaries. The `threaded` feature selects `scoped_threadpool`
//! for actual parallelism; disabling it (or `lanes == 1`) falls back to a
//! serial in-process path. Both paths produce byte-identical output.

#[cfg(feature = "threaded")]
pub use self::threadpool::Workers;

#[cfg(feature = "threaded")]
mod threadpool;

#[cfg(not(feature = "threaded"))]
pub use self::serial::Workers;

#[cfg(not(feature = "threaded"))]
mod serial;
