//! Caller-facing error taxonomy.
//!
//! Every variant here corresponds to one of the validation rules a caller
//! can trip (see `params`). Invariant violations inside the core filling
//! algorithm are programmer errors, not represented here — they panic (see
//! `index` and `lib`'s `debug_assert!`s) because the validation wrapper is
//! supposed to make them unreachable.

/// Errors returned by the parameter-validation wrapper and the public
/// `hash_into`/`derive` entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("password is {0} bytes, exceeding the 2^32-1 byte limit")]
    PasswordTooLong(usize),

    #[error("salt is {0} bytes, below the 8 byte minimum")]
    SaltTooShort(usize),

    #[error("salt is {0} bytes, exceeding the 2^32-1 byte limit")]
    SaltTooLong(usize),

    #[error("secret is {0} bytes, exceeding the 2^32-1 byte limit")]
    SecretTooLong(usize),

    #[error("associated data is {0} bytes, exceeding the 2^32-1 byte limit")]
    AssociatedDataTooLong(usize),

    #[error("invalid iteration count {0}: must be at least 1")]
    InvalidIterations(u32),

    #[error("invalid lane count {0}: must be between 1 and 64")]
    InvalidLanes(u32),

    #[error("invalid memory cost {0} KiB: must be at least 8 KiB")]
    InvalidMemory(u32),

    #[error("output length {0} is below the 4 byte minimum")]
    OutputTooShort(usize),
}

/// Shorthand used throughout the crate's public API.
pub type Result<T> = core::result::Result<T, Error>;
