//! Domain error taxonomy.
//!
//! These are the error kinds a caller can observe; they are deliberately
//! independent of any particular host API. Programming-error kinds
//! (`AddOverflow`, `SubUnderflow`, `MulOverflow`, `ShlOverflow`) indicate a
//! capacity bug in a caller of the limb engine, not bad user data, but are
//! still returned as `Result` rather than panicking so an embedder can
//! propagate with `?`.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("division by zero")]
    DivByZero,

    #[error("mod with a negative divisor")]
    ModNegDivisor,

    #[error("negative bit index")]
    NegBitIndex,

    #[error("negative bit count")]
    NegBitCount,

    #[error("bit length out of range")]
    BitLenOutOfRange,

    #[error("add overflow: destination limb array too small")]
    AddOverflow,

    #[error("sub underflow: minuend smaller than subtrahend")]
    SubUnderflow,

    #[error("mul overflow: destination limb array too small")]
    MulOverflow,

    #[error("shl overflow: result bit length exceeds the maximum representable value")]
    ShlOverflow,

    #[error("hash code unsupported on a mutable accumulator")]
    HashCodeUnsupported,

    #[error("parse error at byte offset {offset}: {reason}")]
    ParseError { offset: usize, reason: &'static str },

    #[error("value out of range for the requested primitive conversion")]
    OutOfRange,

    #[error("value not invertible modulo m")]
    NotInvertible,
}
