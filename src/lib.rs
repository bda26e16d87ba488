//! Arbitrary-precision signed integers with a modular-arithmetic context
//! suitable for cryptographic primitives.
//!
//! The hard engineering lives in [`limb`]: normalized multi-limb
//! add/sub/mul/sqr/div, Knuth Algorithm D division, cross-diagonal and
//! Karatsuba squaring, and the Barrett/Montgomery reduction kernels.
//! [`value::BigInt`] and [`accumulator::BigIntAccumulator`] are the two
//! user-facing shapes built on top of it; [`modctx::ModContext`] carries
//! the reduction state for a fixed modulus.

pub mod accumulator;
pub mod algorithms;
pub mod error;
pub mod limb;
pub mod meta;
pub mod modctx;
pub mod random;
pub mod value;

pub use accumulator::BigIntAccumulator;
pub use error::{Error, Result};
pub use limb::bytes::{Encoding, Endian};
pub use limb::print::HexFormat;
pub use modctx::ModContext;
pub use random::UniformBitSource;
pub use value::BigInt;
