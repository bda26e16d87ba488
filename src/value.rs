//! The immutable `BigInt` value: a `Meta` paired with a shared,
//! read-only magnitude.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Rem, Shl, Shr, Sub};
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use crate::error::{Error, Result};
use crate::limb::{self, bytes::{Encoding, Endian}, print::HexFormat};
use crate::meta::Meta;
use crate::random::{fill_uniform_magnitude, UniformBitSource};

/// An immutable arbitrary-precision signed integer.
///
/// Magnitudes are held behind an `Arc<[u32]>` so that `abs()` and
/// `negate()` can share the backing limbs with their source, and so
/// values are cheap to clone and safe to share across threads.
#[derive(Clone, Debug)]
pub struct BigInt {
    meta: Meta,
    mag: Arc<[u32]>,
}

fn zero_cell() -> &'static BigInt {
    static CELL: OnceLock<BigInt> = OnceLock::new();
    CELL.get_or_init(|| BigInt {
        meta: Meta::ZERO,
        mag: Arc::from(&[][..]),
    })
}

fn one_cell() -> &'static BigInt {
    static CELL: OnceLock<BigInt> = OnceLock::new();
    CELL.get_or_init(|| BigInt {
        meta: Meta::new(false, 1),
        mag: Arc::from(&[1u32][..]),
    })
}

fn neg_one_cell() -> &'static BigInt {
    static CELL: OnceLock<BigInt> = OnceLock::new();
    CELL.get_or_init(|| BigInt {
        meta: Meta::new(true, 1),
        mag: Arc::from(&[1u32][..]),
    })
}

fn ten_cell() -> &'static BigInt {
    static CELL: OnceLock<BigInt> = OnceLock::new();
    CELL.get_or_init(|| BigInt {
        meta: Meta::new(false, 1),
        mag: Arc::from(&[10u32][..]),
    })
}

impl BigInt {
    pub fn zero() -> BigInt {
        zero_cell().clone()
    }

    pub fn one() -> BigInt {
        one_cell().clone()
    }

    pub fn neg_one() -> BigInt {
        neg_one_cell().clone()
    }

    pub fn ten() -> BigInt {
        ten_cell().clone()
    }

    /// Builds a value from a sign flag and an un-normalized magnitude,
    /// trimming trailing zero limbs and canonicalizing the sign of zero.
    pub(crate) fn from_parts(negative: bool, mut mag: Vec<u32>) -> BigInt {
        let len = limb::normalized_len(&mag);
        mag.truncate(len);
        if len == 0 {
            return BigInt::zero();
        }
        BigInt {
            meta: Meta::new(negative, len as u32),
            mag: Arc::from(mag.into_boxed_slice()),
        }
    }

    pub(crate) fn magnitude(&self) -> &[u32] {
        &self.mag
    }

    pub(crate) fn meta(&self) -> Meta {
        self.meta
    }

    pub fn sign(&self) -> i32 {
        self.meta.signum()
    }

    pub fn is_zero(&self) -> bool {
        self.meta.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.meta.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.meta.is_positive()
    }

    pub fn is_magnitude_power_of_two(&self) -> bool {
        !self.is_zero() && limb::popcount(&self.mag) == 1
    }

    pub fn abs(&self) -> BigInt {
        BigInt {
            meta: self.meta.abs(),
            mag: Arc::clone(&self.mag),
        }
    }

    pub fn negate(&self) -> BigInt {
        BigInt {
            meta: self.meta.negate(),
            mag: Arc::clone(&self.mag),
        }
    }

    pub fn magnitude_bit_len(&self) -> u32 {
        limb::bit_length(&self.mag)
    }

    /// BigInteger-style bit length: `magnitudeBitLen`, except a negative
    /// exact power of two reports one less (its two's-complement
    /// encoding needs no extra sign-extension limb).
    pub fn bit_length_bigint_style(&self) -> u32 {
        let n = self.magnitude_bit_len();
        if self.is_negative() && self.is_magnitude_power_of_two() {
            n - 1
        } else {
            n
        }
    }

    // ---- text ----

    pub fn from_text(s: &str) -> Result<BigInt> {
        let (negative, mag) = limb::parse_decimal(s.as_bytes())?;
        Ok(BigInt::from_parts(negative, mag))
    }

    pub fn from_hex_text(s: &str) -> Result<BigInt> {
        let (negative, mag) = limb::parse_hex(s.as_bytes())?;
        Ok(BigInt::from_parts(negative, mag))
    }

    pub fn to_hex_string(&self, fmt: HexFormat) -> String {
        limb::to_hex_string(&self.mag, self.is_negative(), fmt)
    }

    // ---- bytes ----

    pub fn from_bytes(bytes: &[u8], endian: Endian, encoding: Encoding) -> BigInt {
        let (negative, mag) = limb::decode_bytes(bytes, endian, encoding);
        BigInt::from_parts(negative, mag)
    }

    /// Minimal-width byte encoding.
    pub fn to_bytes(&self, endian: Endian, encoding: Encoding) -> Result<Vec<u8>> {
        limb::encode_bytes(&self.mag, self.is_negative(), endian, encoding, None)
    }

    /// Byte encoding padded or sign-extended to exactly `len` bytes.
    /// Errors with `Error::OutOfRange` if the value doesn't fit in `len`
    /// bytes under `encoding`.
    pub fn to_bytes_with_len(
        &self,
        endian: Endian,
        encoding: Encoding,
        len: usize,
    ) -> Result<Vec<u8>> {
        limb::encode_bytes(&self.mag, self.is_negative(), endian, encoding, Some(len))
    }

    pub fn from_little_endian_limbs(negative: bool, limbs: &[u32]) -> BigInt {
        BigInt::from_parts(negative, limbs.to_vec())
    }

    // ---- bit builders ----

    pub fn with_set_bit(i: u32) -> BigInt {
        BigInt::from_parts(false, limb::make_single_bit(i))
    }

    pub fn with_bit_mask(width: u32, i: u32) -> BigInt {
        BigInt::from_parts(false, limb::make_bit_mask(width, i))
    }

    /// `|self| & ((2^width - 1) << i)`, always non-negative.
    pub fn with_bit_mask_of(&self, width: u32, i: u32) -> BigInt {
        let mask = limb::make_bit_mask(width, i);
        BigInt::from_parts(false, limb::bits::and(&self.mag, &mask))
    }

    pub fn with_set_bit_of(&self, i: u32) -> BigInt {
        let needed = (i / 32) as usize + 1;
        let mut buf = self.mag.to_vec();
        if buf.len() < needed {
            buf.resize(needed, 0);
        }
        let len = limb::set_bit(&mut buf, buf.len(), i).expect("buffer sized for bit index");
        buf.truncate(len);
        BigInt::from_parts(false, buf)
    }

    pub fn with_clear_bit_of(&self, i: u32) -> BigInt {
        let mut buf = self.mag.to_vec();
        let len = limb::clear_bit(&mut buf, buf.len(), i);
        buf.truncate(len);
        BigInt::from_parts(false, buf)
    }

    pub fn test_bit(&self, i: u32) -> bool {
        limb::test_bit(&self.mag, i)
    }

    // ---- random ----

    pub fn random_with_max_bit_len(
        max_bit_len: u32,
        rng: &mut dyn UniformBitSource,
        with_sign: bool,
    ) -> Result<BigInt> {
        if max_bit_len > crate::meta::MAX_LIMBS * 32 {
            return Err(Error::BitLenOutOfRange);
        }
        let mag = fill_uniform_magnitude(rng, max_bit_len);
        let negative = with_sign && !mag.is_empty() && rng.next_bool();
        Ok(BigInt::from_parts(negative, mag))
    }

    pub fn random_with_bit_len(
        bit_len: u32,
        rng: &mut dyn UniformBitSource,
        with_sign: bool,
    ) -> Result<BigInt> {
        if bit_len == 0 || bit_len > crate::meta::MAX_LIMBS * 32 {
            return Err(Error::BitLenOutOfRange);
        }
        let mut mag = fill_uniform_magnitude(rng, bit_len);
        let needed = ((bit_len + 31) / 32) as usize;
        if mag.len() < needed {
            mag.resize(needed, 0);
        }
        let len = limb::set_bit(&mut mag, mag.len(), bit_len - 1)?;
        mag.truncate(len);
        let negative = with_sign && rng.next_bool();
        Ok(BigInt::from_parts(negative, mag))
    }

    pub fn random_below(max: &BigInt, rng: &mut dyn UniformBitSource) -> Result<BigInt> {
        if max.is_zero() || max.is_negative() {
            return Err(Error::BitLenOutOfRange);
        }
        let bit_len = max.magnitude_bit_len();
        loop {
            let candidate = BigInt::random_with_max_bit_len(bit_len, rng, false)?;
            if candidate.cmp(max) == Ordering::Less {
                return Ok(candidate);
            }
        }
    }

    // ---- arithmetic ----

    pub fn checked_add(&self, other: &BigInt) -> BigInt {
        if self.is_negative() == other.is_negative() {
            let mut z = vec![0u32; self.mag.len().max(other.mag.len()) + 1];
            let len = limb::add(&mut z, &self.mag, &other.mag).expect("add fits");
            z.truncate(len);
            BigInt::from_parts(self.is_negative(), z)
        } else {
            match limb::cmp(&self.mag, &other.mag) {
                Ordering::Equal => BigInt::zero(),
                Ordering::Greater => {
                    let mut z = vec![0u32; self.mag.len()];
                    let len = limb::sub(&mut z, &self.mag, &other.mag).expect("magnitudes ordered");
                    z.truncate(len);
                    BigInt::from_parts(self.is_negative(), z)
                }
                Ordering::Less => {
                    let mut z = vec![0u32; other.mag.len()];
                    let len = limb::sub(&mut z, &other.mag, &self.mag).expect("magnitudes ordered");
                    z.truncate(len);
                    BigInt::from_parts(other.is_negative(), z)
                }
            }
        }
    }

    pub fn checked_sub(&self, other: &BigInt) -> BigInt {
        self.checked_add(&other.negate())
    }

    pub fn checked_mul(&self, other: &BigInt) -> BigInt {
        if self.is_zero() || other.is_zero() {
            return BigInt::zero();
        }
        let mut z = vec![0u32; self.mag.len() + other.mag.len()];
        let len = limb::mul(&mut z, &self.mag, &other.mag).expect("mul fits");
        z.truncate(len);
        BigInt::from_parts(self.is_negative() != other.is_negative(), z)
    }

    pub fn sqr(&self) -> BigInt {
        if self.is_zero() {
            return BigInt::zero();
        }
        let mut z = vec![0u32; 2 * self.mag.len()];
        let len = limb::sqr::sqr(&mut z, &self.mag).expect("sqr fits");
        z.truncate(len);
        BigInt::from_parts(false, z)
    }

    /// Truncating division (quotient rounds toward zero, matching the
    /// sign of `self.signum() * other.signum()`).
    pub fn div(&self, other: &BigInt) -> Result<BigInt> {
        if other.is_zero() {
            return Err(Error::DivByZero);
        }
        let (q, _r) = limb::div_rem(&self.mag, &other.mag)?;
        Ok(BigInt::from_parts(
            self.is_negative() != other.is_negative(),
            q,
        ))
    }

    /// Truncating remainder; takes the sign of the dividend (`self`).
    pub fn rem(&self, other: &BigInt) -> Result<BigInt> {
        if other.is_zero() {
            return Err(Error::DivByZero);
        }
        let (_q, r) = limb::div_rem(&self.mag, &other.mag)?;
        Ok(BigInt::from_parts(self.is_negative(), r))
    }

    /// Infallible truncating division; panics on a zero divisor. Backs
    /// the `Div` operator impl.
    pub fn checked_div(&self, other: &BigInt) -> BigInt {
        self.div(other).expect("division by zero")
    }

    /// Infallible truncating remainder; panics on a zero divisor. Backs
    /// the `Rem` operator impl.
    pub fn checked_rem(&self, other: &BigInt) -> BigInt {
        self.rem(other).expect("remainder by zero")
    }

    /// Euclidean modulus: result always lies in `[0, other)`. Requires a
    /// non-negative divisor.
    pub fn modulo(&self, other: &BigInt) -> Result<BigInt> {
        if other.is_negative() {
            return Err(Error::ModNegDivisor);
        }
        if other.is_zero() {
            return Err(Error::DivByZero);
        }
        let r = self.rem(other)?;
        if r.is_negative() {
            Ok(r.checked_add(other))
        } else {
            Ok(r)
        }
    }

    /// Primitive-on-the-left division: `other / self`.
    pub fn div_inverse(&self, other: i64) -> Result<BigInt> {
        BigInt::from(other).div(self)
    }

    /// Primitive-on-the-left remainder: `other % self`.
    pub fn rem_inverse(&self, other: i64) -> Result<BigInt> {
        BigInt::from(other).rem(self)
    }

    pub fn pow(&self, exp: u32) -> BigInt {
        let mut result = BigInt::one();
        let mut base = self.clone();
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = result.checked_mul(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.sqr();
            }
        }
        result
    }

    pub fn isqrt(&self) -> BigInt {
        if self.is_negative() {
            return BigInt::zero();
        }
        BigInt::from_parts(false, limb::isqrt(&self.mag))
    }

    pub fn factorial(n: u64) -> BigInt {
        BigInt::from_parts(false, limb::factorial(n))
    }

    pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
        BigInt::from_parts(false, limb::gcd(&a.mag, &b.mag))
    }

    pub fn lcm(a: &BigInt, b: &BigInt) -> BigInt {
        BigInt::from_parts(false, limb::lcm(&a.mag, &b.mag))
    }

    // ---- bitwise (magnitude only, non-negative results) ----

    pub fn and(&self, other: &BigInt) -> BigInt {
        BigInt::from_parts(false, limb::bits::and(&self.mag, &other.mag))
    }

    pub fn or(&self, other: &BigInt) -> BigInt {
        BigInt::from_parts(false, limb::bits::or(&self.mag, &other.mag))
    }

    pub fn xor(&self, other: &BigInt) -> BigInt {
        BigInt::from_parts(false, limb::bits::xor(&self.mag, &other.mag))
    }

    /// Unsigned-style right shift: treats the value as a raw magnitude,
    /// ignoring sign. Always non-negative.
    pub fn ushr(&self, bits: u32) -> BigInt {
        let mut z = vec![0u32; self.mag.len().max(1)];
        let len = limb::shift::shr(&mut z, &self.mag, bits);
        z.truncate(len);
        BigInt::from_parts(false, z)
    }

    /// Arithmetic left shift: `self * 2^bits`.
    pub fn shl(&self, bits: u32) -> Result<BigInt> {
        if self.is_zero() {
            return Ok(BigInt::zero());
        }
        let n = self.mag.len();
        let needed = n + (bits / 32) as usize + 2;
        let mut z = vec![0u32; needed];
        let len = limb::shift::shl(&mut z, &self.mag, bits)?;
        z.truncate(len);
        Ok(BigInt::from_parts(self.is_negative(), z))
    }

    /// Arithmetic right shift: `floor(self / 2^bits)`, rounding toward
    /// negative infinity for negative operands.
    pub fn shr(&self, bits: u32) -> BigInt {
        let mut shifted = vec![0u32; self.mag.len().max(1)];
        let len = limb::shift::shr(&mut shifted, &self.mag, bits);
        shifted.truncate(len);

        if !self.is_negative() {
            return BigInt::from_parts(false, shifted);
        }

        // Round toward -infinity: if any shifted-out low bit was set,
        // increment the magnitude before reapplying the sign.
        let restored_len = shifted.len() + (bits as usize / 32) + 2;
        let mut restored = vec![0u32; restored_len];
        let rlen = if shifted.is_empty() {
            0
        } else {
            limb::shift::shl(&mut restored, &shifted, bits).expect("shl fits")
        };
        let lost_bits = limb::cmp(&self.mag, &restored[..rlen]) != Ordering::Equal;
        let mut mag = shifted;
        if lost_bits {
            let mut z = vec![0u32; mag.len() + 1];
            let len = limb::add(&mut z, &mag, &[1]).expect("increment fits");
            z.truncate(len);
            mag = z;
        }
        BigInt::from_parts(true, mag)
    }

    // ---- fits / conversions ----

    pub fn fits_i32(&self) -> bool {
        self.to_i64_exact().map(|v| i32::try_from(v).is_ok()).unwrap_or(false)
    }

    pub fn fits_u32(&self) -> bool {
        !self.is_negative() && self.magnitude_bit_len() <= 32
    }

    pub fn fits_i64(&self) -> bool {
        self.to_i64_exact().is_ok()
    }

    pub fn fits_u64(&self) -> bool {
        !self.is_negative() && self.magnitude_bit_len() <= 64
    }

    fn to_u64_magnitude(&self) -> u64 {
        let lo = *self.mag.first().unwrap_or(&0) as u64;
        let hi = *self.mag.get(1).unwrap_or(&0) as u64;
        lo | (hi << 32)
    }

    /// Wraps to the low 32 bits, applying sign, matching two's-complement
    /// truncation semantics (no error on overflow).
    pub fn to_i32(&self) -> i32 {
        let lo = *self.mag.first().unwrap_or(&0);
        if self.is_negative() {
            (lo as i32).wrapping_neg()
        } else {
            lo as i32
        }
    }

    pub fn to_i64(&self) -> i64 {
        let v = self.to_u64_magnitude() as i64;
        if self.is_negative() {
            v.wrapping_neg()
        } else {
            v
        }
    }

    pub fn to_i32_exact(&self) -> Result<i32> {
        self.to_i64_exact().and_then(|v| i32::try_from(v).map_err(|_| Error::OutOfRange))
    }

    pub fn to_i64_exact(&self) -> Result<i64> {
        if self.magnitude_bit_len() > 64 {
            return Err(Error::OutOfRange);
        }
        let mag = self.to_u64_magnitude();
        if self.is_negative() {
            if mag > i64::MIN.unsigned_abs() {
                return Err(Error::OutOfRange);
            }
            Ok((mag as i64).wrapping_neg())
        } else {
            i64::try_from(mag).map_err(|_| Error::OutOfRange)
        }
    }

    pub fn to_u32_exact(&self) -> Result<u32> {
        if self.is_negative() || self.magnitude_bit_len() > 32 {
            return Err(Error::OutOfRange);
        }
        Ok(*self.mag.first().unwrap_or(&0))
    }

    pub fn to_u64_exact(&self) -> Result<u64> {
        if self.is_negative() || self.magnitude_bit_len() > 64 {
            return Err(Error::OutOfRange);
        }
        Ok(self.to_u64_magnitude())
    }

    pub fn to_i32_clamped(&self) -> i32 {
        self.to_i64_exact()
            .map(|v| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
            .unwrap_or(if self.is_negative() { i32::MIN } else { i32::MAX })
    }

    pub fn to_i64_clamped(&self) -> i64 {
        self.to_i64_exact()
            .unwrap_or(if self.is_negative() { i64::MIN } else { i64::MAX })
    }
}

// ---- From primitives ----

macro_rules! impl_from_unsigned {
    ($t:ty) => {
        impl From<$t> for BigInt {
            fn from(v: $t) -> BigInt {
                let v = v as u64;
                let mut limbs = vec![v as u32, (v >> 32) as u32];
                let len = limb::normalized_len(&limbs);
                limbs.truncate(len);
                BigInt::from_parts(false, limbs)
            }
        }
    };
}

macro_rules! impl_from_signed {
    ($t:ty) => {
        impl From<$t> for BigInt {
            fn from(v: $t) -> BigInt {
                let negative = v < 0;
                let mag = (v as i64).unsigned_abs();
                let mut limbs = vec![mag as u32, (mag >> 32) as u32];
                let len = limb::normalized_len(&limbs);
                limbs.truncate(len);
                BigInt::from_parts(negative, limbs)
            }
        }
    };
}

impl_from_unsigned!(u8);
impl_from_unsigned!(u16);
impl_from_unsigned!(u32);
impl_from_unsigned!(u64);
impl_from_unsigned!(usize);
impl_from_signed!(i8);
impl_from_signed!(i16);
impl_from_signed!(i32);
impl_from_signed!(i64);
impl_from_signed!(isize);

impl From<u128> for BigInt {
    fn from(v: u128) -> BigInt {
        let mut limbs = vec![
            v as u32,
            (v >> 32) as u32,
            (v >> 64) as u32,
            (v >> 96) as u32,
        ];
        let len = limb::normalized_len(&limbs);
        limbs.truncate(len);
        BigInt::from_parts(false, limbs)
    }
}

impl From<i128> for BigInt {
    fn from(v: i128) -> BigInt {
        let negative = v < 0;
        let mag = v.unsigned_abs();
        let mut limbs = vec![
            mag as u32,
            (mag >> 32) as u32,
            (mag >> 64) as u32,
            (mag >> 96) as u32,
        ];
        let len = limb::normalized_len(&limbs);
        limbs.truncate(len);
        BigInt::from_parts(negative, limbs)
    }
}

impl FromStr for BigInt {
    type Err = Error;
    fn from_str(s: &str) -> Result<BigInt> {
        BigInt::from_text(s)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&limb::to_decimal_string(&self.mag, self.is_negative()))
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.meta == other.meta && limb::cmp(&self.mag, &other.mag) == Ordering::Equal
    }
}
impl Eq for BigInt {}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign(), other.sign()) {
            (a, b) if a != b => a.cmp(&b),
            (0, 0) => Ordering::Equal,
            (1, 1) => limb::cmp(&self.mag, &other.mag),
            (-1, -1) => limb::cmp(&other.mag, &self.mag),
            _ => unreachable!(),
        }
    }
}

impl Hash for BigInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_negative().hash(state);
        let mut h: u32 = 0;
        for &limb in self.mag.iter() {
            h = h.wrapping_mul(31).wrapping_add(limb);
        }
        h.hash(state);
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $inner:ident) => {
        impl $trait for BigInt {
            type Output = BigInt;
            fn $method(self, rhs: BigInt) -> BigInt {
                self.$inner(&rhs)
            }
        }
        impl $trait for &BigInt {
            type Output = BigInt;
            fn $method(self, rhs: &BigInt) -> BigInt {
                self.$inner(rhs)
            }
        }
    };
}

forward_binop!(Add, add, checked_add);
forward_binop!(Sub, sub, checked_sub);
forward_binop!(Mul, mul, checked_mul);
forward_binop!(Div, div, checked_div);
forward_binop!(Rem, rem, checked_rem);
forward_binop!(BitAnd, bitand, and);
forward_binop!(BitOr, bitor, or);
forward_binop!(BitXor, bitxor, xor);

macro_rules! forward_binop_primitive {
    ($trait:ident, $method:ident, $inner:ident, $prim:ty) => {
        impl $trait<$prim> for BigInt {
            type Output = BigInt;
            fn $method(self, rhs: $prim) -> BigInt {
                self.$inner(&BigInt::from(rhs))
            }
        }
        impl $trait<$prim> for &BigInt {
            type Output = BigInt;
            fn $method(self, rhs: $prim) -> BigInt {
                self.$inner(&BigInt::from(rhs))
            }
        }
    };
}

macro_rules! forward_binop_primitives {
    ($prim:ty) => {
        forward_binop_primitive!(Add, add, checked_add, $prim);
        forward_binop_primitive!(Sub, sub, checked_sub, $prim);
        forward_binop_primitive!(Mul, mul, checked_mul, $prim);
        forward_binop_primitive!(Div, div, checked_div, $prim);
        forward_binop_primitive!(Rem, rem, checked_rem, $prim);
    };
}

forward_binop_primitives!(i32);
forward_binop_primitives!(u32);
forward_binop_primitives!(i64);
forward_binop_primitives!(u64);
forward_binop_primitives!(i128);
forward_binop_primitives!(u128);

impl Neg for BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        self.negate()
    }
}

impl Neg for &BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        self.negate()
    }
}

impl Shl<u32> for BigInt {
    type Output = BigInt;
    fn shl(self, bits: u32) -> BigInt {
        BigInt::shl(&self, bits).expect("shift overflow")
    }
}

impl Shr<u32> for BigInt {
    type Output = BigInt;
    fn shr(self, bits: u32) -> BigInt {
        BigInt::shr(&self, bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_roundtrip() {
        let a = BigInt::from(123i64);
        let b = BigInt::from(-456i64);
        assert_eq!((a.clone() + b.clone()).to_string(), "-333");
        assert_eq!((a.clone() - b.clone()).to_string(), "579");
        assert_eq!((a.clone() + a.negate()), BigInt::zero());
    }

    #[test]
    fn primitive_rhs_operators() {
        let a = BigInt::from(100i64);
        assert_eq!((a.clone() + 23i32).to_string(), "123");
        assert_eq!((a.clone() - 1u64).to_string(), "99");
        assert_eq!((a.clone() * 2i128).to_string(), "200");
        assert_eq!((a.clone() / 7u32).to_string(), "14");
        assert_eq!((a % 7u32).to_string(), "2");
    }

    #[test]
    fn scenario_decimal_addition() {
        let a = BigInt::from_text("123_456_789_012_345_678_901_234").unwrap();
        let one = BigInt::one();
        assert_eq!((a + one).to_string(), "123456789012345678901235");
    }

    #[test]
    fn scenario_hex_xor() {
        let a = BigInt::from_hex_text("0xDEAD_BEEF").unwrap();
        let b = BigInt::from_hex_text("0x0F0F_0F0F").unwrap();
        assert_eq!((a ^ b).to_string(), "3472328296");
    }

    #[test]
    fn scenario_factorial_25() {
        assert_eq!(
            BigInt::factorial(25).to_string(),
            "15511210043330985984000000"
        );
    }

    #[test]
    fn scenario_gcd() {
        let a = BigInt::from_text("462").unwrap();
        let b = BigInt::from_text("1071").unwrap();
        assert_eq!(BigInt::gcd(&a, &b).to_string(), "21");
    }

    #[test]
    fn scenario_isqrt_of_power() {
        let ten = BigInt::ten();
        let n = ten.pow(40);
        assert_eq!(n.isqrt(), ten.pow(20));
    }

    #[test]
    fn division_and_remainder_sign_rules() {
        let a = BigInt::from(-7i64);
        let b = BigInt::from(2i64);
        assert_eq!(a.div(&b).unwrap().to_string(), "-3");
        assert_eq!(a.rem(&b).unwrap().to_string(), "-1");
        assert_eq!(a.modulo(&b).unwrap().to_string(), "1");
    }

    #[test]
    fn mod_rejects_negative_divisor() {
        let a = BigInt::from(7i64);
        let b = BigInt::from(-2i64);
        assert_eq!(a.modulo(&b), Err(Error::ModNegDivisor));
    }

    #[test]
    fn shr_rounds_toward_negative_infinity() {
        let a = BigInt::from(-5i64);
        assert_eq!(a.shr(1).to_string(), "-3");
        let b = BigInt::from(-8i64);
        assert_eq!(b.shr(3).to_string(), "-1");
    }

    #[test]
    fn shl_shr_roundtrip_for_nonnegative() {
        let a = BigInt::from(12345u64);
        let shifted = a.clone().shl(17).unwrap();
        assert_eq!(shifted.shr(17), a);
    }

    #[test]
    fn ordering_respects_sign_then_magnitude() {
        let neg = BigInt::from(-5i64);
        let pos = BigInt::from(3i64);
        assert!(neg < pos);
        assert!(BigInt::from(2i64) < BigInt::from(3i64));
        assert!(BigInt::from(-3i64) < BigInt::from(-2i64));
    }

    #[test]
    fn abs_and_negate_share_magnitude() {
        let a = BigInt::from(-42i64);
        let b = a.abs();
        assert!(Arc::ptr_eq(&a.mag, &b.mag));
    }

    #[test]
    fn exact_conversions_reject_out_of_range() {
        let huge = BigInt::ten().pow(30);
        assert_eq!(huge.to_i64_exact(), Err(Error::OutOfRange));
        assert_eq!(BigInt::from(42i64).to_i64_exact(), Ok(42));
    }
}
