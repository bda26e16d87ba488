//! The mutable `BigIntAccumulator`: a growable magnitude plus a scratch
//! buffer (`tmp1`) used to avoid self-aliasing hazards in multiply,
//! square, and divide.

use std::ops::{AddAssign, MulAssign, RemAssign, SubAssign};

use crate::error::{Error, Result};
use crate::limb;
use crate::meta::Meta;
use crate::value::BigInt;

/// Grows capacity to the next multiple of four limbs, matching the
/// resize policy a caller doing repeated small increments would want.
fn round_up_capacity(limbs: usize) -> usize {
    (limbs + 3) & !3
}

#[derive(Clone, Debug)]
pub struct BigIntAccumulator {
    meta: Meta,
    mag: Vec<u32>,
    tmp1: Vec<u32>,
}

impl Default for BigIntAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl BigIntAccumulator {
    pub fn new() -> BigIntAccumulator {
        BigIntAccumulator {
            meta: Meta::ZERO,
            mag: Vec::new(),
            tmp1: Vec::new(),
        }
    }

    pub fn with_bit_capacity(bits: u32) -> BigIntAccumulator {
        let mut acc = BigIntAccumulator::new();
        acc.hint_bit_capacity(bits);
        acc
    }

    pub fn hint_bit_capacity(&mut self, bits: u32) {
        let limbs = round_up_capacity(((bits + 31) / 32) as usize);
        if self.mag.capacity() < limbs {
            self.mag.reserve(limbs - self.mag.len());
        }
    }

    fn ensure_capacity_discard(&mut self, limbs: usize) {
        let limbs = round_up_capacity(limbs);
        self.mag.clear();
        self.mag.resize(limbs, 0);
    }

    fn ensure_capacity_copy(&mut self, limbs: usize) {
        let limbs = round_up_capacity(limbs);
        if self.mag.len() < limbs {
            self.mag.resize(limbs, 0);
        }
    }

    fn ensure_tmp1(&mut self, limbs: usize) {
        let limbs = round_up_capacity(limbs);
        if self.tmp1.len() < limbs {
            self.tmp1.resize(limbs, 0);
        }
    }

    fn set_from_result(&mut self, negative: bool, len: usize) {
        self.mag.truncate(self.mag.len().max(len));
        while self.mag.len() > len {
            self.mag.pop();
        }
        self.meta = Meta::new(negative, len as u32);
    }

    pub fn to_big_int(&self) -> BigInt {
        BigInt::from_parts(self.meta.is_negative(), self.mag[..self.meta.len_usize()].to_vec())
    }

    pub fn is_zero(&self) -> bool {
        self.meta.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.meta.is_negative()
    }

    fn active(&self) -> &[u32] {
        &self.mag[..self.meta.len_usize()]
    }

    // ---- set ----

    pub fn set_zero(&mut self) {
        self.meta = Meta::ZERO;
    }

    pub fn set_one(&mut self) {
        self.ensure_capacity_copy(1);
        self.mag[0] = 1;
        self.meta = Meta::new(false, 1);
    }

    pub fn set(&mut self, value: &BigInt) {
        let mag = value.magnitude();
        self.ensure_capacity_discard(mag.len());
        self.mag[..mag.len()].copy_from_slice(mag);
        self.meta = value.meta();
    }

    pub fn negate(&mut self) {
        self.meta = self.meta.negate();
    }

    // ---- arithmetic, writing x op y into self ----

    pub fn set_add(&mut self, x: &BigInt, y: &BigInt) {
        let (xm, xneg) = (x.magnitude(), x.is_negative());
        let (ym, yneg) = (y.magnitude(), y.is_negative());
        self.ensure_capacity_copy(xm.len().max(ym.len()) + 1);

        if xneg == yneg {
            let len = limb::add(&mut self.mag, xm, ym).expect("accumulator sized for sum");
            self.set_from_result(xneg, len);
        } else {
            match limb::cmp(xm, ym) {
                std::cmp::Ordering::Equal => self.set_zero(),
                std::cmp::Ordering::Greater => {
                    let len = limb::sub(&mut self.mag, xm, ym).expect("ordered magnitudes");
                    self.set_from_result(xneg, len);
                }
                std::cmp::Ordering::Less => {
                    let len = limb::sub(&mut self.mag, ym, xm).expect("ordered magnitudes");
                    self.set_from_result(yneg, len);
                }
            }
        }
    }

    pub fn set_sub(&mut self, x: &BigInt, y: &BigInt) {
        self.set_add(x, &y.negate());
    }

    /// `self = x * y`, routed through `tmp1` so a destination aliasing
    /// `x` or `y` is never read after being partially overwritten.
    pub fn set_mul(&mut self, x: &BigInt, y: &BigInt) {
        let (xm, ym) = (x.magnitude(), y.magnitude());
        if xm.is_empty() || ym.is_empty() {
            self.set_zero();
            return;
        }
        self.ensure_tmp1(xm.len() + ym.len());
        let len = limb::mul(&mut self.tmp1, xm, ym).expect("tmp1 sized for product");
        self.ensure_capacity_discard(len);
        self.mag[..len].copy_from_slice(&self.tmp1[..len]);
        self.set_from_result(x.is_negative() != y.is_negative(), len);
    }

    /// `self = x^2`, via `tmp1`.
    pub fn set_sqr(&mut self, x: &BigInt) {
        let xm = x.magnitude();
        if xm.is_empty() {
            self.set_zero();
            return;
        }
        self.ensure_tmp1(2 * xm.len());
        let len = limb::sqr::sqr(&mut self.tmp1, xm).expect("tmp1 sized for square");
        self.ensure_capacity_discard(len);
        self.mag[..len].copy_from_slice(&self.tmp1[..len]);
        self.set_from_result(false, len);
    }

    pub fn set_div(&mut self, x: &BigInt, y: &BigInt) -> Result<()> {
        if y.is_zero() {
            return Err(Error::DivByZero);
        }
        let (q, _r) = limb::div_rem(x.magnitude(), y.magnitude())?;
        let negative = if q.is_empty() {
            false
        } else {
            x.is_negative() != y.is_negative()
        };
        self.ensure_capacity_discard(q.len());
        self.mag[..q.len()].copy_from_slice(&q);
        self.set_from_result(negative, q.len());
        Ok(())
    }

    pub fn set_rem(&mut self, x: &BigInt, y: &BigInt) -> Result<()> {
        if y.is_zero() {
            return Err(Error::DivByZero);
        }
        let (_q, r) = limb::div_rem(x.magnitude(), y.magnitude())?;
        let negative = !r.is_empty() && x.is_negative();
        self.ensure_capacity_discard(r.len());
        self.mag[..r.len()].copy_from_slice(&r);
        self.set_from_result(negative, r.len());
        Ok(())
    }

    pub fn set_shl(&mut self, x: &BigInt, bits: u32) -> Result<()> {
        let xm = x.magnitude();
        let needed = xm.len() + (bits / 32) as usize + 2;
        self.ensure_capacity_discard(needed);
        let len = limb::shift::shl(&mut self.mag, xm, bits)?;
        self.set_from_result(x.is_negative() && len > 0, len);
        Ok(())
    }

    pub fn set_shr(&mut self, x: &BigInt, bits: u32) {
        let xm = x.magnitude();
        self.ensure_capacity_discard(xm.len().max(1));
        let len = limb::shift::shr(&mut self.mag, xm, bits);
        self.set_from_result(x.is_negative() && len > 0, len);
    }

    /// Unsigned-style right shift: ignores sign, result non-negative.
    pub fn set_ushr(&mut self, x: &BigInt, bits: u32) {
        let xm = x.magnitude();
        self.ensure_capacity_discard(xm.len().max(1));
        let len = limb::shift::shr(&mut self.mag, xm, bits);
        self.set_from_result(false, len);
    }

    /// Fallible `%=`; the `RemAssign` trait impl panics on a zero divisor,
    /// this is the `Result`-returning escape hatch for callers that want
    /// to handle it.
    pub fn try_rem_assign(&mut self, other: &BigInt) -> Result<()> {
        let lhs = self.to_big_int();
        self.set_rem(&lhs, other)
    }

    // ---- accumulating helpers ----

    /// `self += v^2`, computing the square into `tmp1` first.
    pub fn add_square_of(&mut self, v: &BigInt) {
        let vm = v.magnitude();
        if vm.is_empty() {
            return;
        }
        self.ensure_tmp1(2 * vm.len());
        let len = limb::sqr::sqr(&mut self.tmp1, vm).expect("tmp1 sized for square");
        let square = BigInt::from_parts(false, self.tmp1[..len].to_vec());
        self.add_assign(&square);
    }

    pub fn add_abs_value_of(&mut self, v: &BigInt) {
        self.add_assign(&v.abs());
    }

    // ---- bits ----

    pub fn set_bit(&mut self, i: u32) {
        let needed = (i / 32) as usize + 1;
        self.ensure_capacity_copy(needed);
        let len = limb::set_bit(&mut self.mag, self.mag.len(), i).expect("capacity ensured above");
        self.set_from_result(self.meta.is_negative(), len.max(self.meta.len_usize()));
    }

    pub fn clear_bit(&mut self, i: u32) {
        let len = limb::clear_bit(&mut self.mag, self.meta.len_usize(), i);
        self.set_from_result(self.meta.is_negative(), len);
    }

    pub fn active_magnitude(&self) -> &[u32] {
        self.active()
    }
}

impl AddAssign<&BigInt> for BigIntAccumulator {
    fn add_assign(&mut self, other: &BigInt) {
        let lhs = self.to_big_int();
        self.set_add(&lhs, other);
    }
}

impl AddAssign<BigInt> for BigIntAccumulator {
    fn add_assign(&mut self, other: BigInt) {
        *self += &other;
    }
}

impl SubAssign<&BigInt> for BigIntAccumulator {
    fn sub_assign(&mut self, other: &BigInt) {
        let lhs = self.to_big_int();
        self.set_sub(&lhs, other);
    }
}

impl SubAssign<BigInt> for BigIntAccumulator {
    fn sub_assign(&mut self, other: BigInt) {
        *self -= &other;
    }
}

impl MulAssign<&BigInt> for BigIntAccumulator {
    fn mul_assign(&mut self, other: &BigInt) {
        let lhs = self.to_big_int();
        self.set_mul(&lhs, other);
    }
}

impl MulAssign<BigInt> for BigIntAccumulator {
    fn mul_assign(&mut self, other: BigInt) {
        *self *= &other;
    }
}

/// Panics on a zero divisor; use [`BigIntAccumulator::try_rem_assign`] to
/// handle that case explicitly.
impl RemAssign<&BigInt> for BigIntAccumulator {
    fn rem_assign(&mut self, other: &BigInt) {
        self.try_rem_assign(other).expect("remainder by zero");
    }
}

impl RemAssign<BigInt> for BigIntAccumulator {
    fn rem_assign(&mut self, other: BigInt) {
        *self %= &other;
    }
}

macro_rules! impl_assign_primitive {
    ($trait:ident, $method:ident, $prim:ty) => {
        impl $trait<$prim> for BigIntAccumulator {
            fn $method(&mut self, rhs: $prim) {
                self.$method(&BigInt::from(rhs));
            }
        }
    };
}

macro_rules! impl_assign_primitives {
    ($prim:ty) => {
        impl_assign_primitive!(AddAssign, add_assign, $prim);
        impl_assign_primitive!(SubAssign, sub_assign, $prim);
        impl_assign_primitive!(MulAssign, mul_assign, $prim);
        impl_assign_primitive!(RemAssign, rem_assign, $prim);
    };
}

impl_assign_primitives!(i32);
impl_assign_primitives!(u32);
impl_assign_primitives!(i64);
impl_assign_primitives!(u64);
impl_assign_primitives!(i128);
impl_assign_primitives!(u128);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_add_basic() {
        let mut acc = BigIntAccumulator::new();
        acc.set_add(&BigInt::from(5i64), &BigInt::from(7i64));
        assert_eq!(acc.to_big_int().to_string(), "12");
    }

    #[test]
    fn set_add_mixed_signs() {
        let mut acc = BigIntAccumulator::new();
        acc.set_add(&BigInt::from(5i64), &BigInt::from(-7i64));
        assert_eq!(acc.to_big_int().to_string(), "-2");
    }

    #[test]
    fn set_mul_uses_tmp1_not_corrupted_by_destination() {
        let mut acc = BigIntAccumulator::new();
        acc.set_one();
        let x = acc.to_big_int();
        acc.set_mul(&x, &BigInt::from(42i64));
        assert_eq!(acc.to_big_int().to_string(), "42");
    }

    #[test]
    fn set_sqr_matches_mul_by_self() {
        let mut acc = BigIntAccumulator::new();
        let x = BigInt::from(123456789i64);
        acc.set_sqr(&x);
        assert_eq!(acc.to_big_int(), x.sqr());
    }

    #[test]
    fn compound_assign_chain() {
        let mut acc = BigIntAccumulator::new();
        acc.set(&BigInt::from(10i64));
        acc += &BigInt::from(5i64);
        acc -= &BigInt::from(3i64);
        acc *= &BigInt::from(2i64);
        assert_eq!(acc.to_big_int().to_string(), "24");
    }

    #[test]
    fn compound_assign_with_primitives() {
        let mut acc = BigIntAccumulator::new();
        acc.set(&BigInt::from(10i64));
        acc += 5i32;
        acc -= 3u64;
        acc *= 2i128;
        acc %= 5u32;
        assert_eq!(acc.to_big_int().to_string(), "3");
    }

    #[test]
    fn add_square_of_accumulates() {
        let mut acc = BigIntAccumulator::new();
        acc.set_one();
        acc.add_square_of(&BigInt::from(3i64));
        acc.add_square_of(&BigInt::from(4i64));
        assert_eq!(acc.to_big_int().to_string(), "26"); // 1 + 9 + 16
    }

    #[test]
    fn set_bit_and_clear_bit() {
        let mut acc = BigIntAccumulator::new();
        acc.set_bit(40);
        assert!(acc.to_big_int().test_bit(40));
        acc.clear_bit(40);
        assert!(acc.is_zero());
    }

    #[test]
    fn div_by_zero_errors() {
        let mut acc = BigIntAccumulator::new();
        let x = BigInt::from(5i64);
        let zero = BigInt::zero();
        assert_eq!(acc.set_div(&x, &zero), Err(Error::DivByZero));
    }
}
