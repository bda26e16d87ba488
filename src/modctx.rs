//! `ModContext`: a reusable modular-arithmetic context for a fixed
//! modulus, backed by Barrett reduction (always) and Montgomery CIOS
//! reduction (when the modulus is odd).
//!
//! Not thread-safe: a context owns scratch-shaped precomputed state.
//! Callers needing concurrency should build one context per thread for
//! the same modulus.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::limb::{self, add, bits, cmp, mul, shift};
use crate::value::BigInt;

struct Montgomery {
    /// `N'` with `N * N' ≡ -1 (mod 2^32)`, used one word at a time by CIOS.
    n_prime: u32,
    /// `R^2 mod m`, `R = 2^(32k)`.
    r2: Vec<u32>,
}

pub struct ModContext {
    modulus: BigInt,
    k: usize,
    /// Barrett reciprocal `floor(2^(64k) / m)`.
    mu: Vec<u32>,
    montgomery: Option<Montgomery>,
}

fn low_limbs(v: &[u32], n: usize) -> Vec<u32> {
    let mut out = vec![0u32; n];
    let take = v.len().min(n);
    out[..take].copy_from_slice(&v[..take]);
    out
}

/// Subtraction mod `2^(32*width)`: any final borrow represents wraparound
/// within that modulus and is simply dropped.
fn sub_mod_pow2(a: &[u32], b: &[u32], width: usize) -> Vec<u32> {
    let mut result = vec![0u32; width];
    let mut borrow: i64 = 0;
    for i in 0..width {
        let av = *a.get(i).unwrap_or(&0) as i64;
        let bv = *b.get(i).unwrap_or(&0) as i64;
        let mut d = av - bv - borrow;
        if d < 0 {
            d += 1i64 << 32;
            borrow = 1;
        } else {
            borrow = 0;
        }
        result[i] = d as u32;
    }
    let mut len = width;
    while len > 0 && result[len - 1] == 0 {
        len -= 1;
    }
    result.truncate(len);
    result
}

impl Montgomery {
    fn new(m: &[u32], k: usize) -> Montgomery {
        let n0 = m[0];
        // Newton iteration for the inverse of an odd word mod 2^32.
        let mut x = n0.wrapping_mul(3) ^ 2;
        for _ in 0..4 {
            x = x.wrapping_mul(2u32.wrapping_sub(n0.wrapping_mul(x)));
        }
        let r2 = Self::compute_r2(m, k);
        // x now satisfies n0*x == 1 (mod 2^32); CIOS needs the negation.
        Montgomery { n_prime: x.wrapping_neg(), r2 }
    }

    fn compute_r2(m: &[u32], k: usize) -> Vec<u32> {
        let r_bit = bits::make_single_bit(32 * k as u32);
        let (_q, r) = limb::div_rem(&r_bit, m).expect("non-zero modulus");
        if r.is_empty() {
            return vec![];
        }
        let mut sq = vec![0u32; 2 * r.len()];
        let len = limb::sqr(&mut sq, &r).expect("square fits");
        sq.truncate(len);
        let (_q2, r2) = limb::div_rem(&sq, m).expect("non-zero modulus");
        r2
    }
}

impl ModContext {
    pub fn new(modulus: BigInt) -> Result<ModContext> {
        if modulus.is_zero() {
            return Err(Error::DivByZero);
        }
        if modulus.is_negative() {
            return Err(Error::ModNegDivisor);
        }
        let mag = modulus.magnitude().to_vec();
        let k = mag.len().max(1);

        let numerator = bits::make_single_bit(64 * k as u32);
        let (mu, _r) = limb::div_rem(&numerator, &mag)?;

        let montgomery = if mag[0] & 1 == 1 {
            Some(Montgomery::new(&mag, k))
        } else {
            None
        };

        tracing::debug!(
            limbs = k,
            montgomery = montgomery.is_some(),
            "ModContext reduction scheme selected"
        );

        Ok(ModContext {
            modulus,
            k,
            mu,
            montgomery,
        })
    }

    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// Barrett-reduces `x`, requiring `0 <= x < m^2`.
    fn barrett_reduce(&self, x: &[u32]) -> Vec<u32> {
        let k = self.k;
        let m = self.modulus.magnitude();

        let mut xh = vec![0u32; x.len() + 1];
        let xh_len = shift::shr(&mut xh, x, 32 * (k as u32).saturating_sub(1));
        xh.truncate(xh_len);

        let mut qfull = vec![0u32; xh.len() + self.mu.len()];
        let qfull_len = if xh.is_empty() {
            0
        } else {
            mul::mul(&mut qfull, &xh, &self.mu).expect("barrett product fits")
        };
        qfull.truncate(qfull_len);

        let mut q = vec![0u32; qfull.len() + 1];
        let q_len = shift::shr(&mut q, &qfull, 32 * (k as u32 + 1));
        q.truncate(q_len);

        let r1 = low_limbs(x, k + 1);

        let mut qm = vec![0u32; q.len() + m.len()];
        let qm_len = if q.is_empty() {
            0
        } else {
            mul::mul(&mut qm, &q, m).expect("q*m fits")
        };
        qm.truncate(qm_len);
        let r2 = low_limbs(&qm, k + 1);

        let mut r = sub_mod_pow2(&r1, &r2, k + 1);
        while cmp::cmp(&r, m) != Ordering::Less {
            let mut z = vec![0u32; r.len().max(m.len())];
            let len = add::sub(&mut z, &r, m).expect("r >= m by the loop condition");
            z.truncate(len);
            r = z;
        }
        r
    }

    fn barrett_mul(&self, a: &[u32], b: &[u32]) -> Vec<u32> {
        if a.is_empty() || b.is_empty() {
            return vec![];
        }
        let mut prod = vec![0u32; a.len() + b.len()];
        let len = mul::mul(&mut prod, a, b).expect("product fits");
        prod.truncate(len);
        self.barrett_reduce(&prod)
    }

    fn barrett_sqr(&self, a: &[u32]) -> Vec<u32> {
        if a.is_empty() {
            return vec![];
        }
        let mut sq = vec![0u32; 2 * a.len()];
        let len = limb::sqr(&mut sq, a).expect("square fits");
        sq.truncate(len);
        self.barrett_reduce(&sq)
    }

    fn montgomery_reduce(&self, t: &[u32]) -> Vec<u32> {
        let mont = self.montgomery.as_ref().expect("montgomery path selected");
        let k = self.k;
        let m = self.modulus.magnitude();

        let mut t = t.to_vec();
        t.resize(2 * k + 2, 0);

        for i in 0..k {
            let u = t[i].wrapping_mul(mont.n_prime);
            let mut carry: u64 = 0;
            for j in 0..k {
                let p = u as u64 * m[j] as u64 + t[i + j] as u64 + carry;
                t[i + j] = p as u32;
                carry = p >> 32;
            }
            let mut idx = i + k;
            while carry != 0 {
                let s = t[idx] as u64 + carry;
                t[idx] = s as u32;
                carry = s >> 32;
                idx += 1;
            }
        }

        let mut result = t[k..2 * k + 1].to_vec();
        let mut len = result.len();
        while len > 0 && result[len - 1] == 0 {
            len -= 1;
        }
        result.truncate(len);

        if cmp::cmp(&result, m) != Ordering::Less {
            let mut z = vec![0u32; result.len().max(m.len())];
            let zlen = add::sub(&mut z, &result, m).expect("single correction suffices");
            z.truncate(zlen);
            result = z;
        }
        result
    }

    fn to_montgomery(&self, x: &[u32]) -> Vec<u32> {
        let mont = self.montgomery.as_ref().expect("montgomery path selected");
        if x.is_empty() {
            return vec![];
        }
        let mut prod = vec![0u32; x.len() + mont.r2.len()];
        let len = mul::mul(&mut prod, x, &mont.r2).expect("product fits");
        prod.truncate(len);
        self.montgomery_reduce(&prod)
    }

    fn montgomery_one(&self) -> Vec<u32> {
        // R mod m, i.e. Montgomery-domain representation of 1.
        let r_bit = bits::make_single_bit(32 * self.k as u32);
        let (_q, r) = limb::div_rem(&r_bit, self.modulus.magnitude()).expect("non-zero modulus");
        r
    }

    fn montgomery_mul(&self, a: &[u32], b: &[u32]) -> Vec<u32> {
        if a.is_empty() || b.is_empty() {
            return vec![];
        }
        let mut prod = vec![0u32; a.len() + b.len()];
        let len = mul::mul(&mut prod, a, b).expect("product fits");
        prod.truncate(len);
        self.montgomery_reduce(&prod)
    }

    fn montgomery_sqr(&self, a: &[u32]) -> Vec<u32> {
        if a.is_empty() {
            return vec![];
        }
        let mut sq = vec![0u32; 2 * a.len()];
        let len = limb::sqr(&mut sq, a).expect("square fits");
        sq.truncate(len);
        self.montgomery_reduce(&sq)
    }

    /// Reduces an arbitrary (possibly negative, possibly `>= m`) value into
    /// `[0, m)` via Euclidean modulus at the value layer.
    fn reduce_to_range(&self, x: &BigInt) -> Result<BigInt> {
        x.modulo(&self.modulus)
    }

    pub fn mod_add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        let m = self.modulus.magnitude();
        let mut s = vec![0u32; a.magnitude().len().max(b.magnitude().len()) + 1];
        let len = add::add(&mut s, a.magnitude(), b.magnitude()).expect("sum fits");
        s.truncate(len);
        if cmp::cmp(&s, m) != Ordering::Less {
            let mut z = vec![0u32; s.len()];
            let zlen = add::sub(&mut z, &s, m).expect("single correction suffices");
            z.truncate(zlen);
            s = z;
        }
        BigInt::from_parts(false, s)
    }

    pub fn mod_sub(&self, a: &BigInt, b: &BigInt) -> BigInt {
        let m = self.modulus.magnitude();
        if cmp::cmp(a.magnitude(), b.magnitude()) != Ordering::Less {
            let mut z = vec![0u32; a.magnitude().len()];
            let len = add::sub(&mut z, a.magnitude(), b.magnitude()).expect("a >= b");
            z.truncate(len);
            BigInt::from_parts(false, z)
        } else {
            let mut s = vec![0u32; a.magnitude().len().max(b.magnitude().len()).max(m.len()) + 1];
            let slen = add::add(&mut s, a.magnitude(), m).expect("sum fits");
            s.truncate(slen);
            let mut z = vec![0u32; s.len()];
            let zlen = add::sub(&mut z, &s, b.magnitude()).expect("a + m >= b");
            z.truncate(zlen);
            BigInt::from_parts(false, z)
        }
    }

    pub fn mod_mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        BigInt::from_parts(false, self.barrett_mul(a.magnitude(), b.magnitude()))
    }

    pub fn mod_sqr(&self, a: &BigInt) -> BigInt {
        BigInt::from_parts(false, self.barrett_sqr(a.magnitude()))
    }

    /// Halves `a` modulo an odd `m`: add `m` first if `a` is odd, then
    /// shift right by one bit.
    pub fn mod_half_lucas(&self, a: &BigInt) -> Result<BigInt> {
        if self.montgomery.is_none() {
            return Err(Error::ModNegDivisor);
        }
        let m = self.modulus.magnitude();
        let odd = a.magnitude().first().copied().unwrap_or(0) & 1 == 1;
        let widened = if odd {
            let mut s = vec![0u32; a.magnitude().len().max(m.len()) + 1];
            let len = add::add(&mut s, a.magnitude(), m).expect("sum fits");
            s.truncate(len);
            s
        } else {
            a.magnitude().to_vec()
        };
        let mut z = vec![0u32; widened.len().max(1)];
        let len = shift::shr(&mut z, &widened, 1);
        z.truncate(len);
        Ok(BigInt::from_parts(false, z))
    }

    fn window_width(exp_bit_len: u32) -> u32 {
        if exp_bit_len < 128 {
            3
        } else if exp_bit_len < 512 {
            4
        } else if exp_bit_len < 2048 {
            5
        } else {
            6
        }
    }

    pub fn mod_pow(&self, base: &BigInt, exp: &BigInt) -> Result<BigInt> {
        if exp.is_negative() {
            return Err(Error::NegBitCount);
        }
        if exp.is_zero() {
            return Ok(if self.modulus == BigInt::one() {
                BigInt::zero()
            } else {
                BigInt::one()
            });
        }
        let b = self.reduce_to_range(base)?;
        if self.montgomery.is_some() {
            Ok(self.mod_pow_montgomery(&b, exp))
        } else {
            Ok(self.mod_pow_barrett(&b, exp))
        }
    }

    fn mod_pow_barrett(&self, base: &BigInt, exp: &BigInt) -> BigInt {
        let base_mag = base.magnitude().to_vec();
        let bit_len = exp.magnitude_bit_len();
        let mut result = base_mag.clone();
        for i in (0..bit_len - 1).rev() {
            result = self.barrett_sqr(&result);
            if exp.test_bit(i) {
                result = self.barrett_mul(&result, &base_mag);
            }
        }
        BigInt::from_parts(false, result)
    }

    fn mod_pow_montgomery(&self, base: &BigInt, exp: &BigInt) -> BigInt {
        let bit_len = exp.magnitude_bit_len();
        let w = Self::window_width(bit_len);
        let num_odds = 1usize << (w - 1);

        let base_mont = self.to_montgomery(base.magnitude());
        let base_sq = self.montgomery_sqr(&base_mont);
        let mut odd_powers: Vec<Vec<u32>> = Vec::with_capacity(num_odds);
        odd_powers.push(base_mont.clone());
        for t in 1..num_odds {
            let next = self.montgomery_mul(&odd_powers[t - 1], &base_sq);
            odd_powers.push(next);
        }

        let mut result = self.montgomery_one();
        let mut i = bit_len as i64 - 1;
        while i >= 0 {
            let i_u = i as u32;
            if !exp.test_bit(i_u) {
                result = self.montgomery_sqr(&result);
                i -= 1;
                continue;
            }
            let mut l: u32 = w.min(i_u + 1);
            while l > 1 && !exp.test_bit(i_u + 1 - l) {
                l -= 1;
            }
            for _ in 0..l {
                result = self.montgomery_sqr(&result);
            }
            let mut window_val: u32 = 0;
            for bit in 0..l {
                if exp.test_bit(i_u + 1 - l + bit) {
                    window_val |= 1 << bit;
                }
            }
            let idx = ((window_val - 1) / 2) as usize;
            result = self.montgomery_mul(&result, &odd_powers[idx]);
            i -= l as i64;
        }

        BigInt::from_parts(false, self.montgomery_reduce(&result))
    }

    /// Extended Euclidean algorithm at the value layer (rather than raw
    /// rotating limb buffers): `old_r`/`r` stay non-negative by
    /// construction since both start non-negative and division is
    /// truncating on non-negative operands.
    pub fn mod_inv(&self, a: &BigInt) -> Result<BigInt> {
        let m = &self.modulus;
        let a0 = self.reduce_to_range(a)?;

        let (mut old_r, mut r) = (m.clone(), a0);
        let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

        while !r.is_zero() {
            let q = old_r.div(&r)?;
            let new_r = old_r.checked_sub(&q.checked_mul(&r));
            old_r = r;
            r = new_r;
            let new_t = old_t.checked_sub(&q.checked_mul(&t));
            old_t = t;
            t = new_t;
        }

        if old_r != BigInt::one() {
            return Err(Error::NotInvertible);
        }

        let mut result = old_t.rem(m)?;
        if result.is_negative() {
            result = result.checked_add(m);
        }
        if cmp::cmp(result.magnitude(), m.magnitude()) != Ordering::Less {
            result = result.checked_sub(m);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_mod_pow() {
        let m = BigInt::from_text("1000000007").unwrap();
        let ctx = ModContext::new(m).unwrap();
        let base = BigInt::from(2i64);
        let exp = BigInt::from(1000i64);
        let got = ctx.mod_pow(&base, &exp).unwrap();
        assert_eq!(got.to_string(), "688423210");
    }

    #[test]
    fn mod_pow_zero_exponent_is_one() {
        let m = BigInt::from(97i64);
        let ctx = ModContext::new(m).unwrap();
        let got = ctx.mod_pow(&BigInt::from(5i64), &BigInt::zero()).unwrap();
        assert_eq!(got, BigInt::one());
    }

    #[test]
    fn mod_pow_barrett_path_for_even_modulus() {
        let m = BigInt::from(100i64);
        let ctx = ModContext::new(m).unwrap();
        let got = ctx.mod_pow(&BigInt::from(3i64), &BigInt::from(4i64)).unwrap();
        assert_eq!(got.to_string(), "81"); // 3^4 = 81 < 100
    }

    #[test]
    fn mod_inv_matches_definition() {
        let m = BigInt::from(26i64);
        let ctx = ModContext::new(m.clone()).unwrap();
        let a = BigInt::from(7i64); // gcd(7,26) = 1
        let inv = ctx.mod_inv(&a).unwrap();
        let check = a.checked_mul(&inv).modulo(&m).unwrap();
        assert_eq!(check, BigInt::one());
    }

    #[test]
    fn mod_inv_rejects_non_coprime() {
        let m = BigInt::from(26i64);
        let ctx = ModContext::new(m).unwrap();
        let a = BigInt::from(4i64); // gcd(4,26) = 2
        assert_eq!(ctx.mod_inv(&a), Err(Error::NotInvertible));
    }

    #[test]
    fn mod_add_sub_single_correction() {
        let m = BigInt::from(13i64);
        let ctx = ModContext::new(m).unwrap();
        let a = BigInt::from(10i64);
        let b = BigInt::from(8i64);
        assert_eq!(ctx.mod_add(&a, &b).to_string(), "5");
        assert_eq!(ctx.mod_sub(&a, &b).to_string(), "2");
        assert_eq!(ctx.mod_sub(&b, &a).to_string(), "11");
    }

    #[test]
    fn rejects_zero_and_negative_modulus() {
        assert!(matches!(ModContext::new(BigInt::zero()), Err(Error::DivByZero)));
        assert!(matches!(
            ModContext::new(BigInt::from(-5i64)),
            Err(Error::ModNegDivisor)
        ));
    }
}
