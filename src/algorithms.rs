//! Free-function view over the algorithms the limb engine and the value
//! layer already implement (factorial, GCD/LCM, power, integer square
//! root). Kept as thin wrappers so call sites can `use
//! bignum::algorithms::*` without reaching into `BigInt`'s inherent
//! methods.

use crate::value::BigInt;

pub fn factorial(n: u64) -> BigInt {
    BigInt::factorial(n)
}

pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    BigInt::gcd(a, b)
}

pub fn lcm(a: &BigInt, b: &BigInt) -> BigInt {
    BigInt::lcm(a, b)
}

pub fn pow(base: &BigInt, exp: u32) -> BigInt {
    base.pow(exp)
}

pub fn isqrt(value: &BigInt) -> BigInt {
    value.isqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_matches_inherent_method() {
        assert_eq!(factorial(10), BigInt::factorial(10));
    }

    #[test]
    fn gcd_lcm_consistency() {
        let a = BigInt::from(462i64);
        let b = BigInt::from(1071i64);
        let g = gcd(&a, &b);
        let l = lcm(&a, &b);
        assert_eq!(g.to_string(), "21");
        assert_eq!(l.checked_mul(&g), a.checked_mul(&b));
    }

    #[test]
    fn pow_and_isqrt_roundtrip() {
        let ten = BigInt::ten();
        let big = pow(&ten, 40);
        assert_eq!(isqrt(&big), pow(&ten, 20));
    }
}
