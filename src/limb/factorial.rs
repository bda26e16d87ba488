//! Factorial: native accumulator up to 20!, then iterative multiply with
//! a Stirling's-approximation capacity preallocation.

use super::mul;

const SMALL_FACTORIALS: [u64; 21] = {
    let mut table = [1u64; 21];
    let mut i = 1usize;
    while i <= 20 {
        table[i] = table[i - 1] * i as u64;
        i += 1;
    }
    table
};

/// `n!`. Seeds from `20!` for `n > 20` and multiplies in the remaining
/// terms one at a time.
pub fn factorial(n: u64) -> Vec<u32> {
    if n <= 20 {
        return from_u64(SMALL_FACTORIALS[n as usize]);
    }

    let capacity_limbs = stirling_limb_estimate(n);
    let mut acc = from_u64(SMALL_FACTORIALS[20]);
    acc.reserve(capacity_limbs.saturating_sub(acc.len()));

    for k in 21..=n {
        let mut z = vec![0u32; acc.len() + 3];
        let len = if k <= u32::MAX as u64 {
            mul::mul_small(&mut z, &acc, k as u32).expect("factorial step fits")
        } else {
            mul::mul_small_wide(&mut z, &acc, k).expect("factorial step fits")
        };
        z.truncate(len);
        acc = z;
    }
    acc
}

fn from_u64(v: u64) -> Vec<u32> {
    let mut limbs = vec![v as u32, (v >> 32) as u32];
    while limbs.len() > 0 && *limbs.last().unwrap() == 0 {
        limbs.pop();
    }
    limbs
}

/// Stirling's formula for `log2(n!)`, converted to a limb count.
fn stirling_limb_estimate(n: u64) -> usize {
    let nf = n as f64;
    let log2n = nf.log2();
    let log2e = std::f64::consts::LOG2_E;
    let bits = nf * log2n - nf * log2e
        + 0.5 * (2.0 * std::f64::consts::PI * nf).log2()
        + 1.0 / (12.0 * nf * std::f64::consts::LN_2)
        + 1.0;
    (bits / 32.0).ceil() as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_u128(v: &[u32]) -> u128 {
        v.iter().rev().fold(0u128, |acc, &l| (acc << 32) | l as u128)
    }

    #[test]
    fn small_factorials() {
        assert_eq!(to_u128(&factorial(0)), 1);
        assert_eq!(to_u128(&factorial(1)), 1);
        assert_eq!(to_u128(&factorial(5)), 120);
        assert_eq!(to_u128(&factorial(20)), 2432902008176640000);
    }

    #[test]
    fn factorial_25_matches_known_value() {
        let got = factorial(25);
        let expect = "15511210043330985984000000";
        assert_eq!(super::super::print::to_decimal_string(&got, false), expect);
    }
}
