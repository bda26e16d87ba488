//! Squaring, dispatching between schoolbook-as-multiply, cross-diagonal
//! schoolbook squaring, and a Karatsuba split for large inputs.
//!
//! The thresholds below are a performance policy, not a correctness
//! requirement: moving them changes which code path runs but never changes
//! the result.

use super::mul::mul;
use crate::error::{Error, Result};

const SCHOOLBOOK_MUL_MAX: usize = 18;
const CROSS_DIAGONAL_MAX: usize = 83;

/// `z = x * x`. `z` needs capacity `2 * x.len()`.
pub fn sqr(z: &mut [u32], x: &[u32]) -> Result<usize> {
    let n = super::trim(x).len();
    let x = &x[..n];
    if n == 0 {
        return Ok(0);
    }
    if z.len() < 2 * n {
        return Err(Error::MulOverflow);
    }

    if n <= SCHOOLBOOK_MUL_MAX {
        mul(z, x, x)
    } else if n <= CROSS_DIAGONAL_MAX {
        sqr_cross_diagonal(z, x)
    } else {
        sqr_karatsuba(z, x)
    }
}

/// Cross-diagonal schoolbook squaring: cross terms doubled via two adds
/// (never a left shift, to avoid a 65-bit intermediate), then diagonals
/// added once.
fn sqr_cross_diagonal(z: &mut [u32], x: &[u32]) -> Result<usize> {
    let n = x.len();
    z[..2 * n].fill(0);

    // Cross terms: for i < j, add x[i]*x[j] into column i+j twice.
    for i in 0..n {
        if x[i] == 0 {
            continue;
        }
        let mut carry: u64 = 0;
        for j in (i + 1)..n {
            let prod = x[i] as u64 * x[j] as u64;
            // First addition.
            let acc1 = z[i + j] as u64 + (prod as u32) as u64 + carry;
            z[i + j] = acc1 as u32;
            let carry1 = acc1 >> 32;
            // Second addition, using the just-written low limb so the
            // intermediate never needs to exceed 64 bits.
            let acc2 = z[i + j] as u64 + (prod as u32) as u64 + carry1;
            z[i + j] = acc2 as u32;
            carry = (prod >> 32) * 2 + (acc2 >> 32);
        }
        let mut k = i + n;
        while carry != 0 {
            let acc = z[k] as u64 + carry;
            z[k] = acc as u32;
            carry = acc >> 32;
            k += 1;
        }
    }

    // Diagonals: add x[i]^2 once into columns 2i, 2i+1.
    let mut carry: u64 = 0;
    for i in 0..n {
        let sq = x[i] as u64 * x[i] as u64;
        let acc_lo = z[2 * i] as u64 + (sq as u32) as u64 + carry;
        z[2 * i] = acc_lo as u32;
        let carry1 = acc_lo >> 32;
        let acc_hi = z[2 * i + 1] as u64 + (sq >> 32) + carry1;
        z[2 * i + 1] = acc_hi as u32;
        carry = acc_hi >> 32;
    }
    let mut k = 2 * n;
    while carry != 0 {
        let acc = z[k] as u64 + carry;
        z[k] = acc as u32;
        carry = acc >> 32;
        k += 1;
    }

    let mut len = 2 * n;
    while len > 0 && z[len - 1] == 0 {
        len -= 1;
    }
    Ok(len)
}

/// Karatsuba squaring: split `x` into high/low halves and combine three
/// sub-products (`lo^2`, `hi^2`, and `(hi+lo)^2 - hi^2 - lo^2`).
fn sqr_karatsuba(z: &mut [u32], x: &[u32]) -> Result<usize> {
    let n = x.len();
    let half = n / 2;
    let (lo, hi) = x.split_at(half);

    let lo_sq_len = 2 * half.max(1);
    let mut lo_sq = vec![0u32; lo_sq_len];
    let ll = sqr(&mut lo_sq, lo)?;

    let hi_len = hi.len();
    let mut hi_sq = vec![0u32; 2 * hi_len.max(1)];
    let hl = sqr(&mut hi_sq, hi)?;

    // mid = lo + hi
    let mut mid = vec![0u32; hi_len.max(half) + 1];
    let mid_len = super::add::add(&mut mid, lo, hi)?;
    let mut mid_sq = vec![0u32; 2 * mid_len.max(1) + 2];
    let msl = sqr(&mut mid_sq, &mid[..mid_len])?;

    // cross = mid_sq - lo_sq - hi_sq
    let mut cross = vec![0u32; msl.max(1)];
    let c1 = super::add::sub(&mut cross, &mid_sq[..msl], &lo_sq[..ll])?;
    let mut cross2 = vec![0u32; c1.max(1)];
    let c2 = super::add::sub(&mut cross2, &cross[..c1], &hi_sq[..hl])?;

    z[..2 * n].fill(0);
    // z = hi_sq << (2*half*32) + cross << (half*32) + lo_sq
    add_shifted(z, &lo_sq[..ll], 0)?;
    add_shifted(z, &cross2[..c2], half)?;
    add_shifted(z, &hi_sq[..hl], 2 * half)?;

    let mut len = 2 * n;
    while len > 0 && z[len - 1] == 0 {
        len -= 1;
    }
    Ok(len)
}

/// Adds `src`, interpreted as shifted left by `limb_shift` whole limbs,
/// into `dst` in place (propagating carry). `dst` must be large enough to
/// hold the sum.
fn add_shifted(dst: &mut [u32], src: &[u32], limb_shift: usize) -> Result<()> {
    let mut carry: u64 = 0;
    let mut i = 0;
    while i < src.len() || carry != 0 {
        let idx = limb_shift + i;
        if idx >= dst.len() {
            if carry != 0 || i < src.len() {
                return Err(Error::MulOverflow);
            }
            break;
        }
        let s = if i < src.len() { src[i] as u64 } else { 0 };
        let acc = dst[idx] as u64 + s + carry;
        dst[idx] = acc as u32;
        carry = acc >> 32;
        i += 1;
    }
    Ok(())
}
