//! Property tests over the public API, generating plain `i64`/`u64`
//! seeds and lifting them into `BigInt` since `BigInt` itself has no
//! `Arbitrary` impl.

use bignum::{BigInt, ModContext};
use quickcheck_macros::quickcheck;

#[quickcheck]
fn add_is_commutative(a: i64, b: i64) -> bool {
    let (a, b) = (BigInt::from(a), BigInt::from(b));
    a.checked_add(&b) == b.checked_add(&a)
}

#[quickcheck]
fn add_sub_inverse(a: i64, b: i64) -> bool {
    let (a, b) = (BigInt::from(a), BigInt::from(b));
    a.checked_add(&b).checked_sub(&b) == a
}

#[quickcheck]
fn mul_is_commutative(a: i32, b: i32) -> bool {
    let (a, b) = (BigInt::from(a), BigInt::from(b));
    a.checked_mul(&b) == b.checked_mul(&a)
}

#[quickcheck]
fn mul_distributes_over_add(a: i32, b: i32, c: i32) -> bool {
    let (a, b, c) = (BigInt::from(a), BigInt::from(b), BigInt::from(c));
    a.checked_mul(&b.checked_add(&c)) == a.checked_mul(&b).checked_add(&a.checked_mul(&c))
}

#[quickcheck]
fn div_rem_reconstructs_dividend(a: i64, b: i64) -> bool {
    if b == 0 {
        return true;
    }
    let (a, b) = (BigInt::from(a), BigInt::from(b));
    let q = a.div(&b).unwrap();
    let r = a.rem(&b).unwrap();
    q.checked_mul(&b).checked_add(&r) == a
}

#[quickcheck]
fn modulo_is_always_non_negative_for_positive_modulus(a: i64, b: i64) -> bool {
    if b == 0 {
        return true;
    }
    let (a, b) = (BigInt::from(a), BigInt::from(b.abs()));
    if b.is_zero() {
        return true;
    }
    a.modulo(&b).map(|m| !m.is_negative()).unwrap_or(false)
}

#[quickcheck]
fn text_round_trips(a: i64) -> bool {
    let n = BigInt::from(a);
    n.to_string().parse::<BigInt>().unwrap() == n
}

#[quickcheck]
fn hex_round_trips(a: u64) -> bool {
    let n = BigInt::from(a);
    let s = n.to_hex_string(Default::default());
    BigInt::from_hex_text(&s).unwrap() == n
}

#[quickcheck]
fn bytes_round_trip_unsigned(a: u64) -> bool {
    use bignum::{Encoding, Endian};
    let n = BigInt::from(a);
    let bytes = n.to_bytes(Endian::Big, Encoding::Unsigned).unwrap();
    BigInt::from_bytes(&bytes, Endian::Big, Encoding::Unsigned) == n
}

#[quickcheck]
fn bytes_round_trip_twos_complement(a: i64) -> bool {
    use bignum::{Encoding, Endian};
    let n = BigInt::from(a);
    let bytes = n.to_bytes(Endian::Big, Encoding::TwosComplement).unwrap();
    BigInt::from_bytes(&bytes, Endian::Big, Encoding::TwosComplement) == n
}

#[quickcheck]
fn shl_shr_roundtrip_for_nonnegative(a: u32, shift: u8) -> bool {
    let n = BigInt::from(a);
    let shift = (shift % 64) as u32;
    n.shl(shift).unwrap().shr(shift) == n
}

#[quickcheck]
fn and_or_xor_consistency(a: u32, b: u32) -> bool {
    let (x, y) = (BigInt::from(a), BigInt::from(b));
    x.and(&y).or(&x.xor(&y)) == x.or(&y)
}

#[quickcheck]
fn gcd_divides_both_operands(a: u32, b: u32) -> bool {
    if a == 0 || b == 0 {
        return true;
    }
    let (x, y) = (BigInt::from(a), BigInt::from(b));
    let g = BigInt::gcd(&x, &y);
    x.rem(&g).unwrap().is_zero() && y.rem(&g).unwrap().is_zero()
}

#[quickcheck]
fn isqrt_is_floor_of_true_root(a: u32) -> bool {
    let n = BigInt::from(a);
    let r = n.isqrt();
    let r_plus_1 = r.checked_add(&BigInt::one());
    r.checked_mul(&r) <= n && r_plus_1.checked_mul(&r_plus_1) > n
}

#[quickcheck]
fn mod_pow_matches_repeated_mul(base: u8, exp: u8, modulus: u8) -> bool {
    if modulus == 0 {
        return true;
    }
    let m = BigInt::from(modulus as u64);
    let ctx = match ModContext::new(m.clone()) {
        Ok(ctx) => ctx,
        Err(_) => return true,
    };
    let base = BigInt::from(base as u64).modulo(&m).unwrap();
    let mut expected = BigInt::one().modulo(&m).unwrap();
    for _ in 0..exp {
        expected = ctx.mod_mul(&expected, &base);
    }
    let got = ctx.mod_pow(&base, &BigInt::from(exp as u64)).unwrap();
    got == expected
}

#[quickcheck]
fn mod_inv_satisfies_definition(a: u8, modulus: u8) -> bool {
    if modulus < 2 {
        return true;
    }
    let m = BigInt::from(modulus as u64);
    let ctx = ModContext::new(m.clone()).unwrap();
    let a = BigInt::from(a as u64).modulo(&m).unwrap();
    match ctx.mod_inv(&a) {
        Ok(inv) => ctx.mod_mul(&a, &inv) == BigInt::one().modulo(&m).unwrap(),
        Err(_) => true,
    }
}
