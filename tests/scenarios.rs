//! End-to-end scenarios exercised only through the public API surface.

use bignum::{BigInt, ModContext};

#[test]
fn decimal_addition() {
    let a: BigInt = "123456789012345678901234567890".parse().unwrap();
    let b: BigInt = "987654321098765432109876543210".parse().unwrap();
    assert_eq!((a + b).to_string(), "1111111110111111111011111111100");
}

#[test]
fn hex_xor_round_trip() {
    let a = BigInt::from_hex_text("ff00ff00").unwrap();
    let b = BigInt::from_hex_text("0f0f0f0f").unwrap();
    let x = a.xor(&b);
    assert_eq!(x.to_hex_string(Default::default()), "0xF00FF00F");
}

#[test]
fn factorial_25() {
    let f = BigInt::factorial(25);
    assert_eq!(f.to_string(), "15511210043330985984000000");
}

#[test]
fn gcd_of_fibonacci_neighbors() {
    let a = BigInt::from(832040u64);
    let b = BigInt::from(514229u64);
    assert_eq!(BigInt::gcd(&a, &b), BigInt::one());
}

#[test]
fn isqrt_of_a_perfect_square() {
    let n = BigInt::from(10u64).pow(40);
    assert_eq!(n.isqrt(), BigInt::from(10u64).pow(20));
}

#[test]
fn mod_pow_matches_known_residue() {
    let ctx = ModContext::new(BigInt::from(1_000_000_007u64)).unwrap();
    let r = ctx
        .mod_pow(&BigInt::from(2u64), &BigInt::from(1000u64))
        .unwrap();
    assert_eq!(r.to_string(), "688423210");
}

#[test]
fn division_and_remainder_sign_rules() {
    let a = BigInt::from(-7i64);
    let b = BigInt::from(2i64);
    assert_eq!(a.div(&b).unwrap(), BigInt::from(-3i64));
    assert_eq!(a.rem(&b).unwrap(), BigInt::from(-1i64));
    assert_eq!(a.modulo(&b).unwrap(), BigInt::from(1i64));
}
