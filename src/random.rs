//! Uniform-bit oracle abstraction.
//!
//! The library treats randomness as an external collaborator: callers
//! supply any source of uniform bits rather than the crate owning an RNG.

/// A source of uniform random bits. Implement this over any RNG; no
/// particular distribution guarantee is made beyond "uniform over the
/// requested width".
pub trait UniformBitSource {
    /// 32 uniformly distributed bits.
    fn next_u32(&mut self) -> u32;

    /// A uniformly distributed boolean, used for random sign selection.
    fn next_bool(&mut self) -> bool {
        self.next_u32() & 1 != 0
    }
}

/// Fills `ceil(bit_len / 32)` limbs with uniform bits and masks the top
/// limb down to exactly `bit_len` bits.
pub fn fill_uniform_magnitude(rng: &mut dyn UniformBitSource, bit_len: u32) -> Vec<u32> {
    if bit_len == 0 {
        return vec![];
    }
    let nlimbs = ((bit_len + 31) / 32) as usize;
    let mut limbs: Vec<u32> = (0..nlimbs).map(|_| rng.next_u32()).collect();
    let top_bits = bit_len % 32;
    if top_bits != 0 {
        let mask = (1u32 << top_bits) - 1;
        *limbs.last_mut().unwrap() &= mask;
    }
    let mut len = limbs.len();
    while len > 0 && limbs[len - 1] == 0 {
        len -= 1;
    }
    limbs.truncate(len);
    limbs
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::UniformBitSource;

    /// Deterministic xorshift generator, test-only.
    pub struct XorShift32(pub u32);

    impl UniformBitSource for XorShift32 {
        fn next_u32(&mut self) -> u32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            x
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::XorShift32;

    #[test]
    fn fills_exact_bit_length() {
        let mut rng = XorShift32(12345);
        let mag = fill_uniform_magnitude(&mut rng, 40);
        assert!(crate::limb::bit_length(&mag) <= 40);
    }

    #[test]
    fn zero_bit_length_is_empty() {
        let mut rng = XorShift32(1);
        assert!(fill_uniform_magnitude(&mut rng, 0).is_empty());
    }
}
