use rand_xoshiro::{
    Xoshiro256PlusPlus,
    rand_core::{RngCore, SeedableRng},
};

/// Generates a reproducible sequence of `length` symbols drawn uniformly
/// from `alpha`.
#[must_use]
pub fn rand_sequence(alpha: &[u8], length: usize, seed: u64) -> Vec<u8> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (1..=length).map(|_| alpha[rng.next_u32() as usize % alpha.len()]).collect()
}

/// Draws `count` substrings of length `k` from `seq` at random offsets. Half
/// of them (rounded down) are instead fresh random patterns, which mostly do
/// not occur in `seq`.
///
/// ## Panics
///
/// Panics if `k` is zero or longer than `seq`.
#[must_use]
pub fn rand_patterns(seq: &[u8], k: usize, count: usize, seed: u64) -> Vec<Vec<u8>> {
    assert!(k > 0 && k <= seq.len(), "pattern length must fit the sequence");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let starts = seq.len() - k + 1;

    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                let s = rng.next_u64() as usize % starts;
                seq[s..s + k].to_vec()
            } else {
                rand_sequence(b"ACGT", k, rng.next_u64())
            }
        })
        .collect()
}
