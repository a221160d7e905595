use rand::{Rng, SeedableRng, XorShiftRng};

/// The random decisions the maze generator needs to make.
///
/// Every `rand::Rng` is a `RandomSource`. Tests can supply a scripted source instead to force
/// particular wall decisions.
pub trait RandomSource {
    /// A fair coin.
    fn coin_flip(&mut self) -> bool;

    /// Uniformly pick an index in `0..n`. `n` must be greater than zero.
    fn index_below(&mut self, n: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    #[inline]
    fn coin_flip(&mut self) -> bool {
        self.gen()
    }

    #[inline]
    fn index_below(&mut self, n: usize) -> usize {
        self.gen_range(0, n)
    }
}

/// Deterministic generator for a given seed.
///
/// Nearby seeds give unrelated sequences: the seed is spread over the four state words with
/// splitmix64, as XorShift barely mixes its state in the first outputs.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    let mut state = seed;
    let mut words = [0u32; 4];
    for pair in words.chunks_mut(2) {
        let mixed = splitmix64(&mut state);
        pair[0] = mixed as u32;
        pair[1] = (mixed >> 32) as u32;
    }
    // XorShift must not be seeded with all zeros.
    if words.iter().all(|&w| w == 0) {
        words[0] = 0x9E37_79B9;
    }
    XorShiftRng::from_seed(words)
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A fresh seed from the thread local generator.
pub fn random_seed() -> u64 {
    rand::thread_rng().gen()
}
