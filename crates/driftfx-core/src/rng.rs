#![forbid(unsafe_code)]

//! Small seeded generator for visual noise.
//!
//! Xorshift64* is plenty for scatter offsets, glitch picks and particle hues,
//! and it keeps every frame reproducible from `(seed, frame)` without pulling
//! in a general-purpose RNG.

/// Xorshift64* generator. Never yields a zero state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FxRng {
    state: u64,
}

impl FxRng {
    /// Seed the generator. A zero seed is remapped to a fixed odd constant.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: splitmix64(seed) | 1,
        };
        // Warm up so nearby seeds diverge immediately.
        rng.next_u64();
        rng
    }

    /// Independent stream for frame `frame` of a run seeded with `seed`.
    pub fn for_frame(seed: u64, frame: u64) -> Self {
        Self::new(seed ^ frame.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Next raw 64-bit value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        // 53 high bits -> exact f64 mantissa.
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform in `[lo, hi)`.
    #[inline]
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform in `[-0.5, 0.5)`, the centered jitter most effects use.
    #[inline]
    pub fn centered(&mut self) -> f64 {
        self.next_f64() - 0.5
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p.clamp(0.0, 1.0)
    }

    /// Uniform index in `0..len`. Returns 0 for `len == 0`.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }

    /// Approximately normal sample (sum of four uniforms), mean 0.
    pub fn gaussian(&mut self, sigma: f64) -> f64 {
        let sum: f64 = (0..4).map(|_| self.next_f64()).sum();
        // Var of a U(0,1) sum of 4 is 1/3.
        (sum - 2.0) * 3f64.sqrt() * sigma
    }
}

#[inline]
fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
