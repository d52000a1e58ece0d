//! Low-discrepancy and deterministic random number generation.
//!
//! Test-ray targets are drawn from a Sobol sequence so that a handful of
//! rays covers the target surface far more evenly than independent uniform
//! draws would. A small deterministic PRNG is provided alongside for places
//! where plain uniforms are enough (fixtures, jitter).

/// Number of dimensions the generator produces per draw.
const DIMS: usize = 3;

/// Bits of precision in each component.
const BITS: usize = 32;

/// Primitive-polynomial parameters `(degree, coefficients, initial m)` for
/// Sobol dimensions 2 and 3 (dimension 1 is the van der Corput sequence).
const POLYS: [(usize, u32, [u32; 2]); 2] = [(1, 0, [1, 0]), (2, 1, [1, 3])];

/// Gray-code Sobol sequence over up to 3 dimensions.
///
/// Deterministic: two generators constructed the same way produce the same
/// stream. Draws are in `[0, 1)` and never return the all-zero first
/// element of the textbook sequence.
#[derive(Debug, Clone)]
pub struct SobolSequence {
    directions: [[u32; BITS]; DIMS],
    state: [u32; DIMS],
    index: u32,
}

impl SobolSequence {
    /// Create a generator at the start of the sequence.
    pub fn new() -> Self {
        let mut directions = [[0u32; BITS]; DIMS];

        // Dimension 1: van der Corput
        for (k, v) in directions[0].iter_mut().enumerate() {
            *v = 1 << (31 - k);
        }

        for (dim, &(s, a, m)) in POLYS.iter().enumerate() {
            let v = &mut directions[dim + 1];
            for k in 0..s {
                v[k] = m[k] << (31 - k);
            }
            for k in s..BITS {
                v[k] = v[k - s] ^ (v[k - s] >> s);
                for i in 1..s {
                    if (a >> (s - 1 - i)) & 1 == 1 {
                        v[k] ^= v[k - i];
                    }
                }
            }
        }

        SobolSequence {
            directions,
            state: [0; DIMS],
            index: 0,
        }
    }

    /// Skip ahead by `n` draws (for sequence partitioning across sensors).
    pub fn skip(&mut self, n: u32) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn advance(&mut self) {
        // Gray-code order: flip the direction number of the lowest zero bit
        let c = (!self.index).trailing_zeros() as usize;
        for dim in 0..DIMS {
            self.state[dim] ^= self.directions[dim][c.min(BITS - 1)];
        }
        self.index = self.index.wrapping_add(1);
    }

    /// Next 3D point in `[0, 1)^3`.
    pub fn next3(&mut self) -> [f32; 3] {
        self.advance();
        let scale = 1.0 / (1u64 << 32) as f64;
        [
            (self.state[0] as f64 * scale) as f32,
            (self.state[1] as f64 * scale) as f32,
            (self.state[2] as f64 * scale) as f32,
        ]
    }

    /// Next 2D point in `[0, 1)^2` (first two dimensions of the stream).
    pub fn next2(&mut self) -> [f32; 2] {
        let [a, b, _] = self.next3();
        [a, b]
    }
}

impl Default for SobolSequence {
    fn default() -> Self {
        SobolSequence::new()
    }
}

/// Simple deterministic PRNG (splitmix64) for reproducible sampling.
#[derive(Debug, Clone)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(0x9E3779B97F4A7C15),
        }
    }

    /// Next raw 64-bit value.
    #[inline(always)]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// Uniform f32 in [0, 1).
    #[inline(always)]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform f32 in [lo, hi).
    #[inline(always)]
    pub fn next_range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }
}
