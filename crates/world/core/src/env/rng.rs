//! RNG oracle for deterministic random number generation.
//!
//! Random flow groups draw their evaluation order from this oracle. Given the
//! same seed, implementations must produce the same values, so a world
//! replayed with the same seed and inputs evolves identically.

/// RNG oracle for deterministic random number generation.
pub trait RngOracle {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }

    /// A permutation of `0..len` (Fisher-Yates, one draw per swap).
    fn permutation(&self, len: usize, seed: u64) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        for i in (1..len).rev() {
            let bound = u32::try_from(i).unwrap_or(u32::MAX);
            let j = self.range(seed.wrapping_add(i as u64), 0, bound) as usize;
            order.swap(i, j);
        }
        order
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Stateless: every draw is derived from the seed it is given.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a deterministic seed for one random draw.
///
/// * `world_seed` - base seed from [`crate::EngineConfig::seed`]
/// * `tick` - tick being evaluated
/// * `actor` - walked actor
/// * `draw` - counter distinguishing several draws by the same actor in one
///   tick
pub fn compute_seed(world_seed: u64, tick: u64, actor: u32, draw: u32) -> u64 {
    let mut hash = world_seed;
    hash ^= tick.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (draw as u64).wrapping_mul(0x85ebca6b);

    // avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
