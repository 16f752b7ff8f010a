//! Random draws used by spawning and effects
//!
//! The session owns a boxed `RngCore` so tests can script the draws.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Seeded generator for a new session
pub fn seeded(seed: u64) -> Box<dyn RngCore> {
    Box::new(Pcg32::seed_from_u64(seed))
}

/// Uniform draw in [0, 1)
#[inline]
pub fn unit(rng: &mut dyn RngCore) -> f32 {
    rng.random::<f32>()
}

/// Uniform draw in [min, min + spread) for a positive upper end
#[inline]
pub fn range(rng: &mut dyn RngCore, min: f32, spread: f32) -> f32 {
    let max = min + spread;
    let v = min + unit(rng) * spread;
    // The top draw can round up onto `max`
    if v < max { v } else { f32::from_bits(max.to_bits() - 1) }
}

/// Uniform draw in [-magnitude / 2, magnitude / 2)
#[inline]
pub fn centered(rng: &mut dyn RngCore, magnitude: f32) -> f32 {
    (unit(rng) - 0.5) * magnitude
}

/// True with probability `p`
#[inline]
pub fn chance(rng: &mut dyn RngCore, p: f32) -> bool {
    unit(rng) < p
}

/// Generator that always yields the same word
///
/// `FixedRng(0)` makes every `unit` draw 0.0, `FixedRng(u32::MAX)` makes it
/// just below 1.0.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedRng(pub u32);

#[cfg(test)]
impl FixedRng {
    pub const LOW: FixedRng = FixedRng(0);
    pub const HIGH: FixedRng = FixedRng(u32::MAX);
}

#[cfg(test)]
impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.0
    }

    fn next_u64(&mut self) -> u64 {
        ((self.0 as u64) << 32) | self.0 as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.0.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
