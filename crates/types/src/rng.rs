//! Small deterministic random number generator.
//!
//! Games and demos use it for noise, particle placement and similar effects
//! where a reproducible sequence is more useful than cryptographic quality.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Seed from the wall clock.
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(1);
        Self::new(nanos)
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[min, max]` (inclusive on both ends).
    ///
    /// Bounds given in the wrong order are swapped.
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = (hi as i64 - lo as i64 + 1) as u64;
        // Upper bits of an LCG are far better distributed than the low ones.
        let r = (self.next_u32() >> 8) as u64;
        (lo as i64 + (r % span) as i64) as i32
    }

    /// Random value in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimpleRng::new(42);
        let mut b = SimpleRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_does_not_stick() {
        let mut rng = SimpleRng::new(0);
        let first = rng.next_u32();
        let second = rng.next_u32();
        assert_ne!(first, second);
    }

    #[test]
    fn range_stays_inclusive() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 16];
        for _ in 0..2000 {
            let v = rng.range(0, 15);
            assert!((0..=15).contains(&v));
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "every palette index should be drawn");

        for _ in 0..100 {
            let v = rng.range(5, -5);
            assert!((-5..=5).contains(&v));
        }
    }

    #[test]
    fn next_f32_is_unit_interval() {
        let mut rng = SimpleRng::new(3);
        for _ in 0..1000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
