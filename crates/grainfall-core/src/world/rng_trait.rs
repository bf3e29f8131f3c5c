//! RNG trait abstraction for the sandbox
//!
//! Every stochastic decision in the update rules goes through [`WorldRng`] so
//! that:
//! - normal runs use any `rand::Rng` (seeded xoshiro by default)
//! - tests can substitute a scripted source and get exact outcomes

/// Random number generator trait for sandbox simulation
pub trait WorldRng {
    /// Generate random boolean with 50% probability
    fn gen_bool(&mut self) -> bool;

    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Uniform integer in `[min, max]` (inclusive)
    fn gen_lifetime(&mut self, min: u32, max: u32) -> u32;

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }

    /// Horizontal direction, -1 (left) or +1 (right)
    fn gen_direction(&mut self) -> i32 {
        if self.gen_bool() { -1 } else { 1 }
    }
}

// Covers ThreadRng, StdRng and the xoshiro generators alike
impl<T: ?Sized + rand::Rng> WorldRng for T {
    fn gen_bool(&mut self) -> bool {
        rand::Rng::r#gen(self)
    }

    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }

    fn gen_lifetime(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            min
        } else {
            rand::Rng::gen_range(self, min..=max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_world_rng_gen_bool() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        let mut seen_true = false;
        let mut seen_false = false;

        for _ in 0..100 {
            if rng.gen_bool() {
                seen_true = true;
            } else {
                seen_false = true;
            }
        }

        assert!(seen_true);
        assert!(seen_false);
    }

    #[test]
    fn test_world_rng_gen_f32() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        for _ in 0..100 {
            let val = rng.gen_f32();
            assert!(val >= 0.0);
            assert!(val < 1.0);
        }
    }

    #[test]
    fn test_world_rng_check_probability_extremes() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        for _ in 0..100 {
            assert!(rng.check_probability(1.0));
            assert!(!rng.check_probability(0.0));
        }
    }

    #[test]
    fn test_gen_direction_is_unit() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        let mut seen = [false; 2];

        for _ in 0..100 {
            match rng.gen_direction() {
                -1 => seen[0] = true,
                1 => seen[1] = true,
                other => panic!("unexpected direction {other}"),
            }
        }

        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_gen_lifetime_stays_in_range() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(99);
        let mut min_seen = u32::MAX;
        let mut max_seen = 0;

        for _ in 0..2000 {
            let lifetime = rng.gen_lifetime(30, 100);
            assert!((30..=100).contains(&lifetime));
            min_seen = min_seen.min(lifetime);
            max_seen = max_seen.max(lifetime);
        }

        // Both ends of the inclusive range are reachable
        assert_eq!(min_seen, 30);
        assert_eq!(max_seen, 100);
    }

    #[test]
    fn test_gen_lifetime_degenerate_range() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        assert_eq!(rng.gen_lifetime(40, 40), 40);
    }

    #[test]
    fn test_world_rng_deterministic() {
        let mut rng1 = Xoshiro256StarStar::seed_from_u64(42);
        let mut rng2 = Xoshiro256StarStar::seed_from_u64(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_bool(), rng2.gen_bool());
            assert_eq!(rng1.gen_f32(), rng2.gen_f32());
            assert_eq!(rng1.gen_lifetime(30, 100), rng2.gen_lifetime(30, 100));
        }
    }
}
