// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Implementation of the generators under evaluation.
//! All implement the RandomGenerator interface, generators that can be
//! registered for evaluation additionally implement SeededGenerator.

use rand::{Rng, RngCore, SeedableRng};

use crate::conditioning;

/// General trait for PRNGs.
pub trait RandomGenerator {
    /// Generate i32 and advance the state one step.
    fn next(&mut self) -> i32;
    /// Generate f64 in the range [0, 1).
    /// Derived from `next` unless the generator has a native source.
    fn next_double(&mut self) -> f64 {
        conditioning::i32_to_unit_double(self.next())
    }
}

/// Generators that can be built from a seed or without any arguments.
pub trait SeededGenerator: RandomGenerator + Sized + 'static {
    /// Name used for reports and output directories.
    const NAME: &'static str;
    /// Initialize with specified seed. Same seed, same sequence.
    fn new(seed: i32) -> Self;
    /// Initialize with a seed taken from the environment.
    fn from_entropy() -> Self;
}

/// Baseline generator backed by the rand crates StdRng.
#[derive(Debug, Clone)]
pub struct SystemGenerator {
    rng: rand::rngs::StdRng,
}

impl RandomGenerator for SystemGenerator {
    /// Full u32 output space reinterpreted as i32,
    /// so negative values are produced as well.
    fn next(&mut self) -> i32 {
        self.rng.next_u32() as i32
    }

    fn next_double(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

impl SeededGenerator for SystemGenerator {
    const NAME: &'static str = "SystemGenerator";

    fn new(seed: i32) -> Self {
        SystemGenerator {
            rng: rand::rngs::StdRng::seed_from_u64(seed as u32 as u64),
        }
    }

    fn from_entropy() -> Self {
        SystemGenerator {
            rng: rand::rngs::StdRng::from_os_rng(),
        }
    }
}

// Linear congruential generators
pub mod lcg {
    use super::{RandomGenerator, SeededGenerator};

    /// Multiplier, congruent to -18 mod M.
    pub const A: i32 = 2147483629;
    /// Increment, congruent to -60 mod M.
    pub const C: i32 = 2147483587;
    /// Modulus 2**31 - 1.
    pub const M: i32 = i32::MAX;

    /// LCG over signed 32 bit state.
    /// The product and sum wrap at 32 bits before the remainder is taken,
    /// which reproduces the reference sequence bit for bit.
    /// The remainder keeps the sign of the dividend, so the output space
    /// is -(2**31 - 2) to 2**31 - 2.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct LinearCongruentialGenerator {
        state: i32,
    }

    impl LinearCongruentialGenerator {
        /// Current internal state, equal to the last output.
        pub fn state(&self) -> i32 {
            self.state
        }
    }

    /// One step of the recurrence.
    pub fn step(state: i32) -> i32 {
        A.wrapping_mul(state).wrapping_add(C) % M
    }

    impl RandomGenerator for LinearCongruentialGenerator {
        fn next(&mut self) -> i32 {
            self.state = step(self.state);
            self.state
        }
    }

    impl SeededGenerator for LinearCongruentialGenerator {
        const NAME: &'static str = "LinearCongruentialGenerator";

        fn new(seed: i32) -> Self {
            LinearCongruentialGenerator { state: seed }
        }

        /// Seeds from the wall clock, truncated to 32 bits.
        fn from_entropy() -> Self {
            let now = chrono::Utc::now();
            let nanos = now
                .timestamp_nanos_opt()
                .unwrap_or_else(|| now.timestamp_micros());
            LinearCongruentialGenerator {
                state: nanos as i32,
            }
        }
    }
}
