//! Property-based tests for the register simulator.
//!
//! Configurations are kept to 12 bits or fewer so each case finishes quickly.

use proptest::prelude::*;
use std::collections::HashSet;
use lfsr::{simulate_with, Feedback, FibonacciLfsr, LfsrError, SimulationOptions};

/// (width, seed, taps) with every value inside its valid range
fn config() -> impl Strategy<Value = (u32, u64, Vec<u32>)> {
    (2u32..=12).prop_flat_map(|width| {
        (
            Just(width),
            1u64..(1u64 << width),
            prop::collection::btree_set(2u32..=width, 0..width as usize),
        )
            .prop_map(|(width, seed, taps)| (width, seed, taps.into_iter().collect()))
    })
}

fn feedback() -> impl Strategy<Value = Feedback> {
    prop_oneof![Just(Feedback::SourceCompatible), Just(Feedback::Standard)]
}

proptest! {
    /// Recurring trajectories start and end at the seed and never repeat early
    #[test]
    fn prop_trajectory_shape((width, seed, taps) in config(), feedback in feedback()) {
        let options = SimulationOptions::new().with_feedback(feedback);
        match simulate_with(seed, &taps, width, &options) {
            Ok(trajectory) => {
                let states = trajectory.states();
                prop_assert_eq!(states[0], seed);
                prop_assert_eq!(states[states.len() - 1], seed);
                prop_assert_eq!(trajectory.cycle_length() + 1, states.len() as u64);
                prop_assert!(trajectory.cycle_length() <= (1u64 << width) - 1);
                let distinct: HashSet<u64> = trajectory.cycle().iter().copied().collect();
                prop_assert_eq!(distinct.len(), trajectory.cycle().len());
            }
            Err(LfsrError::SeedNotRecurring { .. }) => {
                prop_assert_eq!(feedback, Feedback::SourceCompatible);
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    /// Same inputs, same output
    #[test]
    fn prop_deterministic((width, seed, taps) in config(), feedback in feedback()) {
        let options = SimulationOptions::new().with_feedback(feedback);
        prop_assert_eq!(
            simulate_with(seed, &taps, width, &options),
            simulate_with(seed, &taps, width, &options)
        );
    }

    /// Reversing the tap list changes nothing
    #[test]
    fn prop_tap_order_irrelevant((width, seed, taps) in config()) {
        let mut reversed = taps.clone();
        reversed.reverse();
        let lfsr_a = FibonacciLfsr::new(&taps, width).unwrap();
        let lfsr_b = FibonacciLfsr::new(&reversed, width).unwrap();
        prop_assert_eq!(lfsr_a.step(seed), lfsr_b.step(seed));
    }

    /// Every produced state stays below 2^(width + 1)
    #[test]
    fn prop_step_bounded((width, seed, taps) in config(), feedback in feedback()) {
        let lfsr = FibonacciLfsr::with_feedback(&taps, width, feedback).unwrap();
        let bound = match feedback {
            Feedback::SourceCompatible => 1u64 << (width + 1),
            Feedback::Standard => 1u64 << width,
        };
        for state in lfsr.states(seed).take(64) {
            prop_assert!(state < bound);
        }
    }

    /// Zero seed always rejected
    #[test]
    fn prop_zero_seed_rejected((width, _seed, taps) in config()) {
        let result = simulate_with(0, &taps, width, &SimulationOptions::default());
        prop_assert_eq!(result, Err(LfsrError::InvalidSeed { seed: 0, width }));
    }

    /// Taps outside [2, width] always rejected
    #[test]
    fn prop_out_of_range_tap_rejected((width, seed, _taps) in config(), extra in 1u32..=8) {
        let tap = width + extra;
        prop_assert!(simulate_with(seed, &[tap], width, &SimulationOptions::default())
            .unwrap_err()
            .is_invalid_tap());
        prop_assert!(simulate_with(seed, &[1], width, &SimulationOptions::default())
            .unwrap_err()
            .is_invalid_tap());
    }
}
