//! Fibonacci LFSR: state transitions and cycle detection
//!
//! A Fibonacci register feeds every tap into one XOR network and shifts the
//! result in at the top while the register moves one bit to the right.
//!
//! - Taps: 1-indexed from the LSB, position 1 is always implicit
//! - Width: 1 to 63 bits
//! - States: `u64`, seeds must be nonzero and fit in `width` bits

use log::{debug, trace};

use crate::error::{LfsrError, Result};
use crate::internal::TapSet;
use crate::trajectory::Trajectory;

/// Widest supported register. The source-compatible rule writes feedback at
/// value `2^width`, which must still fit in a `u64`.
pub const MAX_WIDTH: u32 = 63;

/// Accumulator bit taken as feedback by the source-compatible rule
const SOURCE_FEEDBACK_MASK: u64 = 0b10;

/// Accumulator bit taken as feedback by the textbook rule
const STANDARD_FEEDBACK_MASK: u64 = 0b01;

/// Feedback extraction rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    /// Take the accumulator bit at value 2 and shift it left by `width - 1`,
    /// landing it at value `2^width`. Not a bijection: some seeds never recur.
    #[default]
    SourceCompatible,
    /// Take the accumulator parity bit (value 1) and place it at position
    /// `width`, the conventional Fibonacci rule.
    Standard,
}

impl Feedback {
    fn mask(self) -> u64 {
        match self {
            Feedback::SourceCompatible => SOURCE_FEEDBACK_MASK,
            Feedback::Standard => STANDARD_FEEDBACK_MASK,
        }
    }
}

/// Knobs for a single simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationOptions {
    pub feedback: Feedback,
    /// Abort with `StepLimitExceeded` after this many transitions
    pub max_steps: Option<u64>,
}

impl SimulationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}

/// Largest seed a `width`-bit register accepts (`2^width - 1`)
pub fn max_seed(width: u32) -> u64 {
    if width >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

fn validate_width(width: u32) -> Result<()> {
    if width == 0 || width > MAX_WIDTH {
        return Err(LfsrError::InvalidWidth { width });
    }
    Ok(())
}

fn validate_seed(seed: u64, width: u32) -> Result<()> {
    if seed == 0 || seed > max_seed(width) {
        return Err(LfsrError::InvalidSeed { seed, width });
    }
    Ok(())
}

/// A configured Fibonacci register (taps, width and feedback rule)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FibonacciLfsr {
    taps: TapSet,
    width: u32,
    feedback: Feedback,
}

impl FibonacciLfsr {
    /// Create a register using the source-compatible feedback rule
    pub fn new(taps: &[u32], width: u32) -> Result<Self> {
        Self::with_feedback(taps, width, Feedback::default())
    }

    /// Create a register with an explicit feedback rule
    pub fn with_feedback(taps: &[u32], width: u32, feedback: Feedback) -> Result<Self> {
        validate_width(width)?;
        let taps = TapSet::new(taps, width)?;
        Ok(Self {
            taps,
            width,
            feedback,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Explicit taps in processing (descending) order
    pub fn taps(&self) -> &[u32] {
        self.taps.positions()
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    /// Compute the successor of `state`
    pub fn step(&self, state: u64) -> u64 {
        let mut bit = state;
        for shift in self.taps.shifts() {
            bit ^= state >> shift;
        }
        bit &= self.feedback.mask();
        (state >> 1) | (bit << (self.width - 1))
    }

    /// Unbounded stream of successors of `seed` (the seed itself is not yielded)
    pub fn states(&self, seed: u64) -> impl Iterator<Item = u64> + '_ {
        std::iter::successors(Some(self.step(seed)), move |&state| Some(self.step(state)))
    }

    /// Run from `seed` until it recurs and record every state
    pub fn run(&self, seed: u64, max_steps: Option<u64>) -> Result<Trajectory> {
        let mut states = vec![seed];
        self.walk(seed, max_steps, |state| states.push(state))?;
        Ok(Trajectory::new(states, self.width))
    }

    /// Run from `seed` until it recurs, keeping only the cycle length
    pub fn cycle_length(&self, seed: u64, max_steps: Option<u64>) -> Result<u64> {
        self.walk(seed, max_steps, |_| {})
    }

    fn walk<F>(&self, seed: u64, max_steps: Option<u64>, mut visit: F) -> Result<u64>
    where
        F: FnMut(u64),
    {
        validate_seed(seed, self.width)?;
        debug!(
            "simulating seed={:#x} taps={:?} width={} feedback={:?}",
            seed,
            self.taps(),
            self.width,
            self.feedback
        );

        let mut state = seed;
        // Floyd's hare: meeting the tortoise away from the seed means the walk
        // is trapped in a cycle that excludes it
        let mut hare = seed;
        let mut steps = 0u64;

        loop {
            if let Some(limit) = max_steps {
                if steps >= limit {
                    debug!("seed {:#x}: step limit {} reached", seed, limit);
                    return Err(LfsrError::StepLimitExceeded { limit });
                }
            }

            state = self.step(state);
            steps += 1;
            trace!("step {}: {:#x}", steps, state);
            visit(state);

            if state == seed {
                break;
            }

            hare = self.step(self.step(hare));
            if hare == state {
                debug!("seed {:#x} does not recur (trapped after {} steps)", seed, steps);
                return Err(LfsrError::SeedNotRecurring { seed, steps });
            }
        }

        debug!("seed {:#x}: cycle length {}", seed, steps);
        Ok(steps)
    }
}

/// Simulate a register with the source-compatible rule and no step limit
pub fn simulate(seed: u64, taps: &[u32], width: u32) -> Result<Trajectory> {
    simulate_with(seed, taps, width, &SimulationOptions::default())
}

/// Simulate a register with explicit options
///
/// Validation order is width, seed, then taps; nothing runs if any fails.
pub fn simulate_with(
    seed: u64,
    taps: &[u32],
    width: u32,
    options: &SimulationOptions,
) -> Result<Trajectory> {
    validate_width(width)?;
    validate_seed(seed, width)?;
    let lfsr = FibonacciLfsr::with_feedback(taps, width, options.feedback)?;
    lfsr.run(seed, options.max_steps)
}
