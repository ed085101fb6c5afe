//! Cycle surveys: one tap configuration, many seeds
//!
//! Each seed runs independently, so surveys fan out across threads with rayon.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};
use rayon::prelude::*;

use crate::error::{LfsrError, Result};
use crate::fibonacci::{max_seed, Feedback, FibonacciLfsr, SimulationOptions, MAX_WIDTH};
use crate::internal::XorShift64Star;

/// Widest register for which every seed may be enumerated
pub const MAX_EXHAUSTIVE_WIDTH: u32 = 24;

/// What happened to one seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The seed recurred after this many transitions
    Cycle(u64),
    /// The walk got trapped in a cycle that excludes the seed
    NotRecurring { steps: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub seed: u64,
    pub outcome: SeedOutcome,
}

impl SeedReport {
    pub fn cycle_length(&self) -> Option<u64> {
        match self.outcome {
            SeedOutcome::Cycle(length) => Some(length),
            SeedOutcome::NotRecurring { .. } => None,
        }
    }
}

/// Per-seed outcomes of a survey, in the order the seeds were given
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyReport {
    pub width: u32,
    pub taps: Vec<u32>,
    pub feedback: Feedback,
    pub seeds: Vec<SeedReport>,
}

impl SurveyReport {
    /// Number of seeds that recurred
    pub fn recurring(&self) -> usize {
        self.seeds.iter().filter(|r| r.cycle_length().is_some()).count()
    }

    /// Number of seeds that never recurred
    pub fn non_recurring(&self) -> usize {
        self.seeds.len() - self.recurring()
    }

    /// Seed with the longest cycle (lowest seed wins ties)
    pub fn longest(&self) -> Option<SeedReport> {
        self.seeds
            .iter()
            .filter(|r| r.cycle_length().is_some())
            .max_by(|a, b| {
                a.cycle_length()
                    .cmp(&b.cycle_length())
                    .then_with(|| b.seed.cmp(&a.seed))
            })
            .copied()
    }

    /// Cycle length -> number of seeds with that length
    pub fn histogram(&self) -> BTreeMap<u64, usize> {
        let mut histogram = BTreeMap::new();
        for length in self.seeds.iter().filter_map(SeedReport::cycle_length) {
            *histogram.entry(length).or_insert(0) += 1;
        }
        histogram
    }

    /// True when some seed reached the `2^width - 1` bound
    pub fn has_maximal_cycle(&self) -> bool {
        let bound = max_seed(self.width);
        self.seeds.iter().any(|r| r.cycle_length() == Some(bound))
    }
}

/// Every valid seed of a `width`-bit register
pub fn exhaustive_seeds(width: u32) -> Result<Vec<u64>> {
    if width == 0 || width > MAX_WIDTH {
        return Err(LfsrError::InvalidWidth { width });
    }
    if width > MAX_EXHAUSTIVE_WIDTH {
        return Err(LfsrError::SurveyTooWide {
            width,
            max: MAX_EXHAUSTIVE_WIDTH,
        });
    }
    Ok((1..=max_seed(width)).collect())
}

/// `count` distinct seeds drawn deterministically from `prng_seed`, sorted
///
/// Asking for more seeds than the register has yields all of them.
pub fn sample_seeds(width: u32, count: usize, prng_seed: u64) -> Result<Vec<u64>> {
    if width == 0 || width > MAX_WIDTH {
        return Err(LfsrError::InvalidWidth { width });
    }
    let available = usize::try_from(max_seed(width)).unwrap_or(usize::MAX);
    let count = count.min(available);

    let mut prng = XorShift64Star::new(prng_seed);
    let mut seeds = BTreeSet::new();
    while seeds.len() < count {
        seeds.insert(prng.next_state(width));
    }
    Ok(seeds.into_iter().collect())
}

/// Run every seed against one tap configuration in parallel
///
/// A seed that never recurs is recorded as an outcome. Any other failure
/// (invalid seed, step limit) aborts the survey.
pub fn survey(
    taps: &[u32],
    width: u32,
    seeds: &[u64],
    options: &SimulationOptions,
) -> Result<SurveyReport> {
    let lfsr = FibonacciLfsr::with_feedback(taps, width, options.feedback)?;
    info!(
        "surveying {} seeds (taps={:?} width={} feedback={:?})",
        seeds.len(),
        lfsr.taps(),
        width,
        options.feedback
    );

    let reports = seeds
        .par_iter()
        .map(|&seed| {
            let outcome = match lfsr.cycle_length(seed, options.max_steps) {
                Ok(length) => SeedOutcome::Cycle(length),
                Err(LfsrError::SeedNotRecurring { steps, .. }) => SeedOutcome::NotRecurring { steps },
                Err(e) => return Err(e),
            };
            Ok(SeedReport { seed, outcome })
        })
        .collect::<Result<Vec<_>>>()?;

    let report = SurveyReport {
        width,
        taps: lfsr.taps().to_vec(),
        feedback: options.feedback,
        seeds: reports,
    };
    debug!(
        "survey done: {} recurring, {} not recurring",
        report.recurring(),
        report.non_recurring()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustive_width3() {
        let seeds = exhaustive_seeds(3).unwrap();
        assert_eq!(seeds, vec![1, 2, 3, 4, 5, 6, 7]);

        let report = survey(&[2], 3, &seeds, &SimulationOptions::default()).unwrap();
        // 3, 4 and 7 share the 7-cycle; the rest never recur
        let recurring: Vec<u64> = report
            .seeds
            .iter()
            .filter(|r| r.cycle_length().is_some())
            .map(|r| r.seed)
            .collect();
        assert_eq!(recurring, vec![3, 4, 7]);
        assert_eq!(report.non_recurring(), 4);
        assert_eq!(report.histogram(), BTreeMap::from([(7, 3)]));
        assert_eq!(report.longest().map(|r| r.seed), Some(3));
        assert!(report.has_maximal_cycle());
    }

    #[test]
    fn test_standard_rule_every_seed_recurs() {
        let options = SimulationOptions::new().with_feedback(Feedback::Standard);
        let seeds = exhaustive_seeds(4).unwrap();
        let report = survey(&[2], 4, &seeds, &options).unwrap();
        assert_eq!(report.recurring(), 15);
        assert_eq!(report.histogram(), BTreeMap::from([(15, 15)]));
    }

    #[test]
    fn test_too_wide() {
        assert_eq!(
            exhaustive_seeds(25),
            Err(LfsrError::SurveyTooWide { width: 25, max: 24 })
        );
        assert_eq!(exhaustive_seeds(0), Err(LfsrError::InvalidWidth { width: 0 }));
    }

    #[test]
    fn test_sample_seeds() {
        let a = sample_seeds(16, 32, 0x1234567890ABCDEF).unwrap();
        let b = sample_seeds(16, 32, 0x1234567890ABCDEF).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.windows(2).all(|w| w[0] < w[1]));
        assert!(a.iter().all(|&s| s >= 1 && s <= 0xFFFF));

        assert_eq!(sample_seeds(3, 100, 7).unwrap(), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_step_limit_aborts_survey() {
        let options = SimulationOptions::new().with_max_steps(2);
        assert_eq!(
            survey(&[2], 3, &[3], &options),
            Err(LfsrError::StepLimitExceeded { limit: 2 })
        );
    }

    #[test]
    fn test_bad_seed_aborts_survey() {
        assert_eq!(
            survey(&[2], 3, &[1, 8], &SimulationOptions::default()),
            Err(LfsrError::InvalidSeed { seed: 8, width: 3 })
        );
    }
}
