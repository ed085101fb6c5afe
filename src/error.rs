//! Error taxonomy for register simulation

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, LfsrError>;

/// Errors produced while configuring or running a register.
///
/// Configuration errors (`InvalidSeed`, `InvalidWidth`, `InvalidTap`,
/// `DuplicateTap`) are raised before the first transition, so no partial
/// trajectory is ever returned alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LfsrError {
    #[error("invalid seed {seed:#x}: must be nonzero and fit in {width} bits")]
    InvalidSeed { seed: u64, width: u32 },

    #[error("invalid register width {width}: must be between 1 and {max}", max = crate::MAX_WIDTH)]
    InvalidWidth { width: u32 },

    #[error("invalid tap {tap}: taps must lie in [2, {width}] (position 1 is implicit)")]
    InvalidTap { tap: u32, width: u32 },

    #[error("tap {tap} listed more than once")]
    DuplicateTap { tap: u32 },

    #[error("seed {seed:#x} never recurs: walk entered a cycle without it after {steps} steps")]
    SeedNotRecurring { seed: u64, steps: u64 },

    #[error("step limit of {limit} reached before the seed recurred")]
    StepLimitExceeded { limit: u64 },

    #[error("exhaustive survey of {width}-bit register refused (limit is {max} bits)")]
    SurveyTooWide { width: u32, max: u32 },
}

impl LfsrError {
    /// True for either tap error (out of range or duplicated).
    pub fn is_invalid_tap(&self) -> bool {
        matches!(self, LfsrError::InvalidTap { .. } | LfsrError::DuplicateTap { .. })
    }

    /// True for errors detected before any transition runs.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LfsrError::InvalidSeed { .. }
                | LfsrError::InvalidWidth { .. }
                | LfsrError::InvalidTap { .. }
                | LfsrError::DuplicateTap { .. }
                | LfsrError::SurveyTooWide { .. }
        )
    }
}
