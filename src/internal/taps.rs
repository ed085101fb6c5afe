//! Tap set validation and normalization

use crate::error::{LfsrError, Result};

/// Validated, descending-ordered copy of a caller's tap positions.
///
/// Positions are 1-indexed from the least-significant bit. Position 1 is
/// always an implicit tap and is rejected if supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapSet {
    positions: Vec<u32>,
}

impl TapSet {
    /// Validate `taps` against `width` and build the sorted working copy.
    ///
    /// The caller's slice is left untouched.
    pub fn new(taps: &[u32], width: u32) -> Result<Self> {
        for &tap in taps {
            if tap < 2 || tap > width {
                return Err(LfsrError::InvalidTap { tap, width });
            }
        }

        let mut positions = taps.to_vec();
        // Descending, to match a left-to-right reading of the polynomial
        positions.sort_unstable_by(|a, b| b.cmp(a));

        if let Some(pair) = positions.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(LfsrError::DuplicateTap { tap: pair[0] });
        }

        Ok(Self { positions })
    }

    /// Explicit tap positions, highest first.
    pub fn positions(&self) -> &[u32] {
        &self.positions
    }

    /// Right-shift amounts (`tap - 1`) in processing order.
    pub fn shifts(&self) -> impl Iterator<Item = u32> + '_ {
        self.positions.iter().map(|&tap| tap - 1)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
