//! Recorded register trajectories

/// Ordered register states from the seed to its first recurrence.
///
/// Both ends hold the seed, so `len() == cycle_length() + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trajectory {
    states: Vec<u64>,
    width: u32,
}

impl Trajectory {
    pub(crate) fn new(states: Vec<u64>, width: u32) -> Self {
        debug_assert!(states.len() >= 2);
        debug_assert_eq!(states.first(), states.last());
        Self { states, width }
    }

    /// The starting state
    pub fn seed(&self) -> u64 {
        self.states[0]
    }

    /// Register width the trajectory was produced with
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of transitions until the seed recurred
    pub fn cycle_length(&self) -> u64 {
        (self.states.len() - 1) as u64
    }

    /// All recorded states, seed first and last
    pub fn states(&self) -> &[u64] {
        &self.states
    }

    /// The distinct states of the cycle (the trajectory without its closing seed)
    pub fn cycle(&self) -> &[u64] {
        &self.states[..self.states.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u64> {
        self.states.iter()
    }

    /// Largest state visited (may use the bit above `width`)
    pub fn max_state(&self) -> u64 {
        self.states.iter().copied().max().unwrap_or_default()
    }

    pub fn into_states(self) -> Vec<u64> {
        self.states
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a u64;
    type IntoIter = std::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}
