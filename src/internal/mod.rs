//! Internal shared utilities for the register simulator

pub mod prng;
pub mod taps;

pub use prng::XorShift64Star;
pub use taps::TapSet;
