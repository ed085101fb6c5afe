//! LFSR: Fibonacci linear feedback shift register simulator
//!
//! Steps a register from a nonzero seed until the seed recurs and reports
//! the full trajectory together with the cycle length. Printing is left to
//! callers; the library only returns data.
//!
//! ## Modules
//!
//! - `fibonacci`: transition rule, cycle detection and `simulate`
//! - `trajectory`: recorded states plus cycle length
//! - `survey`: many seeds against one tap configuration, in parallel
//! - `output_format`: state rendering and literal parsing for front ends
//! - `error`: `LfsrError` and the crate `Result`
//!
//! ```
//! let trajectory = lfsr::simulate(0xAE1F, &[13, 12, 2, 3], 16).unwrap();
//! assert_eq!(trajectory.cycle_length(), 6141);
//! assert_eq!(trajectory.states().first(), trajectory.states().last());
//! ```

pub mod error;
pub mod fibonacci;
pub mod internal;
pub mod output_format;
pub mod survey;
pub mod trajectory;

// Re-export main types
pub use error::{LfsrError, Result};
pub use fibonacci::{simulate, simulate_with, Feedback, FibonacciLfsr, SimulationOptions, MAX_WIDTH};
pub use output_format::StateFormat;
pub use survey::{survey, SeedOutcome, SeedReport, SurveyReport, MAX_EXHAUSTIVE_WIDTH};
pub use trajectory::Trajectory;
