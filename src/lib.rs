pub mod csv;
pub mod delimiter;
mod errors;
mod io;
#[cfg(feature = "cli")]
mod logging;
mod runner;

pub use errors::{CsvReverseError, CsvReverseResult};
pub use runner::{ReverseOptions, ReverseSummary, reverse, reverse_with_options, run_csvreverse};
