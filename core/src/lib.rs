//! Aggregation core for the stacked-periodogram toolkit.
//!
//! The modules cover the full path from delimited text files to the stacked
//! AND/OR summary: table parsing, trapezoidal quadrature, unit-area
//! normalization, and the running accumulator with its error log.

pub mod math;
pub mod prelude;
pub mod spectrum;
pub mod stacking;
pub mod telemetry;

pub use prelude::{SkippedFile, StackError, StackResult};
pub use spectrum::{Periodogram, StackedPeriodogram, StackedRow, TableFormat};
pub use stacking::StackAccumulator;
