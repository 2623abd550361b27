pub mod parse;
pub mod periodogram;
pub mod stacked;

pub use parse::TableFormat;
pub use periodogram::Periodogram;
pub use stacked::{StackedPeriodogram, StackedRow};
