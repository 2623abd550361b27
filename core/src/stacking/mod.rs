pub mod accumulator;
pub mod normalize;

pub use accumulator::{StackAccumulator, GRID_RTOL};
