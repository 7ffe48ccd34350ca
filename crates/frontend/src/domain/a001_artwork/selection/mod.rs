pub mod accumulator;
pub mod input;
pub mod selection_set;
pub mod store;

pub use accumulator::{Accumulation, AccumulationOutcome, SelectionAccumulator};
pub use input::{parse_row_count, RowCountError};
pub use selection_set::{CoverageState, SelectionSet};
pub use store::SelectionStore;
