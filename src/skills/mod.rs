mod error;
mod grid;
mod palette;
mod selection;
mod source;
mod table;

pub use grid::{DenseGrid, build_grid};
pub use palette::{ColorStrategy, Rgb};
pub use selection::Selection;
pub use source::{CsvFileSource, DataSource};
#[cfg(test)]
pub use table::SourceRecord;
pub use table::SourceTable;
