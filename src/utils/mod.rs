pub mod color;
pub mod errors;
pub mod output;
pub mod table;

pub use output::OutputArea;
pub use table::Table;
