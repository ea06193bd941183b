//! CSV persistence for matrices.
pub mod csv_matrix;
pub mod scan;

pub use csv_matrix::{load, load_from_reader, load_from_str, save, to_csv_string, write_to};
pub use scan::{scan_shape, Shape};
