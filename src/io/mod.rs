//! Reading and writing cost matrices as CSV.

mod csv_matrix;

pub use csv_matrix::{
    load_matrix, read_matrix, write_matrix, write_raw_matrix, LabeledMatrix, MatrixFormat,
};
