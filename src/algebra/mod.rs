//! Sparse matrix type accepted by the problem model.

mod csc;
mod error_types;

pub use csc::*;
pub use error_types::*;
