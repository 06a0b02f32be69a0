//! Block-sorting compression front-end.
//!
//! Provides the three reversible stages that sit in front of an entropy coder:
//! - ranking of every cyclic rotation of a block (`bwt_algorithms::suffix_rank`),
//! - the Burrows-Wheeler Transform and its inverse (`bwt_algorithms::bwt_sort`),
//! - Move-To-Front coding (`tools::mtf`).
//!
//! The `compression` module runs them over any `Read`/`Write` pair. Basic usage of the binary:
//!
//! `$> burrows - test.txt > test.bwm`
//!
//! `$> burrows + test.bwm > test.txt`
//!
//! Add `-s bwt` or `-s mtf` to run a single stage.
//!
pub mod bitstream;
pub mod bwt_algorithms;
pub mod compression;
pub mod error;
pub mod tools;

pub use error::{BurrowsError, Result};
