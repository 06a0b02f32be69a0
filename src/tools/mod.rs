//! The tools module provides the helpers around the block sort.
//!
//! The tools are:
//! - cli: Command line interface and run configuration.
//! - data_io: Opens the input and output ends (files or stdin/stdout).
//! - freq_count: Byte frequency count and bucket offsets.
//! - mtf: Move-To-Front (recency) coder.
//!
pub mod cli;
pub mod data_io;
pub mod freq_count;
pub mod mtf;
