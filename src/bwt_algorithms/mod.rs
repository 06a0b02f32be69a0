//! The bwt_algorithms module forms the sorting subsystem.
//!
//! The Burrows-Wheeler Transform sorts every cyclic rotation of a block and keeps the byte that
//! precedes each rotation. This alters the data in such a way that runs of similar bytes are
//! more likely to occur.
//!
//! Sorting rotations is the expensive part, and different algorithms suit different data, so
//! this module holds two rankers with identical output: a comparison sort and prefix doubling.
//! The inverse transform never sorts rotations.
//!
pub mod bwt_sort;
pub mod doubling;
pub mod suffix_rank;
