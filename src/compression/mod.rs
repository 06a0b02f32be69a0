//! The compression module drives the stages over whole streams.
//!
//! Forward (compression front-end):
//! - Burrows Wheeler Transform: Sort the rotations of the block so that runs of identical bytes
//!   are more likely to occur.
//! - Move To Front transform: Turn those runs into runs of small codes, mostly zeros.
//!
//! Inverse:
//! - MTF decode: Convert the codes back to the symbols they stand for.
//! - BWT reversal: Restore the original block from the key and the transformed bytes.
//!
//! Each stage can also be run on its own. An entropy coder would sit after the forward side;
//! none is provided here.
//!
pub mod compress;
pub mod decompress;
