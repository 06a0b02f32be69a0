//! The bitstream module is the framing layer for every stage.
//!
//! Stages never touch stdin/stdout directly. They are handed a `BitReader` over any
//! `std::io::Read` and a `BitWriter` over any `std::io::Write`, so the same code runs
//! against files, pipes, or in-memory buffers in tests.
//!
//! Headers are written as 32 bit big-endian integers. Transformed data and move-to-front
//! codes are always written as whole 8 bit units.
//!
pub mod bitreader;
pub mod bitwriter;
