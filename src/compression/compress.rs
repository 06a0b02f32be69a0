use std::io::{Read, Write};

use log::{debug, info};

use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::bwt_algorithms::bwt_sort::bwt_encode;
use crate::error::Result;
use crate::tools::cli::Algorithms;
use crate::tools::mtf::{mtf_encode, MoveToFront};

/*
    Forward side of every stage. Each function reads the whole input as one block, runs its
    stage, and writes the framed result:

    - transform:          [key: u32 big-endian][bwt bytes]
    - mtf_encode_stream:  [one 8 bit code per input byte]
    - compress:           [key: u32 big-endian][mtf codes of the bwt bytes]

    Empty input writes nothing.
*/

/// Block sort the input. Returns the number of bytes written.
pub fn transform<R: Read, W: Write>(input: R, output: W, algorithm: &Algorithms) -> Result<usize> {
    let block = BitReader::new(input).remaining()?;
    let mut bw = BitWriter::new(output);
    if block.is_empty() {
        info!("Empty input, nothing to transform.");
        bw.finish()?;
        return Ok(0);
    }

    let (key, bwt) = bwt_encode(&block, algorithm)?;
    bw.out32(key)?;
    bw.out_bytes(&bwt)?;
    let written = bw.len();
    bw.finish()?;
    info!("Transformed {} bytes into {} bytes.", block.len(), written);
    Ok(written)
}

/// Move-to-front encode the input. Returns the number of codes written.
pub fn mtf_encode_stream<R: Read, W: Write>(input: R, output: W) -> Result<usize> {
    let mut br = BitReader::new(input);
    let mut bw = BitWriter::new(output);
    let mut mtf = MoveToFront::new();
    let mut count = 0;
    while let Some(byte) = br.byte()? {
        bw.out8(mtf.encode_byte(byte))?;
        count += 1;
    }
    bw.finish()?;
    info!("Move-to-front encoded {} bytes.", count);
    Ok(count)
}

/// Block sort then move-to-front encode. Returns the number of bytes written.
pub fn compress<R: Read, W: Write>(input: R, output: W, algorithm: &Algorithms) -> Result<usize> {
    let block = BitReader::new(input).remaining()?;
    let mut bw = BitWriter::new(output);
    if block.is_empty() {
        info!("Empty input, nothing to compress.");
        bw.finish()?;
        return Ok(0);
    }

    let (key, bwt) = bwt_encode(&block, algorithm)?;
    bw.out32(key)?;
    let codes = mtf_encode(&bwt);
    debug!(
        "{} of {} move-to-front codes are zero.",
        codes.iter().filter(|&&c| c == 0).count(),
        codes.len()
    );
    bw.out_bytes(&codes)?;
    let written = bw.len();
    bw.finish()?;
    info!("Compressed {} bytes into {} bytes.", block.len(), written);
    Ok(written)
}
