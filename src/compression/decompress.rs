use std::io::{Read, Write};

use log::{error, info, trace};

use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::bwt_algorithms::bwt_sort::bwt_decode;
use crate::error::{BurrowsError, Result};
use crate::tools::mtf::{mtf_decode, MoveToFront};

const HEADER_MESSAGE: &str = "stream ends inside the 32 bit key";

/// Read the 32 bit key. None means the stream was empty.
fn read_key<R: Read>(br: &mut BitReader<R>) -> Result<Option<u32>> {
    let head = br.bytes(4)?;
    match head.len() {
        0 => Ok(None),
        4 => Ok(Some(u32::from_be_bytes([head[0], head[1], head[2], head[3]]))),
        _ => {
            error!("Fatal error: {}.", HEADER_MESSAGE);
            Err(BurrowsError::MalformedInput(HEADER_MESSAGE.to_string()))
        }
    }
}

/// Undo `transform`. Returns the number of bytes written.
pub fn inverse_transform<R: Read, W: Write>(input: R, output: W) -> Result<usize> {
    let mut br = BitReader::new(input);
    let mut bw = BitWriter::new(output);
    let key = match read_key(&mut br)? {
        Some(key) => key,
        None => {
            info!("Empty input, nothing to invert.");
            bw.finish()?;
            return Ok(0);
        }
    };
    info!("Key is {}.", key);

    let bwt = br.remaining()?;
    let data = bwt_decode(key, &bwt)?;
    bw.out_bytes(&data)?;
    bw.finish()?;
    info!("Restored {} bytes.", data.len());
    Ok(data.len())
}

/// Undo `mtf_encode_stream`. Returns the number of bytes written.
pub fn mtf_decode_stream<R: Read, W: Write>(input: R, output: W) -> Result<usize> {
    let mut br = BitReader::new(input);
    let mut bw = BitWriter::new(output);
    let mut mtf = MoveToFront::new();
    let mut count = 0;
    while let Some(code) = br.byte()? {
        bw.out8(mtf.decode_code(code))?;
        count += 1;
    }
    bw.finish()?;
    info!("Move-to-front decoded {} bytes.", count);
    Ok(count)
}

/// Undo `compress`: move-to-front decode, then invert the block sort.
pub fn decompress<R: Read, W: Write>(input: R, output: W) -> Result<usize> {
    let mut br = BitReader::new(input);
    let mut bw = BitWriter::new(output);
    let key = match read_key(&mut br)? {
        Some(key) => key,
        None => {
            info!("Empty input, nothing to decompress.");
            bw.finish()?;
            return Ok(0);
        }
    };
    info!("Key is {}.", key);

    let bwt = mtf_decode(&br.remaining()?);
    trace!("Decoded {} move-to-front codes at {}.", bwt.len(), br.loc());

    let data = bwt_decode(key, &bwt)?;
    bw.out_bytes(&data)?;
    bw.finish()?;
    info!("Decompressed {} bytes.", data.len());
    Ok(data.len())
}
