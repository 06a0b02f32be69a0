//! BitReader: reads a packed bitstream, most significant bit first.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!
use std::io::Read;

const BUFFER_SIZE: usize = 64 * 1024;
const BIT_MASK: u8 = 0xff;

#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    source: R,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            bit_index: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> std::io::Result<bool> {
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            self.buffer.truncate(size);
            self.cursor = 0;
            self.bit_index = 0;
            if size == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Next bit (1 or 0), or None at end of data.
    pub fn bit(&mut self) -> std::io::Result<Option<u32>> {
        if self.bit_index == 0 && !self.have_data()? {
            return Ok(None);
        }
        let bit = (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Ok(Some(bit as u32))
    }

    /// Next `n` bits (n in 1..=32) as an integer, or None if the data ends first.
    pub fn bint(&mut self, mut n: usize) -> std::io::Result<Option<u32>> {
        debug_assert!((1..=32).contains(&n));
        let mut result = 0_u64;

        // Finish a partial byte first.
        if self.bit_index > 0 {
            let needed = n.min(8 - self.bit_index);
            result = ((self.buffer[self.cursor] & BIT_MASK >> self.bit_index)
                >> (8 - self.bit_index - needed)) as u64;
            self.bit_index += needed;
            if self.bit_index == 8 {
                self.cursor += 1;
            }
            self.bit_index %= 8;
            n -= needed;
        }
        // Whole bytes.
        while n >= 8 {
            if !self.have_data()? {
                return Ok(None);
            }
            result = result << 8 | self.buffer[self.cursor] as u64;
            self.cursor += 1;
            n -= 8;
        }
        // Leading bits of the next byte.
        if n > 0 {
            if !self.have_data()? {
                return Ok(None);
            }
            result = result << n | (self.buffer[self.cursor] >> (8 - n)) as u64;
            self.bit_index = n;
        }
        Ok(Some(result as u32))
    }

    /// Next 8 bit unit.
    pub fn byte(&mut self) -> std::io::Result<Option<u8>> {
        Ok(self.bint(8)?.map(|b| b as u8))
    }

    /// Next 32 bit big-endian integer.
    pub fn read_u32(&mut self) -> std::io::Result<Option<u32>> {
        self.bint(32)
    }

    /// Up to `n` bytes. Returns fewer only when the data ends.
    pub fn bytes(&mut self, n: usize) -> std::io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(n);
        while out.len() < n {
            match self.byte()? {
                Some(b) => out.push(b),
                None => break,
            }
        }
        Ok(out)
    }

    /// Every remaining whole byte up to the end of the source.
    pub fn remaining(&mut self) -> std::io::Result<Vec<u8>> {
        if self.bit_index > 0 {
            let mut out = Vec::new();
            while let Some(b) = self.byte()? {
                out.push(b);
            }
            return Ok(out);
        }
        let mut out = self.buffer[self.cursor.min(self.buffer.len())..].to_vec();
        self.cursor = self.buffer.len();
        self.source.read_to_end(&mut out)?;
        Ok(out)
    }

    /// Current position as [byte.bit], for logging.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}
