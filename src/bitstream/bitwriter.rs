//! BitWriter: packs values of 1-32 bits, most significant bit first, onto any `Write` sink.
use std::io::Write;

/// Flush to the sink once the internal buffer reaches this size.
const BUFFER_SIZE: usize = 64 * 1024;

pub struct BitWriter<W: Write> {
    /// Output buffer of completed bytes.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
    /// Bytes handed to the sink so far.
    written: usize,
    /// Handle to the output stream
    writer: W,
}

impl<W: Write> BitWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            output: Vec::with_capacity(BUFFER_SIZE),
            queue: 0,
            q_bits: 0,
            written: 0,
            writer,
        }
    }

    /// Put the low `n` bits of `data` on the stream (n in 1..=32).
    pub fn out(&mut self, n: u8, data: u32) -> std::io::Result<()> {
        debug_assert!((1..=32).contains(&n));
        self.push_queue()?;
        let mask = if n == 32 { u32::MAX } else { (1 << n) - 1 };
        self.queue <<= n;
        self.queue |= (data & mask) as u64;
        self.q_bits += n;
        Ok(())
    }

    /// Put one 8 bit unit on the stream.
    pub fn out8(&mut self, data: u8) -> std::io::Result<()> {
        self.out(8, data as u32)
    }

    /// Put a 32 bit big-endian integer on the stream.
    pub fn out32(&mut self, data: u32) -> std::io::Result<()> {
        self.out(32, data)
    }

    /// Put a run of bytes on the stream.
    pub fn out_bytes(&mut self, data: &[u8]) -> std::io::Result<()> {
        if self.q_bits == 0 {
            // Byte aligned: skip the queue.
            self.output.extend_from_slice(data);
            if self.output.len() >= BUFFER_SIZE {
                self.drain()?;
            }
            return Ok(());
        }
        data.iter().try_for_each(|&b| self.out8(b))
    }

    /// Total bytes produced so far, including any partial byte still queued.
    pub fn len(&self) -> usize {
        self.written + self.output.len() + (self.q_bits as usize + 7) / 8
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits, and hands everything to the sink. Returns the sink.
    pub fn finish(mut self) -> std::io::Result<W> {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte);
            self.q_bits -= 8;
        }
        if self.q_bits > 0 {
            let byte = (self.queue << (8 - self.q_bits)) as u8;
            self.output.push(byte);
            self.q_bits = 0;
        }
        self.drain()?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Move whole bytes from the queue to the output buffer when it is getting full.
    fn push_queue(&mut self) -> std::io::Result<()> {
        if self.q_bits > 32 {
            while self.q_bits > 7 {
                let byte = (self.queue >> (self.q_bits - 8)) as u8;
                self.output.push(byte);
                self.q_bits -= 8;
            }
        }
        if self.output.len() >= BUFFER_SIZE {
            self.drain()?;
        }
        Ok(())
    }

    fn drain(&mut self) -> std::io::Result<()> {
        self.writer.write_all(&self.output)?;
        self.written += self.output.len();
        self.output.clear();
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::BitWriter;

    #[test]
    fn out8_test() {
        let mut bw = BitWriter::new(Vec::new());
        bw.out8(b'x').unwrap();
        assert_eq!(bw.finish().unwrap(), b"x".to_vec());
    }

    #[test]
    fn last_bits_test() {
        let mut bw = BitWriter::new(Vec::new());
        bw.out8(255).unwrap();
        bw.out8(1).unwrap();
        bw.out(3, 0b111).unwrap();
        assert_eq!(bw.len(), 3);
        assert_eq!(bw.finish().unwrap(), vec![255, 1, 0b1110_0000]);
    }

    #[test]
    fn out32_is_big_endian() {
        let mut bw = BitWriter::new(Vec::new());
        bw.out32(0x0102_0304).unwrap();
        bw.out32(3).unwrap();
        assert_eq!(bw.finish().unwrap(), vec![1, 2, 3, 4, 0, 0, 0, 3]);
    }

    #[test]
    fn unaligned_bytes() {
        let mut bw = BitWriter::new(Vec::new());
        bw.out(4, 0xA).unwrap();
        bw.out_bytes(&[0xBC, 0xDE]).unwrap();
        bw.out(4, 0xF).unwrap();
        assert_eq!(bw.finish().unwrap(), vec![0xAB, 0xCD, 0xEF]);
    }

    #[test]
    fn large_output_drains() {
        let data = vec![7_u8; 200_000];
        let mut bw = BitWriter::new(Vec::new());
        bw.out32(9).unwrap();
        bw.out_bytes(&data).unwrap();
        assert_eq!(bw.len(), 200_004);
        let out = bw.finish().unwrap();
        assert_eq!(out.len(), 200_004);
        assert_eq!(&out[..4], &[0, 0, 0, 9]);
    }
}
