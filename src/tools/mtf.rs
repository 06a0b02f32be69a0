//! Move-To-Front (recency) coding.
//!
//! Each byte is replaced by its current position in a 256 entry recency list, then moved to
//! the front of that list. After a block sort, runs of identical bytes become runs of zeros.
//!
//! Encoder and decoder each own a fresh `MoveToFront`. Both apply the same "look up, then move
//! to front" step for every symbol, so the two lists stay in lockstep.
use log::trace;

use crate::error::{BurrowsError, Result};

/// Recency list plus its reverse map (symbol -> current position).
#[derive(Debug, Clone)]
pub struct MoveToFront {
    /// symbols[0] is the most recently used byte.
    symbols: [u8; 256],
    /// positions[b] is where byte b currently sits in `symbols`.
    positions: [u8; 256],
}

impl MoveToFront {
    /// Fresh list in ascending byte order.
    pub fn new() -> Self {
        Self {
            symbols: std::array::from_fn(|i| i as u8),
            positions: std::array::from_fn(|i| i as u8),
        }
    }

    /// Return the code for `byte` and move it to the front.
    pub fn encode_byte(&mut self, byte: u8) -> u8 {
        let idx = self.positions[byte as usize];
        self.promote(idx as usize);
        idx
    }

    /// Return the byte at position `code` and move it to the front.
    pub fn decode_code(&mut self, code: u8) -> u8 {
        let byte = self.symbols[code as usize];
        self.promote(code as usize);
        byte
    }

    /// `decode_code` for callers holding a wider index. Fails on anything above 255.
    pub fn decode_index(&mut self, idx: usize) -> Result<u8> {
        let code = u8::try_from(idx).map_err(|_| {
            BurrowsError::InvalidArgument(format!(
                "move-to-front code {} is outside 0..=255",
                idx
            ))
        })?;
        Ok(self.decode_code(code))
    }

    /// Current recency order, most recent first.
    pub fn symbols(&self) -> &[u8; 256] {
        &self.symbols
    }

    fn promote(&mut self, idx: usize) {
        if idx == 0 {
            return;
        }
        let sym = self.symbols[idx];
        self.symbols.copy_within(..idx, 1);
        self.symbols[0] = sym;
        // Only the first idx + 1 entries moved.
        for (pos, &s) in self.symbols[..=idx].iter().enumerate() {
            self.positions[s as usize] = pos as u8;
        }
    }
}

impl Default for MoveToFront {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a whole buffer with a fresh recency list.
pub fn mtf_encode(data: &[u8]) -> Vec<u8> {
    let mut mtf = MoveToFront::new();
    let codes: Vec<u8> = data.iter().map(|&b| mtf.encode_byte(b)).collect();
    trace!(
        "MTF encoded {} bytes, {} zero codes.",
        codes.len(),
        codes.iter().filter(|&&c| c == 0).count()
    );
    codes
}

/// Decode a whole buffer of codes with a fresh recency list.
pub fn mtf_decode(codes: &[u8]) -> Vec<u8> {
    let mut mtf = MoveToFront::new();
    codes.iter().map(|&c| mtf.decode_code(c)).collect()
}
