use log::{debug, info};

use super::suffix_rank::SuffixRank;
use crate::error::{BurrowsError, Result};
use crate::tools::cli::Algorithms;
use crate::tools::freq_count::{bucket_starts, freqs};

/// Burrows-Wheeler-Transform of a single block. Returns the key (the row where the unrotated
/// block landed in sorted order) and the last column of the sorted rotation matrix.
pub fn bwt_encode(data: &[u8], algorithm: &Algorithms) -> Result<(u32, Vec<u8>)> {
    let csa = SuffixRank::new(data, algorithm)?;
    let n = data.len();

    let mut key = 0_u32;
    let mut bwt = Vec::with_capacity(n);
    for (row, &offset) in csa.as_slice().iter().enumerate() {
        if offset == 0 {
            key = row as u32;
            bwt.push(data[n - 1]);
        } else {
            bwt.push(data[offset as usize - 1]);
        }
    }
    info!("BWT key is {} for a block of {} bytes.", key, n);
    debug!("BWT output has {} runs.", count_runs(&bwt));
    Ok((key, bwt))
}

/// Undo the Burrows-Wheeler-Transform without sorting rotations again.
///
/// The walk starts at row `key`. Each step moves to `next[row]` and emits the byte found there
/// in the last column, which is the next byte of the original block.
pub fn bwt_decode(key: u32, bwt_in: &[u8]) -> Result<Vec<u8>> {
    if bwt_in.is_empty() {
        return Err(BurrowsError::InvalidArgument(
            "cannot invert an empty block".to_string(),
        ));
    }
    if key as usize >= bwt_in.len() {
        return Err(BurrowsError::InvalidArgument(format!(
            "key {} is outside 0..{}",
            key,
            bwt_in.len()
        )));
    }

    let next = next_vector(bwt_in);
    validate_next(&next, bwt_in.len())?;

    let mut data = Vec::with_capacity(bwt_in.len());
    let mut row = key as usize;
    for _ in 0..bwt_in.len() {
        row = next[row] as usize;
        data.push(bwt_in[row]);
    }
    Ok(data)
}

/// Build the transformation vector. Entry k is the last-column position of the k-th byte of
/// the first column (the last column stably sorted by byte value). Equal bytes keep their
/// last-column order, which is what makes the walk reproduce the forward sort.
pub fn next_vector(bwt_in: &[u8]) -> Vec<u32> {
    let mut slot = bucket_starts(&freqs(bwt_in));
    let mut next = vec![0_u32; bwt_in.len()];
    for (i, &s) in bwt_in.iter().enumerate() {
        next[slot[s as usize]] = i as u32;
        slot[s as usize] += 1;
    }
    next
}

/// Check that `next` has length `n` and is a permutation of 0..n.
pub fn validate_next(next: &[u32], n: usize) -> Result<()> {
    if next.len() != n {
        return Err(BurrowsError::MalformedInput(format!(
            "transformation vector has {} entries, expected {}",
            next.len(),
            n
        )));
    }
    let mut seen = vec![false; n];
    for &row in next {
        match seen.get_mut(row as usize) {
            Some(s) if !*s => *s = true,
            _ => {
                return Err(BurrowsError::MalformedInput(format!(
                    "transformation vector repeats or overruns row {}",
                    row
                )))
            }
        }
    }
    Ok(())
}

fn count_runs(data: &[u8]) -> usize {
    if data.is_empty() {
        return 0;
    }
    1 + data.windows(2).filter(|w| w[0] != w[1]).count()
}
