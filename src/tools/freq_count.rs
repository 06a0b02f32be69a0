use rayon::prelude::*;

/// Byte histogram of the input. Large inputs are counted in parallel chunks.
pub fn freqs(data: &[u8]) -> [usize; 256] {
    if data.len() > 64_000 {
        // 16k chunks keep each worker's slice in L1/L2.
        data.par_chunks(16_000)
            .fold(
                || [0_usize; 256],
                |mut counts, chunk| {
                    chunk.iter().for_each(|&el| counts[el as usize] += 1);
                    counts
                },
            )
            .reduce(
                || [0_usize; 256],
                |mut a, b| {
                    a.iter_mut().zip(b.iter()).for_each(|(x, y)| *x += y);
                    a
                },
            )
    } else {
        let mut counts = [0_usize; 256];
        data.iter().for_each(|&el| counts[el as usize] += 1);
        counts
    }
}

/// Turn a histogram into bucket start offsets: entry `b` is the number of
/// bytes strictly smaller than `b`.
pub fn bucket_starts(counts: &[usize; 256]) -> [usize; 256] {
    let mut starts = [0_usize; 256];
    for b in 1..256 {
        starts[b] = starts[b - 1] + counts[b - 1];
    }
    starts
}
