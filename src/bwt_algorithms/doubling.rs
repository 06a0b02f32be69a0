//! Prefix doubling over cyclic rotations.
//!
//! Round k sorts the rotations by their first 2^k bytes, using the classes from the previous
//! round as radix keys, so every round is a linear counting sort. After ceil(log2 n) rounds the
//! classes describe whole rotations. Rotations that are still tied are identical, and a final
//! counting pass over the offsets in ascending order places them by offset.
//!
//! Unlike a suffix array built over `data + sentinel`, this works directly on the cyclic
//! order, so it needs no rotation trick to match the comparison sort.
use log::trace;

use crate::tools::freq_count::{bucket_starts, freqs};

/// Rank every rotation of `data` (non-empty). Output matches the comparison sort exactly.
pub fn doubling_rank(data: &[u8]) -> Vec<u32> {
    let n = data.len();

    // Round 0: order and classes by single byte.
    let starts = bucket_starts(&freqs(data));
    let mut order = vec![0_u32; n];
    {
        let mut next = starts;
        for (i, &b) in data.iter().enumerate() {
            order[next[b as usize]] = i as u32;
            next[b as usize] += 1;
        }
    }
    let mut class = vec![0_u32; n];
    let mut classes = 1_usize;
    for k in 1..n {
        if data[order[k] as usize] != data[order[k - 1] as usize] {
            classes += 1;
        }
        class[order[k] as usize] = (classes - 1) as u32;
    }

    let mut shifted = vec![0_u32; n];
    let mut next_class = vec![0_u32; n];
    let mut count = vec![0_usize; n];
    let mut width = 1_usize;
    while width < n && classes < n {
        // Offsets sorted by their second half: shift the current order back by `width`.
        for (s, &o) in shifted.iter_mut().zip(order.iter()) {
            *s = ((o as usize + n - width) % n) as u32;
        }

        // Stable counting sort on the first half's class.
        count[..classes].iter_mut().for_each(|c| *c = 0);
        for &s in &shifted {
            count[class[s as usize] as usize] += 1;
        }
        let mut total = 0;
        for c in count[..classes].iter_mut() {
            let here = *c;
            *c = total;
            total += here;
        }
        for &s in &shifted {
            let slot = &mut count[class[s as usize] as usize];
            order[*slot] = s;
            *slot += 1;
        }

        // New classes from (first half, second half) pairs.
        next_class[order[0] as usize] = 0;
        classes = 1;
        for k in 1..n {
            let cur = order[k] as usize;
            let prev = order[k - 1] as usize;
            let pair = (class[cur], class[(cur + width) % n]);
            let prev_pair = (class[prev], class[(prev + width) % n]);
            if pair != prev_pair {
                classes += 1;
            }
            next_class[cur] = (classes - 1) as u32;
        }
        std::mem::swap(&mut class, &mut next_class);
        width <<= 1;
        trace!("Doubling width {}: {} classes.", width, classes);
    }

    if classes == n {
        return order;
    }

    // Identical rotations remain tied. Place offsets by class in ascending offset order.
    count[..classes].iter_mut().for_each(|c| *c = 0);
    for &c in &class {
        count[c as usize] += 1;
    }
    let mut total = 0;
    for c in count[..classes].iter_mut() {
        let here = *c;
        *c = total;
        total += here;
    }
    for (i, &c) in class.iter().enumerate() {
        let slot = &mut count[c as usize];
        order[*slot] = i as u32;
        *slot += 1;
    }
    order
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn banana() {
        assert_eq!(doubling_rank(b"banana"), vec![5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn periodic_block_sorted_by_offset() {
        assert_eq!(doubling_rank(b"abcabc"), vec![0, 3, 1, 4, 2, 5]);
        assert_eq!(doubling_rank(&[9_u8; 7]), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn two_bytes() {
        assert_eq!(doubling_rank(b"ba"), vec![1, 0]);
        assert_eq!(doubling_rank(b"ab"), vec![0, 1]);
    }
}
