use std::cmp::Ordering;

use log::{debug, info};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::doubling::doubling_rank;
use crate::error::{BurrowsError, Result};
use crate::tools::cli::Algorithms;
use crate::tools::freq_count::freqs;

/// Blocks longer than this are sorted with rayon.
const PARALLEL_THRESHOLD: usize = 40_000;
/// Below this size the comparison sort always wins.
const SMALL_BLOCK: usize = 3_000;
/// Bytes examined when guessing whether the data is repetitive.
const SAMPLE_SIZE: usize = 5_000;
/// Window length for the long-repeat scan. Any repeat of twice this length contains a window
/// that starts on a multiple of it.
const REPEAT_WINDOW: usize = 32;
/// Percentage of the block covered by repeated windows above which doubling is used.
const REPEAT_SHARE: usize = 25;
const HASH_BASE: u64 = 0x0100_0000_01b3;

/// Sorted order of every cyclic rotation of a block. Equal rotations (periodic data) are kept in
/// ascending offset order, so the result is fully deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixRank {
    order: Vec<u32>,
}

impl SuffixRank {
    /// Rank all rotations of `data` with the requested algorithm.
    pub fn new(data: &[u8], algorithm: &Algorithms) -> Result<Self> {
        if data.is_empty() {
            return Err(BurrowsError::InvalidArgument(
                "cannot rank the rotations of an empty block".to_string(),
            ));
        }
        if data.len() > u32::MAX as usize {
            return Err(BurrowsError::InvalidArgument(format!(
                "block of {} bytes does not fit a 32 bit index",
                data.len()
            )));
        }

        let algorithm = match algorithm {
            Algorithms::Auto => choose_algorithm(data),
            other => other.clone(),
        };
        info!("Ranking {} rotations with {} sort.", data.len(), algorithm);

        let order = match algorithm {
            Algorithms::Doubling => doubling_rank(data),
            _ => comparison_rank(data),
        };
        Ok(Self { order })
    }

    /// Number of rotations, which is the block length.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Offset of the i-th smallest rotation.
    pub fn index(&self, i: usize) -> Result<usize> {
        self.order
            .get(i)
            .map(|&o| o as usize)
            .ok_or_else(|| {
                BurrowsError::InvalidArgument(format!(
                    "rank {} is outside 0..{}",
                    i,
                    self.order.len()
                ))
            })
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.order
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.order
    }
}

/// Sort offsets with the rotation comparator. The comparator already breaks ties on the offset,
/// so an unstable (and parallel) sort gives the stable answer.
fn comparison_rank(data: &[u8]) -> Vec<u32> {
    let mut index = (0_u32..data.len() as u32).collect::<Vec<u32>>();
    if data.len() > PARALLEL_THRESHOLD {
        index.par_sort_unstable_by(|a, b| rank_compare(*a as usize, *b as usize, data));
    } else {
        index.sort_unstable_by(|a, b| rank_compare(*a as usize, *b as usize, data));
    }
    index
}

/// Total order used for ranking: rotation contents first, original offset second.
pub(crate) fn rank_compare(a: usize, b: usize, block: &[u8]) -> Ordering {
    rotation_compare(a, b, block).then_with(|| a.cmp(&b))
}

/// Compare the n-byte rotations starting at `a` and `b`. The scan is done in at most three
/// slice comparisons, each ending where one of the two offsets wraps.
pub(crate) fn rotation_compare(a: usize, b: usize, block: &[u8]) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let n = block.len();
    let (mut i, mut j, mut left) = (a, b, n);
    while left > 0 {
        let run = (n - i).min(n - j).min(left);
        match block[i..i + run].cmp(&block[j..j + run]) {
            Ordering::Equal => {}
            ord => return ord,
        }
        i = (i + run) % n;
        j = (j + run) % n;
        left -= run;
    }
    Ordering::Equal
}

/// Pick a ranking algorithm for `Algorithms::Auto`. Comparison sorting degrades badly on long
/// repeats, so repetitive data goes to prefix doubling.
fn choose_algorithm(data: &[u8]) -> Algorithms {
    if data.len() < SMALL_BLOCK {
        return Algorithms::Simple;
    }
    if is_repetitive(&data[..SAMPLE_SIZE.min(data.len())]) {
        return Algorithms::Doubling;
    }
    let share = repeat_share(data);
    debug!("{}% of the block lies in repeated windows.", share);
    if share > REPEAT_SHARE {
        Algorithms::Doubling
    } else {
        Algorithms::Simple
    }
}

fn is_repetitive(sample: &[u8]) -> bool {
    // Most frequent byte over 30% of the sample, or a small symbol set
    let counts = freqs(sample);
    let max = counts.iter().max().copied().unwrap_or(0);
    let symbols = counts.iter().filter(|&&c| c > 0).count();
    debug!(
        "Max frequency is {}%, symbol set size is {}.",
        max * 100 / sample.len(),
        symbols
    );
    if max * 10 > sample.len() * 3 || symbols < 20 {
        return true;
    }

    // Or a single run covering more than 20% of it
    let mut longest = 0;
    let mut run = 0;
    for w in sample.windows(2) {
        if w[0] == w[1] {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    debug!("Longest run is {}.", longest);
    longest * 10 > sample.len() * 2
}

/// Percentage of `data` covered by `REPEAT_WINDOW`-byte windows that also occur at an aligned
/// offset elsewhere in the block. Data made of many copies of one unit scores close to 100,
/// whatever the unit length.
fn repeat_share(data: &[u8]) -> usize {
    let n = data.len();
    if n < 2 * REPEAT_WINDOW {
        return 0;
    }
    let window_hash = |w: &[u8]| {
        w.iter()
            .fold(0_u64, |h, &b| h.wrapping_mul(HASH_BASE).wrapping_add(b as u64))
    };
    // Weight of the byte leaving the rolling window
    let top = (1..REPEAT_WINDOW).fold(1_u64, |p, _| p.wrapping_mul(HASH_BASE));

    let mut aligned: FxHashMap<u64, usize> = FxHashMap::default();
    for start in (0..=n - REPEAT_WINDOW).step_by(REPEAT_WINDOW) {
        aligned
            .entry(window_hash(&data[start..start + REPEAT_WINDOW]))
            .or_insert(start);
    }

    let mut covered = 0;
    let mut covered_to = 0;
    let mut hash = window_hash(&data[..REPEAT_WINDOW]);
    for i in 0..=n - REPEAT_WINDOW {
        if i > 0 {
            hash = hash
                .wrapping_sub((data[i - 1] as u64).wrapping_mul(top))
                .wrapping_mul(HASH_BASE)
                .wrapping_add(data[i + REPEAT_WINDOW - 1] as u64);
        }
        let end = i + REPEAT_WINDOW;
        match aligned.get(&hash) {
            Some(&j) if j != i && data[j..j + REPEAT_WINDOW] == data[i..end] => {
                covered += end - i.max(covered_to);
                covered_to = end;
            }
            _ => {}
        }
    }
    covered * 100 / n
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    fn rank(data: &[u8], algorithm: Algorithms) -> Vec<u32> {
        SuffixRank::new(data, &algorithm).unwrap().into_inner()
    }

    #[test]
    fn abracadabra() {
        let expect = vec![11, 10, 7, 0, 3, 5, 8, 1, 4, 6, 9, 2];
        assert_eq!(rank(b"ABRACADABRA!", Algorithms::Simple), expect);
        assert_eq!(rank(b"ABRACADABRA!", Algorithms::Doubling), expect);
    }

    #[test]
    fn identical_rotations_keep_offset_order() {
        assert_eq!(rank(b"AAAAA", Algorithms::Simple), vec![0, 1, 2, 3, 4]);
        assert_eq!(rank(b"AAAAA", Algorithms::Doubling), vec![0, 1, 2, 3, 4]);
        // "abab" has two copies of each rotation.
        assert_eq!(rank(b"abab", Algorithms::Simple), vec![0, 2, 1, 3]);
        assert_eq!(rank(b"abab", Algorithms::Doubling), vec![0, 2, 1, 3]);
    }

    #[test]
    fn repeated_runs_are_deterministic() {
        let data = b"xyzxyzxyz".repeat(40);
        let first = rank(&data, Algorithms::Simple);
        for _ in 0..3 {
            assert_eq!(rank(&data, Algorithms::Simple), first);
        }
        assert_eq!(rank(&data, Algorithms::Doubling), first);
    }

    #[test]
    fn single_byte() {
        assert_eq!(rank(b"q", Algorithms::Simple), vec![0]);
        assert_eq!(rank(b"q", Algorithms::Doubling), vec![0]);
    }

    #[test]
    fn empty_block_rejected() {
        assert!(matches!(
            SuffixRank::new(&[], &Algorithms::Auto),
            Err(BurrowsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn index_checks_range() {
        let csa = SuffixRank::new(b"banana", &Algorithms::Simple).unwrap();
        assert_eq!(csa.len(), 6);
        assert_eq!(csa.index(0).unwrap(), 5);
        assert!(matches!(csa.index(6), Err(BurrowsError::InvalidArgument(_))));
    }

    #[test]
    fn rotation_compare_wraps() {
        let block = b"ba";
        // "ab" < "ba"
        assert_eq!(rotation_compare(1, 0, block), Ordering::Less);
        assert_eq!(rotation_compare(0, 1, block), Ordering::Greater);
        assert_eq!(rotation_compare(0, 2, b"aaaa"), Ordering::Equal);
        assert_eq!(rank_compare(0, 2, b"aaaa"), Ordering::Less);
    }

    /// xorshift bytes: no repeats longer than a few bytes.
    fn noise(len: usize, mut state: u64) -> Vec<u8> {
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state >> 32) as u8
            })
            .collect()
    }

    /// Lower-case words and spaces, long enough to pass the byte sample checks.
    fn words(len: usize) -> Vec<u8> {
        noise(len, 0x9e37_79b9_7f4a_7c15)
            .into_iter()
            .map(|b| match b % 32 {
                0..=25 => b'a' + b % 32,
                _ => b' ',
            })
            .collect()
    }

    #[test]
    fn auto_picks_doubling_for_repeats() {
        assert_eq!(choose_algorithm(&[7_u8; 10_000]), Algorithms::Doubling);
        assert_eq!(choose_algorithm(&noise(10_000, 1)), Algorithms::Simple);
        assert_eq!(choose_algorithm(&words(10_000)), Algorithms::Simple);
        assert_eq!(choose_algorithm(b"short"), Algorithms::Simple);
    }

    #[test]
    fn auto_picks_doubling_for_long_periods() {
        // Period longer than the byte sample, so only the repeat scan can see it.
        let unit = words(SAMPLE_SIZE + 1_480);
        assert!(!is_repetitive(&unit[..SAMPLE_SIZE]));
        let data = unit.repeat(8);
        assert!(repeat_share(&data) > 80);
        assert_eq!(choose_algorithm(&data), Algorithms::Doubling);
        assert_eq!(rank(&data, Algorithms::Auto), doubling_rank(&data));
    }

    #[test]
    fn repeat_share_ignores_short_matches() {
        assert_eq!(repeat_share(&noise(20_000, 7)), 0);
        assert_eq!(repeat_share(b"tiny"), 0);
        // The second half copies the first, so half the block is covered.
        let half = noise(8_192, 3);
        let data = [half.clone(), half].concat();
        let share = repeat_share(&data);
        assert!((45..=55).contains(&share), "share was {}", share);
    }

    #[test]
    fn large_block_uses_parallel_sort() {
        let data: Vec<u8> = (0..50_000_u32)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 24) as u8)
            .collect();
        assert_eq!(
            rank(&data, Algorithms::Simple),
            rank(&data, Algorithms::Doubling)
        );
    }

    proptest! {
        #[test]
        fn rank_is_sorted_permutation(data in proptest::collection::vec(0_u8..4, 1..300)) {
            let order = rank(&data, Algorithms::Simple);
            let mut seen = vec![false; data.len()];
            for &o in &order {
                prop_assert!(!seen[o as usize]);
                seen[o as usize] = true;
            }
            for w in order.windows(2) {
                prop_assert_eq!(rank_compare(w[0] as usize, w[1] as usize, &data), Ordering::Less);
            }
        }

        #[test]
        fn doubling_matches_comparison(data in proptest::collection::vec(any::<u8>(), 1..400)) {
            prop_assert_eq!(rank(&data, Algorithms::Doubling), rank(&data, Algorithms::Simple));
        }

        #[test]
        fn doubling_matches_comparison_small_alphabet(data in proptest::collection::vec(0_u8..2, 1..400)) {
            prop_assert_eq!(rank(&data, Algorithms::Doubling), rank(&data, Algorithms::Simple));
        }
    }
}
