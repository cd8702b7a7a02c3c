//! Longest common subsequence.

use crate::ratio;

/// Length of the longest common subsequence of `a` and `b`, in characters.
///
/// Runs in O(N·M) time and O(M) space.
pub fn lcs_length(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in a.chars() {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == *cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Scores how much of `needle` appears, in order, inside `s`.
///
/// The ratio is `lcs_length(needle, s) / len(needle)`; the match holds when
/// the ratio reaches `threshold`. An empty needle never matches.
pub fn lcs_match(needle: &str, s: &str, threshold: f32) -> (bool, f32) {
    let len = needle.chars().count();
    if len == 0 {
        return (false, 0.0);
    }

    let score = ratio(lcs_length(needle, s), len);
    log::trace!("lcs ratio of {:?} in {:?} is {}", needle, s, score);
    (threshold <= score, score)
}
