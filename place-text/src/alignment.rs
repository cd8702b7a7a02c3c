//! Smith-Waterman local alignment.

use serde::{Deserialize, Serialize};

use crate::ratio;

/// Scoring weights for [`local_alignment_score`].
///
/// Penalties are stored as positive numbers and subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalAlignment {
    pub match_score: i32,
    pub mismatch_penalty: i32,
    pub gap_penalty: i32,
}

impl LocalAlignment {
    pub fn new(match_score: i32, mismatch_penalty: i32, gap_penalty: i32) -> Self {
        Self {
            match_score,
            mismatch_penalty,
            gap_penalty,
        }
    }
}

impl Default for LocalAlignment {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

/// Runs Smith-Waterman over the characters of `a` and `b`.
///
/// Each cell is `max(0, diagonal ± match/mismatch, up - gap, left - gap)`.
/// Returns `(final, max)`: the score of the bottom-right cell, and the best
/// score seen anywhere in the table. The final score drops when `b` carries
/// characters after the aligned region; the max score does not.
pub fn local_alignment_score(a: &str, b: &str, alignment: &LocalAlignment) -> (i32, i32) {
    let b: Vec<char> = b.chars().collect();
    let mut prev = vec![0i32; b.len() + 1];
    let mut curr = vec![0i32; b.len() + 1];
    let mut best = 0;

    for ca in a.chars() {
        for (j, cb) in b.iter().enumerate() {
            let diagonal = if ca == *cb {
                prev[j] + alignment.match_score
            } else {
                prev[j] - alignment.mismatch_penalty
            };
            let up = prev[j + 1] - alignment.gap_penalty;
            let left = curr[j] - alignment.gap_penalty;

            curr[j + 1] = 0.max(diagonal).max(up).max(left);
            best = best.max(curr[j + 1]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (prev[b.len()], best)
}

/// Scores how well `needle` aligns somewhere inside `s`.
///
/// Spaces are removed from both strings before aligning with the default
/// weights. The ratio divides the best alignment score by the character
/// count of `s` as given, spaces included. An empty `s` never matches.
pub fn local_alignment_match(needle: &str, s: &str, threshold: f32) -> (bool, f32) {
    let len = s.chars().count();
    if len == 0 {
        return (false, 0.0);
    }

    let needle: String = needle.chars().filter(|c| *c != ' ').collect();
    let stripped: String = s.chars().filter(|c| *c != ' ').collect();
    let (_, best) = local_alignment_score(&needle, &stripped, &LocalAlignment::default());

    let score = ratio(best.max(0) as usize, len);
    log::trace!("alignment ratio of {:?} in {:?} is {}", needle, s, score);
    (threshold <= score, score)
}
