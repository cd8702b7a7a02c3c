//! # Place Text - Similarity Scores for Place Names
//!
//! Pure scoring functions used next to the spatial index when matching
//! user-entered names against stored places. Every function works on Unicode
//! scalar values, so multi-byte scripts count one per character.
//!
//! - [`lcs_length`] / [`lcs_match`]: longest common subsequence
//! - [`local_alignment_score`] / [`local_alignment_match`]: Smith-Waterman local alignment
//! - [`prefix_match_ratio`]: how much of a name a prefix accounts for
//! - [`contains_position_score`]: where a substring sits inside a name
//!
//! ```rust
//! use place_text::{contains_position_score, lcs_length, prefix_match_ratio};
//!
//! assert_eq!(lcs_length("キャノン", "キヤノン"), 3);
//! assert_eq!(prefix_match_ratio("渋谷駅", "渋谷駅前"), Some(0.75));
//! assert_eq!(contains_position_score("渋谷駅", "JR渋谷駅"), Some(2));
//! ```

pub mod alignment;
pub mod contains;
pub mod lcs;

pub use alignment::{local_alignment_match, local_alignment_score, LocalAlignment};
pub use contains::{contains_position_score, prefix_match_ratio};
pub use lcs::{lcs_length, lcs_match};

/// `numerator / denominator`, or 0 when the denominator is 0.
pub(crate) fn ratio(numerator: usize, denominator: usize) -> f32 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f32 / denominator as f32
}
