//! Substring placement scores.

/// Returns `len(prefix) / len(s)` when `s` starts with `prefix`.
///
/// Lengths are in characters. `None` when `s` does not start with `prefix`,
/// or when `s` is empty.
pub fn prefix_match_ratio(prefix: &str, s: &str) -> Option<f32> {
    if s.is_empty() || !s.starts_with(prefix) {
        return None;
    }
    Some(prefix.chars().count() as f32 / s.chars().count() as f32)
}

/// Scores where the first occurrence of `needle` sits inside `s`.
///
/// The score is the number of characters before the occurrence plus twice
/// the number after it, so an exact match scores 0 and a prefix match beats
/// a suffix match of the same length. `None` when `needle` does not occur.
pub fn contains_position_score(needle: &str, s: &str) -> Option<usize> {
    let byte_idx = s.find(needle)?;
    let before = s[..byte_idx].chars().count();
    let after = s[byte_idx + needle.len()..].chars().count();
    Some(before + after * 2)
}
