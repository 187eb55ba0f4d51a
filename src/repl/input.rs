//! Input normalization

/// Splits a raw input line into lowercase words.
///
/// Leading, trailing and repeated whitespace is ignored.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect()
}
