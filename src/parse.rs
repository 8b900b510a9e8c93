/// Splits comma-separated text into integers. A token counts only if it is
/// purely ASCII digits after trimming; everything else is dropped without
/// an error. Used for both user input and remote replies.
pub fn numbers(raw: &str) -> Vec<u32> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|token| token.parse().ok())
        .collect()
}
