use std::collections::HashSet;

/// Split free-text input into audit targets, one per line.
///
/// Lines are trimmed, blank lines dropped, and exact duplicates collapsed onto their
/// first occurrence. Entry order is otherwise preserved.
pub fn parse_targets(input: &str) -> Vec<String> {
    collect_targets(input.lines())
}

/// Same normalization as [`parse_targets`] for targets that arrive already split.
pub fn collect_targets<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter_map(|entry| {
            let trimmed = entry.as_ref().trim();
            (!trimmed.is_empty() && seen.insert(trimmed.to_string())).then(|| trimmed.to_string())
        })
        .collect()
}
