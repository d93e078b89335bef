use std::{collections::HashSet, sync::OnceLock};

use regex::Regex;

/// Most tags a single post may carry.
pub const MAX_TAGS_PER_POST: usize = 10;

fn separator() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[,\s]+").expect("tag separator pattern is valid"))
}

/// Mirrors the `tags.name` check constraint in the backend schema.
fn valid_tag_name() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z0-9][a-z0-9_-]{0,49}$").expect("tag name pattern is valid")
    })
}

/// Turn free-form author input (`"#Rust, async  web"`) into tag names.
///
/// Pieces are split on commas and whitespace, stripped of one leading `#`,
/// lowercased, filtered to valid names, de-duplicated in first-seen order,
/// and capped at [`MAX_TAGS_PER_POST`].
pub fn normalize_tags(input: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    separator()
        .split(input)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.strip_prefix('#').unwrap_or(piece).to_lowercase())
        .filter(|name| valid_tag_name().is_match(name))
        .filter(|name| seen.insert(name.clone()))
        .take(MAX_TAGS_PER_POST)
        .collect()
}
