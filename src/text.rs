//! Text helpers for roll output

/// Plural form of `word` for `count` items ("1 target", "2 targets")
pub fn pluralize(word: &str, count: u32) -> String {
    if count == 1 {
        return word.to_string();
    }
    if word.ends_with('s') || word.ends_with('x') || word.ends_with("ch") || word.ends_with("sh")
    {
        format!("{}es", word)
    } else {
        format!("{}s", word)
    }
}
