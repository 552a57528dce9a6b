// Text normalization — the first stage of the sentiment pipeline.
//
// Reviews arrive with arbitrary casing, punctuation, emoji and line breaks.
// The scorer only ever sees lowercase ASCII words separated by single spaces.

use regex::Regex;
use std::sync::LazyLock;

/// Everything that is not an ASCII letter, digit or whitespace. `\s` is
/// Unicode-aware, so no-break and ideographic spaces survive as separators.
static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("static pattern compiles"));

/// Normalize raw review text.
///
/// Lower-cases, drops every character that isn't an ASCII letter, digit or
/// whitespace (accented letters are dropped, not transliterated), then
/// collapses whitespace runs into single spaces and trims the ends.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_ALPHANUMERIC.replace_all(&lowered, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
