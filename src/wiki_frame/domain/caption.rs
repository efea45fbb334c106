//! Caption text handling: cleaning the scraped description and cutting it down
//! to a single line that fits the display.

use once_cell::sync::Lazy;
use regex::Regex;

/// Language tag Commons puts in front of multilingual descriptions, e.g. `English: `.
static LANGUAGE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+:\s*").expect("language prefix pattern is valid")
});

pub fn strip_language_prefix(description: &str) -> String {
    LANGUAGE_PREFIX.replace(description, "").into_owned()
}

/// Collapses runs of whitespace (including newlines from the markup) into single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedily takes words from the front of `caption` while the measured line stays
/// within `max_width`. Stops at the first word that does not fit, so the result is
/// always a word-prefix of the caption (possibly empty).
pub fn fit_words<F>(caption: &str, max_width: f32, mut measure: F) -> String
where
    F: FnMut(&str) -> f32,
{
    let mut line = String::new();
    for word in caption.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };
        if measure(&candidate) <= max_width {
            line = candidate;
        } else {
            break;
        }
    }
    line
}
