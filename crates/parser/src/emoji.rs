//! Emoji shortcode decoding
//!
//! The LSP markdown marks each method's direction with GitHub shortcodes
//! such as `:leftwards_arrow_with_hook:`. Only the arrows in use are
//! known; other shortcodes are left as written.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-z0-9_+\-]+):").expect("valid shortcode regex"));

/// Map a shortcode name (without colons) to its emoji
pub fn lookup(name: &str) -> Option<&'static str> {
    let emoji = match name {
        "leftwards_arrow_with_hook" => "↩️",
        "arrow_right_hook" => "↪️",
        "arrow_right" => "➡️",
        "arrow_left" => "⬅️",
        _ => return None,
    };
    Some(emoji)
}

/// Replace every known `:shortcode:` with its emoji
///
/// # Examples
/// ```
/// use lsp_json_schema_parser::emoji::emojify;
///
/// assert_eq!(emojify(":arrow_right: :arrow_left:"), "➡️ ⬅️");
/// assert_eq!(emojify(":unknown_code:"), ":unknown_code:");
/// ```
pub fn emojify(text: &str) -> String {
    SHORTCODE_RE
        .replace_all(text, |caps: &Captures| match lookup(&caps[1]) {
            Some(emoji) => emoji.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
