use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Every character that is meaningful in some regex dialect when taken
    /// from a user-supplied delimiter string.
    static ref ESCAPABLE_CHARS: Regex =
        Regex::new(r"[?+|$(){}\[\]^.\-\\/*]").expect("escapable chars class is valid");
}

/// Backslash-escapes regex metacharacters in a user-supplied delimiter so it
/// can be embedded into a dynamically built pattern.
pub fn escape_regexp(raw: &str) -> String {
    ESCAPABLE_CHARS.replace_all(raw, "\\$0").into_owned()
}
