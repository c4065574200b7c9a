//! Browser-like whitespace handling over the accumulated runs.
//!
//! Character data is collapsed as it arrives, and runs are trimmed from the
//! end whenever a block boundary or line break is reached. Explicit `<br>`
//! line breaks survive trimming.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{InlineIntent, StyledText};

fn collapsible() -> &'static Regex {
    static COLLAPSIBLE: OnceLock<Regex> = OnceLock::new();
    COLLAPSIBLE.get_or_init(|| Regex::new(r"[\t\n\x0B\x0C\r ]+").expect("Invalid whitespace regex"))
}

/// Replaces every stretch of HTML whitespace with a single space.
pub fn collapse(text: &str) -> Cow<'_, str> {
    collapsible().replace_all(text, " ")
}

/// Whitespace that trimming may delete.
pub fn is_removable(c: char) -> bool {
    c == ' ' || c == '\n'
}

/// Tabs and Unicode space separators (category Zs).
pub fn is_horizontal(c: char) -> bool {
    matches!(
        c,
        '\t' | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Deletes trailing spaces and newlines, keeping any `<br>` line breaks.
///
/// Trimming carries on past line-break runs, so whitespace on both sides of
/// a break goes while the break itself stays.
pub fn right_trim(text: &mut StyledText) {
    text.trim_end_except(is_removable, |a| a.inline_intent.contains(InlineIntent::LINE_BREAK));
}
