//! Markup escaping for catalog-supplied text.

use std::borrow::Cow;

const RESERVED: [char; 5] = ['&', '<', '>', '\'', '"'];

/// Replaces `& < > ' "` with numeric character references (`&#38;` etc.).
///
/// Borrows the input unchanged when it contains none of those characters.
#[must_use]
pub fn xml_escape(input: &str) -> Cow<'_, str> {
    if !input.contains(RESERVED) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&#38;"),
            '<' => out.push_str("&#60;"),
            '>' => out.push_str("&#62;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
