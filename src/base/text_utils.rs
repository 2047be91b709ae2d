//! Text helpers for XML names.
//!
//! XML `NameStartChar`/`NameChar` are approximated with the Unicode
//! identifier classes (UAX #31) plus the extra punctuation XML allows.

/// Check if a character may start an NCName.
#[inline]
pub fn is_name_start_char(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

/// Check if a character may continue an NCName.
#[inline]
pub fn is_name_char(c: char) -> bool {
    matches!(c, '-' | '.' | '\u{B7}') || unicode_ident::is_xid_continue(c)
}

/// Check if `text` is a non-colonized name.
pub fn is_ncname(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Split a lexical QName into `(prefix, local)`.
///
/// Returns `None` if either part is not an NCName.
pub fn split_qname(text: &str) -> Option<(Option<&str>, &str)> {
    match text.split_once(':') {
        Some((prefix, local)) if is_ncname(prefix) && is_ncname(local) => {
            Some((Some(prefix), local))
        }
        Some(_) => None,
        None if is_ncname(text) => Some((None, text)),
        None => None,
    }
}

/// Check if `text` is an XML boolean-ish "on" value (`yes`, `true`, `1`).
pub fn is_yes(text: &str) -> bool {
    matches!(text.trim(), "yes" | "true" | "1")
}
