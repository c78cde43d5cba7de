//! The per-element distinctions that parsing and printing need.

use std::collections::HashSet;

use lazy_static::lazy_static;

/// Elements without content or end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text contents carry no character references.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style",
];

lazy_static! {
    static ref VOID: HashSet<&'static str> =
        VOID_ELEMENTS.iter().copied().collect();
    static ref RAW_TEXT: HashSet<&'static str> =
        RAW_TEXT_ELEMENTS.iter().copied().collect();
}

/// Whether `<name>` stands alone, `<br>` style. End tags for these are
/// dropped by parsers and must not be printed.
pub fn is_void_element(name: &str) -> bool {
    VOID.contains(name)
}

/// Whether text inside `<name>` is taken verbatim. Printing must not
/// entity-encode it, or scripts end up with `&amp;&amp;` in them.
pub fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT.contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_tables() {
        assert!(is_void_element("br"));
        assert!(is_void_element("img"));
        assert!(!is_void_element("div"));
        assert!(!is_void_element("a"));
        assert!(is_raw_text_element("script"));
        assert!(!is_raw_text_element("p"));
    }
}
