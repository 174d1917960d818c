//! Cross-reference rewriting.
//!
//! Documentation text refers to other functions as `[[Name]]`. The marker
//! is rewritten after rendering, over the whole page, without regard to
//! HTML structure: a `[[` inside example code is rewritten too.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

// Non-greedy, single line. `[[a]b]]` captures `a]b`.
static CROSS_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[(.*?)\]\]").expect("cross-reference pattern is valid")
});

/// Replace every `[[X]]` with `<a href="X.html">X</a>`.
///
/// Text without markers is returned borrowed and unchanged.
pub fn rewrite_links(html: &str) -> Cow<'_, str> {
    CROSS_REFERENCE.replace_all(html, r#"<a href="${1}.html">${1}</a>"#)
}
