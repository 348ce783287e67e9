//! Title text cleanup.

use std::sync::OnceLock;

use regex::Regex;

static TAG_RE: OnceLock<Regex> = OnceLock::new();

/// Strip inline markup and unescape the handful of HTML entities the search
/// API emits (`<b>` emphasis around matched keywords, `&amp;` and friends),
/// collapsing the leftover whitespace.
pub fn clean_title(raw: &str) -> String {
    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"</?[A-Za-z][^>]*>").expect("static pattern"));
    let stripped = tag_re.replace_all(raw, " ");
    let unescaped = stripped
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");
    unescaped.split_whitespace().collect::<Vec<_>>().join(" ")
}
