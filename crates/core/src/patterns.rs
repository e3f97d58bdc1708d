//! Precompiled keyword patterns used by the scorer, the pruner and the
//! special-case dispatcher. All of them are case-insensitive.

use regex::Regex;
use std::sync::LazyLock;

/// Class/id names that almost always mark boilerplate; pruned before scoring.
pub static UNLIKELY_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)combx|comment|disqus|foot|header|menu|meta|nav|rss|shoutbox|sidebar|sponsor")
        .expect("BUG: hardcoded unlikely-candidates pattern is invalid")
});

/// Rescue terms that keep an otherwise unlikely element in the tree.
pub static OK_MAYBE_ITS_A_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|main").expect("BUG: hardcoded rescue pattern is invalid")
});

pub static POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)article|body|content|entry|hentry|page|pagination|post|text")
        .expect("BUG: hardcoded positive pattern is invalid")
});

pub static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)combx|comment|contact|disqus|foot|footer|footnote|header|link|media|menu|meta|nav|promo|related|rss|scroll|shoutbox|sidebar|sponsor|tags|widget",
    )
    .expect("BUG: hardcoded negative pattern is invalid")
});

/// Block-level opening tags; a `div` without any of them is a misused paragraph.
pub static DIV_TO_P_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(a|blockquote|dl|div|img|ol|p|pre|table|ul)")
        .expect("BUG: hardcoded block-element pattern is invalid")
});

/// Iframe sources that survive sanitisation.
pub static VIDEO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(www\.)?(youtube|vimeo|ted|player\.vimeo)\.com")
        .expect("BUG: hardcoded video-host pattern is invalid")
});

/// A period followed by a space or the end of a line.
pub static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)\.( |$)").expect("BUG: hardcoded sentence-end pattern is invalid"));

pub static NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\f]+").expect("BUG: hardcoded newline pattern is invalid"));

pub static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t ]+").expect("BUG: hardcoded space pattern is invalid"));

/// Inner markup made only of non-word characters.
pub static NON_WORD_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\W*$").expect("BUG: hardcoded non-word pattern is invalid"));

pub static YOUTUBE_VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[?&]v=([_\-a-z0-9]+)&?").expect("BUG: hardcoded youtube id pattern is invalid")
});

pub static VIMEO_CLIP_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"clip_id=(\d+)").expect("BUG: hardcoded vimeo clip pattern is invalid"));
