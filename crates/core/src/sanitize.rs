//! Final cleanup of an assembled article.
//!
//! [`sanitize`] removes low-value headings, forms, non-video iframes, empty
//! paragraphs and link-heavy or list-like containers, then enforces the tag
//! and attribute whitelist and serialises the result.

use ego_tree::NodeId;

use crate::dom::Dom;
use crate::options::ReadabilityOptions;
use crate::patterns::{HORIZONTAL_SPACE, NEWLINES, VIDEO};
use crate::scoring::{Candidates, class_weight, link_density};

const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Containers with at least this many commas are treated as prose.
const PROSE_COMMAS: usize = 10;

/// Runs every cleaning step on the subtree rooted at `node` and returns its
/// serialised, whitespace-normalised markup.
pub fn sanitize(dom: &mut Dom, node: NodeId, candidates: &Candidates, options: &ReadabilityOptions) -> String {
    let debug = options.debug;

    for heading in dom.elements_by_tag(node, &HEADINGS) {
        if class_weight(dom, heading) < 0.0 || link_density(dom, heading) > 0.33 {
            debug_trace!(debug, tag = dom.tag(heading).unwrap_or_default(), "removing heading");
            dom.detach(heading);
        }
    }

    for form in dom.elements_by_tag(node, &["form"]) {
        debug_trace!(debug, id = dom.attr(form, "id").unwrap_or_default(), "removing form");
        dom.detach(form);
    }

    for iframe in dom.elements_by_tag(node, &["iframe"]) {
        let src = dom.attr(iframe, "src").unwrap_or_default();
        if !VIDEO.is_match(src) {
            debug_trace!(debug, src, "removing non-video iframe");
            dom.detach(iframe);
        }
    }

    for paragraph in dom.elements_by_tag(node, &["p"]) {
        if dom.text(paragraph).trim().is_empty() {
            debug_trace!(debug, "removing empty paragraph");
            dom.detach(paragraph);
        }
    }

    clean_conditionally(dom, node, candidates, options);
    apply_whitelist(dom, node, options);

    collapse_whitespace(&dom.outer_html(node))
}

/// Removes `table`, `ul` and `div` elements that look like navigation, link
/// farms, galleries or form chrome rather than prose.
pub fn clean_conditionally(dom: &mut Dom, node: NodeId, candidates: &Candidates, options: &ReadabilityOptions) {
    for el in dom.elements_by_tag(node, &["table", "ul", "div"]) {
        if !dom.is_within(node, el) {
            continue;
        }

        let weight = class_weight(dom, el);
        let content_score = candidates.score_of(el);
        let tag = dom.tag(el).unwrap_or_default().to_string();

        if weight + content_score < 0.0 {
            debug_trace!(
                options.debug,
                tag = %tag,
                id = dom.attr(el, "id").unwrap_or_default(),
                class = dom.attr(el, "class").unwrap_or_default(),
                weight,
                content_score,
                "conditionally cleaned: negative score"
            );
            dom.detach(el);
            continue;
        }

        let text = dom.text(el);
        if text.matches(',').count() >= PROSE_COMMAS {
            continue;
        }

        if let Some(reason) = removal_reason(dom, el, &tag, weight, text.trim().chars().count(), options) {
            debug_trace!(
                options.debug,
                tag = %tag,
                id = dom.attr(el, "id").unwrap_or_default(),
                class = dom.attr(el, "class").unwrap_or_default(),
                weight,
                content_score,
                reason,
                "conditionally cleaned"
            );
            dom.detach(el);
        }
    }
}

fn removal_reason(
    dom: &Dom,
    el: NodeId,
    tag: &str,
    weight: f64,
    content_length: usize,
    options: &ReadabilityOptions,
) -> Option<&'static str> {
    let count = |kind: &str| dom.elements_by_tag(el, &[kind]).len() as i64;

    let p = count("p");
    let img = count("img");
    let li = count("li") - 100;
    let input = count("input");
    let embed = count("embed");
    let density = link_density(dom, el);
    let content_length = content_length as i64;

    if img > p && p > 0 {
        Some("too many images")
    } else if li > p && tag != "ul" && tag != "ol" {
        Some("more <li>s than <p>s")
    } else if input > p / 3 {
        Some("more <input>s than a third of its <p>s")
    } else if content_length < options.min_text_length as i64 && (img == 0 || img > 2) {
        Some("too short a content length without a single image")
    } else if weight < 25.0 && density > 0.2 {
        Some("too many links for its weight")
    } else if weight >= 25.0 && density > 0.5 {
        Some("too many links for its weight")
    } else if (embed == 1 && content_length < 75) || embed > 1 {
        Some("<embed>s with too short a content length, or too many <embed>s")
    } else {
        None
    }
}

/// Keeps whitelisted tags (minus unlisted attributes) and unwraps the rest
/// into their text.
///
/// Elements already cut loose from `node`, including those under an ancestor
/// unwrapped earlier in the same pass, are skipped.
pub fn apply_whitelist(dom: &mut Dom, node: NodeId, options: &ReadabilityOptions) {
    for el in dom.subtree_elements(node) {
        if !dom.is_within(node, el) {
            continue;
        }

        let tag = dom.tag(el).unwrap_or_default().to_string();
        if options.is_allowed_tag(&tag) {
            dom.retain_attributes(el, |name| options.is_allowed_attribute(name));
        } else if dom.replace_with_text(el) {
            debug_trace!(options.debug, tag = %tag, "unwrapping element outside the whitelist");
        }
    }
}

/// Collapses line-break runs to one newline and tab/space runs to one space,
/// and turns `&nbsp;` into a plain space.
pub fn collapse_whitespace(markup: &str) -> String {
    let collapsed = NEWLINES.replace_all(markup, "\n");
    let collapsed = HORIZONTAL_SPACE.replace_all(&collapsed, " ");
    collapsed.replace("&nbsp;", " ")
}

/// Re-packs each byte of the UTF-8 encoding as the code point of the same
/// value. This mirrors a Latin-1 round trip and is not a general transcoder.
pub fn repack_latin1(content: &str) -> String {
    content.bytes().map(char::from).collect()
}
