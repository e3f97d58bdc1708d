//! Document preparation ahead of scoring.
//!
//! [`strip_markup`] runs on the raw source before parsing; the two DOM passes
//! run on the parsed tree at the start of every extraction attempt.

use std::sync::LazyLock;

use regex::Regex;

use crate::dom::Dom;
use crate::patterns::{DIV_TO_P_ELEMENTS, OK_MAYBE_ITS_A_CANDIDATE, UNLIKELY_CANDIDATES};

static COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("BUG: hardcoded comment pattern is invalid"));

/// Removes `script` and `style` elements and comments from raw markup.
///
/// Falls back to the untouched input if the rewriter rejects it; the DOM pass
/// in the retry controller removes the same nodes again after parsing.
pub fn strip_markup(html: &str) -> String {
    let mut output = String::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![
                lol_html::element!("script", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("style", |el| {
                    el.remove();
                    Ok(())
                }),
            ],
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    if rewriter.write(html.as_bytes()).is_err() || rewriter.end().is_err() {
        return COMMENTS.replace_all(html, "").into_owned();
    }

    COMMENTS.replace_all(&output, "").into_owned()
}

/// Detaches elements whose `class` + `id` looks like boilerplate and carries no
/// rescue term. `body` and the root element are never removed.
pub fn remove_unlikely_candidates(dom: &mut Dom, debug: bool) -> usize {
    let root = dom.root_element();
    let doomed: Vec<_> = dom
        .all_elements()
        .into_iter()
        .filter(|&id| id != root && dom.tag(id) != Some("body"))
        .filter(|&id| {
            let names = format!(
                "{}{}",
                dom.attr(id, "class").unwrap_or_default(),
                dom.attr(id, "id").unwrap_or_default()
            );
            UNLIKELY_CANDIDATES.is_match(&names) && !OK_MAYBE_ITS_A_CANDIDATE.is_match(&names)
        })
        .collect();

    for &id in &doomed {
        debug_trace!(
            debug,
            class = dom.attr(id, "class").unwrap_or_default(),
            id = dom.attr(id, "id").unwrap_or_default(),
            "removing unlikely candidate"
        );
        dom.detach(id);
    }

    doomed.len()
}

/// Retags every `div` whose inner markup opens no block-level element to `p`.
pub fn transform_misused_divs_into_paragraphs(dom: &mut Dom, debug: bool) -> usize {
    let mut altered = 0;

    for div in dom.document_elements_by_tag(&["div"]) {
        if DIV_TO_P_ELEMENTS.is_match(&dom.inner_html(div)) {
            continue;
        }

        debug_trace!(
            debug,
            id = dom.attr(div, "id").unwrap_or_default(),
            class = dom.attr(div, "class").unwrap_or_default(),
            "altering div to p"
        );
        dom.rename(div, "p");
        altered += 1;
    }

    altered
}
