//! Candidate selection and article assembly.

use ego_tree::NodeId;
use serde::Serialize;

use crate::dom::Dom;
use crate::patterns::SENTENCE_END;
use crate::scoring::{Candidate, Candidates, link_density};
use crate::special::SpecialCase;

/// Number of top candidates reported on the debug channel.
const TOP_CANDIDATES_LOGGED: usize = 5;

/// Result of one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedContent {
    /// Sanitised article markup, or the special-case fragment.
    pub content: String,
    /// Score of the selected candidate; 0 for special cases.
    pub top_score: f64,
    /// Elements placed in the article container.
    pub element_count: usize,
    pub special_case: Option<SpecialCase>,
    /// Whether the second pass without unlikely-candidate pruning ran.
    pub retried: bool,
}

/// Highest scoring candidate, ties resolved by first encounter.
///
/// With no candidates at all the `body` element (or the root element when the
/// tree has no body) is returned with a score of 0.
pub fn select_best_candidate(dom: &Dom, candidates: &Candidates, debug: bool) -> Candidate {
    let mut ranked: Vec<Candidate> = candidates.iter().copied().collect();
    ranked.sort_by(|a, b| b.content_score.total_cmp(&a.content_score));

    for (rank, candidate) in ranked.iter().take(TOP_CANDIDATES_LOGGED).enumerate() {
        debug_trace!(
            debug,
            rank = rank + 1,
            tag = dom.tag(candidate.elem).unwrap_or_default(),
            class = dom.attr(candidate.elem, "class").unwrap_or_default(),
            id = dom.attr(candidate.elem, "id").unwrap_or_default(),
            score = candidate.content_score,
            "candidate"
        );
    }

    ranked.first().copied().unwrap_or_else(|| {
        let elem = dom.body().unwrap_or_else(|| dom.root_element());
        Candidate { content_score: 0.0, elem }
    })
}

/// Collects the best candidate and its qualifying siblings into a new,
/// detached `div`.
///
/// A sibling qualifies when its own candidate score reaches
/// `max(10, best * 0.2)`, or when it is a `p` that either carries more than 80
/// characters with little link text or is a short, link-free sentence.
/// Qualifying children that are not `div` or `p` are retagged to `div`.
pub fn get_article(dom: &mut Dom, candidates: &Candidates, best: &Candidate, debug: bool) -> NodeId {
    // html5ever always yields a div template
    let Some(container) = dom.create_element("div") else {
        return best.elem;
    };

    let threshold = f64::max(10.0, best.content_score * 0.2);
    let Some(parent) = dom.parent(best.elem) else {
        return container;
    };

    for sibling in dom.element_children(parent) {
        let include = sibling == best.elem
            || candidates.get(sibling).is_some_and(|c| c.content_score >= threshold)
            || (dom.tag(sibling) == Some("p") && is_readable_paragraph(dom, sibling));

        if !include {
            continue;
        }

        if !matches!(dom.tag(sibling), Some("div" | "p")) {
            debug_trace!(debug, tag = dom.tag(sibling).unwrap_or_default(), "retagging sibling to div");
            dom.rename(sibling, "div");
        }
        dom.append(container, sibling);
    }

    container
}

fn is_readable_paragraph(dom: &Dom, id: NodeId) -> bool {
    let text = dom.text(id);
    let length = text.chars().count();
    let density = link_density(dom, id);

    if length > 80 {
        density < 0.25
    } else {
        length < 80 && density == 0.0 && SENTENCE_END.is_match(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score_paragraphs;

    fn first(dom: &Dom, css: &str) -> NodeId {
        dom.select(css).unwrap()[0]
    }

    #[test]
    fn test_extracted_content_serializes() {
        let extracted = ExtractedContent {
            content: "<div></div>".to_string(),
            top_score: 12.5,
            element_count: 1,
            special_case: Some(SpecialCase::GoogleVideo),
            retried: false,
        };
        let value = serde_json::to_value(&extracted).unwrap();

        assert_eq!(value["special_case"], "google_video");
        assert_eq!(value["top_score"], 12.5);
        assert_eq!(value["retried"], false);
    }

    #[test]
    fn test_empty_document_falls_back_to_body() {
        let dom = Dom::parse("<html><body></body></html>");
        let best = select_best_candidate(&dom, &Candidates::new(), false);
        assert_eq!(best.content_score, 0.0);
        assert_eq!(Some(best.elem), dom.body());
    }

    #[test]
    fn test_highest_score_wins() {
        let long = "w".repeat(320);
        let short = "v".repeat(30);
        let html = format!("<div id='weak'><p>{short}</p></div><div id='strong'><p>{long}</p></div>");
        let dom = Dom::parse(&html);
        let candidates = score_paragraphs(&dom, 25, false);

        let best = select_best_candidate(&dom, &candidates, false);
        assert_eq!(best.elem, first(&dom, "#strong"));
    }

    #[test]
    fn test_ties_keep_first_encounter() {
        let text = "t".repeat(30);
        let html = format!("<section id='a'><p>{text}</p></section><section id='b'><p>{text}</p></section>");
        let dom = Dom::parse(&html);
        let mut candidates = Candidates::new();
        candidates.ensure(&dom, first(&dom, "#a"));
        candidates.ensure(&dom, first(&dom, "#b"));

        let best = select_best_candidate(&dom, &candidates, false);
        assert_eq!(best.elem, first(&dom, "#a"));
    }

    #[test]
    fn test_article_contains_best_and_strong_siblings() {
        let html = r#"<body>
            <div id="main"><p>main</p></div>
            <div id="related"><p>related</p></div>
            <ul id="nav"><li>home</li></ul>
        </body>"#;
        let mut dom = Dom::parse(html);
        let main = first(&dom, "#main");
        let related = first(&dom, "#related");
        let nav = first(&dom, "#nav");

        let mut candidates = Candidates::new();
        candidates.ensure(&dom, main).content_score = 100.0;
        candidates.ensure(&dom, related).content_score = 20.0;
        candidates.ensure(&dom, nav).content_score = 19.0;

        let best = *candidates.get(main).unwrap();
        let article = get_article(&mut dom, &candidates, &best, false);

        assert_eq!(dom.element_children(article), vec![main, related]);
        assert!(dom.is_within(dom.body().unwrap(), nav));
    }

    #[test]
    fn test_sibling_paragraph_rules() {
        let long = format!("{} end", "word ".repeat(20));
        let linky = format!("<a href='#'>{}</a>", "link ".repeat(20));
        let html = format!(
            r#"<body>
            <div id="best"><p>anchor</p></div>
            <p id="long">{long}</p>
            <p id="linky">{linky}</p>
            <p id="sentence">Short sentence. Done</p>
            <p id="fragment">no period here</p>
            </body>"#
        );
        let mut dom = Dom::parse(&html);
        let best_id = first(&dom, "#best");
        let long_id = first(&dom, "#long");
        let sentence_id = first(&dom, "#sentence");

        let mut candidates = Candidates::new();
        candidates.ensure(&dom, best_id).content_score = 30.0;
        let best = *candidates.get(best_id).unwrap();

        let article = get_article(&mut dom, &candidates, &best, false);
        assert_eq!(dom.element_children(article), vec![best_id, long_id, sentence_id]);
    }

    #[test]
    fn test_included_siblings_are_retagged() {
        let html = r#"<body><section id="a"><p>one</p></section><article id="b"><p>two</p></article></body>"#;
        let mut dom = Dom::parse(html);
        let a = first(&dom, "#a");
        let b = first(&dom, "#b");

        let mut candidates = Candidates::new();
        candidates.ensure(&dom, a).content_score = 50.0;
        candidates.ensure(&dom, b).content_score = 40.0;
        let best = *candidates.get(a).unwrap();

        let article = get_article(&mut dom, &candidates, &best, false);
        assert_eq!(dom.tag(a), Some("div"));
        assert_eq!(dom.tag(b), Some("div"));
        assert_eq!(
            dom.outer_html(article),
            r#"<div><div id="a"><p>one</p></div><div id="b"><p>two</p></div></div>"#
        );
    }
}
