//! Content scoring.
//!
//! Every `p` and `td` with enough text votes for its parent (full weight) and
//! grandparent (half weight). Votes grow with comma-separated clauses and text
//! length; the totals are then discounted by how much of each container's text
//! sits inside links.

use std::collections::HashMap;

use ego_tree::NodeId;

use crate::dom::Dom;
use crate::patterns::{NEGATIVE, POSITIVE};

/// Weight applied per matching class or id value.
const CLASS_WEIGHT: f64 = 25.0;

/// Accumulated score for one container element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub content_score: f64,
    pub elem: NodeId,
}

/// Candidate records keyed by node id, kept in first-encounter order so that
/// ties resolve the same way on every run.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    entries: Vec<Candidate>,
    index: HashMap<NodeId, usize>,
}

impl Candidates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: NodeId) -> Option<&Candidate> {
        self.index.get(&id).map(|&i| &self.entries[i])
    }

    /// Score of `id`, or 0 when it never became a candidate.
    pub fn score_of(&self, id: NodeId) -> f64 {
        self.get(id).map_or(0.0, |c| c.content_score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter()
    }

    /// Returns the record for `id`, creating it from [`score_node`] on first use.
    pub fn ensure(&mut self, dom: &Dom, id: NodeId) -> &mut Candidate {
        let slot = match self.index.get(&id).copied() {
            Some(i) => i,
            None => {
                self.entries.push(Candidate { content_score: score_node(dom, id), elem: id });
                self.index.insert(id, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[slot]
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Candidate> {
        self.entries.iter_mut()
    }
}

/// ±25 for each of `class` and `id` matching the negative or positive pattern.
///
/// The four checks are independent, so a negative class and a positive id
/// cancel out.
pub fn class_weight(dom: &Dom, id: NodeId) -> f64 {
    let mut weight = 0.0;

    for value in [dom.attr(id, "class"), dom.attr(id, "id")].into_iter().flatten() {
        if value.is_empty() {
            continue;
        }
        if NEGATIVE.is_match(value) {
            weight -= CLASS_WEIGHT;
        }
        if POSITIVE.is_match(value) {
            weight += CLASS_WEIGHT;
        }
    }

    weight
}

/// Initial score of a container: class weight plus a tag bonus.
pub fn score_node(dom: &Dom, id: NodeId) -> f64 {
    let bonus = match dom.tag(id) {
        Some("div") => 5.0,
        Some("blockquote") => 3.0,
        Some("form") => -3.0,
        Some("th") => -5.0,
        _ => 0.0,
    };

    class_weight(dom, id) + bonus
}

/// Share of an element's text that lives inside `a` descendants.
///
/// Elements without text have a density of 0.
pub fn link_density(dom: &Dom, id: NodeId) -> f64 {
    let text_length = dom.text_len(id);
    if text_length == 0 {
        return 0.0;
    }

    let link_length: usize = dom.elements_by_tag(id, &["a"]).into_iter().map(|a| dom.text_len(a)).sum();

    link_length as f64 / text_length as f64
}

/// Number of comma-separated pieces, ignoring trailing empty pieces.
pub fn comma_segments(text: &str) -> usize {
    let mut pieces: Vec<&str> = text.split(',').collect();
    while pieces.last().is_some_and(|p| p.is_empty()) {
        pieces.pop();
    }
    pieces.len()
}

/// Builds the candidate map from every `p` and `td` in the document.
pub fn score_paragraphs(dom: &Dom, min_text_length: usize, debug: bool) -> Candidates {
    let mut candidates = Candidates::new();
    let mut scored = 0;

    for paragraph in dom.document_elements_by_tag(&["p", "td"]) {
        let text = dom.text(paragraph);
        let text_length = text.chars().count();
        if text_length < min_text_length {
            continue;
        }

        let Some(parent) = dom.parent_element(paragraph) else {
            continue;
        };
        let grandparent = dom.parent_element(parent);

        candidates.ensure(dom, parent);
        if let Some(grandparent) = grandparent {
            candidates.ensure(dom, grandparent);
        }

        let increment = 1.0 + comma_segments(&text) as f64 + (text_length / 100).min(3) as f64;

        candidates.ensure(dom, parent).content_score += increment;
        if let Some(grandparent) = grandparent {
            candidates.ensure(dom, grandparent).content_score += increment / 2.0;
        }
        scored += 1;
    }

    for candidate in candidates.iter_mut() {
        candidate.content_score *= 1.0 - link_density(dom, candidate.elem);
    }

    debug_trace!(debug, paragraphs = scored, candidates = candidates.len(), "scored paragraphs");

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn first(dom: &Dom, css: &str) -> NodeId {
        dom.select(css).unwrap()[0]
    }

    #[test]
    fn test_div_outscores_th_by_ten() {
        let dom = Dom::parse("<div id='d'>x</div><table><tr><th id='h'>x</th></tr></table>");
        let div = score_node(&dom, first(&dom, "#d"));
        let th = score_node(&dom, first(&dom, "#h"));
        assert_eq!(div - th, 10.0);
    }

    #[test]
    fn test_positive_class_beats_negative_by_fifty() {
        let dom = Dom::parse("<p class='entry-text'>a</p><p class='sidebar'>b</p>");
        let positive = score_node(&dom, first(&dom, ".entry-text"));
        let negative = score_node(&dom, first(&dom, ".sidebar"));
        assert_eq!(positive - negative, 50.0);
    }

    #[rstest]
    #[case("<div class='comment' id='content'>x</div>", 0.0)]
    #[case("<div class='post' id='main-article'>x</div>", 50.0)]
    #[case("<div class='sidebar' id='footer'>x</div>", -50.0)]
    #[case("<div>x</div>", 0.0)]
    #[case("<div class='post-footer'>x</div>", 0.0)]
    fn test_class_weight(#[case] html: &str, #[case] expected: f64) {
        let dom = Dom::parse(html);
        assert_eq!(class_weight(&dom, first(&dom, "div")), expected);
    }

    #[rstest]
    #[case("blockquote", 3.0)]
    #[case("form", -3.0)]
    #[case("section", 0.0)]
    fn test_tag_bonus(#[case] tag: &str, #[case] expected: f64) {
        let dom = Dom::parse(&format!("<{tag} id='t'>x</{tag}>"));
        assert_eq!(score_node(&dom, first(&dom, "#t")), expected);
    }

    #[test]
    fn test_link_density() {
        let dom = Dom::parse("<div id='a'>abcd<a href='#'>efgh</a></div><div id='b'></div>");
        assert_eq!(link_density(&dom, first(&dom, "#a")), 0.5);
        assert_eq!(link_density(&dom, first(&dom, "#b")), 0.0);
    }

    #[rstest]
    #[case("", 0)]
    #[case("no commas", 1)]
    #[case("one, two, three", 3)]
    #[case("trailing,,", 1)]
    #[case(",leading", 2)]
    fn test_comma_segments(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(comma_segments(text), expected);
    }

    #[test]
    fn test_short_paragraphs_create_no_candidates() {
        let dom = Dom::parse("<div><p>short</p></div>");
        let candidates = score_paragraphs(&dom, 25, false);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_parent_and_grandparent_scores() {
        let text = "a".repeat(250) + ", more";
        let html = format!("<div id='outer'><div id='inner'><p>{text}</p></div></div>");
        let dom = Dom::parse(&html);
        let candidates = score_paragraphs(&dom, 25, false);

        let inner = first(&dom, "#inner");
        let outer = first(&dom, "#outer");
        // 1 + 2 segments + min(256 / 100, 3) on top of the div bonus
        assert_eq!(candidates.score_of(inner), 5.0 + 5.0);
        assert_eq!(candidates.score_of(outer), 5.0 + 2.5);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_candidates_accumulate_once_per_node() {
        let para = "x".repeat(30);
        let html = format!("<div id='c'><p>{para}</p><p>{para}</p></div>");
        let dom = Dom::parse(&html);
        let candidates = score_paragraphs(&dom, 25, false);

        let div = first(&dom, "#c");
        assert_eq!(candidates.score_of(div), 5.0 + 2.0 + 2.0);
        assert_eq!(candidates.iter().filter(|c| c.elem == div).count(), 1);
    }

    #[test]
    fn test_link_density_discounts_score() {
        let html = format!("<div id='c'><p><a href='#'>{}</a></p></div>", "y".repeat(40));
        let dom = Dom::parse(&html);
        let candidates = score_paragraphs(&dom, 25, false);
        assert_eq!(candidates.score_of(first(&dom, "#c")), 0.0);
    }

    #[test]
    fn test_table_cells_vote() {
        let cell = "z".repeat(40);
        let html = format!("<table><tr id='row'><td>{cell}</td></tr></table>");
        let dom = Dom::parse(&html);
        let candidates = score_paragraphs(&dom, 25, false);
        assert_eq!(candidates.score_of(first(&dom, "#row")), 2.0);
    }
}
