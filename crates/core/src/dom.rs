//! Mutable DOM adapter.
//!
//! [`Dom`] wraps a [`scraper::Html`] and addresses every node by its arena
//! [`NodeId`]. Ids stay valid for the life of the tree: detaching a node only
//! unlinks it, so a stale id still resolves and simply reports no parent.
//! Callers collect ids during a read-only walk and mutate afterwards.
//!
//! # Example
//!
//! ```rust
//! use readability_core::dom::Dom;
//!
//! let mut dom = Dom::parse("<html><body><div class='a'>Hi</div></body></html>");
//! let div = dom.select("div").unwrap()[0];
//! dom.rename(div, "p");
//! assert_eq!(dom.tag(div), Some("p"));
//! assert_eq!(dom.attr(div, "class"), Some("a"));
//! ```

use std::collections::HashMap;

use ego_tree::NodeId;
use scraper::node::{Element, Text};
use scraper::{ElementRef, Html, Node, Selector};

use crate::{ReadabilityError, Result};

/// Parsed document plus the element templates used to rename and create nodes.
pub struct Dom {
    html: Html,
    templates: HashMap<String, Element>,
}

impl Dom {
    /// Parses a complete HTML document.
    pub fn parse(markup: &str) -> Self {
        Self::from_html(Html::parse_document(markup))
    }

    /// Wraps an already parsed tree.
    pub fn from_html(html: Html) -> Self {
        Self { html, templates: HashMap::new() }
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// The `<html>` element.
    pub fn root_element(&self) -> NodeId {
        self.html.root_element().id()
    }

    pub fn body(&self) -> Option<NodeId> {
        self.html
            .root_element()
            .children()
            .find(|n| n.value().as_element().is_some_and(|e| e.name() == "body"))
            .map(|n| n.id())
    }

    /// Lowercase tag name, or `None` for non-element nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.html.tree.get(id)?.value().as_element().map(|e| e.name())
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.tag(id).is_some()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.html.tree.get(id)?.value().as_element()?.attr(name)
    }

    /// Concatenated text of every descendant text node.
    pub fn text(&self, id: NodeId) -> String {
        self.html
            .tree
            .get(id)
            .map(|node| {
                node.descendants()
                    .filter_map(|d| d.value().as_text().map(|t| &**t))
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Text length in characters.
    pub fn text_len(&self, id: NodeId) -> usize {
        self.text(id).chars().count()
    }

    /// Raw parent link; may be the document node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.html.tree.get(id)?.parent().map(|p| p.id())
    }

    /// Parent only when it is an element.
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&p| self.is_element(p))
    }

    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(id)
            .map(|node| node.children().filter(|c| c.value().is_element()).map(|c| c.id()).collect())
            .unwrap_or_default()
    }

    /// Every element reachable from the document root, in document order.
    pub fn all_elements(&self) -> Vec<NodeId> {
        self.html
            .tree
            .root()
            .descendants()
            .filter(|n| n.value().is_element())
            .map(|n| n.id())
            .collect()
    }

    /// Element descendants of `scope` (excluding `scope`) whose tag is in `tags`.
    pub fn elements_by_tag(&self, scope: NodeId, tags: &[&str]) -> Vec<NodeId> {
        let Some(node) = self.html.tree.get(scope) else {
            return Vec::new();
        };

        node.descendants()
            .skip(1)
            .filter(|d| d.value().as_element().is_some_and(|e| tags.contains(&e.name())))
            .map(|d| d.id())
            .collect()
    }

    /// Elements under the document root matching `tags`.
    pub fn document_elements_by_tag(&self, tags: &[&str]) -> Vec<NodeId> {
        self.elements_by_tag(self.html.tree.root().id(), tags)
    }

    /// Element descendants of `scope`, including `scope` itself.
    pub fn subtree_elements(&self, scope: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(scope)
            .map(|node| node.descendants().filter(|d| d.value().is_element()).map(|d| d.id()).collect())
            .unwrap_or_default()
    }

    /// True when `id` is `ancestor` or still linked somewhere beneath it.
    pub fn is_within(&self, ancestor: NodeId, id: NodeId) -> bool {
        if id == ancestor {
            return true;
        }
        self.html
            .tree
            .get(id)
            .is_some_and(|node| node.ancestors().any(|a| a.id() == ancestor))
    }

    /// Matches a CSS selector against the attached document.
    pub fn select(&self, css: &str) -> Result<Vec<NodeId>> {
        let selector =
            Selector::parse(css).map_err(|e| ReadabilityError::InvalidSelector(format!("{}: {}", css, e)))?;

        Ok(self.html.root_element().select(&selector).map(|el| el.id()).collect())
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        self.element_ref(id).map(|el| el.html()).unwrap_or_default()
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        self.element_ref(id).map(|el| el.inner_html()).unwrap_or_default()
    }

    fn element_ref(&self, id: NodeId) -> Option<ElementRef<'_>> {
        ElementRef::wrap(self.html.tree.get(id)?)
    }

    /// Unlinks a node. Detaching a detached node is a no-op.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }

    /// Changes an element's tag while keeping its attributes and children.
    pub fn rename(&mut self, id: NodeId, tag: &str) {
        let Some(mut fresh) = self.template(tag) else {
            return;
        };
        let Some(mut node) = self.html.tree.get_mut(id) else {
            return;
        };
        if let Node::Element(element) = node.value() {
            fresh.attrs = std::mem::take(&mut element.attrs);
            *element = fresh;
        }
    }

    /// Swaps an element for a text node holding its text.
    ///
    /// Returns `false` and leaves the tree untouched when the node has no
    /// parent, e.g. because an ancestor was already unwrapped.
    pub fn replace_with_text(&mut self, id: NodeId) -> bool {
        let text = self.text(id);
        let Some(mut node) = self.html.tree.get_mut(id) else {
            return false;
        };
        if node.parent().is_none() {
            return false;
        }

        node.insert_before(Node::Text(Text { text: text.into() }));
        node.detach();
        true
    }

    /// Drops every attribute whose name fails `keep`.
    pub fn retain_attributes<F>(&mut self, id: NodeId, keep: F)
    where
        F: Fn(&str) -> bool,
    {
        if let Some(mut node) = self.html.tree.get_mut(id)
            && let Node::Element(element) = node.value()
        {
            element.attrs = std::mem::take(&mut element.attrs)
                .into_iter()
                .filter(|(name, _)| keep(&name.local))
                .collect();
        }
    }

    /// Creates a detached, attribute-less element.
    pub fn create_element(&mut self, tag: &str) -> Option<NodeId> {
        let mut element = self.template(tag)?;
        element.attrs = Default::default();
        Some(self.html.tree.orphan(Node::Element(element)).id())
    }

    /// Moves `child` (detaching it first) to the end of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(parent) {
            node.append_id(child);
        }
    }

    /// Detaches every element with one of the given tags.
    pub fn remove_tags(&mut self, tags: &[&str]) -> usize {
        let ids = self.document_elements_by_tag(tags);
        for &id in &ids {
            self.detach(id);
        }
        ids.len()
    }

    /// Detaches every comment node.
    pub fn remove_comments(&mut self) -> usize {
        let ids: Vec<NodeId> = self
            .html
            .tree
            .root()
            .descendants()
            .filter(|n| n.value().is_comment())
            .map(|n| n.id())
            .collect();
        for &id in &ids {
            self.detach(id);
        }
        ids.len()
    }

    fn template(&mut self, tag: &str) -> Option<Element> {
        if let Some(element) = self.templates.get(tag) {
            return Some(element.clone());
        }

        let fragment = Html::parse_fragment(&format!("<{tag}></{tag}>"));
        let element = fragment
            .tree
            .root()
            .descendants()
            .filter_map(|n| n.value().as_element())
            .find(|e| e.name() == tag)?
            .clone();

        self.templates.insert(tag.to_string(), element.clone());
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(dom: &Dom, css: &str) -> NodeId {
        dom.select(css).unwrap()[0]
    }

    #[test]
    fn test_text_and_length() {
        let dom = Dom::parse("<div id='x'>Hé <b>llo</b></div>");
        let div = first(&dom, "#x");
        assert_eq!(dom.text(div), "Hé llo");
        assert_eq!(dom.text_len(div), 6);
    }

    #[test]
    fn test_rename_keeps_attributes_and_children() {
        let mut dom = Dom::parse("<section class='story'><span>inner</span></section>");
        let section = first(&dom, "section");
        dom.rename(section, "div");

        assert_eq!(dom.tag(section), Some("div"));
        assert_eq!(dom.attr(section, "class"), Some("story"));
        assert_eq!(dom.outer_html(section), r#"<div class="story"><span>inner</span></div>"#);
    }

    #[test]
    fn test_replace_with_text_unwraps() {
        let mut dom = Dom::parse("<div id='c'><span>one <i>two</i></span></div>");
        let span = first(&dom, "span");
        assert!(dom.replace_with_text(span));

        let div = first(&dom, "#c");
        assert_eq!(dom.inner_html(div), "one two");
        assert!(!dom.replace_with_text(span));
    }

    #[test]
    fn test_detach_twice_is_noop() {
        let mut dom = Dom::parse("<div><p>gone</p></div>");
        let p = first(&dom, "p");
        dom.detach(p);
        dom.detach(p);
        assert!(dom.select("p").unwrap().is_empty());
        assert_eq!(dom.parent(p), None);
    }

    #[test]
    fn test_retain_attributes() {
        let mut dom = Dom::parse(r#"<a href="/x" class="c" style="s">link</a>"#);
        let a = first(&dom, "a");
        dom.retain_attributes(a, |name| name == "href");
        assert_eq!(dom.outer_html(a), r#"<a href="/x">link</a>"#);
    }

    #[test]
    fn test_create_and_append() {
        let mut dom = Dom::parse("<p id='one'>One</p><p id='two'>Two</p>");
        let container = dom.create_element("div").unwrap();
        dom.append(container, first(&dom, "#one"));
        dom.append(container, first(&dom, "#two"));

        assert_eq!(dom.parent(container), None);
        assert_eq!(dom.element_children(container).len(), 2);
        assert!(dom.select("p").unwrap().is_empty());
        assert_eq!(dom.outer_html(container), r#"<div><p id="one">One</p><p id="two">Two</p></div>"#);
    }

    #[test]
    fn test_remove_comments_and_tags() {
        let mut dom = Dom::parse("<body><!-- note --><script>x()</script><style>p{}</style><p>ok</p></body>");
        assert_eq!(dom.remove_comments(), 1);
        assert_eq!(dom.remove_tags(&["script", "style"]), 2);

        let body = dom.body().unwrap();
        assert_eq!(dom.inner_html(body), "<p>ok</p>");
    }

    #[test]
    fn test_is_within_after_detach() {
        let mut dom = Dom::parse("<div id='outer'><div id='inner'><p>x</p></div></div>");
        let outer = first(&dom, "#outer");
        let inner = first(&dom, "#inner");
        let p = first(&dom, "p");

        assert!(dom.is_within(outer, p));
        dom.detach(inner);
        assert!(!dom.is_within(outer, p));
        assert!(dom.is_within(inner, p));
    }

    #[test]
    fn test_invalid_selector() {
        let dom = Dom::parse("<p>x</p>");
        assert!(matches!(dom.select("p[["), Err(ReadabilityError::InvalidSelector(_))));
    }

    #[test]
    fn test_parent_element_stops_at_document() {
        let dom = Dom::parse("<p>x</p>");
        let root = dom.root_element();
        assert!(dom.parent(root).is_some());
        assert_eq!(dom.parent_element(root), None);
    }
}
