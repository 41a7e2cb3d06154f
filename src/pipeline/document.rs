//! Typed view over a parsed HTML document
//!
//! The navigator works against [`DocNode`] instead of raw tree nodes, so the
//! traversal rules only see three kinds of node (element, text, anything
//! else) and a handful of accessors.

use ego_tree::NodeRef;
use scraper::{Html, Node, Selector};
use std::fmt;

/// A parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses an HTML page
    ///
    /// Parsing is lenient: malformed markup still yields a document.
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// All `<a href>` elements in document order
    pub fn anchors(&self) -> Vec<DocNode<'_>> {
        let mut anchors = Vec::new();

        if let Ok(selector) = Selector::parse("a[href]") {
            for element in self.html.select(&selector) {
                anchors.push(DocNode::new(*element));
            }
        }

        anchors
    }
}

/// What a node is, as far as traversal cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// An element, with its lowercase tag name
    Element(&'a str),
    /// Raw text, untrimmed
    Text(&'a str),
    /// Document root, doctype, comment or processing instruction
    Other,
}

/// A node borrowed from a [`Document`]
#[derive(Clone, Copy)]
pub struct DocNode<'a> {
    node: NodeRef<'a, Node>,
}

impl<'a> DocNode<'a> {
    fn new(node: NodeRef<'a, Node>) -> Self {
        Self { node }
    }

    pub fn kind(&self) -> NodeKind<'a> {
        match self.node.value() {
            Node::Element(element) => NodeKind::Element(element.name()),
            Node::Text(text) => NodeKind::Text(&**text),
            _ => NodeKind::Other,
        }
    }

    /// Tag name if this is an element
    pub fn tag_name(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Element(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true if this is an element whose tag is one of `names`
    pub fn is_element_in(&self, names: &[&str]) -> bool {
        self.tag_name().is_some_and(|name| names.contains(&name))
    }

    /// Attribute value if this is an element carrying it
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match self.node.value() {
            Node::Element(element) => element.attr(name),
            _ => None,
        }
    }

    pub fn parent(&self) -> Option<DocNode<'a>> {
        self.node.parent().map(DocNode::new)
    }

    pub fn prev_sibling(&self) -> Option<DocNode<'a>> {
        self.node.prev_sibling().map(DocNode::new)
    }

    /// Preceding siblings, nearest first
    pub fn prev_siblings(&self) -> impl Iterator<Item = DocNode<'a>> {
        self.node.prev_siblings().map(DocNode::new)
    }

    /// Visible text of this node
    ///
    /// Every text fragment under the node is trimmed, empty fragments are
    /// dropped and the rest are joined with a single space. For a text node
    /// this is simply its trimmed content.
    pub fn rendered_text(&self) -> String {
        self.node
            .descendants()
            .filter_map(|node| node.value().as_text())
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl PartialEq for DocNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node.id() == other.node.id()
    }
}

impl fmt::Debug for DocNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocNode").field("kind", &self.kind()).finish()
    }
}
