//! In-memory rendering surface
//!
//! The widget never touches a live page. It renders into this document:
//! element creation, attribute/style mutation, lookup and head injection are
//! explicit operations, and the host decides how to materialize the result
//! (the serializer here produces plain HTML). Keeping the surface in memory
//! is what makes the whole renderer testable without a browser.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<NodeId>,
}

/// How a caller names the element to mount the board into.
///
/// A name is resolved in the original widget's order: element id first, then
/// a `<form name="...">`, then a name registered on the document. A concrete
/// [`NodeId`] bypasses resolution.
#[derive(Debug, Clone)]
pub enum MountTarget {
    Name(String),
    Element(NodeId),
}

impl MountTarget {
    pub fn describe(&self) -> String {
        match self {
            MountTarget::Name(name) => name.clone(),
            MountTarget::Element(_) => "<element>".to_string(),
        }
    }
}

impl From<&str> for MountTarget {
    fn from(name: &str) -> Self {
        MountTarget::Name(name.to_string())
    }
}

impl From<String> for MountTarget {
    fn from(name: String) -> Self {
        MountTarget::Name(name)
    }
}

impl From<NodeId> for MountTarget {
    fn from(node: NodeId) -> Self {
        MountTarget::Element(node)
    }
}

#[derive(Debug)]
pub struct Dom {
    nodes: Vec<Node>,
    head: NodeId,
    body: NodeId,
    named: HashMap<String, NodeId>,
}

impl Dom {
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            head: NodeId(0),
            body: NodeId(0),
            named: HashMap::new(),
        };
        let html = dom.create_element("html");
        let head = dom.create_element("head");
        let body = dom.create_element("body");
        dom.append_child(html, head);
        dom.append_child(html, body);
        dom.head = head;
        dom.body = body;
        dom
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: tag.to_string(),
            ..Node::default()
        });
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    /// Drops all children of a node. Detached subtrees stay allocated but
    /// unreachable from the document roots, like removed DOM nodes.
    pub fn clear_children(&mut self, parent: NodeId) {
        self.nodes[parent.0].children.clear();
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attrs.get(name).map(String::as_str)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.nodes[node.0]
            .styles
            .insert(property.to_string(), value.to_string());
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes[node.0].styles.get(property).map(String::as_str)
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node.0].text = Some(text.to_string());
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].text.as_deref()
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Finds an element by id. Only nodes attached to the document are
    /// found, so an id on a cleared subtree does not shadow its replacement.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_attached(NodeId(0), &|node| {
            node.attrs.get("id").map(String::as_str) == Some(id)
        })
    }

    /// Registers a document-level name, the stand-in for window/document
    /// properties on a real page.
    pub fn register_name(&mut self, name: &str, node: NodeId) {
        self.named.insert(name.to_string(), node);
    }

    fn form_by_name(&self, name: &str) -> Option<NodeId> {
        self.find_attached(NodeId(0), &|node| {
            node.tag == "form" && node.attrs.get("name").map(String::as_str) == Some(name)
        })
    }

    fn find_attached(&self, from: NodeId, matches: &dyn Fn(&Node) -> bool) -> Option<NodeId> {
        if matches(&self.nodes[from.0]) {
            return Some(from);
        }
        for child in &self.nodes[from.0].children {
            if let Some(found) = self.find_attached(*child, matches) {
                return Some(found);
            }
        }
        None
    }

    pub fn resolve_mount(&self, target: &MountTarget) -> Option<NodeId> {
        match target {
            MountTarget::Element(node) => Some(*node),
            MountTarget::Name(name) => self
                .element_by_id(name)
                .or_else(|| self.form_by_name(name))
                .or_else(|| self.named.get(name.as_str()).copied()),
        }
    }

    /// Serializes a subtree to HTML.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    /// Serializes the whole document.
    pub fn document_html(&self) -> String {
        self.to_html(NodeId(0))
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        out.push('<');
        out.push_str(&node.tag);
        for (name, value) in &node.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if !node.styles.is_empty() {
            let css: Vec<String> = node
                .styles
                .iter()
                .map(|(p, v)| format!("{}:{}", p, v))
                .collect();
            let _ = write!(out, " style=\"{}\"", escape(&css.join(";")));
        }
        out.push('>');
        if is_void(&node.tag) {
            return;
        }
        if let Some(text) = &node.text {
            out.push_str(&escape(text));
        }
        for child in &node.children {
            self.write_html(*child, out);
        }
        let _ = write!(out, "</{}>", node.tag);
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "link" | "br" | "img" | "input" | "meta" | "hr")
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
