//! An arena-allocated HTML document tree, sized for reading a page,
//! rewriting parts of it, and printing it back out.
//!
//! Nodes live in a `Vec` owned by [`Dom`] and refer to each other via
//! [`NodeId`]. Removal leaves a [`Node::None`] tombstone behind so that
//! ids held by callers stay valid; printing and queries skip tombstones.

pub mod meta;
pub mod parse;
pub mod util;

use kstring::KString;

use crate::meta::{is_raw_text_element, is_void_element};

/// Index into the arena of the [`Dom`] that created it. Only valid for
/// that `Dom`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: KString,
    pub attrs: Vec<(KString, KString)>,
    pub children: Vec<NodeId>,
}

impl Element {
    pub fn new(name: &str) -> Element {
        Element {
            name: KString::from_ref(name),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&KString> {
        self.attrs.iter().find(|(k, _)| k.as_str() == name).map(|(_, v)| v)
    }

    /// Replaces the value in place, keeping attribute order; new names
    /// go to the end.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k.as_str() == name) {
            Some(slot) => slot.1 = KString::from_ref(value),
            None => self.attrs.push((KString::from_ref(name), KString::from_ref(value))),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k.as_str() != name);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(KString),
    Comment(KString),
    /// An empty slot; removal writes this, printing skips it.
    None,
}

#[derive(Debug, Default)]
pub struct Dom {
    nodes: Vec<Node>,
    /// The document-level nodes in order (comments, the `html` element).
    top: Vec<NodeId>,
    /// Doctype name when the input carried one, usually `"html"`.
    doctype: Option<KString>,
}

impl Dom {
    pub fn new() -> Dom {
        Dom::default()
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn add_element(&mut self, name: &str) -> NodeId {
        self.add(Node::Element(Element::new(name)))
    }

    pub fn add_text(&mut self, text: &str) -> NodeId {
        self.add(Node::Text(KString::from_ref(text)))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.node(id) {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.index()] {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn top_nodes(&self) -> &[NodeId] {
        &self.top
    }

    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    /// The `html` element, when the page has one.
    pub fn document_element(&self) -> Option<NodeId> {
        self.top.iter().copied().find(|&id| {
            matches!(self.element(id), Some(el) if el.name.as_str() == "html")
        })
    }

    pub fn attr_str(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name).map(KString::as_str)
    }

    // --- Mutation -------------------------------------------------------

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(el) = self.element_mut(id) {
            el.remove_attr(name);
        }
    }

    /// Replaces all children with a single text node; an empty string
    /// leaves the element empty.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        let text_id = if text.is_empty() {
            None
        } else {
            Some(self.add_text(text))
        };
        if let Some(el) = self.element_mut(id) {
            el.children.clear();
            el.children.extend(text_id);
        }
    }

    pub fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        if let Some(el) = self.element_mut(id) {
            el.children = children;
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(el) = self.element_mut(parent) {
            el.children.push(child);
        }
    }

    /// Tombstones the node. Ids pointing at it stay valid and print as
    /// nothing; the children become unreachable.
    pub fn remove(&mut self, id: NodeId) {
        self.nodes[id.index()] = Node::None;
    }

    /// Copies a whole subtree; the copy shares nothing with the original.
    pub fn deep_clone(&mut self, id: NodeId) -> NodeId {
        match self.node(id).clone() {
            Node::Element(el) => {
                let children = el.children.iter()
                    .map(|&child| self.deep_clone(child))
                    .collect();
                self.add(Node::Element(Element {
                    name: el.name,
                    attrs: el.attrs,
                    children,
                }))
            }
            other => self.add(other),
        }
    }

    // --- Queries (document order) ----------------------------------------

    fn walk_elements<F: FnMut(NodeId, &Element)>(&self, id: NodeId, f: &mut F) {
        if let Node::Element(el) = self.node(id) {
            f(id, el);
            for &child in &el.children {
                self.walk_elements(child, f);
            }
        }
    }

    /// Every element carrying `attr`, over the whole document.
    pub fn elements_with_attr(&self, attr: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        for &id in &self.top {
            self.walk_elements(id, &mut |id, el| {
                if el.attr(attr).is_some() {
                    found.push(id);
                }
            });
        }
        found
    }

    /// Every element in the subtree at `root`, the root included.
    pub fn elements_at(&self, root: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk_elements(root, &mut |id, _| found.push(id));
        found
    }

    /// Every element carrying `attr` in the subtree at `root`, the root
    /// itself included when it matches.
    pub fn elements_with_attr_at(&self, root: NodeId, attr: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk_elements(root, &mut |id, el| {
            if el.attr(attr).is_some() {
                found.push(id);
            }
        });
        found
    }

    /// Like [`Self::elements_with_attr_at`], but for strict descendants.
    pub fn elements_with_attr_under(&self, root: NodeId, attr: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk_elements(root, &mut |id, el| {
            if id != root && el.attr(attr).is_some() {
                found.push(id);
            }
        });
        found
    }

    pub fn elements_named(&self, name: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        for &id in &self.top {
            self.walk_elements(id, &mut |id, el| {
                if el.name.as_str() == name {
                    found.push(id);
                }
            });
        }
        found
    }

    pub fn first_element_named(&self, name: &str) -> Option<NodeId> {
        self.elements_named(name).first().copied()
    }

    pub fn first_element_named_in(&self, root: NodeId, name: &str) -> Option<NodeId> {
        let mut found = None;
        self.walk_elements(root, &mut |id, el| {
            if found.is_none() && el.name.as_str() == name {
                found = Some(id);
            }
        });
        found
    }

    /// The element whose child list contains `target`, searched within
    /// the subtree at `root`.
    pub fn parent_of_in(&self, root: NodeId, target: NodeId) -> Option<NodeId> {
        let el = self.element(root)?;
        for &child in &el.children {
            if child == target {
                return Some(root);
            }
            if let Some(found) = self.parent_of_in(child, target) {
                return Some(found);
            }
        }
        None
    }

    /// Concatenated descendant text, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.node(id) {
            Node::Text(s) => out.push_str(s),
            Node::Element(el) => {
                for &child in &el.children {
                    self.collect_text(child, out);
                }
            }
            Node::Comment(_) | Node::None => {}
        }
    }

    // --- Printing --------------------------------------------------------

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(doctype) = &self.doctype {
            out.push_str("<!DOCTYPE ");
            out.push_str(doctype);
            out.push('>');
        }
        for &id in &self.top {
            self.print_node(id, false, &mut out);
        }
        out
    }

    pub fn node_to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.print_node(id, false, &mut out);
        out
    }

    fn print_node(&self, id: NodeId, raw: bool, out: &mut String) {
        match self.node(id) {
            Node::None => {}
            Node::Text(s) => {
                if raw {
                    out.push_str(s);
                } else {
                    html_escape_into(out, s);
                }
            }
            Node::Comment(s) => {
                out.push_str("<!--");
                out.push_str(s);
                out.push_str("-->");
            }
            Node::Element(el) => {
                out.push('<');
                out.push_str(&el.name);
                for (k, v) in &el.attrs {
                    out.push(' ');
                    out.push_str(k);
                    out.push_str("=\"");
                    html_escape_into(out, v);
                    out.push('"');
                }
                out.push('>');
                if is_void_element(&el.name) {
                    return;
                }
                let raw_children = is_raw_text_element(&el.name);
                for &child in &el.children {
                    self.print_node(child, raw_children, out);
                }
                out.push_str("</");
                out.push_str(&el.name);
                out.push('>');
            }
        }
    }
}

pub fn html_escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
