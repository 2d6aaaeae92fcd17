//! Minimal host-page document model.
//!
//! The runtime only needs a small slice of the DOM: element creation,
//! attributes, inline styles, text, inline SVG markup, id lookup, listener
//! bookkeeping and the page-level facts it reads (location, viewport width,
//! scroll offset, currently executing script). Nodes live in an arena and are
//! addressed by [`NodeId`].

use std::collections::BTreeMap;

use floatqr_core::qr::escape_attr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Events the widget subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Click,
    Scroll,
}

#[derive(Debug, Clone)]
enum NodeData {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        style: Vec<(String, String)>,
        /// Raw markup set via `set_inner_html`; replaces children when present.
        inner_html: Option<String>,
        listeners: Vec<EventKind>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    location: String,
    viewport_width: u32,
    scroll_y: f64,
    current_script: Option<NodeId>,
    window_listeners: Vec<EventKind>,
}

impl Document {
    /// Empty `<html><head></head><body></body></html>` page at `location`.
    pub fn new(location: impl Into<String>, viewport_width: u32) -> Self {
        let mut doc = Document {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            location: location.into(),
            viewport_width,
            scroll_y: 0.0,
            current_script: None,
            window_listeners: Vec::new(),
        };
        doc.root = doc.create_element("html");
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc.append_child(doc.root, doc.head);
        doc.append_child(doc.root, doc.body);
        doc
    }

    // -- Page facts --------------------------------------------------------

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y;
    }

    /// The `<script>` element currently being executed, when known.
    pub fn current_script(&self) -> Option<NodeId> {
        self.current_script
    }

    pub fn set_current_script(&mut self, script: Option<NodeId>) {
        self.current_script = script;
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // -- Tree construction -------------------------------------------------

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            style: Vec::new(),
            inner_html: None,
            listeners: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Remove `node` from its parent. The node stays valid but disconnected.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    /// Append a `<script src=...>` with the given attributes to the body.
    pub fn append_script(&mut self, src: &str, attributes: &[(&str, &str)]) -> NodeId {
        let script = self.create_element("script");
        self.set_attribute(script, "src", src);
        for (name, value) in attributes {
            self.set_attribute(script, name, value);
        }
        let body = self.body;
        self.append_child(body, script);
        script
    }

    // -- Element state -----------------------------------------------------

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attributes, .. } = &mut self.nodes[node.0].data {
            attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            NodeData::Text(_) => None,
        }
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Set one inline style property, replacing any previous value.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let NodeData::Element { style, .. } = &mut self.nodes[node.0].data {
            match style.iter().position(|(p, _)| p == property) {
                Some(i) => style[i].1 = value.to_string(),
                None => style.push((property.to_string(), value.to_string())),
            }
        }
    }

    pub fn apply_styles(&mut self, node: NodeId, decls: &[(&'static str, String)]) {
        for (property, value) in decls {
            self.set_style(node, property, value);
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Element { style, .. } => style
                .iter()
                .find(|(p, _)| p == property)
                .map(|(_, v)| v.as_str()),
            NodeData::Text(_) => None,
        }
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        let text_node = self.create_text(text);
        self.append_child(node, text_node);
    }

    /// Replace all children with raw markup (used for inline SVG).
    pub fn set_inner_html(&mut self, node: NodeId, html: String) {
        self.clear_children(node);
        if let NodeData::Element { inner_html, .. } = &mut self.nodes[node.0].data {
            *inner_html = Some(html);
        }
    }

    pub fn inner_html(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Element { inner_html, .. } => inner_html.as_deref(),
            NodeData::Text(_) => None,
        }
    }

    fn clear_children(&mut self, node: NodeId) {
        for child in std::mem::take(&mut self.nodes[node.0].children) {
            self.nodes[child.0].parent = None;
        }
        if let NodeData::Element { inner_html, .. } = &mut self.nodes[node.0].data {
            *inner_html = None;
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element { .. } => {
                for child in &self.nodes[node.0].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    // -- Listeners ---------------------------------------------------------

    pub fn add_listener(&mut self, node: NodeId, kind: EventKind) {
        if let NodeData::Element { listeners, .. } = &mut self.nodes[node.0].data {
            listeners.push(kind);
        }
    }

    pub fn has_listener(&self, node: NodeId, kind: EventKind) -> bool {
        match &self.nodes[node.0].data {
            NodeData::Element { listeners, .. } => listeners.contains(&kind),
            NodeData::Text(_) => false,
        }
    }

    pub fn add_window_listener(&mut self, kind: EventKind) {
        self.window_listeners.push(kind);
    }

    /// Remove one registration of `kind` from the window.
    pub fn remove_window_listener(&mut self, kind: EventKind) {
        if let Some(pos) = self.window_listeners.iter().position(|k| *k == kind) {
            self.window_listeners.remove(pos);
        }
    }

    pub fn window_listener_count(&self, kind: EventKind) -> usize {
        self.window_listeners.iter().filter(|k| **k == kind).count()
    }

    // -- Queries -----------------------------------------------------------

    /// Whether `node` is reachable from the document root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == self.root {
                return true;
            }
            current = self.nodes[n.0].parent;
        }
        false
    }

    /// Whether `node` is `ancestor` or lies beneath it.
    pub fn is_inclusive_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.nodes[n.0].parent;
        }
        false
    }

    /// Connected elements in document order.
    fn connected_elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if matches!(self.nodes[node.0].data, NodeData::Element { .. }) {
                out.push(node);
            }
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }
        out
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.connected_elements()
            .into_iter()
            .find(|n| self.attribute(*n, "id") == Some(id))
    }

    /// Number of connected elements carrying `id`.
    pub fn count_elements_with_id(&self, id: &str) -> usize {
        self.connected_elements()
            .into_iter()
            .filter(|n| self.attribute(*n, "id") == Some(id))
            .count()
    }

    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.connected_elements()
            .into_iter()
            .filter(|n| self.tag(*n) == Some(tag))
            .collect()
    }

    // -- Serialization -----------------------------------------------------

    /// Serialize `node` and its subtree as HTML.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].data {
            NodeData::Text(text) => out.push_str(&escape_text(text)),
            NodeData::Element {
                tag,
                attributes,
                style,
                inner_html,
                ..
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {name}=\"{}\"", escape_attr(value)));
                }
                if !style.is_empty() {
                    let css = style
                        .iter()
                        .map(|(p, v)| format!("{p}: {v};"))
                        .collect::<Vec<_>>()
                        .join(" ");
                    out.push_str(&format!(" style=\"{}\"", escape_attr(&css)));
                }
                out.push('>');
                match inner_html {
                    Some(html) => out.push_str(html),
                    None => {
                        for child in &self.nodes[node.0].children {
                            self.write_html(*child, out);
                        }
                    }
                }
                out.push_str(&format!("</{tag}>"));
            }
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_has_head_and_body() {
        let doc = Document::new("https://host.test/", 1024);
        assert!(doc.is_connected(doc.head()));
        assert!(doc.is_connected(doc.body()));
        assert_eq!(doc.elements_by_tag("body"), vec![doc.body()]);
    }

    #[test]
    fn id_lookup_only_sees_connected_elements() {
        let mut doc = Document::new("https://host.test/", 1024);
        let div = doc.create_element("div");
        doc.set_attribute(div, "id", "x");
        assert_eq!(doc.get_element_by_id("x"), None);

        let body = doc.body();
        doc.append_child(body, div);
        assert_eq!(doc.get_element_by_id("x"), Some(div));

        doc.detach(div);
        assert_eq!(doc.get_element_by_id("x"), None);
    }

    #[test]
    fn styles_replace_in_place() {
        let mut doc = Document::new("https://host.test/", 1024);
        let div = doc.create_element("div");
        doc.set_style(div, "display", "flex");
        doc.set_style(div, "display", "none");
        assert_eq!(doc.style(div, "display"), Some("none"));
    }

    #[test]
    fn text_and_inner_html_replace_children() {
        let mut doc = Document::new("https://host.test/", 1024);
        let div = doc.create_element("div");
        doc.set_text(div, "hello");
        assert_eq!(doc.text_content(div), "hello");

        doc.set_inner_html(div, "<svg></svg>".into());
        assert_eq!(doc.text_content(div), "");
        assert_eq!(doc.inner_html(div), Some("<svg></svg>"));

        doc.set_text(div, "again");
        assert_eq!(doc.inner_html(div), None);
    }

    #[test]
    fn html_serialization_escapes() {
        let mut doc = Document::new("https://host.test/", 1024);
        let div = doc.create_element("div");
        doc.set_attribute(div, "title", "a\"b");
        doc.set_style(div, "color", "red");
        doc.set_text(div, "<b>");
        assert_eq!(
            doc.to_html(div),
            "<div title=\"a&quot;b\" style=\"color: red;\">&lt;b&gt;</div>"
        );
    }

    #[test]
    fn window_listeners_are_counted() {
        let mut doc = Document::new("https://host.test/", 1024);
        doc.add_window_listener(EventKind::Scroll);
        assert_eq!(doc.window_listener_count(EventKind::Scroll), 1);
        doc.remove_window_listener(EventKind::Scroll);
        assert_eq!(doc.window_listener_count(EventKind::Scroll), 0);
    }
}
