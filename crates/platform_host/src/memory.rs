//! In-memory document model implementing [`DocumentHost`] for non-browser targets and tests.

use std::collections::BTreeMap;

use crate::document::{DocumentHost, ElementDescriptor, ListenerId, ListenerKind, ScrollLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Node handle inside a [`MemoryDocument`].
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Element description used to build [`MemoryDocument`] trees.
pub struct MemoryElement {
    tag: String,
    attributes: BTreeMap<String, String>,
}

impl MemoryElement {
    /// Creates an element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the `id` attribute.
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Appends a class name to the `class` attribute.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(&class.into());
        self
    }

    /// Sets an arbitrary attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Lower-case tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Reads an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns whether the `class` attribute lists `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map(|classes| classes.split_whitespace().any(|name| name == class))
            .unwrap_or(false)
    }

    fn add_class(&mut self, class: &str) {
        if class.is_empty() || self.has_class(class) {
            return;
        }
        let entry = self.attributes.entry("class".to_string()).or_default();
        if !entry.is_empty() {
            entry.push(' ');
        }
        entry.push_str(class);
    }

    fn remove_class(&mut self, class: &str) {
        let Some(classes) = self.attributes.get_mut("class") else {
            return;
        };
        *classes = classes
            .split_whitespace()
            .filter(|name| *name != class)
            .collect::<Vec<_>>()
            .join(" ");
    }

    fn descriptor(&self) -> ElementDescriptor {
        ElementDescriptor {
            tag: self.tag.clone(),
            input_type: self.attribute("type").map(str::to_ascii_lowercase),
            has_href: self.attribute("href").is_some(),
            has_controls: self.attribute("controls").is_some(),
            tabindex: self
                .attribute("tabindex")
                .and_then(|value| value.trim().parse().ok()),
            contenteditable: self
                .attribute("contenteditable")
                .map(|value| value != "false")
                .unwrap_or(false),
            disabled: self.attribute("disabled").is_some(),
            hidden: self.attribute("hidden").is_some(),
        }
    }

    fn matches(&self, selector: &str) -> bool {
        selector
            .split(',')
            .map(str::trim)
            .any(|compound| !compound.is_empty() && self.matches_compound(compound))
    }

    // Supports `tag`, `#id`, `.class`, `[attr]` and `[attr=value]` compounds.
    fn matches_compound(&self, compound: &str) -> bool {
        let is_marker = |c: char| matches!(c, '#' | '.' | '[');
        let tag_end = compound.find(is_marker).unwrap_or(compound.len());
        let (tag, mut rest) = compound.split_at(tag_end);
        if !tag.is_empty() && tag != "*" && !tag.eq_ignore_ascii_case(&self.tag) {
            return false;
        }

        while let Some(marker) = rest.chars().next() {
            match marker {
                '#' | '.' => {
                    let body = &rest[1..];
                    let end = body.find(is_marker).unwrap_or(body.len());
                    let name = &body[..end];
                    let matched = if marker == '#' {
                        self.attribute("id") == Some(name)
                    } else {
                        self.has_class(name)
                    };
                    if name.is_empty() || !matched {
                        return false;
                    }
                    rest = &body[end..];
                }
                '[' => {
                    let Some(close) = rest.find(']') else {
                        return false;
                    };
                    let inner = &rest[1..close];
                    let matched = match inner.split_once('=') {
                        Some((name, value)) => {
                            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                            self.attribute(name.trim()) == Some(value)
                        }
                        None => self.attribute(inner.trim()).is_some(),
                    };
                    if !matched {
                        return false;
                    }
                    rest = &rest[close + 1..];
                }
                _ => return false,
            }
        }
        true
    }
}

#[derive(Debug, Clone)]
struct MemoryNode {
    element: MemoryElement,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
/// Minimal DOM tree with focus, body class, scroll, and listener bookkeeping.
pub struct MemoryDocument {
    nodes: Vec<MemoryNode>,
    active: Option<NodeId>,
    body_overflow: String,
    listeners: BTreeMap<ListenerId, ListenerKind>,
    next_listener: u64,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self {
            nodes: vec![MemoryNode {
                element: MemoryElement::new("body"),
                parent: None,
                children: Vec::new(),
            }],
            active: None,
            body_overflow: String::new(),
            listeners: BTreeMap::new(),
            next_listener: 1,
        }
    }
}

impl MemoryDocument {
    /// Creates an empty document containing only a body element.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the body node.
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends `element` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: MemoryElement) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryNode {
            element,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent) = self.nodes.get_mut(parent.0) {
            parent.children.push(id);
        }
        id
    }

    /// Removes `node` (and its subtree) from the document tree.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(node.0).and_then(|entry| entry.parent) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(parent.0) {
            parent.children.retain(|child| *child != node);
        }
        if let Some(entry) = self.nodes.get_mut(node.0) {
            entry.parent = None;
        }
        if self
            .active
            .is_some_and(|active| self.is_within(node, active))
        {
            self.active = None;
        }
    }

    /// Reads the element stored at `node`.
    pub fn element(&self, node: NodeId) -> Option<&MemoryElement> {
        self.nodes.get(node.0).map(|entry| &entry.element)
    }

    /// Reads an attribute from `node`.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|element| element.attribute(name))
    }

    /// Number of registered listener slots.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of registered listener slots of `kind`.
    pub fn listener_count_of(&self, kind: ListenerKind) -> usize {
        self.listeners.values().filter(|entry| **entry == kind).count()
    }

    /// Inline body `overflow` value.
    pub fn body_overflow(&self) -> &str {
        &self.body_overflow
    }

    /// Sets the inline body `overflow` value.
    pub fn set_body_overflow(&mut self, value: impl Into<String>) {
        self.body_overflow = value.into();
    }

    fn is_within(&self, root: NodeId, target: NodeId) -> bool {
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            if node == root {
                return true;
            }
            cursor = self.nodes.get(node.0).and_then(|entry| entry.parent);
        }
        false
    }

    fn collect_descendants(&self, root: NodeId, out: &mut Vec<NodeId>) {
        let Some(entry) = self.nodes.get(root.0) else {
            return;
        };
        for child in &entry.children {
            out.push(*child);
            self.collect_descendants(*child, out);
        }
    }

    fn body_element_mut(&mut self) -> &mut MemoryElement {
        &mut self.nodes[0].element
    }
}

impl DocumentHost for MemoryDocument {
    type Element = NodeId;

    fn active_element(&self) -> Option<NodeId> {
        Some(self.active.unwrap_or(self.body()))
    }

    fn focus(&mut self, element: &NodeId) -> bool {
        if !self.is_connected(element) {
            return false;
        }
        self.active = Some(*element);
        true
    }

    fn is_connected(&self, element: &NodeId) -> bool {
        element.0 < self.nodes.len() && self.is_within(self.body(), *element)
    }

    fn contains(&self, root: &NodeId, target: &NodeId) -> bool {
        self.is_within(*root, *target)
    }

    fn query_selector(&self, root: &NodeId, selector: &str) -> Option<NodeId> {
        let mut nodes = Vec::new();
        self.collect_descendants(*root, &mut nodes);
        nodes.into_iter().find(|node| self.matches(node, selector))
    }

    fn matches(&self, element: &NodeId, selector: &str) -> bool {
        self.element(*element)
            .map(|entry| entry.matches(selector))
            .unwrap_or(false)
    }

    fn descendants(&self, root: &NodeId) -> Vec<(NodeId, ElementDescriptor)> {
        let mut nodes = Vec::new();
        self.collect_descendants(*root, &mut nodes);
        nodes
            .into_iter()
            .filter_map(|node| {
                self.element(node)
                    .map(|element| (node, element.descriptor()))
            })
            .collect()
    }

    fn top_level_nodes(&self) -> Vec<NodeId> {
        self.nodes[0].children.clone()
    }

    fn is_aria_hidden(&self, element: &NodeId) -> bool {
        self.attribute(*element, "aria-hidden") == Some("true")
    }

    fn set_aria_hidden(&mut self, element: &NodeId, hidden: bool) {
        let Some(entry) = self.nodes.get_mut(element.0) else {
            return;
        };
        if hidden {
            entry
                .element
                .attributes
                .insert("aria-hidden".to_string(), "true".to_string());
        } else {
            entry.element.attributes.remove("aria-hidden");
        }
    }

    fn add_body_class(&mut self, class: &str) {
        self.body_element_mut().add_class(class);
    }

    fn remove_body_class(&mut self, class: &str) {
        self.body_element_mut().remove_class(class);
    }

    fn has_body_class(&self, class: &str) -> bool {
        self.nodes[0].element.has_class(class)
    }

    fn lock_scroll(&mut self) -> ScrollLock {
        let previous_overflow = std::mem::replace(&mut self.body_overflow, "hidden".to_string());
        ScrollLock { previous_overflow }
    }

    fn unlock_scroll(&mut self, lock: ScrollLock) {
        self.body_overflow = lock.previous_overflow;
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn selector_matching_covers_tag_id_class_and_attributes() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let node = doc.append(
            body,
            MemoryElement::new("button")
                .id("confirm")
                .class("primary")
                .attr("data-role", "ok"),
        );

        assert!(doc.matches(&node, "button"));
        assert!(doc.matches(&node, "#confirm"));
        assert!(doc.matches(&node, "button.primary#confirm"));
        assert!(doc.matches(&node, "[data-role]"));
        assert!(doc.matches(&node, "[data-role=\"ok\"]"));
        assert!(doc.matches(&node, "a, .primary"));
        assert!(!doc.matches(&node, "a"));
        assert!(!doc.matches(&node, ".secondary"));
        assert!(!doc.matches(&node, "[data-role=cancel]"));
        assert!(!doc.matches(&node, ""));
    }

    #[test]
    fn query_selector_walks_descendants_in_document_order() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let root = doc.append(body, MemoryElement::new("div"));
        let section = doc.append(root, MemoryElement::new("section"));
        let first = doc.append(section, MemoryElement::new("input").class("field"));
        let second = doc.append(root, MemoryElement::new("input").class("field"));

        assert_eq!(doc.query_selector(&root, ".field"), Some(first));
        assert_eq!(doc.query_selector(&root, "textarea"), None);
        assert_eq!(
            doc.descendants(&root)
                .into_iter()
                .map(|(node, _)| node)
                .collect::<Vec<_>>(),
            vec![section, first, second]
        );
    }

    #[test]
    fn detaching_focused_subtree_resets_focus_to_body() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let wrapper = doc.append(body, MemoryElement::new("div"));
        let button = doc.append(wrapper, MemoryElement::new("button"));

        assert!(doc.focus(&button));
        doc.detach(wrapper);

        assert!(!doc.is_connected(&button));
        assert_eq!(doc.active_element(), Some(body));
        assert!(!doc.focus(&button));
    }

    #[test]
    fn body_classes_scroll_and_listeners_round_trip() {
        let mut doc = MemoryDocument::new();
        doc.set_body_overflow("auto");

        doc.add_body_class("modal-open");
        doc.add_body_class("modal-open");
        let lock = doc.lock_scroll();
        let key = doc.add_listener(ListenerKind::KeyDown);
        let _pointer = doc.add_listener(ListenerKind::PointerDown);

        assert!(doc.has_body_class("modal-open"));
        assert_eq!(doc.attribute(doc.body(), "class"), Some("modal-open"));
        assert_eq!(doc.body_overflow(), "hidden");
        assert_eq!(doc.listener_count(), 2);

        doc.remove_body_class("modal-open");
        doc.unlock_scroll(lock);
        doc.remove_listener(key);

        assert!(!doc.has_body_class("modal-open"));
        assert_eq!(doc.body_overflow(), "auto");
        assert_eq!(doc.listener_count_of(ListenerKind::KeyDown), 0);
        assert_eq!(doc.listener_count_of(ListenerKind::PointerDown), 1);
    }
}
