//! DOM Tree (arena-based allocation)

use crate::{DomError, DomResult, Node, NodeData, NodeId};

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Arena-based DOM tree
///
/// Slot 0 always holds the document node. Detached nodes stay in the arena
/// and can be re-attached; they are simply not [connected](Self::is_connected).
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node is never removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocate a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Allocate a detached text node
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.push(Node::text(content))
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound(id))
    }

    /// Append `child` as the last child of `parent`, moving it if it is
    /// already attached elsewhere.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if matches!(self.node(parent)?.data, NodeData::Text(_)) {
            return Err(DomError::InvalidNodeType(parent));
        }
        if matches!(self.node(child)?.data, NodeData::Document) || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child)?;

        let last = self.node(parent)?.last_child;
        {
            let node = self.node_mut(child)?;
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.node_mut(last)?.next_sibling = child;
        } else {
            self.node_mut(parent)?.first_child = child;
        }
        self.node_mut(parent)?.last_child = child;

        tracing::trace!(%parent, %child, "node appended");
        Ok(child)
    }

    /// Create an element and append it in one step
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> DomResult<NodeId> {
        let id = self.create_element(tag);
        self.append_child(parent, id)
    }

    /// Create a text node and append it in one step
    pub fn append_text(&mut self, parent: NodeId, content: impl Into<String>) -> DomResult<NodeId> {
        let id = self.create_text(content);
        self.append_child(parent, id)
    }

    /// Unlink a node (and its subtree) from its parent. No-op when already detached.
    pub fn detach(&mut self, id: NodeId) -> DomResult<()> {
        let (parent, prev, next) = {
            let node = self.node(id)?;
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return Ok(());
        }

        if prev.is_valid() {
            self.node_mut(prev)?.next_sibling = next;
        } else {
            self.node_mut(parent)?.first_child = next;
        }
        if next.is_valid() {
            self.node_mut(next)?.prev_sibling = prev;
        } else {
            self.node_mut(parent)?.last_child = prev;
        }

        let node = self.node_mut(id)?;
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        tracing::trace!(node = %id, %parent, "node detached");
        Ok(())
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        while node.is_valid() {
            if node == ancestor {
                return true;
            }
            node = match self.get(node) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    /// Whether the node is reachable from the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.get(id).is_some() && self.is_inclusive_ancestor(self.root(), id)
    }

    /// Iterate over the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Read an attribute of an element
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> DomResult<()> {
        self.node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType(id))?
            .set_attr(name, value);
        Ok(())
    }

    /// Remove an attribute from an element
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self
            .node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType(id))?
            .remove_attr(name))
    }

    /// Concatenated text of the subtree
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            out.push_str(text);
            return;
        }
        for (child, _) in self.children(id) {
            self.collect_text(child, out);
        }
    }

    /// Serialize a node and its subtree
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize only the children of a node
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for (child, _) in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else { return };
        match &node.data {
            NodeData::Document => {
                for (child, _) in self.children(id) {
                    self.write_node(child, out);
                }
            }
            NodeData::Text(text) => {
                // Script bodies are raw text
                let in_script = self
                    .get(node.parent)
                    .and_then(Node::as_element)
                    .is_some_and(|e| e.tag == "script");
                if in_script {
                    out.push_str(text);
                } else {
                    escape_into(text, false, out);
                }
            }
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for attr in &el.attrs {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    escape_into(&attr.value, true, out);
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    return;
                }
                for (child, _) in self.children(id) {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

/// Iterator over the direct children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_iterate() {
        let mut tree = DomTree::new();
        let div = tree.append_element(tree.root(), "div").unwrap();
        let a = tree.append_element(div, "p").unwrap();
        let b = tree.append_element(div, "p").unwrap();

        let ids: Vec<_> = tree.children(div).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b]);
        assert!(tree.is_connected(b));
    }

    #[test]
    fn test_detach_disconnects_subtree() {
        let mut tree = DomTree::new();
        let div = tree.append_element(tree.root(), "div").unwrap();
        let inner = tree.append_element(div, "span").unwrap();

        tree.detach(div).unwrap();

        assert!(!tree.is_connected(div));
        assert!(!tree.is_connected(inner));
        assert_eq!(tree.children(tree.root()).count(), 0);
        // Detaching twice is fine
        tree.detach(div).unwrap();
    }

    #[test]
    fn test_detach_middle_child() {
        let mut tree = DomTree::new();
        let ul = tree.append_element(tree.root(), "ul").unwrap();
        let first = tree.append_element(ul, "li").unwrap();
        let middle = tree.append_element(ul, "li").unwrap();
        let last = tree.append_element(ul, "li").unwrap();

        tree.detach(middle).unwrap();

        let ids: Vec<_> = tree.children(ul).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![first, last]);
    }

    #[test]
    fn test_append_moves_attached_node() {
        let mut tree = DomTree::new();
        let from = tree.append_element(tree.root(), "div").unwrap();
        let to = tree.append_element(tree.root(), "div").unwrap();
        let item = tree.append_element(from, "p").unwrap();

        tree.append_child(to, item).unwrap();

        assert_eq!(tree.children(from).count(), 0);
        assert_eq!(tree.children(to).map(|(id, _)| id).collect::<Vec<_>>(), vec![item]);
        assert_eq!(tree.get(item).unwrap().parent, to);
        assert!(tree.is_connected(item));
    }

    #[test]
    fn test_hierarchy_request() {
        let mut tree = DomTree::new();
        let outer = tree.append_element(tree.root(), "div").unwrap();
        let inner = tree.append_element(outer, "div").unwrap();

        assert_eq!(
            tree.append_child(inner, outer),
            Err(DomError::HierarchyRequest { parent: inner, child: outer })
        );
        assert!(tree.append_child(outer, outer).is_err());
    }

    #[test]
    fn test_text_cannot_have_children() {
        let mut tree = DomTree::new();
        let text = tree.append_text(tree.root(), "hi").unwrap();
        let div = tree.create_element("div");
        assert_eq!(tree.append_child(text, div), Err(DomError::InvalidNodeType(text)));
    }

    #[test]
    fn test_unknown_node() {
        let mut tree = DomTree::new();
        let ghost = NodeId::from_raw(42);
        assert_eq!(tree.set_attribute(ghost, "style", ""), Err(DomError::NotFound(ghost)));
        assert!(!tree.is_connected(ghost));
    }

    #[test]
    fn test_serialize_escapes() {
        let mut tree = DomTree::new();
        let a = tree.append_element(tree.root(), "a").unwrap();
        tree.set_attribute(a, "href", "/q?a=1&b=\"2\"").unwrap();
        tree.append_text(a, "<Link>").unwrap();
        let img = tree.append_element(tree.root(), "img").unwrap();
        tree.set_attribute(img, "alt", "logo").unwrap();

        assert_eq!(
            tree.inner_html(tree.root()),
            "<a href=\"/q?a=1&amp;b=&quot;2&quot;\">&lt;Link&gt;</a><img alt=\"logo\">"
        );
    }

    #[test]
    fn test_script_text_is_raw() {
        let mut tree = DomTree::new();
        let script = tree.append_element(tree.root(), "script").unwrap();
        tree.append_text(script, "a < b && c").unwrap();
        assert_eq!(tree.outer_html(script), "<script>a < b && c</script>");
    }
}
