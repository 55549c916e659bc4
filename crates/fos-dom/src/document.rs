//! Document - High-level document API

use crate::{DomResult, DomTree, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a document with an `html/head/body` skeleton and a `<title>`
    pub fn new(title: &str) -> DomResult<Self> {
        let mut tree = DomTree::new();

        let html = tree.append_element(tree.root(), "html")?;
        let head = tree.append_element(html, "head")?;
        let body = tree.append_element(html, "body")?;

        let meta = tree.append_element(head, "meta")?;
        tree.set_attribute(meta, "charset", "utf-8")?;
        let title_el = tree.append_element(head, "title")?;
        tree.append_text(title_el, title)?;

        Ok(Self {
            tree,
            html_element: html,
            head_element: head,
            body_element: body,
        })
    }

    /// Get document title
    pub fn title(&self) -> String {
        self.tree
            .children(self.head_element)
            .find(|(_, node)| node.as_element().is_some_and(|e| e.tag == "title"))
            .map(|(id, _)| self.tree.text_content(id))
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Serialize the whole document
    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>{}", self.tree.outer_html(self.tree.root()))
    }
}
