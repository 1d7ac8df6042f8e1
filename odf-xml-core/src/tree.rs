use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// An element or attribute name resolved against in-scope namespace bindings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName {
    /// Namespace URI, or `None` for names outside any namespace.
    pub namespace: Option<String>,
    /// Local part of the name, without prefix.
    pub local: String,
}

impl QualifiedName {
    /// Name bound to `namespace`.
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local: local.into(),
        }
    }

    /// Name with no namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: local.into(),
        }
    }

    /// True when this name is `local` in `namespace`.
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.local == local && self.namespace.as_deref() == Some(namespace)
    }
}

/// Clark notation, `{uri}local`.
impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

/// One entry in an element's ordered content.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlChild {
    Element(XmlNode),
    Text(String),
    /// Kept so text on either side stays split; contributes no text.
    Comment(String),
}

impl XmlChild {
    pub fn as_element(&self) -> Option<&XmlNode> {
        match self {
            XmlChild::Element(node) => Some(node),
            XmlChild::Text(_) | XmlChild::Comment(_) => None,
        }
    }
}

/// Indices into `children` from the root down to a node. The root is `[]`.
pub type NodePath = Vec<usize>;

/// An XML element with mixed content.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlNode {
    /// Resolved element name.
    pub name: QualifiedName,
    /// Attributes keyed by resolved name.
    pub attributes: BTreeMap<QualifiedName, String>,
    /// Child elements and text, in document order.
    pub children: Vec<XmlChild>,
}

impl XmlNode {
    /// Create a new element with no attributes or content.
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// True when this element is `local` in `namespace`.
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.name.is(namespace, local)
    }

    /// Attribute value for `local` in `namespace`.
    pub fn attribute(&self, namespace: &str, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.is(namespace, local))
            .map(|(_, value)| value.as_str())
    }

    /// Text that appears before the first child element, if any.
    pub fn leading_text(&self) -> Option<&str> {
        match self.children.first() {
            Some(XmlChild::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Concatenate every descendant text node depth-first in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlChild::Text(text) => out.push_str(text),
                XmlChild::Element(node) => node.collect_text(out),
                XmlChild::Comment(_) => {}
            }
        }
    }

    /// Iterate over child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter_map(XmlChild::as_element)
    }

    /// All descendant elements matching `namespace`/`local`, in document order.
    pub fn descendants(&self, namespace: &str, local: &str) -> Vec<&XmlNode> {
        let mut found = Vec::new();
        self.collect_descendants(namespace, local, &mut found);
        found
    }

    fn collect_descendants<'a>(
        &'a self,
        namespace: &str,
        local: &str,
        found: &mut Vec<&'a XmlNode>,
    ) {
        for node in self.elements() {
            if node.is(namespace, local) {
                found.push(node);
            }
            node.collect_descendants(namespace, local, found);
        }
    }

    /// Paths of all descendant elements matching `namespace`/`local`, in document order.
    pub fn descendant_paths(&self, namespace: &str, local: &str) -> Vec<NodePath> {
        let mut found = Vec::new();
        let mut path = Vec::new();
        self.collect_paths(namespace, local, &mut path, &mut found);
        found
    }

    fn collect_paths(
        &self,
        namespace: &str,
        local: &str,
        path: &mut NodePath,
        found: &mut Vec<NodePath>,
    ) {
        for (idx, child) in self.children.iter().enumerate() {
            let XmlChild::Element(node) = child else {
                continue;
            };
            path.push(idx);
            if node.is(namespace, local) {
                found.push(path.clone());
            }
            node.collect_paths(namespace, local, path, found);
            path.pop();
        }
    }

    /// Element at `path`, relative to this node.
    pub fn node_at(&self, path: &[usize]) -> Option<&XmlNode> {
        let mut current = self;
        for idx in path {
            current = current.children.get(*idx)?.as_element()?;
        }
        Some(current)
    }

    /// Path of the next element sibling of the node at `path`, skipping text
    /// and comments.
    ///
    /// Returns `None` for the root or when no element follows.
    pub fn next_sibling_path(&self, path: &[usize]) -> Option<NodePath> {
        let (last, parent_path) = path.split_last()?;
        let parent = self.node_at(parent_path)?;
        let offset = parent
            .children
            .get(last + 1..)?
            .iter()
            .position(|child| matches!(child, XmlChild::Element(_)))?;

        let mut next = parent_path.to_vec();
        next.push(last + 1 + offset);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::{QualifiedName, XmlChild, XmlNode};

    const NS: &str = "urn:test";

    fn element(local: &str, children: Vec<XmlChild>) -> XmlChild {
        let mut node = XmlNode::new(QualifiedName::new(NS, local));
        node.children = children;
        XmlChild::Element(node)
    }

    fn text(value: &str) -> XmlChild {
        XmlChild::Text(value.to_string())
    }

    fn root(children: Vec<XmlChild>) -> XmlNode {
        let mut node = XmlNode::new(QualifiedName::new(NS, "root"));
        node.children = children;
        node
    }

    #[test]
    fn text_content_concatenates_mixed_content_in_order() {
        let tree = root(vec![
            text("a"),
            element("span", vec![text("b"), element("em", vec![text("c")])]),
            text("d"),
        ]);

        assert_eq!(tree.text_content(), "abcd");
    }

    #[test]
    fn next_sibling_path_skips_text_and_comments() {
        let tree = root(vec![
            element("p", vec![]),
            text("\n  "),
            XmlChild::Comment(" page break ".to_string()),
            element("table", vec![]),
        ]);

        assert_eq!(tree.next_sibling_path(&[0]), Some(vec![3]));
        assert_eq!(tree.next_sibling_path(&[3]), None);
        assert_eq!(tree.next_sibling_path(&[]), None);
    }

    #[test]
    fn descendant_paths_are_in_document_order() {
        let tree = root(vec![
            element("a", vec![element("a", vec![])]),
            element("b", vec![element("a", vec![])]),
        ]);

        assert_eq!(
            tree.descendant_paths(NS, "a"),
            vec![vec![0], vec![0, 0], vec![1, 0]]
        );
        assert_eq!(tree.descendants(NS, "a").len(), 3);
    }

    #[test]
    fn leading_text_ignores_text_after_first_element() {
        let tree = root(vec![element("span", vec![]), text("tail")]);
        assert_eq!(tree.leading_text(), None);
    }
}
