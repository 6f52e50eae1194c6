use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Structural fragment appended to a relay call (`tag`, `attrs`, nested `content`).
///
/// ```
/// use wai_core::Node;
///
/// let node = Node::new("biz").child(Node::new("list").attr("type", "product_list"));
/// assert_eq!(node.children().len(), 1);
/// assert_eq!(node.find("list").and_then(|n| n.get_attr("type")), Some("product_list"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub tag: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Node>>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            content: None,
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.content.get_or_insert_with(Vec::new).push(node);
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn children(&self) -> &[Node] {
        self.content.as_deref().unwrap_or_default()
    }

    /// Depth-first search for the first node (self included) carrying `tag`.
    pub fn find(&self, tag: &str) -> Option<&Node> {
        if self.tag == tag {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(tag))
    }
}
