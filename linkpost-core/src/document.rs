//! Structured message body: a document of nested block / inline / text nodes.
//!
//! Inbound message content and outbound reply content share this shape.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Root of a message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default = "document_object")]
    pub object: String,
    #[serde(default = "empty_data")]
    pub data: Value,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

fn document_object() -> String {
    "document".to_string()
}

fn empty_data() -> Value {
    json!({})
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            object: document_object(),
            data: empty_data(),
            nodes,
        }
    }

    /// Top-level paragraph blocks in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_paragraph())
    }
}

/// A single node. `object` is "block", "inline" or "text"; text nodes carry `leaves`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub object: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leaves: Vec<Leaf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    pub object: String,
    pub text: String,
    #[serde(default)]
    pub marks: Vec<Value>,
}

impl Leaf {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            object: "leaf".to_string(),
            text: text.into(),
            marks: Vec::new(),
        }
    }
}

impl Node {
    fn block(kind: &str, data: Value, nodes: Vec<Node>) -> Self {
        Self {
            object: "block".to_string(),
            kind: Some(kind.to_string()),
            data: Some(data),
            nodes,
            leaves: Vec::new(),
        }
    }

    /// Plain text node with a single unmarked leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            object: "text".to_string(),
            kind: None,
            data: None,
            nodes: Vec::new(),
            leaves: vec![Leaf::plain(text)],
        }
    }

    pub fn paragraph(nodes: Vec<Node>) -> Self {
        Self::block("paragraph", empty_data(), nodes)
    }

    /// Inline hyperlink whose visible text is `text`.
    pub fn link(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            object: "inline".to_string(),
            kind: Some("link".to_string()),
            data: Some(json!({ "href": href.into() })),
            nodes: vec![Node::text(text)],
            leaves: Vec::new(),
        }
    }

    /// Image block with a single caption line.
    pub fn captioned_image(src: impl Into<String>, caption: impl Into<String>) -> Self {
        let caption_line = Self::block("image-caption-line", empty_data(), vec![Node::text(caption)]);
        Self::block("image", json!({ "src": src.into() }), vec![caption_line])
    }

    pub fn is_paragraph(&self) -> bool {
        self.kind.as_deref() == Some("paragraph")
    }

    pub fn is_link(&self) -> bool {
        self.kind.as_deref() == Some("link")
    }

    /// Link target, if this node carries `data.href`.
    pub fn href(&self) -> Option<&str> {
        self.data.as_ref()?.get("href")?.as_str()
    }

    /// Concatenated text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out: String = self.leaves.iter().map(|l| l.text.as_str()).collect();
        for child in &self.nodes {
            out.push_str(&child.plain_text());
        }
        out
    }
}
