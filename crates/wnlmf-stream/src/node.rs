// WNLMF - Streaming WordNet LMF Reader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tree nodes produced by the streaming parser.
//!
//! A [`Node`] is a cheap, clonable handle to one markup construct and its
//! subtree. Parents own their children; a child only keeps a weak link back
//! to its parent, so holding a node never keeps its ancestors alive.
//!
//! Upward queries ([`Node::parent`], [`Node::is`]) therefore answer only
//! while the ancestors are alive: during the parse run, or afterwards for as
//! long as the caller holds the document root from
//! [`NodeEvent::EndOfDocument`](crate::NodeEvent::EndOfDocument) (or any
//! ancestor covering the path). Downward queries work on any retained node.
//!
//! Children are sealed when the node's closing tag is read. From the moment a
//! node is yielded it is read-only and can be shared across threads.
//!
//! # Example
//!
//! ```rust
//! use wnlmf_stream::{NodeEvent, TreeParser};
//! use std::io::Cursor;
//!
//! let xml = r#"<Lemma writtenForm="cat" partOfSpeech="n"><Pronunciation>kat</Pronunciation></Lemma>"#;
//!
//! for event in TreeParser::new(Cursor::new(xml)) {
//!     if let NodeEvent::Node(node) = event.unwrap() {
//!         if node.name() == "Pronunciation" {
//!             assert!(node.is(&["Lemma", "Pronunciation"]));
//!             assert_eq!(node.inner_text(), "kat");
//!         }
//!     }
//! }
//! ```

use crate::attributes::{self, Attributes};
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// The construct a node represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Synthetic root of a parse run.
    Document,
    /// Element with its tag name.
    Element(String),
    /// Character data between tags.
    Text,
    /// A `<![CDATA[...]]>` block.
    CData,
    /// A `<!-- ... -->` comment.
    Comment,
    /// An XML declaration or processing instruction.
    Declaration,
    /// A `<!DOCTYPE ...>` declaration.
    Doctype,
}

impl NodeKind {
    /// String tag of this kind; the tag name for elements.
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Document => "@document",
            NodeKind::Element(name) => name,
            NodeKind::Text => "text",
            NodeKind::CData => "cdata",
            NodeKind::Comment => "comment",
            NodeKind::Declaration => "declaration",
            NodeKind::Doctype => "doctype",
        }
    }

    /// Whether this kind is an element.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self, NodeKind::Element(_))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct NodeData {
    kind: NodeKind,
    raw: String,
    parent: Weak<NodeData>,
    children: OnceLock<Box<[Node]>>,
    attributes: OnceLock<Attributes>,
}

/// Handle to a node in the parsed tree.
///
/// Cloning is cheap (reference counted). Equality is not structural; use
/// [`Node::ptr_eq`] to check identity.
#[derive(Clone)]
pub struct Node(Arc<NodeData>);

impl Node {
    /// Synthetic document root.
    pub(crate) fn document() -> Self {
        Self(Arc::new(NodeData {
            kind: NodeKind::Document,
            raw: String::new(),
            parent: Weak::new(),
            children: OnceLock::new(),
            attributes: OnceLock::new(),
        }))
    }

    /// New node attached to `parent`. The parent's child list is managed by
    /// the builder and sealed separately.
    pub(crate) fn new(kind: NodeKind, raw: String, parent: &Node) -> Self {
        Self(Arc::new(NodeData {
            kind,
            raw,
            parent: Arc::downgrade(&parent.0),
            children: OnceLock::new(),
            attributes: OnceLock::new(),
        }))
    }

    /// Freeze the child list. Only the first call has an effect.
    pub(crate) fn seal(&self, children: Vec<Node>) {
        let sealed = self.0.children.set(children.into_boxed_slice());
        debug_assert!(sealed.is_ok(), "node `{}` sealed twice", self.name());
    }

    /// The construct this node represents.
    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    /// Kind as a string: the tag name for elements, a reserved tag otherwise.
    #[inline]
    pub fn name(&self) -> &str {
        self.0.kind.as_str()
    }

    /// Original text span backing this node.
    #[inline]
    pub fn raw(&self) -> &str {
        &self.0.raw
    }

    /// Parent node. `None` for the document root, and for any node whose
    /// parent has been dropped because neither the parser nor the caller
    /// holds an ancestor any more.
    pub fn parent(&self) -> Option<Node> {
        self.0.parent.upgrade().map(Node)
    }

    /// Children in document order. Empty until the node has closed.
    #[inline]
    pub fn children(&self) -> &[Node] {
        self.0.children.get().map(|c| &**c).unwrap_or(&[])
    }

    /// Attributes parsed from the raw span.
    ///
    /// Computed on first access and cached; every later call returns the same
    /// map. Malformed attribute syntax is skipped rather than reported.
    pub fn attributes(&self) -> &Attributes {
        self.0.attributes.get_or_init(|| match self.0.kind {
            NodeKind::Element(_) => attributes::scan(&self.0.raw),
            _ => Attributes::new(),
        })
    }

    /// Single attribute value.
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes().get(name).map(String::as_str)
    }

    /// Concatenated text content of this node.
    ///
    /// Nodes with children concatenate their children's text in document
    /// order. Leaves return the payload of a CDATA block, decoded character
    /// data for text nodes, nothing for empty elements and the raw span for
    /// comments, declarations and doctypes.
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        self.push_inner_text(&mut out);
        out
    }

    fn push_inner_text(&self, out: &mut String) {
        let children = self.children();
        if children.is_empty() {
            out.push_str(&self.leaf_text());
        } else {
            for child in children {
                child.push_inner_text(out);
            }
        }
    }

    fn leaf_text(&self) -> Cow<'_, str> {
        let raw = self.raw();
        if let Some(payload) = cdata_payload(raw) {
            return Cow::Borrowed(payload);
        }
        match self.kind() {
            NodeKind::Text => attributes::decode(raw),
            NodeKind::Element(_) | NodeKind::Document => Cow::Borrowed(""),
            _ => Cow::Borrowed(raw),
        }
    }

    /// Whether this node and its ancestors match `path`, innermost last.
    ///
    /// `node.is(&["Sense", "SenseRelation"])` holds for a `SenseRelation`
    /// whose parent is a `Sense`. An empty path never matches. Ancestors are
    /// reached through [`Node::parent`], so the path must still be alive.
    pub fn is(&self, path: &[&str]) -> bool {
        if path.is_empty() {
            return false;
        }
        let mut current = Some(self.clone());
        for kind in path.iter().rev() {
            match current {
                Some(node) if node.name() == *kind => current = node.parent(),
                _ => return false,
            }
        }
        true
    }

    /// First direct child of the given kind.
    pub fn first(&self, kind: &str) -> Option<&Node> {
        self.children().iter().find(|n| n.name() == kind)
    }

    /// Direct children of the given kind, in document order.
    pub fn children_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children().iter().filter(move |n| n.name() == kind)
    }

    /// All nodes at the end of `path`.
    ///
    /// Every kind except the last selects the first matching child; the last
    /// kind selects all matching children at that level.
    pub fn all(&self, path: &[&str]) -> Vec<&Node> {
        let Some((last, prefix)) = path.split_last() else {
            return Vec::new();
        };
        let mut level: &Node = self;
        for kind in prefix {
            match level.first(kind) {
                Some(next) => level = next,
                None => return Vec::new(),
            }
        }
        level
            .children()
            .iter()
            .filter(|n| n.name() == *last)
            .collect()
    }

    /// Whether two handles point at the same node.
    #[inline]
    pub fn ptr_eq(a: &Node, b: &Node) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", self.kind())
            .field("raw", &self.raw())
            .field("children", &self.children().len())
            .finish()
    }
}

fn cdata_payload(raw: &str) -> Option<&str> {
    let start = raw.find(CDATA_OPEN)? + CDATA_OPEN.len();
    let len = raw[start..].find(CDATA_CLOSE)?;
    Some(&raw[start..start + len])
}
