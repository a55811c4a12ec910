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

//! Event types for the streaming tree parser.
//!
//! # Event Flow
//!
//! Nodes are yielded when their subtree completes: leaves immediately, elements
//! when their closing tag is read. For this document:
//!
//! ```text
//! <Synset id="s1"><Definition>a cat</Definition></Synset>
//! ```
//!
//! the parser yields:
//!
//! ```text
//! Node(text "a cat")
//! Node(Definition)
//! Node(Synset)
//! EndOfDocument(@document)
//! ```
//!
//! `EndOfDocument` only appears when every element was closed. How the
//! sequence ended is available afterwards through [`Termination`].

use crate::node::Node;

/// Item yielded by the tree parser.
#[derive(Debug, Clone)]
pub enum NodeEvent {
    /// A node whose subtree is complete.
    Node(Node),
    /// The synthetic document root, yielded last and only for complete input.
    EndOfDocument(Node),
}

impl NodeEvent {
    /// The node carried by this event.
    #[inline]
    pub fn node(&self) -> &Node {
        match self {
            NodeEvent::Node(node) | NodeEvent::EndOfDocument(node) => node,
        }
    }

    /// Consume the event, returning its node.
    #[inline]
    pub fn into_node(self) -> Node {
        match self {
            NodeEvent::Node(node) | NodeEvent::EndOfDocument(node) => node,
        }
    }

    /// Whether this is the final document-root event.
    #[inline]
    pub fn is_end_of_document(&self) -> bool {
        matches!(self, NodeEvent::EndOfDocument(_))
    }
}

/// Why a parse run stopped yielding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Input ended with every element closed; the root was yielded.
    Complete,
    /// Input ended while elements were still open.
    Truncated { open_elements: usize },
    /// The cancellation token fired.
    Cancelled,
    /// The reader failed.
    TransportFailure,
    /// Malformed markup or an exceeded limit was reported.
    Failed,
}

impl Termination {
    /// Whether the input ended with every element closed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, Termination::Complete)
    }
}
