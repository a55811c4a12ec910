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

//! Tree-building state machine shared by the sync and async parsers.
//!
//! The builder keeps a stack of open elements on top of the document root.
//! Each frame owns the children collected so far; they are sealed into the
//! node when its closing tag arrives. Nothing else is retained: once a
//! subtree is closed, it lives only in its parent's child list.

use crate::error::{StreamError, StreamResult};
use crate::event::{NodeEvent, Termination};
use crate::node::{Node, NodeKind};
use crate::parser::ParserConfig;
use crate::tokenizer::Token;
use std::time::Instant;

struct Frame {
    node: Node,
    children: Vec<Node>,
}

impl Frame {
    fn new(node: Node) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }
}

/// Cursor stack and node construction.
pub(crate) struct TreeBuilder {
    stack: Vec<Frame>,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self {
            stack: vec![Frame::new(Node::document())],
        }
    }

    /// Number of elements opened and not yet closed.
    #[inline]
    pub(crate) fn open_elements(&self) -> usize {
        self.stack.len() - 1
    }

    fn cursor(&mut self) -> &mut Frame {
        // The root frame is never popped.
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Apply one token. Returns the node to yield, if the token completed one.
    pub(crate) fn feed(
        &mut self,
        token: Token,
        config: &ParserConfig,
        position: usize,
    ) -> StreamResult<Option<Node>> {
        match token {
            Token::Text(text) => {
                if config.ignore_whitespace && text.trim().is_empty() {
                    return Ok(None);
                }
                Ok(Some(self.leaf(NodeKind::Text, text)))
            }
            Token::CData(raw) => Ok(Some(self.leaf(NodeKind::CData, raw))),
            Token::Comment(raw) => Ok(self.optional_leaf(config.ignore_comments, NodeKind::Comment, raw)),
            Token::Declaration(raw) => {
                Ok(self.optional_leaf(config.ignore_declaration, NodeKind::Declaration, raw))
            }
            Token::Doctype(raw) => Ok(self.optional_leaf(config.ignore_doctype, NodeKind::Doctype, raw)),
            Token::SelfClosing { name, raw } => {
                self.check_depth(config, position)?;
                Ok(Some(self.leaf(NodeKind::Element(name), raw)))
            }
            Token::Open { name, raw } => {
                self.check_depth(config, position)?;
                let cursor = self.cursor();
                let node = Node::new(NodeKind::Element(name), raw, &cursor.node);
                cursor.children.push(node.clone());
                self.stack.push(Frame::new(node));
                Ok(None)
            }
            Token::Close { name } => {
                let stray = |name: &str| {
                    StreamError::malformed(
                        position,
                        format!("closing tag `</{}>` without an open element", name),
                    )
                };
                if self.open_elements() == 0 {
                    return Err(stray(&name));
                }
                if self.cursor().node.name() != name {
                    return Err(StreamError::malformed(
                        position,
                        format!(
                            "closing tag `</{}>` does not match `<{}>`",
                            name,
                            self.cursor().node.name()
                        ),
                    ));
                }
                let Some(frame) = self.stack.pop() else {
                    return Err(stray(&name));
                };
                frame.node.seal(frame.children);
                Ok(Some(frame.node))
            }
            Token::Eof => Ok(None),
        }
    }

    /// A new element sits one level below the open ones; the outermost
    /// element is at depth 1.
    fn check_depth(&self, config: &ParserConfig, position: usize) -> StreamResult<()> {
        if self.open_elements() >= config.max_depth {
            return Err(StreamError::DepthLimitExceeded {
                position,
                max: config.max_depth,
            });
        }
        Ok(())
    }

    fn optional_leaf(&mut self, ignored: bool, kind: NodeKind, raw: String) -> Option<Node> {
        if ignored {
            None
        } else {
            Some(self.leaf(kind, raw))
        }
    }

    fn leaf(&mut self, kind: NodeKind, raw: String) -> Node {
        let cursor = self.cursor();
        let node = Node::new(kind, raw, &cursor.node);
        node.seal(Vec::new());
        cursor.children.push(node.clone());
        node
    }

    /// Close the run at end of input. Returns the sealed root, or the number
    /// of elements left open.
    pub(crate) fn finish(&mut self) -> Result<Node, usize> {
        match self.stack.as_slice() {
            [_] => {}
            frames => return Err(frames.len().saturating_sub(1)),
        }
        let Some(frame) = self.stack.pop() else {
            return Err(0);
        };
        frame.node.seal(frame.children);
        Ok(frame.node)
    }
}

/// What the driving parser should do after a token.
pub(crate) enum Step {
    Continue,
    Emit(NodeEvent),
    Stop,
    Fail(StreamError),
}

/// Per-run state: builder, configuration, limits and termination bookkeeping.
///
/// The sync and async parsers own a tokenizer and a `ParseState`, and only
/// differ in how they await the next token.
pub(crate) struct ParseState {
    builder: TreeBuilder,
    config: ParserConfig,
    termination: Option<Termination>,
    start_time: Instant,
    operations_count: usize,
}

impl ParseState {
    pub(crate) fn new(config: ParserConfig) -> Self {
        Self {
            builder: TreeBuilder::new(),
            config,
            termination: None,
            start_time: Instant::now(),
            operations_count: 0,
        }
    }

    #[inline]
    pub(crate) fn config(&self) -> &ParserConfig {
        &self.config
    }

    #[inline]
    pub(crate) fn termination(&self) -> Option<Termination> {
        self.termination
    }

    #[inline]
    pub(crate) fn open_elements(&self) -> usize {
        self.builder.open_elements()
    }

    /// Checks run before every token read. `Some` means the run ends here.
    pub(crate) fn admit(&mut self) -> Option<Step> {
        if self
            .config
            .cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
        {
            tracing::debug!(open = self.open_elements(), "parse cancelled");
            self.termination = Some(Termination::Cancelled);
            return Some(Step::Stop);
        }

        // Check timeout periodically (every 100 tokens to minimize overhead)
        self.operations_count += 1;
        if self.operations_count % 100 == 0 {
            if let Some(limit) = self.config.timeout {
                let elapsed = self.start_time.elapsed();
                if elapsed > limit {
                    self.termination = Some(Termination::Failed);
                    return Some(Step::Fail(StreamError::Timeout { elapsed, limit }));
                }
            }
        }

        None
    }

    /// Consume the result of one tokenizer read.
    pub(crate) fn accept(&mut self, read: StreamResult<Token>, position: usize) -> Step {
        let token = match read {
            Ok(Token::Eof) => return self.finish(),
            Ok(token) => token,
            Err(err) => return self.fail(err),
        };

        match self.builder.feed(token, &self.config, position) {
            Ok(Some(node)) => Step::Emit(NodeEvent::Node(node)),
            Ok(None) => Step::Continue,
            Err(err) => self.fail(err),
        }
    }

    fn finish(&mut self) -> Step {
        match self.builder.finish() {
            Ok(root) => {
                tracing::debug!(children = root.children().len(), "document complete");
                self.termination = Some(Termination::Complete);
                Step::Emit(NodeEvent::EndOfDocument(root))
            }
            Err(open_elements) => {
                tracing::warn!(open_elements, "input ended with unclosed elements");
                self.termination = Some(Termination::Truncated { open_elements });
                Step::Stop
            }
        }
    }

    fn fail(&mut self, err: StreamError) -> Step {
        if err.is_transport() {
            self.termination = Some(Termination::TransportFailure);
            if self.config.strict_errors {
                return Step::Fail(err);
            }
            tracing::warn!(error = %err, "reader failed, ending node stream");
            return Step::Stop;
        }
        self.termination = Some(Termination::Failed);
        Step::Fail(err)
    }
}
