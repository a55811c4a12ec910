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

//! Streaming tree parser.

use crate::builder::{ParseState, Step};
use crate::error::StreamResult;
use crate::event::{NodeEvent, Termination};
use crate::tokenizer::Tokenizer;
use std::io::{BufReader, Read};
use std::iter::FusedIterator;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Configuration for the tree parser.
///
/// # Defaults
///
/// Whitespace-only text, comments, declarations and doctypes are dropped.
/// Reader failures end the stream quietly; set `strict_errors` to surface
/// them. Malformed markup is always reported.
///
/// # Examples
///
/// ```rust
/// use wnlmf_stream::{CancellationToken, ParserConfig};
/// use std::time::Duration;
///
/// let config = ParserConfig::default()
///     .with_strict_errors(true)
///     .with_timeout(Duration::from_secs(30))
///     .with_cancellation(CancellationToken::new());
/// assert!(config.ignore_whitespace);
/// assert!(config.strict_errors);
/// ```
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Drop text nodes that contain only whitespace.
    pub ignore_whitespace: bool,
    /// Drop comments.
    pub ignore_comments: bool,
    /// Drop XML declarations and processing instructions.
    pub ignore_declaration: bool,
    /// Drop document type declarations.
    pub ignore_doctype: bool,
    /// Report reader failures as errors instead of ending the stream.
    pub strict_errors: bool,
    /// Maximum element nesting depth, counting open and self-closing
    /// elements alike. The outermost element is at depth 1.
    pub max_depth: usize,
    /// Read buffer size in bytes.
    pub buffer_size: usize,
    /// Wall-clock limit for the whole run. `None` disables the check.
    pub timeout: Option<Duration>,
    /// Token checked before every read; once cancelled the run ends quietly.
    pub cancellation: Option<CancellationToken>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            ignore_whitespace: true,
            ignore_comments: true,
            ignore_declaration: true,
            ignore_doctype: true,
            strict_errors: false,
            max_depth: 1024,
            buffer_size: 64 * 1024,
            timeout: None,
            cancellation: None,
        }
    }
}

impl ParserConfig {
    /// Keep every node kind, including whitespace text.
    pub fn keep_all() -> Self {
        Self {
            ignore_whitespace: false,
            ignore_comments: false,
            ignore_declaration: false,
            ignore_doctype: false,
            ..Default::default()
        }
    }

    /// Drop or keep whitespace-only text.
    pub fn with_ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = ignore;
        self
    }

    /// Drop or keep comments.
    pub fn with_ignore_comments(mut self, ignore: bool) -> Self {
        self.ignore_comments = ignore;
        self
    }

    /// Drop or keep declarations and processing instructions.
    pub fn with_ignore_declaration(mut self, ignore: bool) -> Self {
        self.ignore_declaration = ignore;
        self
    }

    /// Drop or keep document type declarations.
    pub fn with_ignore_doctype(mut self, ignore: bool) -> Self {
        self.ignore_doctype = ignore;
        self
    }

    /// Surface reader failures as errors.
    pub fn with_strict_errors(mut self, strict: bool) -> Self {
        self.strict_errors = strict;
        self
    }

    /// Set the maximum element nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the read buffer size in bytes.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Abort the run once `timeout` has elapsed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Stop quietly once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Streaming parser that yields tree nodes as their subtrees complete.
///
/// The parser is an [`Iterator`] over `StreamResult<NodeEvent>`. It is fused:
/// after the first error, cancellation, or the end-of-document event it only
/// yields `None`, and the underlying reader has been released.
///
/// # Examples
///
/// ```rust
/// use wnlmf_stream::{NodeEvent, Termination, TreeParser};
/// use std::io::Cursor;
///
/// let xml = r#"
///     <Synset id="s1" partOfSpeech="n">
///         <Definition>a domestic cat</Definition>
///     </Synset>
/// "#;
///
/// let mut parser = TreeParser::new(Cursor::new(xml));
/// let names: Vec<String> = parser
///     .by_ref()
///     .map(|event| event.unwrap().node().kind().to_string())
///     .collect();
///
/// assert_eq!(names, ["text", "Definition", "Synset", "@document"]);
/// assert_eq!(parser.termination(), Some(Termination::Complete));
/// ```
pub struct TreeParser<R: Read> {
    tokenizer: Option<Tokenizer<BufReader<R>>>,
    state: ParseState,
}

impl<R: Read> TreeParser<R> {
    /// Create a parser with default configuration.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ParserConfig::default())
    }

    /// Create a parser with custom configuration.
    pub fn with_config(reader: R, config: ParserConfig) -> Self {
        let reader = BufReader::with_capacity(config.buffer_size, reader);
        Self {
            tokenizer: Some(Tokenizer::new(reader)),
            state: ParseState::new(config),
        }
    }

    /// Configuration this parser was created with.
    #[inline]
    pub fn config(&self) -> &ParserConfig {
        self.state.config()
    }

    /// How the run ended, or `None` while it is still in progress.
    #[inline]
    pub fn termination(&self) -> Option<Termination> {
        self.state.termination()
    }

    /// Number of elements opened and not yet closed.
    #[inline]
    pub fn depth(&self) -> usize {
        self.state.open_elements()
    }

    /// Pull the next event. `Ok(None)` means the run is over.
    pub fn next_event(&mut self) -> StreamResult<Option<NodeEvent>> {
        loop {
            let Some(tokenizer) = self.tokenizer.as_mut() else {
                return Ok(None);
            };

            let step = match self.state.admit() {
                Some(step) => step,
                None => {
                    let position = tokenizer.position();
                    let read = tokenizer.next_token();
                    self.state.accept(read, position)
                }
            };

            match step {
                Step::Continue => continue,
                Step::Emit(event) => {
                    if event.is_end_of_document() {
                        self.tokenizer = None;
                    }
                    return Ok(Some(event));
                }
                Step::Stop => {
                    self.tokenizer = None;
                    return Ok(None);
                }
                Step::Fail(err) => {
                    self.tokenizer = None;
                    return Err(err);
                }
            }
        }
    }
}

impl<R: Read> Iterator for TreeParser<R> {
    type Item = StreamResult<NodeEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}

impl<R: Read> FusedIterator for TreeParser<R> {}
