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

//! Async streaming tree parser.
//!
//! Mirrors [`TreeParser`](crate::TreeParser) over tokio's async I/O. Both
//! parsers share the same tree-building state machine, so a document yields
//! the same node sequence either way.
//!
//! # When to Use Async
//!
//! Use [`AsyncTreeParser`] when the lexicon arrives over a socket or another
//! async source, or when many resources are read concurrently on one runtime.
//! For local files in a batch tool the sync parser is simpler.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use wnlmf_stream::{AsyncTreeParser, NodeEvent};
//! use tokio::fs::File;
//!
//! let file = File::open("english-wordnet.xml").await?;
//! let mut parser = AsyncTreeParser::new(file);
//!
//! while let Some(event) = parser.next_event().await? {
//!     if let NodeEvent::Node(node) = event {
//!         if node.name() == "Synset" {
//!             println!("{}", node.attribute("id").unwrap_or_default());
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Cancellation
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use wnlmf_stream::{AsyncTreeParser, CancellationToken, ParserConfig, Termination};
//! use tokio::fs::File;
//!
//! let token = CancellationToken::new();
//! let config = ParserConfig::default().with_cancellation(token.clone());
//! let mut parser = AsyncTreeParser::with_config(File::open("wn.xml").await?, config);
//!
//! token.cancel();
//! assert!(parser.next_event().await?.is_none());
//! assert_eq!(parser.termination(), Some(Termination::Cancelled));
//! # Ok(())
//! # }
//! ```

use crate::builder::{ParseState, Step};
use crate::error::StreamResult;
use crate::event::{NodeEvent, Termination};
use crate::parser::ParserConfig;
use crate::tokenizer::AsyncTokenizer;
use tokio::io::{AsyncRead, BufReader};

/// Async streaming parser that yields tree nodes as their subtrees complete.
pub struct AsyncTreeParser<R: AsyncRead + Unpin> {
    tokenizer: Option<AsyncTokenizer<BufReader<R>>>,
    state: ParseState,
}

impl<R: AsyncRead + Unpin> AsyncTreeParser<R> {
    /// Create a parser with default configuration.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ParserConfig::default())
    }

    /// Create a parser with custom configuration.
    pub fn with_config(reader: R, config: ParserConfig) -> Self {
        let reader = BufReader::with_capacity(config.buffer_size, reader);
        Self {
            tokenizer: Some(AsyncTokenizer::new(reader)),
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
    pub async fn next_event(&mut self) -> StreamResult<Option<NodeEvent>> {
        loop {
            let Some(tokenizer) = self.tokenizer.as_mut() else {
                return Ok(None);
            };

            let step = match self.state.admit() {
                Some(step) => step,
                None => {
                    let position = tokenizer.position();
                    let read = tokenizer.next_token().await;
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
