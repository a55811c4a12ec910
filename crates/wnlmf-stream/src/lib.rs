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

//! Streaming XML Node-Tree Parser
//!
//! This crate turns a byte stream of XML into a sequence of tree nodes. Each
//! node is yielded as soon as its subtree is complete, so a consumer can act
//! on a `<Synset>` while the rest of a multi-hundred-megabyte lexicon is still
//! being read.
//!
//! # Features
//!
//! - **Post-order delivery**: leaves immediately, elements on their closing tag
//! - **Navigable nodes**: parent links, sealed children, lazy attribute maps
//! - **Iterator-based**: standard Rust iterator interface (sync)
//! - **Async Support**: non-blocking I/O with tokio (optional)
//! - **Cancellation**: cooperative stop through a [`CancellationToken`]
//! - **Limits**: nesting depth and wall-clock timeout for untrusted input
//!
//! Lexing is delegated to quick-xml; this crate owns tree construction, node
//! filtering and the error policy.
//!
//! # Synchronous API (default)
//!
//! ```rust,no_run
//! use wnlmf_stream::{NodeEvent, TreeParser};
//! use std::fs::File;
//!
//! let file = File::open("english-wordnet.xml").unwrap();
//!
//! for event in TreeParser::new(file) {
//!     match event {
//!         Ok(NodeEvent::Node(node)) if node.name() == "LexicalEntry" => {
//!             println!("{:?}", node.attribute("id"));
//!         }
//!         Ok(NodeEvent::EndOfDocument(root)) => {
//!             println!("{} top-level nodes", root.children().len());
//!         }
//!         Err(e) => {
//!             eprintln!("Error: {}", e);
//!             break;
//!         }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! # Asynchronous API (feature = "async")
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use wnlmf_stream::{AsyncTreeParser, NodeEvent};
//! use tokio::fs::File;
//!
//! let mut parser = AsyncTreeParser::new(File::open("english-wordnet.xml").await?);
//! while let Some(event) = parser.next_event().await? {
//!     if let NodeEvent::Node(node) = event {
//!         println!("{}", node.kind());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Policy
//!
//! - Malformed markup is always reported as [`StreamError::MalformedFragment`].
//! - Reader failures end the stream quietly and are logged; with
//!   [`ParserConfig::strict_errors`] they are reported as [`StreamError::Io`].
//! - Cancellation ends the stream without an error.
//!
//! After the stream ends, [`TreeParser::termination`] tells which of these
//! happened, or whether the input was truncated.

mod attributes;
mod builder;
mod error;
mod event;
mod node;
mod parser;
mod tokenizer;

#[cfg(feature = "async")]
mod async_parser;

pub use attributes::Attributes;
pub use error::{StreamError, StreamResult};
pub use event::{NodeEvent, Termination};
pub use node::{Node, NodeKind};
pub use parser::{ParserConfig, TreeParser};
pub use tokenizer::{Token, Tokenizer};

#[cfg(feature = "async")]
pub use async_parser::AsyncTreeParser;
#[cfg(feature = "async")]
pub use tokenizer::AsyncTokenizer;

/// Re-export of the cancellation token accepted by [`ParserConfig`].
pub use tokio_util::sync::CancellationToken;
