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

//! Error types for the streaming tree parser.
//!
//! # Error Categories
//!
//! - **Transport Errors**: the underlying reader failed. These are only
//!   surfaced when [`ParserConfig::strict_errors`](crate::ParserConfig::strict_errors)
//!   is set; otherwise the parser logs them and ends its sequence early.
//! - **Malformed Fragments**: the markup itself cannot be tokenized or an
//!   element name cannot be extracted. Always fatal for the parse run.
//! - **Limits**: nesting depth or wall-clock timeout exceeded.
//!
//! Cancellation is not an error: a cancelled parser simply stops yielding.
//!
//! # Example
//!
//! ```rust
//! use wnlmf_stream::{StreamError, TreeParser};
//! use std::io::Cursor;
//!
//! let parser = TreeParser::new(Cursor::new("<a></b>"));
//!
//! for event in parser {
//!     if let Err(e) = event {
//!         assert!(matches!(e, StreamError::MalformedFragment { .. }));
//!         eprintln!("at byte {:?}: {}", e.position(), e);
//!     }
//! }
//! ```

use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while building the node tree.
#[derive(Error, Debug, Clone)]
pub enum StreamError {
    /// The underlying reader failed.
    #[error("IO error: {0}")]
    Io(Arc<std::io::Error>),

    /// Markup that cannot be turned into a node.
    #[error("Malformed fragment at byte {position}: {message}")]
    MalformedFragment { position: usize, message: String },

    /// Elements nested deeper than the configured limit.
    #[error("Nesting depth exceeded at byte {position} (max: {max})")]
    DepthLimitExceeded { position: usize, max: usize },

    /// Timeout exceeded during parsing.
    #[error("Parsing timeout: elapsed {elapsed:?} exceeded limit {limit:?}")]
    Timeout {
        elapsed: std::time::Duration,
        limit: std::time::Duration,
    },
}

impl StreamError {
    /// Create a malformed fragment error.
    #[inline]
    pub fn malformed(position: usize, message: impl Into<String>) -> Self {
        Self::MalformedFragment {
            position,
            message: message.into(),
        }
    }

    /// Byte offset in the input, if the error is tied to one.
    #[inline]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::MalformedFragment { position, .. }
            | Self::DepthLimitExceeded { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Whether this error came from the reader rather than the markup.
    #[inline]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<std::io::Error> for StreamError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

/// Result type for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;
