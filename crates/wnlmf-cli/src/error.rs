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

//! Error type for CLI commands.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a CLI command.
///
/// Library errors are flattened into messages so the type stays `Clone`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A file could not be opened, read or written.
    #[error("I/O error for '{path}': {message}")]
    Io { path: PathBuf, message: String },

    /// The XML stream could not be parsed or read.
    #[error("Failed to read '{path}': {message}")]
    Read { path: PathBuf, message: String },

    /// The document is well formed but violates the WordNet LMF schema.
    #[error("Invalid lexicon in '{path}': {message}")]
    Invalid { path: PathBuf, message: String },

    /// The input ended before the document was closed.
    #[error("Input '{path}' ended before the document was complete")]
    Incomplete { path: PathBuf },

    /// No `Lexicon` element was found.
    #[error("No Lexicon found in '{path}'")]
    NoLexicon { path: PathBuf },

    /// A lexicon carries a different version than requested.
    #[error("Lexicon '{id}' has version '{found}', expected '{expected}'")]
    VersionMismatch {
        id: String,
        expected: String,
        found: String,
    },

    /// Some identifier references do not resolve.
    #[error("{count} reference problem(s) found")]
    UnresolvedReferences { count: usize },

    /// JSON serialization failed.
    #[error("JSON conversion error: {message}")]
    Json { message: String },
}

impl CliError {
    pub fn io_error(path: impl AsRef<Path>, err: io::Error) -> Self {
        CliError::Io {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Classify a library error raised while processing `path`.
    pub fn from_lexicon_error(path: impl AsRef<Path>, err: wnlmf_core::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match err {
            wnlmf_core::Error::Stream(e) => CliError::Read {
                path,
                message: e.to_string(),
            },
            wnlmf_core::Error::Validation(e) => CliError::Invalid {
                path,
                message: e.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json {
            message: err.to_string(),
        }
    }
}
