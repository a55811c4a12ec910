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

//! Error types for record extraction and validation.

use crate::schema::Cardinality;
use thiserror::Error;
use wnlmf_stream::StreamError;

/// A node or subtree that does not satisfy its record schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The extractor was handed a node of another kind.
    #[error("expected a {expected} node, found '{found}'")]
    UnexpectedKind { expected: &'static str, found: String },

    /// A required attribute is absent.
    #[error("{record}: required attribute '{attribute}' is missing")]
    MissingField {
        record: &'static str,
        field: &'static str,
        attribute: &'static str,
    },

    /// An identifier-like attribute is present but empty.
    #[error("{record}: attribute '{attribute}' must not be empty")]
    EmptyValue {
        record: &'static str,
        attribute: &'static str,
    },

    /// A value outside a closed vocabulary.
    #[error("{record}: '{value}' is not a valid {attribute} (expected one of: {})", allowed.join(", "))]
    InvalidEnumValue {
        record: &'static str,
        attribute: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    /// An attribute with no declared field.
    #[error("{record}: unknown attribute '{attribute}'")]
    UnknownAttribute { record: &'static str, attribute: String },

    /// Wrong number of child records of one kind.
    #[error("{record}: expected {expected} '{element}' children, found {actual}")]
    Cardinality {
        record: &'static str,
        element: &'static str,
        expected: Cardinality,
        actual: usize,
    },

    /// A node under an unexpected parent.
    #[error("'{kind}' must be inside '{expected_parent}', found inside '{found_parent}'")]
    Misplaced {
        kind: String,
        expected_parent: &'static str,
        found_parent: String,
    },

    /// An element that is not part of WordNet LMF.
    #[error("unknown element '{kind}'")]
    UnknownElement { kind: String },

    /// A child record failed; the parent fails with it.
    #[error("{record} child #{index}: {source}")]
    Nested {
        record: &'static str,
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Wrap a child failure with its parent record and position.
    pub fn nested(record: &'static str, index: usize, source: ValidationError) -> Self {
        ValidationError::Nested {
            record,
            index,
            source: Box::new(source),
        }
    }

    /// The innermost error, below every `Nested` layer.
    pub fn root_cause(&self) -> &ValidationError {
        let mut current = self;
        while let ValidationError::Nested { source, .. } = current {
            current = source;
        }
        current
    }

    /// Record names from the outermost parent down to the failing record.
    pub fn path(&self) -> Vec<(&'static str, usize)> {
        let mut path = Vec::new();
        let mut current = self;
        while let ValidationError::Nested {
            record,
            index,
            source,
        } = current
        {
            path.push((*record, *index));
            current = source;
        }
        path
    }
}

/// Errors from reading a lexicon: the stream failed or a record was invalid.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for lexicon reading.
pub type Result<T> = std::result::Result<T, Error>;
