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

//! Placement validation over a node stream.
//!
//! [`NodeValidator`] looks at every node as it is yielded: the element must
//! be a known WordNet LMF kind, sit under its expected parent, and satisfy
//! its record schema. Because nodes arrive in post-order, each node's
//! children were already validated when the node itself is checked, so the
//! schema check stays shallow and the whole document is validated in one
//! pass.

use crate::error::{Result, ValidationError};
use crate::extract::ExtractOptions;
use crate::schema::{self, DOCUMENT, LEXICAL_RESOURCE};
use crate::types::PartOfSpeech;
use std::collections::BTreeMap;
use wnlmf_stream::{Node, NodeEvent, NodeKind, StreamResult};

/// Identity of a lexicon seen during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconInfo {
    pub id: String,
    pub language: String,
    pub version: String,
}

/// Counters gathered while validating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Number of validated elements per kind.
    pub counts: BTreeMap<String, usize>,
    /// Lemma count per part of speech.
    pub parts_of_speech: BTreeMap<PartOfSpeech, usize>,
    pub lexicons: Vec<LexiconInfo>,
    /// Whether the stream reached the end of a complete document.
    pub complete: bool,
}

impl ValidationSummary {
    /// Number of validated elements of `kind`.
    pub fn count(&self, kind: &str) -> usize {
        self.counts.get(kind).copied().unwrap_or(0)
    }

    /// Total number of validated elements.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Checks nodes one at a time as they are yielded.
#[derive(Debug, Clone, Default)]
pub struct NodeValidator {
    options: ExtractOptions,
    summary: ValidationSummary,
}

impl NodeValidator {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            summary: ValidationSummary::default(),
        }
    }

    /// Validate one yielded node.
    ///
    /// Placement is read through the node's parent link, so call this as
    /// nodes are yielded (or while the document root is still held).
    pub fn check(&mut self, node: &Node) -> std::result::Result<(), ValidationError> {
        match node.kind() {
            NodeKind::Element(name) => self.check_element(name, node),
            NodeKind::Text | NodeKind::CData => check_text(node),
            NodeKind::Document
            | NodeKind::Comment
            | NodeKind::Declaration
            | NodeKind::Doctype => Ok(()),
        }
    }

    /// Feed one stream event. The end-of-document event marks the summary
    /// complete.
    pub fn check_event(&mut self, event: &NodeEvent) -> std::result::Result<(), ValidationError> {
        match event {
            NodeEvent::Node(node) => self.check(node),
            NodeEvent::EndOfDocument(_) => {
                self.summary.complete = true;
                Ok(())
            }
        }
    }

    #[inline]
    pub fn summary(&self) -> &ValidationSummary {
        &self.summary
    }

    pub fn into_summary(self) -> ValidationSummary {
        self.summary
    }

    fn check_element(&mut self, name: &str, node: &Node) -> std::result::Result<(), ValidationError> {
        if name == LEXICAL_RESOURCE {
            expect_parent(node, DOCUMENT)?;
        } else {
            let schema = schema::for_element(name).ok_or_else(|| ValidationError::UnknownElement {
                kind: name.to_string(),
            })?;
            expect_parent(node, schema.parent)?;
            schema.check(node, &self.options)?;
            self.record(schema.record, node);
        }

        *self.summary.counts.entry(name.to_string()).or_insert(0) += 1;
        Ok(())
    }

    fn record(&mut self, record: &str, node: &Node) {
        match record {
            "Lemma" => {
                // The schema check guarantees a valid part of speech.
                if let Some(pos) = node
                    .attribute("partOfSpeech")
                    .and_then(|p| p.parse::<PartOfSpeech>().ok())
                {
                    *self.summary.parts_of_speech.entry(pos).or_insert(0) += 1;
                }
            }
            "Lexicon" => {
                let attr = |name: &str| node.attribute(name).unwrap_or_default().to_string();
                let info = LexiconInfo {
                    id: attr("id"),
                    language: attr("language"),
                    version: attr("version"),
                };
                tracing::debug!(id = %info.id, version = %info.version, "lexicon validated");
                self.summary.lexicons.push(info);
            }
            _ => {}
        }
    }
}

fn expect_parent(node: &Node, expected: &'static str) -> std::result::Result<(), ValidationError> {
    let found = node.parent().map(|p| p.name().to_string());
    match found {
        Some(parent) if parent == expected => Ok(()),
        found => Err(ValidationError::Misplaced {
            kind: node.name().to_string(),
            expected_parent: expected,
            found_parent: found.unwrap_or_default(),
        }),
    }
}

/// Character data is only allowed inside records that carry text.
fn check_text(node: &Node) -> std::result::Result<(), ValidationError> {
    let Some(parent) = node.parent() else {
        return Ok(());
    };
    let carries_text = schema::for_element(parent.name()).is_some_and(|s| s.has_inner);
    if carries_text || node.raw().trim().is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Misplaced {
            kind: node.name().to_string(),
            expected_parent: "a text-carrying element",
            found_parent: parent.name().to_string(),
        })
    }
}

/// Validate a whole node stream and return its summary.
///
/// Stops at the first stream or validation error.
///
/// # Examples
///
/// ```rust
/// use wnlmf_core::{validate::validate_stream, ExtractOptions};
/// use wnlmf_stream::TreeParser;
/// use std::io::Cursor;
///
/// let xml = r#"<LexicalResource>
///   <Lexicon id="x" label="" language="en" email="" license="" version="1" citation="" url="">
///     <LexicalEntry id="e">
///       <Lemma writtenForm="cat" partOfSpeech="n"/>
///       <Sense id="e-1" synset="s"/>
///     </LexicalEntry>
///   </Lexicon>
/// </LexicalResource>"#;
///
/// let summary = validate_stream(TreeParser::new(Cursor::new(xml)), ExtractOptions::default()).unwrap();
/// assert_eq!(summary.count("Sense"), 1);
/// assert!(summary.complete);
/// ```
pub fn validate_stream<I>(events: I, options: ExtractOptions) -> Result<ValidationSummary>
where
    I: IntoIterator<Item = StreamResult<NodeEvent>>,
{
    let mut validator = NodeValidator::new(options);
    for event in events {
        validator.check_event(&event?)?;
    }
    let summary = validator.into_summary();
    tracing::debug!(elements = summary.total(), complete = summary.complete, "stream validated");
    Ok(summary)
}
