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

//! Typed WordNet LMF records on top of the streaming node parser.
//!
//! This crate turns the node stream of [`wnlmf_stream`] into strongly typed
//! lexicon records, with strict schema validation along the way.
//!
//! # Components
//!
//! - [`types`]: closed vocabularies (part of speech, relation types)
//! - [`records`]: the record structs
//! - [`schema`]: static per-record schemas
//! - [`extract`]: [`FromNode`] extraction with cardinality checks
//! - [`validate`]: single-pass placement validation over a whole stream
//! - [`verify`]: identifier reference checks over an extracted lexicon
//!
//! # Reading a Lexicon
//!
//! ```rust
//! use wnlmf_core::{read_lexicon, ExtractOptions};
//! use wnlmf_stream::ParserConfig;
//! use std::io::Cursor;
//!
//! let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <LexicalResource>
//!   <Lexicon id="oewn" label="Open English Wordnet" language="en" email="e@x"
//!            license="CC-BY 4.0" version="2023" citation="" url="https://en-word.net">
//!     <LexicalEntry id="oewn-cat-n">
//!       <Lemma writtenForm="cat" partOfSpeech="n"/>
//!       <Sense id="oewn-cat__1" synset="oewn-1-n"/>
//!     </LexicalEntry>
//!     <Synset id="oewn-1-n" ili="i1" members="oewn-cat-n" partOfSpeech="n" lexfile="noun.animal">
//!       <Definition>feline mammal</Definition>
//!     </Synset>
//!   </Lexicon>
//! </LexicalResource>"#;
//!
//! let lexicon = read_lexicon(Cursor::new(xml), ParserConfig::default(), &ExtractOptions::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(lexicon.version, "2023");
//! assert_eq!(lexicon.lexical_entries[0].senses[0].synset, "oewn-1-n");
//! ```

pub mod error;
pub mod extract;
pub mod records;
pub mod schema;
pub mod types;
pub mod validate;
pub mod verify;

pub use error::{Error, Result, ValidationError};
pub use extract::{ExtractOptions, FromNode};
pub use records::{
    Definition, Example, Form, ILIDefinition, Lemma, LexicalEntry, Lexicon, Pronunciation, Sense,
    SenseRelation, Synset, SynsetRelation, SyntacticBehavior,
};
pub use types::{AdjPosition, ParseEnumError, PartOfSpeech, SenseRelationType, SynsetRelationType};
pub use validate::{validate_stream, NodeValidator, ValidationSummary};
pub use verify::{verify_references, ReferenceReport};

use std::io::Read;
use wnlmf_stream::{NodeEvent, ParserConfig, StreamResult, TreeParser};

/// Extract the first `Lexicon` in a node stream.
///
/// Consumes events until a `Lexicon` node is yielded and extracts it with its
/// whole subtree. Returns `Ok(None)` when the stream ends without one.
pub fn parse_lexicon<I>(events: I, options: &ExtractOptions) -> Result<Option<Lexicon>>
where
    I: IntoIterator<Item = StreamResult<NodeEvent>>,
{
    for event in events {
        if let Some(lexicon) = lexicon_from_event(event?, options)? {
            return Ok(Some(lexicon));
        }
    }
    tracing::debug!("stream ended without a lexicon");
    Ok(None)
}

/// Parse `reader` and extract its first `Lexicon`.
pub fn read_lexicon<R: Read>(
    reader: R,
    config: ParserConfig,
    options: &ExtractOptions,
) -> Result<Option<Lexicon>> {
    parse_lexicon(TreeParser::with_config(reader, config), options)
}

/// Async counterpart of [`parse_lexicon`].
#[cfg(feature = "async")]
pub async fn parse_lexicon_async<R>(
    parser: &mut wnlmf_stream::AsyncTreeParser<R>,
    options: &ExtractOptions,
) -> Result<Option<Lexicon>>
where
    R: tokio::io::AsyncRead + Unpin,
{
    while let Some(event) = parser.next_event().await? {
        if let Some(lexicon) = lexicon_from_event(event, options)? {
            return Ok(Some(lexicon));
        }
    }
    tracing::debug!("stream ended without a lexicon");
    Ok(None)
}

fn lexicon_from_event(event: NodeEvent, options: &ExtractOptions) -> Result<Option<Lexicon>> {
    match event {
        NodeEvent::Node(node) if node.name() == schema::LEXICON.element => {
            let lexicon = Lexicon::from_node(&node, options)?;
            tracing::debug!(
                id = %lexicon.id,
                entries = lexicon.lexical_entries.len(),
                synsets = lexicon.synsets.len(),
                "lexicon extracted"
            );
            Ok(Some(lexicon))
        }
        _ => Ok(None),
    }
}
