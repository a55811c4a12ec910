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

//! Typed WordNet LMF records.
//!
//! Plain value structs built by the extractors in [`crate::extract`]. With the
//! `serde` feature they serialize with camelCase field names; optional fields
//! are omitted when absent.

use crate::types::{AdjPosition, PartOfSpeech, SenseRelationType, SynsetRelationType};

/// A whole lexicon: the root of the typed structure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Lexicon {
    pub id: String,
    pub label: String,
    pub language: String,
    pub email: String,
    pub license: String,
    pub version: String,
    pub citation: String,
    pub url: String,
    pub lexical_entries: Vec<LexicalEntry>,
    pub synsets: Vec<Synset>,
    /// Read from `SyntacticBehaviour` elements.
    pub syntactic_behaviors: Vec<SyntacticBehavior>,
}

/// A word with its lemma, senses and alternative forms.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LexicalEntry {
    pub id: String,
    /// Always exactly one lemma once extracted.
    pub lemmas: Vec<Lemma>,
    pub senses: Vec<Sense>,
    pub forms: Vec<Form>,
}

impl LexicalEntry {
    /// The entry's lemma.
    pub fn lemma(&self) -> Option<&Lemma> {
        self.lemmas.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Lemma {
    pub written_form: String,
    pub part_of_speech: PartOfSpeech,
    pub pronunciations: Vec<Pronunciation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Pronunciation {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub variety: Option<String>,
    pub inner: String,
}

/// One meaning of a lexical entry, linked to a synset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Sense {
    pub id: String,
    pub synset: String,
    /// Syntactic behaviour id, from the `subcat` attribute.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub sub_cat: Option<String>,
    /// From the `adjposition` attribute.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub adj_position: Option<AdjPosition>,
    pub sense_relations: Vec<SenseRelation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SenseRelation {
    pub rel_type: SenseRelationType,
    pub target: String,
    /// From the `dc:type` attribute.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub dc_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Form {
    pub written_form: String,
}

/// A set of synonymous senses.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Synset {
    pub id: String,
    /// Interlingual index; may be empty.
    pub ili: String,
    /// Lexical entry ids, split from the whitespace-separated attribute.
    pub members: Vec<String>,
    pub part_of_speech: PartOfSpeech,
    pub lexfile: String,
    /// From the `dc:source` attribute.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub dc_source: Option<String>,
    pub definitions: Vec<Definition>,
    pub examples: Vec<Example>,
    pub ili_definitions: Vec<ILIDefinition>,
    pub synset_relations: Vec<SynsetRelation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Definition {
    pub inner: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Example {
    pub inner: String,
    /// From the `dc:source` attribute.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub dc_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ILIDefinition {
    pub inner: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SynsetRelation {
    pub rel_type: SynsetRelationType,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SyntacticBehavior {
    pub id: String,
    pub subcategorization_frame: String,
}
