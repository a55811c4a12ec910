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

//! Typed record extraction from parsed nodes.
//!
//! Every record implements [`FromNode`]: the node is checked against the
//! record's schema, child collections are extracted recursively, and the
//! record is built only when the whole subtree is valid. A failing child
//! fails its parent with a [`ValidationError::Nested`] naming the parent and
//! the child's position among its siblings of the same kind.
//!
//! # Example
//!
//! ```rust
//! use wnlmf_core::{ExtractOptions, FromNode, Synset};
//! use wnlmf_stream::TreeParser;
//! use std::io::Cursor;
//!
//! let xml = r#"<Synset id="s1" ili="i1" members="e1 e2" partOfSpeech="n" lexfile="noun.Tops">
//!     <Definition>an entity</Definition>
//! </Synset>"#;
//!
//! let node = TreeParser::new(Cursor::new(xml))
//!     .map(|e| e.unwrap().into_node())
//!     .find(|n| n.name() == "Synset")
//!     .unwrap();
//!
//! let synset = Synset::from_node(&node, &ExtractOptions::default()).unwrap();
//! assert_eq!(synset.members, ["e1", "e2"]);
//! assert_eq!(synset.definitions[0].inner, "an entity");
//! ```

use crate::error::ValidationError;
use crate::records::*;
use crate::schema::{self, RecordSchema};
use crate::types::ParseEnumError;
use std::str::FromStr;
use wnlmf_stream::Node;

/// Extraction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Reject attributes that no field declares.
    pub strict: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl ExtractOptions {
    /// Ignore undeclared attributes; every other rule still applies.
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

/// A record that can be read from a parsed node.
pub trait FromNode: Sized {
    /// Schema the node is validated against.
    const SCHEMA: &'static RecordSchema;

    /// Validate `node` and its subtree and build the record.
    fn from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ValidationError>;
}

/// A node that passed its schema check, with typed accessors.
struct Fields<'a> {
    schema: &'static RecordSchema,
    node: &'a Node,
    options: &'a ExtractOptions,
}

impl<'a> Fields<'a> {
    fn new(
        schema: &'static RecordSchema,
        node: &'a Node,
        options: &'a ExtractOptions,
    ) -> Result<Self, ValidationError> {
        schema.check(node, options)?;
        Ok(Self {
            schema,
            node,
            options,
        })
    }

    /// Required attribute. Presence was checked by the schema.
    fn text(&self, attribute: &'static str) -> Result<String, ValidationError> {
        self.optional(attribute)
            .ok_or(ValidationError::MissingField {
                record: self.schema.record,
                field: attribute,
                attribute,
            })
    }

    fn optional(&self, attribute: &str) -> Option<String> {
        self.node.attribute(attribute).map(str::to_string)
    }

    fn enumeration<T>(&self, attribute: &'static str) -> Result<T, ValidationError>
    where
        T: FromStr<Err = ParseEnumError>,
    {
        let value = self.text(attribute)?;
        self.parse(attribute, &value)
    }

    fn optional_enumeration<T>(&self, attribute: &'static str) -> Result<Option<T>, ValidationError>
    where
        T: FromStr<Err = ParseEnumError>,
    {
        // An empty optional enumeration counts as absent.
        self.optional(attribute)
            .filter(|value| !value.is_empty())
            .map(|value| self.parse(attribute, &value))
            .transpose()
    }

    fn parse<T>(&self, attribute: &'static str, value: &str) -> Result<T, ValidationError>
    where
        T: FromStr<Err = ParseEnumError>,
    {
        let allowed: &'static [&'static str] = match self
            .schema
            .field_for_attribute(attribute)
            .map(|f| f.rule)
        {
            Some(schema::ValueRule::OneOf(allowed)) => allowed,
            _ => &[],
        };
        value
            .parse()
            .map_err(|err: ParseEnumError| ValidationError::InvalidEnumValue {
                record: self.schema.record,
                attribute,
                value: err.value,
                allowed,
            })
    }

    fn inner(&self) -> String {
        debug_assert!(self.schema.has_inner, "{} carries no text", self.schema.record);
        self.node.inner_text()
    }

    /// Extract every child of the collection stored in `field`.
    fn children<T: FromNode>(&self, field: &str) -> Result<Vec<T>, ValidationError> {
        let element = self
            .schema
            .child(field)
            .map_or(T::SCHEMA.element, |def| def.element);
        self.node
            .children_of_kind(element)
            .enumerate()
            .map(|(index, child)| {
                T::from_node(child, self.options)
                    .map_err(|err| ValidationError::nested(self.schema.record, index, err))
            })
            .collect()
    }
}

impl FromNode for Lexicon {
    const SCHEMA: &'static RecordSchema = &schema::LEXICON;

    fn from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ValidationError> {
        let f = Fields::new(Self::SCHEMA, node, options)?;
        Ok(Lexicon {
            id: f.text("id")?,
            label: f.text("label")?,
            language: f.text("language")?,
            email: f.text("email")?,
            license: f.text("license")?,
            version: f.text("version")?,
            citation: f.text("citation")?,
            url: f.text("url")?,
            lexical_entries: f.children("lexicalEntries")?,
            synsets: f.children("synsets")?,
            syntactic_behaviors: f.children("syntacticBehaviors")?,
        })
    }
}

impl FromNode for LexicalEntry {
    const SCHEMA: &'static RecordSchema = &schema::LEXICAL_ENTRY;

    fn from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ValidationError> {
        let f = Fields::new(Self::SCHEMA, node, options)?;
        Ok(LexicalEntry {
            id: f.text("id")?,
            lemmas: f.children("lemmas")?,
            senses: f.children("senses")?,
            forms: f.children("forms")?,
        })
    }
}

impl FromNode for Lemma {
    const SCHEMA: &'static RecordSchema = &schema::LEMMA;

    fn from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ValidationError> {
        let f = Fields::new(Self::SCHEMA, node, options)?;
        Ok(Lemma {
            written_form: f.text("writtenForm")?,
            part_of_speech: f.enumeration("partOfSpeech")?,
            pronunciations: f.children("pronunciations")?,
        })
    }
}

impl FromNode for Pronunciation {
    const SCHEMA: &'static RecordSchema = &schema::PRONUNCIATION;

    fn from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ValidationError> {
        let f = Fields::new(Self::SCHEMA, node, options)?;
        Ok(Pronunciation {
            variety: f.optional("variety"),
            inner: f.inner(),
        })
    }
}

impl FromNode for Sense {
    const SCHEMA: &'static RecordSchema = &schema::SENSE;

    fn from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ValidationError> {
        let f = Fields::new(Self::SCHEMA, node, options)?;
        Ok(Sense {
            id: f.text("id")?,
            synset: f.text("synset")?,
            sub_cat: f.optional("subcat"),
            adj_position: f.optional_enumeration("adjposition")?,
            sense_relations: f.children("senseRelations")?,
        })
    }
}

impl FromNode for SenseRelation {
    const SCHEMA: &'static RecordSchema = &schema::SENSE_RELATION;

    fn from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ValidationError> {
        let f = Fields::new(Self::SCHEMA, node, options)?;
        Ok(SenseRelation {
            rel_type: f.enumeration("relType")?,
            target: f.text("target")?,
            dc_type: f.optional("dc:type"),
        })
    }
}

impl FromNode for Form {
    const SCHEMA: &'static RecordSchema = &schema::FORM;

    fn from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ValidationError> {
        let f = Fields::new(Self::SCHEMA, node, options)?;
        Ok(Form {
            written_form: f.text("writtenForm")?,
        })
    }
}

impl FromNode for Synset {
    const SCHEMA: &'static RecordSchema = &schema::SYNSET;

    fn from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ValidationError> {
        let f = Fields::new(Self::SCHEMA, node, options)?;
        Ok(Synset {
            id: f.text("id")?,
            ili: f.text("ili")?,
            members: f
                .text("members")?
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            part_of_speech: f.enumeration("partOfSpeech")?,
            lexfile: f.text("lexfile")?,
            dc_source: f.optional("dc:source"),
            definitions: f.children("definitions")?,
            examples: f.children("examples")?,
            ili_definitions: f.children("iliDefinitions")?,
            synset_relations: f.children("synsetRelations")?,
        })
    }
}

impl FromNode for Definition {
    const SCHEMA: &'static RecordSchema = &schema::DEFINITION;

    fn from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ValidationError> {
        let f = Fields::new(Self::SCHEMA, node, options)?;
        Ok(Definition { inner: f.inner() })
    }
}

impl FromNode for Example {
    const SCHEMA: &'static RecordSchema = &schema::EXAMPLE;

    fn from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ValidationError> {
        let f = Fields::new(Self::SCHEMA, node, options)?;
        Ok(Example {
            inner: f.inner(),
            dc_source: f.optional("dc:source"),
        })
    }
}

impl FromNode for ILIDefinition {
    const SCHEMA: &'static RecordSchema = &schema::ILI_DEFINITION;

    fn from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ValidationError> {
        let f = Fields::new(Self::SCHEMA, node, options)?;
        Ok(ILIDefinition { inner: f.inner() })
    }
}

impl FromNode for SynsetRelation {
    const SCHEMA: &'static RecordSchema = &schema::SYNSET_RELATION;

    fn from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ValidationError> {
        let f = Fields::new(Self::SCHEMA, node, options)?;
        Ok(SynsetRelation {
            rel_type: f.enumeration("relType")?,
            target: f.text("target")?,
        })
    }
}

impl FromNode for SyntacticBehavior {
    const SCHEMA: &'static RecordSchema = &schema::SYNTACTIC_BEHAVIOR;

    fn from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ValidationError> {
        let f = Fields::new(Self::SCHEMA, node, options)?;
        Ok(SyntacticBehavior {
            id: f.text("id")?,
            subcategorization_frame: f.text("subcategorizationFrame")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;
    use std::io::Cursor;
    use wnlmf_stream::TreeParser;

    fn node(xml: &str, name: &str) -> Node {
        TreeParser::new(Cursor::new(xml))
            .map(|e| e.unwrap().into_node())
            .find(|n| n.name() == name)
            .unwrap()
    }

    fn strict() -> ExtractOptions {
        ExtractOptions::default()
    }

    #[test]
    fn test_options_default_strict() {
        assert!(ExtractOptions::default().strict);
        assert!(!ExtractOptions::lenient().strict);
    }

    #[test]
    fn test_pronunciation() {
        let n = node(r#"<Pronunciation variety="GB">ˈkæt</Pronunciation>"#, "Pronunciation");
        let p = Pronunciation::from_node(&n, &strict()).unwrap();
        assert_eq!(p.variety.as_deref(), Some("GB"));
        assert_eq!(p.inner, "ˈkæt");

        let n = node("<Pronunciation>kat</Pronunciation>", "Pronunciation");
        assert_eq!(Pronunciation::from_node(&n, &strict()).unwrap().variety, None);
    }

    #[test]
    fn test_lemma_with_pronunciations() {
        let xml = r#"<Lemma writtenForm="cat" partOfSpeech="n">
            <Pronunciation>kat</Pronunciation>
            <Pronunciation variety="US">kæt</Pronunciation>
        </Lemma>"#;
        let lemma = Lemma::from_node(&node(xml, "Lemma"), &strict()).unwrap();
        assert_eq!(lemma.written_form, "cat");
        assert_eq!(lemma.part_of_speech, PartOfSpeech::Noun);
        assert_eq!(lemma.pronunciations.len(), 2);
        assert_eq!(lemma.pronunciations[1].variety.as_deref(), Some("US"));
    }

    #[test]
    fn test_sense_renames() {
        let xml = r#"<Sense id="s1" synset="ss1" subcat="vtai" adjposition="ip">
            <SenseRelation relType="other" dc:type="agent" target="s2"/>
        </Sense>"#;
        let sense = Sense::from_node(&node(xml, "Sense"), &strict()).unwrap();
        assert_eq!(sense.sub_cat.as_deref(), Some("vtai"));
        assert_eq!(sense.adj_position, Some(AdjPosition::ImmediatePostnominal));
        assert_eq!(sense.sense_relations[0].rel_type, SenseRelationType::Other);
        assert_eq!(sense.sense_relations[0].dc_type.as_deref(), Some("agent"));
        assert_eq!(sense.sense_relations[0].target, "s2");
    }

    #[test]
    fn test_sense_optional_absent() {
        let sense = Sense::from_node(&node(r#"<Sense id="s1" synset="ss1"/>"#, "Sense"), &strict()).unwrap();
        assert_eq!(sense.sub_cat, None);
        assert_eq!(sense.adj_position, None);
        assert!(sense.sense_relations.is_empty());
    }

    #[test]
    fn test_empty_adjposition_is_absent() {
        let n = node(r#"<Sense id="s1" synset="ss1" adjposition=""/>"#, "Sense");
        let sense = Sense::from_node(&n, &strict()).unwrap();
        assert_eq!(sense.adj_position, None);
    }

    #[test]
    fn test_invalid_adjposition() {
        let n = node(r#"<Sense id="s1" synset="ss1" adjposition="x"/>"#, "Sense");
        let err = Sense::from_node(&n, &strict()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEnumValue { attribute: "adjposition", .. }));
    }

    #[test]
    fn test_synset_members_split() {
        let xml = r#"<Synset id="s" ili="" members="a  b
            c" partOfSpeech="v" lexfile="verb.motion" dc:source="PWN">
            <Definition>move</Definition>
            <Example dc:source="Corpus">he moved</Example>
            <ILIDefinition>to move</ILIDefinition>
            <SynsetRelation relType="hypernym" target="t"/>
        </Synset>"#;
        let synset = Synset::from_node(&node(xml, "Synset"), &strict()).unwrap();
        assert_eq!(synset.members, ["a", "b", "c"]);
        assert_eq!(synset.ili, "");
        assert_eq!(synset.dc_source.as_deref(), Some("PWN"));
        assert_eq!(synset.examples[0].dc_source.as_deref(), Some("Corpus"));
        assert_eq!(synset.ili_definitions[0].inner, "to move");
        assert_eq!(synset.synset_relations[0].rel_type, SynsetRelationType::Hypernym);
    }

    #[test]
    fn test_synset_requires_definition() {
        let xml = r#"<Synset id="s" ili="" members="a" partOfSpeech="n" lexfile="noun.Tops"/>"#;
        let err = Synset::from_node(&node(xml, "Synset"), &strict()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Cardinality {
                element: "Definition",
                actual: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_lexical_entry_two_lemmas() {
        let xml = r#"<LexicalEntry id="e">
            <Lemma writtenForm="a" partOfSpeech="n"/>
            <Lemma writtenForm="b" partOfSpeech="n"/>
            <Sense id="s" synset="ss"/>
        </LexicalEntry>"#;
        let err = LexicalEntry::from_node(&node(xml, "LexicalEntry"), &strict()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Cardinality {
                element: "Lemma",
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_nested_failure_names_parent_and_index() {
        let xml = r#"<LexicalEntry id="e">
            <Lemma writtenForm="a" partOfSpeech="n"/>
            <Sense id="s1" synset="ss"/>
            <Sense id="s2" synset="ss">
                <SenseRelation relType="hypernym" target="s1"/>
            </Sense>
        </LexicalEntry>"#;
        let err = LexicalEntry::from_node(&node(xml, "LexicalEntry"), &strict()).unwrap_err();
        assert_eq!(err.path(), vec![("LexicalEntry", 1), ("Sense", 0)]);
        assert!(matches!(
            err.root_cause(),
            ValidationError::InvalidEnumValue { value, .. } if value == "hypernym"
        ));
    }

    #[test]
    fn test_unknown_attribute_lenient() {
        let xml = r#"<Lemma writtenForm="a" partOfSpeech="n" script="Latn"/>"#;
        let n = node(xml, "Lemma");
        assert!(matches!(
            Lemma::from_node(&n, &strict()),
            Err(ValidationError::UnknownAttribute { .. })
        ));
        let lemma = Lemma::from_node(&n, &ExtractOptions::lenient()).unwrap();
        assert_eq!(lemma.written_form, "a");
    }

    #[test]
    fn test_lenient_keeps_other_rules() {
        let n = node(r#"<Lemma writtenForm="a" extra="1"/>"#, "Lemma");
        assert!(matches!(
            Lemma::from_node(&n, &ExtractOptions::lenient()),
            Err(ValidationError::MissingField { field: "partOfSpeech", .. })
        ));
    }

    #[test]
    fn test_syntactic_behaviour() {
        let xml = r#"<SyntacticBehaviour id="vtai" subcategorizationFrame="Somebody ----s something"/>"#;
        let sb = SyntacticBehavior::from_node(&node(xml, "SyntacticBehaviour"), &strict()).unwrap();
        assert_eq!(sb.id, "vtai");
        assert_eq!(sb.subcategorization_frame, "Somebody ----s something");
    }

    #[test]
    fn test_wrong_node_kind() {
        let n = node(r#"<Form writtenForm="x"/>"#, "Form");
        assert!(matches!(
            Definition::from_node(&n, &strict()),
            Err(ValidationError::UnexpectedKind { .. })
        ));
    }

    #[test]
    fn test_definition_with_markup_and_entities() {
        let xml = "<Definition>salt &amp; pepper <![CDATA[<b>]]></Definition>";
        let d = Definition::from_node(&node(xml, "Definition"), &strict()).unwrap();
        assert_eq!(d.inner, "salt & pepper <b>");
    }
}
