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

//! Static schemas for WordNet LMF records.
//!
//! Each [`RecordSchema`] declares the element a record is read from, the
//! element it must sit under, its attributes with their value rules, and its
//! child collections with their cardinalities. Extraction and the placement
//! validator both read from these tables.
//!
//! # Checking a Node
//!
//! [`RecordSchema::check`] validates one node without descending into its
//! children: kind, attributes, and the number of children of each declared
//! kind. Extraction runs it on every node of a subtree; the placement
//! validator runs it once per yielded node.

use crate::error::ValidationError;
use crate::extract::ExtractOptions;
use crate::types::{AdjPosition, PartOfSpeech, SenseRelationType, SynsetRelationType};
use std::fmt;
use wnlmf_stream::Node;

/// Constraint on an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRule {
    /// Any string, including the empty one.
    Text,
    /// Any string except the empty one.
    NonEmpty,
    /// One of a closed vocabulary.
    OneOf(&'static [&'static str]),
}

/// An attribute declared by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name on the record.
    pub field: &'static str,
    /// Attribute name in the XML.
    pub attribute: &'static str,
    pub required: bool,
    pub rule: ValueRule,
}

/// How many children of one kind a record accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    ExactlyOne,
    AtLeastOne,
    ZeroOrMore,
    Exactly(usize),
}

impl Cardinality {
    /// Whether `count` children satisfy the constraint.
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Cardinality::ExactlyOne => count == 1,
            Cardinality::AtLeastOne => count >= 1,
            Cardinality::ZeroOrMore => true,
            Cardinality::Exactly(n) => count == *n,
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::ExactlyOne => f.write_str("exactly one"),
            Cardinality::AtLeastOne => f.write_str("at least one"),
            Cardinality::ZeroOrMore => f.write_str("any number of"),
            Cardinality::Exactly(n) => write!(f, "exactly {}", n),
        }
    }
}

/// A child collection declared by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildDef {
    /// Field name on the record.
    pub field: &'static str,
    /// Element kind of the children.
    pub element: &'static str,
    pub cardinality: Cardinality,
}

/// Schema of one record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    /// Record name.
    pub record: &'static str,
    /// Element the record is read from.
    pub element: &'static str,
    /// Element the record must be a child of.
    pub parent: &'static str,
    pub fields: &'static [FieldDef],
    pub children: &'static [ChildDef],
    /// Whether the record carries the element's inner text.
    pub has_inner: bool,
}

impl RecordSchema {
    /// The field declared for an XML attribute.
    pub fn field_for_attribute(&self, attribute: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.attribute == attribute)
    }

    /// The child collection stored in `field`.
    pub fn child(&self, field: &str) -> Option<&'static ChildDef> {
        self.children.iter().find(|c| c.field == field)
    }

    /// Validate one node against this schema, without descending into
    /// children.
    pub fn check(&self, node: &Node, options: &ExtractOptions) -> Result<(), ValidationError> {
        if node.name() != self.element || !node.kind().is_element() {
            return Err(ValidationError::UnexpectedKind {
                expected: self.element,
                found: node.name().to_string(),
            });
        }

        let attributes = node.attributes();
        for (name, value) in attributes {
            match self.field_for_attribute(name) {
                Some(def) => self.check_value(def, value)?,
                None if options.strict => {
                    return Err(ValidationError::UnknownAttribute {
                        record: self.record,
                        attribute: name.clone(),
                    });
                }
                None => {
                    tracing::trace!(record = self.record, attribute = %name, "ignoring undeclared attribute");
                }
            }
        }

        if let Some(def) = self
            .fields
            .iter()
            .find(|def| def.required && !attributes.contains_key(def.attribute))
        {
            return Err(ValidationError::MissingField {
                record: self.record,
                field: def.field,
                attribute: def.attribute,
            });
        }

        for child in self.children {
            let actual = node.children_of_kind(child.element).count();
            if !child.cardinality.accepts(actual) {
                return Err(ValidationError::Cardinality {
                    record: self.record,
                    element: child.element,
                    expected: child.cardinality,
                    actual,
                });
            }
        }

        Ok(())
    }

    fn check_value(&self, def: &FieldDef, value: &str) -> Result<(), ValidationError> {
        match def.rule {
            ValueRule::Text => Ok(()),
            ValueRule::NonEmpty if value.is_empty() => Err(ValidationError::EmptyValue {
                record: self.record,
                attribute: def.attribute,
            }),
            ValueRule::NonEmpty => Ok(()),
            ValueRule::OneOf(allowed) if allowed.contains(&value) => Ok(()),
            ValueRule::OneOf(_) if !def.required && value.is_empty() => Ok(()),
            ValueRule::OneOf(allowed) => Err(ValidationError::InvalidEnumValue {
                record: self.record,
                attribute: def.attribute,
                value: value.to_string(),
                allowed,
            }),
        }
    }
}

const fn required(field: &'static str, rule: ValueRule) -> FieldDef {
    FieldDef {
        field,
        attribute: field,
        required: true,
        rule,
    }
}

const fn optional(field: &'static str, attribute: &'static str, rule: ValueRule) -> FieldDef {
    FieldDef {
        field,
        attribute,
        required: false,
        rule,
    }
}

const fn children(field: &'static str, element: &'static str, cardinality: Cardinality) -> ChildDef {
    ChildDef {
        field,
        element,
        cardinality,
    }
}

use Cardinality::{AtLeastOne, ExactlyOne, ZeroOrMore};
use ValueRule::{NonEmpty, OneOf, Text};

/// Container element of a resource; not a record itself.
pub const LEXICAL_RESOURCE: &str = "LexicalResource";

/// Kind of the synthetic document root.
pub const DOCUMENT: &str = "@document";

pub static LEXICON: RecordSchema = RecordSchema {
    record: "Lexicon",
    element: "Lexicon",
    parent: LEXICAL_RESOURCE,
    fields: &[
        required("id", NonEmpty),
        required("label", Text),
        required("language", Text),
        required("email", Text),
        required("license", Text),
        required("version", Text),
        required("citation", Text),
        required("url", Text),
    ],
    children: &[
        children("lexicalEntries", "LexicalEntry", ZeroOrMore),
        children("synsets", "Synset", ZeroOrMore),
        children("syntacticBehaviors", "SyntacticBehaviour", ZeroOrMore),
    ],
    has_inner: false,
};

pub static LEXICAL_ENTRY: RecordSchema = RecordSchema {
    record: "LexicalEntry",
    element: "LexicalEntry",
    parent: "Lexicon",
    fields: &[required("id", NonEmpty)],
    children: &[
        children("lemmas", "Lemma", ExactlyOne),
        children("senses", "Sense", AtLeastOne),
        children("forms", "Form", ZeroOrMore),
    ],
    has_inner: false,
};

pub static LEMMA: RecordSchema = RecordSchema {
    record: "Lemma",
    element: "Lemma",
    parent: "LexicalEntry",
    fields: &[
        required("writtenForm", Text),
        required("partOfSpeech", OneOf(PartOfSpeech::VALUES)),
    ],
    children: &[children("pronunciations", "Pronunciation", ZeroOrMore)],
    has_inner: false,
};

pub static PRONUNCIATION: RecordSchema = RecordSchema {
    record: "Pronunciation",
    element: "Pronunciation",
    parent: "Lemma",
    fields: &[optional("variety", "variety", Text)],
    children: &[],
    has_inner: true,
};

pub static SENSE: RecordSchema = RecordSchema {
    record: "Sense",
    element: "Sense",
    parent: "LexicalEntry",
    fields: &[
        required("id", NonEmpty),
        required("synset", NonEmpty),
        optional("subCat", "subcat", Text),
        optional("adjPosition", "adjposition", OneOf(AdjPosition::VALUES)),
    ],
    children: &[children("senseRelations", "SenseRelation", ZeroOrMore)],
    has_inner: false,
};

pub static SENSE_RELATION: RecordSchema = RecordSchema {
    record: "SenseRelation",
    element: "SenseRelation",
    parent: "Sense",
    fields: &[
        required("relType", OneOf(SenseRelationType::VALUES)),
        required("target", NonEmpty),
        optional("dcType", "dc:type", Text),
    ],
    children: &[],
    has_inner: false,
};

pub static FORM: RecordSchema = RecordSchema {
    record: "Form",
    element: "Form",
    parent: "LexicalEntry",
    fields: &[required("writtenForm", Text)],
    children: &[],
    has_inner: false,
};

pub static SYNSET: RecordSchema = RecordSchema {
    record: "Synset",
    element: "Synset",
    parent: "Lexicon",
    fields: &[
        required("id", NonEmpty),
        required("ili", Text),
        required("members", Text),
        required("partOfSpeech", OneOf(PartOfSpeech::VALUES)),
        required("lexfile", Text),
        optional("dcSource", "dc:source", Text),
    ],
    children: &[
        children("definitions", "Definition", AtLeastOne),
        children("examples", "Example", ZeroOrMore),
        children("iliDefinitions", "ILIDefinition", ZeroOrMore),
        children("synsetRelations", "SynsetRelation", ZeroOrMore),
    ],
    has_inner: false,
};

pub static DEFINITION: RecordSchema = RecordSchema {
    record: "Definition",
    element: "Definition",
    parent: "Synset",
    fields: &[],
    children: &[],
    has_inner: true,
};

pub static EXAMPLE: RecordSchema = RecordSchema {
    record: "Example",
    element: "Example",
    parent: "Synset",
    fields: &[optional("dcSource", "dc:source", Text)],
    children: &[],
    has_inner: true,
};

pub static ILI_DEFINITION: RecordSchema = RecordSchema {
    record: "ILIDefinition",
    element: "ILIDefinition",
    parent: "Synset",
    fields: &[],
    children: &[],
    has_inner: true,
};

pub static SYNSET_RELATION: RecordSchema = RecordSchema {
    record: "SynsetRelation",
    element: "SynsetRelation",
    parent: "Synset",
    fields: &[
        required("relType", OneOf(SynsetRelationType::VALUES)),
        required("target", NonEmpty),
    ],
    children: &[],
    has_inner: false,
};

pub static SYNTACTIC_BEHAVIOR: RecordSchema = RecordSchema {
    record: "SyntacticBehavior",
    element: "SyntacticBehaviour",
    parent: "Lexicon",
    fields: &[
        required("id", NonEmpty),
        required("subcategorizationFrame", Text),
    ],
    children: &[],
    has_inner: false,
};

/// Every record schema, parents before children.
pub static ALL: [&RecordSchema; 13] = [
    &LEXICON,
    &LEXICAL_ENTRY,
    &LEMMA,
    &PRONUNCIATION,
    &SENSE,
    &SENSE_RELATION,
    &FORM,
    &SYNSET,
    &DEFINITION,
    &EXAMPLE,
    &ILI_DEFINITION,
    &SYNSET_RELATION,
    &SYNTACTIC_BEHAVIOR,
];

/// The schema of the record read from `element`.
pub fn for_element(element: &str) -> Option<&'static RecordSchema> {
    ALL.iter().copied().find(|s| s.element == element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use wnlmf_stream::TreeParser;

    fn node(xml: &str, name: &str) -> Node {
        TreeParser::new(Cursor::new(xml))
            .map(|e| e.unwrap().into_node())
            .find(|n| n.name() == name)
            .unwrap()
    }

    #[test]
    fn test_cardinality_accepts() {
        assert!(ExactlyOne.accepts(1));
        assert!(!ExactlyOne.accepts(0));
        assert!(!ExactlyOne.accepts(2));
        assert!(AtLeastOne.accepts(5));
        assert!(!AtLeastOne.accepts(0));
        assert!(ZeroOrMore.accepts(0));
        assert!(Cardinality::Exactly(2).accepts(2));
        assert!(!Cardinality::Exactly(2).accepts(3));
    }

    #[test]
    fn test_schema_table_consistency() {
        for schema in ALL {
            assert_eq!(for_element(schema.element), Some(schema));
            for child in schema.children {
                let child_schema = for_element(child.element).unwrap();
                assert_eq!(child_schema.parent, schema.element);
            }
        }
        assert_eq!(for_element("SyntacticBehaviour").unwrap().record, "SyntacticBehavior");
        assert!(for_element("SyntacticBehavior").is_none());
        assert!(for_element(LEXICAL_RESOURCE).is_none());
    }

    #[test]
    fn test_renamed_attributes() {
        assert_eq!(SENSE.field_for_attribute("subcat").unwrap().field, "subCat");
        assert_eq!(SENSE.field_for_attribute("adjposition").unwrap().field, "adjPosition");
        assert_eq!(SENSE_RELATION.field_for_attribute("dc:type").unwrap().field, "dcType");
        assert_eq!(SYNSET.field_for_attribute("dc:source").unwrap().field, "dcSource");
        assert!(SENSE.field_for_attribute("subCat").is_none());
    }

    #[test]
    fn test_check_accepts_valid_node() {
        let n = node(r#"<Form writtenForm="colour"/>"#, "Form");
        assert!(FORM.check(&n, &ExtractOptions::default()).is_ok());
    }

    #[test]
    fn test_check_unknown_attribute_strict_and_lenient() {
        let n = node(r#"<Form writtenForm="colour" script="Latn"/>"#, "Form");
        let err = FORM.check(&n, &ExtractOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownAttribute {
                record: "Form",
                attribute: "script".into()
            }
        );
        assert!(FORM.check(&n, &ExtractOptions::lenient()).is_ok());
    }

    #[test]
    fn test_check_empty_optional_enumeration() {
        let n = node(r#"<Sense id="s1" synset="x" adjposition=""/>"#, "Sense");
        assert!(SENSE.check(&n, &ExtractOptions::default()).is_ok());

        let n = node(r#"<Lemma writtenForm="cat" partOfSpeech=""/>"#, "Lemma");
        assert!(matches!(
            LEMMA.check(&n, &ExtractOptions::default()),
            Err(ValidationError::InvalidEnumValue { attribute: "partOfSpeech", .. })
        ));
    }

    #[test]
    fn test_check_missing_and_empty() {
        let n = node(r#"<Sense id="s1"/>"#, "Sense");
        assert!(matches!(
            SENSE.check(&n, &ExtractOptions::default()),
            Err(ValidationError::MissingField { field: "synset", .. })
        ));

        let n = node(r#"<Sense id="" synset="x"/>"#, "Sense");
        assert!(matches!(
            SENSE.check(&n, &ExtractOptions::default()),
            Err(ValidationError::EmptyValue { attribute: "id", .. })
        ));
    }

    #[test]
    fn test_check_enum_rule() {
        let n = node(r#"<Lemma writtenForm="cat" partOfSpeech="q"/>"#, "Lemma");
        let err = LEMMA.check(&n, &ExtractOptions::lenient()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEnumValue { value, .. } if value == "q"));
    }

    #[test]
    fn test_check_cardinality_is_shallow() {
        let xml = r#"<LexicalEntry id="e"><Sense id="s" synset="ss"/></LexicalEntry>"#;
        let n = node(xml, "LexicalEntry");
        assert!(matches!(
            LEXICAL_ENTRY.check(&n, &ExtractOptions::default()),
            Err(ValidationError::Cardinality {
                element: "Lemma",
                actual: 0,
                ..
            })
        ));

        // A broken grandchild is not looked at.
        let xml = r#"<LexicalEntry id="e"><Lemma writtenForm="w" partOfSpeech="n"/><Sense id="" synset="ss"/></LexicalEntry>"#;
        let n = node(xml, "LexicalEntry");
        assert!(LEXICAL_ENTRY.check(&n, &ExtractOptions::default()).is_ok());
    }

    #[test]
    fn test_check_wrong_kind() {
        let n = node(r#"<Form writtenForm="x"/>"#, "Form");
        assert!(matches!(
            LEMMA.check(&n, &ExtractOptions::default()),
            Err(ValidationError::UnexpectedKind { expected: "Lemma", .. })
        ));
    }
}
