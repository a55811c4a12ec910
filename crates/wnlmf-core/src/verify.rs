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

//! Referential checks over an extracted lexicon.
//!
//! Extraction only checks that identifiers are well formed. This pass checks
//! that every reference points at a record of the right kind:
//!
//! | Reference | Must resolve to |
//! |---|---|
//! | `Sense.synset` | a synset |
//! | `Sense.subCat` | a syntactic behaviour |
//! | `SenseRelation.target` | a sense |
//! | `Synset.members` | a lexical entry |
//! | `SynsetRelation.target` | a synset |
//!
//! Problems are reported as data in a [`ReferenceReport`], not as errors.

use crate::records::Lexicon;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// A set of identifiers of one record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Registry {
    Synsets,
    Senses,
    LexicalEntries,
    SyntacticBehaviors,
}

impl Registry {
    pub const ALL: [Registry; 4] = [
        Registry::Synsets,
        Registry::Senses,
        Registry::LexicalEntries,
        Registry::SyntacticBehaviors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Registry::Synsets => "synsets",
            Registry::Senses => "senses",
            Registry::LexicalEntries => "lexical entries",
            Registry::SyntacticBehaviors => "syntactic behaviours",
        }
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A kind of identifier reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReferenceKind {
    SenseSynset,
    SenseSubCat,
    SenseRelationTarget,
    SynsetMember,
    SynsetRelationTarget,
}

impl ReferenceKind {
    /// The registry this reference must resolve in.
    pub fn target(&self) -> Registry {
        match self {
            ReferenceKind::SenseSynset => Registry::Synsets,
            ReferenceKind::SenseSubCat => Registry::SyntacticBehaviors,
            ReferenceKind::SenseRelationTarget => Registry::Senses,
            ReferenceKind::SynsetMember => Registry::LexicalEntries,
            ReferenceKind::SynsetRelationTarget => Registry::Synsets,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::SenseSynset => "Sense.synset",
            ReferenceKind::SenseSubCat => "Sense.subCat",
            ReferenceKind::SenseRelationTarget => "SenseRelation.target",
            ReferenceKind::SynsetMember => "Synset.members",
            ReferenceKind::SynsetRelationTarget => "SynsetRelation.target",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference that does not resolve in its allowed registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub kind: ReferenceKind,
    /// Id of the record holding the reference.
    pub source: String,
    pub target: String,
    /// Other registries the target does resolve in.
    pub misdirected_to: Vec<Registry>,
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' of '{}' is not among {}",
            self.kind,
            self.target,
            self.source,
            self.kind.target()
        )?;
        if !self.misdirected_to.is_empty() {
            let names: Vec<_> = self.misdirected_to.iter().map(Registry::as_str).collect();
            write!(f, " (found among {})", names.join(", "))?;
        }
        Ok(())
    }
}

/// Outcome of [`verify_references`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceReport {
    /// Number of references checked.
    pub checked: usize,
    pub unresolved: Vec<UnresolvedReference>,
    /// Every (reference kind, registry) pair for which at least one
    /// reference resolved.
    pub relationships: BTreeSet<(ReferenceKind, Registry)>,
}

impl ReferenceReport {
    /// Relationships outside the allowed table.
    pub fn disallowed(&self) -> impl Iterator<Item = &(ReferenceKind, Registry)> {
        self.relationships
            .iter()
            .filter(|(kind, registry)| kind.target() != *registry)
    }

    /// Whether every reference resolved, and only in its allowed registry.
    pub fn is_closed(&self) -> bool {
        self.unresolved.is_empty() && self.disallowed().next().is_none()
    }
}

struct Registries<'a> {
    synsets: HashSet<&'a str>,
    senses: HashSet<&'a str>,
    lexical_entries: HashSet<&'a str>,
    syntactic_behaviors: HashSet<&'a str>,
}

impl<'a> Registries<'a> {
    fn collect(lexicon: &'a Lexicon) -> Self {
        Self {
            synsets: lexicon.synsets.iter().map(|s| s.id.as_str()).collect(),
            senses: lexicon
                .lexical_entries
                .iter()
                .flat_map(|e| &e.senses)
                .map(|s| s.id.as_str())
                .collect(),
            lexical_entries: lexicon.lexical_entries.iter().map(|e| e.id.as_str()).collect(),
            syntactic_behaviors: lexicon
                .syntactic_behaviors
                .iter()
                .map(|s| s.id.as_str())
                .collect(),
        }
    }

    fn get(&self, registry: Registry) -> &HashSet<&'a str> {
        match registry {
            Registry::Synsets => &self.synsets,
            Registry::Senses => &self.senses,
            Registry::LexicalEntries => &self.lexical_entries,
            Registry::SyntacticBehaviors => &self.syntactic_behaviors,
        }
    }
}

struct Verifier<'a> {
    registries: Registries<'a>,
    report: ReferenceReport,
}

impl Verifier<'_> {
    fn check(&mut self, kind: ReferenceKind, source: &str, target: &str) {
        self.report.checked += 1;

        let found: Vec<Registry> = Registry::ALL
            .into_iter()
            .filter(|r| self.registries.get(*r).contains(target))
            .collect();
        for registry in &found {
            self.report.relationships.insert((kind, *registry));
        }

        if !found.contains(&kind.target()) {
            self.report.unresolved.push(UnresolvedReference {
                kind,
                source: source.to_string(),
                target: target.to_string(),
                misdirected_to: found,
            });
        }
    }
}

/// Check every identifier reference in `lexicon`.
///
/// # Examples
///
/// ```rust
/// use wnlmf_core::verify::{verify_references, ReferenceKind};
/// use wnlmf_core::Lexicon;
///
/// let lexicon = Lexicon {
///     id: "x".into(),
///     label: String::new(),
///     language: "en".into(),
///     email: String::new(),
///     license: String::new(),
///     version: "1".into(),
///     citation: String::new(),
///     url: String::new(),
///     lexical_entries: vec![],
///     synsets: vec![],
///     syntactic_behaviors: vec![],
/// };
/// let report = verify_references(&lexicon);
/// assert!(report.is_closed());
/// assert_eq!(report.checked, 0);
/// ```
pub fn verify_references(lexicon: &Lexicon) -> ReferenceReport {
    let mut verifier = Verifier {
        registries: Registries::collect(lexicon),
        report: ReferenceReport::default(),
    };

    for entry in &lexicon.lexical_entries {
        for sense in &entry.senses {
            verifier.check(ReferenceKind::SenseSynset, &sense.id, &sense.synset);
            if let Some(sub_cat) = &sense.sub_cat {
                verifier.check(ReferenceKind::SenseSubCat, &sense.id, sub_cat);
            }
            for relation in &sense.sense_relations {
                verifier.check(ReferenceKind::SenseRelationTarget, &sense.id, &relation.target);
            }
        }
    }

    for synset in &lexicon.synsets {
        for member in &synset.members {
            verifier.check(ReferenceKind::SynsetMember, &synset.id, member);
        }
        for relation in &synset.synset_relations {
            verifier.check(ReferenceKind::SynsetRelationTarget, &synset.id, &relation.target);
        }
    }

    let report = verifier.report;
    tracing::debug!(
        checked = report.checked,
        unresolved = report.unresolved.len(),
        "references verified"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::*;
    use crate::types::*;

    fn sense(id: &str, synset: &str, sub_cat: Option<&str>, targets: &[&str]) -> Sense {
        Sense {
            id: id.into(),
            synset: synset.into(),
            sub_cat: sub_cat.map(Into::into),
            adj_position: None,
            sense_relations: targets
                .iter()
                .map(|t| SenseRelation {
                    rel_type: SenseRelationType::Antonym,
                    target: t.to_string(),
                    dc_type: None,
                })
                .collect(),
        }
    }

    fn entry(id: &str, senses: Vec<Sense>) -> LexicalEntry {
        LexicalEntry {
            id: id.into(),
            lemmas: vec![Lemma {
                written_form: id.into(),
                part_of_speech: PartOfSpeech::Noun,
                pronunciations: vec![],
            }],
            senses,
            forms: vec![],
        }
    }

    fn synset(id: &str, members: &[&str], targets: &[&str]) -> Synset {
        Synset {
            id: id.into(),
            ili: String::new(),
            members: members.iter().map(|m| m.to_string()).collect(),
            part_of_speech: PartOfSpeech::Noun,
            lexfile: "noun.Tops".into(),
            dc_source: None,
            definitions: vec![Definition { inner: "d".into() }],
            examples: vec![],
            ili_definitions: vec![],
            synset_relations: targets
                .iter()
                .map(|t| SynsetRelation {
                    rel_type: SynsetRelationType::Hypernym,
                    target: t.to_string(),
                })
                .collect(),
        }
    }

    fn lexicon(entries: Vec<LexicalEntry>, synsets: Vec<Synset>) -> Lexicon {
        Lexicon {
            id: "t".into(),
            label: String::new(),
            language: "en".into(),
            email: String::new(),
            license: String::new(),
            version: "1".into(),
            citation: String::new(),
            url: String::new(),
            lexical_entries: entries,
            synsets,
            syntactic_behaviors: vec![SyntacticBehavior {
                id: "vi".into(),
                subcategorization_frame: "Somebody ----s".into(),
            }],
        }
    }

    #[test]
    fn test_closed_lexicon() {
        let lex = lexicon(
            vec![
                entry("e1", vec![sense("e1-s", "ss1", Some("vi"), &["e2-s"])]),
                entry("e2", vec![sense("e2-s", "ss2", None, &[])]),
            ],
            vec![synset("ss1", &["e1"], &["ss2"]), synset("ss2", &["e2"], &[])],
        );
        let report = verify_references(&lex);
        assert!(report.is_closed());
        assert_eq!(report.checked, 7);
        assert!(report.relationships.contains(&(ReferenceKind::SenseSubCat, Registry::SyntacticBehaviors)));
        assert_eq!(report.disallowed().count(), 0);
    }

    #[test]
    fn test_dangling_reference() {
        let lex = lexicon(
            vec![entry("e1", vec![sense("e1-s", "missing", None, &[])])],
            vec![synset("ss1", &["e1"], &[])],
        );
        let report = verify_references(&lex);
        assert!(!report.is_closed());
        assert_eq!(report.unresolved.len(), 1);
        let u = &report.unresolved[0];
        assert_eq!(u.kind, ReferenceKind::SenseSynset);
        assert_eq!(u.source, "e1-s");
        assert_eq!(u.target, "missing");
        assert!(u.misdirected_to.is_empty());
        assert_eq!(u.to_string(), "Sense.synset 'missing' of 'e1-s' is not among synsets");
    }

    #[test]
    fn test_misdirected_reference() {
        // The synset relation points at a sense instead of a synset.
        let lex = lexicon(
            vec![entry("e1", vec![sense("e1-s", "ss1", None, &[])])],
            vec![synset("ss1", &["e1"], &["e1-s"])],
        );
        let report = verify_references(&lex);
        assert_eq!(report.unresolved.len(), 1);
        assert_eq!(report.unresolved[0].misdirected_to, vec![Registry::Senses]);
        assert_eq!(
            report.disallowed().collect::<Vec<_>>(),
            vec![&(ReferenceKind::SynsetRelationTarget, Registry::Senses)]
        );
        assert!(report.unresolved[0].to_string().ends_with("(found among senses)"));
    }

    #[test]
    fn test_ambiguous_id_flags_disallowed_relationship() {
        // "dup" is both a synset and a lexical entry.
        let lex = lexicon(
            vec![entry("dup", vec![sense("dup-s", "dup", None, &[])])],
            vec![synset("dup", &["dup"], &[])],
        );
        let report = verify_references(&lex);
        assert!(report.unresolved.is_empty());
        assert!(!report.is_closed());
        assert!(report
            .disallowed()
            .any(|r| *r == (ReferenceKind::SenseSynset, Registry::LexicalEntries)));
    }
}
