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

//! Closed vocabularies of WordNet LMF.
//!
//! Every enumeration converts to and from the exact string used in the XML
//! and lists its accepted strings in `VALUES`, which the schema layer uses
//! for validation.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A string that is not a member of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {vocabulary}")]
pub struct ParseEnumError {
    pub vocabulary: &'static str,
    pub value: String,
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $s:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[cfg_attr(feature = "serde", serde(rename = $s))]
                $variant,
            )+
        }

        impl $name {
            /// Accepted XML strings, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($s),+];

            /// The XML string for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $s, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $s => Ok($name::$variant), )+
                    _ => Err(ParseEnumError {
                        vocabulary: $label,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Part of speech of a lemma or synset.
    PartOfSpeech, "part of speech" {
        Noun => "n",
        Verb => "v",
        Adjective => "a",
        Adverb => "r",
        /// Adjective satellite.
        AdjectiveSatellite => "s",
        Conjunction => "c",
        /// Preposition, postposition and the like.
        Adposition => "p",
        /// Particles, classifiers, bound morphemes, determiners.
        Other => "x",
        Unknown => "u",
    }
}

vocabulary! {
    /// Syntactic position of an adjective sense.
    AdjPosition, "adjective position" {
        Attributive => "a",
        Predicative => "p",
        ImmediatePostnominal => "ip",
    }
}

vocabulary! {
    /// Relation between two senses.
    SenseRelationType, "sense relation type" {
        Also => "also",
        Antonym => "antonym",
        Derivation => "derivation",
        DomainMemberRegion => "domain_member_region",
        DomainMemberTopic => "domain_member_topic",
        DomainRegion => "domain_region",
        DomainTopic => "domain_topic",
        Exemplifies => "exemplifies",
        IsExemplifiedBy => "is_exemplified_by",
        /// Refined by the relation's `dc:type`.
        Other => "other",
        Participle => "participle",
        Pertainym => "pertainym",
        Similar => "similar",
    }
}

vocabulary! {
    /// Relation between two synsets.
    SynsetRelationType, "synset relation type" {
        Hypernym => "hypernym",
        Hyponym => "hyponym",
        InstanceHypernym => "instance_hypernym",
        InstanceHyponym => "instance_hyponym",
        PartHolonym => "part_holonym",
        PartMeronym => "part_meronym",
        MemberHolonym => "member_holonym",
        MemberMeronym => "member_meronym",
        SubstanceHolonym => "substance_holonym",
        SubstanceMeronym => "substance_meronym",
        Entail => "entail",
        Cause => "cause",
        Similar => "similar",
        Also => "also",
        Attribute => "attribute",
        DomainTopic => "domain_topic",
        DomainMemberTopic => "domain_member_topic",
        DomainRegion => "domain_region",
        DomainMemberRegion => "domain_member_region",
        Exemplifies => "exemplifies",
        IsExemplifiedBy => "is_exemplified_by",
        HoloPart => "holo_part",
        MeroPart => "mero_part",
        HasDomainTopic => "has_domain_topic",
        MeroSubstance => "mero_substance",
        HoloMember => "holo_member",
        HoloSubstance => "holo_substance",
        MeroMember => "mero_member",
        IsEntailedBy => "is_entailed_by",
        Entails => "entails",
        Causes => "causes",
        IsCausedBy => "is_caused_by",
        HasDomainRegion => "has_domain_region",
    }
}
