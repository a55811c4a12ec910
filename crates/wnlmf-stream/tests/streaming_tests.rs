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

//! Integration tests for wnlmf-stream

use std::io::{self, Cursor, Read};
use wnlmf_stream::{
    CancellationToken, Node, NodeEvent, NodeKind, ParserConfig, StreamError, Termination,
    TreeParser,
};

const LEXICON: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE LexicalResource SYSTEM "http://globalwordnet.github.io/schemas/WN-LMF-1.1.dtd">
<LexicalResource xmlns:dc="https://globalwordnet.github.io/schemas/dc/">
  <!-- sample -->
  <Lexicon id="oewn" label="Open English Wordnet" language="en" email="a@b.c"
           license="https://creativecommons.org/licenses/by/4.0" version="2023"
           citation="" url="https://github.com/globalwordnet/english-wordnet">
    <LexicalEntry id="oewn-tailor-n">
      <Lemma writtenForm="tailor" partOfSpeech="n">
        <Pronunciation variety="GB">ˈteɪlə</Pronunciation>
      </Lemma>
      <Sense id="oewn-tailor__1.18.00" synset="oewn-10701878-n"/>
    </LexicalEntry>
    <LexicalEntry id="oewn-tailor's_tack-n">
      <Lemma writtenForm="tailor's tack" partOfSpeech="n"/>
      <Sense id="oewn-tailor's_tack__1.04.00" synset="oewn-00144850-n"/>
    </LexicalEntry>
    <Synset id="oewn-10701878-n" ili="i89193" members="oewn-tailor-n" partOfSpeech="n" lexfile="noun.person">
      <Definition>a person whose occupation is making and altering garments</Definition>
    </Synset>
  </Lexicon>
</LexicalResource>
"#;

fn collect(xml: &str, config: ParserConfig) -> (Vec<NodeEvent>, Option<Termination>) {
    let mut parser = TreeParser::with_config(Cursor::new(xml), config);
    let events = parser.by_ref().collect::<Result<Vec<_>, _>>().unwrap();
    (events, parser.termination())
}

fn kinds(events: &[NodeEvent]) -> Vec<String> {
    events.iter().map(|e| e.node().kind().to_string()).collect()
}

// ==================== Ordering Tests ====================

#[test]
fn test_post_order_delivery() {
    let (events, termination) = collect(
        "<a><b><c/></b><d>x</d></a>",
        ParserConfig::default(),
    );
    assert_eq!(kinds(&events), ["c", "b", "text", "d", "a", "@document"]);
    assert_eq!(termination, Some(Termination::Complete));
}

#[test]
fn test_children_complete_when_yielded() {
    let mut parser = TreeParser::new(Cursor::new(LEXICON));
    for event in parser.by_ref() {
        let node = event.unwrap().into_node();
        if node.name() == "LexicalEntry" {
            assert_eq!(node.children().len(), 2);
            assert_eq!(node.children()[0].name(), "Lemma");
            assert_eq!(node.children()[1].name(), "Sense");
        }
    }
}

#[test]
fn test_end_of_document_is_last_and_single() {
    let (events, _) = collect(LEXICON, ParserConfig::default());
    let ends: Vec<_> = events.iter().filter(|e| e.is_end_of_document()).collect();
    assert_eq!(ends.len(), 1);
    assert!(events.last().unwrap().is_end_of_document());

    let root = events.last().unwrap().node();
    assert_eq!(root.kind(), &NodeKind::Document);
    assert!(root.parent().is_none());
    assert_eq!(root.children().len(), 1);
    assert_eq!(root.children()[0].name(), "LexicalResource");
}

#[test]
fn test_every_node_reachable_from_root() {
    fn count(node: &Node) -> usize {
        1 + node.children().iter().map(count).sum::<usize>()
    }

    let (events, _) = collect(LEXICON, ParserConfig::default());
    let root = events.last().unwrap().node().clone();
    // Every yielded node plus the root itself.
    assert_eq!(count(&root), events.len());
}

// ==================== Filtering Tests ====================

#[test]
fn test_whitespace_filtering() {
    let (events, _) = collect("<a>  <b/>  </a>", ParserConfig::default());
    let a = events.iter().find(|e| e.node().name() == "a").unwrap().node();
    assert_eq!(a.children().len(), 1);

    let (events, _) = collect(
        "<a>  <b/>  </a>",
        ParserConfig::default().with_ignore_whitespace(false),
    );
    let a = events.iter().find(|e| e.node().name() == "a").unwrap().node();
    assert_eq!(a.children().len(), 3);
    assert_eq!(a.children()[0].kind(), &NodeKind::Text);
    assert_eq!(a.children()[0].raw(), "  ");
}

#[test]
fn test_default_drops_comment_declaration_doctype() {
    let (events, _) = collect(LEXICON, ParserConfig::default());
    assert!(events.iter().all(|e| !matches!(
        e.node().kind(),
        NodeKind::Comment | NodeKind::Declaration | NodeKind::Doctype
    )));
}

#[test]
fn test_keep_all_retains_special_nodes() {
    let (events, _) = collect(LEXICON, ParserConfig::keep_all());
    let kinds = kinds(&events);
    assert_eq!(kinds[0], "declaration");
    assert!(kinds.contains(&"doctype".to_string()));
    assert!(kinds.contains(&"comment".to_string()));

    let root = events.last().unwrap().node();
    assert_eq!(root.children()[0].kind(), &NodeKind::Declaration);
    assert!(root.children()[0].raw().starts_with("<?xml"));
}

#[test]
fn test_cdata_is_attached_and_yielded() {
    let (events, _) = collect("<Example><![CDATA[a < b]]></Example>", ParserConfig::default());
    assert_eq!(kinds(&events), ["cdata", "Example", "@document"]);
    assert_eq!(events[1].node().inner_text(), "a < b");
}

// ==================== Node API Tests ====================

#[test]
fn test_attributes_and_text() {
    let mut parser = TreeParser::new(Cursor::new(LEXICON));
    let mut lemmas = Vec::new();
    let mut pronunciation = None;
    let mut root = None;
    for event in parser.by_ref() {
        let node = match event.unwrap() {
            NodeEvent::EndOfDocument(document) => {
                root = Some(document);
                continue;
            }
            NodeEvent::Node(node) => node,
        };
        match node.name() {
            "Lemma" => lemmas.push(node.attribute("writtenForm").unwrap().to_string()),
            "Pronunciation" => pronunciation = Some(node),
            _ => {}
        }
    }
    assert_eq!(lemmas, ["tailor", "tailor's tack"]);
    assert!(root.is_some());

    let pronunciation = pronunciation.unwrap();
    assert_eq!(pronunciation.inner_text(), "ˈteɪlə");
    assert_eq!(pronunciation.attribute("variety"), Some("GB"));
    assert!(pronunciation.is(&["LexicalEntry", "Lemma", "Pronunciation"]));
}

#[test]
fn test_retained_node_answers_placement_while_root_is_held() {
    let mut sense = None;
    let mut root = None;
    for event in TreeParser::new(Cursor::new(LEXICON)) {
        match event.unwrap() {
            NodeEvent::Node(node) if node.name() == "Sense" && sense.is_none() => sense = Some(node),
            NodeEvent::EndOfDocument(document) => root = Some(document),
            _ => {}
        }
    }
    let sense = sense.unwrap();

    assert!(sense.is(&["LexicalEntry", "Sense"]));
    assert_eq!(sense.parent().unwrap().name(), "LexicalEntry");

    // Without any ancestor held, the upward links are gone; the node's own
    // data and subtree stay readable.
    drop(root);
    assert!(sense.parent().is_none());
    assert!(!sense.is(&["LexicalEntry", "Sense"]));
    assert!(sense.is(&["Sense"]));
    assert!(sense.attribute("synset").is_some());
}

#[test]
fn test_parent_chain() {
    let (events, _) = collect(LEXICON, ParserConfig::default());
    let definition = events
        .iter()
        .find(|e| e.node().name() == "Definition")
        .unwrap()
        .node();
    let synset = definition.parent().unwrap();
    assert_eq!(synset.name(), "Synset");
    let lexicon = synset.parent().unwrap();
    assert_eq!(lexicon.name(), "Lexicon");
    let resource = lexicon.parent().unwrap();
    assert_eq!(resource.name(), "LexicalResource");
    let document = resource.parent().unwrap();
    assert_eq!(document.kind(), &NodeKind::Document);
    assert!(document.parent().is_none());
}

#[test]
fn test_multiline_attributes() {
    let (events, _) = collect(LEXICON, ParserConfig::default());
    let lexicon = events
        .iter()
        .find(|e| e.node().name() == "Lexicon")
        .unwrap()
        .node();
    assert_eq!(lexicon.attributes().len(), 8);
    assert_eq!(lexicon.attribute("citation"), Some(""));
    assert_eq!(lexicon.attribute("version"), Some("2023"));
}

#[test]
fn test_nodes_cross_threads() {
    let (events, _) = collect(LEXICON, ParserConfig::default());
    let root = events.last().unwrap().node().clone();
    let handle = std::thread::spawn(move || root.all(&["LexicalResource", "Lexicon", "LexicalEntry"]).len());
    assert_eq!(handle.join().unwrap(), 2);
}

// ==================== Termination Tests ====================

#[test]
fn test_truncated_input() {
    let (events, termination) = collect("<a><b/><c>", ParserConfig::default());
    assert_eq!(kinds(&events), ["b"]);
    assert_eq!(termination, Some(Termination::Truncated { open_elements: 2 }));
}

#[test]
fn test_malformed_fragment_surfaces() {
    let mut parser = TreeParser::new(Cursor::new("<a><b></a>"));
    let err = parser.find_map(Result::err).unwrap();
    assert!(matches!(err, StreamError::MalformedFragment { .. }));
    assert_eq!(parser.termination(), Some(Termination::Failed));
    assert!(parser.next().is_none());
}

#[test]
fn test_malformed_surfaces_even_when_lenient() {
    let config = ParserConfig::default().with_strict_errors(false);
    let result: Result<Vec<_>, _> =
        TreeParser::with_config(Cursor::new("<a></b>"), config).collect();
    assert!(result.is_err());
}

#[test]
fn test_cancellation_stops_quietly() {
    let token = CancellationToken::new();
    let config = ParserConfig::default().with_cancellation(token.clone());
    let mut parser = TreeParser::with_config(Cursor::new(LEXICON), config);

    let mut seen = 0;
    while let Some(event) = parser.next() {
        event.unwrap();
        seen += 1;
        if seen == 3 {
            token.cancel();
        }
    }
    assert_eq!(seen, 3);
    assert_eq!(parser.termination(), Some(Termination::Cancelled));
}

struct BrokenPipe {
    data: &'static [u8],
    offset: usize,
}

impl Read for BrokenPipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.offset >= self.data.len() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"));
        }
        let n = buf.len().min(self.data.len() - self.offset).min(4);
        buf[..n].copy_from_slice(&self.data[self.offset..self.offset + n]);
        self.offset += n;
        Ok(n)
    }
}

#[test]
fn test_transport_failure_swallowed_by_default() {
    let reader = BrokenPipe {
        data: b"<a><b/><c/>",
        offset: 0,
    };
    let mut parser = TreeParser::new(reader);
    let events: Vec<_> = parser.by_ref().collect::<Result<_, _>>().unwrap();
    assert_eq!(kinds(&events), ["b", "c"]);
    assert_eq!(parser.termination(), Some(Termination::TransportFailure));
}

#[test]
fn test_transport_failure_strict() {
    let reader = BrokenPipe {
        data: b"<a><b/>",
        offset: 0,
    };
    let config = ParserConfig::default().with_strict_errors(true);
    let mut parser = TreeParser::with_config(reader, config);
    let err = parser.find_map(Result::err).unwrap();
    assert!(matches!(err, StreamError::Io(_)));
    assert_eq!(parser.termination(), Some(Termination::TransportFailure));
}

#[test]
fn test_small_buffer_same_result() {
    let (big, _) = collect(LEXICON, ParserConfig::default());
    let (small, _) = collect(LEXICON, ParserConfig::default().with_buffer_size(16));
    assert_eq!(kinds(&big), kinds(&small));
}

#[test]
fn test_parse_from_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LEXICON.as_bytes()).unwrap();

    let reader = std::fs::File::open(file.path()).unwrap();
    let mut parser = TreeParser::new(reader);
    let synsets = parser
        .by_ref()
        .filter_map(Result::ok)
        .filter(|e| e.node().name() == "Synset")
        .count();
    assert_eq!(synsets, 1);
    assert!(parser.termination().unwrap().is_complete());
}
