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

//! Tokenizer adapter over quick-xml.
//!
//! quick-xml does the actual lexing. This module flattens its events into
//! [`Token`]s that carry the construct kind and a reconstructed raw span, and
//! sorts its failures into transport errors and malformed fragments.
//!
//! The tokenizer is exposed for advanced use cases; most callers want
//! [`TreeParser`](crate::TreeParser).

use crate::error::{StreamError, StreamResult};
use quick_xml::encoding::Decoder;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;

/// A single lexical event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Opening tag, e.g. `<Sense id="s1">`.
    Open { name: String, raw: String },
    /// Self-closing tag, e.g. `<Form writtenForm="x"/>`.
    SelfClosing { name: String, raw: String },
    /// Closing tag.
    Close { name: String },
    /// Character data, still escaped.
    Text(String),
    /// CDATA block including its delimiters.
    CData(String),
    /// Comment including its delimiters.
    Comment(String),
    /// XML declaration or processing instruction.
    Declaration(String),
    /// Document type declaration.
    Doctype(String),
    /// End of input.
    Eof,
}

/// Pull tokenizer over a buffered reader.
///
/// # Examples
///
/// ```rust
/// use wnlmf_stream::{Token, Tokenizer};
/// use std::io::Cursor;
///
/// let mut tokenizer = Tokenizer::new(Cursor::new(r#"<a k="v">hi</a>"#));
/// assert_eq!(
///     tokenizer.next_token().unwrap(),
///     Token::Open { name: "a".into(), raw: r#"<a k="v">"#.into() }
/// );
/// assert_eq!(tokenizer.next_token().unwrap(), Token::Text("hi".into()));
/// assert_eq!(tokenizer.next_token().unwrap(), Token::Close { name: "a".into() });
/// assert_eq!(tokenizer.next_token().unwrap(), Token::Eof);
/// ```
pub struct Tokenizer<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> Tokenizer<R> {
    /// Create a tokenizer that keeps whitespace and checks end tag names.
    pub fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        configure(&mut reader);
        Self {
            reader,
            buf: Vec::with_capacity(8192),
        }
    }

    /// Byte offset of the tokenizer in the input.
    #[inline]
    pub fn position(&self) -> usize {
        self.reader.buffer_position()
    }

    /// Read the next token.
    pub fn next_token(&mut self) -> StreamResult<Token> {
        self.buf.clear();
        let position = self.reader.buffer_position();
        let event = self
            .reader
            .read_event_into(&mut self.buf)
            .map_err(|e| classify(e, position))?;
        to_token(event, self.reader.decoder(), position)
    }
}

/// Async pull tokenizer over a tokio buffered reader.
#[cfg(feature = "async")]
pub struct AsyncTokenizer<R: tokio::io::AsyncBufRead + Unpin> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

#[cfg(feature = "async")]
impl<R: tokio::io::AsyncBufRead + Unpin> AsyncTokenizer<R> {
    /// Create a tokenizer that keeps whitespace and checks end tag names.
    pub fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        configure(&mut reader);
        Self {
            reader,
            buf: Vec::with_capacity(8192),
        }
    }

    /// Byte offset of the tokenizer in the input.
    #[inline]
    pub fn position(&self) -> usize {
        self.reader.buffer_position()
    }

    /// Read the next token, awaiting input as needed.
    pub async fn next_token(&mut self) -> StreamResult<Token> {
        self.buf.clear();
        let position = self.reader.buffer_position();
        let event = self
            .reader
            .read_event_into_async(&mut self.buf)
            .await
            .map_err(|e| classify(e, position))?;
        to_token(event, self.reader.decoder(), position)
    }
}

fn configure<R>(reader: &mut Reader<R>) {
    reader
        .trim_text(false)
        .expand_empty_elements(false)
        .check_end_names(true);
}

/// Reader failures are transport errors; everything else quick-xml reports
/// is a problem with the markup.
fn classify(err: quick_xml::Error, position: usize) -> StreamError {
    match err {
        quick_xml::Error::Io(io) => StreamError::Io(io),
        other => StreamError::malformed(position, other.to_string()),
    }
}

fn to_token(event: Event<'_>, decoder: Decoder, position: usize) -> StreamResult<Token> {
    let token = match event {
        Event::Start(e) => Token::Open {
            name: element_name(&decode(decoder, e.name().as_ref(), position)?, position)?,
            raw: format!("<{}>", decode(decoder, &e, position)?),
        },
        Event::Empty(e) => Token::SelfClosing {
            name: element_name(&decode(decoder, e.name().as_ref(), position)?, position)?,
            raw: format!("<{}/>", decode(decoder, &e, position)?),
        },
        Event::End(e) => Token::Close {
            name: element_name(&decode(decoder, e.name().as_ref(), position)?, position)?,
        },
        Event::Text(e) => Token::Text(decode(decoder, &e, position)?),
        Event::CData(e) => Token::CData(format!("<![CDATA[{}]]>", decode(decoder, &e, position)?)),
        Event::Comment(e) => Token::Comment(format!("<!--{}-->", decode(decoder, &e, position)?)),
        Event::Decl(e) => Token::Declaration(format!("<?{}?>", decode(decoder, &e, position)?)),
        Event::PI(e) => Token::Declaration(format!("<?{}?>", decode(decoder, &e, position)?)),
        Event::DocType(e) => {
            let content = decode(decoder, &e, position)?;
            Token::Doctype(format!("<!DOCTYPE {}>", content.trim_start()))
        }
        Event::Eof => Token::Eof,
    };

    tracing::trace!(position, ?token, "token");
    Ok(token)
}

fn decode(decoder: Decoder, bytes: &[u8], position: usize) -> StreamResult<String> {
    decoder
        .decode(bytes)
        .map(|s| s.into_owned())
        .map_err(|e| StreamError::malformed(position, e.to_string()))
}

/// Element names are word characters, colons, dots and hyphens.
fn element_name(name: &str, position: usize) -> StreamResult<String> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'));
    if valid {
        Ok(name.to_string())
    } else {
        Err(StreamError::malformed(
            position,
            format!("cannot extract element name from `{}`", name),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    fn tokens(input: &str) -> Vec<Token> {
        let mut tokenizer = Tokenizer::new(Cursor::new(input));
        let mut out = Vec::new();
        loop {
            let token = tokenizer.next_token().unwrap();
            if token == Token::Eof {
                return out;
            }
            out.push(token);
        }
    }

    #[test]
    fn test_element_tokens() {
        assert_eq!(
            tokens(r#"<Lexicon id="oewn"><Form writtenForm="x"/></Lexicon>"#),
            vec![
                Token::Open {
                    name: "Lexicon".into(),
                    raw: r#"<Lexicon id="oewn">"#.into()
                },
                Token::SelfClosing {
                    name: "Form".into(),
                    raw: r#"<Form writtenForm="x"/>"#.into()
                },
                Token::Close {
                    name: "Lexicon".into()
                },
            ]
        );
    }

    #[test]
    fn test_whitespace_text_is_kept() {
        assert_eq!(
            tokens("<a>  <b/>  </a>"),
            vec![
                Token::Open {
                    name: "a".into(),
                    raw: "<a>".into()
                },
                Token::Text("  ".into()),
                Token::SelfClosing {
                    name: "b".into(),
                    raw: "<b/>".into()
                },
                Token::Text("  ".into()),
                Token::Close { name: "a".into() },
            ]
        );
    }

    #[test]
    fn test_special_constructs() {
        let input = concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<!DOCTYPE LexicalResource SYSTEM "http://globalwordnet.github.io/schemas/WN-LMF-1.1.dtd">"#,
            "<!-- generated -->",
            "<a><![CDATA[x < y]]></a>"
        );
        let toks = tokens(input);
        assert_eq!(
            toks[0],
            Token::Declaration(r#"<?xml version="1.0" encoding="UTF-8"?>"#.into())
        );
        assert!(matches!(&toks[1], Token::Doctype(raw) if raw.starts_with("<!DOCTYPE LexicalResource")));
        assert_eq!(toks[2], Token::Comment("<!-- generated -->".into()));
        assert_eq!(toks[4], Token::CData("<![CDATA[x < y]]>".into()));
    }

    #[test]
    fn test_namespaced_and_dotted_names() {
        let toks = tokens("<dc:note/><a.b-c/>");
        assert!(matches!(&toks[0], Token::SelfClosing { name, .. } if name == "dc:note"));
        assert!(matches!(&toks[1], Token::SelfClosing { name, .. } if name == "a.b-c"));
    }

    #[test]
    fn test_mismatched_end_is_malformed() {
        let mut tokenizer = Tokenizer::new(Cursor::new("<a></b>"));
        assert!(matches!(tokenizer.next_token(), Ok(Token::Open { .. })));
        let err = tokenizer.next_token().unwrap_err();
        assert!(matches!(err, StreamError::MalformedFragment { .. }));
    }

    #[test]
    fn test_invalid_name_is_malformed() {
        assert!(element_name("", 0).is_err());
        assert!(element_name("a/b", 0).is_err());
        assert!(element_name("a b", 3).is_err());
        assert_eq!(element_name("Sense", 0).unwrap(), "Sense");
    }

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
            }
            self.served = true;
            let chunk = b"<a>";
            buf[..chunk.len()].copy_from_slice(chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn test_reader_failure_is_transport() {
        let reader = io::BufReader::new(FailingReader { served: false });
        let mut tokenizer = Tokenizer::new(reader);
        assert!(matches!(tokenizer.next_token(), Ok(Token::Open { .. })));
        let err = tokenizer.next_token().unwrap_err();
        assert!(err.is_transport());
    }
}
