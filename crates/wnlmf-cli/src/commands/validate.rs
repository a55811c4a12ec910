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

//! Validate command.

use super::open_file;
use crate::cli::StreamArgs;
use crate::error::CliError;
use colored::Colorize;
use wnlmf_core::validate_stream;
use wnlmf_stream::TreeParser;

/// Validate `file` in one streaming pass.
pub fn validate(file: &str, expect_version: Option<&str>, stream: &StreamArgs) -> Result<(), CliError> {
    let reader = open_file(file)?;
    let parser = TreeParser::with_config(reader, stream.parser_config());

    let summary = match validate_stream(parser, stream.extract_options()) {
        Ok(summary) => summary,
        Err(e) => {
            println!("{} {}", "✗".red().bold(), file);
            return Err(CliError::from_lexicon_error(file, e));
        }
    };

    if !summary.complete {
        println!("{} {}", "✗".red().bold(), file);
        return Err(CliError::Incomplete { path: file.into() });
    }
    if summary.lexicons.is_empty() {
        println!("{} {}", "✗".red().bold(), file);
        return Err(CliError::NoLexicon { path: file.into() });
    }
    if let Some(expected) = expect_version {
        if let Some(lexicon) = summary.lexicons.iter().find(|l| l.version != expected) {
            println!("{} {}", "✗".red().bold(), file);
            return Err(CliError::VersionMismatch {
                id: lexicon.id.clone(),
                expected: expected.to_string(),
                found: lexicon.version.clone(),
            });
        }
    }

    println!("{} {}", "✓".green().bold(), file);
    for lexicon in &summary.lexicons {
        println!(
            "  Lexicon: {} ({}, version {})",
            lexicon.id, lexicon.language, lexicon.version
        );
    }
    println!("  Entries: {}", summary.count("LexicalEntry"));
    println!("  Synsets: {}", summary.count("Synset"));
    println!("  Elements: {}", summary.total());

    Ok(())
}
