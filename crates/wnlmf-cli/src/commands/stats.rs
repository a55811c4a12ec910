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

//! Stats command - element and part-of-speech counts.

use super::open_file;
use crate::cli::StreamArgs;
use crate::error::CliError;
use colored::Colorize;
use std::time::Instant;
use wnlmf_core::validate_stream;
use wnlmf_stream::TreeParser;

/// Print per-kind element counts and the lemma part-of-speech histogram.
pub fn stats(file: &str, stream: &StreamArgs) -> Result<(), CliError> {
    let started = Instant::now();
    let reader = open_file(file)?;
    let parser = TreeParser::with_config(reader, stream.parser_config());
    let summary = validate_stream(parser, stream.extract_options())
        .map_err(|e| CliError::from_lexicon_error(file, e))?;
    let elapsed = started.elapsed();

    println!("{} {}", "Statistics for".bold(), file);
    if !summary.complete {
        println!("  {}", "warning: input ended before the document was complete".yellow());
    }

    println!();
    println!("  {:<24} {:>10}", "Element".bold(), "Count".bold());
    for (kind, count) in &summary.counts {
        println!("  {:<24} {:>10}", kind, count);
    }
    println!("  {:<24} {:>10}", "total", summary.total());

    if !summary.parts_of_speech.is_empty() {
        println!();
        println!("  {:<24} {:>10}", "Part of speech".bold(), "Lemmas".bold());
        for (pos, count) in &summary.parts_of_speech {
            println!("  {:<24} {:>10}", pos.as_str(), count);
        }
    }

    println!();
    println!("  Parsed in {:.3}s", elapsed.as_secs_f64());
    tracing::debug!(file, elements = summary.total(), ?elapsed, "stats computed");

    Ok(())
}
