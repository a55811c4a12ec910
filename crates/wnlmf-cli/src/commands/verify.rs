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

//! Verify command.

use super::load_lexicon;
use crate::cli::StreamArgs;
use crate::error::CliError;
use colored::Colorize;
use wnlmf_core::verify_references;

/// Unresolved references printed before the rest are summarized.
const MAX_LISTED: usize = 20;

/// Check every identifier reference in the lexicon of `file`.
pub fn verify(file: &str, stream: &StreamArgs) -> Result<(), CliError> {
    let lexicon = load_lexicon(file, stream)?;
    let report = verify_references(&lexicon);

    if report.is_closed() {
        println!("{} {}", "✓".green().bold(), file);
        println!("  References checked: {}", report.checked);
        return Ok(());
    }

    println!("{} {}", "✗".red().bold(), file);
    println!("  References checked: {}", report.checked);
    for reference in report.unresolved.iter().take(MAX_LISTED) {
        println!("  {} {}", "unresolved:".red(), reference);
    }
    if report.unresolved.len() > MAX_LISTED {
        println!("  ... and {} more", report.unresolved.len() - MAX_LISTED);
    }

    let disallowed: Vec<_> = report.disallowed().collect();
    for (kind, registry) in &disallowed {
        println!("  {} {} resolves among {}", "disallowed:".red(), kind, registry);
    }

    Err(CliError::UnresolvedReferences {
        count: report.unresolved.len() + disallowed.len(),
    })
}
