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

//! Command definitions for the `wnlmf` binary.

use crate::commands;
use crate::error::CliError;
use clap::{Args, Subcommand};
use std::time::Duration;
use wnlmf_core::ExtractOptions;
use wnlmf_stream::ParserConfig;

/// Parser settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct StreamArgs {
    /// Maximum element nesting depth
    #[arg(long, value_name = "N", default_value_t = 1024)]
    pub max_depth: usize,

    /// Abort parsing after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Fail on read errors instead of stopping quietly
    #[arg(long)]
    pub strict_errors: bool,

    /// Accept attributes outside the schema
    #[arg(long)]
    pub lenient: bool,
}

impl StreamArgs {
    pub fn parser_config(&self) -> ParserConfig {
        let config = ParserConfig::default()
            .with_max_depth(self.max_depth)
            .with_strict_errors(self.strict_errors);
        match self.timeout {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }

    pub fn extract_options(&self) -> ExtractOptions {
        if self.lenient {
            ExtractOptions::lenient()
        } else {
            ExtractOptions::default()
        }
    }
}

/// All `wnlmf` commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Validate a WordNet LMF file
    ///
    /// Checks every element against the schema in a single streaming pass,
    /// without keeping the lexicon in memory.
    Validate {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Require every lexicon to carry this version
        #[arg(long, value_name = "VERSION")]
        expect_version: Option<String>,

        #[command(flatten)]
        stream: StreamArgs,
    },

    /// Show element and part-of-speech counts
    Stats {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        #[command(flatten)]
        stream: StreamArgs,
    },

    /// Check that every identifier reference resolves
    ///
    /// Extracts the lexicon and checks sense, synset, member and subcat
    /// references against the identifiers it declares.
    Verify {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        #[command(flatten)]
        stream: StreamArgs,
    },

    /// Convert the lexicon to JSON
    ToJson {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,

        #[command(flatten)]
        stream: StreamArgs,
    },
}

impl Commands {
    /// Run the command.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Validate {
                file,
                expect_version,
                stream,
            } => commands::validate(&file, expect_version.as_deref(), &stream),
            Commands::Stats { file, stream } => commands::stats(&file, &stream),
            Commands::Verify { file, stream } => commands::verify(&file, &stream),
            Commands::ToJson {
                file,
                output,
                pretty,
                stream,
            } => commands::to_json(&file, output.as_deref(), pretty, &stream),
        }
    }
}
