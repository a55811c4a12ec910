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

//! Command implementations.

mod stats;
mod to_json;
mod validate;
mod verify;

pub use stats::stats;
pub use to_json::to_json;
pub use validate::validate;
pub use verify::verify;

use crate::cli::StreamArgs;
use crate::error::CliError;
use std::fs::File;
use wnlmf_core::{read_lexicon, Lexicon};

/// Open `path` for streaming.
pub fn open_file(path: &str) -> Result<File, CliError> {
    File::open(path).map_err(|e| CliError::io_error(path, e))
}

/// Extract the first lexicon in `path`, failing when there is none.
pub fn load_lexicon(path: &str, stream: &StreamArgs) -> Result<Lexicon, CliError> {
    let file = open_file(path)?;
    read_lexicon(file, stream.parser_config(), &stream.extract_options())
        .map_err(|e| CliError::from_lexicon_error(path, e))?
        .ok_or_else(|| CliError::NoLexicon { path: path.into() })
}
