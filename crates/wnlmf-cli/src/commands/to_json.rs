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

//! JSON export.

use super::load_lexicon;
use crate::cli::StreamArgs;
use crate::error::CliError;
use std::fs;

/// Write the lexicon of `file` as JSON to `output`, or stdout.
pub fn to_json(
    file: &str,
    output: Option<&str>,
    pretty: bool,
    stream: &StreamArgs,
) -> Result<(), CliError> {
    let lexicon = load_lexicon(file, stream)?;

    let json = if pretty {
        serde_json::to_string_pretty(&lexicon)?
    } else {
        serde_json::to_string(&lexicon)?
    };

    match output {
        Some(path) => fs::write(path, json).map_err(|e| CliError::io_error(path, e)),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}
