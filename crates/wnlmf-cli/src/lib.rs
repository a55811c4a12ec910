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

//! Command-line tools for WordNet LMF files.
//!
//! The `wnlmf` binary streams a lexicon file through the node parser and
//! reports on it:
//!
//! - `validate`: schema validation in a single pass, without building records
//! - `stats`: element and part-of-speech counts
//! - `verify`: identifier reference checks over the extracted lexicon
//! - `to-json`: extracted lexicon as JSON
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

pub mod cli;
pub mod commands;
pub mod error;

pub use error::CliError;
