// Car Management
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Minimal todo list manager backed by a JSON file.
//!
//! The list is an ordered sequence of entries addressed by their position.  Deleting an entry
//! shifts the indexes of all the entries that follow it.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod command;
pub mod model;
pub mod storage;
pub mod table;

/// Errors raised while manipulating the todo list.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TodoError {
    /// Indicates that no action was requested.
    #[error("invalid command")]
    InvalidCommand,

    /// Indicates that an `--edit` value does not look like `<index>:<title>`.
    #[error("invalid edit format")]
    InvalidEditFormat,

    /// Indicates that an index does not refer to an existing entry.
    #[error("invalid index")]
    InvalidIndex,

    /// Indicates a failure to read or write the backing file.
    #[error("{0}")]
    StorageError(String),
}

/// Result type for this crate.
pub type TodoResult<T> = Result<T, TodoError>;
