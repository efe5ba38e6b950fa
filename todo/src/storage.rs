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

//! Persistence of the todo list in a JSON file.

use crate::model::Todos;
use crate::{TodoError, TodoResult};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads and writes a todo list from a single file.
pub struct Storage {
    /// Path to the JSON file holding the list.
    path: PathBuf,
}

impl Storage {
    /// Creates a storage backed by the file at `path`.  The file need not exist yet.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the todo list from disk, returning an empty list if the file does not exist.
    pub fn load(&self) -> TodoResult<Todos> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No todos file at {}; starting empty", self.path.display());
                return Ok(Todos::default());
            }
            Err(e) => {
                return Err(TodoError::StorageError(format!(
                    "Cannot read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let todos: Todos = serde_json::from_slice(&content).map_err(|e| {
            TodoError::StorageError(format!("Invalid todos file {}: {}", self.path.display(), e))
        })?;
        debug!("Loaded {} todos from {}", todos.len(), self.path.display());
        Ok(todos)
    }

    /// Writes `todos` to disk as pretty-printed JSON, replacing any previous contents.
    pub fn save(&self, todos: &Todos) -> TodoResult<()> {
        let content = serde_json::to_string_pretty(todos)
            .map_err(|e| TodoError::StorageError(format!("Cannot serialize todos: {}", e)))?;
        fs::write(&self.path, content).map_err(|e| {
            TodoError::StorageError(format!("Cannot write {}: {}", self.path.display(), e))
        })?;
        debug!("Saved {} todos to {}", todos.len(), self.path.display());
        Ok(())
    }
}
