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

//! Data types for the todo list.

use crate::{TodoError, TodoResult};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A single entry in the todo list.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Todo {
    /// Free-form description of the task.
    pub title: String,

    /// Whether the task is done.
    pub completed: bool,

    /// When the task was added.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// When the task was last marked as done, if it currently is.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

/// The ordered collection of todos.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Todos(Vec<Todo>);

impl Todos {
    /// Converts a user-supplied `index` into a position within the list.
    fn position(&self, index: i64) -> TodoResult<usize> {
        match usize::try_from(index) {
            Ok(i) if i < self.0.len() => Ok(i),
            _ => Err(TodoError::InvalidIndex),
        }
    }

    /// Appends a new pending todo named `title` created at `now`.
    pub fn add(&mut self, title: String, now: OffsetDateTime) {
        self.0.push(Todo { title, completed: false, created_at: now, completed_at: None });
    }

    /// Removes the todo at `index`.
    pub fn delete(&mut self, index: i64) -> TodoResult<()> {
        let i = self.position(index)?;
        self.0.remove(i);
        Ok(())
    }

    /// Flips the completion status of the todo at `index`, recording `now` if it becomes done.
    pub fn toggle(&mut self, index: i64, now: OffsetDateTime) -> TodoResult<()> {
        let i = self.position(index)?;
        let todo = &mut self.0[i];
        todo.completed = !todo.completed;
        todo.completed_at = if todo.completed { Some(now) } else { None };
        Ok(())
    }

    /// Replaces the title of the todo at `index`.
    pub fn edit(&mut self, index: i64, title: String) -> TodoResult<()> {
        let i = self.position(index)?;
        self.0[i].title = title;
        Ok(())
    }

    /// Returns an iterator over the todos in order.
    pub fn iter(&self) -> impl Iterator<Item = &Todo> {
        self.0.iter()
    }

    /// Returns the number of todos.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no todos.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
