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

//! Actions that can be applied to the todo list.

use crate::model::Todos;
use crate::{TodoError, TodoResult};
use log::info;
use time::OffsetDateTime;

/// A single action requested by the user.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Appends a new todo with the given title.
    Add(String),

    /// Deletes the todo at the given index.
    Delete(i64),

    /// Flips the completion status of the todo at the given index.
    Toggle(i64),

    /// Prints the list without changing it.
    List,

    /// Replaces the title of the todo at the given index.
    Edit(i64, String),
}

impl Command {
    /// Parses an edit request of the form `<index>:<title>`.
    ///
    /// Only the first colon separates the fields, so the title may contain colons itself.
    pub fn parse_edit(value: &str) -> TodoResult<Self> {
        let (index, title) = value.split_once(':').ok_or(TodoError::InvalidEditFormat)?;
        let index = index.parse::<i64>().map_err(|_| TodoError::InvalidEditFormat)?;
        Ok(Command::Edit(index, title.to_owned()))
    }

    /// Applies this command to `todos` using `now` as the current time.
    pub fn execute(self, todos: &mut Todos, now: OffsetDateTime) -> TodoResult<()> {
        match self {
            Command::Add(title) => {
                info!("Adding todo '{}'", title);
                todos.add(title, now);
            }
            Command::Delete(index) => {
                todos.delete(index)?;
                info!("Deleted todo {}", index);
            }
            Command::Toggle(index) => {
                todos.toggle(index, now)?;
                info!("Toggled todo {}", index);
            }
            Command::List => (),
            Command::Edit(index, title) => {
                todos.edit(index, title)?;
                info!("Edited todo {}", index);
            }
        }
        Ok(())
    }
}
