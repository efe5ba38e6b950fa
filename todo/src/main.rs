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

//! Command-line interface to the todo list.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use carmgmt_todo::command::Command;
use carmgmt_todo::storage::Storage;
use carmgmt_todo::table::render;
use carmgmt_todo::{TodoError, TodoResult};
use clap::{Args, Parser};
use std::path::PathBuf;
use std::process;
use time::OffsetDateTime;

/// Manages a list of todos stored in a JSON file.
#[derive(Debug, Parser)]
#[command(
    name = "todo",
    after_help = "Flags take two dashes, as in --add or --list; single-dash spellings such as \
                  -add are rejected."
)]
struct Cli {
    /// Path to the file holding the todos.
    #[arg(long, env = "TODO_FILE", default_value = "todos.json")]
    file: PathBuf,

    /// Action to perform.
    #[command(flatten)]
    action: Action,
}

/// Mutually-exclusive actions.
#[derive(Args, Debug)]
#[group(multiple = false)]
struct Action {
    /// Add a new todo.
    #[arg(long, value_name = "TITLE")]
    add: Option<String>,

    /// Delete a todo.
    #[arg(long, value_name = "INDEX", allow_negative_numbers = true)]
    del: Option<i64>,

    /// Toggle a todo.
    #[arg(long, value_name = "INDEX", allow_negative_numbers = true)]
    toggle: Option<i64>,

    /// List all todos.
    #[arg(long)]
    list: bool,

    /// Edit a todo.
    #[arg(long, value_name = "INDEX:TITLE")]
    edit: Option<String>,
}

impl Action {
    /// Converts the parsed flags into the command to run.
    fn into_command(self) -> TodoResult<Command> {
        if let Some(title) = self.add {
            Ok(Command::Add(title))
        } else if let Some(index) = self.del {
            Ok(Command::Delete(index))
        } else if let Some(index) = self.toggle {
            Ok(Command::Toggle(index))
        } else if self.list {
            Ok(Command::List)
        } else if let Some(value) = self.edit {
            Command::parse_edit(&value)
        } else {
            Err(TodoError::InvalidCommand)
        }
    }
}

/// Runs the action requested in `cli` at time `now` and returns the rendered list.
///
/// The list is only saved if the action succeeds.
fn run(cli: Cli, now: OffsetDateTime) -> TodoResult<String> {
    let command = cli.action.into_command()?;
    let storage = Storage::new(cli.file);
    let mut todos = storage.load()?;
    command.execute(&mut todos, now)?;
    storage.save(&todos)?;
    Ok(render(&todos))
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    match run(cli, now) {
        Ok(table) => print!("{}", table),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
