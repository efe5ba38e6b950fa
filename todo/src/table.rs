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

//! Rendering of the todo list as a boxed text table.

use crate::model::Todos;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc2822;
use unicode_width::UnicodeWidthStr;

/// Column titles, in display order.
const HEADERS: [&str; 5] = ["#", "Title", "Completed", "Created At", "Completed At"];

/// Marker for completed todos.
const DONE: &str = "✅";

/// Marker for pending todos.
const PENDING: &str = "❌";

/// Formats `ts` for display in the table.
///
/// RFC 2822 dates share the RFC 1123 layout with a numeric offset.
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&Rfc2822).unwrap_or_else(|_| ts.to_string())
}

/// Builds a horizontal border line using the given corner and junction characters.
fn border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}\n", left, segments.join(&middle.to_string()), right)
}

/// Builds a line with the contents of a row, padding each cell to its column width.
fn row(widths: &[usize], cells: &[String]) -> String {
    let mut line = String::from("│");
    for (cell, width) in cells.iter().zip(widths) {
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(width - cell.width()));
        line.push_str(" │");
    }
    line.push('\n');
    line
}

/// Renders `todos` as a table with one row per todo, indexed from zero.
pub fn render(todos: &Todos) -> String {
    let header: Vec<String> = HEADERS.iter().map(|h| (*h).to_owned()).collect();
    let rows: Vec<Vec<String>> = todos
        .iter()
        .enumerate()
        .map(|(i, todo)| {
            vec![
                i.to_string(),
                todo.title.clone(),
                if todo.completed { DONE } else { PENDING }.to_owned(),
                format_timestamp(todo.created_at),
                todo.completed_at.map(format_timestamp).unwrap_or_default(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.width());
        }
    }

    let mut output = border(&widths, '┌', '┬', '┐');
    output.push_str(&row(&widths, &header));
    output.push_str(&border(&widths, '├', '┼', '┤'));
    for cells in &rows {
        output.push_str(&row(&widths, cells));
    }
    output.push_str(&border(&widths, '└', '┴', '┘'));
    output
}
