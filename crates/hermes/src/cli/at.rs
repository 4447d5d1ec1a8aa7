//! `hermes at` command implementation.

use std::path::Path;

use colored::Colorize;

use super::display::{print_json, print_resolution};

/// Where the cursor is.
#[derive(Debug, Clone, Copy)]
pub enum Cursor {
    /// Character offset from the start of the file
    Offset(usize),
    /// 1-based line and character column
    LineColumn {
        /// Line
        line: u32,
        /// Column
        column: u32,
    },
}

/// Run the at command.
pub fn run(
    workspace: &Path,
    config: Option<&Path>,
    file: &Path,
    cursor: Cursor,
    json: bool,
) -> Result<(), hermes::Error> {
    let hermes = super::open(workspace, config)?;

    let offset = match cursor {
        Cursor::Offset(offset) => Some(offset),
        Cursor::LineColumn { line, column } => hermes.offset_of(file, line, column)?,
    };
    let Some(offset) = offset else {
        println!("position is outside {}", file.display());
        return Ok(());
    };

    let Some(resolution) = hermes.resolve_at(file, offset)? else {
        println!("not a supported context");
        println!(
            "\n{}: place the cursor on a class, record, constructor or type name.",
            "hint".dimmed()
        );
        return Ok(());
    };

    if json {
        print_json(&resolution)
    } else {
        print_resolution(&resolution, hermes.config());
        Ok(())
    }
}
