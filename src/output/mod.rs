//
//  gitlab-admin
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting
//!
//! Commands print either human-readable tables or pretty JSON (`--json`).
//!
//! - Single records implement [`TableOutput`] and print as key/value blocks
//! - Lists implement [`TableRow`] and print as one comfy-table
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitlab_admin::output::{OutputFormat, OutputWriter, TableRow};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Row { id: u64, name: String }
//!
//! impl TableRow for Row {
//!     fn headers() -> &'static [&'static str] { &["ID", "NAME"] }
//!     fn cells(&self, _color: bool) -> Vec<String> { vec![self.id.to_string(), self.name.clone()] }
//! }
//!
//! let writer = OutputWriter::new(OutputFormat::Table);
//! writer.write_list(&[Row { id: 1, name: "platform".into() }], "No groups found")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use serde::Serialize;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    /// Human-readable tables and key/value blocks
    #[default]
    Table,
    /// Pretty-printed JSON for scripting
    Json,
}

/// Prints command results in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a writer; color follows the terminal's capabilities.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Prints one record.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value)?,
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Prints a list as one table, or `empty_message` when there is nothing
    /// to show. JSON output always prints the (possibly empty) array.
    pub fn write_list<T: Serialize + TableRow>(
        &self,
        values: &[T],
        empty_message: &str,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&values)?,
            OutputFormat::Table if values.is_empty() => self.write_info(empty_message),
            OutputFormat::Table => TableBuilder::new()
                .color(self.color)
                .headers(T::headers().iter().copied())
                .rows(values.iter().map(|v| v.cells(self.color)))
                .print(),
        }
        Ok(())
    }

    /// Writes an error message to stderr.
    pub fn write_error(&self, msg: &str) {
        use console::style;

        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    /// Writes a warning message to stderr.
    pub fn write_warning(&self, msg: &str) {
        use console::style;

        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    /// Writes an informational line to stdout.
    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    /// Writes a success line with a check mark.
    pub fn write_success(&self, msg: &str) {
        use console::style;

        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Records that print as a key/value block.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// Records that print as one row of a list table.
pub trait TableRow {
    /// Column headers, in cell order.
    fn headers() -> &'static [&'static str];

    /// Cell values for this record.
    fn cells(&self, color: bool) -> Vec<String>;
}

/// Prints a bold title with an underline.
pub fn print_header(text: &str) {
    use console::style;

    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints an aligned `key: value` line.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;

    let label = format!("{:<16}", format!("{}:", key));
    if color {
        println!("  {} {}", style(label).dim(), value);
    } else {
        println!("  {} {}", label, value);
    }
}
