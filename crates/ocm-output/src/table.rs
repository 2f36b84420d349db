//! Fixed-width text tables.
//!
//! A [`Table`] writes one line per row: every column cut or padded to its
//! width, columns separated by two spaces. Values come from explicit column
//! sources or are dug out of the row object using the column name as path.
//!
//! # Width learning
//!
//! By default tables start with the seed widths (from the bundled description
//! or the column names) and grow them to fit the headers and the first rows.
//! While learning, rows are held back; once the learning limit is reached, or
//! the table is flushed, they are written with the learned widths, which are
//! then frozen. Later rows are cut to the frozen widths.
//!
//! ```rust
//! use ocm_digger::Value;
//! use ocm_output::TableBuilder;
//! use serde_json::json;
//!
//! let mut out = Vec::new();
//! let mut table = TableBuilder::new()
//!     .writer(&mut out)
//!     .name("example")
//!     .columns("id,name")
//!     .build()?;
//!
//! table.write_headers()?;
//! table.write_object(&Value::from(json!({"id": "123", "name": "mycluster"})))?;
//! table.flush()?;
//! drop(table);
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "ID   NAME     \n123  mycluster\n"
//! );
//! # Ok::<(), ocm_output::OutputError>(())
//! ```

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use ocm_digger::{Digger, Value};
use tracing::debug;

use crate::column::{parse_columns, Column, ColumnValue};
use crate::descriptions::{self, TableDescription};
use crate::error::{OutputError, Result};
use crate::text::{render_line, NONE};

/// Number of rows used to learn column widths unless configured otherwise.
pub const DEFAULT_LEARNING_LIMIT: usize = 100;

/// Builder for [`Table`].
pub struct TableBuilder<'a> {
    out: Option<&'a mut dyn Write>,
    name: Option<String>,
    specs: Vec<String>,
    values: HashMap<String, ColumnValue>,
    digger: Option<Arc<Digger>>,
    description: Option<TableDescription>,
    learning: bool,
    learning_limit: usize,
}

impl<'a> TableBuilder<'a> {
    /// Creates a builder with width learning enabled.
    pub fn new() -> Self {
        TableBuilder {
            out: None,
            name: None,
            specs: Vec::new(),
            values: HashMap::new(),
            digger: None,
            description: None,
            learning: true,
            learning_limit: DEFAULT_LEARNING_LIMIT,
        }
    }

    /// Sets the writer rows are written to.
    pub fn writer(mut self, out: &'a mut dyn Write) -> Self {
        self.out = Some(out);
        self
    }

    /// Sets the table name, used to find the bundled description.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds comma separated column names. Can be called multiple times.
    pub fn columns(mut self, spec: impl Into<String>) -> Self {
        self.specs.push(spec.into());
        self
    }

    /// Uses a constant value for a column.
    pub fn value(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.column_value(column, ColumnValue::constant(value))
    }

    /// Computes the value of a column from each row object.
    pub fn value_fn<F, R>(self, column: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.column_value(column, ColumnValue::function(f))
    }

    /// Sets the explicit value source of a column.
    pub fn column_value(mut self, column: impl Into<String>, value: ColumnValue) -> Self {
        self.values.insert(column.into(), value);
        self
    }

    /// Sets the digger used for columns without explicit values.
    pub fn digger(mut self, digger: Arc<Digger>) -> Self {
        self.digger = Some(digger);
        self
    }

    /// Uses this description instead of the bundled one.
    pub fn description(mut self, description: TableDescription) -> Self {
        self.description = Some(description);
        self
    }

    /// Enables or disables width learning.
    pub fn learning(mut self, learning: bool) -> Self {
        self.learning = learning;
        self
    }

    /// Sets how many rows are used to learn widths before they freeze.
    pub fn learning_limit(mut self, limit: usize) -> Self {
        self.learning_limit = limit;
        self
    }

    /// Builds the table.
    ///
    /// Fails if the writer or the name are missing, if no columns were
    /// requested, or if the bundled description can't be parsed.
    pub fn build(mut self) -> Result<Table<'a>> {
        let out = self.out.take().ok_or(OutputError::MissingWriter)?;
        let name = match self.name.take() {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(OutputError::MissingName),
        };

        let names = parse_columns(&self.specs);
        if names.is_empty() {
            return Err(OutputError::NoColumns(name));
        }

        let description = match self.description.take() {
            Some(description) => description,
            None => descriptions::lookup(&name)?.unwrap_or_default(),
        };

        let columns = names
            .into_iter()
            .map(|column_name| {
                let mut column = match description.column(&column_name) {
                    Some(described) => Column::described(described),
                    None => Column::new(column_name),
                };
                column.value = self.values.get(&column.name).cloned();
                column
            })
            .collect();

        let learning = self.learning && self.learning_limit > 0;
        Ok(Table {
            out,
            name,
            columns,
            digger: self.digger.unwrap_or_default(),
            learning,
            learning_limit: self.learning_limit,
            learned: 0,
            pending: VecDeque::new(),
        })
    }
}

impl Default for TableBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// A table bound to a writer.
///
/// Rows held back for width learning are written on [`Table::flush`], or
/// when the table is dropped.
pub struct Table<'a> {
    out: &'a mut dyn Write,
    name: String,
    columns: Vec<Column>,
    digger: Arc<Digger>,
    learning: bool,
    learning_limit: usize,
    learned: usize,
    pending: VecDeque<Vec<String>>,
}

impl<'a> Table<'a> {
    /// Creates a builder.
    pub fn builder() -> TableBuilder<'a> {
        TableBuilder::new()
    }

    /// Name of the table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns, with their current widths.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Current width of every column.
    pub fn widths(&self) -> Vec<usize> {
        self.columns.iter().map(|c| c.width).collect()
    }

    /// Checks if widths are still being learned.
    pub fn is_learning(&self) -> bool {
        self.learning
    }

    /// Writes the header row.
    ///
    /// Headers take part in width learning but don't count towards the
    /// learning limit.
    pub fn write_headers(&mut self) -> Result<()> {
        let cells = self.columns.iter().map(|c| c.header.clone()).collect();
        self.record(cells, false)
    }

    /// Writes a row computed from an object.
    ///
    /// Each column takes its explicit value if it has one, otherwise the
    /// value the digger finds in `object` under the column name.
    pub fn write_object(&mut self, object: &Value) -> Result<()> {
        let cells = self
            .columns
            .iter()
            .map(|column| {
                let value = match &column.value {
                    Some(source) => source.eval(object),
                    None => self.digger.dig(object, &column.name),
                };
                cell_text(&value)
            })
            .collect();
        self.record(cells, true)
    }

    /// Writes a row from explicit values, one per column.
    ///
    /// Fails without writing anything if the number of values doesn't match
    /// the number of columns.
    pub fn write_row(&mut self, values: &[Value]) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(OutputError::ColumnCountMismatch {
                columns: self.columns.len(),
                values: values.len(),
            });
        }
        let cells = values.iter().map(cell_text).collect();
        self.record(cells, true)
    }

    /// Writes the rows held back for learning and freezes the widths.
    ///
    /// Rows are removed only once written. If writing fails the rest stay
    /// pending and the next flush retries them.
    pub fn flush(&mut self) -> Result<()> {
        if self.learning {
            self.learning = false;
            debug!(
                table = %self.name,
                rows = self.learned,
                widths = ?self.widths(),
                "column widths frozen"
            );
        }
        let widths = self.widths();
        while let Some(cells) = self.pending.front() {
            self.out.write_all(render_line(cells, &widths).as_bytes())?;
            self.pending.pop_front();
        }
        self.out.flush()?;
        Ok(())
    }

    fn record(&mut self, cells: Vec<String>, counts: bool) -> Result<()> {
        if !self.learning {
            let line = render_line(&cells, &self.widths());
            self.out.write_all(line.as_bytes())?;
            return Ok(());
        }

        for (column, cell) in self.columns.iter_mut().zip(&cells) {
            column.learn(cell);
        }
        self.pending.push_back(cells);
        if counts {
            self.learned += 1;
            if self.learned >= self.learning_limit {
                self.flush()?;
            }
        }
        Ok(())
    }
}

impl Drop for Table<'_> {
    fn drop(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        if let Err(err) = self.flush() {
            debug!(table = %self.name, error = %err, "can't flush table");
        }
    }
}

impl fmt::Debug for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("columns", &self.columns)
            .field("learning", &self.learning)
            .field("learning_limit", &self.learning_limit)
            .field("learned", &self.learned)
            .field("pending", &self.pending.len())
            .finish()
    }
}

/// Text of a cell: absent values render as `NONE`.
pub fn cell_text(value: &Value) -> String {
    if value.is_none() {
        NONE.to_string()
    } else {
        value.to_string()
    }
}
