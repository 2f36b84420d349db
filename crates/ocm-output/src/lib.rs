//! Fixed-width tables for the OCM command line client.
//!
//! A [`Printer`] owns the output stream, optionally paged, and a shared
//! [`Digger`]. Tables are created from it with [`Printer::new_table`], or
//! standalone with [`TableBuilder`] on any writer.
//!
//! ```rust
//! use ocm_output::{Printer, Value};
//! use serde_json::json;
//! use std::sync::{Arc, Mutex};
//! use std::io::{self, Write};
//!
//! #[derive(Clone, Default)]
//! struct Buffer(Arc<Mutex<Vec<u8>>>);
//!
//! impl Write for Buffer {
//!     fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
//!         self.0.lock().unwrap().extend_from_slice(buf);
//!         Ok(buf.len())
//!     }
//!     fn flush(&mut self) -> io::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let buffer = Buffer::default();
//! let mut printer = Printer::builder().writer(buffer.clone()).build()?;
//!
//! let mut table = printer
//!     .new_table()
//!     .name("clusters")
//!     .columns("id,name,state")
//!     .learning(false)
//!     .build()?;
//! table.write_headers()?;
//! table.write_object(&Value::from(json!({
//!     "id": "1a2b3c",
//!     "name": "mycluster",
//! })))?;
//! drop(table);
//! printer.close()?;
//!
//! let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
//! assert!(text.starts_with("ID  "));
//! assert!(text.lines().nth(1).unwrap().ends_with("NONE        "));
//! # Ok::<(), ocm_output::OutputError>(())
//! ```
//!
//! Column values are looked up by name in each row object, see the
//! [`ocm_digger`] crate for the matching rules. Absent values are written as
//! [`NONE`].

mod column;
mod config;
pub mod descriptions;
mod error;
mod printer;
mod table;
mod text;

pub use column::{default_header, parse_columns, Column, ColumnValue, Projection};
pub use config::{Config, CONFIG_ENV, CONFIG_FILE, PAGER_ENV};
pub use descriptions::{ColumnDescription, TableDescription};
pub use error::{OutputError, Result};
pub use printer::{Printer, PrinterBuilder};
pub use table::{cell_text, Table, TableBuilder, DEFAULT_LEARNING_LIMIT};
pub use text::{fit, text_width, GUTTER, NONE};

pub use ocm_digger::{Digger, Inspect, Member, MemberKind, Value};
pub use ocm_pager::{Destination, PagerCommand, PagerError};
