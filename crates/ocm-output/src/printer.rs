//! Printer: the output stream tables are written to.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use ocm_digger::Digger;
use ocm_pager::{Destination, PagedWriter};

use crate::error::{OutputError, Result};
use crate::table::TableBuilder;

/// Builder for [`Printer`].
#[derive(Debug, Default)]
pub struct PrinterBuilder {
    destination: Option<Destination>,
    pager: Option<String>,
    terminal: Option<bool>,
    digger: Option<Arc<Digger>>,
}

impl PrinterBuilder {
    /// Sets where the output goes.
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Sends the output to an arbitrary writer. Such output is never paged.
    pub fn writer(self, writer: impl Write + Send + 'static) -> Self {
        self.destination(Destination::Writer(Box::new(writer)))
    }

    /// Sets the pager command line. Blank disables paging.
    pub fn pager(mut self, pager: impl Into<String>) -> Self {
        self.pager = Some(pager.into());
        self
    }

    /// Overrides terminal detection for the destination.
    pub fn terminal(mut self, terminal: bool) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// Sets the digger shared by the tables of the printer.
    pub fn digger(mut self, digger: Arc<Digger>) -> Self {
        self.digger = Some(digger);
        self
    }

    /// Builds the printer, starting the pager when output is paged.
    pub fn build(self) -> Result<Printer> {
        let destination = self.destination.ok_or(OutputError::MissingWriter)?;

        let mut out = PagedWriter::builder().destination(destination);
        if let Some(pager) = self.pager {
            out = out.pager(pager);
        }
        if let Some(terminal) = self.terminal {
            out = out.terminal(terminal);
        }

        Ok(Printer {
            out: out.build()?,
            digger: self.digger.unwrap_or_default(),
        })
    }
}

/// Output stream for tables, possibly going through a pager.
///
/// ```rust
/// use ocm_output::{Destination, Printer};
///
/// let mut printer = Printer::builder()
///     .destination(Destination::Stdout)
///     .build()?;
/// let mut table = printer.new_table().name("clusters").columns("id,name").build()?;
/// table.write_headers()?;
/// table.flush()?;
/// drop(table);
/// printer.close()?;
/// # Ok::<(), ocm_output::OutputError>(())
/// ```
pub struct Printer {
    out: PagedWriter,
    digger: Arc<Digger>,
}

impl Printer {
    /// Creates a builder.
    pub fn builder() -> PrinterBuilder {
        PrinterBuilder::default()
    }

    /// Starts a table writing to this printer with its digger.
    pub fn new_table(&mut self) -> TableBuilder<'_> {
        let digger = Arc::clone(&self.digger);
        TableBuilder::new().writer(&mut self.out).digger(digger)
    }

    /// The digger shared by the tables of this printer.
    pub fn digger(&self) -> &Arc<Digger> {
        &self.digger
    }

    /// Checks if output goes through a pager.
    pub fn is_paging(&self) -> bool {
        self.out.is_paging()
    }

    /// Flushes the output and waits for the pager, if any, to exit.
    pub fn close(&mut self) -> Result<()> {
        self.out.close()?;
        Ok(())
    }
}

impl Write for Printer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl fmt::Debug for Printer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Printer")
            .field("out", &self.out)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_is_mandatory() {
        let err = Printer::builder().build().unwrap_err();
        assert!(matches!(err, OutputError::MissingWriter));
    }

    #[test]
    fn writer_destination_is_never_paged() {
        let printer = Printer::builder()
            .writer(io::sink())
            .pager("cat")
            .terminal(true)
            .build()
            .unwrap();
        assert!(!printer.is_paging());
    }

    #[test]
    fn tables_share_the_digger() {
        let digger = Arc::new(Digger::new());
        let printer = Printer::builder()
            .writer(io::sink())
            .digger(Arc::clone(&digger))
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(printer.digger(), &digger));
    }
}
