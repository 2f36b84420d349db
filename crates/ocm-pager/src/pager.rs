use std::fmt;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::mem;
use std::process::{Child, ChildStdin, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use tracing::{debug, warn};

use crate::command::PagerCommand;
use crate::error::{PagerError, Result};

/// Where paged output finally ends up.
pub enum Destination {
    /// The process standard output.
    Stdout,
    /// The process standard error.
    Stderr,
    /// An open file, possibly a terminal device.
    File(File),
    /// Any other writer. Never considered a terminal, so never paged.
    Writer(Box<dyn Write + Send>),
}

impl Destination {
    /// Checks if the destination is an interactive terminal.
    pub fn is_terminal(&self) -> bool {
        match self {
            Destination::Stdout => io::stdout().is_terminal(),
            Destination::Stderr => io::stderr().is_terminal(),
            Destination::File(file) => file.is_terminal(),
            Destination::Writer(_) => false,
        }
    }

    fn into_writer(self) -> Box<dyn Write + Send> {
        match self {
            Destination::Stdout => Box::new(io::stdout()),
            Destination::Stderr => Box::new(io::stderr()),
            Destination::File(file) => Box::new(file),
            Destination::Writer(writer) => writer,
        }
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => f.write_str("Stdout"),
            Destination::Stderr => f.write_str("Stderr"),
            Destination::File(file) => f.debug_tuple("File").field(file).finish(),
            Destination::Writer(_) => f.write_str("Writer"),
        }
    }
}

/// Builder for [`PagedWriter`].
#[derive(Debug, Default)]
pub struct PagedWriterBuilder {
    destination: Option<Destination>,
    pager: Option<String>,
    terminal: Option<bool>,
}

impl PagedWriterBuilder {
    /// Sets the final destination of the output. Defaults to standard output.
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Sets the pager command line, for example `less -R`.
    pub fn pager(mut self, pager: impl Into<String>) -> Self {
        self.pager = Some(pager.into());
        self
    }

    /// Overrides terminal detection for the destination.
    pub fn terminal(mut self, terminal: bool) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// Builds the writer, starting the pager if all conditions hold.
    ///
    /// The pager is started when a command is configured, the destination is
    /// a terminal, the command resolves to an executable, and the destination
    /// can be handed to a subprocess. Otherwise output is written directly.
    ///
    /// Fails only when the pager was found but couldn't be started.
    pub fn build(self) -> Result<PagedWriter> {
        let destination = self.destination.unwrap_or(Destination::Stdout);
        let terminal = self
            .terminal
            .unwrap_or_else(|| destination.is_terminal());

        let pager = match self.pager.as_deref() {
            Some(line) if terminal => PagerCommand::resolve(line),
            _ => None,
        };

        let Some(pager) = pager else {
            return Ok(PagedWriter::direct(destination));
        };

        let stdout = match destination {
            Destination::Stdout => Stdio::inherit(),
            Destination::Stderr => Stdio::from(io::stderr()),
            Destination::File(file) => Stdio::from(file),
            Destination::Writer(writer) => {
                debug!(pager = pager.line(), "destination can't be handed to a pager");
                return Ok(PagedWriter::direct(Destination::Writer(writer)));
            }
        };

        PagedWriter::spawn(pager, stdout)
    }
}

enum State {
    Direct(Box<dyn Write + Send>),
    Piped {
        stdin: ChildStdin,
        done: Receiver<()>,
        pager: PagerCommand,
    },
    Closed,
}

/// Output stream that optionally goes through an external pager.
///
/// The decision to page is taken once, when the writer is built. In paged
/// mode everything written goes to the pager's input, and the pager writes to
/// the real destination. A background thread waits for the pager to exit;
/// [`PagedWriter::close`] closes the pager's input and waits for that thread,
/// so no pager process is left behind.
///
/// If the user quits the pager early, further writes fail with a broken pipe
/// error.
///
/// # Example
///
/// ```no_run
/// use std::io::Write;
/// use ocm_pager::{Destination, PagedWriter};
///
/// let mut out = PagedWriter::builder()
///     .destination(Destination::Stdout)
///     .pager("less -R")
///     .build()?;
/// writeln!(out, "ID  NAME")?;
/// out.close()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct PagedWriter {
    state: State,
}

impl PagedWriter {
    /// Creates a builder.
    pub fn builder() -> PagedWriterBuilder {
        PagedWriterBuilder::default()
    }

    /// Creates a writer that never pages.
    pub fn direct(destination: Destination) -> Self {
        PagedWriter {
            state: State::Direct(destination.into_writer()),
        }
    }

    fn spawn(pager: PagerCommand, stdout: Stdio) -> Result<Self> {
        let mut child = pager
            .command()
            .stdin(Stdio::piped())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| PagerError::Spawn {
                command: pager.line().to_string(),
                source,
            })?;

        let Some(stdin) = child.stdin.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(PagerError::MissingPipe(pager.line().to_string()));
        };

        let done = supervise(child, pager.line(), |task| {
            thread::Builder::new()
                .name("pager".to_string())
                .spawn(task)
                .map(drop)
        })?;

        debug!(pager = pager.line(), "started pager");
        Ok(PagedWriter {
            state: State::Piped { stdin, done, pager },
        })
    }

    /// Checks if output is going through a pager.
    pub fn is_paging(&self) -> bool {
        matches!(self.state, State::Piped { .. })
    }

    /// The pager in use, if any.
    pub fn pager(&self) -> Option<&PagerCommand> {
        match &self.state {
            State::Piped { pager, .. } => Some(pager),
            _ => None,
        }
    }

    /// Flushes pending output and, when paging, waits for the pager to exit.
    ///
    /// Closing twice is a no-op. Writes after closing fail.
    pub fn close(&mut self) -> io::Result<()> {
        match mem::replace(&mut self.state, State::Closed) {
            State::Direct(mut writer) => writer.flush(),
            State::Piped { stdin, done, pager } => {
                drop(stdin);
                // Disconnection means the supervisor is gone, which also
                // means the pager has been waited for or can't be.
                let _ = done.recv();
                debug!(pager = pager.line(), "closed pager");
                Ok(())
            }
            State::Closed => Ok(()),
        }
    }
}

type Task = Box<dyn FnOnce() + Send>;

/// Hands the child to a background task that waits for it to exit.
///
/// The returned channel disconnects, or receives, once the child is gone. If
/// the task can't be started the child is killed and reaped here.
fn supervise<F>(child: Child, line: &str, start: F) -> Result<Receiver<()>>
where
    F: FnOnce(Task) -> io::Result<()>,
{
    let (child_tx, child_rx) = mpsc::channel::<Child>();
    let (done_tx, done) = mpsc::channel();
    let name = line.to_string();
    let task: Task = Box::new(move || {
        if let Ok(mut child) = child_rx.recv() {
            match child.wait() {
                Ok(status) => debug!(pager = %name, %status, "pager exited"),
                Err(err) => warn!(pager = %name, error = %err, "can't wait for pager"),
            }
        }
        let _ = done_tx.send(());
    });

    let started = match start(task) {
        Ok(()) => child_tx.send(child).map_err(|mpsc::SendError(child)| {
            let err = io::Error::new(io::ErrorKind::Other, "pager supervisor exited early");
            (child, err)
        }),
        Err(err) => Err((child, err)),
    };
    match started {
        Ok(()) => Ok(done),
        Err((mut child, source)) => {
            let _ = child.kill();
            let _ = child.wait();
            Err(PagerError::Supervisor {
                command: line.to_string(),
                source,
            })
        }
    }
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "output already closed")
}

impl Write for PagedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.state {
            State::Direct(writer) => writer.write(buf),
            State::Piped { stdin, .. } => stdin.write(buf),
            State::Closed => Err(closed()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.state {
            State::Direct(writer) => writer.flush(),
            State::Piped { stdin, .. } => stdin.flush(),
            State::Closed => Ok(()),
        }
    }
}

impl Drop for PagedWriter {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            debug!(error = %err, "can't close output");
        }
    }
}

impl fmt::Debug for PagedWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            State::Direct(_) => "direct",
            State::Piped { .. } => "piped",
            State::Closed => "closed",
        };
        f.debug_struct("PagedWriter")
            .field("state", &state)
            .field("pager", &self.pager())
            .finish()
    }
}
