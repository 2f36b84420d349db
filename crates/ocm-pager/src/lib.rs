//! Paged output for command line tools.
//!
//! [`PagedWriter`] is an [`std::io::Write`] that sends output through an
//! external pager (such as `less`) when the output goes to an interactive
//! terminal, and writes it directly otherwise. A pager that isn't installed
//! silently disables paging.

mod command;
mod error;
mod pager;

pub use command::PagerCommand;
pub use error::{PagerError, Result};
pub use pager::{Destination, PagedWriter, PagedWriterBuilder};
