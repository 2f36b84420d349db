use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

/// A pager command line resolved to an executable on the search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerCommand {
    line: String,
    program: PathBuf,
    args: Vec<String>,
}

impl PagerCommand {
    /// Resolves a pager command line such as `less -R`.
    ///
    /// Returns `None` when the line is blank, can't be split into words, or
    /// names a program that isn't on the search path. None of these are
    /// errors: the caller just doesn't page.
    pub fn resolve(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(err) => {
                debug!(pager = line, error = %err, "can't parse pager command");
                return None;
            }
        };
        let (program, args) = words.split_first()?;

        match which::which(program) {
            Ok(path) => Some(PagerCommand {
                line: line.to_string(),
                program: path,
                args: args.to_vec(),
            }),
            Err(err) => {
                debug!(pager = line, error = %err, "pager not found");
                None
            }
        }
    }

    /// The command line as configured.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Absolute path of the pager executable.
    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    /// Arguments passed to the pager.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub(crate) fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}
