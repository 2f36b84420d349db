//! ocm-table - prints OCM API documents as fixed-width tables.
//!
//! Reads a JSON document from a file or standard input: a list of objects,
//! a list response with an `items` array, or a single object. Each object is
//! printed as one row.
//!
//! ```text
//! ocm-table --name clusters --columns id,name,state clusters.json
//! curl -s "$URL/api/clusters_mgmt/v1/clusters" | ocm-table --columns id,name
//! ```
//!
//! Logging goes to standard error and is controlled with `OCM_LOG`
//! (`warn` by default).

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use ocm_output::{
    descriptions, Config, Destination, OutputError, Printer, Value, DEFAULT_LEARNING_LIMIT,
};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable with the log filter.
const LOG_ENV: &str = "OCM_LOG";

/// Print OCM API documents as tables
#[derive(Debug, Parser)]
#[command(name = "ocm-table", version)]
struct Cli {
    /// JSON document to print; standard input when missing or `-`
    file: Option<PathBuf>,

    /// Table name, selects column headers and widths
    #[arg(long, default_value = "clusters")]
    name: String,

    /// Comma separated columns to print, can be repeated
    #[arg(long, value_name = "SPEC")]
    columns: Vec<String>,

    /// Don't print the header row
    #[arg(long)]
    no_headers: bool,

    /// Use the configured column widths without adjusting them to the data
    #[arg(long)]
    no_learning: bool,

    /// Number of rows used to adjust column widths
    #[arg(long, value_name = "ROWS", default_value_t = DEFAULT_LEARNING_LIMIT)]
    learning_limit: usize,

    /// Pager command, overrides the configuration
    #[arg(long, value_name = "COMMAND")]
    pager: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("can't load configuration")?;
    let input = read_input(cli.file.as_ref())?;
    print(&cli, &config, &input, Destination::Stdout)
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("can't read '{}'", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("can't read standard input")?;
            Ok(text)
        }
    }
}

/// Objects to print from a document.
fn rows(document: serde_json::Value) -> Vec<serde_json::Value> {
    match document {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut object) => match object.remove("items") {
            Some(serde_json::Value::Array(items)) => items,
            Some(other) => {
                object.insert("items".to_string(), other);
                vec![serde_json::Value::Object(object)]
            }
            None => vec![serde_json::Value::Object(object)],
        },
        serde_json::Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Column specs from the command line, or all described columns.
fn column_specs(cli: &Cli) -> Result<Vec<String>> {
    if !cli.columns.is_empty() {
        return Ok(cli.columns.clone());
    }
    match descriptions::lookup(&cli.name)? {
        Some(description) => Ok(vec![description.column_names().join(",")]),
        None => bail!(
            "table '{}' has no known columns, use --columns to select them",
            cli.name
        ),
    }
}

fn print(cli: &Cli, config: &Config, input: &str, destination: Destination) -> Result<()> {
    let document: serde_json::Value =
        serde_json::from_str(input).context("can't parse input document")?;
    let rows = rows(document);
    let specs = column_specs(cli)?;
    debug!(table = %cli.name, rows = rows.len(), columns = ?specs, "printing table");

    let mut printer = Printer::builder().destination(destination);
    if let Some(pager) = cli.pager.clone().or_else(|| config.pager()) {
        printer = printer.pager(pager);
    }
    let mut printer = printer.build()?;

    let written = write_table(&mut printer, cli, specs, rows);
    let closed = printer.close();
    match written.and(closed) {
        Err(err) if is_broken_pipe(&err) => {
            debug!("output closed before the table was complete");
            Ok(())
        }
        result => Ok(result?),
    }
}

fn write_table(
    printer: &mut Printer,
    cli: &Cli,
    specs: Vec<String>,
    rows: Vec<serde_json::Value>,
) -> ocm_output::Result<()> {
    let mut table = specs
        .into_iter()
        .fold(printer.new_table().name(cli.name.clone()), |builder, spec| {
            builder.columns(spec)
        })
        .learning(!cli.no_learning)
        .learning_limit(cli.learning_limit)
        .build()?;

    if !cli.no_headers {
        table.write_headers()?;
    }
    for row in rows {
        table.write_object(&Value::from(row))?;
    }
    table.flush()
}

fn is_broken_pipe(err: &OutputError) -> bool {
    matches!(err, OutputError::Io(io_err) if io_err.kind() == io::ErrorKind::BrokenPipe)
}
