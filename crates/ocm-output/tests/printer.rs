//! Printer construction and pager fallback.

use std::fs;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use ocm_output::{Destination, Printer, Value};
use serde_json::json;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn missing_pager_writes_directly() {
    let buffer = Buffer::default();
    let mut printer = Printer::builder()
        .writer(buffer.clone())
        .pager("ocm-no-such-pager-installed --quit")
        .build()
        .unwrap();
    assert!(!printer.is_paging());

    {
        let mut table = printer
            .new_table()
            .name("idps")
            .columns("name")
            .learning(false)
            .build()
            .unwrap();
        table.write_headers().unwrap();
        table
            .write_object(&Value::from(json!({"name": "github"})))
            .unwrap();
    }
    printer.close().unwrap();

    let text = buffer.text();
    assert!(text.starts_with("NAME"));
    assert!(text.contains("github"));
}

#[test]
fn missing_pager_on_terminal_writes_directly() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut printer = Printer::builder()
        .destination(Destination::File(file.reopen().unwrap()))
        .pager("ocm-no-such-pager-installed")
        .terminal(true)
        .build()
        .unwrap();
    assert!(!printer.is_paging());
    writeln!(printer, "direct").unwrap();
    printer.close().unwrap();

    assert_eq!(fs::read_to_string(file.path()).unwrap(), "direct\n");
}

#[test]
fn blank_pager_writes_directly() {
    let buffer = Buffer::default();
    let mut printer = Printer::builder()
        .writer(buffer.clone())
        .pager("   ")
        .terminal(true)
        .build()
        .unwrap();
    assert!(!printer.is_paging());
    write!(printer, "x").unwrap();
    printer.close().unwrap();
    assert_eq!(buffer.text(), "x");
}

#[test]
fn writes_after_close_fail() {
    let mut printer = Printer::builder().writer(io::sink()).build().unwrap();
    printer.close().unwrap();
    printer.close().unwrap();
    let err = printer.write_all(b"late").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}

#[cfg(unix)]
#[test]
fn tables_go_through_the_pager() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut printer = Printer::builder()
        .destination(Destination::File(file.reopen().unwrap()))
        .pager("cat")
        .terminal(true)
        .build()
        .unwrap();
    assert!(printer.is_paging());

    {
        let mut table = printer
            .new_table()
            .name("machine_pools")
            .columns("id,replicas")
            .build()
            .unwrap();
        table.write_headers().unwrap();
        for i in 0..3 {
            table
                .write_object(&Value::from(json!({"id": format!("pool-{}", i), "replicas": i})))
                .unwrap();
        }
    }
    printer.close().unwrap();

    let text = fs::read_to_string(file.path()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("ID"));
    assert!(lines[3].starts_with("pool-2"));
}
