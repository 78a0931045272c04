//! Audit trail for operator-facing operations.
//!
//! [`AuditLog::record`] wraps an operation: it runs the closure, then appends
//! one CSV record with the function name, its arguments, the rendered result
//! and the time the call started. The log is write-only.

use std::fmt::{Debug, Display};
use std::io::Write;

use chrono::Local;
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error, info_span};

use crate::{
    account::{Account, Posting},
    client::Client,
};

const AUDIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Serialize)]
struct AuditRecord<'a> {
    function: &'a str,
    arguments: String,
    result: String,
    timestamp: String,
}

/// Compact rendering of an operation's return value for the audit trail.
pub trait AuditValue {
    fn audit_repr(&self) -> String;
}

impl AuditValue for () {
    fn audit_repr(&self) -> String {
        "None".to_string()
    }
}

impl AuditValue for bool {
    fn audit_repr(&self) -> String {
        self.to_string()
    }
}

impl AuditValue for Decimal {
    fn audit_repr(&self) -> String {
        self.to_string()
    }
}

impl AuditValue for Client {
    fn audit_repr(&self) -> String {
        format!("Client({})", self.tax_id)
    }
}

impl AuditValue for Account {
    fn audit_repr(&self) -> String {
        format!("Account({}/{})", self.branch, self.number)
    }
}

impl AuditValue for Posting {
    fn audit_repr(&self) -> String {
        self.entry.amount.abs().to_string()
    }
}

impl<T: AuditValue + ?Sized> AuditValue for &T {
    fn audit_repr(&self) -> String {
        (**self).audit_repr()
    }
}

impl<T: AuditValue + ?Sized> AuditValue for &mut T {
    fn audit_repr(&self) -> String {
        (**self).audit_repr()
    }
}

impl<T: AuditValue> AuditValue for Option<T> {
    fn audit_repr(&self) -> String {
        match self {
            Some(value) => value.audit_repr(),
            None => "None".to_string(),
        }
    }
}

impl<T: AuditValue, E: Display> AuditValue for Result<T, E> {
    fn audit_repr(&self) -> String {
        match self {
            Ok(value) => value.audit_repr(),
            Err(err) => format!("Error({err})"),
        }
    }
}

pub fn format_arguments(arguments: &[&dyn Debug]) -> String {
    arguments
        .iter()
        .map(|arg| format!("{arg:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct AuditLog<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AuditLog<W> {
    /// Records carry no header row so that repeated runs can append to the
    /// same file.
    pub fn new(sink: W) -> Self {
        AuditLog {
            writer: WriterBuilder::new().has_headers(false).from_writer(sink),
        }
    }

    pub fn record<T, F>(&mut self, function: &str, arguments: &[&dyn Debug], op: F) -> T
    where
        T: AuditValue,
        F: FnOnce() -> T,
    {
        let started = Local::now();
        let arguments = format_arguments(arguments);
        let span = info_span!("operation", function);
        let _guard = span.enter();
        debug!(%arguments, "calling");
        let result = op();
        let record = AuditRecord {
            function,
            arguments,
            result: result.audit_repr(),
            timestamp: started.format(AUDIT_TIMESTAMP_FORMAT).to_string(),
        };
        if let Err(err) = self.append(&record) {
            error!(%err, "failed to write audit record");
        }
        debug!(result = %record.result, "finished");
        result
    }

    fn append(&mut self, record: &AuditRecord<'_>) -> csv::Result<()> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> std::io::Result<W> {
        self.writer.into_inner().map_err(|err| err.into_error())
    }
}
