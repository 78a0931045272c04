use std::{
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{audit::AuditLog, session::Session};

mod account;
mod address;
mod audit;
mod client;
mod directory;
mod error;
mod history;
mod session;
mod transaction;

#[derive(Debug, Parser)]
#[command(name = "checking-ledger", version, about = "In-memory checking account simulator")]
pub struct Args {
    /// File receiving one audit record per operation (appended to)
    #[arg(long, env = "LEDGER_AUDIT_LOG", default_value = "log.txt")]
    audit_log: PathBuf,

    /// Discard audit records instead of writing them
    #[arg(long)]
    no_audit: bool,

    /// Read menu input from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("failed to install tracing subscriber")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let sink: Box<dyn Write> = if args.no_audit {
        Box::new(io::sink())
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&args.audit_log)
            .with_context(|| format!("failed to open audit log {}", args.audit_log.display()))?;
        Box::new(file)
    };

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut session = Session::new(input, io::stdout(), AuditLog::new(sink));
    session.run()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_init_reports_second_install() {
        assert!(init_tracing("warn").is_ok());
        let err = init_tracing("warn").unwrap_err();
        assert!(err.to_string().contains("failed to install tracing subscriber"));
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["checking-ledger"]).unwrap();
        assert_eq!(args.log_level, "warn");
        assert!(!args.no_audit);
        assert!(args.script.is_none());
    }
}
