//! Load keys from stdin into a probe table, then look one up.
//!
//! Each input line up to the first empty line (or EOF) is stored with its
//! first byte as the value. The line after that is looked up and the
//! stored value is printed as a signed byte, or `0` when absent.

use clap::{ArgAction, Parser};
use probe_table::{Key, ProbeTable, Slot, MAX_KEY_LENGTH};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

macro_rules! die {
    ($fmt:literal, $($arg:tt)*) => {{
        eprintln!($fmt, $($arg)*);
        std::process::exit(1);
    }};

    ($msg:literal) => {{
        eprintln!($msg);
        std::process::exit(1);
    }};
}

/// Longest input line kept; the rest of a longer line is discarded.
const MAX_INPUT: usize = MAX_KEY_LENGTH + 1;

#[derive(Parser, Debug)]
#[command(version, about = "Probe table stdin benchmark")]
struct BenchArgs {
    /// Number of slots in the table
    #[arg(short, long, default_value_t = 300_000)]
    capacity: usize,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(quiet: bool, verbose: u8) -> LevelFilter {
    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // Library code logs through the log crate.
    if let Err(e) = tracing_log::LogTracer::init() {
        die!("INTERNAL ERROR: setting log tracer failed: {}", e);
    }

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("PROBE_LOG")
        .from_env_lossy();

    let subscriber = Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        die!("INTERNAL ERROR: setting default tracing::subscriber failed");
    }

    level_filter
}

/// Read one line without its newline, keeping at most `MAX_INPUT` bytes.
/// `None` at EOF.
fn read_line(input: &mut impl BufRead, buf: &mut Vec<u8>) -> io::Result<Option<()>> {
    buf.clear();
    if input.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    buf.truncate(MAX_INPUT);
    Ok(Some(()))
}

fn run(args: &BenchArgs) -> io::Result<()> {
    let mut slots: Vec<Slot<u8>> = vec![Slot::vacant(); args.capacity];
    let mut table = ProbeTable::init(&mut slots);

    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "Memory used: entry = (key, value) + padding = ({} + {}) + padding = {} bytes, {} elements, total {} bytes",
        std::mem::size_of::<Key>(),
        std::mem::size_of::<Option<u8>>(),
        std::mem::size_of::<Slot<u8>>(),
        args.capacity,
        std::mem::size_of::<Slot<u8>>() * args.capacity,
    )?;

    let mut stdin = io::stdin().lock();
    let mut line = Vec::with_capacity(MAX_INPUT + 1);
    while read_line(&mut stdin, &mut line)?.is_some() && !line.is_empty() {
        let key = Key::new(&line);
        // A line starting with NUL has no key bytes; skip it.
        let Some(&first) = key.as_bytes().first() else {
            continue;
        };
        if let Err(e) = table.insert(key, first) {
            die!("Error inserting {:?}: {}", key, e);
        }
    }
    debug!(
        "loaded {} keys, {} tombstones, {} vacant slots",
        table.len(),
        table.tombstones(),
        table.vacant()
    );

    read_line(&mut stdin, &mut line)?;
    let found = table.lookup(&line).copied().unwrap_or(0);
    writeln!(stdout, "{}", found as i8)?;

    Ok(())
}

fn main() {
    let args = BenchArgs::parse();
    let level_filter = init_tracing(args.quiet, args.verbose);

    info!(
        "starting {} {}, capacity {}, log level: {level_filter}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        args.capacity
    );

    if let Err(e) = run(&args) {
        die!("Error: {}", e);
    }
}
