//! `parson` CLI: convert JSON to Emacs Lisp values and back.
//!
//! ## Usage
//!
//! ```sh
//! # Parse JSON into a Lisp value (stdin → stdout)
//! echo '{"name":"Alice","tags":["a","b"]}' | parson parse
//! # (("name" . "Alice") ("tags" . ["a" "b"]))
//!
//! # Parse objects as hash tables, failing loudly on malformed input
//! parson parse --strict --object-type hash-table -i data.json
//!
//! # JSON → Lisp → JSON, file to file
//! parson roundtrip -i data.json -o data.min.json
//!
//! # Validate JSON
//! parson check -i data.json
//!
//! # Debug logging (or set RUST_LOG)
//! parson -v parse -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use parson_core::{
    parse_with, stringify_with, try_parse, HostValue, ObjectType, ParseOptions, StringifyOptions,
    DEFAULT_MAX_DEPTH,
};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "parson",
    version,
    about = "Convert between JSON and Emacs Lisp values"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse JSON and print the resulting Lisp value
    Parse {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Fail on malformed JSON instead of printing nil
        #[arg(long)]
        strict: bool,
        /// Lisp representation of JSON objects
        #[arg(long, value_enum, default_value_t = ObjectTypeArg::Alist)]
        object_type: ObjectTypeArg,
        /// Maximum nesting depth
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Parse JSON into Lisp values and serialize it back to JSON
    Roundtrip {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Maximum nesting depth
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Check that the input is valid JSON
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ObjectTypeArg {
    /// (("key" . value) ...)
    Alist,
    /// #s(hash-table ...)
    HashTable,
}

impl From<ObjectTypeArg> for ObjectType {
    fn from(arg: ObjectTypeArg) -> Self {
        match arg {
            ObjectTypeArg::Alist => ObjectType::Alist,
            ObjectTypeArg::HashTable => ObjectType::HashTable,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse {
            input,
            output,
            strict,
            object_type,
            max_depth,
        } => {
            let json = read_input(input.as_deref())?;
            let opts = ParseOptions::default()
                .with_object_type(object_type.into())
                .with_max_depth(max_depth);
            let value = match parse_with(&json, &opts) {
                Ok(value) => value,
                Err(err) if !strict => {
                    debug!(%err, "input rejected, printing nil");
                    HostValue::Nil
                }
                Err(err) => return Err(err).context("Failed to parse JSON"),
            };
            write_output(output.as_deref(), &format!("{value}\n"))?;
        }
        Commands::Roundtrip {
            input,
            output,
            max_depth,
        } => {
            let json = read_input(input.as_deref())?;
            let parse_opts = ParseOptions::default()
                .with_object_type(ObjectType::HashTable)
                .with_max_depth(max_depth);
            let value = parse_with(&json, &parse_opts).context("Failed to parse JSON")?;
            let stringify_opts = StringifyOptions::default().with_max_depth(max_depth);
            let out = stringify_with(&value, &stringify_opts)
                .context("Failed to serialize Lisp value to JSON")?;
            write_output(output.as_deref(), &format!("{out}\n"))?;
        }
        Commands::Check { input } => {
            let json = read_input(input.as_deref())?;
            let value = try_parse(&json).context("Invalid JSON")?;
            println!("valid JSON ({})", value.type_name());
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for converted output.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
