mod config;
mod error;
mod logging;
mod server;
mod store;

use std::io::{self, Write};
use std::process;
use std::sync::Arc;

use chainrecord_lib::codec::decode_as;
use chainrecord_lib::dispatch::{self, Surface};
use chainrecord_lib::ledger::read_key;
use chainrecord_lib::{RecordKind, Store};
use clap::{Parser, Subcommand};

use crate::config::{Config, StorageBackend};
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "chainrecord")]
#[command(version)]
#[command(about = "Marketer, account and assignment records on a key-value ledger", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short = 'c', long = "config", default_value = "chainrecord.toml", global = true)]
    config: String,

    /// Directory of the sled database (overrides config)
    #[arg(short = 'd', long = "data-dir", env = "CHAINRECORD_DATA_DIR", global = true)]
    data_dir: Option<String>,

    /// Keep state in memory only
    #[arg(long = "memory", global = true)]
    memory: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store the deploy-time seed value
    Deploy {
        /// Seed value stored under hello_world
        seed: Vec<String>,
    },
    /// Run a mutating operation: init, write, account, assign
    Invoke {
        /// Operation name
        function: String,

        /// Positional arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run a read-only operation: read
    Query {
        /// Operation name
        function: String,

        /// Positional arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Decode and pretty-print the record stored under a key
    Show {
        /// Kind to decode the value as (marketer, account, assignment)
        #[arg(short = 'k', long = "kind")]
        kind: RecordKind,

        key: String,
    },
    /// List keys holding a value
    List,
    /// Print the positional field order of a record kind
    Fields {
        kind: RecordKind,
    },
    /// Serve invoke/query over HTTP
    Serve {
        /// Port to listen on
        #[arg(short = 'p', long = "port")]
        port: Option<u16>,

        /// Address to bind
        #[arg(long = "hostname")]
        hostname: Option<String>,
    },
}

fn open_store(config: &Config) -> Result<Arc<dyn Store>, CliError> {
    Ok(store::open(&config.storage)?)
}

fn print_payload(payload: &[u8]) {
    if payload.is_empty() {
        return;
    }
    let mut out = io::stdout().lock();
    let _ = out.write_all(payload);
    let _ = writeln!(out);
}

fn run_surface(
    config: &Config,
    surface: Surface,
    function: &str,
    args: &[String],
) -> Result<(), CliError> {
    let store = open_store(config)?;
    let payload = dispatch::dispatch(surface, store.as_ref(), function, args)?;
    print_payload(&payload);
    Ok(())
}

fn run_deploy(config: &Config, seed: &[String]) -> Result<(), CliError> {
    let store = open_store(config)?;
    dispatch::deploy(store.as_ref(), seed)?;
    println!("seed stored");
    Ok(())
}

fn run_show(config: &Config, kind: RecordKind, key: &str) -> Result<(), CliError> {
    let store = open_store(config)?;
    let bytes = read_key(store.as_ref(), key)?;
    let record = decode_as(kind, &bytes)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn run_list(config: &Config) -> Result<(), CliError> {
    let store = open_store(config)?;
    for key in store.keys()? {
        println!("{}", key);
    }
    Ok(())
}

fn run_fields(kind: RecordKind) {
    for (i, name) in kind.fields().iter().enumerate() {
        println!("{:>2}  {}", i, name);
    }
}

fn report(err: &CliError) {
    eprintln!("{}: {}", err.kind(), err);
    if let CliError::Ledger(e) = err {
        if let Some(payload) = e.payload() {
            eprintln!("{}", String::from_utf8_lossy(payload));
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Args::parse();

    let mut config = Config::load(&cli.config);
    config.apply_env_overrides();
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    if cli.memory {
        config.storage.backend = StorageBackend::Memory;
    }
    logging::init(&config.log);

    let result = match cli.cmd {
        Command::Deploy { seed } => run_deploy(&config, &seed),
        Command::Invoke { function, args } => {
            run_surface(&config, Surface::Invoke, &function, &args)
        }
        Command::Query { function, args } => run_surface(&config, Surface::Query, &function, &args),
        Command::Show { kind, key } => run_show(&config, kind, &key),
        Command::List => run_list(&config),
        Command::Fields { kind } => {
            run_fields(kind);
            Ok(())
        }
        Command::Serve { port, hostname } => {
            let port = port.unwrap_or(config.server.port);
            let hostname = hostname.unwrap_or_else(|| config.server.hostname.clone());
            let backend = store::backend_name(config.storage.backend);
            match open_store(&config) {
                Ok(store) => server::run_serve(store, backend, &hostname, port).await,
                Err(e) => Err(e),
            }
        }
    };

    if let Err(e) = result {
        report(&e);
        process::exit(1);
    }
}
