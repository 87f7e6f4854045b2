//! SSDB CLI Client
//!
//! Command-line interface for talking to an SSDB-compatible server.

use bytes::Bytes;
use clap::{Parser, Subcommand};
use ssdb::{Client, ClientConfig, Request};
use tracing_subscriber::{fmt, EnvFilter};

/// SSDB CLI
#[derive(Parser, Debug)]
#[command(name = "ssdb-cli")]
#[command(about = "CLI for SSDB-compatible key-value stores")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "8888")]
    port: u16,

    /// Read timeout in milliseconds (0 waits forever)
    #[arg(short, long, default_value = "0")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Increment an integer value
    Incr {
        /// The key to increment
        key: String,

        /// Amount to add
        #[arg(default_value = "1", allow_negative_numbers = true)]
        by: i64,
    },

    /// Get a field of a hash
    Hget {
        /// Hash name
        name: String,

        /// Field name
        field: String,
    },

    /// Set a field of a hash
    Hset {
        /// Hash name
        name: String,

        /// Field name
        field: String,

        /// Field value
        value: String,
    },

    /// Push an item onto the back of a queue
    Qpush {
        /// Queue name
        name: String,

        /// Item to push
        item: String,
    },

    /// Pop an item from the front of a queue
    Qpop {
        /// Queue name
        name: String,
    },

    /// Send an arbitrary command and print every returned block
    Raw {
        /// Command name
        command: String,

        /// Command arguments
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,ssdb=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> ssdb::Result<()> {
    let config = ClientConfig::builder()
        .host(&args.host)
        .port(args.port)
        .read_timeout_ms(args.timeout_ms)
        .build()?;

    let mut client = Client::with_config(&config)?;
    tracing::debug!("Connected to {}", client.connection().peer_addr());

    match args.command {
        Commands::Get { key } => print_optional(client.get(key)?),
        Commands::Set { key, value } => {
            client.set(key, value)?;
            println!("ok");
        }
        Commands::Del { key } => {
            client.del(key)?;
            println!("ok");
        }
        Commands::Incr { key, by } => println!("{}", client.incr(key, by)?),
        Commands::Hget { name, field } => print_optional(client.hget(name, field)?),
        Commands::Hset { name, field, value } => {
            client.hset(name, field, value)?;
            println!("ok");
        }
        Commands::Qpush { name, item } => {
            client.qpush(name, item)?;
            println!("ok");
        }
        Commands::Qpop { name } => print_optional(client.qpop(name)?),
        Commands::Raw { command, args } => {
            for block in client.request(&Request::new(command).args(args))? {
                println!("{}", String::from_utf8_lossy(&block));
            }
        }
    }

    client.close()
}

fn print_optional(value: Option<Bytes>) {
    match value {
        Some(v) => println!("{}", String::from_utf8_lossy(&v)),
        None => println!("(not found)"),
    }
}
