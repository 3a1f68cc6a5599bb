//! diaspora Salmon tool
//!
//! Generates RSA keys and signs or verifies Magic Envelopes and slaps from
//! the command line:
//!
//!   diaspora-salmon keygen --out alice.pem
//!   diaspora-salmon sign --key alice.pem --entity post.xml > env.xml
//!   diaspora-salmon verify --key alice.pub --envelope env.xml
//!
//! Logs go to stderr; results go to stdout.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use diaspora_crypto::DEFAULT_KEY_BITS;
use diaspora_salmon_cli as cmd;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "diaspora-salmon")]
#[command(about = "diaspora keys, Magic Envelopes and Salmon slaps")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an RSA key pair (`<out>` and `<out>.pub`)
    Keygen {
        #[arg(short, long, default_value = "diaspora.pem")]
        out: PathBuf,

        #[arg(long, default_value_t = DEFAULT_KEY_BITS)]
        bits: usize,
    },

    /// Sign an entity into a Magic Envelope
    Sign {
        /// Author's private key
        #[arg(short, long)]
        key: PathBuf,

        /// Entity XML
        #[arg(short, long)]
        entity: PathBuf,

        /// Encrypt the payload and write the cipher params to this file
        #[arg(long)]
        params_out: Option<PathBuf>,
    },

    /// Verify a Magic Envelope and print its entity
    Verify {
        /// Author's public (or private) key
        #[arg(short, long)]
        key: PathBuf,

        #[arg(long)]
        envelope: PathBuf,

        /// Cipher params of an encrypted payload
        #[arg(long)]
        params: Option<PathBuf>,
    },

    /// Wrap an entity in a public slap, or a private one for `--recipient`
    Slap {
        /// Author's diaspora ID
        #[arg(short, long)]
        author: String,

        #[arg(short, long)]
        key: PathBuf,

        #[arg(short, long)]
        entity: PathBuf,

        /// Recipient's public key
        #[arg(long)]
        recipient: Option<PathBuf>,
    },

    /// Open a slap and print its author and entity
    Open {
        /// Author's public key
        #[arg(short, long)]
        key: PathBuf,

        #[arg(long)]
        slap: PathBuf,

        /// Recipient's private key, for private slaps
        #[arg(long)]
        recipient_key: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match args.command {
        Command::Keygen { out, bits } => {
            info!("Generating {}-bit RSA key pair", bits);
            let keys = cmd::generate_keys(bits)?;
            let public_path = cmd::write_keys(&keys, &out)?;
            println!("{}", public_path.display());
        }
        Command::Sign {
            key,
            entity,
            params_out,
        } => {
            let key = cmd::read_private_key(&key)?;
            let signed = cmd::sign(&key, &cmd::read(&entity)?, params_out.is_some())?;
            if let (Some(path), Some(params)) = (params_out, signed.params) {
                fs::write(&path, params)
                    .with_context(|| format!("Failed to write cipher params to {}", path.display()))?;
            }
            println!("{}", signed.envelope);
        }
        Command::Verify {
            key,
            envelope,
            params,
        } => {
            let key = cmd::read_public_key(&key)?;
            let params = params.map(|path| cmd::read(&path)).transpose()?;
            let entity = cmd::verify(&key, &cmd::read(&envelope)?, params.as_deref())?;
            info!("Valid signature on {} entity", entity.kind());
            println!("{}", entity.to_xml()?);
        }
        Command::Slap {
            author,
            key,
            entity,
            recipient,
        } => {
            let key = cmd::read_private_key(&key)?;
            let recipient = recipient.map(|path| cmd::read_public_key(&path)).transpose()?;
            let xml = cmd::slap(&author, &key, &cmd::read(&entity)?, recipient.as_ref())?;
            println!("{}", xml);
        }
        Command::Open {
            key,
            slap,
            recipient_key,
        } => {
            let key = cmd::read_public_key(&key)?;
            let recipient_key = recipient_key
                .map(|path| cmd::read_private_key(&path))
                .transpose()?;
            let (author, entity) = cmd::open(&key, &cmd::read(&slap)?, recipient_key.as_ref())?;
            info!("Valid slap from {}", author);
            println!("{}", entity.to_xml()?);
        }
    }

    Ok(())
}
