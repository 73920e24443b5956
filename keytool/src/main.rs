//! hotstuff-keytool: create validator identities and inspect the key registry.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use hotstuff_crypto::{generate_key, BlsPublicKey, BlsSecretKey, LeaderKey};
use hotstuff_engine::logging::{init_logging, LogFormat};
use hotstuff_engine::Config;
use hotstuff_store::ConsensusKeyStore;
use hotstuff_store_lmdb::{LmdbEnvironment, LmdbKeyStore};
use hotstuff_types::Address;
use tracing::info;

const MAX_DBS: u32 = 4;
const MAP_SIZE: usize = 64 * 1024 * 1024;

#[derive(Parser)]
#[command(name = "hotstuff-keytool", about = "HotStuff validator key tool")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "HOTSTUFF_LOG_LEVEL")]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, default_value = "human", env = "HOTSTUFF_LOG_FORMAT")]
    log_format: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate validator identities and register them by sorted index.
    Generate {
        /// Number of validators.
        #[arg(long, default_value_t = 4)]
        count: u32,

        /// LMDB directory of the key registry.
        #[arg(long, env = "HOTSTUFF_KEY_DB")]
        db: PathBuf,
    },
    /// Print the first `count` registered validators.
    List {
        #[arg(long)]
        count: u32,

        #[arg(long, env = "HOTSTUFF_KEY_DB")]
        db: PathBuf,
    },
    /// Print a configuration preset as TOML.
    Config {
        /// "basic" or "event-driven".
        #[arg(long, default_value = "basic")]
        preset: String,
    },
}

struct Identity {
    leader: LeaderKey,
    bls: BlsSecretKey,
}

fn open_registry(path: &Path) -> anyhow::Result<LmdbKeyStore> {
    let env = LmdbEnvironment::open(path, MAX_DBS, MAP_SIZE)
        .with_context(|| format!("opening key registry at {}", path.display()))?;
    Ok(env.key_store()?)
}

fn generate(count: u32, db: &Path) -> anyhow::Result<()> {
    if count == 0 {
        bail!("--count must be at least 1");
    }
    let mut identities = (0..count)
        .map(|_| {
            Ok(Identity {
                leader: LeaderKey::generate()?,
                bls: generate_key()?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    identities.sort_by_key(|id| id.leader.address());

    let registry = open_registry(db)?;
    for (index, id) in identities.iter().enumerate() {
        let index = index as u32;
        let public_key = id.bls.public_key();
        registry.put_validator_address(index, &id.leader.address())?;
        registry.put_bls_public_key(index, &public_key.to_bytes())?;

        println!("validator {index}");
        println!("  address:        {}", id.leader.address());
        println!("  bls public key: {}", hex::encode(public_key.to_bytes()));
        println!("  leader secret:  {}", hex::encode(&id.leader.to_bytes()[..]));
        println!("  bls secret:     {}", hex::encode(&id.bls.to_bytes()[..]));
    }
    info!(count, db = %db.display(), "registered validators");
    Ok(())
}

fn list(count: u32, db: &Path) -> anyhow::Result<()> {
    let registry = open_registry(db)?;
    let addresses: Vec<Address> = registry.validator_addresses(count)?;
    for (index, address) in addresses.iter().enumerate() {
        let key_bytes = registry.get_bls_public_key(index as u32)?;
        let key = BlsPublicKey::from_bytes(&key_bytes)
            .with_context(|| format!("validator {index} has an invalid BLS key"))?;
        println!("{index} {address} {}", hex::encode(key.to_bytes()));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let format: LogFormat = cli.log_format.parse().map_err(anyhow::Error::msg)?;
    init_logging(format, &cli.log_level);

    match cli.command {
        Command::Generate { count, db } => generate(count, &db),
        Command::List { count, db } => list(count, &db),
        Command::Config { preset } => {
            let config = match preset.as_str() {
                "basic" => Config::basic(),
                "event-driven" => Config::event_driven(),
                other => bail!("unknown preset '{other}'"),
            };
            print!("{}", config.to_toml_string());
            Ok(())
        }
    }
}
