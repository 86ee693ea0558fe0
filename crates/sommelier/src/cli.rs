use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{OptionExt, eyre};
use somm_types::KeyPair;

#[derive(Parser)]
#[command(version, about = "A single-node chain that schedules validator-approved cellar calls")]
pub enum Options {
    /// Run the node: produce blocks and serve transactions and queries over HTTP.
    Start(start::Start),
    /// Generate a new signing keypair.
    Keygen(keygen::Keygen),
    /// Sign and submit a transaction.
    #[command(subcommand)]
    Tx(tx::Tx),
    /// Query the state of a running node.
    Query(query::Query),
}

// One module per top-level subcommand
mod keygen;
mod query;
mod start;
mod tx;

pub trait Run {
    fn run(self) -> impl Future<Output = color_eyre::Result<()>> + Send;
}

impl Run for Options {
    async fn run(self) -> color_eyre::Result<()> {
        match self {
            Self::Start(start) => start.run().await,
            Self::Keygen(keygen) => keygen.run().await,
            Self::Tx(tx) => tx.run().await,
            Self::Query(query) => query.run().await,
        }
    }
}

/// The directory holding node state and keys: the given one, or a platform-specific default.
fn homedir(homedir: Option<&Path>) -> color_eyre::Result<PathBuf> {
    if let Some(homedir) = homedir {
        return Ok(homedir.to_path_buf());
    }
    let directories = directories::ProjectDirs::from("finance", "sommelier", "sommelier")
        .ok_or_eyre("could not determine home directory")?;
    Ok(directories.data_local_dir().to_path_buf())
}

fn keypath(homedir: &Path) -> PathBuf {
    homedir.join("signing_key.pkcs8.hex")
}

async fn keypair(home: Option<&Path>) -> color_eyre::Result<KeyPair> {
    let keypath = keypath(&homedir(home)?);
    let keyhex = tokio::fs::read_to_string(&keypath)
        .await
        .map_err(|_| eyre!("could not read keypair at: {}", keypath.display()))?;
    let keybytes = hex::decode(keyhex.trim())
        .map_err(|_| eyre!("could not decode keypair hex at: {}", keypath.display()))?;
    KeyPair::decode(&keybytes).map_err(|_| eyre!("could not parse keypair at: {}", keypath.display()))
}
