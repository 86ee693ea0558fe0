use std::path::PathBuf;

use color_eyre::eyre::eyre;
use somm_types::{KeyPair, OrchestratorAddress};

use super::{Run, homedir, keypath};

#[derive(clap::Args)]
pub struct Keygen {
    /// Home directory for storing keys (defaults to platform-specific directory).
    #[clap(long)]
    pub home: Option<PathBuf>,
}

impl Run for Keygen {
    async fn run(self) -> color_eyre::Result<()> {
        let homedir = homedir(self.home.as_deref())?;
        tokio::fs::create_dir_all(&homedir).await?;

        let keypath = keypath(&homedir);
        if keypath.exists() {
            return Err(eyre!("keypair already exists at: {}", keypath.display()));
        }

        let keypair = KeyPair::generate().map_err(|_| eyre!("could not generate keypair"))?;
        println!("Writing new keypair to: {}", keypath.display());
        tokio::fs::write(&keypath, hex::encode(keypair.encode())).await?;

        println!("public key:           {}", hex::encode(keypair.public_key()));
        println!(
            "orchestrator address: {}",
            OrchestratorAddress::from_public_key(keypair.public_key())
        );

        Ok(())
    }
}
