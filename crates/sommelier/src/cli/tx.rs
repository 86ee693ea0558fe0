use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use alloy_primitives::{Address, Bytes as CallBytes};
use color_eyre::eyre::{bail, eyre};
use prost::bytes::Bytes;
use reqwest::Url;
use somm_types::{
    Cork, Decimal, Params,
    transaction::{Builder, ChainId},
};
use tendermint_rpc::{Client, HttpClient};

use super::{Run, keypair};

#[derive(clap::Subcommand)]
pub enum Tx {
    /// Vote for a contract call to be sent to a cellar at a future block height.
    ScheduleCork(ScheduleCork),
    /// Add cellars to the managed set (authority only).
    AddCellars(ManageCellars),
    /// Remove cellars from the managed set (authority only).
    RemoveCellars(ManageCellars),
    /// Replace the cork module parameters (authority only).
    UpdateParams(UpdateParams),
}

impl Run for Tx {
    async fn run(self) -> color_eyre::Result<()> {
        match self {
            Self::ScheduleCork(cmd) => cmd.run().await,
            Self::AddCellars(cmd) => cmd.run(true).await,
            Self::RemoveCellars(cmd) => cmd.run(false).await,
            Self::UpdateParams(cmd) => cmd.run().await,
        }
    }
}

#[derive(clap::Args)]
pub struct Common {
    /// CometBFT RPC endpoint to which to send the transaction.
    #[clap(long, short, default_value = "http://localhost:26657")]
    pub node: Url,
    /// Chain ID of the target chain.
    #[clap(long, short)]
    pub chain: String,
    /// Home directory holding the signing key (defaults to platform-specific directory).
    #[clap(long)]
    pub home: Option<PathBuf>,
    /// Sequence to sign with; must exceed every sequence this key has had accepted (defaults to
    /// the current time in milliseconds).
    #[clap(long)]
    pub sequence: Option<u64>,
}

impl Common {
    /// Sign the actions added by `build` and broadcast the transaction through the node.
    async fn submit(
        self,
        build: impl FnOnce(Builder, Bytes, u64) -> Builder,
    ) -> color_eyre::Result<()> {
        let Self {
            node,
            chain,
            home,
            sequence,
        } = self;
        let sequence = match sequence {
            Some(sequence) => sequence,
            None => u64::try_from(SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis())?,
        };

        let keypair = keypair(home.as_deref()).await?;
        let public_key = Bytes::copy_from_slice(keypair.public_key());
        let tx = build(Builder::new(ChainId(chain)), public_key, sequence)
            .build()
            .sign_to_proto(&keypair)
            .map_err(|e| eyre!("could not sign transaction: {e}"))?;

        // Create a Tendermint RPC client:
        let rpc_url = tendermint_rpc::Url::try_from(node)
            .map_err(|e| eyre!("invalid RPC URL: {e}"))?;
        let rpc_client =
            HttpClient::new(rpc_url).map_err(|e| eyre!("failed to create RPC client: {e}"))?;

        let response = rpc_client.broadcast_tx_sync(tx).await?;
        if response.code.is_err() {
            bail!(
                "transaction rejected with code {}: {}",
                response.code.value(),
                response.log
            );
        }

        info!(
            sequence,
            hash = %hex::encode(response.hash.as_bytes()),
            "transaction accepted into the mempool"
        );
        Ok(())
    }
}

#[derive(clap::Args)]
pub struct ScheduleCork {
    #[clap(flatten)]
    pub common: Common,
    /// Address of the target cellar.
    #[clap(long)]
    pub target: Address,
    /// ABI-encoded contract call, as hex.
    #[clap(long)]
    pub call: CallBytes,
    /// Label of the instruction slot the call occupies on the cellar.
    #[clap(long)]
    pub scope: Option<String>,
    /// Block height at which the vote is tallied.
    #[clap(long)]
    pub height: u64,
}

impl ScheduleCork {
    async fn run(self) -> color_eyre::Result<()> {
        let Self {
            common,
            target,
            call,
            scope,
            height,
        } = self;
        let cork = Cork {
            target_contract_address: target,
            encoded_contract_call: call,
            scope,
        };
        println!("cork id: {}", hex::encode(cork.id(height)));
        common
            .submit(|builder, key, sequence| builder.schedule_cork(key, sequence, cork, height))
            .await
    }
}

#[derive(clap::Args)]
pub struct ManageCellars {
    #[clap(flatten)]
    pub common: Common,
    /// Cellar addresses.
    #[clap(required = true)]
    pub cellars: Vec<Address>,
}

impl ManageCellars {
    async fn run(self, add: bool) -> color_eyre::Result<()> {
        let Self { common, cellars } = self;
        common
            .submit(|builder, key, sequence| {
                if add {
                    builder.add_managed_cellars(key, sequence, cellars)
                } else {
                    builder.remove_managed_cellars(key, sequence, cellars)
                }
            })
            .await
    }
}

#[derive(clap::Args)]
pub struct UpdateParams {
    #[clap(flatten)]
    pub common: Common,
    /// Share of bonded power a cork needs to be approved, between 0 and 1.
    #[clap(long)]
    pub vote_threshold: Decimal,
}

impl UpdateParams {
    async fn run(self) -> color_eyre::Result<()> {
        let params = Params {
            vote_threshold: self.vote_threshold,
        };
        params.validate()?;
        self.common
            .submit(|builder, key, sequence| builder.update_params(key, sequence, params))
            .await
    }
}
