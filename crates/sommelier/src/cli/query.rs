//! Query subcommands for interacting with the node's HTTP server.

use reqwest::Url;
use serde::{Serialize, de::DeserializeOwned};
use somm_types::{
    CorkResult, GenesisState, OutgoingContractCall, Params, ScheduledCork, Validator,
    ValidatorAddress,
    response::{
        IdentifiedCorkResult, InvalidationNonce, SignerSequence, Status, ValidatorCorkCount,
    },
};

use super::Run;

#[derive(clap::Args)]
pub struct Query {
    /// Node query server URL.
    #[clap(long, visible_alias = "node-url", default_value = "http://localhost:1317")]
    pub query_url: Url,

    #[command(subcommand)]
    pub command: QueryCommand,
}

#[derive(clap::Subcommand)]
pub enum QueryCommand {
    /// Query the chain ID, latest height and app hash.
    Status,
    /// Query the cork module parameters.
    Params,
    /// Query the managed cellars.
    Cellars,
    /// Query the validator set.
    Validators,
    /// Query how many corks a validator has submitted.
    CorkCount {
        validator: ValidatorAddress,
    },
    /// Query pending cork votes, optionally for a single height or cork id.
    Scheduled {
        #[clap(long, conflicts_with = "id")]
        height: Option<u64>,
        #[clap(long)]
        id: Option<String>,
    },
    /// Query the heights that have pending cork votes.
    ScheduledHeights,
    /// Query tally outcomes, optionally for a single cork id.
    Results {
        #[clap(long)]
        id: Option<String>,
    },
    /// Query the contract calls queued for relay.
    Outgoing,
    /// Query the latest invalidation nonce.
    Nonce,
    /// Query the highest sequence accepted from a signing key.
    Sequence {
        /// Hex-encoded public key of the signer.
        public_key: String,
    },
    /// Export the current state as a genesis file.
    Genesis,
}

impl Run for Query {
    async fn run(self) -> color_eyre::Result<()> {
        let url = self.query_url;
        match self.command {
            QueryCommand::Status => print::<Status>(&url, "/status").await,
            QueryCommand::Params => print::<Params>(&url, "/params").await,
            QueryCommand::Cellars => print::<Vec<alloy_primitives::Address>>(&url, "/cellars").await,
            QueryCommand::Validators => print::<Vec<Validator>>(&url, "/validators").await,
            QueryCommand::CorkCount { validator } => {
                let endpoint = format!("/validators/{validator}/cork_count");
                print::<ValidatorCorkCount>(&url, &endpoint).await
            }
            QueryCommand::Scheduled { height, id } => {
                let endpoint = match (height, id) {
                    (Some(height), _) => format!("/corks/scheduled/height/{height}"),
                    (None, Some(id)) => format!("/corks/scheduled/id/{id}"),
                    (None, None) => "/corks/scheduled".to_string(),
                };
                print::<Vec<ScheduledCork>>(&url, &endpoint).await
            }
            QueryCommand::ScheduledHeights => {
                print::<Vec<u64>>(&url, "/corks/scheduled/heights").await
            }
            QueryCommand::Results { id: Some(id) } => {
                print::<CorkResult>(&url, &format!("/corks/results/{id}")).await
            }
            QueryCommand::Results { id: None } => {
                print::<Vec<IdentifiedCorkResult>>(&url, "/corks/results").await
            }
            QueryCommand::Outgoing => {
                print::<Vec<OutgoingContractCall>>(&url, "/bridge/outgoing").await
            }
            QueryCommand::Nonce => print::<InvalidationNonce>(&url, "/bridge/nonce").await,
            QueryCommand::Sequence { public_key } => {
                print::<SignerSequence>(&url, &format!("/sequences/{public_key}")).await
            }
            QueryCommand::Genesis => print::<GenesisState>(&url, "/genesis").await,
        }
    }
}

/// Fetch an endpoint, check that it parses as the expected response, and pretty-print it.
async fn print<T: Serialize + DeserializeOwned>(
    query_url: &Url,
    endpoint: &str,
) -> color_eyre::Result<()> {
    let response: T = reqwest::Client::new()
        .get(query_url.join(endpoint)?)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
