use std::{
    future::IntoFuture,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use clap::Parser;
use color_eyre::eyre::{OptionExt, eyre};
use somm_state::Store;

use super::{Run, homedir};

mod query;

#[derive(Parser)]
pub struct Start {
    /// Home directory holding the node's state (defaults to platform-specific directory).
    #[clap(long)]
    home: Option<PathBuf>,
    /// Which port should the ABCI server listen on?
    #[clap(long, default_value = "26658")]
    abci: u16,
    /// Address on which to serve queries.
    #[clap(long, default_value = "127.0.0.1:1317")]
    listen: SocketAddr,
}

impl Run for Start {
    async fn run(self) -> color_eyre::Result<()> {
        let Self { home, abci, listen } = self;

        let home = homedir(home.as_deref())?;
        let store = Store::init(home.join("state"))
            .await
            .map_err(|e| eyre!("could not open storage at {}: {e}", home.display()))?;
        info!(
            height = store.latest().block_height().await?,
            app_hash = %store.app_hash().await?,
            "opened chain state"
        );

        // All the ABCI connections share the same store; consensus requests are handled in order:
        let (consensus, mempool, snapshot, info) =
            tower_abci::v034::split::service(store.clone(), 1);
        let abci_server = tower_abci::v034::ServerBuilder::default()
            .consensus(consensus)
            .snapshot(snapshot)
            .mempool(mempool)
            .info(info)
            .finish()
            .ok_or_eyre("could not construct ABCI server")?;

        info!(%listen, "starting query server");
        let listener = tokio::net::TcpListener::bind(listen).await?;

        info!(port = abci, "starting ABCI server");
        tokio::select! {
            served = abci_server.listen_tcp((IpAddr::V4(Ipv4Addr::LOCALHOST), abci)) => {
                served.map_err(|e| eyre!("ABCI server on port {abci} failed: {e}"))?
            }
            served = axum::serve(listener, query::app(store)).into_future() => served?,
        }

        Ok(())
    }
}
