use std::task::{Context, Poll};

use futures::future::BoxFuture;
use tendermint::{abci::Code, block::Height, v0_34::abci};
use tower::{BoxError, Service};
use tracing::Instrument;

impl Service<abci::Request> for crate::Store {
    type Response = abci::Response;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    #[instrument(name = "abci", skip(self, req))]
    fn call(&mut self, req: abci::Request) -> Self::Future {
        debug!(?req);

        let store = self.clone();

        Box::pin(async move {
            match req {
                abci::Request::Echo(echo) => Ok(abci::Response::Echo(abci::response::Echo {
                    message: echo.message,
                })),
                abci::Request::Flush => Ok(abci::Response::Flush),
                abci::Request::Info(_info) => {
                    let last_block_height =
                        Height::try_from(store.latest().block_height().await?)?;
                    let last_block_app_hash = store.app_hash().await?;

                    Ok(abci::Response::Info(abci::response::Info {
                        data: env!("CARGO_PKG_NAME").to_string(),
                        version: env!("CARGO_PKG_VERSION").to_string(),
                        app_version: 1,
                        last_block_height,
                        last_block_app_hash,
                    }))
                }
                abci::Request::InitChain(init_chain) => {
                    let response = store
                        .state
                        .write()
                        .await
                        .init_chain(init_chain)
                        .instrument(info_span!("InitChain"))
                        .await?;
                    Ok(abci::Response::InitChain(response))
                }
                abci::Request::BeginBlock(begin_block) => {
                    let response = store
                        .state
                        .write()
                        .await
                        .begin_block(begin_block)
                        .instrument(info_span!("BeginBlock"))
                        .await?;
                    Ok(abci::Response::BeginBlock(response))
                }
                abci::Request::CheckTx(check_tx) => {
                    // Checked against the last commit, never against the block in progress:
                    let response = store
                        .latest()
                        .check_tx(&check_tx.tx)
                        .instrument(info_span!("CheckTx"))
                        .await;
                    Ok(abci::Response::CheckTx(response))
                }
                abci::Request::DeliverTx(abci::request::DeliverTx { tx: tx_bytes }) => {
                    let response = store
                        .state
                        .write()
                        .await
                        .deliver_tx(&tx_bytes)
                        .instrument(info_span!("DeliverTx"))
                        .await;
                    Ok(abci::Response::DeliverTx(response))
                }
                abci::Request::EndBlock(end_block) => {
                    let response = store
                        .state
                        .write()
                        .await
                        .end_block(end_block)
                        .instrument(info_span!("EndBlock"))
                        .await?;
                    Ok(abci::Response::EndBlock(response))
                }
                abci::Request::Commit => {
                    let root_hash = store.commit().await?;
                    info!(root_hash = %hex::encode(root_hash.0), "committed block");

                    Ok(abci::Response::Commit(abci::response::Commit {
                        data: root_hash.0.to_vec().into(),
                        ..Default::default()
                    }))
                }
                // Unimplemented ABCI methods:
                abci::Request::SetOption(_set_option) => {
                    Ok(abci::Response::SetOption(abci::response::SetOption {
                        code: Code::from(crate::CODE_REJECTED),
                        log: "set option is not implemented".to_string(),
                        info: "".to_string(),
                    }))
                }
                abci::Request::Query(_query) => Ok(abci::Response::Query(abci::response::Query {
                    code: Code::from(crate::CODE_REJECTED),
                    log: "query is not implemented".to_string(),
                    ..Default::default()
                })),
                abci::Request::ListSnapshots => Err("snapshots are not implemented".into()),
                abci::Request::OfferSnapshot(_offer_snapshot) => {
                    Err("snapshots are not implemented".into())
                }
                abci::Request::LoadSnapshotChunk(_load_snapshot_chunk) => {
                    Err("snapshots are not implemented".into())
                }
                abci::Request::ApplySnapshotChunk(_apply_snapshot_chunk) => {
                    Err("snapshots are not implemented".into())
                }
            }
        })
    }
}
