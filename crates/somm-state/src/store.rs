use std::fmt::{self, Display};
use std::future::Future;
use std::mem;
use std::path::PathBuf;
use std::sync::Arc;

use cnidarium::{RootHash, Snapshot, StateDelta, StateRead, StateWrite, Storage};
use color_eyre::{
    Report,
    eyre::{OptionExt, eyre},
};
use futures::{Stream, StreamExt};
use somm_proto::DomainType;
use somm_types::Event;
use tendermint::{AppHash, abci};
use tokio::sync::RwLock;

use crate::State;

/// Every substore the state is split across, each with its own merkle root.
const SUBSTORES: [&str; 4] = ["internal", "cork", "bridge", "staking"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Substore {
    Internal,
    Cork,
    Bridge,
    Staking,
}

impl Display for Substore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Substore::Internal => write!(f, "internal"),
            Substore::Cork => write!(f, "cork"),
            Substore::Bridge => write!(f, "bridge"),
            Substore::Staking => write!(f, "staking"),
        }
    }
}

impl Substore {
    pub fn prefix(&self, key: &str) -> String {
        format!("{}/{}", self, key)
    }

    pub fn unprefix<'a>(&self, prefixed_key: &'a str) -> Option<&'a str> {
        let prefix = format!("{}/", self);
        prefixed_key.strip_prefix(&prefix)
    }
}

/// Typed access to state, decoding values through their [`DomainType`].
pub trait StateReadExt: StateRead {
    /// Get a value from the state by key, decoding it into the given domain type.
    fn get<V: DomainType>(
        &self,
        substore: Substore,
        key: &str,
    ) -> impl Future<Output = Result<Option<V>, Report>> + Send {
        let bytes = self.get_raw(&substore.prefix(key));
        async move {
            bytes
                .await
                .map_err(|e| eyre!(e))?
                .map(|bytes| V::decode(bytes).map_err(Report::from))
                .transpose()
        }
    }

    /// Get a stream over all key-value pairs in the state with the given prefix, decoding the
    /// values into the given domain type. Keys come back in order, without the substore prefix.
    fn prefix<V: DomainType>(
        &self,
        substore: Substore,
        prefix: &str,
    ) -> impl Stream<Item = Result<(String, V), Report>> + Send {
        self.prefix_raw(&substore.prefix(prefix))
            .map(move |res| match res {
                Ok((key, bytes)) => {
                    let key = substore
                        .unprefix(&key)
                        .ok_or_eyre("key from wrong substore")?
                        .to_string();
                    Ok((key, V::decode(bytes)?))
                }
                Err(e) => Err(eyre!(e)),
            })
    }

    /// Get a stream over all keys in the state with the given prefix, without the substore
    /// prefix.
    fn keys(
        &self,
        substore: Substore,
        prefix: &str,
    ) -> impl Stream<Item = Result<String, Report>> + Send {
        self.prefix_keys(&substore.prefix(prefix)).map(move |res| match res {
            Ok(key) => Ok(substore
                .unprefix(&key)
                .ok_or_eyre("key from wrong substore")?
                .to_string()),
            Err(e) => Err(eyre!(e)),
        })
    }
}

impl<T: StateRead + ?Sized> StateReadExt for T {}

pub trait StateWriteExt: StateWrite {
    /// Set a value in the state by key, encoding it from the given domain type.
    fn put<V: DomainType>(&mut self, substore: Substore, key: &str, value: V) {
        self.put_raw(substore.prefix(key), value.encode_to_vec());
    }

    /// Delete a value from the state by key.
    fn delete_key(&mut self, substore: Substore, key: &str) {
        self.delete(substore.prefix(key));
    }

    /// Record an event, to be reported with the result of whatever is executing.
    fn record_event(&mut self, event: Event) {
        self.record(abci_event(event));
    }
}

impl<T: StateWrite + ?Sized> StateWriteExt for T {}

pub(crate) fn abci_event(Event { kind, attributes }: Event) -> abci::Event {
    abci::Event::new(kind, attributes)
}

/// The node's state: committed storage plus the pending changes of the block in progress.
#[derive(Clone)]
pub struct Store {
    storage: Storage,
    pub state: Arc<RwLock<State<StateDelta<Snapshot>>>>,
}

impl Store {
    /// Open the state database in the given directory, creating it if needed.
    pub async fn init(path: PathBuf) -> Result<Self, Report> {
        let storage = Storage::init(path, SUBSTORES.map(Into::into).to_vec())
            .await
            .map_err(|e| eyre!(e))?;
        Ok(Self::new(storage))
    }

    fn new(storage: Storage) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::new(StateDelta::new(
                storage.latest_snapshot(),
            )))),
            storage,
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// A scratch view of the latest committed state. Changes made to it are never committed.
    pub fn latest(&self) -> State<StateDelta<Snapshot>> {
        State::new(StateDelta::new(self.storage.latest_snapshot()))
    }

    /// The app hash of the latest committed state, or the empty hash before the first commit.
    pub async fn app_hash(&self) -> Result<AppHash, Report> {
        if self.storage.latest_version() == u64::MAX {
            return Ok(AppHash::default());
        }
        let root_hash = self
            .storage
            .latest_snapshot()
            .root_hash()
            .await
            .map_err(|e| eyre!(e))?;
        Ok(AppHash::try_from(root_hash.0.to_vec())?)
    }

    /// Commit all pending changes to the underlying storage.
    pub async fn commit(&self) -> Result<RootHash, Report> {
        let mut state = self.state.write().await;

        // Pull out the pending state and replace it with an empty one:
        let pending = mem::replace(
            &mut *state,
            State::new(StateDelta::new(self.storage.latest_snapshot())),
        );

        let root_hash = self
            .storage
            .commit(pending.into_inner())
            .await
            .map_err(|e| eyre!(e))?;

        // Rebase onto the snapshot just written, or later reads would miss the commit:
        *state = State::new(StateDelta::new(self.storage.latest_snapshot()));

        Ok(root_hash)
    }
}
